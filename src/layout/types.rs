use serde::Serialize;

use crate::geometry::{AnchoredBox, Offset, Point, Rect};
use crate::model::{Direction, Side, Station};

/// Horizontal anchoring of rendered text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Vertical baseline the text hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Baseline {
    Alphabetic,
    Hanging,
}

/// Style hints handed to the measurement callback. Measured boxes are
/// expressed relative to an anchor placed under these hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextHints {
    pub text_anchor: TextAnchor,
    pub dominant_baseline: Baseline,
}

/// One measured line of text. `x`/`y` are the offsets of the rendered box
/// from the anchor point (bearing corrections), so a box anchored with
/// `text_anchor = end` carries a negative `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TextBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The absolute extent of this box when its anchor sits at `point`.
    pub fn anchored_at(self, point: Point) -> AnchoredBox {
        point.with_range(
            point.x + self.x,
            point.y + self.y,
            point.x + self.x + self.width,
            point.y + self.y + self.height,
        )
    }
}

/// A candidate line-wrapping of one label, measured line by line by the
/// caller-supplied measurement callback.
#[derive(Debug, Clone)]
pub struct MeasuredWrapping {
    pub lines: Vec<String>,
    pub boxes: Vec<TextBox>,
}

/// Which end of a station sequence a station sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    Start,
    End,
}

/// Policy for ignoring the part of an endpoint label that extends past the
/// line's terminus. Applied only when nothing approaches from that end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimRule {
    /// Strip the label's vertical extent beyond the marker's vertical
    /// center (labels beside a vertical line).
    VerticalBeyondMarkerCenter,
    /// Strip the label's horizontal extent beyond the marker (labels
    /// stacked on a horizontal line).
    HorizontalBeyondMarker,
}

impl TrimRule {
    pub fn apply(
        self,
        label: Rect,
        marker: &AnchoredBox,
        direction: Direction,
        end: LineEnd,
    ) -> Rect {
        let travel = direction.unit();
        let outward = match end {
            LineEnd::Start => travel.scale(-1.0),
            LineEnd::End => travel,
        };
        match self {
            TrimRule::VerticalBeyondMarkerCenter => {
                let center = marker.y();
                if outward.dy < 0.0 {
                    Rect {
                        min: Point::new(label.min.x, label.min.y.max(center)),
                        ..label
                    }
                } else if outward.dy > 0.0 {
                    Rect {
                        max: Point::new(label.max.x, label.max.y.min(center)),
                        ..label
                    }
                } else {
                    label
                }
            }
            TrimRule::HorizontalBeyondMarker => {
                if outward.dx < 0.0 {
                    Rect {
                        min: Point::new(label.min.x.max(marker.rect.min.x), label.min.y),
                        ..label
                    }
                } else if outward.dx > 0.0 {
                    Rect {
                        max: Point::new(label.max.x.min(marker.rect.max.x), label.max.y),
                        ..label
                    }
                } else {
                    label
                }
            }
        }
    }
}

/// Preference cost of a candidate, keyed by the previous station's side.
/// Staying on the same side is free; switching costs one extra line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementScore {
    pub side: Side,
    pub line_count: u32,
}

impl PlacementScore {
    pub fn for_previous(&self, previous: Option<Side>) -> u32 {
        match previous {
            None => self.line_count,
            Some(side) if side == self.side => self.line_count,
            Some(_) => self.line_count + 1,
        }
    }
}

/// A committed (or candidate) placement of one station: marker and label
/// extents with their anchors, rendering hints, the padded safe areas that
/// keep the next station clear, and the endpoint trim policy.
#[derive(Debug, Clone)]
pub struct StationPosition {
    pub station: Station,
    pub marker: AnchoredBox,
    pub label: AnchoredBox,
    /// The chosen wrapping, in render order.
    pub label_lines: Vec<String>,
    pub side: Side,
    pub text_anchor: TextAnchor,
    pub baseline: Option<Baseline>,
    /// Collision rects for subsequent placements; never tested against this
    /// station's own marker or label.
    pub safe_areas: Vec<Rect>,
    pub trim: Option<TrimRule>,
    pub score: PlacementScore,
}

impl StationPosition {
    pub fn line_count(&self) -> u32 {
        self.label_lines.len() as u32
    }

    /// The whole placement moved rigidly.
    pub fn translate(&self, offset: Offset) -> StationPosition {
        StationPosition {
            station: self.station.clone(),
            marker: self.marker.offset(offset),
            label: self.label.offset(offset),
            label_lines: self.label_lines.clone(),
            side: self.side,
            text_anchor: self.text_anchor,
            baseline: self.baseline,
            safe_areas: self
                .safe_areas
                .iter()
                .map(|rect| rect.offset(offset))
                .collect(),
            trim: self.trim,
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_charges_for_switching_sides() {
        let score = PlacementScore {
            side: Side::Right,
            line_count: 2,
        };
        assert_eq!(score.for_previous(Some(Side::Right)), 2);
        assert_eq!(score.for_previous(Some(Side::Left)), 3);
        assert_eq!(score.for_previous(None), 2);
    }

    #[test]
    fn vertical_trim_strips_past_marker_center() {
        let marker = Point::new(0.0, 10.0).with_size(4.0, 4.0);
        let label = Rect::from_coords(6.0, 0.0, 30.0, 20.0);
        // travelling south, the start end points north: strip above center
        let trimmed = TrimRule::VerticalBeyondMarkerCenter.apply(
            label,
            &marker,
            Direction::South,
            LineEnd::Start,
        );
        assert_eq!(trimmed.min.y, 10.0);
        assert_eq!(trimmed.max.y, 20.0);
        // at the other end, strip below center
        let trimmed = TrimRule::VerticalBeyondMarkerCenter.apply(
            label,
            &marker,
            Direction::South,
            LineEnd::End,
        );
        assert_eq!(trimmed.min.y, 0.0);
        assert_eq!(trimmed.max.y, 10.0);
    }

    #[test]
    fn horizontal_trim_clamps_to_marker_edges() {
        let marker = Point::ORIGIN.with_size(10.0, 10.0);
        let label = Rect::from_coords(-20.0, -30.0, 20.0, -20.0);
        let trimmed =
            TrimRule::HorizontalBeyondMarker.apply(label, &marker, Direction::East, LineEnd::Start);
        assert_eq!(trimmed.min.x, -5.0);
        assert_eq!(trimmed.max.x, 20.0);
        let trimmed =
            TrimRule::HorizontalBeyondMarker.apply(label, &marker, Direction::East, LineEnd::End);
        assert_eq!(trimmed.max.x, 5.0);
    }

    #[test]
    fn anchored_text_box_applies_bearings() {
        let anchored = TextBox::new(-40.0, -10.0, 40.0, 12.0).anchored_at(Point::new(100.0, 50.0));
        assert_eq!(anchored.rect.min, Point::new(60.0, 40.0));
        assert_eq!(anchored.rect.max, Point::new(100.0, 52.0));
        assert_eq!(anchored.point, Point::new(100.0, 50.0));
    }
}
