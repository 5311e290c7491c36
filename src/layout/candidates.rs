//! Directional position generators. Pure functions from one station and a
//! compass direction to candidate placements at the origin, one per
//! available wrap-line count. Neighbouring stations are unknown here; the
//! orchestrator shifts and separates the chosen candidate.

use crate::config::LayoutConfig;
use crate::geometry::{AnchoredBox, BoxRole, Padding, Point, Spacing};
use crate::model::{Direction, DirectionFamily, Side, Station};

use super::wrap::{SelectedWrapping, select_wrappings};
use super::{
    Baseline, MeasuredWrapping, PlacementScore, StationPosition, TextAnchor, TextHints, TrimRule,
};

/// Square footprint of a station marker including its stroke, never
/// narrower than the line it sits on.
pub(super) fn marker_footprint(config: &LayoutConfig) -> f32 {
    config
        .line_width
        .max(config.marker.radius * 2.0 + config.marker.stroke_width * 2.0)
}

pub(super) fn generate_candidates<F>(
    station: &Station,
    direction: Direction,
    side: Side,
    config: &LayoutConfig,
    measure: &mut F,
) -> Vec<StationPosition>
where
    F: FnMut(&Station, TextHints) -> Vec<MeasuredWrapping>,
{
    match direction.family() {
        DirectionFamily::Vertical => beside_candidates(station, direction, side, config, measure),
        DirectionFamily::Horizontal => {
            stacked_candidates(station, direction, side, config, measure)
        }
        DirectionFamily::Diagonal => diagonal_candidates(station, direction, side, config, measure),
    }
}

fn spacing_padding(spacing: Spacing) -> Padding {
    Padding {
        top: spacing.y,
        bottom: spacing.y,
        left: spacing.x,
        right: spacing.x,
    }
}

fn build_position(
    station: &Station,
    marker: AnchoredBox,
    label: AnchoredBox,
    wrapping: &SelectedWrapping,
    side: Side,
    text_anchor: TextAnchor,
    baseline: Option<Baseline>,
    trim: Option<TrimRule>,
    perpendicular_inflation: Padding,
    config: &LayoutConfig,
) -> StationPosition {
    let safe_areas = vec![
        marker
            .rect
            .with_padding(spacing_padding(config.spacing.marker))
            .with_padding(perpendicular_inflation),
        label
            .rect
            .with_padding(spacing_padding(config.spacing.label))
            .with_padding(perpendicular_inflation),
    ];
    StationPosition {
        station: station.clone(),
        marker,
        label,
        label_lines: wrapping.lines.clone(),
        side,
        text_anchor,
        baseline,
        safe_areas,
        trim,
        score: PlacementScore {
            side,
            line_count: wrapping.lines.len() as u32,
        },
    }
}

/// Labels beside a north/south line, vertically balanced on the marker.
fn beside_candidates<F>(
    station: &Station,
    direction: Direction,
    side: Side,
    config: &LayoutConfig,
    measure: &mut F,
) -> Vec<StationPosition>
where
    F: FnMut(&Station, TextHints) -> Vec<MeasuredWrapping>,
{
    let east = direction.side_position(side) == Direction::East;
    let text_anchor = if east { TextAnchor::Start } else { TextAnchor::End };
    let hints = TextHints {
        text_anchor,
        dominant_baseline: Baseline::Alphabetic,
    };
    let wrappings = measure(station, hints);

    let size = marker_footprint(config);
    let marker = Point::ORIGIN.with_size(size, size).with_role(BoxRole::Marker);
    let gap = config.gap.marker_label;

    select_wrappings(&wrappings, config.label_line_height())
        .iter()
        .map(|wrapping| {
            let label_x = if east {
                marker.rect.max.x + gap.x
            } else {
                marker.rect.min.x - gap.x
            };
            // center the wrapped block on the marker, however many lines
            let label_y = marker.y() - (wrapping.bounds.y + wrapping.bounds.height / 2.0);
            let label = wrapping
                .bounds
                .anchored_at(Point::new(label_x, label_y))
                .with_role(BoxRole::Label);
            build_position(
                station,
                marker,
                label,
                wrapping,
                side,
                text_anchor,
                None,
                Some(TrimRule::VerticalBeyondMarkerCenter),
                Padding::default(),
                config,
            )
        })
        .collect()
}

/// Labels stacked above/below an east/west line, anchored at the marker's x.
fn stacked_candidates<F>(
    station: &Station,
    direction: Direction,
    side: Side,
    config: &LayoutConfig,
    measure: &mut F,
) -> Vec<StationPosition>
where
    F: FnMut(&Station, TextHints) -> Vec<MeasuredWrapping>,
{
    let below = direction.side_position(side) == Direction::South;
    let baseline = if below {
        Baseline::Hanging
    } else {
        Baseline::Alphabetic
    };
    let hints = TextHints {
        text_anchor: TextAnchor::Middle,
        dominant_baseline: baseline,
    };
    let wrappings = measure(station, hints);

    let size = marker_footprint(config);
    let marker = Point::ORIGIN.with_size(size, size).with_role(BoxRole::Marker);
    let gap = config.gap.marker_label;
    let inflation = Padding::y(gap.y * 2.0);

    select_wrappings(&wrappings, config.label_line_height())
        .iter()
        .map(|wrapping| {
            let target_y = if below {
                marker.rect.max.y + gap.y
            } else {
                marker.rect.min.y - gap.y
            };
            let label_y = stack_edge_anchor(wrapping, target_y, below);
            let label = wrapping
                .bounds
                .anchored_at(Point::new(marker.x(), label_y))
                .with_role(BoxRole::Label);
            build_position(
                station,
                marker,
                label,
                wrapping,
                side,
                TextAnchor::Middle,
                Some(baseline),
                Some(TrimRule::HorizontalBeyondMarker),
                inflation,
                config,
            )
        })
        .collect()
}

/// Labels offset diagonally from a diagonal line's marker corner.
fn diagonal_candidates<F>(
    station: &Station,
    direction: Direction,
    side: Side,
    config: &LayoutConfig,
    measure: &mut F,
) -> Vec<StationPosition>
where
    F: FnMut(&Station, TextHints) -> Vec<MeasuredWrapping>,
{
    let label_direction = direction.side_position(side);
    let east = label_direction.east_sign() > 0.0;
    let below = label_direction.south_sign() > 0.0;
    let text_anchor = if east { TextAnchor::Start } else { TextAnchor::End };
    let baseline = if below {
        Baseline::Hanging
    } else {
        Baseline::Alphabetic
    };
    let hints = TextHints {
        text_anchor,
        dominant_baseline: baseline,
    };
    let wrappings = measure(station, hints);

    // diagonal footprint of a square marker inscribed at 45°
    let size = marker_footprint(config) * std::f32::consts::FRAC_1_SQRT_2;
    let marker = Point::ORIGIN.with_size(size, size).with_role(BoxRole::Marker);
    let gap = config.gap.marker_label.scale(std::f32::consts::FRAC_1_SQRT_2);
    let inflation = Padding::y(config.gap.marker_label.y * 2.0);

    select_wrappings(&wrappings, config.label_line_height())
        .iter()
        .map(|wrapping| {
            let label_x = if east {
                marker.rect.max.x + gap.x
            } else {
                marker.rect.min.x - gap.x
            };
            let target_y = if below {
                marker.rect.max.y + gap.y
            } else {
                marker.rect.min.y - gap.y
            };
            let label_y = stack_edge_anchor(wrapping, target_y, below);
            let label = wrapping
                .bounds
                .anchored_at(Point::new(label_x, label_y))
                .with_role(BoxRole::Label);
            build_position(
                station,
                marker,
                label,
                wrapping,
                side,
                text_anchor,
                Some(baseline),
                None,
                inflation,
                config,
            )
        })
        .collect()
}

/// Anchor y that puts the near edge of the wrapped stack at `target_y`:
/// the top edge when the label grows downward, the bottom edge otherwise.
fn stack_edge_anchor(wrapping: &SelectedWrapping, target_y: f32, below: bool) -> f32 {
    if below {
        target_y - wrapping.bounds.y
    } else {
        target_y - (wrapping.bounds.y + wrapping.bounds.height)
    }
}
