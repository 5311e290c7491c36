//! Line layout: sequential placement of every station on a line.
//!
//! A deterministic fold structured as a multi-pass search: candidates per
//! station come from the directional generators, a wrap-line budget is
//! relaxed from least to most wrapping until a full placement exists, and
//! spacing is then redistributed to honor optional maximum-size growth.

mod candidates;
mod error;
pub mod wrap;
pub(crate) mod types;

pub use error::LayoutError;
pub use types::*;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::geometry::{BoundedBox, Offset, Rect, SizeLimit, separation_factor};
use crate::model::{ALL_SIDES, Direction, Line, Side, Station};

use candidates::generate_candidates;

/// Sides from which other line segments approach the first/last station of
/// a layout call. An endpoint label is only trimmed (allowed to hang off
/// the drawing) on sides with no approach.
#[derive(Debug, Clone, Default)]
pub struct EndpointConflicts {
    pub start: Vec<Side>,
    pub end: Vec<Side>,
}

impl EndpointConflicts {
    /// Both sides conflicted: endpoint labels are never trimmed there.
    pub fn all() -> Vec<Side> {
        ALL_SIDES.to_vec()
    }
}

#[derive(Debug, Clone)]
pub struct LineLayoutOptions {
    /// Pin every label to one side of the line.
    pub side: Option<Side>,
    /// Maximum drawing size; unbounded by default.
    pub bounds: SizeLimit,
    /// Keep inter-station spacing minimal instead of spreading evenly.
    pub compact: bool,
    /// Side the previous segment ended on, biasing the first station.
    pub initial_side: Option<Side>,
    /// Per-station side pins resolved from label-position overrides.
    pub pinned: HashMap<String, Side>,
    /// Name used in diagnostics and errors.
    pub description: String,
    pub conflicts: EndpointConflicts,
}

impl Default for LineLayoutOptions {
    fn default() -> Self {
        Self {
            side: None,
            bounds: SizeLimit::default(),
            compact: false,
            initial_side: None,
            pinned: HashMap::new(),
            description: String::new(),
            conflicts: EndpointConflicts::default(),
        }
    }
}

/// Lays out every station of a straight run along `direction`.
///
/// The first station's marker anchors at the origin; each later station is
/// pushed just far enough along the direction vector to clear the previous
/// station's safe areas. Fails only when no wrap-line budget fits the
/// optional size caps.
pub fn layout_line<F>(
    stations: &[Station],
    direction: Direction,
    config: &LayoutConfig,
    measure: &mut F,
    options: &LineLayoutOptions,
) -> Result<Vec<StationPosition>, LayoutError>
where
    F: FnMut(&Station, TextHints) -> Vec<MeasuredWrapping>,
{
    if stations.is_empty() {
        return Ok(Vec::new());
    }

    let sides: Vec<Side> = match options.side {
        Some(side) => vec![side],
        None => ALL_SIDES.to_vec(),
    };
    let mut all_candidates: Vec<Vec<StationPosition>> = Vec::with_capacity(stations.len());
    for station in stations {
        let station_sides: &[Side] = match options.pinned.get(&station.name) {
            Some(side) => std::slice::from_ref(side),
            None => &sides,
        };
        let mut station_candidates = Vec::new();
        for side in station_sides {
            station_candidates.extend(generate_candidates(
                station, direction, *side, config, measure,
            ));
        }
        if station_candidates.is_empty() {
            return Err(LayoutError::NoWrappings {
                station: station.name.clone(),
            });
        }
        all_candidates.push(station_candidates);
    }

    let min_lines = all_candidates
        .iter()
        .filter_map(|c| c.iter().map(StationPosition::line_count).min())
        .min()
        .unwrap_or(1);
    let max_lines = all_candidates
        .iter()
        .filter_map(|c| c.iter().map(StationPosition::line_count).max())
        .max()
        .unwrap_or(1);

    let travel = direction.unit();
    let mut committed = None;
    for budget in min_lines..=max_lines {
        if let Some(result) = try_budget(&all_candidates, budget, direction, travel, options) {
            committed = Some(result);
            break;
        }
    }
    let Some((mut placed, factors, bounds)) = committed else {
        return Err(LayoutError::Unsatisfiable {
            line: options.description.clone(),
            max_width: options.bounds.max_width,
            max_height: options.bounds.max_height,
        });
    };

    if placed.len() <= 1 {
        return Ok(placed);
    }

    let mut gaps: Vec<f32> = factors[1..].to_vec();
    gaps.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let headroom = growth_headroom(&bounds, travel);
    let chosen = growth_offset(&gaps, headroom, options.compact);

    let mut extra = 0.0f32;
    for index in 1..placed.len() {
        let applied = factors[index].max(chosen);
        extra += applied - factors[index];
        if extra > 0.0 {
            placed[index] = placed[index].translate(travel.scale(extra));
        }
    }
    Ok(placed)
}

/// One fold attempt at a fixed wrap-line budget. `None` when any station
/// runs out of admissible candidates.
fn try_budget(
    all_candidates: &[Vec<StationPosition>],
    budget: u32,
    direction: Direction,
    travel: Offset,
    options: &LineLayoutOptions,
) -> Option<(Vec<StationPosition>, Vec<f32>, BoundedBox)> {
    let mut bounds = BoundedBox::new(options.bounds);
    let mut placed: Vec<StationPosition> = Vec::new();
    let mut factors: Vec<f32> = Vec::new();
    let mut previous_side = options.initial_side;
    let last_index = all_candidates.len() - 1;

    for (index, station_candidates) in all_candidates.iter().enumerate() {
        let mut viable: Vec<(StationPosition, f32, Rect)> = Vec::new();
        for candidate in station_candidates {
            if candidate.line_count() > budget {
                continue;
            }
            let at = match placed.last() {
                Some(previous) => {
                    candidate.translate(Offset::new(previous.marker.x(), previous.marker.y()))
                }
                None => candidate.clone(),
            };

            // endpoint labels may hang off the end of the drawing when no
            // other segment approaches from that side
            let mut label_rect = at.label.rect;
            if let Some(trim) = at.trim {
                if index == 0 && !options.conflicts.start.contains(&at.side) {
                    label_rect = trim.apply(label_rect, &at.marker, direction, LineEnd::Start);
                }
                if index == last_index && !options.conflicts.end.contains(&at.side) {
                    label_rect = trim.apply(label_rect, &at.marker, direction, LineEnd::End);
                }
            }

            // fit is checked before the separation offset so wrapping
            // decisions never depend on how far along the line we are
            if !bounds.can_fit([at.marker.rect, label_rect]) {
                continue;
            }

            let factor = match placed.last() {
                Some(previous) => separation_factor(
                    &previous.safe_areas,
                    &[at.marker.rect, at.label.rect],
                    travel,
                ),
                None => 0.0,
            };
            if !factor.is_finite() {
                continue;
            }
            viable.push((at, factor, label_rect));
        }

        let best_score = viable
            .iter()
            .map(|(candidate, _, _)| candidate.score.for_previous(previous_side))
            .min()?;
        let tied = viable
            .iter()
            .filter(|(candidate, _, _)| candidate.score.for_previous(previous_side) == best_score)
            .count();
        if tied > 1 {
            debug!(
                line = options.description.as_str(),
                station = all_candidates[index]
                    .first()
                    .map(|c| c.station.name.as_str())
                    .unwrap_or(""),
                tied,
                "multiple equally scored placements; keeping the first"
            );
        }
        let (candidate, factor, label_rect) = viable
            .into_iter()
            .find(|(candidate, _, _)| candidate.score.for_previous(previous_side) == best_score)?;

        let shift = travel.scale(factor);
        let station_position = candidate.translate(shift);
        bounds = bounds.add([station_position.marker.rect, label_rect.offset(shift)]);
        previous_side = Some(station_position.side);
        factors.push(factor);
        placed.push(station_position);
    }

    Some((placed, factors, bounds))
}

/// Growth budget in offset-factor units: how much farther apart stations
/// may drift before the committed extent hits a cap along the line axis.
/// Headroom perpendicular to the line is irrelevant.
fn growth_headroom(bounds: &BoundedBox, travel: Offset) -> f32 {
    let rect = bounds.to_rect();
    let limit = bounds.limit();
    let mut headroom = f32::INFINITY;
    if travel.dx != 0.0 && limit.max_width.is_finite() {
        headroom = headroom.min((limit.max_width - rect.width()).max(0.0) / travel.dx.abs());
    }
    if travel.dy != 0.0 && limit.max_height.is_finite() {
        headroom = headroom.min((limit.max_height - rect.height()).max(0.0) / travel.dy.abs());
    }
    headroom
}

/// Uniform spacing target applied on top of the minimal offsets.
///
/// Unbounded: 0 in compact mode, otherwise the largest minimal offset.
/// Bounded: water-filling from the tightest gaps upward, with an exact
/// fractional final step when the growth budget runs out; enough budget to
/// equalize all gaps distributes the remainder evenly.
fn growth_offset(sorted_gaps: &[f32], max_growth: f32, compact: bool) -> f32 {
    let Some(&largest) = sorted_gaps.last() else {
        return 0.0;
    };
    if compact {
        return 0.0;
    }
    if max_growth.is_infinite() {
        return largest;
    }
    let max_growth = max_growth.max(0.0);
    let count = sorted_gaps.len() as f32;

    let equalize_cost: f32 = sorted_gaps.iter().map(|gap| largest - gap).sum();
    if max_growth >= equalize_cost {
        return largest + (max_growth - equalize_cost) / count;
    }

    let mut remaining = max_growth;
    let mut chosen = sorted_gaps[0];
    for (index, window) in sorted_gaps.windows(2).enumerate() {
        let raised = (index + 1) as f32;
        let cost = raised * (window[1] - chosen);
        if cost > remaining {
            return chosen + remaining / raised;
        }
        remaining -= cost;
        chosen = window[1];
    }
    chosen
}

/// Lays out a whole line segment by segment, chaining each segment onto the
/// previous one along the new direction and keeping label sides continuous
/// across the joins. Interior joins are conflicted on both sides so only
/// the line's true termini may trim their labels.
pub fn layout_direction_segments<F>(
    line: &Line,
    fallback_direction: Direction,
    config: &LayoutConfig,
    measure: &mut F,
    options: &LineLayoutOptions,
) -> Result<Vec<StationPosition>, LayoutError>
where
    F: FnMut(&Station, TextHints) -> Vec<MeasuredWrapping>,
{
    let segments: Vec<_> = line
        .direction_segments
        .iter()
        .filter(|segment| !segment.stations.is_empty())
        .collect();
    let last_segment = segments.len().saturating_sub(1);

    let mut positions: Vec<StationPosition> = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        let direction = segment.direction.unwrap_or(fallback_direction);
        let mut pinned = pinned_sides(line, direction);
        pinned.extend(options.pinned.clone());
        let segment_options = LineLayoutOptions {
            side: options.side,
            // size caps only compose across a single straight run
            bounds: if segments.len() == 1 {
                options.bounds
            } else {
                SizeLimit::default()
            },
            compact: options.compact,
            initial_side: positions.last().map(|p| p.side).or(options.initial_side),
            pinned,
            description: format!("{} segment {}", options.description, index),
            conflicts: EndpointConflicts {
                start: if index == 0 {
                    options.conflicts.start.clone()
                } else {
                    EndpointConflicts::all()
                },
                end: if index == last_segment {
                    options.conflicts.end.clone()
                } else {
                    EndpointConflicts::all()
                },
            },
        };
        let segment_positions = layout_line(
            &segment.stations,
            direction,
            config,
            measure,
            &segment_options,
        )?;
        match positions.last() {
            None => positions.extend(segment_positions),
            Some(previous) => {
                let base = Offset::new(previous.marker.x(), previous.marker.y());
                let shifted: Vec<StationPosition> = segment_positions
                    .iter()
                    .map(|p| p.translate(base))
                    .collect();
                let first = &shifted[0];
                let travel = direction.unit();
                let factor = separation_factor(
                    &previous.safe_areas,
                    &[first.marker.rect, first.label.rect],
                    travel,
                );
                let factor = if factor.is_finite() {
                    factor
                } else {
                    warn!(
                        line = line.id.as_str(),
                        "segment join cannot be separated along its direction"
                    );
                    0.0
                };
                let join_shift = travel.scale(factor);
                positions.extend(shifted.iter().map(|p| p.translate(join_shift)));
            }
        }
    }
    Ok(positions)
}

/// Per-station side pins derived from a line's label-position overrides.
/// Overrides that map to neither side of this direction are dropped with a
/// diagnostic.
pub fn pinned_sides(line: &Line, direction: Direction) -> HashMap<String, Side> {
    let mut pinned = HashMap::new();
    for (station, label_direction) in &line.label_positions {
        let side = ALL_SIDES
            .into_iter()
            .find(|side| direction.side_position(*side) == *label_direction);
        match side {
            Some(side) => {
                pinned.insert(station.clone(), side);
            }
            None => warn!(
                line = line.id.as_str(),
                station = station.as_str(),
                position = label_direction.as_str(),
                travel = direction.as_str(),
                "label position override matches neither side of the line; ignoring"
            ),
        }
    }
    pinned
}
