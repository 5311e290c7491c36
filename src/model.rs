//! Network document model: stations, lines, direction specs and the derived
//! per-station data the renderer needs. Documents are declarative JSON/JSON5
//! records; resolution is lossless and never mutates afterwards.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::PartialLayoutConfig;
use crate::geometry::{Offset, RawPadding};

/// Which side of the line of travel a label sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Ring steps from the direction of travel to this side's compass
    /// position (screen coordinates, y growing downward).
    pub fn rotation_steps(self) -> i8 {
        match self {
            Side::Left => -2,
            Side::Right => 2,
        }
    }
}

pub const ALL_SIDES: [Side; 2] = [Side::Left, Side::Right];

/// Eight-way compass direction, used both for the visual run of a line
/// segment and for where a label sits relative to its marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "n")]
    North,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "sw")]
    SouthWest,
    #[serde(rename = "w")]
    West,
    #[serde(rename = "nw")]
    NorthWest,
}

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

/// Cardinal vs diagonal grouping that selects a candidate generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionFamily {
    /// Line runs north/south; labels sit beside the markers.
    Vertical,
    /// Line runs east/west; labels stack above or below.
    Horizontal,
    /// Line runs diagonally.
    Diagonal,
}

impl Direction {
    fn ring_index(self) -> usize {
        ALL_DIRECTIONS.iter().position(|d| *d == self).unwrap_or(0)
    }

    /// Rotated around the 8-way ring; one step is 45° clockwise on screen.
    pub fn rotate(self, steps: i8) -> Direction {
        let index = self.ring_index() as i8 + steps;
        ALL_DIRECTIONS[index.rem_euclid(8) as usize]
    }

    /// Compass position of a label on the given side of travel.
    pub fn side_position(self, side: Side) -> Direction {
        self.rotate(side.rotation_steps())
    }

    /// Unit travel vector in screen coordinates (y grows downward).
    pub fn unit(self) -> Offset {
        let diag = std::f32::consts::FRAC_1_SQRT_2;
        match self {
            Direction::North => Offset::new(0.0, -1.0),
            Direction::NorthEast => Offset::new(diag, -diag),
            Direction::East => Offset::new(1.0, 0.0),
            Direction::SouthEast => Offset::new(diag, diag),
            Direction::South => Offset::new(0.0, 1.0),
            Direction::SouthWest => Offset::new(-diag, diag),
            Direction::West => Offset::new(-1.0, 0.0),
            Direction::NorthWest => Offset::new(-diag, -diag),
        }
    }

    pub fn family(self) -> DirectionFamily {
        match self {
            Direction::North | Direction::South => DirectionFamily::Vertical,
            Direction::East | Direction::West => DirectionFamily::Horizontal,
            _ => DirectionFamily::Diagonal,
        }
    }

    /// Sign of the east component: -1, 0 or 1.
    pub fn east_sign(self) -> f32 {
        let dx = self.unit().dx;
        if dx > 0.0 {
            1.0
        } else if dx < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    /// Sign of the south component: -1, 0 or 1.
    pub fn south_sign(self) -> f32 {
        let dy = self.unit().dy;
        if dy > 0.0 {
            1.0
        } else if dy < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::NorthEast => "ne",
            Direction::East => "e",
            Direction::SouthEast => "se",
            Direction::South => "s",
            Direction::SouthWest => "sw",
            Direction::West => "w",
            Direction::NorthWest => "nw",
        }
    }
}

/// Station document form: a bare name or an object with served lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawStation {
    Name(String),
    Object {
        name: String,
        #[serde(default)]
        lines: Option<Vec<String>>,
    },
}

/// Resolved station. `terminus` is derived from the position in the line's
/// station list, never taken from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    pub lines: Vec<String>,
    pub terminus: bool,
}

impl Station {
    fn resolve(raw: &RawStation, terminus: bool) -> Station {
        match raw {
            RawStation::Name(name) => Station {
                name: name.clone(),
                lines: Vec::new(),
                terminus,
            },
            RawStation::Object { name, lines } => Station {
                name: name.clone(),
                lines: lines.clone().unwrap_or_default(),
                terminus,
            },
        }
    }
}

/// Compass override for a run of consecutive stations.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionSpec {
    /// Name of the first station in the segment.
    #[serde(default)]
    pub start: Option<String>,
    /// Name of the last station in the segment.
    #[serde(default)]
    pub end: Option<String>,
    pub direction: Direction,
}

/// A maximal run of stations sharing one (possibly unspecified) direction.
#[derive(Debug, Clone)]
pub struct DirectionSegment {
    pub direction: Option<Direction>,
    pub stations: Vec<Station>,
}

/// Display-only overrides applied to a line by id or name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDisplay {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub overlay_color: Option<String>,
    #[serde(default)]
    pub line_type: Option<String>,
    #[serde(default)]
    pub directions: Option<Vec<DirectionSpec>>,
    #[serde(default)]
    pub label_positions: Option<HashMap<String, Option<Direction>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLine {
    /// Defaults to the name when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub overlay_color: Option<String>,
    #[serde(default)]
    pub line_type: Option<String>,
    #[serde(default)]
    pub directions: Option<Vec<DirectionSpec>>,
    /// A `null` value clears an override inherited from a display document.
    #[serde(default)]
    pub label_positions: Option<HashMap<String, Option<Direction>>>,
    pub stations: Vec<RawStation>,
}

/// Resolved line: stations with derived termini, direction segmentation and
/// label-position overrides.
#[derive(Debug, Clone)]
pub struct Line {
    pub id: String,
    pub name: String,
    pub stations: Vec<Station>,
    pub color: Option<String>,
    pub overlay_color: Option<String>,
    pub line_type: Option<String>,
    pub directions: Vec<DirectionSpec>,
    pub direction_segments: Vec<DirectionSegment>,
    pub label_positions: HashMap<String, Direction>,
}

impl Line {
    pub fn resolve(raw: &RawLine) -> Line {
        let id = raw.id.clone().unwrap_or_else(|| raw.name.clone());
        let last = raw.stations.len().saturating_sub(1);
        let stations: Vec<Station> = raw
            .stations
            .iter()
            .enumerate()
            .map(|(i, station)| Station::resolve(station, i == 0 || i == last))
            .collect();
        let directions = raw.directions.clone().unwrap_or_default();
        let direction_segments = split_into_direction_segments(&stations, &directions, &id);
        Line {
            id,
            name: raw.name.clone(),
            stations,
            color: raw.color.clone(),
            overlay_color: raw.overlay_color.clone(),
            line_type: raw.line_type.clone(),
            directions,
            direction_segments,
            label_positions: flatten_label_positions(raw.label_positions.as_ref()),
        }
    }

    /// Display overrides merged over this line; segmentation is recomputed
    /// when the direction specs change.
    pub fn with_display(&self, display: &LineDisplay) -> Line {
        let directions = display
            .directions
            .clone()
            .unwrap_or_else(|| self.directions.clone());
        let direction_segments =
            split_into_direction_segments(&self.stations, &directions, &self.id);
        let mut label_positions = self.label_positions.clone();
        if let Some(overrides) = &display.label_positions {
            for (station, direction) in overrides {
                match direction {
                    Some(direction) => {
                        label_positions.insert(station.clone(), *direction);
                    }
                    None => {
                        label_positions.remove(station);
                    }
                }
            }
        }
        Line {
            id: self.id.clone(),
            name: display.name.clone().unwrap_or_else(|| self.name.clone()),
            stations: self.stations.clone(),
            color: display.color.clone().or_else(|| self.color.clone()),
            overlay_color: display
                .overlay_color
                .clone()
                .or_else(|| self.overlay_color.clone()),
            line_type: display.line_type.clone().or_else(|| self.line_type.clone()),
            directions,
            direction_segments,
            label_positions,
        }
    }

    pub fn termini(&self) -> Vec<&Station> {
        self.stations.iter().filter(|s| s.terminus).collect()
    }

    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name == name)
    }

    /// Names of the stations immediately before and after the named one.
    pub fn neighbour_names(&self, name: &str) -> BTreeSet<String> {
        let mut neighbours = BTreeSet::new();
        if let Some(index) = self.stations.iter().position(|s| s.name == name) {
            if index > 0 {
                neighbours.insert(self.stations[index - 1].name.clone());
            }
            if let Some(next) = self.stations.get(index + 1) {
                neighbours.insert(next.name.clone());
            }
        }
        neighbours
    }
}

fn flatten_label_positions(
    raw: Option<&HashMap<String, Option<Direction>>>,
) -> HashMap<String, Direction> {
    raw.map(|positions| {
        positions
            .iter()
            .filter_map(|(station, direction)| {
                direction.map(|direction| (station.clone(), direction))
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Splits a station list into direction segments. Concatenated segments
/// reproduce the station list exactly once per station; empty segments are
/// emitted for consecutive unanchored interior specs. Unknown start/end
/// names release that endpoint constraint with a diagnostic.
fn split_into_direction_segments(
    stations: &[Station],
    direction_specs: &[DirectionSpec],
    id: &str,
) -> Vec<DirectionSegment> {
    let station_names: HashSet<&str> = stations.iter().map(|s| s.name.as_str()).collect();
    let specs: Vec<DirectionSpec> = direction_specs
        .iter()
        .map(|spec| {
            let mut spec = spec.clone();
            if let Some(start) = &spec.start
                && !station_names.contains(start.as_str())
            {
                warn!(
                    line = id,
                    station = start.as_str(),
                    "direction spec start station does not exist on the line"
                );
                spec.start = None;
            }
            if let Some(end) = &spec.end
                && !station_names.contains(end.as_str())
            {
                warn!(
                    line = id,
                    station = end.as_str(),
                    "direction spec end station does not exist on the line"
                );
                spec.end = None;
            }
            spec
        })
        .collect();

    struct Current {
        stations: Vec<Station>,
        spec: Option<DirectionSpec>,
    }

    let mut segments: Vec<DirectionSegment> = Vec::new();
    let mut current: Option<Current> = None;
    let mut next_spec = 0usize;

    for station in stations {
        if let Some(cur) = current.as_mut() {
            let current_has_end = cur.spec.as_ref().is_some_and(|spec| spec.end.is_some());
            let next_starts_here = specs
                .get(next_spec)
                .and_then(|spec| spec.start.as_deref())
                .is_some_and(|start| start == station.name);
            if !current_has_end && next_starts_here {
                segments.push(DirectionSegment {
                    direction: cur.spec.as_ref().map(|spec| spec.direction),
                    stations: std::mem::take(&mut cur.stations),
                });
                *cur = Current {
                    stations: vec![station.clone()],
                    spec: Some(specs[next_spec].clone()),
                };
                next_spec += 1;
            } else {
                cur.stations.push(station.clone());
            }
        } else {
            // consecutive interior specs with neither start nor end denote
            // station-less segments
            while next_spec > 0
                && next_spec + 1 < specs.len()
                && specs[next_spec].start.is_none()
                && specs[next_spec].end.is_none()
            {
                segments.push(DirectionSegment {
                    direction: Some(specs[next_spec].direction),
                    stations: Vec::new(),
                });
                next_spec += 1;
            }

            if let Some(spec) = specs.get(next_spec)
                && (spec.start.is_none() || spec.start.as_deref() == Some(&station.name))
            {
                current = Some(Current {
                    stations: vec![station.clone()],
                    spec: Some(spec.clone()),
                });
                next_spec += 1;
            } else {
                current = Some(Current {
                    stations: vec![station.clone()],
                    spec: None,
                });
            }
        }

        let ends_here = current
            .as_ref()
            .and_then(|cur| cur.spec.as_ref())
            .and_then(|spec| spec.end.as_deref())
            .is_some_and(|end| end == station.name);
        if ends_here && let Some(cur) = current.take() {
            segments.push(DirectionSegment {
                direction: cur.spec.map(|spec| spec.direction),
                stations: cur.stations,
            });
        }
    }

    if let Some(cur) = current {
        segments.push(DirectionSegment {
            direction: cur.spec.map(|spec| spec.direction),
            stations: cur.stations,
        });
    }

    if next_spec < specs.len() {
        warn!(
            line = id,
            direction = specs[next_spec].direction.as_str(),
            "direction spec was never reached"
        );
    }

    segments
}

/// Reference to a label font: `google-fonts:`/`browser:` prefixed names or
/// a relative file URL.
#[derive(Debug, Clone, PartialEq)]
pub struct FontRef {
    pub family: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawFontRef {
    Name(String),
    Reference {
        #[serde(default)]
        family: Option<String>,
        url: String,
    },
}

impl FontRef {
    pub fn resolve(raw: &RawFontRef) -> Result<FontRef, ModelError> {
        match raw {
            RawFontRef::Name(url) => {
                if url.starts_with("google-fonts:") || url.starts_with("browser:") {
                    Ok(FontRef {
                        family: None,
                        url: url.clone(),
                    })
                } else {
                    Err(ModelError::InvalidFontUrl { url: url.clone() })
                }
            }
            RawFontRef::Reference { family, url } => {
                if url.starts_with("./") {
                    Ok(FontRef {
                        family: family.clone(),
                        url: url.clone(),
                    })
                } else {
                    Err(ModelError::InvalidFontUrl { url: url.clone() })
                }
            }
        }
    }

    /// CSS-facing family name for this reference, when one can be derived
    /// without loading anything.
    pub fn font_name(&self) -> Option<String> {
        if let Some(spec) = self.url.strip_prefix("google-fonts:") {
            let family = spec.split(':').next().unwrap_or(spec);
            Some(family.replace('+', " "))
        } else if let Some(name) = self.url.strip_prefix("browser:") {
            Some(name.to_string())
        } else {
            self.family.clone()
        }
    }
}

/// Shape of a line's number symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolShape {
    Oval,
    Rectangle,
    Pill,
}

/// Settings for a line's number symbol, keyed by line type. Carried for
/// renderers; the placement math never reads it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSymbol {
    #[serde(default)]
    pub shape: Option<SymbolShape>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub padding: Option<RawPadding>,
    #[serde(default)]
    pub font: Option<RawFontRef>,
    #[serde(default)]
    pub font_weight: Option<f32>,
    #[serde(default)]
    pub font_size: Option<f32>,
    /// Vertical shift (positive is down) for the number in the symbol.
    #[serde(default)]
    pub base_line_shift: Option<f32>,
}

/// Display-only network overrides (font, line displays, symbols, layout
/// config) that can be merged over a resolved network.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDisplay {
    #[serde(default)]
    pub font: Option<RawFontRef>,
    #[serde(default)]
    pub lines: Option<Vec<LineDisplay>>,
    #[serde(default)]
    pub line_symbols: Option<HashMap<String, LineSymbol>>,
    #[serde(default)]
    pub layout_config: Option<PartialLayoutConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNetwork {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub font: Option<RawFontRef>,
    pub lines: Vec<RawLine>,
    #[serde(default)]
    pub line_symbols: Option<HashMap<String, LineSymbol>>,
    #[serde(default)]
    pub layout_config: Option<PartialLayoutConfig>,
    /// Words with `~` marking hyphenation points.
    #[serde(default)]
    pub hyphenation: Option<Vec<String>>,
}

/// Per-station data derived across all lines of a network.
#[derive(Debug, Clone)]
pub struct StationData {
    pub name: String,
    pub lines: BTreeSet<String>,
    pub terminus_lines: BTreeSet<String>,
    /// Lines through this station grouped by shared neighbour set; lines in
    /// the same group run parallel here.
    pub parallel_line_groups: HashMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct Network {
    pub name: Option<String>,
    pub font: Option<FontRef>,
    pub lines: Vec<Line>,
    pub line_symbols: HashMap<String, LineSymbol>,
    pub layout_config: PartialLayoutConfig,
    /// Word → `~`-marked hyphenated form.
    pub hyphenation: HashMap<String, String>,
    pub stations: HashMap<String, StationData>,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid network document: {0}")]
    Parse(#[from] json5::Error),
    #[error("font references must start with 'google-fonts:', 'browser:' or './': {url}")]
    InvalidFontUrl { url: String },
    #[error("network must contain at least one line")]
    NoLines,
}

impl Network {
    pub fn from_json5(text: &str) -> Result<Network, ModelError> {
        let raw: RawNetwork = json5::from_str(text)?;
        Network::resolve(&raw)
    }

    pub fn resolve(raw: &RawNetwork) -> Result<Network, ModelError> {
        if raw.lines.is_empty() {
            return Err(ModelError::NoLines);
        }
        let font = raw.font.as_ref().map(FontRef::resolve).transpose()?;
        let lines: Vec<Line> = raw.lines.iter().map(Line::resolve).collect();
        let hyphenation = raw
            .hyphenation
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|marked| (marked.replace('~', ""), marked))
            .collect();
        let stations = derive_station_data(&lines);
        Ok(Network {
            name: raw.name.clone(),
            font,
            lines,
            line_symbols: raw.line_symbols.clone().unwrap_or_default(),
            layout_config: raw.layout_config.clone().unwrap_or_default(),
            hyphenation,
            stations,
        })
    }

    /// Display overrides merged over this network.
    pub fn with_display(&self, display: &NetworkDisplay) -> Result<Network, ModelError> {
        let font = match &display.font {
            Some(raw) => Some(FontRef::resolve(raw)?),
            None => self.font.clone(),
        };
        let mut lines = self.lines.clone();
        for line_display in display.lines.as_deref().unwrap_or_default() {
            let target = lines.iter_mut().find(|line| {
                line_display.id.as_deref() == Some(line.id.as_str())
                    || line_display.name.as_deref() == Some(line.name.as_str())
            });
            match target {
                Some(line) => *line = line.with_display(line_display),
                None => warn!(
                    id = line_display.id.as_deref().unwrap_or(""),
                    name = line_display.name.as_deref().unwrap_or(""),
                    "line display matches no line"
                ),
            }
        }
        let mut line_symbols = self.line_symbols.clone();
        if let Some(symbols) = &display.line_symbols {
            line_symbols.extend(symbols.clone());
        }
        let layout_config = match &display.layout_config {
            Some(overrides) => overrides.clone().merged_over(&self.layout_config),
            None => self.layout_config.clone(),
        };
        let stations = derive_station_data(&lines);
        Ok(Network {
            name: self.name.clone(),
            font,
            lines,
            line_symbols,
            layout_config,
            hyphenation: self.hyphenation.clone(),
            stations,
        })
    }

    pub fn line(&self, id: &str) -> Option<&Line> {
        self.lines.iter().find(|line| line.id == id)
    }
}

fn derive_station_data(lines: &[Line]) -> HashMap<String, StationData> {
    let mut stations: HashMap<String, StationData> = HashMap::new();
    for line in lines {
        for station in &line.stations {
            let data = stations
                .entry(station.name.clone())
                .or_insert_with(|| StationData {
                    name: station.name.clone(),
                    lines: BTreeSet::new(),
                    terminus_lines: BTreeSet::new(),
                    parallel_line_groups: HashMap::new(),
                });
            data.lines.insert(line.id.clone());
            if station.terminus {
                data.terminus_lines.insert(line.id.clone());
            }
        }
    }

    for data in stations.values_mut() {
        let mut groups: Vec<(Vec<String>, BTreeSet<String>)> = Vec::new();
        for line in lines {
            if !data.lines.contains(&line.id) {
                continue;
            }
            let neighbours = line.neighbour_names(&data.name);
            match groups.iter_mut().find(|(_, set)| *set == neighbours) {
                Some((members, _)) => members.push(line.id.clone()),
                None => groups.push((vec![line.id.clone()], neighbours)),
            }
        }
        for (index, (members, _)) in groups.into_iter().enumerate() {
            for member in members {
                data.parallel_line_groups.insert(member, index);
            }
        }
    }

    stations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_line(name: &str, stations: &[&str]) -> RawLine {
        RawLine {
            id: None,
            name: name.to_string(),
            color: None,
            overlay_color: None,
            line_type: None,
            directions: None,
            label_positions: None,
            stations: stations
                .iter()
                .map(|s| RawStation::Name(s.to_string()))
                .collect(),
        }
    }

    fn spec(start: Option<&str>, end: Option<&str>, direction: Direction) -> DirectionSpec {
        DirectionSpec {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            direction,
        }
    }

    #[test]
    fn terminus_is_first_and_last_only() {
        let line = Line::resolve(&raw_line("1", &["A", "B", "C"]));
        let termini: Vec<&str> = line.termini().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(termini, vec!["A", "C"]);
        assert!(!line.stations[1].terminus);
    }

    #[test]
    fn single_station_line_is_all_terminus() {
        let line = Line::resolve(&raw_line("1", &["A"]));
        assert!(line.stations[0].terminus);
    }

    #[test]
    fn side_positions_rotate_with_travel() {
        assert_eq!(Direction::South.side_position(Side::Right), Direction::West);
        assert_eq!(Direction::South.side_position(Side::Left), Direction::East);
        assert_eq!(Direction::North.side_position(Side::Right), Direction::East);
        assert_eq!(
            Direction::East.side_position(Side::Right),
            Direction::South
        );
        assert_eq!(
            Direction::NorthEast.side_position(Side::Left),
            Direction::NorthWest
        );
    }

    #[test]
    fn segments_concatenate_to_the_station_list() {
        let mut raw = raw_line("1", &["A", "B", "C", "D", "E"]);
        raw.directions = Some(vec![
            spec(None, Some("B"), Direction::South),
            spec(Some("D"), None, Direction::East),
        ]);
        let line = Line::resolve(&raw);
        let names: Vec<&str> = line
            .direction_segments
            .iter()
            .flat_map(|segment| segment.stations.iter().map(|s| s.name.as_str()))
            .collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(line.direction_segments.len(), 3);
        assert_eq!(
            line.direction_segments[0].direction,
            Some(Direction::South)
        );
        assert_eq!(line.direction_segments[1].direction, None);
        assert_eq!(line.direction_segments[2].direction, Some(Direction::East));
    }

    #[test]
    fn unknown_spec_station_releases_the_constraint() {
        let mut raw = raw_line("1", &["A", "B", "C"]);
        raw.directions = Some(vec![spec(Some("Nowhere"), None, Direction::South)]);
        let line = Line::resolve(&raw);
        // the spec applies from the first station instead of never matching
        assert_eq!(line.direction_segments.len(), 1);
        assert_eq!(
            line.direction_segments[0].direction,
            Some(Direction::South)
        );
    }

    #[test]
    fn font_prefix_grammar_is_enforced() {
        let google = FontRef::resolve(&RawFontRef::Name(
            "google-fonts:Open+Sans:wght@600".to_string(),
        ))
        .unwrap();
        assert_eq!(google.font_name().as_deref(), Some("Open Sans"));

        let browser = FontRef::resolve(&RawFontRef::Name("browser:sans-serif".to_string())).unwrap();
        assert_eq!(browser.font_name().as_deref(), Some("sans-serif"));

        assert!(FontRef::resolve(&RawFontRef::Name("Comic Sans".to_string())).is_err());
        assert!(
            FontRef::resolve(&RawFontRef::Reference {
                family: None,
                url: "http://example.com/font.woff".to_string(),
            })
            .is_err()
        );
    }

    #[test]
    fn network_derives_station_data() {
        let raw = RawNetwork {
            name: None,
            font: None,
            lines: vec![raw_line("1", &["A", "B", "C"]), raw_line("2", &["B", "C"])],
            line_symbols: None,
            layout_config: None,
            hyphenation: Some(vec!["Cross~roads".to_string()]),
        };
        let network = Network::resolve(&raw).unwrap();
        let b = &network.stations["B"];
        assert_eq!(b.lines.len(), 2);
        assert!(b.terminus_lines.contains("2"));
        assert!(!b.terminus_lines.contains("1"));
        // B sits between A and C on line 1 but starts line 2: different
        // neighbour sets, so the lines are not parallel there
        assert_ne!(b.parallel_line_groups["1"], b.parallel_line_groups["2"]);
        // C has neighbour B on both lines
        let c = &network.stations["C"];
        assert_eq!(c.parallel_line_groups["1"], c.parallel_line_groups["2"]);
        assert_eq!(
            network.hyphenation.get("Crossroads").map(String::as_str),
            Some("Cross~roads")
        );
    }

    #[test]
    fn empty_network_is_rejected() {
        let raw = RawNetwork {
            name: None,
            font: None,
            lines: vec![],
            line_symbols: None,
            layout_config: None,
            hyphenation: None,
        };
        assert!(matches!(Network::resolve(&raw), Err(ModelError::NoLines)));
    }
}
