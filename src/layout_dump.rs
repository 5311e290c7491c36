//! Serializable dump of computed station positions, for tooling and
//! debugging. Geometry is flattened into plain numbers.

use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::geometry::{AnchoredBox, BoxRole};
use crate::layout::{Baseline, StationPosition, TextAnchor};
use crate::model::{Line, Side};

#[derive(Debug, Serialize)]
pub struct NetworkLayoutDump {
    pub network: Option<String>,
    pub lines: Vec<LineLayoutDump>,
}

#[derive(Debug, Serialize)]
pub struct LineLayoutDump {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub stations: Vec<StationDump>,
}

#[derive(Debug, Serialize)]
pub struct StationDump {
    pub name: String,
    pub terminus: bool,
    pub side: Side,
    pub text_anchor: TextAnchor,
    pub baseline: Option<Baseline>,
    pub label_lines: Vec<String>,
    pub marker: AnchorDump,
    pub label: AnchorDump,
}

#[derive(Debug, Serialize)]
pub struct AnchorDump {
    pub x: f32,
    pub y: f32,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub role: Option<BoxRole>,
}

impl AnchorDump {
    fn from_anchored(anchored: &AnchoredBox) -> Self {
        Self {
            x: anchored.x(),
            y: anchored.y(),
            min_x: anchored.rect.min.x,
            min_y: anchored.rect.min.y,
            max_x: anchored.rect.max.x,
            max_y: anchored.rect.max.y,
            role: anchored.rect.role,
        }
    }
}

impl LineLayoutDump {
    pub fn from_positions(line: &Line, positions: &[StationPosition]) -> Self {
        let stations = positions
            .iter()
            .map(|position| StationDump {
                name: position.station.name.clone(),
                terminus: position.station.terminus,
                side: position.side,
                text_anchor: position.text_anchor,
                baseline: position.baseline,
                label_lines: position.label_lines.clone(),
                marker: AnchorDump::from_anchored(&position.marker),
                label: AnchorDump::from_anchored(&position.label),
            })
            .collect();
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            color: line.color.clone(),
            stations,
        }
    }
}

impl NetworkLayoutDump {
    pub fn write_json(&self, path: &Path, pretty: bool) -> std::io::Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        let result = if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        };
        result.map_err(std::io::Error::other)
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
