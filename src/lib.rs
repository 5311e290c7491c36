#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod geometry;
pub mod hyphenation;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod text_metrics;

pub use config::{LayoutConfig, PartialLayoutConfig};
pub use layout::{
    EndpointConflicts, LayoutError, LineLayoutOptions, StationPosition, layout_direction_segments,
    layout_line,
};
pub use model::{Direction, Line, Network, Side, Station};
pub use text_metrics::{LabelMeasurer, LabelStyle};

#[cfg(feature = "cli")]
pub use cli::run;
