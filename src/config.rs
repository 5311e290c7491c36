//! Layout configuration: a fully-resolved [`LayoutConfig`] used by the
//! placement math, produced by merging a partial user document over hard
//! defaults.

use serde::Deserialize;

use crate::geometry::{Padding, RawPadding, RawSpacing, Spacing};

/// Corner rounding where a line changes direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Radius(f32),
    /// Distance from the angled point to the start of the curve.
    Curvature(f32),
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RawCurve {
    Radius { radius: f32 },
    Curvature { curvature: f32 },
}

impl From<RawCurve> for Curve {
    fn from(raw: RawCurve) -> Self {
        match raw {
            RawCurve::Radius { radius } => Curve::Radius(radius),
            RawCurve::Curvature { curvature } => Curve::Curvature(curvature),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingConfig {
    /// Clearance kept around markers.
    pub marker: Spacing,
    /// Clearance kept around labels.
    pub label: Spacing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapConfig {
    /// Gap between a marker and its own label.
    pub marker_label: Spacing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerConfig {
    pub radius: f32,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelConfig {
    pub font_size: f32,
    pub font_weight: f32,
    /// Explicit line height for multi-line labels; derived from the font
    /// size when absent.
    pub line_height: Option<f32>,
}

/// Fully-resolved layout configuration. Every field is present; use
/// [`PartialLayoutConfig::complete`] to build one from a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub padding: Padding,
    pub spacing: SpacingConfig,
    pub gap: GapConfig,
    pub line_width: f32,
    pub curve: Curve,
    pub marker: MarkerConfig,
    pub label: LabelConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            spacing: SpacingConfig {
                marker: Spacing::default(),
                label: Spacing::default(),
            },
            gap: GapConfig {
                marker_label: Spacing::default(),
            },
            line_width: 10.0,
            curve: Curve::Radius(50.0),
            marker: MarkerConfig {
                radius: 6.0,
                stroke_width: 3.0,
            },
            label: LabelConfig {
                font_size: 30.0,
                font_weight: 600.0,
                line_height: None,
            },
        }
    }
}

impl LayoutConfig {
    /// Vertical advance between label lines.
    pub fn label_line_height(&self) -> f32 {
        self.label
            .line_height
            .unwrap_or(self.label.font_size * 1.2)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialSpacingConfig {
    pub marker: Option<RawSpacing>,
    pub label: Option<RawSpacing>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialGapConfig {
    pub marker_label: Option<RawSpacing>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialMarkerConfig {
    pub radius: Option<f32>,
    pub stroke_width: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialLabelConfig {
    pub font_size: Option<f32>,
    pub font_weight: Option<f32>,
    pub line_height: Option<f32>,
}

/// Document form of the layout configuration; all fields optional.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialLayoutConfig {
    pub padding: Option<RawPadding>,
    pub spacing: Option<PartialSpacingConfig>,
    pub gap: Option<PartialGapConfig>,
    pub line_width: Option<f32>,
    pub curve: Option<RawCurve>,
    pub marker: Option<PartialMarkerConfig>,
    pub label: Option<PartialLabelConfig>,
}

impl PartialLayoutConfig {
    /// Field-wise merge; values from `self` win over `other`.
    pub fn merged_over(self, other: &PartialLayoutConfig) -> PartialLayoutConfig {
        let self_spacing = self.spacing.unwrap_or_default();
        let other_spacing = other.spacing.unwrap_or_default();
        let self_marker = self.marker.unwrap_or_default();
        let other_marker = other.marker.unwrap_or_default();
        let self_label = self.label.unwrap_or_default();
        let other_label = other.label.unwrap_or_default();
        PartialLayoutConfig {
            padding: self.padding.or(other.padding),
            spacing: Some(PartialSpacingConfig {
                marker: self_spacing.marker.or(other_spacing.marker),
                label: self_spacing.label.or(other_spacing.label),
            }),
            gap: Some(PartialGapConfig {
                marker_label: self
                    .gap
                    .unwrap_or_default()
                    .marker_label
                    .or(other.gap.unwrap_or_default().marker_label),
            }),
            line_width: self.line_width.or(other.line_width),
            curve: self.curve.or(other.curve),
            marker: Some(PartialMarkerConfig {
                radius: self_marker.radius.or(other_marker.radius),
                stroke_width: self_marker.stroke_width.or(other_marker.stroke_width),
            }),
            label: Some(PartialLabelConfig {
                font_size: self_label.font_size.or(other_label.font_size),
                font_weight: self_label.font_weight.or(other_label.font_weight),
                line_height: self_label.line_height.or(other_label.line_height),
            }),
        }
    }

    /// Resolve against the hard defaults.
    pub fn complete(self) -> LayoutConfig {
        let defaults = LayoutConfig::default();
        let spacing = self.spacing.unwrap_or_default();
        let gap = self.gap.unwrap_or_default();
        let marker = self.marker.unwrap_or_default();
        let label = self.label.unwrap_or_default();
        LayoutConfig {
            padding: self.padding.map(Padding::from).unwrap_or(defaults.padding),
            spacing: SpacingConfig {
                marker: spacing
                    .marker
                    .map(Spacing::from)
                    .unwrap_or(defaults.spacing.marker),
                label: spacing
                    .label
                    .map(Spacing::from)
                    .unwrap_or(defaults.spacing.label),
            },
            gap: GapConfig {
                marker_label: gap
                    .marker_label
                    .map(Spacing::from)
                    .unwrap_or(defaults.gap.marker_label),
            },
            line_width: self.line_width.unwrap_or(defaults.line_width),
            curve: self.curve.map(Curve::from).unwrap_or(defaults.curve),
            marker: MarkerConfig {
                radius: marker.radius.unwrap_or(defaults.marker.radius),
                stroke_width: marker.stroke_width.unwrap_or(defaults.marker.stroke_width),
            },
            label: LabelConfig {
                font_size: label.font_size.unwrap_or(defaults.label.font_size),
                font_weight: label.font_weight.unwrap_or(defaults.label.font_weight),
                line_height: label.line_height.or(defaults.label.line_height),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = LayoutConfig::default();
        assert_eq!(config.marker.radius, 6.0);
        assert_eq!(config.marker.stroke_width, 3.0);
        assert_eq!(config.line_width, 10.0);
        assert_eq!(config.label.font_size, 30.0);
        assert_eq!(config.label.font_weight, 600.0);
        assert_eq!(config.curve, Curve::Radius(50.0));
        assert_eq!(config.spacing.marker, Spacing::default());
        assert_eq!(config.padding, Padding::default());
    }

    #[test]
    fn partial_document_merges_over_defaults() {
        let partial: PartialLayoutConfig = json5::from_str(
            r#"{
                spacing: { label: { x: 4 } },
                marker: { radius: 9 },
                label: { fontSize: 18 },
                curve: { curvature: 12 },
            }"#,
        )
        .unwrap();
        let config = partial.complete();
        assert_eq!(config.spacing.label, Spacing::new(4.0, 0.0));
        assert_eq!(config.spacing.marker, Spacing::default());
        assert_eq!(config.marker.radius, 9.0);
        assert_eq!(config.marker.stroke_width, 3.0);
        assert_eq!(config.label.font_size, 18.0);
        assert_eq!(config.curve, Curve::Curvature(12.0));
    }

    #[test]
    fn merged_over_prefers_the_receiver() {
        let base: PartialLayoutConfig =
            json5::from_str(r#"{ lineWidth: 8, marker: { radius: 5 } }"#).unwrap();
        let over: PartialLayoutConfig =
            json5::from_str(r#"{ marker: { strokeWidth: 2 } }"#).unwrap();
        let merged = over.merged_over(&base).complete();
        assert_eq!(merged.line_width, 8.0);
        assert_eq!(merged.marker.radius, 5.0);
        assert_eq!(merged.marker.stroke_width, 2.0);
    }

    #[test]
    fn line_height_defaults_from_font_size() {
        let mut config = LayoutConfig::default();
        assert_eq!(config.label_line_height(), 36.0);
        config.label.line_height = Some(40.0);
        assert_eq!(config.label_line_height(), 40.0);
    }
}
