use serde::Deserialize;

/// Asymmetric inflation amounts for the four edges of a rect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Padding {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    /// Left and right only.
    pub fn x(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            ..Self::default()
        }
    }

    /// Top and bottom only.
    pub fn y(value: f32) -> Self {
        Self {
            top: value,
            bottom: value,
            ..Self::default()
        }
    }
}

impl From<f32> for Padding {
    fn from(value: f32) -> Self {
        Padding::uniform(value)
    }
}

/// Per-edge values with `x`/`y` shorthands; explicit edges win over the
/// shorthand, unspecified edges default to zero.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialPadding {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,
}

impl From<PartialPadding> for Padding {
    fn from(partial: PartialPadding) -> Self {
        Padding {
            top: partial.top.or(partial.y).unwrap_or(0.0),
            bottom: partial.bottom.or(partial.y).unwrap_or(0.0),
            left: partial.left.or(partial.x).unwrap_or(0.0),
            right: partial.right.or(partial.x).unwrap_or(0.0),
        }
    }
}

/// Document form: a bare number (uniform) or a per-edge map.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RawPadding {
    Uniform(f32),
    Edges(PartialPadding),
}

impl From<RawPadding> for Padding {
    fn from(raw: RawPadding) -> Self {
        match raw {
            RawPadding::Uniform(value) => Padding::uniform(value),
            RawPadding::Edges(partial) => partial.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_fills_all_edges() {
        let padding = Padding::uniform(5.0);
        assert_eq!(padding.top, 5.0);
        assert_eq!(padding.bottom, 5.0);
        assert_eq!(padding.left, 5.0);
        assert_eq!(padding.right, 5.0);
    }

    #[test]
    fn partial_edges_override_axis_shorthand() {
        let padding: Padding = PartialPadding {
            x: Some(3.0),
            top: Some(1.0),
            ..Default::default()
        }
        .into();
        assert_eq!(padding.top, 1.0);
        assert_eq!(padding.bottom, 0.0);
        assert_eq!(padding.left, 3.0);
        assert_eq!(padding.right, 3.0);
    }

    #[test]
    fn raw_padding_parses_number_and_map() {
        let uniform: RawPadding = serde_json::from_str("4").unwrap();
        assert_eq!(Padding::from(uniform), Padding::uniform(4.0));
        let edges: RawPadding = serde_json::from_str(r#"{"y": 2, "left": 1}"#).unwrap();
        let padding = Padding::from(edges);
        assert_eq!(padding.top, 2.0);
        assert_eq!(padding.bottom, 2.0);
        assert_eq!(padding.left, 1.0);
        assert_eq!(padding.right, 0.0);
    }
}
