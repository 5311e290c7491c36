use serde::Deserialize;

/// Symmetric two-axis clearance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    pub x: f32,
    pub y: f32,
}

impl Spacing {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn uniform(value: f32) -> Self {
        Self { x: value, y: value }
    }

    pub fn scale(self, factor: f32) -> Spacing {
        Spacing::new(self.x * factor, self.y * factor)
    }
}

impl From<f32> for Spacing {
    fn from(value: f32) -> Self {
        Spacing::uniform(value)
    }
}

/// Document form: a bare number (both axes) or an `{x, y}` map.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RawSpacing {
    Uniform(f32),
    Axes {
        #[serde(default)]
        x: Option<f32>,
        #[serde(default)]
        y: Option<f32>,
    },
}

impl From<RawSpacing> for Spacing {
    fn from(raw: RawSpacing) -> Self {
        match raw {
            RawSpacing::Uniform(value) => Spacing::uniform(value),
            RawSpacing::Axes { x, y } => Spacing::new(x.unwrap_or(0.0), y.unwrap_or(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_multiplies_both_axes() {
        assert_eq!(Spacing::new(2.0, 3.0).scale(2.0), Spacing::new(4.0, 6.0));
    }

    #[test]
    fn raw_spacing_parses_number_and_map() {
        let uniform: RawSpacing = serde_json::from_str("7").unwrap();
        assert_eq!(Spacing::from(uniform), Spacing::uniform(7.0));
        let axes: RawSpacing = serde_json::from_str(r#"{"x": 1}"#).unwrap();
        assert_eq!(Spacing::from(axes), Spacing::new(1.0, 0.0));
    }
}
