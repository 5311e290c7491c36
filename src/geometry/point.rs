use super::{Offset, Padding};

/// Immutable 2-D coordinate. All operations return new values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, offset: Offset) -> Point {
        Point::new(self.x + offset.dx, self.y + offset.dy)
    }

    /// The displacement that carries `self` onto `other`.
    pub fn offset_to(self, other: Point) -> Offset {
        Offset::new(other.x - self.x, other.y - self.y)
    }

    /// Zero-area rect at this point.
    pub fn to_rect(self) -> Rect {
        Rect::new(self, self)
    }

    /// Rect of the given size centered on this point, anchored here.
    pub fn with_size(self, width: f32, height: f32) -> AnchoredBox {
        AnchoredBox {
            point: self,
            rect: Rect::from_coords(
                self.x - width / 2.0,
                self.y - height / 2.0,
                self.x + width / 2.0,
                self.y + height / 2.0,
            ),
        }
    }

    /// Explicit absolute bounds, anchored at this point.
    pub fn with_range(self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> AnchoredBox {
        AnchoredBox {
            point: self,
            rect: Rect::from_coords(min_x, min_y, max_x, max_y),
        }
    }

    /// An existing rect, anchored at this point.
    pub fn with_rect(self, rect: Rect) -> AnchoredBox {
        AnchoredBox { point: self, rect }
    }
}

/// Semantic tag on a rect, for debugging and dump output only. Never
/// consulted by the geometry itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxRole {
    Marker,
    Label,
}

/// Axis-aligned rectangle. `min <= max` is not enforced; folds over an empty
/// input produce an inverted rect and algorithms tolerate zero-area rects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
    pub role: Option<BoxRole>,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min,
            max,
            role: None,
        }
    }

    pub fn from_coords(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Rect::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    pub fn with_role(mut self, role: BoxRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn offset(&self, offset: Offset) -> Rect {
        Rect {
            min: self.min.offset(offset),
            max: self.max.offset(offset),
            role: self.role,
        }
    }

    pub fn with_padding(&self, padding: Padding) -> Rect {
        Rect {
            min: Point::new(self.min.x - padding.left, self.min.y - padding.top),
            max: Point::new(self.max.x + padding.right, self.max.y + padding.bottom),
            role: self.role,
        }
    }

    /// Minimal enclosing rect of the inputs. An empty iterator yields an
    /// inverted infinite rect; callers must guard or accept it.
    pub fn bounds(rects: impl IntoIterator<Item = Rect>) -> Rect {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for rect in rects {
            min_x = min_x.min(rect.min.x);
            min_y = min_y.min(rect.min.y);
            max_x = max_x.max(rect.max.x);
            max_y = max_y.max(rect.max.y);
        }
        Rect::from_coords(min_x, min_y, max_x, max_y)
    }

    /// Strict overlap: rects sharing only an edge do not overlap.
    pub fn overlaps(a: &Rect, b: &Rect) -> bool {
        a.max.x > b.min.x && a.min.x < b.max.x && a.max.y > b.min.y && a.min.y < b.max.y
    }
}

/// An anchor coordinate and the rect it occupies, moved together. The
/// anchor is typically a marker center or a text origin; the rect is the
/// extent around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchoredBox {
    pub point: Point,
    pub rect: Rect,
}

impl AnchoredBox {
    pub fn x(&self) -> f32 {
        self.point.x
    }

    pub fn y(&self) -> f32 {
        self.point.y
    }

    pub fn offset(&self, offset: Offset) -> AnchoredBox {
        AnchoredBox {
            point: self.point.offset(offset),
            rect: self.rect.offset(offset),
        }
    }

    /// Pads the extent only; the anchor stays put.
    pub fn with_padding(&self, padding: Padding) -> AnchoredBox {
        AnchoredBox {
            point: self.point,
            rect: self.rect.with_padding(padding),
        }
    }

    pub fn with_role(mut self, role: BoxRole) -> AnchoredBox {
        self.rect = self.rect.with_role(role);
        self
    }
}
