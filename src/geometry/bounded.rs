use super::{Point, Rect};

/// Maximum drawing size caps. Unset axes are unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimit {
    pub max_width: f32,
    pub max_height: f32,
}

impl Default for SizeLimit {
    fn default() -> Self {
        Self {
            max_width: f32::INFINITY,
            max_height: f32::INFINITY,
        }
    }
}

impl SizeLimit {
    pub fn new(max_width: f32, max_height: f32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_width.is_infinite() && self.max_height.is_infinite()
    }
}

/// A running bounding rect checked against independent width/height caps.
/// Values are immutable; `add` returns a grown accumulator and `can_fit`
/// answers without committing.
#[derive(Debug, Clone, Copy)]
pub struct BoundedBox {
    min_box: Rect,
    limit: SizeLimit,
}

impl BoundedBox {
    /// Empty accumulator: an inverted rect that any addition collapses onto.
    pub fn new(limit: SizeLimit) -> Self {
        Self {
            min_box: Rect::new(
                Point::new(f32::INFINITY, f32::INFINITY),
                Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
            ),
            limit,
        }
    }

    pub fn from_rect(rect: Rect, limit: SizeLimit) -> Self {
        Self {
            min_box: rect,
            limit,
        }
    }

    pub fn to_rect(&self) -> Rect {
        self.min_box
    }

    pub fn limit(&self) -> SizeLimit {
        self.limit
    }

    /// Current bounds fit inside the caps. Derived on demand; accumulators
    /// are immutable so the answer never changes for a given value.
    pub fn valid(&self) -> bool {
        self.min_box.width() <= self.limit.max_width
            && self.min_box.height() <= self.limit.max_height
    }

    pub fn add(&self, rects: impl IntoIterator<Item = Rect>) -> BoundedBox {
        let combined = Rect::bounds(std::iter::once(self.min_box).chain(rects));
        BoundedBox::from_rect(combined, self.limit)
    }

    pub fn can_fit(&self, rects: impl IntoIterator<Item = Rect>) -> bool {
        let combined = Rect::bounds(std::iter::once(self.min_box).chain(rects));
        combined.width() <= self.limit.max_width && combined.height() <= self.limit.max_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accumulator_accepts_anything_within_caps() {
        let bounds = BoundedBox::new(SizeLimit::new(100.0, 50.0));
        assert!(bounds.valid());
        assert!(bounds.can_fit([Rect::from_coords(0.0, 0.0, 100.0, 50.0)]));
        assert!(!bounds.can_fit([Rect::from_coords(0.0, 0.0, 101.0, 10.0)]));
    }

    #[test]
    fn add_grows_without_mutating() {
        let empty = BoundedBox::new(SizeLimit::new(100.0, 100.0));
        let grown = empty.add([Rect::from_coords(0.0, 0.0, 10.0, 10.0)]);
        let grown = grown.add([Rect::from_coords(90.0, 0.0, 110.0, 10.0)]);
        assert!(!grown.valid());
        assert!(empty.valid());
        assert_eq!(grown.to_rect().width(), 110.0);
    }

    #[test]
    fn can_fit_accounts_for_committed_extent() {
        let bounds = BoundedBox::new(SizeLimit::new(100.0, f32::INFINITY))
            .add([Rect::from_coords(0.0, 0.0, 60.0, 10.0)]);
        assert!(bounds.can_fit([Rect::from_coords(50.0, 0.0, 100.0, 10.0)]));
        assert!(!bounds.can_fit([Rect::from_coords(50.0, 0.0, 101.0, 10.0)]));
    }
}
