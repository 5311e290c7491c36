mod bounded;
mod offset;
mod padding;
mod point;
mod separation;
mod spacing;

pub use bounded::{BoundedBox, SizeLimit};
pub use offset::Offset;
pub use padding::{Padding, PartialPadding, RawPadding};
pub use point::{AnchoredBox, BoxRole, Point, Rect};
pub use separation::separation_factor;
pub use spacing::{RawSpacing, Spacing};
