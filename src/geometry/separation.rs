use super::{Offset, Rect};

/// Cap on fixed-point passes; pathological inputs escape to infinity
/// instead of looping.
const MAX_PASSES: usize = 64;

/// Smallest non-negative scalar such that translating every `new` rect by
/// `direction.scale(factor)` removes all overlaps with the `old` rects.
///
/// Returns exactly 0 when nothing overlaps, and `f32::INFINITY` when no
/// finite push along `direction` can separate the sets (the direction has a
/// zero component on the only axis that could resolve the overlap).
pub fn separation_factor(old: &[Rect], new: &[Rect], direction: Offset) -> f32 {
    let mut factor = 0.0f32;
    let mut moved: Vec<Rect> = new.to_vec();

    for _ in 0..MAX_PASSES {
        let step = old
            .iter()
            .flat_map(|old_rect| {
                moved
                    .iter()
                    .map(move |new_rect| pair_separation_factor(old_rect, new_rect, direction))
            })
            .fold(0.0f32, f32::max);
        if step == 0.0 {
            return factor;
        }
        factor += step;
        if !factor.is_finite() {
            return f32::INFINITY;
        }
        let shift = direction.scale(step);
        for rect in &mut moved {
            *rect = rect.offset(shift);
        }
    }
    f32::INFINITY
}

/// Factor for a single old/new pair. A zero direction component excludes
/// that axis from resolving the overlap; the binding constraint is the
/// smaller axis factor, since clearing either axis separates the pair.
fn pair_separation_factor(old: &Rect, new: &Rect, direction: Offset) -> f32 {
    if !Rect::overlaps(old, new) {
        return 0.0;
    }

    let factor_x = if direction.dx == 0.0 {
        f32::INFINITY
    } else {
        ((old.max.x - new.min.x) / direction.dx).max((new.max.x - old.min.x) / -direction.dx)
    };
    let factor_y = if direction.dy == 0.0 {
        f32::INFINITY
    } else {
        ((old.max.y - new.min.y) / direction.dy).max((new.max.y - old.min.y) / -direction.dy)
    };
    factor_x.min(factor_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Rect {
        Rect::from_coords(min_x, min_y, max_x, max_y)
    }

    #[test]
    fn non_overlapping_rects_need_no_push() {
        let old = [rect(0.0, 0.0, 10.0, 10.0)];
        let new = [rect(10.0, 0.0, 20.0, 10.0)];
        assert_eq!(separation_factor(&old, &new, Offset::new(1.0, 0.0)), 0.0);
    }

    #[test]
    fn push_clears_the_tighter_axis() {
        let old = [rect(0.0, 0.0, 10.0, 10.0)];
        let new = [rect(8.0, 9.0, 18.0, 19.0)];
        // moving down 1 separates; moving right would need 2
        let factor = separation_factor(&old, &new, Offset::new(0.0, 1.0));
        assert_eq!(factor, 1.0);
        let shifted = new[0].offset(Offset::new(0.0, 1.0).scale(factor));
        assert!(!Rect::overlaps(&old[0], &shifted));
    }

    #[test]
    fn separated_result_no_longer_overlaps_any_pair() {
        let direction = Offset::new(1.0, 0.0);
        let old = [rect(0.0, 0.0, 10.0, 10.0), rect(12.0, 2.0, 30.0, 8.0)];
        let new = [rect(5.0, 3.0, 9.0, 6.0), rect(6.0, -2.0, 14.0, 4.0)];
        let factor = separation_factor(&old, &new, direction);
        assert!(factor.is_finite());
        assert!(factor > 0.0);
        let shift = direction.scale(factor);
        for old_rect in &old {
            for new_rect in &new {
                assert!(!Rect::overlaps(old_rect, &new_rect.offset(shift)));
            }
        }
    }

    #[test]
    fn resolving_one_pair_may_create_work_for_another() {
        // pushing clear of the first old rect lands the new rect inside the
        // second old rect, which only the next pass can see
        let direction = Offset::new(1.0, 0.0);
        let old = [rect(0.0, 0.0, 10.0, 10.0), rect(11.0, 4.0, 13.0, 6.0)];
        let new = [rect(5.0, 4.0, 7.0, 6.0)];
        let factor = separation_factor(&old, &new, direction);
        assert_eq!(factor, 8.0);
    }

    #[test]
    fn zero_direction_axis_cannot_resolve() {
        let old = [rect(0.0, 0.0, 10.0, 10.0)];
        let new = [rect(4.0, 4.0, 6.0, 6.0)];
        // pushing along y still works
        assert!(separation_factor(&old, &new, Offset::new(0.0, 1.0)).is_finite());
        // no direction at all: deadlock reported as infinity
        assert_eq!(
            separation_factor(&old, &new, Offset::ZERO),
            f32::INFINITY
        );
    }

    #[test]
    fn negative_direction_components_push_the_other_way() {
        let direction = Offset::new(0.0, -1.0);
        let old = [rect(0.0, 0.0, 10.0, 10.0)];
        let new = [rect(2.0, 8.0, 8.0, 14.0)];
        let factor = separation_factor(&old, &new, direction);
        assert_eq!(factor, 14.0);
        let shifted = new[0].offset(direction.scale(factor));
        assert!(!Rect::overlaps(&old[0], &shifted));
    }
}
