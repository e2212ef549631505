use super::Rect;

/// True when `a`, grown by `margin` on every side, strictly intersects `b`.
///
/// Rectangles exactly `margin` apart only touch and do not count.
pub fn overlaps(a: &Rect, b: &Rect, margin: f32) -> bool {
    let margin = margin.max(0.0);
    a.x - margin < b.right()
        && b.x < a.right() + margin
        && a.y - margin < b.bottom()
        && b.y < a.bottom() + margin
}

pub fn overlaps_any(candidate: &Rect, existing: &[Rect], margin: f32) -> bool {
    existing.iter().any(|rect| overlaps(candidate, rect, margin))
}

/// Every colliding pair `(i, j)` with `i < j`.
pub fn find_overlaps(rects: &[Rect], margin: f32) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if overlaps(&rects[i], &rects[j], margin) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separated_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(150.0, 0.0, 100.0, 100.0);
        assert!(!overlaps(&a, &b, 10.0));
        assert!(overlaps(&a, &b, 60.0));
    }

    #[test]
    fn touching_at_margin_is_allowed() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(110.0, 0.0, 100.0, 100.0);
        assert!(!overlaps(&a, &b, 10.0));
        assert!(overlaps(&a, &b, 10.5));
    }

    #[test]
    fn needs_intersection_on_both_axes() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 300.0, 100.0, 100.0);
        assert!(!overlaps(&a, &b, 0.0));
    }

    #[test]
    fn lists_colliding_pairs() {
        let rects = [
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(104.0, 0.0, 50.0, 50.0),
            Rect::new(500.0, 500.0, 10.0, 10.0),
            Rect::new(40.0, 40.0, 20.0, 20.0),
        ];
        assert_eq!(find_overlaps(&rects, 0.0), vec![(0, 3)]);
        assert_eq!(find_overlaps(&rects, 5.0), vec![(0, 1), (0, 3)]);
    }
}
