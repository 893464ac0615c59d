use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn span_len_and_contains() {
    let span = Span::new(4, 9);
    assert_eq!(span.len(), 5);
    assert!(!span.is_empty());
    assert!(span.contains(4));
    assert!(!span.contains(9));
}

#[test]
fn point_span_is_empty() {
    let span = Span::point(12);
    assert!(span.is_empty());
    assert_eq!(span.to_range(), 12..12);
}

#[test]
fn try_from_range_rejects_oversized_offsets() {
    let too_big = u32::MAX as usize + 1;
    assert_eq!(
        Span::try_from_range(too_big..too_big),
        Err(SpanError::StartTooLarge(too_big))
    );
    assert_eq!(
        Span::try_from_range(0..too_big),
        Err(SpanError::EndTooLarge(too_big))
    );
    assert_eq!(Span::try_from_range(3..7), Ok(Span::new(3, 7)));
}

#[test]
fn from_range_saturates() {
    let too_big = u32::MAX as usize + 10;
    assert_eq!(Span::from_range(1..too_big), Span::new(1, u32::MAX));
}

#[test]
fn adjacency_requires_touching_spans() {
    let ident = Span::new(4, 7);
    assert!(ident.is_adjacent_to(Span::new(7, 8)));
    assert!(!ident.is_adjacent_to(Span::new(8, 9)));
}

#[test]
fn debug_format() {
    assert_eq!(format!("{:?}", Span::new(2, 5)), "2..5");
}

proptest! {
    #[test]
    fn merge_covers_both(a in 0u32..1000, b in 0u32..1000, c in 0u32..1000, d in 0u32..1000) {
        let x = Span::new(a.min(b), a.max(b));
        let y = Span::new(c.min(d), c.max(d));
        let merged = x.merge(y);
        prop_assert!(merged.start <= x.start && merged.start <= y.start);
        prop_assert!(merged.end >= x.end && merged.end >= y.end);
        prop_assert_eq!(merged, y.merge(x));
    }
}
