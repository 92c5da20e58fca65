use super::*;

#[test]
fn ids_order_by_allocation() {
    assert!(AnimatorId(1) < AnimatorId(2));
    assert_eq!(AnimatorId(7).to_string(), "animator#7");
    assert_eq!(ObjectId(3).to_string(), "object#3");
}

#[test]
fn lerp_extrapolates_outside_unit_range() {
    assert_eq!(<f32 as Lerp>::lerp(&2.0, &4.0, 0.5), 3.0);
    assert_eq!(<f32 as Lerp>::lerp(&2.0, &4.0, 2.0), 6.0);
    assert_eq!(<f32 as Lerp>::lerp(&2.0, &4.0, -1.0), 0.0);
}

