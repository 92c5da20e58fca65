use super::*;

#[test]
fn every_property_belongs_to_exactly_one_representation() {
    let groups = [
        Representation::Rgb,
        Representation::Hsb,
        Representation::UniformScale,
        Representation::AxialScale,
        Representation::Cartesian,
        Representation::Spherical,
        Representation::Rotation,
    ];
    let total: usize = groups.iter().map(|g| g.properties().count()).sum();
    assert_eq!(total, AnimatableProperty::ALL.len());
    assert_eq!(Representation::Hsb.properties().count(), 3);
}

#[test]
fn default_ranges_follow_representation() {
    assert_eq!(AnimatableProperty::Red.default_range(), (0.0, 1.0));
    assert_eq!(AnimatableProperty::UniformScale.default_range(), (1.0, 2.0));
    assert_eq!(AnimatableProperty::PositionY.default_range(), (-1.0, 1.0));
    assert_eq!(AnimatableProperty::SphericalRadius.default_range(), (1.0, 2.0));
    assert_eq!(AnimatableProperty::SphericalLatitude.default_range().1, TAU);
}

#[test]
fn names_match_serde_form() {
    for property in AnimatableProperty::ALL {
        let json = serde_json::to_string(&property).unwrap();
        assert_eq!(json, format!("\"{}\"", property.name()));
    }
}

#[test]
fn key_display_names_object_and_property() {
    let key = PropertyKey::new(ObjectId(4), AnimatableProperty::Hue);
    assert_eq!(key.to_string(), "object#4.hue");
}
