use std::{f32::consts::TAU, fmt};

use crate::foundation::core::ObjectId;

/// Scalar object property that can be driven by an animator.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnimatableProperty {
    Red,
    Green,
    Blue,
    Hue,
    Saturation,
    Brightness,
    UniformScale,
    ScaleX,
    ScaleY,
    ScaleZ,
    PositionX,
    PositionY,
    PositionZ,
    SphericalRadius,
    SphericalLongitude,
    SphericalLatitude,
    RotationAngle,
}

/// Mutually exclusive ways of expressing one object attribute. Switching an
/// object to another representation tears down bindings of the old one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    Rgb,
    Hsb,
    UniformScale,
    AxialScale,
    Cartesian,
    Spherical,
    Rotation,
}

impl AnimatableProperty {
    pub const ALL: [AnimatableProperty; 17] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Hue,
        Self::Saturation,
        Self::Brightness,
        Self::UniformScale,
        Self::ScaleX,
        Self::ScaleY,
        Self::ScaleZ,
        Self::PositionX,
        Self::PositionY,
        Self::PositionZ,
        Self::SphericalRadius,
        Self::SphericalLongitude,
        Self::SphericalLatitude,
        Self::RotationAngle,
    ];

    pub fn representation(self) -> Representation {
        match self {
            Self::Red | Self::Green | Self::Blue => Representation::Rgb,
            Self::Hue | Self::Saturation | Self::Brightness => Representation::Hsb,
            Self::UniformScale => Representation::UniformScale,
            Self::ScaleX | Self::ScaleY | Self::ScaleZ => Representation::AxialScale,
            Self::PositionX | Self::PositionY | Self::PositionZ => Representation::Cartesian,
            Self::SphericalRadius | Self::SphericalLongitude | Self::SphericalLatitude => {
                Representation::Spherical
            }
            Self::RotationAngle => Representation::Rotation,
        }
    }

    /// `(value_at_0, value_at_1)` offered when a property is first bound.
    pub fn default_range(self) -> (f32, f32) {
        match self.representation() {
            Representation::Rgb | Representation::Hsb => (0.0, 1.0),
            Representation::UniformScale | Representation::AxialScale => (1.0, 2.0),
            Representation::Cartesian => (-1.0, 1.0),
            Representation::Spherical => match self {
                Self::SphericalRadius => (1.0, 2.0),
                _ => (0.0, TAU),
            },
            Representation::Rotation => (0.0, TAU),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Brightness => "brightness",
            Self::UniformScale => "uniform_scale",
            Self::ScaleX => "scale_x",
            Self::ScaleY => "scale_y",
            Self::ScaleZ => "scale_z",
            Self::PositionX => "position_x",
            Self::PositionY => "position_y",
            Self::PositionZ => "position_z",
            Self::SphericalRadius => "spherical_radius",
            Self::SphericalLongitude => "spherical_longitude",
            Self::SphericalLatitude => "spherical_latitude",
            Self::RotationAngle => "rotation_angle",
        }
    }
}

impl Representation {
    pub fn properties(self) -> impl Iterator<Item = AnimatableProperty> {
        AnimatableProperty::ALL
            .into_iter()
            .filter(move |p| p.representation() == self)
    }
}

impl fmt::Display for AnimatableProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One animatable property of one object: the unit of binding ownership.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PropertyKey {
    pub object: ObjectId,
    pub property: AnimatableProperty,
}

impl PropertyKey {
    pub fn new(object: ObjectId, property: AnimatableProperty) -> Self {
        Self { object, property }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.property)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/property.rs"]
mod tests;
