use crate::foundation::error::{GridfitError, GridfitResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Final top-left offset of one item inside the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Horizontal offset from the container's left edge.
    pub left: f64,
    /// Vertical offset from the container's top edge.
    pub top: f64,
}

impl Position {
    /// Create a position from explicit offsets.
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// The offset as a `kurbo` point.
    pub fn to_point(self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The rectangle covered by an item of `size` placed at this offset.
    pub fn rect(self, size: Size) -> Rect {
        Rect::from_origin_size(self.to_point(), size)
    }
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Container height reported alongside a layout.
///
/// Serializes as a bare number or the string `"auto"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContainerHeight {
    /// Height in pixels the container should take.
    Px(f64),
    /// Leave the container height untouched.
    Auto,
}

impl ContainerHeight {
    /// Pixel height, or `None` for [`ContainerHeight::Auto`].
    pub fn px(self) -> Option<f64> {
        match self {
            Self::Px(v) => Some(v),
            Self::Auto => None,
        }
    }
}

impl Default for ContainerHeight {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl serde::Serialize for ContainerHeight {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Px(v) => serializer.serialize_f64(*v),
            Self::Auto => serializer.serialize_str("auto"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for ContainerHeight {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(v) => Ok(Self::Px(v)),
            Repr::Str(s) if s == "auto" => Ok(Self::Auto),
            Repr::Str(s) => Err(serde::de::Error::custom(format!(
                "expected a number or \"auto\", got \"{s}\""
            ))),
        }
    }
}

/// Container width must be finite and strictly positive.
pub fn validate_container_width(width: f64) -> GridfitResult<f64> {
    if !width.is_finite() || width <= 0.0 {
        return Err(GridfitError::invalid_dimension(format!(
            "container width must be finite and > 0, got {width}"
        )));
    }
    Ok(width)
}

/// Item sizes must be finite and non-negative on both axes.
pub fn validate_item_sizes(items: &[Size]) -> GridfitResult<()> {
    for (index, size) in items.iter().enumerate() {
        for (axis, value) in [("width", size.width), ("height", size.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GridfitError::invalid_dimension(format!(
                    "item {index} {axis} must be finite and >= 0, got {value}"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
