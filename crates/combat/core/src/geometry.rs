//! Axis-aligned footprints and the distances measured between them.

use crate::error::{ErrorSeverity, GameError};

/// Axis-aligned rectangle describing an entity's spatial footprint.
///
/// `(x, y)` is the minimum corner; the rectangle spans `width` along x and
/// `height` along y.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BoundsRepr")
)]
pub struct Bounds {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Bounds {
    /// Creates a footprint, rejecting non-finite coordinates and negative extents.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(GeometryError::NonFiniteOrigin { x, y });
        }
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(GeometryError::InvalidExtent { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Center point as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns true when the two rectangles share any point, edges included.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x <= other.max_x()
            && other.x <= self.max_x()
            && self.y <= other.max_y()
            && other.y <= self.max_y()
    }

    /// Taxicab distance `|Δx| + |Δy|` between the two centers.
    pub fn center_taxicab_distance(&self, other: &Bounds) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (ax - bx).abs() + (ay - by).abs()
    }

    /// Returns a copy moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Unvalidated wire form; deserialization goes through [`Bounds::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct BoundsRepr {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<BoundsRepr> for Bounds {
    type Error = GeometryError;

    fn try_from(repr: BoundsRepr) -> Result<Self, Self::Error> {
        Bounds::new(repr.x, repr.y, repr.width, repr.height)
    }
}

/// Errors raised while constructing a [`Bounds`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("footprint origin ({x}, {y}) is not finite")]
    NonFiniteOrigin { x: f64, y: f64 },

    #[error("footprint extent {width}x{height} must be finite and non-negative")]
    InvalidExtent { width: f64, height: f64 },
}

impl GameError for GeometryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonFiniteOrigin { .. } => "GEOMETRY_NON_FINITE_ORIGIN",
            Self::InvalidExtent { .. } => "GEOMETRY_INVALID_EXTENT",
        }
    }
}
