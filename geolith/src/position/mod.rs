//! Positions are immutable coordinate tuples.
//!
//! The dimensionality of a position is a property of its type: every position type implements [`Position`] and
//! declares its [`PositionKind`]. A non-empty position always holds exactly
//! [`PositionKind::coordinate_dimension`] coordinates. Each type also has a distinguished *empty* position with no
//! coordinates at all, which is used to represent empty geometries. Numeric accessors return `NaN` for the empty
//! position instead of failing.
//!
//! ```
//! use geolith::position::{Position, C2DM};
//!
//! let p = C2DM::new(1.0, 2.0, 10.0);
//! assert_eq!(p.m(), 10.0);
//! assert!(C2DM::empty().x().is_nan());
//! ```

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

mod factory;
mod kind;

pub use factory::PositionFactory;
pub use kind::PositionKind;

/// Coordinate tuple of a fixed dimensionality variant.
pub trait Position:
    Copy + Debug + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// Variant of the position type.
    const KIND: PositionKind;

    /// Position type with the same components plus a measure.
    type Measured: Measured;

    /// Raw coordinates of the position. Empty slice for the empty position.
    fn coords(&self) -> &[f64];

    /// Creates a position from its coordinates.
    ///
    /// An empty slice creates the empty position. Any other length must be equal to the coordinate dimension of
    /// the variant.
    fn from_coords(coords: &[f64]) -> Result<Self>;

    /// Creates a non-empty position computing every coordinate by its index.
    fn from_fn(f: impl FnMut(usize) -> f64) -> Self;

    /// The empty position.
    fn empty() -> Self;

    /// Returns true for the empty position.
    fn is_empty(&self) -> bool {
        self.coords().is_empty()
    }

    /// Coordinate dimension of the position type.
    fn coordinate_dimension() -> usize {
        Self::KIND.coordinate_dimension()
    }

    /// Returns the coordinate with the given index, or `NaN` if the position is empty or the index is beyond the
    /// coordinate dimension.
    fn coordinate(&self, index: usize) -> f64 {
        self.coords().get(index).copied().unwrap_or(f64::NAN)
    }

    /// Copies the coordinates into `dest` if it is given and large enough, or into a newly allocated vector
    /// otherwise. Empty positions always produce an empty vector.
    fn to_array(&self, dest: Option<Vec<f64>>) -> Vec<f64> {
        let coords = self.coords();
        if coords.is_empty() {
            return Vec::new();
        }

        match dest {
            Some(mut dest) if dest.len() >= coords.len() => {
                dest[..coords.len()].copy_from_slice(coords);
                dest
            }
            _ => coords.to_vec(),
        }
    }

    /// First horizontal coordinate (`x` or longitude).
    fn x(&self) -> f64 {
        self.coordinate(0)
    }

    /// Second horizontal coordinate (`y` or latitude).
    fn y(&self) -> f64 {
        self.coordinate(1)
    }

    /// Vertical component, `NaN` if the variant has none.
    fn z(&self) -> f64 {
        match Self::KIND.vertical_index() {
            Some(index) => self.coordinate(index),
            None => f64::NAN,
        }
    }

    /// Measure, `NaN` if the variant has none.
    fn m(&self) -> f64 {
        match Self::KIND.measure_index() {
            Some(index) => self.coordinate(index),
            None => f64::NAN,
        }
    }

    /// Re-expresses the position as another variant.
    ///
    /// Horizontal coordinates are copied as is. The vertical component and the measure are carried over when both
    /// variants have them, and set to `NaN` when only the target variant has them.
    fn convert<Q: Position>(&self) -> Q {
        if self.is_empty() {
            return Q::empty();
        }

        let vertical = Q::KIND.vertical_index();
        let measure = Q::KIND.measure_index();
        Q::from_fn(|i| {
            if i < 2 {
                self.coordinate(i)
            } else if Some(i) == vertical {
                self.z()
            } else if Some(i) == measure {
                self.m()
            } else {
                f64::NAN
            }
        })
    }
}

/// Position variants that carry a measure.
pub trait Measured: Position {
    /// Returns a copy of the position with the measure replaced. Empty positions are returned unchanged.
    fn with_measure(&self, m: f64) -> Self {
        if self.is_empty() {
            return *self;
        }

        let index = Self::KIND.measure_index();
        Self::from_fn(|i| {
            if Some(i) == index {
                m
            } else {
                self.coordinate(i)
            }
        })
    }
}

/// Geographic position variants.
pub trait GeographicPosition: Position {
    /// Longitude in degrees.
    fn lon(&self) -> f64 {
        self.coordinate(0)
    }

    /// Latitude in degrees.
    fn lat(&self) -> f64 {
        self.coordinate(1)
    }

    /// Altitude, `NaN` if the variant has no vertical component.
    fn alt(&self) -> f64 {
        self.z()
    }
}

pub(crate) fn bitwise_eq(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.to_bits() == b.to_bits())
}

macro_rules! position_type {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $dim:literal, $measured:ident, [$($arg:ident),+]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
        pub struct $name {
            coords: [f64; $dim],
            empty: bool,
        }

        impl $name {
            /// Creates a new position with the given coordinates.
            pub const fn new($($arg: f64),+) -> Self {
                Self {
                    coords: [$($arg),+],
                    empty: false,
                }
            }
        }

        impl Position for $name {
            const KIND: PositionKind = PositionKind::$kind;
            type Measured = $measured;

            fn coords(&self) -> &[f64] {
                if self.empty {
                    &[]
                } else {
                    &self.coords
                }
            }

            fn from_coords(coords: &[f64]) -> Result<Self> {
                match coords.len() {
                    0 => Ok(Self::empty()),
                    $dim => {
                        let mut values = [0.0; $dim];
                        values.copy_from_slice(coords);
                        Ok(Self {
                            coords: values,
                            empty: false,
                        })
                    }
                    n => Err(GeometryError::InvalidArgument(format!(
                        "{} position requires {} coordinates, got {n}",
                        PositionKind::$kind,
                        $dim
                    ))),
                }
            }

            fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
                Self {
                    coords: std::array::from_fn(f),
                    empty: false,
                }
            }

            fn empty() -> Self {
                Self {
                    coords: [f64::NAN; $dim],
                    empty: true,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as Position>::empty()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                bitwise_eq(self.coords(), other.coords())
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                let coords = self.coords();
                coords.len().hash(state);
                for c in coords {
                    c.to_bits().hash(state);
                }
            }
        }
    };
}

position_type!(
    /// Cartesian position with `x` and `y` coordinates.
    C2D, C2D, 2, C2DM, [x, y]
);
position_type!(
    /// Cartesian position with `x`, `y` coordinates and a measure.
    C2DM, C2DM, 3, C2DM, [x, y, m]
);
position_type!(
    /// Cartesian position with `x`, `y` and `z` coordinates.
    C3D, C3D, 3, C3DM, [x, y, z]
);
position_type!(
    /// Cartesian position with `x`, `y`, `z` coordinates and a measure.
    C3DM, C3DM, 4, C3DM, [x, y, z, m]
);
position_type!(
    /// Geographic position with longitude and latitude in degrees.
    G2D, G2D, 2, G2DM, [lon, lat]
);
position_type!(
    /// Geographic position with longitude, latitude and a measure.
    G2DM, G2DM, 3, G2DM, [lon, lat, m]
);
position_type!(
    /// Geographic position with longitude, latitude and altitude.
    G3D, G3D, 3, G3DM, [lon, lat, alt]
);
position_type!(
    /// Geographic position with longitude, latitude, altitude and a measure.
    G3DM, G3DM, 4, G3DM, [lon, lat, alt, m]
);

impl Measured for C2DM {}
impl Measured for C3DM {}
impl Measured for G2DM {}
impl Measured for G3DM {}

impl GeographicPosition for G2D {}
impl GeographicPosition for G2DM {}
impl GeographicPosition for G3D {}
impl GeographicPosition for G3DM {}
