use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Closed set of position variants.
///
/// The variant fixes the number of coordinates of a position and the meaning of each of them. The first two
/// coordinates are always the horizontal ones (`x`/`y` for cartesian variants, `lon`/`lat` for geographic ones),
/// followed by the optional vertical component and the optional measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionKind {
    /// Cartesian `x, y`.
    C2D,
    /// Cartesian `x, y, m`.
    C2DM,
    /// Cartesian `x, y, z`.
    C3D,
    /// Cartesian `x, y, z, m`.
    C3DM,
    /// Geographic `lon, lat`.
    G2D,
    /// Geographic `lon, lat, m`.
    G2DM,
    /// Geographic `lon, lat, alt`.
    G3D,
    /// Geographic `lon, lat, alt, m`.
    G3DM,
}

impl PositionKind {
    /// All the variants.
    pub const ALL: [PositionKind; 8] = [
        PositionKind::C2D,
        PositionKind::C2DM,
        PositionKind::C3D,
        PositionKind::C3DM,
        PositionKind::G2D,
        PositionKind::G2DM,
        PositionKind::G3D,
        PositionKind::G3DM,
    ];

    /// Number of coordinates in a non-empty position of this variant.
    pub const fn coordinate_dimension(&self) -> usize {
        match self {
            PositionKind::C2D | PositionKind::G2D => 2,
            PositionKind::C2DM | PositionKind::C3D | PositionKind::G2DM | PositionKind::G3D => 3,
            PositionKind::C3DM | PositionKind::G3DM => 4,
        }
    }

    /// Whether positions carry a vertical component (`z` or altitude).
    pub const fn has_vertical(&self) -> bool {
        self.vertical_index().is_some()
    }

    /// Whether positions carry a measure.
    pub const fn has_measure(&self) -> bool {
        self.measure_index().is_some()
    }

    /// Index of the vertical component in the coordinate array.
    pub const fn vertical_index(&self) -> Option<usize> {
        match self {
            PositionKind::C3D | PositionKind::C3DM | PositionKind::G3D | PositionKind::G3DM => {
                Some(2)
            }
            _ => None,
        }
    }

    /// Index of the measure in the coordinate array.
    pub const fn measure_index(&self) -> Option<usize> {
        match self {
            PositionKind::C2DM | PositionKind::G2DM => Some(2),
            PositionKind::C3DM | PositionKind::G3DM => Some(3),
            _ => None,
        }
    }

    /// Whether the horizontal coordinates are longitude and latitude.
    pub const fn is_geographic(&self) -> bool {
        matches!(
            self,
            PositionKind::G2D | PositionKind::G2DM | PositionKind::G3D | PositionKind::G3DM
        )
    }

    /// The variant obtained by adding a measure to this one.
    pub const fn measured(&self) -> PositionKind {
        match self {
            PositionKind::C2D | PositionKind::C2DM => PositionKind::C2DM,
            PositionKind::C3D | PositionKind::C3DM => PositionKind::C3DM,
            PositionKind::G2D | PositionKind::G2DM => PositionKind::G2DM,
            PositionKind::G3D | PositionKind::G3DM => PositionKind::G3DM,
        }
    }

    /// Short names of the axes in coordinate order.
    pub const fn axis_names(&self) -> &'static [&'static str] {
        match self {
            PositionKind::C2D => &["x", "y"],
            PositionKind::C2DM => &["x", "y", "m"],
            PositionKind::C3D => &["x", "y", "z"],
            PositionKind::C3DM => &["x", "y", "z", "m"],
            PositionKind::G2D => &["lon", "lat"],
            PositionKind::G2DM => &["lon", "lat", "m"],
            PositionKind::G3D => &["lon", "lat", "alt"],
            PositionKind::G3DM => &["lon", "lat", "alt", "m"],
        }
    }
}

impl Display for PositionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PositionKind::C2D => "C2D",
            PositionKind::C2DM => "C2DM",
            PositionKind::C3D => "C3D",
            PositionKind::C3DM => "C3DM",
            PositionKind::G2D => "G2D",
            PositionKind::G2DM => "G2DM",
            PositionKind::G3D => "G3D",
            PositionKind::G3DM => "G3DM",
        };
        write!(f, "{name}")
    }
}
