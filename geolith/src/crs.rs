//! Coordinate reference system handles.
//!
//! The kernel does not interpret coordinate reference systems: it only needs to know the position variant a CRS
//! works with, its identity (to gate compatibility checks) and the order in which it lists the horizontal axes.
//! A [`Crs`] is a cheap shared handle, cloning it does not copy the definition.

use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::position::{Position, PositionFactory, PositionKind, C2D, G2D};

/// Authority and code identifying a coordinate reference system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrsId {
    authority: String,
    code: i32,
}

impl CrsId {
    /// Creates a new id.
    pub fn new(authority: impl Into<String>, code: i32) -> Self {
        Self {
            authority: authority.into(),
            code,
        }
    }

    /// Id in the EPSG registry.
    pub fn epsg(code: i32) -> Self {
        Self::new("EPSG", code)
    }

    /// Id used for systems that are not registered anywhere.
    pub fn undefined() -> Self {
        Self::epsg(-1)
    }

    /// Registry name.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Code in the registry.
    pub fn code(&self) -> i32 {
        self.code
    }
}

impl Display for CrsId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

/// Order in which a CRS definition lists the horizontal axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisOrder {
    /// Easting (or longitude) first.
    #[default]
    EastNorth,
    /// Northing (or latitude) first.
    NorthEast,
}

#[derive(Debug, PartialEq, Eq)]
struct CrsDefinition {
    id: CrsId,
    name: String,
    axis_order: AxisOrder,
}

/// Shared handle to a coordinate reference system working with positions of type `P`.
pub struct Crs<P> {
    definition: Arc<CrsDefinition>,
    phantom: PhantomData<fn() -> P>,
}

impl<P: Position> Crs<P> {
    /// Creates a new CRS with easting-first axis order.
    pub fn new(id: CrsId, name: impl Into<String>) -> Self {
        Self {
            definition: Arc::new(CrsDefinition {
                id,
                name: name.into(),
                axis_order: AxisOrder::EastNorth,
            }),
            phantom: PhantomData,
        }
    }

    /// Returns a copy of the CRS with the given axis order.
    pub fn with_axis_order(&self, axis_order: AxisOrder) -> Self {
        Self {
            definition: Arc::new(CrsDefinition {
                id: self.definition.id.clone(),
                name: self.definition.name.clone(),
                axis_order,
            }),
            phantom: PhantomData,
        }
    }

    /// Id of the CRS.
    pub fn id(&self) -> &CrsId {
        &self.definition.id
    }

    /// Human readable name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Axis order of the definition.
    pub fn axis_order(&self) -> AxisOrder {
        self.definition.axis_order
    }

    /// Position variant used by the CRS.
    pub fn kind(&self) -> PositionKind {
        P::KIND
    }

    /// Number of coordinates of every position in this CRS.
    pub fn coordinate_dimension(&self) -> usize {
        P::KIND.coordinate_dimension()
    }

    /// Whether the CRS is geographic.
    pub fn is_geographic(&self) -> bool {
        P::KIND.is_geographic()
    }

    /// Factory for the positions of this CRS.
    pub fn position_factory(&self) -> PositionFactory<P> {
        PositionFactory::new()
    }

    /// The empty position of this CRS.
    pub fn empty_position(&self) -> P {
        P::empty()
    }

    /// Creates a position from coordinates listed in the axis order of the CRS definition.
    ///
    /// Positions always store the easting (longitude) first, so for north-east ordered systems the first two
    /// coordinates are swapped.
    pub fn position_in_axis_order(&self, coords: &[f64]) -> Result<P> {
        let position = P::from_coords(coords)?;
        if position.is_empty() || self.axis_order() == AxisOrder::EastNorth {
            return Ok(position);
        }

        Ok(P::from_fn(|i| match i {
            0 => coords[1],
            1 => coords[0],
            _ => coords[i],
        }))
    }

    /// Returns true if both handles describe the same system, regardless of the position variants they use.
    pub fn same_system<Q: Position>(&self, other: &Crs<Q>) -> bool {
        Arc::ptr_eq(&self.definition, &other.definition) || self.definition == other.definition
    }

    /// The same system used with a different position variant.
    ///
    /// This is how vertical and measure axes are added or dropped: the identity of the system is kept and only the
    /// position type changes.
    pub fn with_position<Q: Position>(&self) -> Crs<Q> {
        Crs {
            definition: self.definition.clone(),
            phantom: PhantomData,
        }
    }

    /// The same system with a measure axis added.
    pub fn with_measure(&self) -> Crs<P::Measured> {
        self.with_position()
    }
}

impl Crs<G2D> {
    /// WGS 84 geographic system.
    pub fn wgs84() -> Self {
        Self::new(CrsId::epsg(4326), "WGS 84")
    }
}

impl Crs<C2D> {
    /// Web Mercator projected system.
    pub fn web_mercator() -> Self {
        Self::new(CrsId::epsg(3857), "WGS 84 / Pseudo-Mercator")
    }

    /// Unregistered cartesian plane.
    pub fn cartesian() -> Self {
        Self::new(CrsId::undefined(), "Generic 2D cartesian")
    }
}

impl<P> Clone for Crs<P> {
    fn clone(&self) -> Self {
        Self {
            definition: self.definition.clone(),
            phantom: PhantomData,
        }
    }
}

impl<P> PartialEq for Crs<P> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.definition, &other.definition) || self.definition == other.definition
    }
}

impl<P> Eq for Crs<P> {}

impl<P: Position> Debug for Crs<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crs")
            .field("id", &self.definition.id)
            .field("name", &self.definition.name)
            .field("axis_order", &self.definition.axis_order)
            .field("kind", &P::KIND)
            .finish()
    }
}

impl<P: Position> Display for Crs<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.definition.id, P::KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{G2DM, G3D};

    #[test]
    fn metadata_follows_position_type() {
        let crs = Crs::wgs84();
        assert_eq!(crs.id(), &CrsId::epsg(4326));
        assert!(crs.is_geographic());
        assert_eq!(crs.coordinate_dimension(), 2);

        let measured: Crs<G2DM> = crs.with_measure();
        assert_eq!(measured.id(), crs.id());
        assert_eq!(measured.coordinate_dimension(), 3);
        assert_eq!(measured.kind(), PositionKind::G2DM);
        assert!(measured.same_system(&crs));
        assert!(!measured.same_system(&Crs::web_mercator()));
    }

    #[test]
    fn equality_by_definition() {
        assert_eq!(Crs::web_mercator(), Crs::web_mercator());
        assert_ne!(Crs::web_mercator(), Crs::cartesian());
        let crs = Crs::wgs84();
        assert_ne!(crs, crs.with_axis_order(AxisOrder::NorthEast));
    }

    #[test]
    fn axis_order_normalization() {
        let crs = Crs::<G3D>::new(CrsId::epsg(4979), "WGS 84 3D").with_axis_order(AxisOrder::NorthEast);
        let p = crs
            .position_in_axis_order(&[50.0, 4.0, 10.0])
            .expect("valid");
        assert_eq!(p, G3D::new(4.0, 50.0, 10.0));
        assert!(crs.position_in_axis_order(&[]).expect("empty").is_empty());
        assert!(crs.position_in_axis_order(&[1.0]).is_err());

        let p = Crs::wgs84().position_in_axis_order(&[4.0, 50.0]).expect("valid");
        assert_eq!(p, G2D::new(4.0, 50.0));
    }

    #[test]
    fn display() {
        assert_eq!(Crs::wgs84().to_string(), "EPSG:4326 (G2D)");
    }
}
