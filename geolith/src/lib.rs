//! Geolith is a kernel for immutable vector geometries of the OGC simple features model.
//!
//! The central abstractions are:
//! * [`Position`](position::Position) - coordinate tuple whose dimensionality (2D, 3D, measured, geographic) is
//!   part of its type;
//! * [`PositionSequence`](sequence::PositionSequence) - ordered collection of positions with packed or nested
//!   storage;
//! * [`Geometry`](geometry::Geometry) - points, line strings, polygons and their collections, bound to a
//!   [`Crs`](crs::Crs);
//! * [`Envelope`](envelope::Envelope) - axis aligned bounding box with set algebra.
//!
//! On top of these the crate provides configurable [equality](equality) of positions, sequences and
//! geometries, [linear referencing](measure) over measured line strings and a [`PlanarEngine`] abstraction for
//! topological predicates and overlays.
//!
//! ```
//! use geolith::crs::Crs;
//! use geolith::geometry::{Geometric, Geometry, LineString};
//! use geolith::measure::measure_on_length;
//! use geolith::position::{Position, C2D};
//!
//! let line = LineString::from_positions(
//!     &[C2D::new(0.0, 0.0), C2D::new(3.0, 4.0), C2D::new(3.0, 4.0)],
//!     Crs::cartesian(),
//! )
//! .unwrap();
//! let measured = measure_on_length(&Geometry::from(line), false).unwrap();
//! let measures: Vec<f64> = measured.positions().iter().map(|p| p.m()).collect();
//! assert_eq!(measures, vec![0.0, 5.0, 5.0]);
//! ```
//!
//! # Features
//!
//! * `geo-types` (default) - conversions between the geometry model and `geo-types` geometries.
//! * `geo` - [`GeoEngine`](planar::GeoEngine), a planar engine backed by the `geo` crate.

pub mod codec;
pub mod crs;
pub mod envelope;
pub mod equality;
pub mod error;
pub mod geometry;
pub mod measure;
pub mod planar;
pub mod position;
pub mod segment;
pub mod sequence;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use crs::Crs;
pub use envelope::Envelope;
pub use error::{GeometryError, Result};
pub use geometry::{Geometric, Geometry, GeometryType};
pub use planar::PlanarEngine;
pub use position::{Measured, Position, PositionKind};
pub use sequence::PositionSequence;
