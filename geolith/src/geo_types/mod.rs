//! Conversion between the geometry model and [`geo_types`] geometries.
//!
//! `geo_types` coordinates only have two components, so vertical components and measures are dropped going out
//! and set to `NaN` coming back. Empty points cannot be represented by `geo_types` and fail to convert.

mod from_geo;
mod to_geo;

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::crs::Crs;
    use crate::error::GeometryError;
    use crate::geometry::{
        Geometric, Geometry, GeometryCollection, LineString, LinearRing, Point, Polygon,
    };
    use crate::position::{Position, C2D, C3DM};

    fn polygon_with_hole(crs: &Crs<C2D>) -> Polygon<C2D> {
        let ring = |coords: &[(f64, f64)]| {
            let positions: Vec<_> = coords.iter().map(|(x, y)| C2D::new(*x, *y)).collect();
            LinearRing::from_positions(&positions, crs.clone()).expect("closed")
        };
        Polygon::new(
            vec![
                ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
                ring(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 2.0)]),
            ],
            crs.clone(),
        )
        .expect("valid")
    }

    #[test]
    fn polygon_round_trip() {
        let crs = Crs::cartesian();
        let polygon: Geometry<C2D> = polygon_with_hole(&crs).into();
        let geo = polygon.to_geo().expect("convertible");
        let geo_types::Geometry::Polygon(geo_polygon) = &geo else {
            panic!("expected polygon, got {geo:?}");
        };
        assert_eq!(geo_polygon.exterior().0.len(), 5);
        assert_eq!(geo_polygon.interiors().len(), 1);

        let back = Geometry::from_geo(&geo, &crs).expect("valid");
        assert_eq!(back, polygon);
    }

    #[test]
    fn extra_components_are_dropped_and_restored_as_nan() {
        let crs = Crs::cartesian().with_position::<C3DM>();
        let line: Geometry<C3DM> = LineString::from_positions(
            &[C3DM::new(0.0, 0.0, 1.0, 2.0), C3DM::new(1.0, 1.0, 3.0, 4.0)],
            crs.clone(),
        )
        .expect("valid")
        .into();

        let geo = line.to_geo().expect("convertible");
        assert_eq!(
            geo,
            geo_types::Geometry::LineString(geo_types::LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]))
        );

        let back = Geometry::from_geo(&geo, &crs).expect("valid");
        let position = back.position_n(1).expect("in range");
        assert_eq!((position.x(), position.y()), (1.0, 1.0));
        assert!(position.z().is_nan());
        assert!(position.m().is_nan());
    }

    #[test]
    fn empty_point_cannot_be_converted() {
        let point: Geometry<C2D> = Point::empty(Crs::cartesian()).into();
        assert_matches!(point.to_geo(), Err(GeometryError::Conversion(_)));
    }

    #[test]
    fn collections() {
        let crs = Crs::cartesian();
        let collection: Geometry<C2D> = GeometryCollection::<C2D>::new(
            vec![
                Point::new(C2D::new(1.0, 2.0), crs.clone()).into(),
                polygon_with_hole(&crs).into(),
            ],
            crs.clone(),
        )
        .expect("valid")
        .into();

        let geo = collection.to_geo().expect("convertible");
        let back = Geometry::from_geo(&geo, &crs).expect("valid");
        assert_eq!(back, collection);
        assert_eq!(back.dimension(), 2);
    }

    #[test]
    fn geo_only_types() {
        let crs = Crs::cartesian();
        let rect = geo_types::Geometry::Rect(geo_types::Rect::new(
            geo_types::coord! { x: 0.0, y: 0.0 },
            geo_types::coord! { x: 2.0, y: 1.0 },
        ));
        let polygon = Geometry::from_geo(&rect, &crs).expect("valid");
        assert!(polygon.as_polygon().is_some());
        assert_eq!(polygon.num_positions(), 5);

        let line = geo_types::Geometry::Line(geo_types::Line::new(
            geo_types::coord! { x: 0.0, y: 0.0 },
            geo_types::coord! { x: 2.0, y: 1.0 },
        ));
        let line = Geometry::from_geo(&line, &crs).expect("valid");
        assert_eq!(line.as_line_string().map(|l| l.num_segments()), Some(1));
    }
}
