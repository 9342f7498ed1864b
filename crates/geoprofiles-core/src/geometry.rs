// crates/geoprofiles-core/src/geometry.rs

//! # Geometry Engine
//!
//! [`PlanarGeometry`] answers the [`GeometryStore`] queries with the `geo`
//! crate. It is stateless: every method is a pure function of its inputs.

use crate::error::{GeoError, Result};
use crate::traits::GeometryStore;
use geo::{
    unary_union, BooleanOps, BoundingRect, Centroid, Coord, Intersects, LineString, MapCoords,
    MultiPolygon, Point, Polygon,
};
use serde::{Deserialize, Serialize};

/// An EPSG spatial reference code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Srid(pub u32);

impl Srid {
    /// Geographic lon/lat on the WGS 84 datum. Source datasets use this.
    pub const WGS84: Srid = Srid(4326);
    /// Spherical web mercator, used for web-map rendering.
    pub const WEB_MERCATOR: Srid = Srid(3857);
}

/// `(xmin, ymin, xmax, ymax)` of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Extent {
    /// `[[xmin, ymin], [xmax, ymax]]`, the shape map clients fit bounds to.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.xmin, self.ymin], [self.xmax, self.ymax]]
    }

    pub fn overlaps(&self, other: &Extent) -> bool {
        self.xmin <= other.xmax
            && other.xmin <= self.xmax
            && self.ymin <= other.ymax
            && other.ymin <= self.ymax
    }
}

/// Semi-major axis of the web mercator sphere, in meters.
const EARTH_RADIUS: f64 = 6_378_137.0;
/// Web mercator is undefined at the poles; latitudes are clamped to this.
const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

fn lonlat_to_mercator(c: Coord<f64>) -> Coord<f64> {
    let lat = c.y.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    Coord {
        x: EARTH_RADIUS * c.x.to_radians(),
        y: EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln(),
    }
}

fn mercator_to_lonlat(c: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (c.x / EARTH_RADIUS).to_degrees(),
        y: (2.0 * (c.y / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees(),
    }
}

/// Planar geometry engine backed by the `geo` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarGeometry;

impl GeometryStore for PlanarGeometry {
    fn intersects(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
        a.intersects(b)
    }

    fn extent(&self, geometry: &MultiPolygon<f64>) -> Option<Extent> {
        geometry.bounding_rect().map(|r| Extent {
            xmin: r.min().x,
            ymin: r.min().y,
            xmax: r.max().x,
            ymax: r.max().y,
        })
    }

    fn transform(
        &self,
        geometry: &MultiPolygon<f64>,
        from: Srid,
        to: Srid,
    ) -> Result<MultiPolygon<f64>> {
        match (from, to) {
            (a, b) if a == b => Ok(geometry.clone()),
            (Srid::WGS84, Srid::WEB_MERCATOR) => Ok(geometry.map_coords(lonlat_to_mercator)),
            (Srid::WEB_MERCATOR, Srid::WGS84) => Ok(geometry.map_coords(mercator_to_lonlat)),
            (Srid::WGS84, other) | (Srid::WEB_MERCATOR, other) => {
                Err(GeoError::UnsupportedSrid(other.0))
            }
            (other, _) => Err(GeoError::UnsupportedSrid(other.0)),
        }
    }

    fn centroid(&self, geometry: &MultiPolygon<f64>) -> Option<Point<f64>> {
        geometry.centroid()
    }

    fn buffer(&self, geometry: &MultiPolygon<f64>, distance: f64) -> Result<MultiPolygon<f64>> {
        if !distance.is_finite() {
            return Err(GeoError::Geometry(format!(
                "buffer distance must be finite, got {distance}"
            )));
        }
        if distance == 0.0 {
            return Ok(geometry.clone());
        }
        let band = edge_band(geometry, distance.abs());
        if distance > 0.0 {
            Ok(geometry.union(&band))
        } else {
            Ok(geometry.difference(&band))
        }
    }
}

/// Union of square-capped rectangles of half-width `d` around every ring edge.
///
/// Subtracting the band erodes a polygon by `d`; adding it dilates it. Corners
/// are squared off rather than rounded.
fn edge_band(geometry: &MultiPolygon<f64>, d: f64) -> MultiPolygon<f64> {
    let quads: Vec<Polygon<f64>> = geometry
        .iter()
        .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors()))
        .flat_map(|ring| ring.lines())
        .filter_map(|seg| {
            let (dx, dy) = (seg.end.x - seg.start.x, seg.end.y - seg.start.y);
            let len = dx.hypot(dy);
            if len == 0.0 {
                return None;
            }
            let u = Coord { x: dx / len * d, y: dy / len * d };
            let n = Coord { x: -u.y, y: u.x };
            let (p, q) = (seg.start - u, seg.end + u);
            Some(Polygon::new(
                LineString::from(vec![p - n, q - n, q + n, p + n, p - n]),
                vec![],
            ))
        })
        .collect();
    unary_union(&quads)
}
