// crates/geoprofiles-core/src/model/geojson.rs
use crate::error::{GeoError, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

type Ring = Vec<[f64; 2]>;

/// GeoJSON polygonal geometry object (RFC 7946, lon/lat order).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum GeoJsonGeometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

/// The minimal Feature handed to mapping clients: the boundary plus a name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleFeature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: GeoJsonGeometry,
    pub properties: FeatureProperties,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub name: String,
}

impl SimpleFeature {
    pub fn new(geometry: &MultiPolygon<f64>, name: &str) -> Self {
        Self {
            kind: "Feature".to_string(),
            geometry: GeoJsonGeometry::from(geometry),
            properties: FeatureProperties {
                name: name.to_string(),
            },
        }
    }
}

fn ring_to_line(ring: &[[f64; 2]]) -> LineString<f64> {
    LineString::new(ring.iter().map(|&[x, y]| Coord { x, y }).collect())
}

fn line_to_ring(line: &LineString<f64>) -> Ring {
    line.coords().map(|c| [c.x, c.y]).collect()
}

fn rings_to_polygon(rings: &[Ring]) -> Result<Polygon<f64>> {
    let (exterior, interiors) = rings
        .split_first()
        .ok_or_else(|| GeoError::InvalidData("polygon without an exterior ring".into()))?;
    if exterior.len() < 4 {
        return Err(GeoError::InvalidData(format!(
            "polygon ring needs at least 4 positions, got {}",
            exterior.len()
        )));
    }
    Ok(Polygon::new(
        ring_to_line(exterior),
        interiors.iter().map(|r| ring_to_line(r)).collect(),
    ))
}

impl GeoJsonGeometry {
    /// Converts to the in-memory form; a `Polygon` becomes a one-member
    /// `MultiPolygon`.
    pub fn to_multi_polygon(&self) -> Result<MultiPolygon<f64>> {
        match self {
            GeoJsonGeometry::Polygon(rings) => Ok(MultiPolygon(vec![rings_to_polygon(rings)?])),
            GeoJsonGeometry::MultiPolygon(polys) => polys
                .iter()
                .map(|rings| rings_to_polygon(rings))
                .collect::<Result<Vec<_>>>()
                .map(MultiPolygon),
        }
    }
}

impl From<&MultiPolygon<f64>> for GeoJsonGeometry {
    fn from(mp: &MultiPolygon<f64>) -> Self {
        GeoJsonGeometry::MultiPolygon(
            mp.0.iter()
                .map(|p| {
                    std::iter::once(p.exterior())
                        .chain(p.interiors().iter())
                        .map(line_to_ring)
                        .collect()
                })
                .collect(),
        )
    }
}
