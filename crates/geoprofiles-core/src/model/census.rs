// crates/geoprofiles-core/src/model/census.rs
use super::kind::GeogType;
use crate::traits::GeoBackend;
use serde::{Deserialize, Serialize};

/// Identifiers and magnitudes shared by every census-sourced kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CensusFields<B: GeoBackend> {
    pub geoid: B::Str,
    /// American FactFinder geoid; unique across kinds when present.
    pub affgeoid: B::Str,
    /// Legal/statistical area description code, two characters.
    pub lsad: B::Str,
    pub land_area: i64,
    pub water_area: i64,
}

/// Kind-specific FIPS components.
///
/// The variant decides the record's [`GeogType`]; callers never set the tag
/// directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum KindFields<B: GeoBackend> {
    BlockGroup {
        statefp: B::Str,
        countyfp: B::Str,
        tractce: B::Str,
        blkgrpce: B::Str,
    },
    Tract {
        statefp: B::Str,
        countyfp: B::Str,
        tractce: B::Str,
    },
    CountySubdivision {
        statefp: B::Str,
        countyfp: B::Str,
        cousubfp: B::Str,
        cousubns: B::Str,
    },
    County {
        statefp: B::Str,
        countyfp: B::Str,
        countyns: B::Str,
    },
    Zcta {
        zctace: B::Str,
    },
    SchoolDistrict {
        statefp: B::Str,
        unsdlea: B::Str,
        placens: B::Str,
    },
    Neighborhood,
    StateHouse {
        statefp: B::Str,
        sldlst: B::Str,
    },
    StateSenate {
        statefp: B::Str,
        sldust: B::Str,
    },
    Puma {
        statefp: B::Str,
        pumace: B::Str,
    },
}

/// A census data API geography clause: `for=<for>&in=<in>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusGeo {
    #[serde(rename = "for")]
    pub for_: String,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub in_: Option<String>,
}

impl CensusGeo {
    fn new(for_: String, in_: Option<String>) -> Self {
        Self { for_, in_ }
    }
}

impl<B: GeoBackend> KindFields<B> {
    pub fn kind(&self) -> GeogType {
        match self {
            KindFields::BlockGroup { .. } => GeogType::BlockGroup,
            KindFields::Tract { .. } => GeogType::Tract,
            KindFields::CountySubdivision { .. } => GeogType::CountySubdivision,
            KindFields::County { .. } => GeogType::County,
            KindFields::Zcta { .. } => GeogType::Zcta,
            KindFields::SchoolDistrict { .. } => GeogType::SchoolDistrict,
            KindFields::Neighborhood => GeogType::Neighborhood,
            KindFields::StateHouse { .. } => GeogType::StateHouse,
            KindFields::StateSenate { .. } => GeogType::StateSenate,
            KindFields::Puma { .. } => GeogType::Puma,
        }
    }

    /// Geoid of the enclosing region of kind `ancestor`, built from this
    /// region's own FIPS components.
    ///
    /// Returns `None` when `ancestor` does not enclose this kind.
    pub fn ancestor_geoid(&self, ancestor: GeogType) -> Option<String> {
        match (self, ancestor) {
            (
                KindFields::BlockGroup {
                    statefp, countyfp, ..
                }
                | KindFields::Tract {
                    statefp, countyfp, ..
                }
                | KindFields::CountySubdivision {
                    statefp, countyfp, ..
                },
                GeogType::County,
            ) => Some(format!("{}{}", statefp.as_ref(), countyfp.as_ref())),
            (
                KindFields::BlockGroup {
                    statefp,
                    countyfp,
                    tractce,
                    ..
                },
                GeogType::Tract,
            ) => Some(format!(
                "{}{}{}",
                statefp.as_ref(),
                countyfp.as_ref(),
                tractce.as_ref()
            )),
            _ => None,
        }
    }

    /// Geoid of the county this region is, or lies in. Kinds that can
    /// straddle county lines have none.
    pub fn county_geoid(&self) -> Option<String> {
        match self {
            KindFields::County {
                statefp, countyfp, ..
            } => Some(format!("{}{}", statefp.as_ref(), countyfp.as_ref())),
            other => other.ancestor_geoid(GeogType::County),
        }
    }

    /// The census API geography clause selecting this region, if the kind
    /// is census-sourced.
    pub fn census_geo(&self) -> Option<CensusGeo> {
        let geo = match self {
            KindFields::BlockGroup {
                statefp,
                countyfp,
                tractce,
                blkgrpce,
            } => CensusGeo::new(
                format!("block group:{}", blkgrpce.as_ref()),
                Some(format!(
                    "state:{} county:{} tract:{}",
                    statefp.as_ref(),
                    countyfp.as_ref(),
                    tractce.as_ref()
                )),
            ),
            KindFields::Tract {
                statefp,
                countyfp,
                tractce,
            } => CensusGeo::new(
                format!("tract:{}", tractce.as_ref()),
                Some(format!("state:{} county:{}", statefp.as_ref(), countyfp.as_ref())),
            ),
            KindFields::CountySubdivision {
                statefp,
                countyfp,
                cousubfp,
                ..
            } => CensusGeo::new(
                format!("county subdivision:{}", cousubfp.as_ref()),
                Some(format!("state:{} county:{}", statefp.as_ref(), countyfp.as_ref())),
            ),
            KindFields::County {
                statefp, countyfp, ..
            } => CensusGeo::new(
                format!("county:{}", countyfp.as_ref()),
                Some(format!("state:{}", statefp.as_ref())),
            ),
            KindFields::Zcta { zctace } => {
                CensusGeo::new(format!("zip code tabulation area:{}", zctace.as_ref()), None)
            }
            KindFields::SchoolDistrict {
                statefp, unsdlea, ..
            } => CensusGeo::new(
                format!("school district (unified):{}", unsdlea.as_ref()),
                Some(format!("state:{}", statefp.as_ref())),
            ),
            KindFields::StateHouse { statefp, sldlst } => CensusGeo::new(
                format!(
                    "state legislative district (lower chamber):{}",
                    sldlst.as_ref()
                ),
                Some(format!("state:{}", statefp.as_ref())),
            ),
            KindFields::StateSenate { statefp, sldust } => CensusGeo::new(
                format!(
                    "state legislative district (upper chamber):{}",
                    sldust.as_ref()
                ),
                Some(format!("state:{}", statefp.as_ref())),
            ),
            KindFields::Puma { statefp, pumace } => CensusGeo::new(
                format!("public use microdata area:{}", pumace.as_ref()),
                Some(format!("state:{}", statefp.as_ref())),
            ),
            KindFields::Neighborhood => return None,
        };
        Some(geo)
    }
}
