// crates/geoprofiles-core/src/loader/source.rs
#![cfg(feature = "json")]

use crate::error::{GeoError, Result};
use crate::model::{CensusFields, GeoJsonGeometry, GeogType, KindFields, RegionDraft, RegionRecord, RegionSummary};
use crate::registry::RegionTypeRegistry;
use crate::traits::{GeoBackend, GeometryStore};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;

/// One region as written by the boundary import job.
///
/// Field names follow the census shapefile attribute names.
#[derive(Debug, Deserialize)]
pub struct RegionRaw {
    pub id: Option<u64>,
    pub geog_type: String,
    pub name: String,
    #[serde(default)]
    pub global_geoid: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub in_extent: Option<bool>,

    #[serde(default)]
    pub geoid: Option<String>,
    #[serde(default)]
    pub affgeoid: Option<String>,
    #[serde(default)]
    pub lsad: Option<String>,
    #[serde(default)]
    pub aland: Option<i64>,
    #[serde(default)]
    pub awater: Option<i64>,

    #[serde(default)]
    pub statefp: Option<String>,
    #[serde(default)]
    pub countyfp: Option<String>,
    #[serde(default)]
    pub countyns: Option<String>,
    #[serde(default)]
    pub tractce: Option<String>,
    #[serde(default)]
    pub blkgrpce: Option<String>,
    #[serde(default)]
    pub cousubfp: Option<String>,
    #[serde(default)]
    pub cousubns: Option<String>,
    #[serde(default)]
    pub zctace: Option<String>,
    #[serde(default)]
    pub unsdlea: Option<String>,
    #[serde(default)]
    pub placens: Option<String>,
    #[serde(default)]
    pub sldlst: Option<String>,
    #[serde(default)]
    pub sldust: Option<String>,
    #[serde(default)]
    pub pumace: Option<String>,

    pub geometry: GeoJsonGeometry,
    #[serde(default)]
    pub geometry_projected: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub simplified_geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub subregions: BTreeMap<GeogType, Vec<RegionSummary>>,
}

pub fn read_raw<R: Read>(reader: R) -> Result<Vec<RegionRaw>> {
    Ok(serde_json::from_reader(reader)?)
}

impl RegionRaw {
    fn required<'a>(&'a self, field: &'static str, value: &'a Option<String>) -> Result<&'a str> {
        value.as_deref().filter(|v| !v.is_empty()).ok_or_else(|| {
            GeoError::InvalidData(format!(
                "{} {:?} is missing `{field}`",
                self.geog_type, self.name
            ))
        })
    }

    fn kind_fields<B: GeoBackend>(&self, kind: GeogType) -> Result<KindFields<B>> {
        let s = |field: &'static str, value: &Option<String>| -> Result<B::Str> {
            self.required(field, value).map(B::str_from)
        };
        Ok(match kind {
            GeogType::BlockGroup => KindFields::BlockGroup {
                statefp: s("statefp", &self.statefp)?,
                countyfp: s("countyfp", &self.countyfp)?,
                tractce: s("tractce", &self.tractce)?,
                blkgrpce: s("blkgrpce", &self.blkgrpce)?,
            },
            GeogType::Tract => KindFields::Tract {
                statefp: s("statefp", &self.statefp)?,
                countyfp: s("countyfp", &self.countyfp)?,
                tractce: s("tractce", &self.tractce)?,
            },
            GeogType::CountySubdivision => KindFields::CountySubdivision {
                statefp: s("statefp", &self.statefp)?,
                countyfp: s("countyfp", &self.countyfp)?,
                cousubfp: s("cousubfp", &self.cousubfp)?,
                cousubns: s("cousubns", &self.cousubns)?,
            },
            GeogType::County => KindFields::County {
                statefp: s("statefp", &self.statefp)?,
                countyfp: s("countyfp", &self.countyfp)?,
                countyns: s("countyns", &self.countyns)?,
            },
            GeogType::Zcta => KindFields::Zcta {
                zctace: s("zctace", &self.zctace)?,
            },
            GeogType::SchoolDistrict => KindFields::SchoolDistrict {
                statefp: s("statefp", &self.statefp)?,
                unsdlea: s("unsdlea", &self.unsdlea)?,
                placens: s("placens", &self.placens)?,
            },
            GeogType::Neighborhood => KindFields::Neighborhood,
            GeogType::StateHouse => KindFields::StateHouse {
                statefp: s("statefp", &self.statefp)?,
                sldlst: s("sldlst", &self.sldlst)?,
            },
            GeogType::StateSenate => KindFields::StateSenate {
                statefp: s("statefp", &self.statefp)?,
                sldust: s("sldust", &self.sldust)?,
            },
            GeogType::Puma => KindFields::Puma {
                statefp: s("statefp", &self.statefp)?,
                pumace: s("pumace", &self.pumace)?,
            },
        })
    }

    fn census_fields<B: GeoBackend>(&self) -> Result<CensusFields<B>> {
        Ok(CensusFields {
            geoid: B::str_from(self.required("geoid", &self.geoid)?),
            affgeoid: B::str_from(self.affgeoid.as_deref().unwrap_or_default()),
            lsad: B::str_from(self.lsad.as_deref().unwrap_or_default()),
            land_area: self.aland.unwrap_or_default(),
            water_area: self.awater.unwrap_or_default(),
        })
    }

    /// Builds the typed draft, resolving `geog_type` through `registry`.
    pub fn into_draft<B: GeoBackend>(self, registry: &RegionTypeRegistry) -> Result<RegionDraft<B>> {
        let descriptor = registry.require(&self.geog_type)?;
        let fields = self.kind_fields::<B>(descriptor.kind)?;
        let census = if descriptor.census {
            Some(self.census_fields::<B>()?)
        } else {
            None
        };

        let geometry = self.geometry.to_multi_polygon()?;
        let geometry_projected = self
            .geometry_projected
            .as_ref()
            .map(GeoJsonGeometry::to_multi_polygon)
            .transpose()?;
        let simplified_geometry = self
            .simplified_geometry
            .as_ref()
            .map(GeoJsonGeometry::to_multi_polygon)
            .transpose()?;

        Ok(RegionDraft {
            name: self.name,
            global_geoid: self.global_geoid,
            slug: self.slug,
            display_name: self.display_name,
            census,
            fields,
            geometry,
            geometry_projected,
            simplified_geometry,
            in_extent: self.in_extent,
            subregions: self.subregions,
        })
    }
}

/// **Source Converter:** Raw -> records, assigning ids in input order where
/// the source left them out.
pub fn from_raw<B: GeoBackend>(
    raw: Vec<RegionRaw>,
    registry: &RegionTypeRegistry,
    engine: &dyn GeometryStore,
) -> Result<Vec<RegionRecord<B>>> {
    let mut next_id = raw.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
    raw.into_iter()
        .map(|r| {
            let id = r.id.unwrap_or_else(|| {
                let id = next_id;
                next_id += 1;
                id
            });
            r.into_draft::<B>(registry)?.build(id, engine)
        })
        .collect()
}
