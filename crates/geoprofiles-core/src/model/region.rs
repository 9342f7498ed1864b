// crates/geoprofiles-core/src/model/region.rs
use super::census::{CensusFields, CensusGeo, KindFields};
use super::geojson::SimpleFeature;
use super::kind::{GeogType, RegionKindDescriptor, TitleRule};
use crate::error::{GeoError, Result};
use crate::geometry::{Extent, Srid};
use crate::text::slugify;
use crate::traits::{GeoBackend, GeometryStore};
use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `{name, slug, id}` reference to another region.
///
/// Used for overlap results and for the child listings in
/// [`RegionRecord::subregions`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub name: String,
    pub slug: String,
    pub id: u64,
}

/// Child regions grouped by kind, as written by the batch import.
pub type Subregions = BTreeMap<GeogType, Vec<RegionSummary>>;

/// One administrative or census region.
///
/// Records are only produced by [`RegionDraft::build`], which fills every
/// derived field (`geog_type`, `slug`, `display_name`, projected geometry);
/// fields are read-only afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RegionRecord<B: GeoBackend> {
    pub(crate) id: u64,
    pub(crate) geog_type: GeogType,
    pub(crate) global_geoid: B::Str,
    pub(crate) name: B::Str,
    pub(crate) display_name: B::Str,
    pub(crate) slug: B::Str,
    pub(crate) census: Option<CensusFields<B>>,
    pub(crate) fields: KindFields<B>,
    pub(crate) geometry: MultiPolygon<f64>,
    pub(crate) geometry_projected: MultiPolygon<f64>,
    pub(crate) simplified_geometry: Option<MultiPolygon<f64>>,
    pub(crate) in_extent: Option<bool>,
    pub(crate) subregions: Subregions,
}

impl<B: GeoBackend> RegionRecord<B> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn geog_type(&self) -> GeogType {
        self.geog_type
    }

    pub fn descriptor(&self) -> &'static RegionKindDescriptor {
        self.geog_type.descriptor()
    }

    pub fn global_geoid(&self) -> &str {
        self.global_geoid.as_ref()
    }

    /// Alias for [`Self::global_geoid`].
    pub fn geog_id(&self) -> &str {
        self.global_geoid.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_ref()
    }

    /// The formatted title. Always the stored display name, which is never
    /// empty after [`RegionDraft::build`].
    pub fn title(&self) -> &str {
        self.display_name.as_ref()
    }

    pub fn slug(&self) -> &str {
        self.slug.as_ref()
    }

    /// Census geoid; `None` for non-census kinds.
    pub fn geoid(&self) -> Option<&str> {
        self.census.as_ref().map(|c| c.geoid.as_ref())
    }

    pub fn affgeoid(&self) -> Option<&str> {
        self.census.as_ref().map(|c| c.affgeoid.as_ref())
    }

    pub fn lsad(&self) -> Option<&str> {
        self.census.as_ref().map(|c| c.lsad.as_ref())
    }

    pub fn land_area(&self) -> Option<i64> {
        self.census.as_ref().map(|c| c.land_area)
    }

    pub fn water_area(&self) -> Option<i64> {
        self.census.as_ref().map(|c| c.water_area)
    }

    pub fn fields(&self) -> &KindFields<B> {
        &self.fields
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// The geometry in web mercator (EPSG:3857).
    pub fn geometry_projected(&self) -> &MultiPolygon<f64> {
        &self.geometry_projected
    }

    pub fn simplified_geometry(&self) -> Option<&MultiPolygon<f64>> {
        self.simplified_geometry.as_ref()
    }

    /// Whether the region lies in the area of interest; `None` when unknown.
    pub fn in_extent(&self) -> Option<bool> {
        self.in_extent
    }

    pub fn subregions(&self) -> &Subregions {
        &self.subregions
    }

    /// Drill-down listings, coarsest kind first. Kinds outside
    /// [`GeogType::SUBGEOG_ORDER`] and empty listings are skipped.
    pub fn ordered_subregions(&self) -> impl Iterator<Item = (GeogType, &[RegionSummary])> + '_ {
        GeogType::SUBGEOG_ORDER.into_iter().filter_map(move |kind| {
            self.subregions
                .get(&kind)
                .filter(|list| !list.is_empty())
                .map(|list| (kind, list.as_slice()))
        })
    }

    /// `"{geogType}:{globalGeoid}"`.
    pub fn uid(&self) -> String {
        crate::uid::build_uid(self)
    }

    /// `"{geogType}/{globalGeoid}"`, the region's path in profile URLs.
    pub fn geog_path(&self) -> String {
        format!("{}/{}", self.geog_type, self.global_geoid.as_ref())
    }

    /// `[[xmin, ymin], [xmax, ymax]]` of the primary geometry.
    pub fn bbox(&self, engine: &dyn GeometryStore) -> Option<[[f64; 2]; 2]> {
        engine.extent(&self.geometry).map(|e: Extent| e.corners())
    }

    pub fn simple_geojson(&self) -> SimpleFeature {
        SimpleFeature::new(&self.geometry, self.name.as_ref())
    }

    pub fn census_geo(&self) -> Option<CensusGeo> {
        self.fields.census_geo()
    }

    pub fn summary(&self) -> RegionSummary {
        RegionSummary {
            name: self.name.as_ref().to_string(),
            slug: self.slug.as_ref().to_string(),
            id: self.id,
        }
    }
}

/// Input for creating a [`RegionRecord`].
///
/// The kind is taken from `fields`; `slug`, `display_name`, `global_geoid`
/// and `geometry_projected` are derived when left empty.
#[derive(Clone, Debug)]
pub struct RegionDraft<B: GeoBackend> {
    pub name: String,
    pub global_geoid: Option<String>,
    pub slug: Option<String>,
    pub display_name: Option<String>,
    pub census: Option<CensusFields<B>>,
    pub fields: KindFields<B>,
    pub geometry: MultiPolygon<f64>,
    pub geometry_projected: Option<MultiPolygon<f64>>,
    pub simplified_geometry: Option<MultiPolygon<f64>>,
    pub in_extent: Option<bool>,
    pub subregions: Subregions,
}

impl<B: GeoBackend> RegionDraft<B> {
    pub fn new(name: impl Into<String>, fields: KindFields<B>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: name.into(),
            global_geoid: None,
            slug: None,
            display_name: None,
            census: None,
            fields,
            geometry,
            geometry_projected: None,
            simplified_geometry: None,
            in_extent: None,
            subregions: Subregions::new(),
        }
    }

    pub fn with_census(mut self, census: CensusFields<B>) -> Self {
        self.census = Some(census);
        self
    }

    pub fn with_global_geoid(mut self, geoid: impl Into<String>) -> Self {
        self.global_geoid = Some(geoid.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_in_extent(mut self, in_extent: bool) -> Self {
        self.in_extent = Some(in_extent);
        self
    }

    /// Validates the draft and derives every computed field.
    ///
    /// `engine` supplies the web mercator projection when no projected
    /// geometry was given. `id` is the storage-assigned identifier.
    pub fn build(self, id: u64, engine: &dyn GeometryStore) -> Result<RegionRecord<B>> {
        let kind = self.fields.kind();
        let descriptor = kind.descriptor();

        match (&self.census, descriptor.census) {
            (None, true) => {
                return Err(GeoError::InvalidData(format!(
                    "{} {:?} is missing census identifiers",
                    kind, self.name
                )))
            }
            (Some(_), false) => {
                return Err(GeoError::InvalidData(format!(
                    "{} {:?} cannot carry census identifiers",
                    kind, self.name
                )))
            }
            _ => {}
        }

        let global_geoid = match (non_empty(self.global_geoid), &self.census) {
            (Some(g), _) => g,
            (None, Some(census)) => census.geoid.as_ref().to_string(),
            (None, None) => {
                return Err(GeoError::InvalidData(format!(
                    "{} {:?} needs an explicit global geoid",
                    kind, self.name
                )))
            }
        };
        if global_geoid.contains(':') {
            return Err(GeoError::InvalidData(format!(
                "global geoid {global_geoid:?} must not contain ':'"
            )));
        }
        if self.geometry.0.is_empty() {
            return Err(GeoError::InvalidData(format!(
                "{kind}:{global_geoid} has an empty geometry"
            )));
        }

        let slug = non_empty(self.slug)
            .unwrap_or_else(|| slugify(&format!("{}-{}", descriptor.type_title, global_geoid)));

        let geoid = self.census.as_ref().map(|c| c.geoid.as_ref());
        let display_name = non_empty(self.display_name)
            .unwrap_or_else(|| format_title(descriptor.title_rule, &self.name, geoid));

        let geometry_projected = match self.geometry_projected {
            Some(p) => p,
            None => engine.transform(&self.geometry, Srid::WGS84, Srid::WEB_MERCATOR)?,
        };

        Ok(RegionRecord {
            id,
            geog_type: kind,
            global_geoid: B::str_from(&global_geoid),
            name: B::str_from(&self.name),
            display_name: B::str_from(&display_name),
            slug: B::str_from(&slug),
            census: self.census,
            fields: self.fields,
            geometry: self.geometry,
            geometry_projected,
            simplified_geometry: self.simplified_geometry,
            in_extent: self.in_extent,
            subregions: self.subregions,
        })
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

fn format_title(rule: TitleRule, name: &str, geoid: Option<&str>) -> String {
    match rule {
        TitleRule::Name => name.to_string(),
        TitleRule::NameWithSuffix(suffix) => format!("{name} {suffix}"),
        TitleRule::PrefixedGeoid(prefix) => format!("{} {}", prefix, geoid.unwrap_or(name)),
    }
}
