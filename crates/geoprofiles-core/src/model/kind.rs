// crates/geoprofiles-core/src/model/kind.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of region kinds.
///
/// Serializes to the kind's type id (`"blockGroup"`, `"tract"`, ...), which
/// is also the prefix of every uid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeogType {
    BlockGroup,
    Tract,
    CountySubdivision,
    County,
    Zcta,
    SchoolDistrict,
    Neighborhood,
    StateHouse,
    StateSenate,
    Puma,
}

impl GeogType {
    pub const ALL: [GeogType; 10] = [
        GeogType::BlockGroup,
        GeogType::Tract,
        GeogType::CountySubdivision,
        GeogType::County,
        GeogType::Zcta,
        GeogType::SchoolDistrict,
        GeogType::Neighborhood,
        GeogType::StateHouse,
        GeogType::StateSenate,
        GeogType::Puma,
    ];

    /// Kinds that can be drilled into below a county, coarsest first.
    pub const SUBGEOG_ORDER: [GeogType; 3] = [
        GeogType::CountySubdivision,
        GeogType::Tract,
        GeogType::BlockGroup,
    ];

    /// Kinds checked for lateral overlap.
    pub const OVERLAP_CANDIDATES: [GeogType; 4] = [
        GeogType::County,
        GeogType::CountySubdivision,
        GeogType::Neighborhood,
        GeogType::Tract,
    ];

    pub fn type_id(self) -> &'static str {
        self.descriptor().type_id
    }

    pub fn descriptor(self) -> &'static RegionKindDescriptor {
        match self {
            GeogType::BlockGroup => &BLOCK_GROUP,
            GeogType::Tract => &TRACT,
            GeogType::CountySubdivision => &COUNTY_SUBDIVISION,
            GeogType::County => &COUNTY,
            GeogType::Zcta => &ZCTA,
            GeogType::SchoolDistrict => &SCHOOL_DISTRICT,
            GeogType::Neighborhood => &NEIGHBORHOOD,
            GeogType::StateHouse => &STATE_HOUSE,
            GeogType::StateSenate => &STATE_SENATE,
            GeogType::Puma => &PUMA,
        }
    }
}

impl fmt::Display for GeogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_id())
    }
}

/// How a kind formats its display title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRule {
    /// The raw name, unchanged.
    Name,
    /// `"{name} {suffix}"`, e.g. `"Allegheny County"`.
    NameWithSuffix(&'static str),
    /// `"{prefix} {geoid}"`, e.g. `"Tract 42003140100"`.
    PrefixedGeoid(&'static str),
}

/// Static description of one region kind.
///
/// One instance exists per [`GeogType`]; the varying behavior of a kind is
/// carried here as data (title rule, ancestor chain) rather than through a
/// type hierarchy.
#[derive(Debug, PartialEq, Eq)]
pub struct RegionKindDescriptor {
    pub kind: GeogType,
    pub type_id: &'static str,
    pub type_slug: &'static str,
    pub type_title: &'static str,
    pub type_description: &'static str,
    pub base_zoom: u8,
    /// Open-data portal resource holding the boundary file, when published.
    pub ckan_resource: Option<&'static str>,
    /// Census-sourced kinds carry geoid/affgeoid/lsad/area fields.
    pub census: bool,
    pub title_rule: TitleRule,
    /// Enclosing kinds, in the order the hierarchy is reported.
    pub ancestors: &'static [GeogType],
}

const DEFAULT_BASE_ZOOM: u8 = 8;

pub static BLOCK_GROUP: RegionKindDescriptor = RegionKindDescriptor {
    kind: GeogType::BlockGroup,
    type_id: "blockGroup",
    type_slug: "blockgroup",
    type_title: "Block Group",
    type_description: "Smallest geographical unit w/ ACS sample data.",
    base_zoom: 12,
    ckan_resource: Some("b5f5480c-548d-46d8-b623-40a226d87517"),
    census: true,
    title_rule: TitleRule::PrefixedGeoid("Block Group"),
    ancestors: &[GeogType::County, GeogType::Tract],
};

pub static TRACT: RegionKindDescriptor = RegionKindDescriptor {
    kind: GeogType::Tract,
    type_id: "tract",
    type_slug: "tract",
    type_title: "Tract",
    type_description: "Drawn to encompass ~2500-8000 people",
    base_zoom: 10,
    ckan_resource: Some("bb9a7972-981c-4026-8483-df8bdd1801c2"),
    census: true,
    title_rule: TitleRule::PrefixedGeoid("Tract"),
    ancestors: &[GeogType::County],
};

pub static COUNTY_SUBDIVISION: RegionKindDescriptor = RegionKindDescriptor {
    kind: GeogType::CountySubdivision,
    type_id: "countySubdivision",
    type_slug: "county-subdivision",
    type_title: "County Subdivision",
    type_description: "Townships, municipalities, boroughs and cities.",
    base_zoom: 9,
    ckan_resource: Some("8a5fc9dc-5eb9-4fe3-b60a-0366ad9b813b"),
    census: true,
    title_rule: TitleRule::Name,
    ancestors: &[GeogType::County],
};

pub static COUNTY: RegionKindDescriptor = RegionKindDescriptor {
    kind: GeogType::County,
    type_id: "county",
    type_slug: "county",
    type_title: "County",
    type_description: "Largest subdivision of a state.",
    base_zoom: 9,
    ckan_resource: Some("8a5fc9dc-5eb9-4fe3-b60a-0366ad9b813b"),
    census: true,
    title_rule: TitleRule::NameWithSuffix("County"),
    ancestors: &[],
};

pub static ZCTA: RegionKindDescriptor = RegionKindDescriptor {
    kind: GeogType::Zcta,
    type_id: "zcta",
    type_slug: "zip-code",
    type_title: "Zip Code",
    type_description: "The area covered by a postal Zip code.",
    base_zoom: DEFAULT_BASE_ZOOM,
    ckan_resource: None,
    census: true,
    title_rule: TitleRule::Name,
    ancestors: &[],
};

pub static SCHOOL_DISTRICT: RegionKindDescriptor = RegionKindDescriptor {
    kind: GeogType::SchoolDistrict,
    type_id: "schoolDistrict",
    type_slug: "school-district",
    type_title: "School District",
    type_description: "Area served by a School District.",
    base_zoom: DEFAULT_BASE_ZOOM,
    ckan_resource: Some("35e9b048-c9fb-4412-a9d8-a751f975eb2a"),
    census: true,
    title_rule: TitleRule::Name,
    ancestors: &[],
};

pub static NEIGHBORHOOD: RegionKindDescriptor = RegionKindDescriptor {
    kind: GeogType::Neighborhood,
    type_id: "neighborhood",
    type_slug: "neighborhood",
    type_title: "Neighborhood",
    type_description: "Official City of Pittsburgh neighborhood boundaries",
    base_zoom: 12,
    ckan_resource: None,
    census: false,
    title_rule: TitleRule::Name,
    ancestors: &[],
};

pub static STATE_HOUSE: RegionKindDescriptor = RegionKindDescriptor {
    kind: GeogType::StateHouse,
    type_id: "stateHouse",
    type_slug: "state-house",
    type_title: "State House",
    type_description: "State legislative district (lower chamber).",
    base_zoom: DEFAULT_BASE_ZOOM,
    ckan_resource: None,
    census: true,
    title_rule: TitleRule::Name,
    ancestors: &[],
};

pub static STATE_SENATE: RegionKindDescriptor = RegionKindDescriptor {
    kind: GeogType::StateSenate,
    type_id: "stateSenate",
    type_slug: "state-senate",
    type_title: "State Senate",
    type_description: "State legislative district (upper chamber).",
    base_zoom: DEFAULT_BASE_ZOOM,
    ckan_resource: None,
    census: true,
    title_rule: TitleRule::Name,
    ancestors: &[],
};

pub static PUMA: RegionKindDescriptor = RegionKindDescriptor {
    kind: GeogType::Puma,
    type_id: "puma",
    type_slug: "puma",
    type_title: "Puma",
    type_description: "Public Use Microdata Area, ~100,000 people.",
    base_zoom: DEFAULT_BASE_ZOOM,
    ckan_resource: None,
    census: true,
    title_rule: TitleRule::Name,
    ancestors: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_match_their_kind() {
        for kind in GeogType::ALL {
            assert_eq!(kind.descriptor().kind, kind);
        }
    }

    #[test]
    fn serde_uses_type_ids() {
        for kind in GeogType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.type_id()));
        }
    }

    #[test]
    fn ancestors_are_strictly_coarser() {
        assert_eq!(BLOCK_GROUP.ancestors, &[GeogType::County, GeogType::Tract]);
        assert_eq!(TRACT.ancestors, &[GeogType::County]);
        assert!(COUNTY.ancestors.is_empty());
        assert!(NEIGHBORHOOD.ancestors.is_empty());
    }
}
