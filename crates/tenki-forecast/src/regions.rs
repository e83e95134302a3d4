//! The fixed set of regions a forecast can be requested for.
//!
//! Ids are the service's city codes and are passed through verbatim.

/// A region the user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// Service-defined city code, e.g. `"130010"`.
    pub id: &'static str,
    pub display_name: &'static str,
    /// Name as written locally, e.g. `"東京"`.
    pub local_name: &'static str,
}

/// All selectable regions, north to south.
pub const REGIONS: [Region; 11] = [
    Region { id: "016010", display_name: "Sapporo", local_name: "札幌" },
    Region { id: "040010", display_name: "Sendai", local_name: "仙台" },
    Region { id: "150010", display_name: "Niigata", local_name: "新潟" },
    Region { id: "170010", display_name: "Kanazawa", local_name: "金沢" },
    Region { id: "130010", display_name: "Tokyo", local_name: "東京" },
    Region { id: "230010", display_name: "Nagoya", local_name: "名古屋" },
    Region { id: "270000", display_name: "Osaka", local_name: "大阪" },
    Region { id: "340010", display_name: "Hiroshima", local_name: "広島" },
    Region { id: "390010", display_name: "Kochi", local_name: "高知" },
    Region { id: "400010", display_name: "Fukuoka", local_name: "福岡" },
    Region { id: "471010", display_name: "Naha", local_name: "那覇" },
];

/// Look up a region by its id.
pub fn find(id: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.id == id)
}

/// Look up a region by its 1-based menu position.
pub fn by_index(position: usize) -> Option<&'static Region> {
    position.checked_sub(1).and_then(|i| REGIONS.get(i))
}

/// Display name for an id, falling back to the id itself for unknown codes.
pub fn label(id: &str) -> &str {
    find(id).map(|r| r.display_name).unwrap_or(id)
}
