//! Filter families accepted by the vendors' `TYPE_OF_FILTER` enum.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    #[default]
    All,
    Oil,
    Air,
    Fuel,
    CabinAir,
    SpecialApplications,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::All,
        FilterKind::Oil,
        FilterKind::Air,
        FilterKind::Fuel,
        FilterKind::CabinAir,
        FilterKind::SpecialApplications,
    ];

    /// GraphQL enum literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::All => "ALL_FILTER",
            FilterKind::Oil => "OIL_FILTER",
            FilterKind::Air => "AIR_FILTER",
            FilterKind::Fuel => "FUEL_FILTER",
            FilterKind::CabinAir => "CABIN_AIR_FILTER",
            FilterKind::SpecialApplications => "SPECIAL_APPLICATIONS_FILTER",
        }
    }

    /// Case-insensitive lookup; anything unknown (or absent) means `ALL_FILTER`.
    pub fn normalize(raw: Option<&str>) -> FilterKind {
        let Some(raw) = raw else {
            return FilterKind::All;
        };
        let upper = raw.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == upper)
            .unwrap_or(FilterKind::All)
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FilterKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_known_kinds() {
        assert_eq!(FilterKind::normalize(Some("oil_filter")), FilterKind::Oil);
        assert_eq!(FilterKind::normalize(Some("Cabin_Air_Filter")), FilterKind::CabinAir);
        assert_eq!(
            FilterKind::normalize(Some("SPECIAL_APPLICATIONS_FILTER")),
            FilterKind::SpecialApplications
        );
    }

    #[test]
    fn test_normalize_falls_back_to_all() {
        assert_eq!(FilterKind::normalize(None), FilterKind::All);
        assert_eq!(FilterKind::normalize(Some("")), FilterKind::All);
        assert_eq!(FilterKind::normalize(Some("WATER_FILTER")), FilterKind::All);
        assert_eq!(FilterKind::normalize(Some(" oil_filter")), FilterKind::All);
    }

    #[test]
    fn test_serializes_as_literal() {
        assert_eq!(serde_json::to_string(&FilterKind::Fuel).unwrap(), "\"FUEL_FILTER\"");
    }
}
