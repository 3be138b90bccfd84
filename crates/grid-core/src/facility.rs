//! Power-generation facility types.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A power-generation facility from the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    /// Operating utility name.
    pub utility_name: String,
    /// Primary energy source (e.g. "solar", "natural gas").
    pub primary_source: String,
    /// State the facility is located in.
    pub state: String,
    /// Nameplate capacity in megawatts, when known.
    pub capacity_mw: Option<f64>,
    pub longitude: f64,
    pub latitude: f64,
}

impl FacilityRecord {
    /// Identity of this facility for matching purposes.
    ///
    /// The directory exposes no surrogate id, so facilities are identified by
    /// their (utility name, primary source) pair.
    pub fn key(&self) -> FacilityKey {
        FacilityKey {
            utility_name: self.utility_name.clone(),
            primary_source: self.primary_source.clone(),
        }
    }
}

/// Identity pair of a facility.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FacilityKey {
    pub utility_name: String,
    pub primary_source: String,
}

impl fmt::Display for FacilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.utility_name, self.primary_source)
    }
}

// Serialized as a string so it can key JSON maps.
impl Serialize for FacilityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of one facility directory fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityDirectoryResult {
    pub facilities: Vec<FacilityRecord>,
    /// Set when the upstream hit its transfer limit and returned a subset.
    pub truncated: bool,
}

impl FacilityDirectoryResult {
    pub fn new(facilities: Vec<FacilityRecord>, truncated: bool) -> Self {
        Self {
            facilities,
            truncated,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }
}
