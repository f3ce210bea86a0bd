//! Region lookup and region check types.

use super::operation::Operation;
use super::options::{RegionSearchType, SearchSystem};
use serde::{Deserialize, Serialize};

/// Search region codes of one search system by free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLookupRequest {
    pub search_system: SearchSystem,
    pub query: String,
}

impl RegionLookupRequest {
    pub fn yandex(query: impl Into<String>) -> Self {
        Self {
            search_system: SearchSystem::Yandex,
            query: query.into(),
        }
    }

    pub fn google(query: impl Into<String>) -> Self {
        Self {
            search_system: SearchSystem::Google,
            query: query.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        match self.search_system {
            SearchSystem::Yandex => Operation::RegionYandex,
            SearchSystem::Google => Operation::RegionGoogle,
        }
    }
}

/// Check whether a region code or name is known to a search system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCheckRequest {
    pub code: String,
    pub search_system: SearchSystem,
    pub search_type: RegionSearchType,
}

impl RegionCheckRequest {
    pub fn new(
        code: impl Into<String>,
        search_system: SearchSystem,
        search_type: RegionSearchType,
    ) -> Self {
        Self {
            code: code.into(),
            search_system,
            search_type,
        }
    }
}

/// A region known to the service. The code is opaque and passed through as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionMatch {
    pub name: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionLookupResult {
    pub request: RegionLookupRequest,
    /// Upstream order; may be empty.
    pub regions: Vec<RegionMatch>,
}

impl RegionLookupResult {
    pub fn first(&self) -> Option<&RegionMatch> {
        self.regions.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCheckResult {
    pub request: RegionCheckRequest,
    pub matches: Vec<RegionMatch>,
}

impl RegionCheckResult {
    pub fn is_recognized(&self) -> bool {
        !self.matches.is_empty()
    }
}
