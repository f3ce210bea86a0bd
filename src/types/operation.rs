//! Operation catalogue and the request/response unions used by the generic call path.

use super::finance::{FinanceStatisticsRequest, FinanceTotalRequest, UsageStatistics, UsageTotals};
use super::region::{
    RegionCheckRequest, RegionCheckResult, RegionLookupRequest, RegionLookupResult,
};
use super::wordstat::{
    DeepRequest, DeepResult, FrequencyRequest, FrequencyResult, HistoryRequest, HistoryResult,
};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Every remote operation the client exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    WordstatFrequency,
    WordstatDeep,
    WordstatHistory,
    RegionYandex,
    RegionGoogle,
    RegionCheck,
    FinanceTotal,
    FinanceStatistics,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::WordstatFrequency,
        Operation::WordstatDeep,
        Operation::WordstatHistory,
        Operation::RegionYandex,
        Operation::RegionGoogle,
        Operation::RegionCheck,
        Operation::FinanceTotal,
        Operation::FinanceStatistics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::WordstatFrequency => "wordstat_frequency",
            Operation::WordstatDeep => "wordstat_deep",
            Operation::WordstatHistory => "wordstat_history",
            Operation::RegionYandex => "region_yandex",
            Operation::RegionGoogle => "region_google",
            Operation::RegionCheck => "region_check",
            Operation::FinanceTotal => "finance_total",
            Operation::FinanceStatistics => "finance_statistics",
        }
    }

    /// Parameter names accepted by [`OperationParams`] for this operation.
    pub fn accepted_params(&self) -> &'static [&'static str] {
        match self {
            Operation::WordstatFrequency => &["query", "region", "device", "task_type", "syntax"],
            Operation::WordstatDeep => &["query", "region", "device", "task_type"],
            Operation::WordstatHistory => &[
                "query",
                "region",
                "device",
                "grouping",
                "start_date",
                "end_date",
            ],
            Operation::RegionYandex | Operation::RegionGoogle => &["query"],
            Operation::RegionCheck => &["code", "search_system", "search_type"],
            Operation::FinanceTotal => &["service"],
            Operation::FinanceStatistics => &["service_type", "start_date", "end_date"],
        }
    }

    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            Operation::WordstatFrequency
            | Operation::WordstatDeep
            | Operation::WordstatHistory
            | Operation::RegionYandex
            | Operation::RegionGoogle => &["query"],
            Operation::RegionCheck => &["code", "search_system", "search_type"],
            Operation::FinanceTotal | Operation::FinanceStatistics => &[],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| {
                Error::invalid_field("operation", format!("unknown operation '{}'", s.trim()))
            })
    }
}

/// Named string parameters for an operation, as a CLI or config file supplies them.
///
/// Keys are normalized to snake_case (`task-type` becomes `task_type`). Names an
/// operation does not accept are rejected by the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationParams {
    values: BTreeMap<String, String>,
}

impl OperationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.values.insert(normalize_key(key.as_ref()), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for OperationParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = OperationParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .trim_start_matches("--")
        .to_ascii_lowercase()
        .replace('-', "_")
}

/// Any operation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ApiRequest {
    WordstatFrequency(FrequencyRequest),
    WordstatDeep(DeepRequest),
    WordstatHistory(HistoryRequest),
    RegionLookup(RegionLookupRequest),
    RegionCheck(RegionCheckRequest),
    FinanceTotal(FinanceTotalRequest),
    FinanceStatistics(FinanceStatisticsRequest),
}

impl ApiRequest {
    pub fn operation(&self) -> Operation {
        match self {
            ApiRequest::WordstatFrequency(_) => Operation::WordstatFrequency,
            ApiRequest::WordstatDeep(_) => Operation::WordstatDeep,
            ApiRequest::WordstatHistory(_) => Operation::WordstatHistory,
            ApiRequest::RegionLookup(r) => r.operation(),
            ApiRequest::RegionCheck(_) => Operation::RegionCheck,
            ApiRequest::FinanceTotal(_) => Operation::FinanceTotal,
            ApiRequest::FinanceStatistics(_) => Operation::FinanceStatistics,
        }
    }
}

impl From<FrequencyRequest> for ApiRequest {
    fn from(r: FrequencyRequest) -> Self {
        ApiRequest::WordstatFrequency(r)
    }
}

impl From<DeepRequest> for ApiRequest {
    fn from(r: DeepRequest) -> Self {
        ApiRequest::WordstatDeep(r)
    }
}

impl From<HistoryRequest> for ApiRequest {
    fn from(r: HistoryRequest) -> Self {
        ApiRequest::WordstatHistory(r)
    }
}

impl From<RegionLookupRequest> for ApiRequest {
    fn from(r: RegionLookupRequest) -> Self {
        ApiRequest::RegionLookup(r)
    }
}

impl From<RegionCheckRequest> for ApiRequest {
    fn from(r: RegionCheckRequest) -> Self {
        ApiRequest::RegionCheck(r)
    }
}

impl From<FinanceTotalRequest> for ApiRequest {
    fn from(r: FinanceTotalRequest) -> Self {
        ApiRequest::FinanceTotal(r)
    }
}

impl From<FinanceStatisticsRequest> for ApiRequest {
    fn from(r: FinanceStatisticsRequest) -> Self {
        ApiRequest::FinanceStatistics(r)
    }
}

/// Typed result of any operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ApiResponse {
    WordstatFrequency(FrequencyResult),
    WordstatDeep(DeepResult),
    WordstatHistory(HistoryResult),
    RegionLookup(RegionLookupResult),
    RegionCheck(RegionCheckResult),
    FinanceTotal(UsageTotals),
    FinanceStatistics(UsageStatistics),
}

impl ApiResponse {
    pub fn operation(&self) -> Operation {
        match self {
            ApiResponse::WordstatFrequency(_) => Operation::WordstatFrequency,
            ApiResponse::WordstatDeep(_) => Operation::WordstatDeep,
            ApiResponse::WordstatHistory(_) => Operation::WordstatHistory,
            ApiResponse::RegionLookup(r) => r.request.operation(),
            ApiResponse::RegionCheck(_) => Operation::RegionCheck,
            ApiResponse::FinanceTotal(_) => Operation::FinanceTotal,
            ApiResponse::FinanceStatistics(_) => Operation::FinanceStatistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
        assert_eq!(
            "region-check".parse::<Operation>().unwrap(),
            Operation::RegionCheck
        );
        assert_eq!(
            "ranking".parse::<Operation>().unwrap_err().field(),
            Some("operation")
        );
    }

    #[test]
    fn test_required_params_are_accepted() {
        for op in Operation::ALL {
            for p in op.required_params() {
                assert!(op.accepted_params().contains(p), "{op}: {p}");
            }
        }
    }

    #[test]
    fn test_params_normalize_keys() {
        let params: OperationParams =
            [("--task-type", "Direct"), ("Query", "КиШ")].into_iter().collect();
        assert_eq!(params.get("task_type"), Some("Direct"));
        assert_eq!(params.get("query"), Some("КиШ"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_region_lookup_operation_follows_search_system() {
        let req: ApiRequest = RegionLookupRequest::google("Moscow").into();
        assert_eq!(req.operation(), Operation::RegionGoogle);
    }
}
