//! Account usage (billing) statistics.

use super::dates::DateRange;
use super::options::ServiceType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Total number of billed requests, optionally for one service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceTotalRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceType>,
}

impl FinanceTotalRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service(mut self, service: ServiceType) -> Self {
        self.service = Some(service);
        self
    }
}

/// Billed requests over a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceStatisticsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    #[serde(flatten)]
    pub dates: DateRange,
}

impl FinanceStatisticsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = Some(service_type);
        self
    }

    pub fn start_date(mut self, start: NaiveDate) -> Self {
        self.dates.start = Some(start);
        self
    }

    pub fn end_date(mut self, end: NaiveDate) -> Self {
        self.dates.end = Some(end);
        self
    }

    pub fn dates(mut self, dates: DateRange) -> Self {
        self.dates = dates;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageTotals {
    pub request: FinanceTotalRequest,
    pub request_count: u64,
}

/// Request count for one day of a statistics period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageBucket {
    pub date: Option<String>,
    pub request_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageStatistics {
    pub request: FinanceStatisticsRequest,
    pub request_count: u64,
    /// Per-date breakdown when the service returns one; otherwise empty.
    pub by_date: Vec<UsageBucket>,
}
