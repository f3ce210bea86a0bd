//! Wordstat requests and results: frequency, deep and history.

use super::dates::DateRange;
use super::options::{Device, Grouping, Syntax, TaskType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Frequency of a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRequest {
    pub query: String,
    /// Comma-separated region codes, e.g. `"225"` or `"225,213"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub device: Device,
    #[serde(default)]
    pub task_type: TaskType,
    #[serde(default)]
    pub syntax: Syntax,
}

impl FrequencyRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            region: None,
            device: Device::default(),
            task_type: TaskType::default(),
            syntax: Syntax::default(),
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    pub fn syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyResult {
    pub request: FrequencyRequest,
    pub frequency: u64,
}

/// Associated and popular variants of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub device: Device,
    #[serde(default)]
    pub task_type: TaskType,
}

impl DeepRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            region: None,
            device: Device::default(),
            task_type: TaskType::default(),
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }
}

/// One related query with its frequency.
///
/// Both fields may be absent upstream. The frequency is kept as the text the
/// service sent; [`frequency_count`](Self::frequency_count) reads it as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeepItem {
    pub phrase: Option<String>,
    pub frequency: Option<String>,
}

impl DeepItem {
    /// Frequency as an integer, ignoring digit-group separators (`"1 234"`).
    /// `None` when absent or not a plain count.
    pub fn frequency_count(&self) -> Option<u64> {
        let digits: String = self
            .frequency
            .as_deref()?
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '\'' | '_'))
            .collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeepResult {
    pub request: DeepRequest,
    /// Queries searched together with the original one, upstream order.
    pub associations: Vec<DeepItem>,
    /// Popular queries containing the original one, upstream order.
    pub popular: Vec<DeepItem>,
}

/// Frequency over time, bucketed by [`Grouping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub device: Device,
    #[serde(default)]
    pub grouping: Grouping,
    #[serde(flatten)]
    pub dates: DateRange,
}

impl HistoryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            region: None,
            device: Device::default(),
            grouping: Grouping::default(),
            dates: DateRange::default(),
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
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

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItem {
    /// Bucket label as returned by the service (bucket start date).
    pub date: Option<String>,
    pub frequency: Option<u64>,
    /// Share of all queries in the bucket, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_requests_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryResult {
    pub request: HistoryRequest,
    /// Chronological, as returned.
    pub items: Vec<HistoryItem>,
}

impl HistoryResult {
    pub fn total_frequency(&self) -> u64 {
        self.items
            .iter()
            .filter_map(|i| i.frequency)
            .fold(0u64, u64::saturating_add)
    }
}
