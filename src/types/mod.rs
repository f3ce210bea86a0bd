//! 类型系统模块：定义 SerpPro 各操作的请求、结果与选项集合。
//!
//! # Types Module
//!
//! Strongly-typed requests, results and option sets for every SerpPro operation.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FrequencyRequest`] / [`FrequencyResult`] | Wordstat frequency of one query |
//! | [`DeepRequest`] / [`DeepResult`] | Associated and popular query variants |
//! | [`HistoryRequest`] / [`HistoryResult`] | Frequency over time |
//! | [`RegionLookupRequest`] / [`RegionLookupResult`] | Region codes by free text |
//! | [`RegionCheckRequest`] / [`RegionCheckResult`] | Region code/name verification |
//! | [`FinanceTotalRequest`] / [`UsageTotals`] | Billed request totals |
//! | [`FinanceStatisticsRequest`] / [`UsageStatistics`] | Billed requests over a period |
//! | [`ApiRequest`] / [`ApiResponse`] | Unions over all operations |
//!
//! ## Submodules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`options`] | Closed option sets (device, syntax, grouping, ...) |
//! | [`dates`] | Date-only ranges |
//! | [`wordstat`] | Wordstat requests and results |
//! | [`region`] | Region requests and results |
//! | [`finance`] | Usage statistics requests and results |
//! | [`operation`] | Operation catalogue and named parameters |
//!
//! ## Example
//!
//! ```rust
//! use serppro_client::types::{Device, FrequencyRequest, Syntax, TaskType};
//!
//! let request = FrequencyRequest::new("Король и Шут")
//!     .region("225")
//!     .device(Device::All)
//!     .task_type(TaskType::Regular)
//!     .syntax(Syntax::Ws);
//! assert_eq!(request.region.as_deref(), Some("225"));
//! ```

pub mod dates;
pub mod finance;
pub mod operation;
pub mod options;
pub mod region;
pub mod wordstat;

pub use dates::DateRange;
pub use finance::{
    FinanceStatisticsRequest, FinanceTotalRequest, UsageBucket, UsageStatistics, UsageTotals,
};
pub use operation::{ApiRequest, ApiResponse, Operation, OperationParams};
pub use options::{
    Device, Grouping, OptionSet, RegionSearchType, SearchSystem, ServiceType, Syntax, TaskType,
};
pub use region::{
    RegionCheckRequest, RegionCheckResult, RegionLookupRequest, RegionLookupResult, RegionMatch,
};
pub use wordstat::{
    DeepItem, DeepRequest, DeepResult, FrequencyRequest, FrequencyResult, HistoryItem,
    HistoryRequest, HistoryResult,
};
