//! 客户端核心：SerpProClient 及每个操作的类型化调用入口。
//!
//! Client core: [`SerpProClient`] and one typed method per operation.

use super::builder::SerpProClientBuilder;
use super::{mapping, validation};
use crate::transport::{PreparedRequest, Transport};
use crate::types::{
    ApiRequest, ApiResponse, DeepRequest, DeepResult, FinanceStatisticsRequest,
    FinanceTotalRequest, FrequencyRequest, FrequencyResult, HistoryRequest, HistoryResult,
    Operation, OperationParams, RegionCheckRequest, RegionCheckResult, RegionLookupRequest,
    RegionLookupResult, ServiceType, UsageStatistics, UsageTotals,
};
use crate::Result;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Typed client for the SerpPro API.
///
/// Cloning is cheap and clones share the connection pool. Every operation
/// validates locally first; an invalid request never reaches the transport.
#[derive(Clone)]
pub struct SerpProClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) verify_ssl: bool,
}

impl fmt::Debug for SerpProClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerpProClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("verify_ssl", &self.verify_ssl)
            .finish_non_exhaustive()
    }
}

fn checked(operation: Operation, prepared: Result<PreparedRequest>) -> Result<PreparedRequest> {
    prepared.map_err(|e| {
        debug!(operation = operation.name(), error = %e, "request rejected before dispatch");
        e
    })
}

impl SerpProClient {
    /// Client with default settings and the given key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        SerpProClientBuilder::new().api_key(api_key).build()
    }

    /// Client configured from the `SERPPRO_*` environment.
    pub fn from_env() -> Result<Self> {
        SerpProClientBuilder::from_env()?.build()
    }

    pub fn builder() -> SerpProClientBuilder {
        SerpProClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout applied by the HTTP transport.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Monthly-or-so search volume of one phrase.
    pub async fn wordstat_frequency(&self, request: FrequencyRequest) -> Result<FrequencyResult> {
        let prepared = checked(
            Operation::WordstatFrequency,
            validation::prepare_frequency(&request),
        )?;
        let payload = self.dispatch(prepared).await?;
        mapping::frequency(request, &payload)
    }

    /// Associated and popular phrases around a query.
    pub async fn wordstat_deep(&self, request: DeepRequest) -> Result<DeepResult> {
        let prepared = checked(Operation::WordstatDeep, validation::prepare_deep(&request))?;
        let payload = self.dispatch(prepared).await?;
        mapping::deep(request, &payload)
    }

    /// Frequency over time, bucketed by the request's grouping.
    pub async fn wordstat_history(&self, request: HistoryRequest) -> Result<HistoryResult> {
        let prepared = checked(
            Operation::WordstatHistory,
            validation::prepare_history(&request),
        )?;
        let payload = self.dispatch(prepared).await?;
        mapping::history(request, &payload)
    }

    pub async fn region_yandex(&self, query: impl Into<String>) -> Result<RegionLookupResult> {
        self.region_lookup(RegionLookupRequest::yandex(query)).await
    }

    pub async fn region_google(&self, query: impl Into<String>) -> Result<RegionLookupResult> {
        self.region_lookup(RegionLookupRequest::google(query)).await
    }

    pub async fn region_lookup(&self, request: RegionLookupRequest) -> Result<RegionLookupResult> {
        let prepared = checked(
            request.operation(),
            validation::prepare_region_lookup(&request),
        )?;
        let payload = self.dispatch(prepared).await?;
        mapping::region_lookup(request, &payload)
    }

    pub async fn region_check(&self, request: RegionCheckRequest) -> Result<RegionCheckResult> {
        let prepared = checked(
            Operation::RegionCheck,
            validation::prepare_region_check(&request),
        )?;
        let payload = self.dispatch(prepared).await?;
        mapping::region_check(request, &payload)
    }

    /// Total requests billed, optionally for one service only.
    pub async fn finance_total(&self, service: Option<ServiceType>) -> Result<UsageTotals> {
        let request = FinanceTotalRequest { service };
        let prepared = checked(
            Operation::FinanceTotal,
            validation::prepare_finance_total(&request),
        )?;
        let payload = self.dispatch(prepared).await?;
        mapping::finance_total(request, &payload)
    }

    pub async fn finance_statistics(
        &self,
        request: FinanceStatisticsRequest,
    ) -> Result<UsageStatistics> {
        let prepared = checked(
            Operation::FinanceStatistics,
            validation::prepare_finance_statistics(&request),
        )?;
        let payload = self.dispatch(prepared).await?;
        mapping::finance_statistics(request, &payload)
    }

    /// Run any operation request and return its typed result.
    pub async fn execute(&self, request: impl Into<ApiRequest>) -> Result<ApiResponse> {
        Ok(match request.into() {
            ApiRequest::WordstatFrequency(r) => {
                ApiResponse::WordstatFrequency(self.wordstat_frequency(r).await?)
            }
            ApiRequest::WordstatDeep(r) => ApiResponse::WordstatDeep(self.wordstat_deep(r).await?),
            ApiRequest::WordstatHistory(r) => {
                ApiResponse::WordstatHistory(self.wordstat_history(r).await?)
            }
            ApiRequest::RegionLookup(r) => ApiResponse::RegionLookup(self.region_lookup(r).await?),
            ApiRequest::RegionCheck(r) => ApiResponse::RegionCheck(self.region_check(r).await?),
            ApiRequest::FinanceTotal(r) => {
                ApiResponse::FinanceTotal(self.finance_total(r.service).await?)
            }
            ApiRequest::FinanceStatistics(r) => {
                ApiResponse::FinanceStatistics(self.finance_statistics(r).await?)
            }
        })
    }

    /// Run an operation from loosely typed name/value parameters, as a CLI
    /// or config file would supply them. Parameters are validated the same way
    /// as typed requests, and unknown names are rejected.
    pub async fn execute_params(
        &self,
        operation: Operation,
        params: &OperationParams,
    ) -> Result<ApiResponse> {
        let request = validation::parse_params(operation, params).map_err(|e| {
            debug!(operation = operation.name(), error = %e, "parameters rejected");
            e
        })?;
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_key() {
        let client = SerpProClient::builder()
            .api_key("very-secret")
            .build()
            .unwrap();
        let printed = format!("{:?}", client);
        assert!(printed.contains("moab-apis.ru"));
        assert!(!printed.contains("very-secret"));
    }

    struct NoNetwork;

    #[async_trait::async_trait]
    impl Transport for NoNetwork {
        async fn send(
            &self,
            request: &PreparedRequest,
            _request_id: &str,
        ) -> Result<crate::transport::RawResponse> {
            panic!("unexpected dispatch of {}", request.operation);
        }
    }

    #[test]
    fn test_invalid_request_skips_transport() {
        let client = SerpProClient::builder()
            .api_key("k")
            .transport(Arc::new(NoNetwork))
            .build()
            .unwrap();
        let err = tokio_test::block_on(client.wordstat_deep(DeepRequest::new(""))).unwrap_err();
        assert_eq!(err.field(), Some("query"));
    }

    #[test]
    fn test_new_rejects_blank_key() {
        let err = SerpProClient::new("   ").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Configuration);
    }
}
