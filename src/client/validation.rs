//! 请求校验：命名参数转为类型化请求，再转为可发送的请求。
//!
//! Request validation: named parameters to typed requests, typed requests to
//! wire-ready [`PreparedRequest`]s.
//!
//! Everything here runs before the transport is touched, so a failure never
//! costs a network call.

use super::endpoint::resolve_endpoint;
use crate::transport::PreparedRequest;
use crate::types::{
    ApiRequest, DateRange, DeepRequest, Device, FinanceStatisticsRequest, FinanceTotalRequest,
    FrequencyRequest, HistoryRequest, Operation, OperationParams, OptionSet,
    RegionCheckRequest, RegionLookupRequest, TaskType,
};
use crate::{Error, ErrorContext, Result};
use serde::Serialize;

/// Upper bound on Wordstat history query length, in characters.
pub const MAX_HISTORY_QUERY_CHARS: usize = 3000;
/// Upper bound on region search text and region check codes, in characters.
pub const MAX_REGION_QUERY_CHARS: usize = 500;

fn check_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_field(field, "must not be empty"));
    }
    Ok(())
}

fn check_text(field: &str, value: &str, max_chars: usize) -> Result<()> {
    check_not_blank(field, value)?;
    let len = value.chars().count();
    if len > max_chars {
        return Err(Error::invalid_field(
            field,
            format!("must be at most {} characters, got {}", max_chars, len),
        ));
    }
    Ok(())
}

fn check_region(region: Option<&str>) -> Result<()> {
    match region {
        Some(r) if r.trim().is_empty() => Err(Error::invalid_field(
            "region",
            "must not be empty when given; omit it to query all regions",
        )),
        _ => Ok(()),
    }
}

/// Direct data has no per-device breakdown.
fn check_device_for_task(device: Device, task_type: TaskType) -> Result<()> {
    if task_type == TaskType::Direct && device != Device::All {
        return Err(Error::invalid_field(
            "device",
            format!(
                "device {} is not supported with task_type Direct; use All",
                device
            ),
        ));
    }
    Ok(())
}

fn check_dates(dates: &DateRange) -> Result<()> {
    if let (Some(start), Some(end)) = (dates.start, dates.end) {
        if start > end {
            return Err(Error::validation_with_context(
                format!("start_date {} is after end_date {}", start, end),
                ErrorContext::new()
                    .with_field_path("start_date")
                    .with_details("date ranges are inclusive and need start <= end")
                    .with_source("request_validator"),
            ));
        }
    }
    Ok(())
}

pub fn validate_frequency(r: &FrequencyRequest) -> Result<()> {
    check_not_blank("query", &r.query)?;
    check_region(r.region.as_deref())?;
    check_device_for_task(r.device, r.task_type)
}

pub fn validate_deep(r: &DeepRequest) -> Result<()> {
    check_not_blank("query", &r.query)?;
    check_region(r.region.as_deref())?;
    check_device_for_task(r.device, r.task_type)
}

pub fn validate_history(r: &HistoryRequest) -> Result<()> {
    check_text("query", &r.query, MAX_HISTORY_QUERY_CHARS)?;
    check_region(r.region.as_deref())?;
    check_dates(&r.dates)
}

pub fn validate_region_lookup(r: &RegionLookupRequest) -> Result<()> {
    check_text("query", &r.query, MAX_REGION_QUERY_CHARS)
}

pub fn validate_region_check(r: &RegionCheckRequest) -> Result<()> {
    check_text("code", &r.code, MAX_REGION_QUERY_CHARS)
}

pub fn validate_finance_statistics(r: &FinanceStatisticsRequest) -> Result<()> {
    check_dates(&r.dates)
}

fn with_json_body<T: Serialize>(operation: Operation, request: &T) -> Result<PreparedRequest> {
    let body = serde_json::to_value(request).map_err(|e| {
        Error::validation_with_context(
            format!("request could not be encoded: {}", e),
            ErrorContext::new().with_source("request_encoder"),
        )
    })?;
    let endpoint = resolve_endpoint(operation);
    Ok(PreparedRequest {
        operation,
        method: endpoint.method,
        path: endpoint.path,
        query: Vec::new(),
        body: Some(body),
    })
}

fn with_query(operation: Operation, query: Vec<(String, String)>) -> PreparedRequest {
    let endpoint = resolve_endpoint(operation);
    PreparedRequest {
        operation,
        method: endpoint.method,
        path: endpoint.path,
        query,
        body: None,
    }
}

pub fn prepare_frequency(r: &FrequencyRequest) -> Result<PreparedRequest> {
    validate_frequency(r)?;
    with_json_body(Operation::WordstatFrequency, r)
}

pub fn prepare_deep(r: &DeepRequest) -> Result<PreparedRequest> {
    validate_deep(r)?;
    with_json_body(Operation::WordstatDeep, r)
}

pub fn prepare_history(r: &HistoryRequest) -> Result<PreparedRequest> {
    validate_history(r)?;
    with_json_body(Operation::WordstatHistory, r)
}

pub fn prepare_region_lookup(r: &RegionLookupRequest) -> Result<PreparedRequest> {
    validate_region_lookup(r)?;
    Ok(with_query(
        r.operation(),
        vec![("query".to_string(), r.query.clone())],
    ))
}

pub fn prepare_region_check(r: &RegionCheckRequest) -> Result<PreparedRequest> {
    validate_region_check(r)?;
    Ok(with_query(
        Operation::RegionCheck,
        vec![
            ("code".to_string(), r.code.clone()),
            ("searchSystem".to_string(), r.search_system.as_str().to_string()),
            ("searchType".to_string(), r.search_type.as_str().to_string()),
        ],
    ))
}

pub fn prepare_finance_total(r: &FinanceTotalRequest) -> Result<PreparedRequest> {
    let query = r
        .service
        .map(|s| vec![("service".to_string(), s.as_str().to_string())])
        .unwrap_or_default();
    Ok(with_query(Operation::FinanceTotal, query))
}

pub fn prepare_finance_statistics(r: &FinanceStatisticsRequest) -> Result<PreparedRequest> {
    validate_finance_statistics(r)?;
    with_json_body(Operation::FinanceStatistics, r)
}

/// Validate any request and resolve it to its endpoint.
pub fn prepare(request: &ApiRequest) -> Result<PreparedRequest> {
    match request {
        ApiRequest::WordstatFrequency(r) => prepare_frequency(r),
        ApiRequest::WordstatDeep(r) => prepare_deep(r),
        ApiRequest::WordstatHistory(r) => prepare_history(r),
        ApiRequest::RegionLookup(r) => prepare_region_lookup(r),
        ApiRequest::RegionCheck(r) => prepare_region_check(r),
        ApiRequest::FinanceTotal(r) => prepare_finance_total(r),
        ApiRequest::FinanceStatistics(r) => prepare_finance_statistics(r),
    }
}

fn required(params: &OperationParams, key: &str) -> Result<String> {
    params
        .get(key)
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_field(key, "required parameter is missing"))
}

fn optional_option<T: OptionSet>(params: &OperationParams, key: &str) -> Result<Option<T>> {
    params.get(key).map(|raw| T::parse_field(raw, key)).transpose()
}

fn option_or_default<T: OptionSet + Default>(params: &OperationParams, key: &str) -> Result<T> {
    Ok(optional_option(params, key)?.unwrap_or_default())
}

fn required_option<T: OptionSet>(params: &OperationParams, key: &str) -> Result<T> {
    T::parse_field(&required(params, key)?, key)
}

fn date_range(params: &OperationParams) -> Result<DateRange> {
    DateRange::parse(params.get("start_date"), params.get("end_date"))
}

/// Build a typed request from named string parameters.
///
/// Unknown parameter names are rejected, absent option parameters take their
/// documented default. The result still goes through [`prepare`] before dispatch.
pub fn parse_params(operation: Operation, params: &OperationParams) -> Result<ApiRequest> {
    let accepted = operation.accepted_params();
    if let Some(unknown) = params.keys().find(|k| !accepted.iter().any(|a| a == k)) {
        return Err(Error::invalid_field(
            unknown,
            format!(
                "{} does not accept parameter '{}' (accepted: {})",
                operation,
                unknown,
                accepted.join(", ")
            ),
        ));
    }

    let region = params.get("region").map(str::to_string);

    let request = match operation {
        Operation::WordstatFrequency => ApiRequest::WordstatFrequency(FrequencyRequest {
            query: required(params, "query")?,
            region,
            device: option_or_default(params, "device")?,
            task_type: option_or_default(params, "task_type")?,
            syntax: option_or_default(params, "syntax")?,
        }),
        Operation::WordstatDeep => ApiRequest::WordstatDeep(DeepRequest {
            query: required(params, "query")?,
            region,
            device: option_or_default(params, "device")?,
            task_type: option_or_default(params, "task_type")?,
        }),
        Operation::WordstatHistory => ApiRequest::WordstatHistory(HistoryRequest {
            query: required(params, "query")?,
            region,
            device: option_or_default(params, "device")?,
            grouping: option_or_default(params, "grouping")?,
            dates: date_range(params)?,
        }),
        Operation::RegionYandex => {
            ApiRequest::RegionLookup(RegionLookupRequest::yandex(required(params, "query")?))
        }
        Operation::RegionGoogle => {
            ApiRequest::RegionLookup(RegionLookupRequest::google(required(params, "query")?))
        }
        Operation::RegionCheck => ApiRequest::RegionCheck(RegionCheckRequest {
            code: required(params, "code")?,
            search_system: required_option(params, "search_system")?,
            search_type: required_option(params, "search_type")?,
        }),
        Operation::FinanceTotal => ApiRequest::FinanceTotal(FinanceTotalRequest {
            service: optional_option(params, "service")?,
        }),
        Operation::FinanceStatistics => ApiRequest::FinanceStatistics(FinanceStatisticsRequest {
            service_type: optional_option(params, "service_type")?,
            dates: date_range(params)?,
        }),
    };

    Ok(request)
}
