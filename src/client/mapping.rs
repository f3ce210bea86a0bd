//! 响应映射：将成功的响应体转换为类型化结果。
//!
//! Response mapping: successful payloads to typed results.
//!
//! Only the shape of a payload is enforced: a body of the wrong JSON type, a
//! missing top-level `frequency`, or a field holding the wrong kind of value is
//! an [`Error::Mapping`]. Fields inside list items are optional, and absent or
//! `null` values map to `None`, so one incomplete item never discards the rest.
//! Lists that are absent or `null` map to empty sequences; sequence order is
//! always the upstream order. A missing `request_count` reads as 0.

use crate::types::{
    DeepItem, DeepRequest, DeepResult, FinanceStatisticsRequest, FinanceTotalRequest,
    FrequencyRequest, FrequencyResult, HistoryItem, HistoryRequest, HistoryResult, Operation,
    RegionCheckRequest, RegionCheckResult, RegionLookupRequest, RegionLookupResult, RegionMatch,
    UsageBucket, UsageStatistics, UsageTotals,
};
use crate::{Error, ErrorContext, Result};
use serde_json::Value;

fn mapping_error(operation: Operation, path: &str, msg: impl Into<String>) -> Error {
    Error::mapping_with_context(
        operation.name(),
        msg,
        ErrorContext::new()
            .with_field_path(path)
            .with_source("response_mapper"),
    )
}

/// Parse a successful response body.
pub fn parse_payload(operation: Operation, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| {
        Error::mapping_with_context(
            operation.name(),
            format!("response body is not valid JSON: {}", e),
            ErrorContext::new().with_source("response_mapper"),
        )
    })
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn non_null<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn expect_object(operation: Operation, value: &Value, path: &str) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(mapping_error(
            operation,
            if path.is_empty() { "$" } else { path },
            format!("expected an object, got {}", type_name(value)),
        ))
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Non-negative integer; numeric strings are accepted since some counts arrive as text.
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn optional_count(
    operation: Operation,
    obj: &Value,
    parent: &str,
    key: &str,
) -> Result<Option<u64>> {
    match non_null(obj, key) {
        None => Ok(None),
        Some(value) => as_count(value).map(Some).ok_or_else(|| {
            mapping_error(
                operation,
                &join(parent, key),
                format!("expected a non-negative integer, got {}", value),
            )
        }),
    }
}

fn require_count(operation: Operation, obj: &Value, parent: &str, key: &str) -> Result<u64> {
    optional_count(operation, obj, parent, key)?.ok_or_else(|| {
        mapping_error(operation, &join(parent, key), "required field is missing")
    })
}

fn optional_text(
    operation: Operation,
    obj: &Value,
    parent: &str,
    key: &str,
) -> Result<Option<String>> {
    match non_null(obj, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        // Region codes and deep frequencies arrive as numbers or text.
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(mapping_error(
            operation,
            &join(parent, key),
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

fn optional_list<'a>(
    operation: Operation,
    obj: &'a Value,
    parent: &str,
    key: &str,
) -> Result<&'a [Value]> {
    match non_null(obj, key) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(mapping_error(
            operation,
            &join(parent, key),
            format!("expected an array, got {}", type_name(other)),
        )),
    }
}

pub fn frequency(request: FrequencyRequest, payload: &Value) -> Result<FrequencyResult> {
    let op = Operation::WordstatFrequency;
    expect_object(op, payload, "")?;
    let frequency = require_count(op, payload, "", "frequency")?;
    Ok(FrequencyResult { request, frequency })
}

fn deep_items(op: Operation, payload: &Value, key: &str) -> Result<Vec<DeepItem>> {
    optional_list(op, payload, "", key)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("{}[{}]", key, i);
            expect_object(op, item, &path)?;
            Ok(DeepItem {
                phrase: optional_text(op, item, &path, "phrase")?,
                frequency: optional_text(op, item, &path, "frequency")?,
            })
        })
        .collect()
}

pub fn deep(request: DeepRequest, payload: &Value) -> Result<DeepResult> {
    let op = Operation::WordstatDeep;
    expect_object(op, payload, "")?;
    Ok(DeepResult {
        request,
        associations: deep_items(op, payload, "associations")?,
        popular: deep_items(op, payload, "popular")?,
    })
}

pub fn history(request: HistoryRequest, payload: &Value) -> Result<HistoryResult> {
    let op = Operation::WordstatHistory;
    expect_object(op, payload, "")?;
    let items = optional_list(op, payload, "", "items")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("items[{}]", i);
            expect_object(op, item, &path)?;
            let all_requests_percentage = match non_null(item, "all_requests_percentage") {
                None => None,
                Some(v) => Some(v.as_f64().ok_or_else(|| {
                    mapping_error(
                        op,
                        &join(&path, "all_requests_percentage"),
                        format!("expected a number, got {}", type_name(v)),
                    )
                })?),
            };
            Ok(HistoryItem {
                date: optional_text(op, item, &path, "date")?,
                frequency: optional_count(op, item, &path, "frequency")?,
                all_requests_percentage,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(HistoryResult { request, items })
}

fn region_matches(op: Operation, payload: &Value) -> Result<Vec<RegionMatch>> {
    let items = payload.as_array().ok_or_else(|| {
        mapping_error(
            op,
            "$",
            format!("expected an array of regions, got {}", type_name(payload)),
        )
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("[{}]", i);
            expect_object(op, item, &path)?;
            Ok(RegionMatch {
                name: optional_text(op, item, &path, "name")?,
                code: optional_text(op, item, &path, "code")?,
            })
        })
        .collect()
}

pub fn region_lookup(request: RegionLookupRequest, payload: &Value) -> Result<RegionLookupResult> {
    let regions = region_matches(request.operation(), payload)?;
    Ok(RegionLookupResult { request, regions })
}

pub fn region_check(request: RegionCheckRequest, payload: &Value) -> Result<RegionCheckResult> {
    let matches = region_matches(Operation::RegionCheck, payload)?;
    Ok(RegionCheckResult { request, matches })
}

pub fn finance_total(request: FinanceTotalRequest, payload: &Value) -> Result<UsageTotals> {
    let op = Operation::FinanceTotal;
    expect_object(op, payload, "")?;
    Ok(UsageTotals {
        request,
        request_count: optional_count(op, payload, "", "request_count")?.unwrap_or(0),
    })
}

pub fn finance_statistics(
    request: FinanceStatisticsRequest,
    payload: &Value,
) -> Result<UsageStatistics> {
    let op = Operation::FinanceStatistics;
    expect_object(op, payload, "")?;
    let request_count = optional_count(op, payload, "", "request_count")?.unwrap_or(0);
    let by_date = optional_list(op, payload, "", "items")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("items[{}]", i);
            expect_object(op, item, &path)?;
            Ok(UsageBucket {
                date: optional_text(op, item, &path, "date")?,
                request_count: optional_count(op, item, &path, "request_count")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(UsageStatistics {
        request,
        request_count,
        by_date,
    })
}
