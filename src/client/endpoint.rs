//! Endpoint resolution: which method and path serve each operation.

use crate::transport::HttpMethod;
use crate::types::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: &'static str,
}

pub fn resolve_endpoint(operation: Operation) -> Endpoint {
    let (method, path) = match operation {
        Operation::WordstatFrequency => (HttpMethod::Post, "/api/v1/wordstat/frequency"),
        Operation::WordstatDeep => (HttpMethod::Post, "/api/v1/wordstat/deep"),
        Operation::WordstatHistory => (HttpMethod::Post, "/api/v1/wordstat/history"),
        Operation::RegionYandex => (HttpMethod::Get, "/api/v1/region/yandex"),
        Operation::RegionGoogle => (HttpMethod::Get, "/api/v1/region/google"),
        Operation::RegionCheck => (HttpMethod::Get, "/api/v1/region/check"),
        Operation::FinanceTotal => (HttpMethod::Get, "/api/v1/finance/total"),
        Operation::FinanceStatistics => (HttpMethod::Post, "/api/v1/finance/statistics"),
    };
    Endpoint { method, path }
}
