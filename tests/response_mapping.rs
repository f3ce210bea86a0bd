mod common;

use chrono::NaiveDate;
use common::{client_with, StubTransport};
use serppro_client::transport::HttpMethod;
use serppro_client::{
    ApiErrorClass, ApiRequest, ApiResponse, DateRange, DeepRequest, ErrorKind, FrequencyRequest,
    Grouping, HistoryRequest, Operation, OperationParams, RegionCheckRequest, RegionSearchType,
    SearchSystem, ServiceType,
};

#[tokio::test]
async fn frequency_is_mapped_and_echoes_request() {
    let stub = StubTransport::new();
    stub.respond("/api/v1/wordstat/frequency", 200, r#"{"frequency": 1234}"#);
    let client = client_with(&stub);

    let request = FrequencyRequest::new("Король и Шут").region("225");
    let result = client.wordstat_frequency(request.clone()).await.unwrap();

    assert_eq!(result.frequency, 1234);
    assert_eq!(result.request, request);

    let sent = &stub.requests()[0];
    assert_eq!(sent.method, HttpMethod::Post);
    let body = sent.body.as_ref().unwrap();
    assert_eq!(body["query"], "Король и Шут");
    assert_eq!(body["region"], "225");
    assert_eq!(body["device"], "All");
    assert_eq!(body["task_type"], "Regular");
    assert_eq!(body["syntax"], "Ws");
}

#[tokio::test]
async fn history_keeps_bucket_order() {
    let stub = StubTransport::new();
    stub.respond(
        "/api/v1/wordstat/history",
        200,
        r#"{"items": [
            {"date": "2025-07-01", "frequency": 300},
            {"date": "2025-08-01", "frequency": 100},
            {"date": "2025-09-01", "frequency": 200}
        ]}"#,
    );
    let client = client_with(&stub);

    let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
    let result = client
        .wordstat_history(
            HistoryRequest::new("Король и Шут")
                .grouping(Grouping::Month)
                .dates(DateRange::new(start, end)),
        )
        .await
        .unwrap();

    let dates: Vec<&str> = result
        .items
        .iter()
        .filter_map(|i| i.date.as_deref())
        .collect();
    assert_eq!(dates, ["2025-07-01", "2025-08-01", "2025-09-01"]);
    assert_eq!(result.total_frequency(), 600);

    let body = stub.requests()[0].body.clone().unwrap();
    assert_eq!(body["start_date"], "2025-07-01");
    assert_eq!(body["end_date"], "2025-09-30");
    assert_eq!(body["grouping"], "Month");
}

#[tokio::test]
async fn service_rejection_is_api_error() {
    let stub = StubTransport::new();
    stub.respond(
        "/api/v1/wordstat/deep",
        422,
        r#"{"id": "ERR_INVALID_REGION", "error_message": "Unknown region", "instance": "/api/v1/wordstat/deep", "invalid_data": ["region"]}"#,
    );
    let client = client_with(&stub);

    let err = client
        .wordstat_deep(DeepRequest::new("КиШ").region("999999"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    let api = err.as_api().unwrap();
    assert_eq!(api.error_id.as_deref(), Some("ERR_INVALID_REGION"));
    assert_eq!(api.class, ApiErrorClass::InvalidRequest);
    assert!(api.is_invalid_field("region"));
    assert_eq!(
        api.request_id.as_deref(),
        stub.request_ids().first().map(String::as_str)
    );
}

#[tokio::test]
async fn unexpected_shape_is_mapping_error() {
    let stub = StubTransport::new();
    stub.respond("/api/v1/finance/total", 200, r#"{"request_count": "many"}"#);
    stub.respond("/api/v1/region/yandex", 200, r#"{"regions": []}"#);
    let client = client_with(&stub);

    let err = client.finance_total(None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Mapping);

    let err = client.region_yandex("Москва").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Mapping);
}

#[tokio::test]
async fn region_operations_use_query_strings() {
    let stub = StubTransport::new();
    stub.respond(
        "/api/v1/region/yandex",
        200,
        r#"[{"name": "Москва", "code": 213}]"#,
    );
    stub.respond(
        "/api/v1/region/check",
        200,
        r#"[{"name": "Россия", "code": "225"}]"#,
    );
    let client = client_with(&stub);

    let found = client.region_yandex("Москва").await.unwrap();
    assert_eq!(found.first().and_then(|r| r.code.as_deref()), Some("213"));

    let check = client
        .region_check(RegionCheckRequest::new(
            "225",
            SearchSystem::Yandex,
            RegionSearchType::Code,
        ))
        .await
        .unwrap();
    assert!(check.is_recognized());

    let sent = stub.requests();
    assert_eq!(sent[0].method, HttpMethod::Get);
    assert_eq!(sent[0].query_value("query"), Some("Москва"));
    assert!(sent[0].body.is_none());
    assert_eq!(sent[1].query_value("code"), Some("225"));
    assert_eq!(sent[1].query_value("searchSystem"), Some("Yandex"));
    assert_eq!(sent[1].query_value("searchType"), Some("Code"));
}

#[tokio::test]
async fn finance_total_sends_service_only_when_given() {
    let stub = StubTransport::new();
    stub.respond("/api/v1/finance/total", 200, r#"{"request_count": 17}"#);
    let client = client_with(&stub);

    let all = client.finance_total(None).await.unwrap();
    let scoped = client
        .finance_total(Some(ServiceType::WordstatHistory))
        .await
        .unwrap();
    assert_eq!(all.request_count, 17);
    assert_eq!(scoped.request.service, Some(ServiceType::WordstatHistory));

    let sent = stub.requests();
    assert!(sent[0].query.is_empty());
    assert_eq!(sent[1].query_value("service"), Some("WordstatHistory"));
}

#[tokio::test]
async fn execute_params_runs_the_same_pipeline() {
    let stub = StubTransport::new();
    stub.respond("/api/v1/wordstat/frequency", 200, r#"{"frequency": "77"}"#);
    let client = client_with(&stub);

    let params: OperationParams = [
        ("--query", "Король и Шут"),
        ("--task-type", "regular"),
        ("syntax", "quotes"),
    ]
    .into_iter()
    .collect();
    let response = client
        .execute_params(Operation::WordstatFrequency, &params)
        .await
        .unwrap();

    assert_eq!(response.operation(), Operation::WordstatFrequency);
    match response {
        ApiResponse::WordstatFrequency(r) => {
            assert_eq!(r.frequency, 77);
            assert_eq!(r.request.query, "Король и Шут");
        }
        other => panic!("unexpected response {:?}", other),
    }

    let via_union = client
        .execute(ApiRequest::from(FrequencyRequest::new("КиШ")))
        .await
        .unwrap();
    let json = serde_json::to_value(&via_union).unwrap();
    assert_eq!(json["operation"], "wordstat_frequency");
    assert_eq!(json["request"]["query"], "КиШ");
}

struct BrokenTransport;

#[async_trait::async_trait]
impl serppro_client::transport::Transport for BrokenTransport {
    async fn send(
        &self,
        _request: &serppro_client::transport::PreparedRequest,
        _request_id: &str,
    ) -> serppro_client::Result<serppro_client::transport::RawResponse> {
        Err(serppro_client::transport::TransportError::Other("socket closed".into()).into())
    }
}

#[tokio::test]
async fn transport_failures_propagate_unchanged() {
    let client = serppro_client::SerpProClient::builder()
        .api_key("test-key")
        .transport(std::sync::Arc::new(BrokenTransport))
        .build()
        .unwrap();

    let err = client.finance_total(None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("socket closed"));
}

#[tokio::test]
async fn incomplete_items_do_not_discard_the_result() {
    let stub = StubTransport::new();
    stub.respond(
        "/api/v1/wordstat/deep",
        200,
        r#"{"associations": [
            {"phrase": "a", "frequency": "5"},
            {"phrase": "b", "frequency": null}
        ], "popular": [{"phrase": "c", "frequency": "1 234"}]}"#,
    );
    stub.respond(
        "/api/v1/region/google",
        200,
        r#"[{"name": "Moscow", "code": "1011969"}, {"name": null, "code": "1"}]"#,
    );
    let client = client_with(&stub);

    let deep = client.wordstat_deep(DeepRequest::new("КиШ")).await.unwrap();
    assert_eq!(deep.associations.len(), 2);
    assert_eq!(deep.associations[0].frequency_count(), Some(5));
    assert_eq!(deep.associations[1].frequency, None);
    assert_eq!(deep.popular[0].frequency_count(), Some(1234));

    let regions = client.region_google("Moscow").await.unwrap();
    assert_eq!(regions.regions.len(), 2);
    assert_eq!(regions.regions[1].name, None);
}
