use mockito::Matcher;
use serppro_client::{
    ApiErrorClass, ErrorKind, FrequencyRequest, HistoryRequest, RegionCheckRequest,
    RegionSearchType, SearchSystem, SerpProClient,
};
use std::time::Duration;

fn client_for(server: &mockito::ServerGuard) -> SerpProClient {
    SerpProClient::builder()
        .api_key("secret-key")
        .base_url(server.url())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn post_sends_key_header_and_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/wordstat/frequency")
        .match_header("x-api-key", "secret-key")
        .match_header("x-request-id", Matcher::Regex("^[0-9a-f-]{36}$".to_string()))
        .match_body(Matcher::PartialJson(serde_json::json!({
            "query": "Король и Шут",
            "region": "225",
            "device": "All",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"frequency": 1234}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client
        .wordstat_frequency(FrequencyRequest::new("Король и Шут").region("225"))
        .await
        .unwrap();

    assert_eq!(result.frequency, 1234);
    mock.assert_async().await;
}

#[tokio::test]
async fn get_sends_query_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/region/check")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("code".into(), "Москва".into()),
            Matcher::UrlEncoded("searchSystem".into(), "Google".into()),
            Matcher::UrlEncoded("searchType".into(), "Name".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"name": "Moscow", "code": "1011969"}]"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client
        .region_check(RegionCheckRequest::new(
            "Москва",
            SearchSystem::Google,
            RegionSearchType::Name,
        ))
        .await
        .unwrap();

    assert_eq!(result.matches[0].code.as_deref(), Some("1011969"));
    mock.assert_async().await;
}

#[tokio::test]
async fn unprocessable_content_is_classified() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v1/wordstat/history")
        .with_status(422)
        .with_body("")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .wordstat_history(HistoryRequest::new("Король и Шут"))
        .await
        .unwrap_err();

    let api = err.as_api().unwrap();
    assert_eq!(api.status, 422);
    assert_eq!(api.class, ApiErrorClass::InvalidRequest);
    assert_eq!(api.message, "Unprocessable Content - invalid query");
    assert!(!err.to_string().contains("secret-key"));
}

#[tokio::test]
async fn auth_failure_is_classified() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/finance/total")
        .with_status(401)
        .with_body(r#"{"id": "ERR_UNAUTHORIZED", "error_message": "Invalid API key"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.finance_total(None).await.unwrap_err();
    let api = err.as_api().unwrap();
    assert_eq!(api.class, ApiErrorClass::Authentication);
    assert_eq!(api.message, "Invalid API key");
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let client = SerpProClient::builder()
        .api_key("secret-key")
        .base_url("http://127.0.0.1:1")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = client.region_yandex("Москва").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!err.to_string().contains("secret-key"));
}
