use std::time::Duration;

use scout_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher, UserAgentPool};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(settings: FetchSettings) -> ReqwestFetcher {
    ReqwestFetcher::new(settings).expect("client builds")
}

#[tokio::test]
async fn fetcher_returns_markup_with_pool_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/vacancy"))
        .and(query_param("text", "rust dev"))
        .and(header("user-agent", "scout-test/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let settings = FetchSettings {
        user_agents: UserAgentPool::new(vec!["scout-test/1.0".to_string()]),
        ..FetchSettings::default()
    };
    let url = format!("{}/search/vacancy?text=rust+dev&page=0", server.uri());

    let output = fetcher(settings).fetch(&url).await.expect("fetch ok");
    assert_eq!(output.bytes, b"<html>ok</html>");
    assert_eq!(output.final_url, url);
    assert!(output.content_type.unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let err = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_rejects_non_200_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/partial"))
        .respond_with(
            ResponseTemplate::new(203)
                .set_body_string("<html>partial</html>"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/partial", server.uri());
    let err = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(203));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let url = format!("{}/slow", server.uri());
    let err = fetcher(settings).fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let url = format!("{}/large", server.uri());
    let err = fetcher(settings).fetch(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn invalid_url_is_reported_without_request() {
    let err = fetcher(FetchSettings::default())
        .fetch("not a url")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
