mod harness;

use clarity_config::{AllowList, CorsConfig};
use harness::config::ConfigBuilder;
use harness::server::TestServer;

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let cors = CorsConfig {
        origins: AllowList::Only(vec!["http://localhost:3000".to_owned()]),
        credentials: true,
        ..CorsConfig::default()
    };
    let server = TestServer::start(ConfigBuilder::new().with_cors(cors).build())
        .await
        .unwrap();

    let resp = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/evaluate"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], "http://localhost:3000");
    assert_eq!(headers["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn cors_ignores_other_origins() {
    let cors = CorsConfig {
        origins: AllowList::Only(vec!["http://localhost:3000".to_owned()]),
        ..CorsConfig::default()
    };
    let server = TestServer::start(ConfigBuilder::new().with_cors(cors).build())
        .await
        .unwrap();

    let resp = server
        .client()
        .get(server.url("/get_scenarios"))
        .header("origin", "http://evil.example")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn session_cookie_is_issued_and_refreshed() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/api/results")).send().await.unwrap();
    let cookie = resp.headers()["set-cookie"].to_str().unwrap().to_owned();

    assert!(cookie.starts_with("clarity_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    // Echoing the cookie back resumes the session and refreshes its lifetime
    let id = cookie.split(';').next().unwrap();
    let resp = client
        .get(server.url("/api/results"))
        .header("cookie", id)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["set-cookie"].to_str().unwrap(), cookie);
}

#[tokio::test]
async fn health_does_not_issue_sessions() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = reqwest::get(server.url("/health")).await.unwrap();

    assert!(resp.headers().get("set-cookie").is_none());
}
