//! Route precedence, static serving, CORS and header policy.

use serde_json::{json, Value};

use fitshop_backend::config::schema::DEV_ORIGIN;
use fitshop_backend::protection::ProtectionDecision;
use fitshop_backend::routes::ApiRouters;

mod common;

#[tokio::test]
async fn test_root_serves_entry_document() {
    let dir = tempfile::tempdir().unwrap();
    common::populate_static_dir(dir.path());

    let oracle = common::StaticOracle::with(ProtectionDecision::allow());
    let (addr, shutdown) =
        common::spawn_app(common::test_config(dir.path()), oracle, common::probe_api()).await;

    let res = common::client()
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "<html>fitshop entry</html>");

    shutdown.trigger();
}

#[tokio::test]
async fn test_static_asset_served_by_exact_path() {
    let dir = tempfile::tempdir().unwrap();
    common::populate_static_dir(dir.path());

    let oracle = common::StaticOracle::with(ProtectionDecision::allow());
    let (addr, shutdown) =
        common::spawn_app(common::test_config(dir.path()), oracle, common::probe_api()).await;

    let client = common::client();

    let res = client
        .get(format!("http://{addr}/app.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "console.log('bundle')");

    // Unmatched non-API paths are not rewritten to the entry document
    let res = client
        .get(format!("http://{addr}/workouts/42"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_api_prefixes_dispatch_to_their_group_only() {
    let dir = tempfile::tempdir().unwrap();
    common::populate_static_dir(dir.path());

    let oracle = common::StaticOracle::with(ProtectionDecision::allow());
    let (addr, shutdown) =
        common::spawn_app(common::test_config(dir.path()), oracle, common::probe_api()).await;

    let client = common::client();
    for (prefix, expected) in [
        ("/api/products", "products-group"),
        ("/api/user", "user-group"),
        ("/api/workout", "workout-group"),
    ] {
        let res = client
            .get(format!("http://{addr}{prefix}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200, "prefix {prefix}");
        assert_eq!(res.text().await.unwrap(), expected, "prefix {prefix}");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_cors_allows_configured_origin_with_credentials() {
    let dir = tempfile::tempdir().unwrap();
    common::populate_static_dir(dir.path());

    let oracle = common::StaticOracle::with(ProtectionDecision::allow());
    let (addr, shutdown) =
        common::spawn_app(common::test_config(dir.path()), oracle, common::probe_api()).await;

    let res = common::client()
        .get(format!("http://{addr}/api/products"))
        .header("Origin", DEV_ORIGIN)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(DEV_ORIGIN)
    );
    assert_eq!(
        res.headers()
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_cors_rejects_foreign_origin() {
    let dir = tempfile::tempdir().unwrap();
    common::populate_static_dir(dir.path());

    let oracle = common::StaticOracle::with(ProtectionDecision::allow());
    let (addr, shutdown) =
        common::spawn_app(common::test_config(dir.path()), oracle, common::probe_api()).await;

    let res = common::client()
        .get(format!("http://{addr}/api/products"))
        .header("Origin", "http://evil.example")
        .send()
        .await
        .unwrap();

    // No allow-origin match: the browser will refuse the response
    assert!(res.headers().get("access-control-allow-origin").is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let dir = tempfile::tempdir().unwrap();
    common::populate_static_dir(dir.path());

    let oracle = common::StaticOracle::with(ProtectionDecision::allow());
    let (addr, shutdown) =
        common::spawn_app(common::test_config(dir.path()), oracle, common::probe_api()).await;

    let res = common::client()
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap();

    let headers = res.headers();
    assert_eq!(
        headers.get("x-content-type-options").and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
    assert_eq!(
        headers.get("x-frame-options").and_then(|v| v.to_str().ok()),
        Some("SAMEORIGIN")
    );
    assert_eq!(
        headers.get("referrer-policy").and_then(|v| v.to_str().ok()),
        Some("no-referrer")
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_denied_responses_still_pass_cors_and_header_layers() {
    let dir = tempfile::tempdir().unwrap();
    common::populate_static_dir(dir.path());

    let oracle = common::StaticOracle::with(ProtectionDecision::deny(
        fitshop_backend::protection::DenyReason::RateLimit,
    ));
    let (addr, shutdown) =
        common::spawn_app(common::test_config(dir.path()), oracle, common::probe_api()).await;

    let res = common::client()
        .get(format!("http://{addr}/api/products"))
        .header("Origin", DEV_ORIGIN)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 429);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(DEV_ORIGIN)
    );
    assert_eq!(
        res.headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_session_cookie_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    common::populate_static_dir(dir.path());

    let oracle = common::StaticOracle::with(ProtectionDecision::allow());
    // Real route groups: the user group never touches the database
    let (addr, shutdown) = common::spawn_app(
        common::test_config(dir.path()),
        oracle,
        ApiRouters::app_defaults(),
    )
    .await;

    let client = common::client();

    let res = client
        .post(format!("http://{addr}/api/user/login"))
        .json(&json!({ "username": "jordan" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let set_cookie = res
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("login must set a session cookie")
        .to_string();
    assert!(set_cookie.contains("fitshop_session=jordan"));
    assert!(set_cookie.contains("HttpOnly"));

    let cookie_pair = set_cookie.split(';').next().unwrap().to_string();
    let res = client
        .get(format!("http://{addr}/api/user/me"))
        .header("Cookie", cookie_pair)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "username": "jordan" }));

    // Without the cookie the session endpoint refuses
    let res = client
        .get(format!("http://{addr}/api/user/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    shutdown.trigger();
}
