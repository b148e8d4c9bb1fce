//! Health endpoint tests.

use axum_test::TestServer;
use integration_tests::setup::TestContext;

#[tokio::test]
async fn health_reports_ok() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}
