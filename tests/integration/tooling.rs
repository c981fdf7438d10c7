//! Tooling namespace, anonymous Apex, Apex REST and file downloads.

use super::common::{logged_in, DATA};
use forcelink::RequestMethod;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_tooling_handle_targets_tooling_namespace() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{DATA}/tooling/query")))
        .and(query_param("q", "SELECT Id, Name FROM ApexClass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalSize": 1, "done": true,
            "records": [{"attributes": {"type": "ApexClass", "url": format!("{DATA}/tooling/sobjects/ApexClass/01pxx1")}, "Id": "01pxx1", "Name": "Greeter"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{DATA}/tooling/sobjects/ApexClass/01pxx1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let tooling = session.tooling();
    let page = tooling.query("SELECT Id, Name FROM ApexClass").await.unwrap();
    assert!(!session.is_tooling());

    let mut class = page.records[0].clone();
    assert!(class.session().is_some_and(|s| s.is_tooling()));
    class.set("Body", "public class Greeter {}");
    class.update().await.unwrap();
}

#[tokio::test]
async fn test_execute_anonymous_reports_compile_problem() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{DATA}/tooling/executeAnonymous/")))
        .and(query_param("anonymousBody", "Integer i = ;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "line": 1, "column": 13, "compiled": false, "success": false,
            "compileProblem": "Unexpected token ';'.",
            "exceptionMessage": null, "exceptionStackTrace": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = session.execute_anonymous("Integer i = ;").await.unwrap();
    assert!(!result.compiled);
    assert_eq!(result.compile_problem.as_deref(), Some("Unexpected token ';'."));
}

#[tokio::test]
async fn test_apex_rest_error_is_classified() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/services/apexrest/inventory/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"sku": "W-1"}])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services/apexrest/inventory/widgets"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let widgets = session
        .apex_rest(RequestMethod::Get, "inventory/widgets", None)
        .await
        .unwrap();
    assert_eq!(widgets[0]["sku"], "W-1");

    let err = session
        .apex_rest(RequestMethod::Post, "inventory/widgets", Some(json!({"sku": "W-2"})))
        .await
        .unwrap_err();
    let api = err.api_error().unwrap();
    assert_eq!(api.status, 503);
    assert_eq!(api.error_code, None);
    assert_eq!(api.message, "Service Unavailable");
}

#[tokio::test]
async fn test_download_content_version() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;
    let body: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();

    Mock::given(method("GET"))
        .and(path(format!("{DATA}/sobjects/ContentVersion/068xx0000007/VersionData")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("report.bin");
    let written = session
        .download_file("068xx0000007", &target)
        .await
        .unwrap();

    assert_eq!(written, body.len() as u64);
    assert_eq!(std::fs::read(&target).unwrap(), body);
}
