//! Record lifecycle through a logged-in session.

use super::common::{logged_in, DATA};
use forcelink::{Record, WriteOptions};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_update_upsert_delete() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("{DATA}/sobjects/Contact")))
        .and(body_json(json!({"LastName": "Hopper", "Email": "grace@example.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "003xx0000001", "success": true, "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{DATA}/sobjects/Contact/003xx0000001")))
        .and(body_json(json!({"LastName": "Hopper", "Title": "Rear Admiral"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{DATA}/sobjects/Contact/Badge__c/B-42")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{DATA}/sobjects/Contact/003xx0000001")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut contact = session.sobject("Contact");
    contact
        .set("LastName", "Hopper")
        .set("Email", "grace@example.com");
    contact.create().await.unwrap();
    assert_eq!(contact.id(), "003xx0000001");

    contact.remove("Email");
    contact
        .set("Title", "Rear Admiral")
        .set("LastModifiedDate", "2024-03-01T10:00:00.000+0000");
    contact.update().await.unwrap();

    let (contact_ref, outcome) = contact.upsert("Badge__c", "B-42").await.unwrap();
    assert!(!outcome.created);
    assert_eq!(contact_ref.id(), "003xx0000001");
    assert_eq!(contact.id(), "003xx0000001");

    contact.delete(None).await.unwrap();
    assert_eq!(contact.string_field("LastName"), "Hopper");
}

#[tokio::test]
async fn test_duplicate_rule_override_and_rejection() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("{DATA}/sobjects/Lead")))
        .and(header("Sforce-Duplicate-Rule-Header", "allowSave=true"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "00Qxx1", "success": true, "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{DATA}/sobjects/Lead")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!([{
            "message": "Use one of these records?",
            "errorCode": "DUPLICATES_DETECTED",
            "fields": []
        }])))
        .mount(&server)
        .await;

    let mut lead = session.sobject("Lead");
    lead.set("LastName", "Turing").set("Company", "Bletchley");

    let err = lead.create().await.unwrap_err();
    let api = err.api_error().unwrap();
    assert_eq!(api.status, 400);
    assert_eq!(api.error_code.as_deref(), Some("DUPLICATES_DETECTED"));
    assert!(api.message.contains("Use one of these records?"));
    assert_eq!(lead.id(), "");

    lead.create_with(&WriteOptions::new().allow_duplicates(true))
        .await
        .unwrap();
    assert_eq!(lead.id(), "00Qxx1");
}

#[tokio::test]
async fn test_query_pages_and_related_records() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;
    let next = format!("{DATA}/query/01gxx0000002Dbc-2000");

    Mock::given(method("GET"))
        .and(path(format!("{DATA}/query")))
        .and(query_param("q", "SELECT Id, ParentId, Account.Name FROM Case"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalSize": 2, "done": false, "nextRecordsUrl": next,
            "records": [{
                "attributes": {"type": "Case", "url": format!("{DATA}/sobjects/Case/500A")},
                "Id": "500A",
                "ParentId": "500P",
                "Account": {
                    "attributes": {"type": "Account", "url": format!("{DATA}/sobjects/Account/001Z")},
                    "Name": "Acme"
                }
            }]
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(next.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalSize": 2, "done": true,
            "records": [{"attributes": {"type": "Case", "url": ""}, "Id": "500B", "ParentId": null}]
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{DATA}/sobjects/Case/500P")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attributes": {"type": "Case", "url": format!("{DATA}/sobjects/Case/500P")},
            "Id": "500P",
            "Subject": "Parent case"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let soql = "SELECT Id, ParentId, Account.Name FROM Case";
    let first = session.query(soql).await.unwrap();
    assert!(!first.done);

    // A continuation passed to query() is requested as-is, not re-encoded as SOQL.
    let second = session
        .query(first.next_records_url.as_deref().unwrap())
        .await
        .unwrap();
    assert_eq!(second.records[0].id(), "500B");

    let case = &first.records[0];
    let account = case.related_record("Account", "Account").unwrap();
    assert_eq!(account.id(), "001Z");
    assert_eq!(account.string_field("Name"), "Acme");

    let mut parent = case.related_record("Case", "ParentId").unwrap();
    assert_eq!(parent.string_field("Subject"), "");
    parent.fetch(None).await.unwrap();
    assert_eq!(parent.string_field("Subject"), "Parent case");

    assert!(second.records[0].related_record("Case", "ParentId").is_none());

    let every: Vec<Record> = session.query_all(soql).await.unwrap();
    let ids: Vec<&str> = every.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["500A", "500B"]);
    assert_eq!(every.len(), 2);
}
