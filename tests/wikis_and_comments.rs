//! Endpoint tests for wiki and issue-comment operations.

use backlog_api::{
    get_issue_comment, get_issue_comment_count, get_issue_comments, get_wiki_attachments,
    get_wiki_count, get_wiki_shared_files, get_wikis, BacklogClient, Get, Wiki,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BacklogClient {
    BacklogClient::with_base_url(&server.uri(), "key").unwrap()
}

fn admin_json() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "userId": "admin",
        "name": "admin",
        "roleType": 1,
        "lang": "ja",
        "mailAddress": "eguchi@nulab.example"
    })
}

fn wiki_json() -> serde_json::Value {
    serde_json::json!({
        "id": 1234567890,
        "projectId": 1234567890,
        "name": "Home",
        "content": null,
        "tags": [{"id": 12, "name": "proceedings"}],
        "attachments": [{
            "id": 1,
            "name": "test.json",
            "size": 8857,
            "createdUser": admin_json(),
            "created": "2014-01-06T11:10:45Z"
        }],
        "sharedFiles": [{
            "id": 454403,
            "type": "file",
            "dir": "/userIcon/",
            "name": "01_male clerk.png",
            "size": 2735,
            "createdUser": admin_json(),
            "created": "2009-02-27T03:26:15Z",
            "updatedUser": admin_json(),
            "updated": "2009-03-03T16:57:47Z"
        }],
        "stars": [],
        "createdUser": admin_json(),
        "created": "2013-05-30T09:11:36Z",
        "updatedUser": admin_json(),
        "updated": "2013-05-30T09:11:36Z"
    })
}

#[tokio::test]
async fn get_wikis_requires_project_and_maps_nesting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wikis"))
        .and(query_param("projectIdOrKey", "TEST"))
        .and(query_param("apiKey", "key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([wiki_json()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let wikis = get_wikis(&client_for(&server), "TEST", None).await.unwrap();

    let wiki = &wikis[0];
    assert_eq!(wiki.name, "Home");
    assert_eq!(wiki.content, None);
    assert_eq!(wiki.tags[0].name, "proceedings");
    assert_eq!(wiki.attachments[0].created_user.name, "admin");
    assert_eq!(wiki.shared_files[0].dir, "/userIcon/");
    assert!(wiki.stars.is_empty());
}

#[tokio::test]
async fn get_wikis_passes_keyword_when_given() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wikis"))
        .and(query_param("projectIdOrKey", "TEST"))
        .and(query_param("keyword", "Home"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let wikis = get_wikis(&client_for(&server), "TEST", Some("Home"))
        .await
        .unwrap();
    assert!(wikis.is_empty());
}

#[tokio::test]
async fn get_wiki_count_unwraps_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wikis/count"))
        .and(query_param("projectIdOrKey", "TEST"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let count = get_wiki_count(&client_for(&server), "TEST", None)
        .await
        .unwrap();
    assert_eq!(count, 5);
}

#[tokio::test]
async fn get_wiki_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wikis/1234567890"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wiki_json()))
        .expect(1)
        .mount(&server)
        .await;

    let wiki = Wiki::get(&client_for(&server), 1234567890).await.unwrap();
    assert_eq!(wiki.project_id, 1234567890);
}

#[tokio::test]
async fn get_wiki_attachments_maps_each_element() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wikis/1234567890/attachments"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 1,
            "name": "IMGP0088.JPG",
            "size": 85079,
            "createdUser": admin_json(),
            "created": "2014-07-11T06:26:05Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let attachments = get_wiki_attachments(&client_for(&server), 1234567890)
        .await
        .unwrap();

    assert_eq!(attachments[0].name, "IMGP0088.JPG");
    assert_eq!(attachments[0].size, 85079);
}

#[tokio::test]
async fn get_wiki_shared_files_maps_each_element() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wikis/1234567890/sharedFiles"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 454403,
            "type": "file",
            "dir": "/userIcon/",
            "name": "01_male clerk.png",
            "size": 2735,
            "createdUser": admin_json(),
            "created": "2009-02-27T03:26:15Z",
            "updatedUser": admin_json(),
            "updated": "2009-03-03T16:57:47Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let shared_files = get_wiki_shared_files(&client_for(&server), 1234567890)
        .await
        .unwrap();

    assert_eq!(shared_files[0].r#type, "file");
    assert_eq!(shared_files[0].created_user.name, "admin");
}

fn comment_json() -> serde_json::Value {
    serde_json::json!({
        "id": 2222222222u64,
        "content": null,
        "changeLog": [{
            "field": "milestone",
            "newValue": "R2014-07-23",
            "originalValue": null,
            "attachmentInfo": null,
            "attributeInfo": null,
            "notificationInfo": null
        }],
        "createdUser": admin_json(),
        "created": "2013-08-05T06:15:06Z",
        "updated": "2013-08-05T06:15:06Z",
        "stars": [],
        "notifications": []
    })
}

#[tokio::test]
async fn get_issue_comments_maps_each_element() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues/1111111111/comments"))
        .and(query_param("apiKey", "key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([comment_json()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let comments = get_issue_comments(&client_for(&server), 1111111111)
        .await
        .unwrap();

    assert_eq!(comments[0].id, 2222222222);
    assert_eq!(comments[0].content, None);
    assert_eq!(comments[0].change_log[0].field, "milestone");
}

#[tokio::test]
async fn get_issue_comment_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues/1111111111/comments/2222222222"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(comment_json()))
        .expect(1)
        .mount(&server)
        .await;

    let comment = get_issue_comment(&client_for(&server), 1111111111, 2222222222)
        .await
        .unwrap();
    assert_eq!(comment.created_user.name, "admin");
}

#[tokio::test]
async fn get_issue_comment_count_unwraps_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues/1111111111/comments/count"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 10})))
        .expect(1)
        .mount(&server)
        .await;

    let count = get_issue_comment_count(&client_for(&server), 1111111111)
        .await
        .unwrap();
    assert_eq!(count, 10);
}
