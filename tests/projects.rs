//! Endpoint tests for project operations and project-scoped metadata.

use backlog_api::{
    get_project_administrators, get_project_categories, get_project_issue_types,
    get_project_statuses, get_project_users, get_project_versions, get_projects, BacklogClient,
    BacklogError, Get, Project,
};
use chrono::{TimeZone, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BacklogClient {
    BacklogClient::with_base_url(&server.uri(), "key").unwrap()
}

fn project_json() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "projectKey": "TEST",
        "name": "test",
        "chartEnabled": false,
        "subtaskingEnabled": false,
        "projectLeaderCanEditProjectLeader": false,
        "useWikiTreeView": true,
        "textFormattingRule": "markdown",
        "archived": false,
        "displayOrder": 2147483646,
        "useDevAttributes": true
    })
}

#[tokio::test]
async fn get_projects_maps_each_element() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("apiKey", "key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([project_json()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let projects = get_projects(&client_for(&server)).await.unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].project_key, "TEST");
    assert!(projects[0].use_wiki_tree_view);
}

#[tokio::test]
async fn get_project_by_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/TEST"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json()))
        .expect(1)
        .mount(&server)
        .await;

    let project = Project::get(&client_for(&server), "TEST".to_string())
        .await
        .unwrap();
    assert_eq!(project.name, "test");
}

#[tokio::test]
async fn missing_project_key_fails_mapping_through_the_endpoint() {
    let server = MockServer::start().await;

    let mut body = project_json();
    body.as_object_mut().unwrap().remove("projectKey");

    Mock::given(method("GET"))
        .and(path("/projects/TEST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let err = Project::get(&client_for(&server), "TEST".to_string())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BacklogError::MissingField {
            entity: "Project",
            field: "projectKey"
        }
    ));
}

#[tokio::test]
async fn get_project_users_and_administrators() {
    let server = MockServer::start().await;

    let user = serde_json::json!({
        "id": 1234567890,
        "userId": "mike.green@test.jp",
        "name": "Mike Green",
        "roleType": 2,
        "lang": "ja",
        "mailAddress": "mike.green@test.jp",
        "nulabAccount": {
            "nulabId": "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmn",
            "name": "Mike Green",
            "uniqueId": "mikegreen"
        },
        "keyword": "Mike Green MIKEGREEN"
    });

    Mock::given(method("GET"))
        .and(path("/projects/TEST/users"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([user])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/TEST/administrators"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([user])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let users = get_project_users(&client, "TEST").await.unwrap();
    assert_eq!(users[0].name, "Mike Green");
    assert_eq!(
        users[0].nulab_account.as_ref().unwrap().unique_id,
        "mikegreen"
    );

    let admins = get_project_administrators(&client, "TEST").await.unwrap();
    assert_eq!(admins, users);
}

#[tokio::test]
async fn get_project_statuses_preserves_server_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/TEST/statuses"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "projectId": 1, "name": "Open", "color": "#ed8077", "displayOrder": 1000},
            {"id": 2, "projectId": 1, "name": "In Progress", "color": "#4488c5", "displayOrder": 2000}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let statuses = get_project_statuses(&client_for(&server), "TEST")
        .await
        .unwrap();

    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].name, "Open");
    assert_eq!(statuses[1].name, "In Progress");
    assert_eq!(statuses[1].color, "#4488c5");
}

#[tokio::test]
async fn get_project_issue_types_with_templates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/TEST/issueTypes"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 1,
            "projectId": 1,
            "name": "Bug",
            "color": "#990000",
            "displayOrder": 0,
            "templateSummary": "Subject",
            "templateDescription": "Description"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let issue_types = get_project_issue_types(&client_for(&server), "TEST")
        .await
        .unwrap();

    assert_eq!(issue_types[0].name, "Bug");
    assert_eq!(issue_types[0].template_summary.as_deref(), Some("Subject"));
}

#[tokio::test]
async fn get_project_categories_maps_each_element() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/TEST/categories"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!([{"id": 12, "name": "Development", "displayOrder": 0}]),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let categories = get_project_categories(&client_for(&server), "TEST")
        .await
        .unwrap();

    assert_eq!(categories[0].id, 12);
    assert_eq!(categories[0].name, "Development");
}

#[tokio::test]
async fn get_project_versions_with_optional_dates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/TEST/versions"))
        .and(query_param("apiKey", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 3,
            "projectId": 1,
            "name": "wait for release",
            "description": null,
            "startDate": "2014-07-01T00:00:00Z",
            "releaseDueDate": null,
            "archived": false,
            "displayOrder": 0
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let versions = get_project_versions(&client_for(&server), "TEST")
        .await
        .unwrap();

    assert_eq!(versions[0].name, "wait for release");
    assert_eq!(versions[0].description, None);
    assert_eq!(
        versions[0].start_date,
        Some(Utc.with_ymd_and_hms(2014, 7, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(versions[0].release_due_date, None);
}
