//! Entity façade tests against a mock HTTP server.

use evateam_client::api::{
    DocumentCreate, LinkDirection, ListCreate, ListKind, ProjectCreate, TaskCreate, TimeLogCreate,
};
use evateam_client::{Entity, EvaClient, FieldDefaults, Predicate, Projection, QueryBuilder};
use serde_json::{Map, Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> EvaClient {
    EvaClient::builder()
        .base_url(server.uri())
        .api_token("test-token")
        .build()
        .unwrap()
}

async fn mock_result(server: &MockServer, result: Value) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.2",
            "result": result
        })))
        .mount(server)
        .await;
}

/// Method and kwargs of the n-th request received.
async fn sent(server: &MockServer, n: usize) -> (String, Value) {
    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[n].body).unwrap();
    (
        body["method"].as_str().unwrap().to_string(),
        body["kwargs"].clone(),
    )
}

fn defaults(entity: Entity, projection: Projection) -> Value {
    json!(FieldDefaults::builtin().get(entity, projection))
}

#[tokio::test]
async fn test_task_get_by_code() {
    let server = MockServer::start().await;
    mock_result(
        &server,
        json!({"id": "CmfTask:1", "code": "PROJ-1", "name": "Fix login"}),
    )
    .await;

    let task = client(&server).tasks().get("PROJ-1", &[]).await.unwrap();
    let task = task.result.unwrap();
    assert_eq!(task.name.as_deref(), Some("Fix login"));

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfTask.get");
    assert_eq!(kwargs["filter"], json!(["code", "==", "PROJ-1"]));
    assert_eq!(kwargs["slice"], json!([0, 1]));
    assert_eq!(kwargs["fields"], defaults(Entity::Task, Projection::Single));
}

#[tokio::test]
async fn test_task_get_with_explicit_fields() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfTask:1"})).await;

    client(&server)
        .tasks()
        .get("PROJ-1", &["id", "executors"])
        .await
        .unwrap();

    let (_, kwargs) = sent(&server, 0).await;
    assert_eq!(kwargs["fields"], json!(["id", "executors"]));
}

#[tokio::test]
async fn test_task_list_uses_list_projection() {
    let server = MockServer::start().await;
    mock_result(
        &server,
        json!([{"id": "CmfTask:1"}, {"id": "CmfTask:2", "priority": 3}]),
    )
    .await;

    let query = QueryBuilder::new()
        .filter(Predicate::eq("cache_status_type", "OPEN"))
        .order_by(["-priority"])
        .offset(0)
        .limit(100);
    let tasks = client(&server).tasks().list(query).await.unwrap();
    assert_eq!(tasks.result.len(), 2);
    assert_eq!(tasks.result[1].priority, Some(3));

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfTask.list");
    assert_eq!(kwargs["fields"], defaults(Entity::Task, Projection::List));
    assert_eq!(kwargs["order_by"], json!(["-priority"]));
    assert_eq!(kwargs["slice"], json!([0, 100]));
}

#[tokio::test]
async fn test_overridden_defaults_are_used() {
    let server = MockServer::start().await;
    mock_result(&server, json!([])).await;

    let client = EvaClient::builder()
        .base_url(server.uri())
        .api_token("test-token")
        .default_fields(Entity::Project, Projection::List, ["id", "code"])
        .build()
        .unwrap();
    client.projects().list(QueryBuilder::new()).await.unwrap();

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfProject.list");
    assert_eq!(kwargs, json!({"fields": ["id", "code"]}));
}

#[tokio::test]
async fn test_task_count() {
    let server = MockServer::start().await;
    mock_result(&server, json!(42)).await;

    let count = client(&server)
        .tasks()
        .count(QueryBuilder::new().filter(Predicate::eq("project_id", "CmfProject:1")))
        .await
        .unwrap();
    assert_eq!(count, 42);

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfTask.count");
    assert!(kwargs.get("fields").is_none());
}

#[tokio::test]
async fn test_sprint_and_executor_tasks_use_contains() {
    let server = MockServer::start().await;
    mock_result(&server, json!([])).await;
    let client = client(&server);

    client.tasks().sprint_tasks("SPR-7", &[]).await.unwrap();
    client
        .tasks()
        .person_tasks_as_executor("CmfPerson:9", &[])
        .await
        .unwrap();

    let (_, kwargs) = sent(&server, 0).await;
    assert_eq!(kwargs["filter"], json!(["lists", "contains", "SPR-7"]));
    let (_, kwargs) = sent(&server, 1).await;
    assert_eq!(kwargs["filter"], json!(["executors", "contains", "CmfPerson:9"]));
}

#[tokio::test]
async fn test_person_project_tasks_filter_array() {
    let server = MockServer::start().await;
    mock_result(&server, json!([])).await;

    client(&server)
        .tasks()
        .person_project_tasks("CmfProject:1", "CmfPerson:9", &["id"])
        .await
        .unwrap();

    let (_, kwargs) = sent(&server, 0).await;
    assert_eq!(
        kwargs,
        json!({
            "fields": ["id"],
            "filter": [
                ["project_id", "==", "CmfProject:1"],
                ["responsible", "==", "CmfPerson:9"]
            ]
        })
    );
}

#[tokio::test]
async fn test_task_create_update_archive_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "CmfTask.delete"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .mount(&server)
        .await;
    mock_result(&server, json!({"id": "CmfTask:1", "name": "New"})).await;
    let tasks = client(&server).tasks();

    let mut params = TaskCreate::new("New", "CmfProject:1");
    params.lists = vec!["CmfList:3".into()];
    let created = tasks.create(&params).await.unwrap();
    assert_eq!(created.result.id, "CmfTask:1");

    let mut changes = Map::new();
    changes.insert("priority".into(), json!(5));
    tasks.update("CmfTask:1", changes).await.unwrap();
    tasks.update_status("CmfTask:1", "CLOSED").await.unwrap();
    tasks.archive("CmfTask:1").await.unwrap();
    tasks.delete("CmfTask:1").await.unwrap();

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfTask.create");
    assert_eq!(
        kwargs,
        json!({"name": "New", "project_id": "CmfProject:1", "lists": ["CmfList:3"]})
    );

    let (method, kwargs) = sent(&server, 1).await;
    assert_eq!(method, "CmfTask.update");
    assert_eq!(kwargs, json!({"id": "CmfTask:1", "priority": 5}));

    let (_, kwargs) = sent(&server, 2).await;
    assert_eq!(kwargs["cache_status_type"], json!("CLOSED"));

    let (method, kwargs) = sent(&server, 3).await;
    assert_eq!(method, "CmfTask.update");
    assert_eq!(kwargs, json!({"id": "CmfTask:1", "cmf_deleted": true}));

    let (method, kwargs) = sent(&server, 4).await;
    assert_eq!(method, "CmfTask.delete");
    assert_eq!(kwargs, json!({"id": "CmfTask:1"}));
}

#[tokio::test]
async fn test_person_current() {
    let server = MockServer::start().await;
    mock_result(
        &server,
        json!({"id": "CmfPerson:1", "login": "ann", "on_vacation": false}),
    )
    .await;

    let me = client(&server).persons().current(&[]).await.unwrap();
    assert_eq!(me.result.login.as_deref(), Some("ann"));
    assert!(me.result.is_available());

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfPerson.get_current");
    assert_eq!(kwargs["fields"], defaults(Entity::Person, Projection::Single));
}

#[tokio::test]
async fn test_person_get_by_id() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfPerson:1"})).await;

    client(&server)
        .persons()
        .get("CmfPerson:1", &["id", "name"])
        .await
        .unwrap();

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfPerson.get");
    assert_eq!(kwargs["filter"], json!(["id", "==", "CmfPerson:1"]));
}

#[tokio::test]
async fn test_documents() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfDocument:1", "name": "Spec"})).await;
    let docs = client(&server).documents();

    docs.get("DOC-1", &[]).await.unwrap();
    let created = docs
        .create(&DocumentCreate {
            name: "Spec".into(),
            project_id: "CmfProject:1".into(),
            text: Some("<p>hi</p>".into()),
            parent_id: None,
        })
        .await
        .unwrap();
    assert_eq!(created.result.name.as_deref(), Some("Spec"));

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfDocument.get");
    assert_eq!(kwargs["fields"], defaults(Entity::Document, Projection::Single));

    let (method, kwargs) = sent(&server, 1).await;
    assert_eq!(method, "CmfDocument.create");
    assert_eq!(
        kwargs,
        json!({"name": "Spec", "project_id": "CmfProject:1", "text": "<p>hi</p>"})
    );
}

#[tokio::test]
async fn test_comments_for_task() {
    let server = MockServer::start().await;
    mock_result(
        &server,
        json!([{"id": "Comment:1", "text": "LGTM", "cmf_author_id": "CmfPerson:1"}]),
    )
    .await;
    let comments = client(&server).comments();

    let list = comments.for_task("PROJ-1", &[]).await.unwrap();
    assert_eq!(list.result[0].text.as_deref(), Some("LGTM"));

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "Comment.list");
    assert_eq!(
        kwargs,
        json!({
            "fields": ["id", "text", "cmf_author_id", "cmf_created_at"],
            "filter": ["task_id", "==", "CmfTask:PROJ-1"],
            "order_by": ["-cmf_created_at"]
        })
    );
}

#[tokio::test]
async fn test_comment_create() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "Comment:2", "text": "Done"})).await;

    client(&server)
        .comments()
        .create("CmfTask:1", "Done")
        .await
        .unwrap();

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "Comment.create");
    assert_eq!(kwargs, json!({"parent_id": "CmfTask:1", "text": "Done"}));
}

#[tokio::test]
async fn test_facade_surfaces_rpc_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"code": -32000, "message": "Task not found"}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .tasks()
        .get("NOPE-1", &[])
        .await
        .unwrap_err();
    assert!(err.is_rpc());
    assert!(err.to_string().contains("Task not found"));
}

#[tokio::test]
async fn test_get_with_null_result_is_none() {
    let server = MockServer::start().await;
    mock_result(&server, Value::Null).await;
    let client = client(&server);

    let task = client.tasks().get("NOPE-1", &[]).await.unwrap();
    assert!(task.result.is_none());
    let project = client.projects().get("NOPE", &[]).await.unwrap();
    assert!(project.result.is_none());
    let person = client.persons().get("CmfPerson:0", &[]).await.unwrap();
    assert!(person.result.is_none());
    let doc = client.documents().get("DOC-0", &[]).await.unwrap();
    assert!(doc.result.is_none());
}

#[tokio::test]
async fn test_get_with_missing_result_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.2"})))
        .mount(&server)
        .await;

    let task = client(&server).tasks().get("NOPE-1", &[]).await.unwrap();
    assert!(task.result.is_none());
}

#[tokio::test]
async fn test_get_with_wrong_shape_is_decode_error() {
    let server = MockServer::start().await;
    mock_result(&server, json!(["not", "a", "task"])).await;

    let err = client(&server)
        .tasks()
        .get("PROJ-1", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, evateam_client::Error::Decode(_)));
}

async fn mock_method(server: &MockServer, rpc_method: &str, result: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": rpc_method})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": result})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lists_for_project_and_get() {
    let server = MockServer::start().await;
    mock_method(&server, "CmfList.get", json!({"id": "CmfList:1", "code": "SPR-001543"})).await;
    mock_result(&server, json!([{"id": "CmfList:1", "code": "SPR-001543"}])).await;
    let lists = client(&server).lists();

    let sprints = lists
        .for_project("CmfProject:1", Some(ListKind::Sprint), true, &[])
        .await
        .unwrap();
    assert!(sprints.result[0].is_sprint());
    lists.project_releases("CmfProject:1", &["id"]).await.unwrap();
    let sprint = lists.get("SPR-001543", &[]).await.unwrap().result.unwrap();
    assert_eq!(sprint.id, "CmfList:1");

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfList.list");
    assert_eq!(
        kwargs,
        json!({
            "fields": defaults(Entity::List, Projection::List),
            "filter": [
                ["project_id", "==", "CmfProject:1"],
                ["code", "LIKE", "SPR-%"],
                ["cache_status_type", "==", "OPEN"]
            ]
        })
    );

    let (_, kwargs) = sent(&server, 1).await;
    assert_eq!(kwargs["fields"], json!(["id"]));
    assert_eq!(kwargs["filter"][1], json!(["code", "LIKE", "REL-%"]));

    let (method, kwargs) = sent(&server, 2).await;
    assert_eq!(method, "CmfList.get");
    assert_eq!(kwargs["filter"], json!(["code", "==", "SPR-001543"]));
}

#[tokio::test]
async fn test_list_create_close_delete() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfList:2", "name": "Sprint 9"})).await;
    let lists = client(&server).lists();

    let mut params = ListCreate::new("Sprint 9", "CmfProject:1");
    params.goal = Some("Ship it".into());
    lists.create(&params).await.unwrap();
    lists.close("CmfList:2").await.unwrap();
    lists.delete("CmfList:2").await.unwrap();

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfList.create");
    assert_eq!(
        kwargs,
        json!({"name": "Sprint 9", "parent_id": "CmfProject:1", "goal": "Ship it"})
    );
    let (method, kwargs) = sent(&server, 1).await;
    assert_eq!(method, "CmfList.update");
    assert_eq!(kwargs, json!({"id": "CmfList:2", "cache_status_type": "CLOSED"}));
    let (method, kwargs) = sent(&server, 2).await;
    assert_eq!(method, "CmfList.delete");
    assert_eq!(kwargs, json!({"id": "CmfList:2"}));
}

#[tokio::test]
async fn test_epics_filter_by_logic_type() {
    let server = MockServer::start().await;
    mock_method(&server, "CmfTask.count", json!(3)).await;
    mock_result(&server, json!([])).await;
    let epics = client(&server).epics();

    epics.project_epics("CmfProject:1", &[]).await.unwrap();
    let count = epics.count(QueryBuilder::new()).await.unwrap();
    assert_eq!(count, 3);
    epics.epic_tasks("CmfTask:9", &["id"]).await.unwrap();

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfTask.list");
    assert_eq!(
        kwargs["filter"],
        json!([
            ["project_id", "==", "CmfProject:1"],
            ["logic_type.code", "==", "task.epic"]
        ])
    );
    let (method, kwargs) = sent(&server, 1).await;
    assert_eq!(method, "CmfTask.count");
    assert_eq!(kwargs["filter"], json!(["logic_type.code", "==", "task.epic"]));
    let (method, kwargs) = sent(&server, 2).await;
    assert_eq!(method, "CmfTask.list");
    assert_eq!(kwargs["filter"], json!(["epic_id", "==", "CmfTask:9"]));
}

#[tokio::test]
async fn test_time_logs() {
    let server = MockServer::start().await;
    mock_method(
        &server,
        "CmfTimeTrackerHistory.create",
        json!({"id": "CmfTimeTrackerHistory:1", "time_spent": 90}),
    )
    .await;
    mock_result(&server, json!([])).await;
    let logs = client(&server).time_logs();

    logs.project_time_logs("CmfProject:1", &[]).await.unwrap();
    let created = logs
        .create(&TimeLogCreate {
            parent_id: "CmfTask:1".into(),
            time_spent: 90,
        })
        .await
        .unwrap();
    assert_eq!(created.result.time_spent, Some(90));

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfTimeTrackerHistory.list");
    assert_eq!(kwargs["filter"], json!(["parent.project_id", "==", "CmfProject:1"]));
    assert_eq!(kwargs["order_by"], json!(["-cmf_created_at"]));
    let (_, kwargs) = sent(&server, 1).await;
    assert_eq!(kwargs, json!({"parent_id": "CmfTask:1", "time_spent": 90}));
}

#[tokio::test]
async fn test_status_history_for_task() {
    let server = MockServer::start().await;
    mock_result(
        &server,
        json!([{"id": "CmfStatusHistory:1", "old_status": "OPEN", "new_status": "CLOSED"}]),
    )
    .await;

    let history = client(&server)
        .status_history()
        .task_history("CmfTask:1", &[])
        .await
        .unwrap();
    assert_eq!(history.result[0].new_status.as_deref(), Some("CLOSED"));

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfStatusHistory.list");
    assert_eq!(kwargs["filter"], json!(["parent_id", "==", "CmfTask:1"]));
}

#[tokio::test]
async fn test_task_links_both_directions_are_merged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({"kwargs": {"filter": ["source_id", "==", "CmfTask:1"]}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{"id": "CmfRelationOption:a"}, {"id": "CmfRelationOption:b"}]
        })))
        .mount(&server)
        .await;
    mock_result(
        &server,
        json!([{"id": "CmfRelationOption:b"}, {"id": "CmfRelationOption:c"}]),
    )
    .await;

    let links = client(&server)
        .task_links()
        .for_task("CmfTask:1", LinkDirection::Both, &[])
        .await
        .unwrap();
    let ids: Vec<_> = links.result.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(
        ids,
        ["CmfRelationOption:a", "CmfRelationOption:b", "CmfRelationOption:c"]
    );

    let (method, _) = sent(&server, 0).await;
    assert_eq!(method, "CmfRelationOption.list");
    let (_, kwargs) = sent(&server, 1).await;
    assert_eq!(kwargs["filter"], json!(["target_id", "==", "CmfTask:1"]));
}

#[tokio::test]
async fn test_task_link_create() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfRelationOption:1"})).await;

    client(&server)
        .task_links()
        .create("CmfTask:1", "CmfTask:2", "CmfRelationType:blocks")
        .await
        .unwrap();

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfRelationOption.create");
    assert_eq!(
        kwargs,
        json!({
            "source_id": "CmfTask:1",
            "target_id": "CmfTask:2",
            "relation_option_id": "CmfRelationType:blocks"
        })
    );
}

#[tokio::test]
async fn test_project_writes_and_executors() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfProject:1", "code": "CORE"})).await;
    let projects = client(&server).projects();

    projects.create(&ProjectCreate::new("CORE", "Core")).await.unwrap();
    projects
        .add_executor("CmfProject:1", "CmfPerson:2")
        .await
        .unwrap();
    projects
        .remove_executor("CmfProject:1", "CmfPerson:2")
        .await
        .unwrap();
    projects.delete("CmfProject:1").await.unwrap();

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "CmfProject.create");
    assert_eq!(kwargs, json!({"code": "CORE", "name": "Core"}));
    let (method, kwargs) = sent(&server, 1).await;
    assert_eq!(method, "CmfProject.add_executors");
    assert_eq!(kwargs, json!({"id": "CmfProject:1", "executors": ["CmfPerson:2"]}));
    let (method, _) = sent(&server, 2).await;
    assert_eq!(method, "CmfProject.remove_executors");
    let (method, _) = sent(&server, 3).await;
    assert_eq!(method, "CmfProject.delete");
}

#[tokio::test]
async fn test_comment_update_delete_count() {
    let server = MockServer::start().await;
    mock_method(&server, "Comment.count", json!(2)).await;
    mock_result(&server, json!({"id": "Comment:1", "text": "Edited"})).await;
    let comments = client(&server).comments();

    comments.update("Comment:1", "Edited").await.unwrap();
    comments.delete("Comment:1").await.unwrap();
    let count = comments
        .count(QueryBuilder::new().filter(Predicate::eq("parent_id", "CmfTask:1")))
        .await
        .unwrap();
    assert_eq!(count, 2);

    let (method, kwargs) = sent(&server, 0).await;
    assert_eq!(method, "Comment.update");
    assert_eq!(kwargs, json!({"id": "Comment:1", "text": "Edited"}));
    let (method, _) = sent(&server, 1).await;
    assert_eq!(method, "Comment.delete");
}

#[tokio::test]
async fn test_project_stats() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "CmfList.count"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 2})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "kwargs": {"filter": [
                ["project_id", "==", "CmfProject:1"],
                ["cache_status_type", "==", "OPEN"]
            ]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 7})))
        .mount(&server)
        .await;
    mock_result(&server, json!(20)).await;

    let stats = client(&server)
        .stats()
        .project_stats("CmfProject:1")
        .await
        .unwrap();
    assert_eq!(stats.total_tasks, 20);
    assert_eq!(stats.open_tasks, 7);
    assert_eq!(stats.active_sprints, 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_project_stats_propagates_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server)
        .stats()
        .project_stats("CmfProject:1")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sprint_stats() {
    let server = MockServer::start().await;
    mock_result(
        &server,
        json!([
            {"id": "CmfTask:1", "cache_status_type": "CLOSED", "agile_story_points": 3.0},
            {"id": "CmfTask:2", "cache_status_type": "OPEN", "agile_story_points": 5.0}
        ]),
    )
    .await;

    let stats = client(&server).stats().sprint_stats("SPR-7").await.unwrap();
    assert_eq!(stats.total_tasks, 2);
    assert_eq!(stats.completed_story_points, 3.0);

    let (_, kwargs) = sent(&server, 0).await;
    assert_eq!(kwargs["filter"], json!(["lists", "contains", "SPR-7"]));
    assert_eq!(
        kwargs["fields"],
        json!(["id", "cache_status_type", "agile_story_points"])
    );
}

#[tokio::test]
async fn test_new_families_null_get_is_none() {
    let server = MockServer::start().await;
    mock_result(&server, Value::Null).await;
    let client = client(&server);

    assert!(client.lists().get("SPR-0", &[]).await.unwrap().result.is_none());
    assert!(client.epics().get("PROJ-0", &[]).await.unwrap().result.is_none());
    assert!(client.time_logs().get("X:0", &[]).await.unwrap().result.is_none());
    assert!(client.status_history().get("X:0", &[]).await.unwrap().result.is_none());
    assert!(client.task_links().get("X:0", &[]).await.unwrap().result.is_none());
    assert!(client.comments().get("Comment:0", &[]).await.unwrap().result.is_none());
}
