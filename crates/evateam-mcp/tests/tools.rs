//! Tool tests against a mock EVA Team server.

use evateam_client::EvaClient;
use evateam_mcp::protocol::JsonRpcRequest;
use evateam_mcp::{McpServer, ToolError, ToolRegistry, ToolResult, default_registry};
use serde_json::{Value, json};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry(server: &MockServer) -> ToolRegistry {
    let client = EvaClient::builder()
        .base_url(server.uri())
        .api_token("test-token")
        .build()
        .unwrap();
    default_registry(client)
}

async fn mock_body(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mock_result(server: &MockServer, result: Value) {
    mock_body(server, 200, json!({"jsonrpc": "2.2", "result": result})).await;
}

/// Method and kwargs of the only request received.
async fn sent(server: &MockServer) -> (String, Value) {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    (
        body["method"].as_str().unwrap().to_string(),
        body["kwargs"].clone(),
    )
}

fn json_content(result: ToolResult) -> Value {
    match result {
        ToolResult::Json { content } => content,
        other => panic!("expected JSON result, got {other:?}"),
    }
}

#[tokio::test]
async fn test_task_list_with_shortcuts() {
    let server = MockServer::start().await;
    mock_result(&server, json!([{"id": "CmfTask:1"}, {"id": "CmfTask:2"}])).await;

    let result = registry(&server)
        .execute(
            "eva_task_list",
            json!({
                "project_id": "CmfProject:1",
                "sprint_code": "SPR-7",
                "fields": ["id"],
                "limit": 2
            }),
        )
        .await
        .unwrap();

    let content = json_content(result);
    assert_eq!(content["items"].as_array().unwrap().len(), 2);
    assert_eq!(content["has_more"], json!(true));

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfTask.list");
    assert_eq!(
        kwargs,
        json!({
            "fields": ["id"],
            "filter": [["project_id", "==", "CmfProject:1"], ["lists", "contains", "SPR-7"]],
            "slice": [0, 2]
        })
    );
}

#[tokio::test]
async fn test_task_get_by_id() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfTask:9", "code": "PROJ-9"})).await;

    let result = registry(&server)
        .execute("eva_task_get", json!({"id": "CmfTask:9"}))
        .await
        .unwrap();
    assert_eq!(json_content(result)["code"], json!("PROJ-9"));

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfTask.get");
    assert_eq!(kwargs["filter"], json!(["id", "==", "CmfTask:9"]));
}

#[tokio::test]
async fn test_task_get_without_code_or_id_sends_nothing() {
    let server = MockServer::start().await;
    let err = registry(&server)
        .execute("eva_task_get", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_task_count() {
    let server = MockServer::start().await;
    mock_result(&server, json!(42)).await;

    let result = registry(&server)
        .execute("eva_task_count", json!({"status_type": "OPEN"}))
        .await
        .unwrap();
    assert_eq!(json_content(result), json!({"count": 42}));

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfTask.count");
    assert_eq!(kwargs, json!({"filter": ["cache_status_type", "==", "OPEN"]}));
}

#[tokio::test]
async fn test_task_create_requires_name() {
    let server = MockServer::start().await;
    let err = registry(&server)
        .execute("eva_task_create", json!({"name": "", "project_id": "CmfProject:1"}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("name is required"));
}

#[tokio::test]
async fn test_task_update() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfTask:1", "priority": 1})).await;

    registry(&server)
        .execute(
            "eva_task_update",
            json!({"id": "CmfTask:1", "updates": {"priority": 1}}),
        )
        .await
        .unwrap();

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfTask.update");
    assert_eq!(kwargs, json!({"id": "CmfTask:1", "priority": 1}));
}

#[tokio::test]
async fn test_comment_list_by_task_code() {
    let server = MockServer::start().await;
    mock_result(&server, json!([])).await;

    let result = registry(&server)
        .execute("eva_comment_list", json!({"task_code": "PROJ-1"}))
        .await
        .unwrap();
    assert_eq!(json_content(result), json!({"items": [], "has_more": false}));

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "Comment.list");
    assert_eq!(kwargs["filter"], json!(["task_id", "==", "CmfTask:PROJ-1"]));
}

#[tokio::test]
async fn test_comment_create() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "Comment:1", "text": "done"})).await;

    registry(&server)
        .execute(
            "eva_comment_create",
            json!({"task_id": "CmfTask:1", "text": "done"}),
        )
        .await
        .unwrap();

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "Comment.create");
    assert_eq!(kwargs, json!({"parent_id": "CmfTask:1", "text": "done"}));
}

#[tokio::test]
async fn test_person_current() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfPerson:1", "login": "ann"})).await;

    let result = registry(&server)
        .execute("eva_person_current", Value::Null)
        .await
        .unwrap();
    assert_eq!(json_content(result)["login"], json!("ann"));

    let (method, _) = sent(&server).await;
    assert_eq!(method, "CmfPerson.get_current");
}

#[tokio::test]
async fn test_document_list_paging_without_limit() {
    let server = MockServer::start().await;
    mock_result(&server, json!([])).await;

    registry(&server)
        .execute(
            "eva_document_list",
            json!({"offset": 200, "project_id": "CmfProject:1"}),
        )
        .await
        .unwrap();

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfDocument.list");
    assert_eq!(kwargs["slice"], json!([200, 300]));
    assert_eq!(kwargs["filter"], json!(["project_id", "==", "CmfProject:1"]));
}

#[tokio::test]
async fn test_rpc_not_found_is_categorised() {
    let server = MockServer::start().await;
    mock_body(
        &server,
        200,
        json!({"jsonrpc": "2.2", "error": {"code": -32000, "message": "Project not found"}}),
    )
    .await;

    let err = registry(&server)
        .execute("eva_project_get", json!({"code": "NOPE"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::NotFound { .. }));
}

#[tokio::test]
async fn test_get_of_missing_object_is_not_found() {
    for (tool, args) in [
        ("eva_task_get", json!({"code": "NOPE-1"})),
        ("eva_project_get", json!({"code": "NOPE"})),
        ("eva_person_get", json!({"id": "CmfPerson:0"})),
        ("eva_document_get", json!({"code": "DOC-0"})),
        ("eva_list_get", json!({"code": "SPR-0"})),
        ("eva_sprint_get", json!({"code": "SPR-0"})),
        ("eva_release_get", json!({"id": "CmfList:0"})),
        ("eva_epic_get", json!({"code": "PROJ-0"})),
        ("eva_comment_get", json!({"id": "Comment:0"})),
        ("eva_timelog_get", json!({"id": "CmfTimeTrackerHistory:0"})),
        ("eva_statushistory_get", json!({"id": "CmfStatusHistory:0"})),
        ("eva_tasklink_get", json!({"id": "CmfRelationOption:0"})),
    ] {
        let server = MockServer::start().await;
        mock_result(&server, Value::Null).await;

        let err = registry(&server).execute(tool, args).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }), "{tool}: {err:?}");
        assert_eq!(
            err.user_message(),
            "Resource not found. Please check the ID or code and try again."
        );
    }
}

#[tokio::test]
async fn test_http_401_is_unauthorized() {
    let server = MockServer::start().await;
    mock_body(&server, 401, json!({"detail": "bad token"})).await;

    let err = registry(&server)
        .execute("eva_project_list", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Unauthorized { .. }));
    assert_eq!(
        err.user_message(),
        "Authentication failed. Please check EVA_API_TOKEN."
    );
}

#[tokio::test]
async fn test_server_reports_tool_failure_in_result() {
    let server = MockServer::start().await;
    mock_body(&server, 403, json!({})).await;

    let mcp = McpServer::new(registry(&server));
    let resp = mcp
        .handle(JsonRpcRequest::new(
            1,
            "tools/call",
            Some(json!({"name": "eva_person_list", "arguments": {}})),
        ))
        .await
        .unwrap();

    let result = resp.result.unwrap();
    assert_eq!(result["isError"], json!(true));
    assert_eq!(
        result["content"][0]["text"],
        json!("Access denied. You don't have permission for this operation.")
    );
}

#[tokio::test]
async fn test_sprint_list_pins_kind() {
    let server = MockServer::start().await;
    mock_result(&server, json!([{"id": "CmfList:1", "code": "SPR-1"}])).await;

    let result = registry(&server)
        .execute(
            "eva_sprint_list",
            json!({"project_id": "CmfProject:1", "type": "release"}),
        )
        .await
        .unwrap();
    assert_eq!(json_content(result)["items"][0]["code"], json!("SPR-1"));

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfList.list");
    assert_eq!(
        kwargs["filter"],
        json!([["project_id", "==", "CmfProject:1"], ["code", "LIKE", "SPR-%"]])
    );
}

#[tokio::test]
async fn test_list_list_filters_by_type_and_status() {
    let server = MockServer::start().await;
    mock_result(&server, json!([])).await;

    registry(&server)
        .execute("eva_list_list", json!({"type": "release", "status_type": "OPEN"}))
        .await
        .unwrap();

    let (_, kwargs) = sent(&server).await;
    assert_eq!(
        kwargs["filter"],
        json!([["cache_status_type", "==", "OPEN"], ["code", "LIKE", "REL-%"]])
    );
}

#[tokio::test]
async fn test_sprint_get_rejects_release_code() {
    let server = MockServer::start().await;
    let err = registry(&server)
        .execute("eva_sprint_get", json!({"code": "REL-001641"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput { .. }));
    assert!(err.to_string().contains("sprint codes start with SPR-"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sprint_get_by_id_of_release_is_not_found() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfList:9", "code": "REL-001641"})).await;

    let err = registry(&server)
        .execute("eva_sprint_get", json!({"id": "CmfList:9"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::NotFound { .. }));

    let result = registry(&server)
        .execute("eva_release_get", json!({"id": "CmfList:9"}))
        .await
        .unwrap();
    assert_eq!(json_content(result)["code"], json!("REL-001641"));
}

#[tokio::test]
async fn test_list_close() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfList:1", "cache_status_type": "CLOSED"})).await;

    registry(&server)
        .execute("eva_list_close", json!({"id": "CmfList:1"}))
        .await
        .unwrap();

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfList.update");
    assert_eq!(kwargs, json!({"id": "CmfList:1", "cache_status_type": "CLOSED"}));
}

#[tokio::test]
async fn test_epic_get_filters_by_logic_type() {
    let server = MockServer::start().await;
    mock_result(&server, json!({"id": "CmfTask:5", "code": "PROJ-5"})).await;

    registry(&server)
        .execute("eva_epic_get", json!({"code": "PROJ-5", "fields": ["id", "code"]}))
        .await
        .unwrap();

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfTask.get");
    assert_eq!(
        kwargs,
        json!({
            "fields": ["id", "code"],
            "filter": [["code", "==", "PROJ-5"], ["logic_type.code", "==", "task.epic"]],
            "slice": [0, 1]
        })
    );
}

#[tokio::test]
async fn test_timelog_create_requires_positive_minutes() {
    let server = MockServer::start().await;
    let err = registry(&server)
        .execute("eva_timelog_create", json!({"task_id": "CmfTask:1", "time_spent": 0}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_timelog_list_by_project() {
    let server = MockServer::start().await;
    mock_result(&server, json!([{"id": "CmfTimeTrackerHistory:1", "time_spent": 30}])).await;

    registry(&server)
        .execute("eva_timelog_list", json!({"project_id": "CmfProject:1"}))
        .await
        .unwrap();

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfTimeTrackerHistory.list");
    assert_eq!(kwargs["filter"], json!(["parent.project_id", "==", "CmfProject:1"]));
}

#[tokio::test]
async fn test_tasklink_count_outgoing() {
    let server = MockServer::start().await;
    mock_result(&server, json!(4)).await;

    let result = registry(&server)
        .execute(
            "eva_tasklink_count",
            json!({"task_id": "CmfTask:1", "direction": "outgoing"}),
        )
        .await
        .unwrap();
    assert_eq!(json_content(result), json!({"count": 4}));

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfRelationOption.count");
    assert_eq!(kwargs, json!({"filter": ["source_id", "==", "CmfTask:1"]}));
}

#[tokio::test]
async fn test_tasklink_list_rejects_unknown_direction() {
    let server = MockServer::start().await;
    let err = registry(&server)
        .execute(
            "eva_tasklink_list",
            json!({"task_id": "CmfTask:1", "direction": "sideways"}),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_project_add_executor() {
    let server = MockServer::start().await;
    mock_result(&server, json!(true)).await;

    let result = registry(&server)
        .execute(
            "eva_project_add_executor",
            json!({"project_id": "CmfProject:1", "person_id": "CmfPerson:2"}),
        )
        .await
        .unwrap();
    assert_eq!(json_content(result), json!({"success": true}));

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfProject.add_executors");
    assert_eq!(kwargs, json!({"id": "CmfProject:1", "executors": ["CmfPerson:2"]}));
}

#[tokio::test]
async fn test_comment_count_by_task_code() {
    let server = MockServer::start().await;
    mock_result(&server, json!(3)).await;

    registry(&server)
        .execute("eva_comment_count", json!({"task_code": "PROJ-1"}))
        .await
        .unwrap();

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "Comment.count");
    assert_eq!(kwargs, json!({"filter": ["task_id", "==", "CmfTask:PROJ-1"]}));
}

#[tokio::test]
async fn test_person_count_flags() {
    let server = MockServer::start().await;
    mock_result(&server, json!(12)).await;

    registry(&server)
        .execute("eva_person_count", json!({"on_vacation": false}))
        .await
        .unwrap();

    let (_, kwargs) = sent(&server).await;
    assert_eq!(kwargs, json!({"filter": ["on_vacation", "==", false]}));
}

#[tokio::test]
async fn test_document_delete() {
    let server = MockServer::start().await;
    mock_result(&server, json!(true)).await;

    let result = registry(&server)
        .execute("eva_document_delete", json!({"id": "CmfDocument:1"}))
        .await
        .unwrap();
    assert_eq!(json_content(result), json!({"success": true}));

    let (method, kwargs) = sent(&server).await;
    assert_eq!(method, "CmfDocument.delete");
    assert_eq!(kwargs, json!({"id": "CmfDocument:1"}));
}

#[tokio::test]
async fn test_stats_sprint() {
    let server = MockServer::start().await;
    mock_result(
        &server,
        json!([
            {"id": "CmfTask:1", "cache_status_type": "CLOSED", "agile_story_points": 2.0},
            {"id": "CmfTask:2", "cache_status_type": "IN_PROGRESS"}
        ]),
    )
    .await;

    let result = registry(&server)
        .execute("eva_stats_sprint", json!({"sprint_code": "SPR-7"}))
        .await
        .unwrap();
    let content = json_content(result);
    assert_eq!(content["sprint_code"], json!("SPR-7"));
    assert_eq!(content["total_tasks"], json!(2));
    assert_eq!(content["completed_tasks"], json!(1));
    assert_eq!(content["tasks_by_status"], json!({"CLOSED": 1, "IN_PROGRESS": 1}));
}

#[tokio::test]
async fn test_stats_project_requires_project_id() {
    let server = MockServer::start().await;
    let err = registry(&server)
        .execute("eva_stats_project", json!({}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("project_id is required"));
}
