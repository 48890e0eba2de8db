use axum::Router;
use axum::body::to_bytes;
use serde_json::{Value, json};
use todo_api::application::todo_service::TodoServiceImpl;
use todo_api::http::routing::{self, todos};
use todo_api::infrastructure::memory_store::InMemoryTodoStore;

fn app() -> Router {
    let service = TodoServiceImpl::new(InMemoryTodoStore::new());
    routing::app(todos::router(todos::AppState { service }))
}

#[tokio::test]
async fn acceptance_create_list_get_update_delete() {
    let app = app();

    // create
    let res = request(&app, "POST", "/todos", Some(json!({ "title": "Buy milk", "completed": false }))).await;
    assert_eq!(res.status(), 201);
    let location = res.headers().get("location").unwrap().to_str().unwrap().to_string();
    let created = body_json(res).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(location, format!("/todos/{}", id));
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["completed"], false);
    assert_eq!(created["createdAt"], created["updatedAt"]);

    // list
    let res = request(&app, "GET", "/todos", None).await;
    assert_eq!(res.status(), 200);
    let list = body_json(res).await;
    assert_eq!(list["offset"], 0);
    assert_eq!(list["limit"], 50);
    assert_eq!(list["items"].as_array().unwrap().len(), 1);

    // get
    let res = request(&app, "GET", &format!("/todos/{}", id), None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body_json(res).await, created);

    // update
    let res = request(&app, "PUT", &format!("/todos/{}", id), Some(json!({ "title": "Updated", "completed": true }))).await;
    assert_eq!(res.status(), 200);
    let updated = body_json(res).await;
    assert_eq!(updated["title"], "Updated");
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    // delete
    let res = request(&app, "DELETE", &format!("/todos/{}", id), None).await;
    assert_eq!(res.status(), 204);

    // get 404
    let res = request(&app, "GET", &format!("/todos/{}", id), None).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn list_is_newest_first_and_paged() {
    let app = app();
    for title in ["A", "B", "C"] {
        let res = request(&app, "POST", "/todos", Some(json!({ "title": title }))).await;
        assert_eq!(res.status(), 201);
    }

    let list = body_json(request(&app, "GET", "/todos?offset=0&limit=50", None).await).await;
    let titles: Vec<_> = list["items"].as_array().unwrap().iter().map(|t| t["title"].as_str().unwrap().to_string()).collect();
    assert_eq!(titles, ["C", "B", "A"]);

    let list = body_json(request(&app, "GET", "/todos?offset=1&limit=1", None).await).await;
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
    assert_eq!(list["items"][0]["title"], "B");
    assert_eq!(list["offset"], 1);
    assert_eq!(list["limit"], 1);
}

#[tokio::test]
async fn list_rejects_bad_paging() {
    let app = app();
    let res = request(&app, "GET", "/todos?offset=-1&limit=500", None).await;
    assert_eq!(res.status(), 400);
    let problem = body_json(res).await;
    assert!(problem["errors"]["offset"].is_array());
    assert!(problem["errors"]["limit"].is_array());

    let res = request(&app, "GET", "/todos?limit=0", None).await;
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn create_validates_title() {
    let app = app();
    let res = request(&app, "POST", "/todos", Some(json!({ "title": "   " }))).await;
    assert_eq!(res.status(), 400);
    let problem = body_json(res).await;
    assert_eq!(problem["errors"]["title"][0], "Title is required.");

    let long = "x".repeat(201);
    let res = request(&app, "POST", "/todos", Some(json!({ "title": long }))).await;
    assert_eq!(res.status(), 400);

    let res = request(&app, "POST", "/todos", Some(json!({ "title": "  padded  " }))).await;
    assert_eq!(res.status(), 201);
    assert_eq!(body_json(res).await["title"], "padded");
}

#[tokio::test]
async fn malformed_id_is_400() {
    let app = app();
    for method in ["GET", "DELETE"] {
        let res = request(&app, method, "/todos/not-a-guid", None).await;
        assert_eq!(res.status(), 400);
        assert_eq!(body_json(res).await["title"], "Invalid id");
    }
    let res = request(&app, "PUT", "/todos/not-a-guid", Some(json!({ "title": "x", "completed": true }))).await;
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn missing_todo_is_404_but_delete_is_204() {
    let app = app();
    let missing = format!("/todos/{}", uuid::Uuid::new_v4());

    let res = request(&app, "GET", &missing, None).await;
    assert_eq!(res.status(), 404);

    let res = request(&app, "PUT", &missing, Some(json!({ "title": "x", "completed": true }))).await;
    assert_eq!(res.status(), 404);

    for _ in 0..2 {
        let res = request(&app, "DELETE", &missing, None).await;
        assert_eq!(res.status(), 204);
    }
}

#[tokio::test]
async fn unbindable_input_is_a_400_problem() {
    let app = app();
    let id = request(&app, "POST", "/todos", Some(json!({ "title": "A" }))).await;
    let id = body_json(id).await["id"].as_str().unwrap().to_string();

    let cases = [
        ("POST", "/todos".to_string(), Some(json!({ "title": "x", "completed": "yes" }))),
        ("POST", "/todos".to_string(), Some(json!({ "title": 5 }))),
        ("PUT", format!("/todos/{}", id), Some(json!({ "title": "x", "completed": null }))),
        ("GET", "/todos?limit=abc".to_string(), None),
    ];
    for (method, path, body) in cases {
        let res = request(&app, method, &path, body).await;
        assert_eq!(res.status(), 400, "{} {}", method, path);
        assert_eq!(res.headers().get("content-type").unwrap(), "application/problem+json");
        let problem = body_json(res).await;
        assert_eq!(problem["title"], "One or more validation errors occurred.");
        assert_eq!(problem["status"], 400);
        assert!(problem["detail"].is_string());
    }

    let res = request(&app, "GET", &format!("/todos/{}", id), None).await;
    assert_eq!(body_json(res).await["title"], "A");
}

#[tokio::test]
async fn root_and_health() {
    let app = app();
    let res = request(&app, "GET", "/", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body_json(res).await["status"], "ok");

    let res = request(&app, "GET", "/health", None).await;
    assert_eq!(res.status(), 200);
}

async fn body_json(res: hyper::Response<axum::body::Body>) -> Value {
    serde_json::from_slice(&to_bytes(res.into_body(), 1024 * 1024).await.unwrap()).unwrap()
}

async fn request(app: &Router, method: &str, path: &str, body: Option<Value>) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}
