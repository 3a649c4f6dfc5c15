//! `HttpAdminApi` and `LanguageToolClient` against an in-process stub of
//! the admin backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Form, Multipart, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use scribe_common::{
    AdminApi, FileReference, HttpAdminApi, IssueKind, LanguageToolClient, NewPostForm,
    ProcessMediaRequest, ScribeError, SpellCheck,
};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Recorded {
    saves: Arc<Mutex<Vec<(String, String)>>>,
    deletes: Arc<Mutex<Vec<String>>>,
    posts: Arc<Mutex<Vec<Value>>>,
}

type Params = Query<HashMap<String, String>>;

async fn list(Query(params): Params) -> Json<Value> {
    match params.get("lang").map(String::as_str) {
        Some("en") => Json(json!(["post1.md", "post2.md"])),
        Some("de") => Json(json!(null)),
        _ => Json(json!({"en": ["post1.md"], "de": []})),
    }
}

async fn load(Query(params): Params) -> Result<String, StatusCode> {
    match params.get("file").map(String::as_str) {
        Some("en/post1.md") => Ok("# Hello\n".to_owned()),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn save(State(rec): State<Recorded>, Query(params): Params, body: String) -> StatusCode {
    let file = params.get("file").cloned().unwrap_or_default();
    if file.starts_with("de/") {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    rec.saves.lock().unwrap().push((file, body));
    StatusCode::OK
}

async fn create_post(State(rec): State<Recorded>, Json(form): Json<Value>) -> Json<Value> {
    let slug = form["slug"].as_str().unwrap_or_default().to_owned();
    rec.posts.lock().unwrap().push(form);
    Json(json!({ "filename": format!("{slug}.md") }))
}

async fn process_media(Json(req): Json<Value>) -> Json<Value> {
    Json(json!({ "filename": format!("{}.webp", req["newName"].as_str().unwrap_or_default()) }))
}

async fn upload(mut multipart: Multipart) -> Json<Value> {
    let mut out = json!({});
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_owned();
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await.unwrap();
        out = json!({ "field": name, "filename": file_name, "size": bytes.len() });
    }
    Json(out)
}

async fn remove(State(rec): State<Recorded>, Query(params): Params) -> StatusCode {
    rec.deletes
        .lock()
        .unwrap()
        .push(params.get("file").cloned().unwrap_or_default());
    StatusCode::NO_CONTENT
}

async fn check(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(form.get("enabledOnly").map(String::as_str), Some("false"));
    let text = form.get("text").cloned().unwrap_or_default();
    let offset = text.find("teh").unwrap_or(0);
    Json(json!({
        "matches": [
            {"offset": offset, "length": 3, "message": "typo",
             "rule": {"id": "X", "category": {"id": "TYPOS"}}}
        ]
    }))
}

async fn spawn_backend() -> (String, Recorded) {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/config", get(|| async {
            Json(json!({"shortcodes": [{"id": "bold", "code": "**text**", "icon": "bold", "order": 1, "tooltip": "Bold"}]}))
        }))
        .route("/api/list", get(list))
        .route("/api/load", get(load))
        .route("/api/save", post(save))
        .route("/api/media-list", get(|| async { Json(json!(["cat.png"])) }))
        .route("/api/process-media", post(process_media))
        .route("/api/upload-media", post(upload))
        .route("/api/delete-media", delete(remove))
        .route("/api/tags", get(|| async { Json(json!([{"name": "rust", "count": 3}])) }))
        .route("/api/categories", get(|| async { Json(json!(null)) }))
        .route("/api/create-post", post(create_post))
        .route("/v2/check", post(check))
        .with_state(rec.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), rec)
}

#[tokio::test]
async fn fetches_config_and_listings() {
    let (base, _) = spawn_backend().await;
    let api = HttpAdminApi::new(&base).unwrap();

    let config = api.config().await.unwrap();
    assert_eq!(config.shortcodes[0].id, "bold");

    let en = api.list_files("en").await.unwrap();
    assert_eq!(en.files_for("en"), vec!["post1.md", "post2.md"]);

    // `null` from an empty folder decodes as an empty listing.
    let de = api.list_files("de").await.unwrap();
    assert!(de.files_for("de").is_empty());
}

#[tokio::test]
async fn loads_and_saves_by_language_path() {
    let (base, rec) = spawn_backend().await;
    let api = HttpAdminApi::new(&base).unwrap();

    let file = FileReference::new("en", "post1.md");
    assert_eq!(api.load_file(&file).await.unwrap(), "# Hello\n");

    api.save_file(&file, "# Changed\n".to_owned()).await.unwrap();
    let saves = rec.saves.lock().unwrap().clone();
    assert_eq!(saves, vec![("en/post1.md".to_owned(), "# Changed\n".to_owned())]);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (base, _) = spawn_backend().await;
    let api = HttpAdminApi::new(&base).unwrap();

    let err = api
        .save_file(&FileReference::new("de", "x.md"), String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ScribeError::Status { status: 500, .. }));

    let err = api
        .load_file(&FileReference::new("en", "missing.md"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn media_endpoints() {
    let (base, rec) = spawn_backend().await;
    let api = HttpAdminApi::new(&base).unwrap();

    assert_eq!(api.media_list().await.unwrap(), vec!["cat.png"]);

    let processed = api
        .process_media(&ProcessMediaRequest {
            file: "cat.png".into(),
            new_name: "post1_1".into(),
        })
        .await
        .unwrap();
    assert_eq!(processed.filename, "post1_1.webp");

    let uploaded = api.upload_media("dog.png", vec![1, 2, 3]).await.unwrap();
    assert_eq!(uploaded.filename.as_deref(), Some("dog.png"));
    assert_eq!(uploaded.extra["field"], "file");
    assert_eq!(uploaded.extra["size"], 3);

    api.delete_media("cat.png").await.unwrap();
    assert_eq!(rec.deletes.lock().unwrap().clone(), vec!["cat.png"]);
}

#[tokio::test]
async fn taxonomy_and_post_creation() {
    let (base, rec) = spawn_backend().await;
    let api = HttpAdminApi::new(&base).unwrap();

    assert_eq!(api.tags().await.unwrap()[0].name, "rust");
    assert!(api.categories().await.unwrap().is_empty());

    let mut form = NewPostForm::blank("2024-05-01T10:00");
    form.title = "Hello".into();
    form.slug = "hello".into();
    form.tags = vec!["rust".into()];
    let created = api.create_post(&form).await.unwrap();
    assert_eq!(created.filename, "hello.md");

    let posts = rec.posts.lock().unwrap().clone();
    assert_eq!(posts[0]["tags"], json!(["rust"]));
    assert_eq!(posts[0]["thumbnail"]["authorUrl"], "");
}

#[tokio::test]
async fn languagetool_check() {
    let (base, _) = spawn_backend().await;
    let checker = LanguageToolClient::new(&format!("{base}/v2/check")).unwrap();

    let response = checker.check("see teh cat", "en").await.unwrap();
    assert_eq!(response.matches.len(), 1);
    assert_eq!(response.matches[0].offset, 4);
    assert_eq!(response.matches[0].kind(), IssueKind::Spelling);
}
