//! Integration tests for the page manager.
//!
//! These tests verify the interaction between multiple modules: the admin
//! service flow end to end, and the HTTP router on top of it.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

use page_manager::fallback::FallbackStore;
use page_manager::http;
use page_manager::page::{LangMap, Page, PageDraft};
use page_manager::service::PageService;
use page_manager::store::PageStore;

// ==================== Test Helpers ====================

fn create_test_service() -> (Arc<PageService>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = PageStore::open_in_memory().expect("Failed to open store");
    let fallback = FallbackStore::new(temp_dir.path().join("content"));
    (Arc::new(PageService::new(store, fallback)), temp_dir)
}

fn about_draft() -> PageDraft {
    PageDraft {
        template: "default".to_string(),
        name: "about".to_string(),
        title: LangMap::from([(1, "About Us".to_string()), (2, "關於我們".to_string())]),
        content: LangMap::from([(1, "<p>Hello</p>".to_string())]),
        ..PageDraft::default()
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body should be valid JSON")
}

// ==================== Admin Flow Tests ====================

#[test]
fn test_full_admin_flow() {
    let (service, temp_dir) = create_test_service();

    // Create: slug derived from the default-language title, fallback files
    // provisioned for both active languages.
    let page = service.submit_create(about_draft()).expect("create");
    assert_eq!(page.slug, "about-us");
    assert!(!page.published);
    assert!(temp_dir.path().join("content/about_en.html").exists());
    assert!(temp_dir.path().join("content/about_zh.html").exists());

    // List: localized title column.
    let list = service.list_pages(None).expect("list");
    assert_eq!(list.rows.len(), 1);
    assert_eq!(list.rows[0].title, "About Us");

    // Edit form: template read from the row, values populated, the missing
    // Chinese content showing its fallback reference.
    let form = service.show_edit_form(page.id, None).expect("edit form");
    assert_eq!(form.template, "default");
    let content_zh = form
        .fields
        .iter()
        .find(|f| f.name == "content[2]")
        .expect("per-language field");
    assert_eq!(content_zh.value.as_deref(), Some("about_zh"));

    // Update: same composition flow as create.
    let mut draft = about_draft();
    draft.content.insert(2, "<p>你好</p>".to_string());
    let updated = service.submit_update(page.id, draft).expect("update");
    assert_eq!(updated.content.get(&2).unwrap(), "<p>你好</p>");

    // Publish/unpublish toggles only the flag; the pair is a no-op.
    let published = service.publish(page.id).expect("publish");
    assert!(published.published);
    let unpublished = service.unpublish(page.id).expect("unpublish");
    assert!(!unpublished.published);
    assert_eq!(unpublished.title, updated.title);
    assert_eq!(unpublished.slug, updated.slug);

    // Delete: row gone, fallback files deliberately left behind.
    service.delete(page.id).expect("delete");
    assert!(service.list_pages(None).expect("list").rows.is_empty());
    assert!(temp_dir.path().join("content/about_en.html").exists());
}

#[test]
fn test_content_fallback_through_service() {
    let (service, temp_dir) = create_test_service();
    let page = service.submit_create(about_draft()).expect("create");

    // Stored English content wins; Chinese falls back to its file, which is
    // an empty placeholder until an editor fills it.
    assert_eq!(service.render_content(page.id, None).unwrap(), "<p>Hello</p>");

    let zh = page_manager::i18n::Language::from_code("zh").unwrap();
    assert_eq!(service.render_content(page.id, Some(zh)).unwrap(), "");

    std::fs::write(
        temp_dir.path().join("content/about_zh.html"),
        "<h1>手寫內容</h1>",
    )
    .expect("write fallback");
    assert_eq!(
        service.render_content(page.id, Some(zh)).unwrap(),
        "<h1>手寫內容</h1>"
    );
}

// ==================== Router Tests ====================

#[tokio::test]
async fn test_router_create_and_list() {
    let (service, _temp_dir) = create_test_service();
    let app = http::router(service);

    let body = serde_json::to_string(&about_draft()).unwrap();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/pages")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Page = read_json(response).await;
    assert_eq!(created.slug, "about-us");

    let response = app
        .oneshot(Request::builder().uri("/pages").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let list: serde_json::Value = read_json(response).await;
    assert_eq!(list["rows"][0]["title"], "About Us");
    assert_eq!(list["columns"][0]["name"], "title");
}

#[tokio::test]
async fn test_router_list_with_language_query() {
    let (service, _temp_dir) = create_test_service();
    service.submit_create(about_draft()).expect("create");
    let app = http::router(service);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/pages?lang=zh")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let list: serde_json::Value = read_json(response).await;
    assert_eq!(list["rows"][0]["title"], "關於我們");
}

#[tokio::test]
async fn test_router_new_form_unknown_template_is_bad_request() {
    let (service, _temp_dir) = create_test_service();
    let app = http::router(service);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/pages/new?template=gallery")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("gallery"));
}

#[tokio::test]
async fn test_router_new_form_empty_template_uses_default() {
    let (service, _temp_dir) = create_test_service();
    let app = http::router(service);

    // A bare `?template=` means "no selection", not an unknown template.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/pages/new?template=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let form: serde_json::Value = read_json(response).await;
    assert_eq!(form["template"], "default");
}

#[tokio::test]
async fn test_router_missing_page_is_not_found() {
    let (service, _temp_dir) = create_test_service();
    let app = http::router(service);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/pages/42/edit")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_router_publish_cycle() {
    let (service, _temp_dir) = create_test_service();
    let page = service.submit_create(about_draft()).expect("create");
    let app = http::router(service);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/pages/{}/publish", page.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let published: Page = read_json(response).await;
    assert!(published.published);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/pages/{}/unpublish", page.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let unpublished: Page = read_json(response).await;
    assert!(!unpublished.published);
    assert_eq!(unpublished.title, page.title);
}

#[tokio::test]
async fn test_router_content_endpoint() {
    let (service, _temp_dir) = create_test_service();
    let page = service.submit_create(about_draft()).expect("create");
    let app = http::router(service);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/pages/{}/content", page.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<p>Hello</p>");
}

#[tokio::test]
async fn test_router_delete() {
    let (service, _temp_dir) = create_test_service();
    let page = service.submit_create(about_draft()).expect("create");
    let app = http::router(service);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/pages/{}", page.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/pages/{}/edit", page.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
