//! Page-level tests through the actix service, with scripted backends.
mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use std::sync::Arc;

use common::{
    call_log, post_json, test_config, Reply, ScriptedApi, ScriptedProvider, ScriptedStore,
    TEST_SESSION_SECRET,
};
use picx::auth::{issue_session, IdentityProvider};
use picx::graphql::GraphApi;
use picx::handlers;
use picx::handlers::create::MAX_IMAGE_BYTES;
use picx::storage::ObjectStore;

fn feed_reply(posts: Vec<serde_json::Value>) -> Reply {
    Reply::Data(serde_json::json!({
        "listPosts": { "items": posts, "nextToken": null }
    }))
}

async fn spawn_app(
    api: ScriptedApi,
    store: ScriptedStore,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let api: web::Data<dyn GraphApi> = web::Data::from(Arc::new(api) as Arc<dyn GraphApi>);
    let store: web::Data<dyn ObjectStore> =
        web::Data::from(Arc::new(store) as Arc<dyn ObjectStore>);
    let provider: web::Data<dyn IdentityProvider> =
        web::Data::from(Arc::new(ScriptedProvider::new(call_log())) as Arc<dyn IdentityProvider>);

    test::init_service(
        App::new()
            .app_data(api)
            .app_data(store)
            .app_data(provider)
            .app_data(web::Data::new(test_config()))
            .route("/", web::get().to(handlers::home::index))
            .route("/create", web::get().to(handlers::create::form))
            .route("/create", web::post().to(handlers::create::submit))
            .route("/post/{id}", web::get().to(handlers::post_detail::show))
            .route("/login", web::get().to(handlers::auth::login_form))
            .route("/login", web::post().to(handlers::auth::login))
            .route("/signup", web::get().to(handlers::auth::signup_form))
            .route("/signup", web::post().to(handlers::auth::signup)),
    )
    .await
}

fn session_cookie(username: &str) -> actix_web::cookie::Cookie<'static> {
    issue_session(username, "access-token", TEST_SESSION_SECRET, 3600, false).unwrap()
}

/// Build a multipart body with text fields and, optionally, an image file
/// part the way a browser submits the compose form. An empty byte slice
/// mirrors submitting with no file chosen.
fn multipart_body(boundary: &str, fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = image {
        let filename = if bytes.is_empty() { "" } else { "photo.png" };
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

#[actix_web::test]
async fn feed_renders_every_post_in_response_order() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        feed_reply(vec![
            post_json("p-1", "First"),
            post_json("p-2", "Second"),
            post_json("p-3", "Third"),
        ]),
        Reply::Network("no writes expected".into()),
    );
    let app = spawn_app(api, ScriptedStore::new(log)).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
    assert_eq!(body.matches("post-preview").count(), 3);
    let first = body.find("First").unwrap();
    let second = body.find("Second").unwrap();
    let third = body.find("Third").unwrap();
    assert!(first < second && second < third);
}

#[actix_web::test]
async fn failed_feed_load_still_renders_the_page_with_a_notice() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        Reply::Network("connection refused".into()),
        Reply::Network("no writes expected".into()),
    );
    let app = spawn_app(api, ScriptedStore::new(log)).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
    assert!(body.contains("notice error"));
    assert!(body.contains("connection refused"));
    assert_eq!(body.matches("post-preview").count(), 0);
}

#[actix_web::test]
async fn guest_header_offers_login_and_signup_only() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        feed_reply(vec![]),
        Reply::Network("no writes expected".into()),
    );
    let app = spawn_app(api, ScriptedStore::new(log)).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();

    assert!(body.contains("Guest User"));
    assert!(body.contains(r#"href="/login""#));
    assert!(body.contains(r#"href="/signup""#));
    assert!(!body.contains(r#"href="/create""#));
}

#[actix_web::test]
async fn signed_in_header_shows_the_account_and_create_affordance() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        feed_reply(vec![]),
        Reply::Network("no writes expected".into()),
    );
    let app = spawn_app(api, ScriptedStore::new(log)).await;

    let request = test::TestRequest::get()
        .uri("/")
        .cookie(session_cookie("alice"))
        .to_request();
    let response = test::call_service(&app, request).await;
    let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();

    assert!(body.contains("alice"));
    assert!(body.contains(r#"href="/create""#));
    assert!(!body.contains("Guest User"));
    assert!(!body.contains(r#"href="/login""#));
}

#[actix_web::test]
async fn compose_form_requires_a_session() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        feed_reply(vec![]),
        Reply::Network("no writes expected".into()),
    );
    let app = spawn_app(api, ScriptedStore::new(log)).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/create").to_request()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap().to_str().unwrap(),
        "/login"
    );
}

#[actix_web::test]
async fn failed_mutation_keeps_the_user_on_the_compose_page() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        Reply::Network("no reads expected".into()),
        Reply::Network("connection refused".into()),
    );
    let app = spawn_app(api, ScriptedStore::new(log)).await;

    let boundary = "test-boundary";
    let request = test::TestRequest::post()
        .uri("/create")
        .cookie(session_cookie("alice"))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(
            boundary,
            &[("title", "Hello"), ("contents", "World")],
            None,
        ))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
    assert!(body.contains("notice error"));
    assert!(body.contains("connection refused"));
    // Submitted values survive the failure
    assert!(body.contains(r#"value="Hello""#));
    assert!(body.contains(">World</textarea>"));
}

#[actix_web::test]
async fn invalid_form_rerenders_with_inline_messages() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        Reply::Network("no reads expected".into()),
        Reply::Network("no writes expected".into()),
    );
    let app = spawn_app(api, ScriptedStore::new(log.clone())).await;

    let boundary = "test-boundary";
    let request = test::TestRequest::post()
        .uri("/create")
        .cookie(session_cookie("alice"))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(boundary, &[("title", ""), ("contents", "")], None))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
    assert!(body.contains("Please enter a title."));
    assert!(body.contains("Please enter some content for your post."));
    assert!(log.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn successful_submission_navigates_to_the_new_post() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        Reply::Network("no reads expected".into()),
        Reply::Data(serde_json::json!({ "createPost": post_json("p-9", "Hello") })),
    );
    let app = spawn_app(api, ScriptedStore::new(log)).await;

    let boundary = "test-boundary";
    let request = test::TestRequest::post()
        .uri("/create")
        .cookie(session_cookie("alice"))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(
            boundary,
            &[("title", "Hello"), ("contents", "World")],
            None,
        ))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap().to_str().unwrap(),
        "/post/p-9?created=1"
    );
}

#[actix_web::test]
async fn submitted_image_is_uploaded_before_the_mutation() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        Reply::Network("no reads expected".into()),
        Reply::Data(serde_json::json!({ "createPost": post_json("p-9", "Hello") })),
    );
    let app = spawn_app(api, ScriptedStore::new(log.clone())).await;

    let boundary = "test-boundary";
    let request = test::TestRequest::post()
        .uri("/create")
        .cookie(session_cookie("alice"))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(
            boundary,
            &[("title", "Hello"), ("contents", "World")],
            Some(&[0x89, 0x50, 0x4e, 0x47]),
        ))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let calls = log.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].starts_with("put:"));
    assert_eq!(calls[1], "mutate:CreatePost");
}

#[actix_web::test]
async fn empty_image_part_never_touches_storage() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        Reply::Network("no reads expected".into()),
        Reply::Data(serde_json::json!({ "createPost": post_json("p-9", "Hello") })),
    );
    let app = spawn_app(api, ScriptedStore::new(log.clone())).await;

    let boundary = "test-boundary";
    let request = test::TestRequest::post()
        .uri("/create")
        .cookie(session_cookie("alice"))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(
            boundary,
            &[("title", "Hello"), ("contents", "World")],
            Some(&[]),
        ))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let calls = log.lock().unwrap().clone();
    assert_eq!(calls, vec!["mutate:CreatePost"]);
}

#[actix_web::test]
async fn oversized_image_upload_is_rejected() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        Reply::Network("no reads expected".into()),
        Reply::Network("no writes expected".into()),
    );
    let app = spawn_app(api, ScriptedStore::new(log.clone())).await;

    let oversized = vec![0u8; MAX_IMAGE_BYTES + 1];
    let boundary = "test-boundary";
    let request = test::TestRequest::post()
        .uri("/create")
        .cookie(session_cookie("alice"))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(
            boundary,
            &[("title", "Hello"), ("contents", "World")],
            Some(&oversized),
        ))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
    assert!(body.contains("exceeds its size limit"));
    assert!(log.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn successful_signup_redirects_to_login_with_its_notice() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        Reply::Network("no reads expected".into()),
        Reply::Network("no writes expected".into()),
    );
    let app = spawn_app(api, ScriptedStore::new(log)).await;

    let request = test::TestRequest::post()
        .uri("/signup")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload("username=alice&email=alice%40example.com&password=longenough")
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap().to_str().unwrap(),
        "/login?registered=1"
    );

    let request = test::TestRequest::get()
        .uri("/login?registered=1")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
    assert!(body.contains("notice success"));
    assert!(body.contains("Account created. Please log in."));
}

#[actix_web::test]
async fn missing_post_is_a_404() {
    let log = call_log();
    let api = ScriptedApi::new(
        log.clone(),
        Reply::Data(serde_json::json!({ "getPost": null })),
        Reply::Network("no writes expected".into()),
    );
    let app = spawn_app(api, ScriptedStore::new(log)).await;

    let request = test::TestRequest::get().uri("/post/p-404").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
