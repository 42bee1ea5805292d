//! Post CRUD handlers - the HTTP face of the intake pipeline.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quillpress_core::domain::Post;
use quillpress_core::{pipeline, segment};
use quillpress_shared::dto::{PostDetailResponse, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts
///
/// The body is taken raw: payload repair has to see the unparsed text
/// before any JSON parsing happens.
pub async fn create(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let raw = body_text(&body)?;

    let post = pipeline::submit(state.posts.as_ref(), state.reflow.as_ref(), raw).await?;

    tracing::info!(post_id = %post.id, "Post created");
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts
///
/// The store promises no order; sorting newest-first is presentation's job
/// and happens here.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let mut posts = state.posts.list().await?;
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
///
/// Returns the record along with its display paragraphs, re-derived from
/// the stored content on every read.
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let post = state
        .posts
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;

    let paragraphs: Vec<String> = segment::paragraphs(&post.content)
        .map(str::to_owned)
        .collect();

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: to_response(post),
        paragraphs,
    }))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let raw = body_text(&body)?;

    let post = pipeline::revise(state.posts.as_ref(), state.reflow.as_ref(), id, raw)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let post = state
        .posts
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;

    tracing::info!(post_id = %post.id, "Post deleted");
    Ok(HttpResponse::Ok().json(to_response(post)))
}

fn body_text(body: &web::Bytes) -> Result<&str, AppError> {
    std::str::from_utf8(body)
        .map_err(|_| AppError::Unreadable("request body is not valid UTF-8".to_string()))
}

/// An id that is not a well-formed UUID addresses nothing - not-found, not
/// a server fault.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("post {raw} not found")))
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        content: post.content,
        author: post.author,
        image: post.image,
        tags: post.tags,
        created_at: post.created_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    async fn app_state() -> AppState {
        AppState::new(None).await
    }

    #[actix_web::test]
    async fn create_then_fetch_round_trips() {
        let state = app_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_payload(r#"{"title": "Hi", "content": "One. Two.", "author": "jo"}"#)
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["title"], "Hi");

        let id = created["id"].as_str().expect("id should be present");
        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{id}"))
            .to_request();
        let detail: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(detail["content"], "One.\n\nTwo.");
        assert_eq!(
            detail["paragraphs"],
            serde_json::json!(["One.", "Two."])
        );
    }

    #[actix_web::test]
    async fn invalid_payload_gets_field_level_errors() {
        let state = app_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_payload(r#"{"title": ""}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 422);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let params = body["invalid-params"].as_array().expect("field details");
        let fields: Vec<&str> = params
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert_eq!(fields, vec!["title", "content", "author"]);
    }

    #[actix_web::test]
    async fn unknown_and_malformed_ids_are_not_found() {
        let state = app_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", Uuid::new_v4()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::delete()
            .uri("/api/posts/not-a-uuid")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }
}
