//! Message wall handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use wall_core::domain::{ActivePost, Post, Report};
use wall_shared::ApiResponse;
use wall_shared::dto::{PostResponse, ReportPostRequest, ReportResponse, SubmitPostRequest};

use super::optional_json;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/messages
pub async fn list_messages(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .wall
        .list_active()
        .await?
        .into_iter()
        .map(active_post_response)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// POST /api/messages
pub async fn create_message(
    state: web::Data<AppState>,
    body: web::Json<SubmitPostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state.wall.submit(&req.text, req.image_url.as_deref()).await?;
    let ttl = state.wall.policy().ttl;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post, ttl.num_seconds()))))
}

/// DELETE /api/messages/{id}
pub async fn delete_message(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.wall.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/messages/{id}/report
///
/// The body is optional; a report without a reason is still recorded.
/// A body that is present must parse.
pub async fn report_message(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let req: ReportPostRequest = optional_json(&body)?;
    let report = state
        .wall
        .report(path.into_inner(), req.reason.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        report_response(report),
        "Thanks, the post has been reported",
    )))
}

/// GET /api/reports
pub async fn list_reports(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let reports: Vec<ReportResponse> = state
        .wall
        .list_reports()
        .await?
        .into_iter()
        .map(report_response)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(reports)))
}

fn active_post_response(active: ActivePost) -> PostResponse {
    post_response(active.post, active.remaining.num_seconds())
}

fn post_response(post: Post, remaining_seconds: i64) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        text: post.text,
        created_at: post.created_at.to_rfc3339(),
        image_url: post.image_url,
        is_automated: post.is_automated,
        remaining_seconds,
    }
}

fn report_response(report: Report) -> ReportResponse {
    ReportResponse {
        id: report.id.to_string(),
        post_id: report.post_id.to_string(),
        reason: report.reason,
        created_at: report.created_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::config::WallConfig;
    use crate::handlers::configure_routes;

    fn state() -> AppState {
        AppState::in_memory(&WallConfig::default())
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_post_then_list() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/messages")
            .set_json(json!({ "text": "hello there" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["data"]["text"], "hello there");
        assert_eq!(body["data"]["is_automated"], false);

        let req = test::TestRequest::get().uri("/api/messages").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let posts = body["data"].as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0]["remaining_seconds"].as_i64().unwrap() > 0);
    }

    #[actix_web::test]
    async fn test_abusive_post_is_rejected_with_reason() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/messages")
            .set_json(json!({ "text": "AAAAA test" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["title"], "Post Rejected");
        assert!(body["detail"].as_str().unwrap().contains("same character"));
    }

    #[actix_web::test]
    async fn test_empty_text_is_bad_request() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/messages")
            .set_json(json!({ "text": "   " }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["detail"], "Message text is required");
    }

    #[actix_web::test]
    async fn test_delete_unknown_id_is_no_content() {
        let app = app!(state());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/messages/{}", Uuid::new_v4()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_delete_removes_post() {
        let state = state();
        let post = state.wall.submit("delete me", None).await.unwrap();
        let app = app!(state);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/messages/{}", post.id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri("/api/messages").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_report_with_and_without_body() {
        let app = app!(state());
        let target = Uuid::new_v4();

        let req = test::TestRequest::post()
            .uri(&format!("/api/messages/{target}/report"))
            .set_json(json!({ "reason": "spam" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["data"]["post_id"], target.to_string());
        assert_eq!(body["data"]["reason"], "spam");

        let req = test::TestRequest::post()
            .uri(&format!("/api/messages/{target}/report"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/api/reports").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_report_rejects_bad_bodies() {
        let app = app!(state());
        let uri = format!("/api/messages/{}/report", Uuid::new_v4());
        let oversized = json!({ "reason": "x".repeat(20_000) }).to_string();
        let overlong_reason = json!({ "reason": "x".repeat(600) }).to_string();

        for payload in [
            "{not json".to_string(),
            r#"{"reason": 42}"#.to_string(),
            oversized,
            overlong_reason,
        ] {
            let req = test::TestRequest::post()
                .uri(&uri)
                .insert_header(("content-type", "application/json"))
                .set_payload(payload)
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["title"], "Bad Request");
        }

        let req = test::TestRequest::get().uri("/api/reports").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_optional_json_treats_blank_body_as_default() {
        let req: ReportPostRequest = optional_json(b"  \n").unwrap();
        assert_eq!(req.reason, None);

        let req: ReportPostRequest = optional_json(br#"{"reason":"spam"}"#).unwrap();
        assert_eq!(req.reason.as_deref(), Some("spam"));
    }

    #[actix_web::test]
    async fn test_malformed_json_is_problem_response() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/messages")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["title"], "Bad Request");
    }

    #[actix_web::test]
    async fn test_health_reports_memory_storage() {
        let app = app!(state());

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }
}
