use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{get, post},
    BoxError, Json, Router,
};
use serde::Deserialize;
use tower::{timeout::{error::Elapsed, TimeoutLayer}, ServiceBuilder};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};
use utoipa::OpenApi;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod companies;
pub mod employees;
pub mod health;
pub mod projects;
pub mod services;

/// `?company_id=` scoping for flat child listings.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanyScopeQuery {
    pub company_id: Option<Uuid>,
}

pub(crate) fn require_company_id(id: Option<Uuid>) -> Result<Uuid, JsonApiError> {
    id.ok_or_else(|| JsonApiError::bad_request("company_id is required"))
}

async fn timeout_error(err: BoxError) -> JsonApiError {
    if err.is::<Elapsed>() {
        JsonApiError::new(StatusCode::REQUEST_TIMEOUT, "request timed out")
    } else {
        error!(event = "middleware_error", error = %err, "unhandled middleware error");
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

/// Bound each request by `timeout`. Expired requests answer 408 with a JSON `{error}` body.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(timeout_error))
            .layer(TimeoutLayer::new(timeout)),
    )
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router with tracing, CORS and a per-request timeout.
pub fn build_router(state: AppState, cors: CorsLayer, request_timeout: Duration) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api/health", get(health::db_health))
        .route("/api/openapi.json", get(openapi_json));

    let companies = Router::new()
        .route("/api/companies", get(companies::list).post(companies::create))
        .route(
            "/api/companies/:id",
            get(companies::get).put(companies::update).delete(companies::delete),
        )
        .route("/api/companies/:id/summary", get(companies::summary))
        .route(
            "/api/companies/:id/services",
            get(companies::list_services).post(companies::add_service),
        )
        .route(
            "/api/companies/:id/projects",
            get(companies::list_projects).post(companies::add_project),
        )
        .route(
            "/api/companies/:id/employees",
            get(companies::list_employees).post(companies::add_employee),
        );

    let children = Router::new()
        .route("/api/services", get(services::list).post(services::create))
        .route(
            "/api/services/:id",
            get(services::get).put(services::update).delete(services::delete),
        )
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/projects/:id",
            get(projects::get).put(projects::update).delete(projects::delete),
        )
        .route("/api/employees", get(employees::list).post(employees::create))
        .route(
            "/api/employees/:id",
            get(employees::get).put(employees::update).delete(employees::delete),
        )
        .route("/api/employees/:id/transfer", post(employees::transfer));

    let app = public.merge(companies).merge(children).with_state(state);
    with_request_timeout(app, request_timeout)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn slow_requests_time_out_with_json_body() -> anyhow::Result<()> {
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                "done"
            }),
        );
        let app = with_request_timeout(slow, Duration::from_millis(1));
        let res = app.oneshot(Request::get("/slow").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
        let body: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
        assert_eq!(body["error"], "request timed out");
        Ok(())
    }

    #[tokio::test]
    async fn fast_requests_pass_through() -> anyhow::Result<()> {
        let fast = Router::new().route("/fast", get(|| async { "done" }));
        let res = with_request_timeout(fast, Duration::from_secs(5))
            .oneshot(Request::get("/fast").body(Body::empty())?)
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
        Ok(())
    }
}
