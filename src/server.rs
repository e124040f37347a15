//! HTTP 서버
//!
//! - `POST /api/analyze` 사진 분석
//! - `GET /api/checklist` 계약 체크리스트
//! - `GET /health`

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use checkmyroom_common::checklist::{BuildingType, ContractType};
use checkmyroom_common::{
    get_checklist_items, AnalysisRequest, AnalyzeResponse, ChecklistItem, RequestError,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::analysis::run_analysis;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::gemini::VisionModel;

/// 요청 본문 최대 크기 (base64 이미지 여러 장)
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    /// API 키가 없으면 None
    pub model: Option<Arc<dyn VisionModel>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(model: Option<Arc<dyn VisionModel>>, config: Config) -> Self {
        Self {
            model,
            config: Arc::new(config),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_configured: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChecklistQuery {
    pub contract: Option<String>,
    pub building: Option<String>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model_configured: state.model.is_some(),
    })
}

/// 본문 읽기 실패를 요청 오류로
fn body_error(rejection: BytesRejection) -> RequestError {
    tracing::info!(error = %rejection, "요청 본문 읽기 실패");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RequestError::BodyTooLarge
    } else {
        RequestError::MalformedBody
    }
}

/// 키 확인 → 본문 크기 → 본문 JSON → 필드 검증 순서
async fn analyze(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<AnalyzeResponse>> {
    let model = state.model.as_deref().ok_or(AppError::MissingApiKey)?;
    let body = body.map_err(body_error)?;
    let request = AnalysisRequest::from_slice(&body).inspect_err(|err| {
        tracing::info!(error = %err, "잘못된 분석 요청");
    })?;

    let result = run_analysis(model, &request).await?;
    Ok(Json(AnalyzeResponse { result }))
}

async fn checklist(Query(query): Query<ChecklistQuery>) -> Json<&'static [ChecklistItem]> {
    let contract = query
        .contract
        .unwrap_or_else(|| ContractType::default().as_str().to_string());
    let building = query
        .building
        .unwrap_or_else(|| BuildingType::default().as_str().to_string());
    Json(get_checklist_items(&contract, &building))
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .route("/api/checklist", get(checklist))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn serve(state: AppState, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(
        addr = %bind,
        model_configured = state.model.is_some(),
        "서버 시작"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("서버 종료");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "종료 신호 대기 실패");
    }
}
