use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkmyroom_common::RequestError;
use serde_json::json;
use thiserror::Error;

/// 모델 호출 실패 시 기본 메시지
pub const GENERIC_MODEL_ERROR: &str = "Gemini API 호출 중 오류가 발생했습니다.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("GEMINI_API_KEY가 설정되지 않았습니다.")]
    MissingApiKey,

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("이미지를 찾을 수 없습니다: {0}")]
    NoImagesFound(String),

    #[error("이미지 처리 오류: {0}")]
    Image(String),

    #[error("JSON 오류: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] checkmyroom_common::Error),

    #[error("CLI 실행 오류: {0}")]
    Cli(String),
}

/// AI 모델 호출 오류
#[derive(Error, Debug)]
pub enum ModelError {
    /// 2xx 가 아닌 응답. API 가 준 메시지가 있으면 담는다
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_MODEL_ERROR))]
    Status { status: u16, message: Option<String> },

    #[error("Gemini 응답에 텍스트가 없습니다.")]
    EmptyResponse,

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        // URL 에 API 키가 들어 있으므로 제거
        ModelError::Transport(err.without_url().to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Request(_) => StatusCode::BAD_REQUEST,
            AppError::Model(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Model(err) => {
                tracing::error!(error = %err, "Gemini API 호출 실패");
                let message = err.to_string();
                if message.trim().is_empty() {
                    GENERIC_MODEL_ERROR.to_string()
                } else {
                    message
                }
            }
            AppError::MissingApiKey | AppError::Request(_) => self.to_string(),
            other => {
                tracing::error!(error = %other, "내부 오류");
                other.to_string()
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
