//! 오류 케이스 테스트
//!
//! 각 오류의 표시 메시지와 HTTP 상태 매핑 검증

use axum::http::StatusCode;
use checkmyroom::error::{AppError, ModelError, GENERIC_MODEL_ERROR};
use checkmyroom::scanner;
use checkmyroom_common::RequestError;
use std::path::PathBuf;
use tempfile::tempdir;

/// 존재하지 않는 경로
#[test]
fn test_collect_nonexistent_path() {
    let result = scanner::collect_images(&[PathBuf::from("/nonexistent/path/12345")]);
    assert!(matches!(result, Err(AppError::FileNotFound(_))));
}

/// 사진이 없는 폴더는 오류가 아니라 빈 목록
#[test]
fn test_collect_folder_without_images() {
    let dir = tempdir().expect("임시 폴더 생성 실패");
    std::fs::write(dir.path().join("memo.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::collect_images(&[dir.path().to_path_buf()]).unwrap();
    assert!(result.is_empty());
}

/// 클라이언트 입력 오류는 400, 문구는 그대로
#[test]
fn test_request_errors_are_bad_request() {
    let cases = [
        (RequestError::MalformedBody, "요청 형식이 올바르지 않습니다."),
        (RequestError::MissingFields, "images 배열과 type은 필수 항목입니다."),
        (RequestError::InvalidKind, "유효하지 않은 분석 타입입니다."),
        (RequestError::InvalidImage, "이미지 형식이 올바르지 않습니다."),
    ];

    for (req_err, message) in cases {
        let err: AppError = req_err.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), message);
    }
}

#[test]
fn test_missing_api_key() {
    let err = AppError::MissingApiKey;
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.to_string(), "GEMINI_API_KEY가 설정되지 않았습니다.");
}

/// 모델 오류는 502
#[test]
fn test_model_errors_are_bad_gateway() {
    let errors: Vec<AppError> = vec![
        ModelError::Status { status: 429, message: Some("quota exceeded".into()) }.into(),
        ModelError::Status { status: 500, message: None }.into(),
        ModelError::EmptyResponse.into(),
        ModelError::Transport("connection reset".into()).into(),
    ];

    for err in &errors {
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(!err.to_string().is_empty());
    }
    assert_eq!(errors[0].to_string(), "quota exceeded");
    assert_eq!(errors[1].to_string(), GENERIC_MODEL_ERROR);
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: AppError = io_err.into();

    assert!(matches!(err, AppError::Io(_)));
    assert!(err.to_string().contains("IO"));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: AppError = json_err.into();

    assert!(matches!(err, AppError::Json(_)));
}

/// common::Error 는 그대로 투과
#[test]
fn test_store_error_transparent() {
    let err: AppError = checkmyroom_common::Error::Store("디스크 가득 참".to_string()).into();
    assert!(matches!(err, AppError::Store(_)));
    assert!(err.to_string().contains("디스크 가득 참"));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
