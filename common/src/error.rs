//! 에러 타입 정의

use thiserror::Error;

/// 공통 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;

/// 분석 요청 검증 에러
///
/// Display 문자열이 그대로 클라이언트의 `{ "error": ... }` 로 나간다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("요청 형식이 올바르지 않습니다.")]
    MalformedBody,

    #[error("images 배열과 type은 필수 항목입니다.")]
    MissingFields,

    #[error("images와 image는 함께 보낼 수 없습니다.")]
    AmbiguousImages,

    #[error("유효하지 않은 분석 타입입니다.")]
    InvalidKind,

    #[error("이미지 형식이 올바르지 않습니다.")]
    InvalidImage,

    #[error("요청 본문이 너무 큽니다. 사진 수를 줄이거나 크기를 줄여 주세요.")]
    BodyTooLarge,
}
