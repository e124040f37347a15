//! 분석 요청 계약
//!
//! 클라이언트가 보내는 `{ images: [dataUrl], type }` 를 검증해
//! [`AnalysisRequest`] 로 바꾼다. 예전 단일 이미지 형식
//! `{ image: dataUrl, type }` 도 받는다.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RequestError;
use crate::types::AnalysisKind;

lazy_static! {
    static ref DATA_URL_RE: Regex =
        Regex::new(r"^data:(image/(?:jpeg|png|gif|webp));base64,(.+)$").unwrap();
}

/// 허용하는 이미지 MIME 타입
pub const ACCEPTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Data URL 에서 꺼낸 이미지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub mime_type: String,
    /// base64 본문 (디코딩하지 않음)
    pub data: String,
}

impl ImagePayload {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Data URL 파싱
///
/// # Arguments
/// * `data_url` - "data:image/png;base64,iVBOR..." 형식
///
/// # Returns
/// 허용된 MIME 타입이고 본문이 있으면 `Some`
pub fn parse_data_url(data_url: &str) -> Option<ImagePayload> {
    let caps = DATA_URL_RE.captures(data_url)?;
    Some(ImagePayload {
        mime_type: caps[1].to_string(),
        data: caps[2].to_string(),
    })
}

/// 검증이 끝난 분석 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub images: Vec<ImagePayload>,
    pub kind: AnalysisKind,
}

impl AnalysisRequest {
    /// 요청 본문(JSON 값) 검증
    ///
    /// 검사 순서: 필수 필드 → images/image 동시 사용 → type 값 → 각 이미지 형식
    pub fn from_json(body: &Value) -> Result<Self, RequestError> {
        let images = body.get("images").filter(|v| !v.is_null());
        let image = body.get("image").filter(|v| !v.is_null());
        let kind = body
            .get("type")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());

        let raw_images: Vec<&Value> = match (images, image) {
            (Some(_), Some(_)) => return Err(RequestError::AmbiguousImages),
            (Some(list), None) => match list.as_array() {
                Some(arr) if !arr.is_empty() => arr.iter().collect(),
                _ => return Err(RequestError::MissingFields),
            },
            (None, Some(single)) => match single.as_str() {
                Some(s) if !s.is_empty() => vec![single],
                _ => return Err(RequestError::MissingFields),
            },
            (None, None) => return Err(RequestError::MissingFields),
        };

        let kind: AnalysisKind = kind
            .ok_or(RequestError::MissingFields)?
            .parse()
            .map_err(|_| RequestError::InvalidKind)?;

        let images = raw_images
            .into_iter()
            .map(|v| v.as_str().and_then(parse_data_url))
            .collect::<Option<Vec<_>>>()
            .ok_or(RequestError::InvalidImage)?;

        Ok(Self { images, kind })
    }

    /// 요청 본문(바이트) 검증
    pub fn from_slice(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| RequestError::MalformedBody)?;
        Self::from_json(&value)
    }
}

/// 클라이언트가 보내는 요청 본문
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequestBody {
    pub images: Vec<String>,
    #[serde(rename = "type")]
    pub kind: AnalysisKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =============================================
    // parse_data_url 테스트
    // =============================================

    #[test]
    fn test_parse_data_url_png() {
        let payload = parse_data_url("data:image/png;base64,AAAA").unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.data, "AAAA");
    }

    #[test]
    fn test_parse_data_url_accepts_all_mime_types() {
        for mime in ACCEPTED_MIME_TYPES {
            let url = format!("data:{};base64,R0lGOD", mime);
            assert!(parse_data_url(&url).is_some(), "거부됨: {}", mime);
        }
    }

    #[test]
    fn test_parse_data_url_rejects_other_types() {
        assert!(parse_data_url("data:image/bmp;base64,Qk0=").is_none());
        assert!(parse_data_url("data:text/plain;base64,SGVsbG8=").is_none());
    }

    #[test]
    fn test_parse_data_url_rejects_missing_payload() {
        assert!(parse_data_url("data:image/png;base64,").is_none());
        assert!(parse_data_url("not a data url").is_none());
        assert!(parse_data_url("").is_none());
    }

    #[test]
    fn test_image_payload_round_trip_url() {
        let url = "data:image/webp;base64,UklGR";
        assert_eq!(parse_data_url(url).unwrap().to_data_url(), url);
    }

    // =============================================
    // AnalysisRequest::from_json 테스트
    // =============================================

    #[test]
    fn test_from_json_valid_multi() {
        let body = json!({
            "images": ["data:image/png;base64,AAAA", "data:image/jpeg;base64,/9j/"],
            "type": "defect"
        });
        let req = AnalysisRequest::from_json(&body).unwrap();
        assert_eq!(req.kind, AnalysisKind::Defect);
        assert_eq!(req.images.len(), 2);
        assert_eq!(req.images[1].mime_type, "image/jpeg");
    }

    #[test]
    fn test_from_json_legacy_single_image() {
        let body = json!({ "image": "data:image/png;base64,AAAA", "type": "register" });
        let req = AnalysisRequest::from_json(&body).unwrap();
        assert_eq!(req.kind, AnalysisKind::Register);
        assert_eq!(req.images.len(), 1);
    }

    #[test]
    fn test_from_json_both_shapes_rejected() {
        let body = json!({
            "images": ["data:image/png;base64,AAAA"],
            "image": "data:image/png;base64,AAAA",
            "type": "defect"
        });
        assert_eq!(AnalysisRequest::from_json(&body), Err(RequestError::AmbiguousImages));
    }

    #[test]
    fn test_from_json_missing_fields() {
        let cases = vec![
            json!({ "type": "defect" }),
            json!({ "images": [], "type": "defect" }),
            json!({ "images": "data:image/png;base64,AAAA", "type": "defect" }),
            json!({ "images": ["data:image/png;base64,AAAA"] }),
            json!({ "images": ["data:image/png;base64,AAAA"], "type": "" }),
            json!([]),
            json!(null),
        ];
        for body in cases {
            assert_eq!(
                AnalysisRequest::from_json(&body),
                Err(RequestError::MissingFields),
                "본문: {}",
                body
            );
        }
    }

    #[test]
    fn test_from_json_invalid_kind() {
        let body = json!({ "images": ["data:image/png;base64,AAAA"], "type": "invalid" });
        assert_eq!(AnalysisRequest::from_json(&body), Err(RequestError::InvalidKind));
    }

    #[test]
    fn test_from_json_kind_checked_before_images() {
        let body = json!({ "images": ["garbage"], "type": "invalid" });
        assert_eq!(AnalysisRequest::from_json(&body), Err(RequestError::InvalidKind));
    }

    #[test]
    fn test_from_json_invalid_image() {
        let body = json!({
            "images": ["data:image/png;base64,AAAA", "https://example.com/a.png"],
            "type": "defect"
        });
        assert_eq!(AnalysisRequest::from_json(&body), Err(RequestError::InvalidImage));

        let body = json!({ "images": [42], "type": "defect" });
        assert_eq!(AnalysisRequest::from_json(&body), Err(RequestError::InvalidImage));
    }

    #[test]
    fn test_from_slice_malformed() {
        assert_eq!(
            AnalysisRequest::from_slice(b"{not json"),
            Err(RequestError::MalformedBody)
        );
    }

    #[test]
    fn test_request_body_serialize() {
        let body = AnalyzeRequestBody {
            images: vec!["data:image/png;base64,AAAA".to_string()],
            kind: AnalysisKind::Register,
        };
        let json = serde_json::to_string(&body).expect("직렬화 실패");
        assert_eq!(json, r#"{"images":["data:image/png;base64,AAAA"],"type":"register"}"#);
    }
}
