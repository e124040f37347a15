//! AI 응답 파서
//!
//! 모델이 돌려준 자유 텍스트에서 JSON 객체를 찾아
//! 분석 종류별 결과로 바꾼다. JSON 을 찾지 못하거나 파싱에 실패하면
//! 원문을 담은 텍스트 결과로 대체한다. 파싱된 객체는 필드 타입이
//! 어긋나도 버리지 않는다.

use crate::types::{AnalysisKind, AnalysisResult, DefectResult, RegisterResult};

/// 응답에서 JSON 객체로 보이는 부분을 추출
///
/// 처음 나오는 `{` 부터 마지막 `}` 까지 (greedy) 를 돌려준다.
///
/// # Examples
/// ```
/// use checkmyroom_common::extract_json_object;
///
/// let response = "Sure! {\"isException\": false} 입니다";
/// assert_eq!(extract_json_object(response), Some("{\"isException\": false}"));
/// ```
pub fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&response[start..=end])
}

/// 모델 응답을 분석 결과로 정규화
///
/// # Arguments
/// * `kind` - 요청한 분석 종류
/// * `response` - 모델이 돌려준 텍스트
///
/// # Returns
/// 항상 결과를 돌려준다. 형식 위반은 에러가 아니다.
pub fn normalize_response(kind: AnalysisKind, response: &str) -> AnalysisResult {
    extract_json_object(response)
        .and_then(|json| parse_object(kind, json))
        .unwrap_or_else(|| fallback_result(kind, response))
}

/// JSON 을 찾지 못했을 때의 결과
///
/// - defect: 원문을 예외 메시지로
/// - register: 점수 없이 원문을 요약으로
pub fn fallback_result(kind: AnalysisKind, response: &str) -> AnalysisResult {
    let text = response.trim();
    match kind {
        AnalysisKind::Defect => AnalysisResult::Defect(DefectResult::exception(text)),
        AnalysisKind::Register => AnalysisResult::Register(RegisterResult::text_only(text)),
    }
}

fn parse_object(kind: AnalysisKind, json: &str) -> Option<AnalysisResult> {
    let value: serde_json::Value = serde_json::from_str(json).ok()?;
    if !value.is_object() {
        return None;
    }
    AnalysisResult::from_value(kind, value).ok()
}
