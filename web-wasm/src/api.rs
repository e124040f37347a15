//! 분석 API 호출 (`POST /api/analyze`)

use checkmyroom_common::controller::UNKNOWN_ERROR_MESSAGE;
use checkmyroom_common::{AnalysisKind, AnalysisResult, AnalyzeRequestBody};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub const ANALYZE_PATH: &str = "/api/analyze";

fn js_message(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

pub async fn post_analyze(body: &AnalyzeRequestBody) -> Result<AnalysisResult, String> {
    let json = serde_json::to_string(body).map_err(|e| e.to_string())?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&json));

    let request = Request::new_with_str_and_init(ANALYZE_PATH, &opts).map_err(js_message)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_message)?;

    let window = web_sys::window().ok_or_else(|| "window 없음".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_message)?;
    let resp: Response = resp_value.dyn_into().map_err(js_message)?;

    let text = JsFuture::from(resp.text().map_err(js_message)?)
        .await
        .map_err(js_message)?
        .as_string()
        .unwrap_or_default();

    parse_analyze_response(body.kind, resp.ok(), &text)
}

/// 응답 본문 해석
///
/// 2xx 가 아니거나 `error` 가 있으면 그 메시지로 실패한다.
pub fn parse_analyze_response(kind: AnalysisKind, ok: bool, text: &str) -> Result<AnalysisResult, String> {
    let value: Value = serde_json::from_str(text).unwrap_or(Value::Null);

    if let Some(error) = value.get("error") {
        return Err(error
            .as_str()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string());
    }
    if !ok {
        return Err(UNKNOWN_ERROR_MESSAGE.to_string());
    }

    let result = value
        .get("result")
        .cloned()
        .ok_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())?;
    AnalysisResult::from_value(kind, result).map_err(|e| e.to_string())
}
