//! Gemini API 연동
//!
//! 이미지 여러 장 + 지시문 하나를 멀티파트 요청으로 보내고
//! 응답 텍스트 하나를 돌려받는다.

use std::time::Duration;

use checkmyroom_common::ImagePayload;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ModelError;

/// 이미지 + 지시문 → 텍스트 응답
///
/// 엔드포인트는 이 트레이트만 알고, 테스트에서는 목 모델을 끼운다.
pub trait VisionModel: Send + Sync {
    fn generate<'a>(
        &'a self,
        images: &'a [ImagePayload],
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, ModelError>>;
}

/// 요청 본문
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// 이미지 파트를 순서대로 넣고 마지막에 지시문
fn build_request(images: &[ImagePayload], prompt: &str, temperature: f32) -> GeminiRequest {
    let mut parts: Vec<Part> = images
        .iter()
        .map(|img| Part::InlineData {
            inline_data: InlineData {
                mime_type: img.mime_type.clone(),
                data: img.data.clone(),
            },
        })
        .collect();
    parts.push(Part::Text {
        text: prompt.to_string(),
    });

    GeminiRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig { temperature },
    }
}

/// 첫 후보의 텍스트 파트를 이어 붙인다
fn response_text(response: GeminiResponse) -> Result<String, ModelError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ModelError::EmptyResponse)?;

    let text: String = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        Err(ModelError::EmptyResponse)
    } else {
        Ok(text)
    }
}

/// 오류 응답 본문에서 `error.message` 추출
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.trim().is_empty())
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, config: &Config) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call(&self, images: &[ImagePayload], prompt: &str) -> Result<String, ModelError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );
        let request = build_request(images, prompt, self.temperature);

        tracing::debug!(model = %self.model, images = images.len(), "Gemini 요청");
        let resp = self.http.post(&url).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let response: GeminiResponse = resp.json().await?;
        response_text(response)
    }
}

impl VisionModel for GeminiClient {
    fn generate<'a>(
        &'a self,
        images: &'a [ImagePayload],
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, ModelError>> {
        Box::pin(self.call(images, prompt))
    }
}
