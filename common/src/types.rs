//! 분석 결과 타입 정의
//!
//! 서버(CLI)와 Web(WASM)에서 공유하는 타입:
//! - AnalysisKind: 분석 종류 (하자 / 등기부등본)
//! - DefectResult: 방 하자 분석 결과
//! - RegisterResult: 등기부등본 권리 분석 결과
//! - AnalysisResult: 두 결과의 합 타입

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::prompts::CHECKPOINT_LABELS;

/// 분석 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// 방 내부 하자 사진
    Defect,
    /// 등기사항전부증명서 사진
    Register,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Defect => "defect",
            AnalysisKind::Register => "register",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "defect" => Ok(AnalysisKind::Defect),
            "register" => Ok(AnalysisKind::Register),
            _ => Err(format!("알 수 없는 분석 타입: {} (defect/register)", s)),
        }
    }
}

/// 방 하자 분석 결과
///
/// `is_exception` 이 true 이면 `exception_message` 만, false 이면
/// 나머지 세 필드가 채워지는 것이 정상 응답이다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefectResult {
    #[serde(deserialize_with = "lenient::flag")]
    pub is_exception: bool,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_text")]
    pub exception_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_text")]
    pub message_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_text")]
    pub estimate_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_text")]
    pub estimate_note: Option<String>,
}

impl DefectResult {
    /// 하자 사진이 아닌 경우의 예외 결과
    pub fn exception(message: impl Into<String>) -> Self {
        Self {
            is_exception: true,
            exception_message: Some(message.into()),
            ..Default::default()
        }
    }

    /// 모델이 형식 규칙을 어긴 부분을 나열 (거부하지 않고 기록용)
    pub fn shape_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.is_exception {
            if self.exception_message.is_none() {
                warnings.push("isException=true 인데 exceptionMessage 가 없음".to_string());
            }
        } else if self.message_template.is_none() {
            warnings.push("isException=false 인데 messageTemplate 가 없음".to_string());
        }
        warnings
    }
}

/// 체크포인트 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointStatus {
    Safe,
    Warning,
    Danger,
    /// 모델이 정의되지 않은 값을 보낸 경우
    #[default]
    #[serde(other)]
    Unknown,
}

/// 등기부등본 점검 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    #[serde(default, deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: CheckpointStatus,
    #[serde(default, deserialize_with = "lenient::text")]
    pub detail: String,
}

/// 등기부등본 권리 분석 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterResult {
    /// 0~100, 예외 응답이면 None
    #[serde(deserialize_with = "lenient::score")]
    pub risk_score: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::checkpoints")]
    pub checkpoints: Vec<Checkpoint>,
}

impl RegisterResult {
    /// JSON 을 찾지 못했을 때의 텍스트 결과
    pub fn text_only(summary: impl Into<String>) -> Self {
        Self {
            risk_score: None,
            summary: summary.into(),
            checkpoints: Vec::new(),
        }
    }

    /// 모델이 형식 규칙을 어긴 부분을 나열 (거부하지 않고 기록용)
    pub fn shape_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(score) = self.risk_score {
            if !(0..=100).contains(&score) {
                warnings.push(format!("riskScore 범위 밖: {}", score));
            }
        }

        if self.risk_score.is_some() && self.checkpoints.len() != CHECKPOINT_LABELS.len() {
            warnings.push(format!(
                "checkpoints 개수 {}개 (기대값 {}개)",
                self.checkpoints.len(),
                CHECKPOINT_LABELS.len()
            ));
        }

        for cp in &self.checkpoints {
            if !CHECKPOINT_LABELS.contains(&cp.label.as_str()) {
                warnings.push(format!("알 수 없는 label: {}", cp.label));
            }
            if cp.status == CheckpointStatus::Unknown {
                warnings.push(format!("알 수 없는 status: {}", cp.label));
            }
        }

        warnings
    }
}

/// 모델 JSON 용 관대한 역직렬화
///
/// 타입이 어긋난 필드는 실패 대신 가까운 값(또는 기본값)으로 읽는다.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{Checkpoint, CheckpointStatus};

    fn value_to_text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        })
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(value_to_text(Value::deserialize(d)?))
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(value_to_text(Value::deserialize(d)?).unwrap_or_default())
    }

    /// 정수·실수·숫자 문자열을 받는다. 실수는 반올림
    pub fn score<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        let number = match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(number.filter(|n| n.is_finite()).map(|n| n.round() as i64))
    }

    pub fn status<'de, D: Deserializer<'de>>(d: D) -> Result<CheckpointStatus, D::Error> {
        Ok(serde_json::from_value(Value::deserialize(d)?).unwrap_or_default())
    }

    /// 배열이 아니면 비우고, 객체가 아닌 원소는 건너뛴다
    pub fn checkpoints<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Checkpoint>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }
}

/// 분석 결과 (종류별 합 타입)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Defect(DefectResult),
    Register(RegisterResult),
}

impl AnalysisResult {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisResult::Defect(_) => AnalysisKind::Defect,
            AnalysisResult::Register(_) => AnalysisKind::Register,
        }
    }

    /// 종류를 알고 있을 때 JSON 값에서 복원
    pub fn from_value(kind: AnalysisKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            AnalysisKind::Defect => AnalysisResult::Defect(serde_json::from_value(value)?),
            AnalysisKind::Register => AnalysisResult::Register(serde_json::from_value(value)?),
        })
    }

    /// 히스토리에 남길 만한 정상 결과인지
    pub fn is_exception(&self) -> bool {
        match self {
            AnalysisResult::Defect(r) => r.is_exception,
            AnalysisResult::Register(r) => r.risk_score.is_none(),
        }
    }

    pub fn shape_warnings(&self) -> Vec<String> {
        match self {
            AnalysisResult::Defect(r) => r.shape_warnings(),
            AnalysisResult::Register(r) => r.shape_warnings(),
        }
    }
}

/// 분석 엔드포인트 성공 응답 `{ "result": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub result: AnalysisResult,
}
