//! 로컬 분석 히스토리
//!
//! 최근 분석 결과 요약을 최신순으로 최대 5건 저장한다.
//! 개별 삭제·수정은 없고 전체 삭제만 가능하다.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::store::{get_json, set_json, KeyValueStore};
use crate::types::AnalysisKind;

/// 저장 키
pub const HISTORY_STORAGE_KEY: &str = "room_analysis_history";

/// 보관 최대 건수
pub const MAX_HISTORY_ITEMS: usize = 5;

/// 방 이름을 비워두었을 때의 표시명
pub const UNNAMED_ROOM: &str = "이름 없는 방";

/// 히스토리 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AnalysisKind,
    pub date: DateTime<Utc>,
    pub room_name: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<i64>,
    pub detail: String,
}

/// 추가할 항목 (id, date 는 저장 시 부여)
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryItem {
    pub kind: AnalysisKind,
    pub room_name: String,
    pub summary: String,
    pub risk_score: Option<i64>,
    pub detail: String,
}

/// 히스토리 저장소
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 저장된 목록 (없거나 깨졌으면 빈 목록)
    pub fn load(&self) -> Vec<HistoryItem> {
        get_json(&self.store, HISTORY_STORAGE_KEY).unwrap_or_default()
    }

    /// 맨 앞에 추가하고 최근 5건만 남긴다
    pub fn append(&mut self, item: NewHistoryItem) -> Result<HistoryItem> {
        let new_item = HistoryItem {
            id: Uuid::new_v4().to_string(),
            kind: item.kind,
            date: Utc::now(),
            room_name: item.room_name,
            summary: item.summary,
            risk_score: item.risk_score,
            detail: item.detail,
        };

        let mut items = Vec::with_capacity(MAX_HISTORY_ITEMS);
        items.push(new_item.clone());
        items.extend(self.load());
        items.truncate(MAX_HISTORY_ITEMS);

        set_json(&mut self.store, HISTORY_STORAGE_KEY, &items)?;
        Ok(new_item)
    }

    /// 전체 삭제
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(HISTORY_STORAGE_KEY)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

/// `yy.mm.dd` 형식 날짜
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%y.%m.%d").to_string()
}

/// 위험도 점수 라벨
pub fn risk_label(score: Option<i64>) -> &'static str {
    match score {
        None => "",
        Some(s) if s <= 30 => "🟢 안전",
        Some(s) if s <= 70 => "🟡 주의",
        Some(_) => "🔴 위험",
    }
}

/// 요약용으로 앞부분만 자른다 (잘리면 "…")
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
