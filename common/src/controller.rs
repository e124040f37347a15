//! 화면 컨트롤러 상태
//!
//! 하자 분석·등기부등본 분석 화면의 상태 전이:
//! 사진 선택 → 요청 → 로딩 → 성공/실패. 로딩 중에는 재요청을 막는다.
//! 미리보기 핸들 `H` 는 drop 될 때 해제되는 타입을 쓴다.

use crate::error::Result;
use crate::history::{truncate_summary, HistoryItem, HistoryStore, NewHistoryItem, UNNAMED_ROOM};
use crate::request::AnalyzeRequestBody;
use crate::store::KeyValueStore;
use crate::terms::TermContext;
use crate::types::{AnalysisKind, AnalysisResult, CheckpointStatus, DefectResult, RegisterResult};

/// 히스토리 요약 최대 글자 수
pub const SUMMARY_MAX_CHARS: usize = 60;

/// 알 수 없는 실패 메시지
pub const UNKNOWN_ERROR_MESSAGE: &str = "알 수 없는 오류가 발생했습니다.";

/// 화면 상태
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

/// 선택된 사진
#[derive(Debug)]
pub struct SelectedImage<H> {
    pub data_url: String,
    pub preview: H,
}

/// 분석 화면 하나의 상태
pub struct AnalysisPage<H> {
    kind: AnalysisKind,
    images: Vec<SelectedImage<H>>,
    room_name: String,
    status: PageStatus,
    result: Option<AnalysisResult>,
    terms: TermContext,
}

impl<H> AnalysisPage<H> {
    pub fn new(kind: AnalysisKind) -> Self {
        Self {
            kind,
            images: Vec::new(),
            room_name: String::new(),
            status: PageStatus::Idle,
            result: None,
            terms: TermContext::new(),
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn images(&self) -> &[SelectedImage<H>] {
        &self.images
    }

    pub fn terms(&self) -> &TermContext {
        &self.terms
    }

    pub fn terms_mut(&mut self) -> &mut TermContext {
        &mut self.terms
    }

    pub fn set_room_name(&mut self, name: impl Into<String>) {
        self.room_name = name.into();
    }

    pub fn is_loading(&self) -> bool {
        self.status == PageStatus::Loading
    }

    /// 사진 추가 (이전 결과는 지운다)
    ///
    /// 로딩 중에는 받지 않고 false 를 돌려준다.
    pub fn add_images(&mut self, images: impl IntoIterator<Item = SelectedImage<H>>) -> bool {
        if self.is_loading() {
            return false;
        }
        self.images.extend(images);
        self.clear_outcome();
        true
    }

    /// 사진 하나 제거. 미리보기 핸들은 여기서 drop 된다
    pub fn remove_image(&mut self, index: usize) -> bool {
        if self.is_loading() {
            return false;
        }
        if index < self.images.len() {
            self.images.remove(index);
        }
        self.clear_outcome();
        true
    }

    /// 전체 초기화 (로딩 중에는 무시)
    pub fn reset(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.images.clear();
        self.room_name.clear();
        self.clear_outcome();
        true
    }

    /// 요청 시작
    ///
    /// 로딩 중이거나 사진이 없으면 None
    pub fn begin_submit(&mut self) -> Option<AnalyzeRequestBody> {
        if self.is_loading() || self.images.is_empty() {
            return None;
        }
        self.status = PageStatus::Loading;
        self.result = None;
        Some(AnalyzeRequestBody {
            images: self.images.iter().map(|img| img.data_url.clone()).collect(),
            kind: self.kind,
        })
    }

    /// 요청 완료 처리
    ///
    /// 정상 결과면 히스토리에 요약을 남기고 그 항목을 돌려준다.
    /// 진행 중인 요청이 없으면 결과를 버린다.
    pub fn complete<S: KeyValueStore>(
        &mut self,
        outcome: std::result::Result<AnalysisResult, String>,
        history: &mut HistoryStore<S>,
    ) -> Result<Option<HistoryItem>> {
        if !self.is_loading() {
            return Ok(None);
        }
        self.terms.reset();
        match outcome {
            Ok(result) => {
                let entry = history_entry(&result, &self.room_name);
                self.result = Some(result);
                self.status = PageStatus::Success;
                match entry {
                    Some(item) => history.append(item).map(Some),
                    None => Ok(None),
                }
            }
            Err(message) => {
                let message = if message.trim().is_empty() {
                    UNKNOWN_ERROR_MESSAGE.to_string()
                } else {
                    message
                };
                self.status = PageStatus::Error(message);
                self.result = None;
                Ok(None)
            }
        }
    }

    /// 클립보드에 복사할 집주인 문자
    pub fn copy_text(&self) -> Option<&str> {
        match &self.result {
            Some(AnalysisResult::Defect(r)) if !r.is_exception => r.message_template.as_deref(),
            _ => None,
        }
    }

    fn clear_outcome(&mut self) {
        self.status = PageStatus::Idle;
        self.result = None;
        self.terms.reset();
    }
}

/// 결과에서 히스토리 항목 생성 (예외 결과는 None)
pub fn history_entry(result: &AnalysisResult, room_name: &str) -> Option<NewHistoryItem> {
    let room_name = match room_name.trim() {
        "" => UNNAMED_ROOM.to_string(),
        name => name.to_string(),
    };
    match result {
        AnalysisResult::Defect(r) => defect_entry(r, room_name),
        AnalysisResult::Register(r) => register_entry(r, room_name),
    }
}

fn defect_entry(result: &DefectResult, room_name: String) -> Option<NewHistoryItem> {
    if result.is_exception {
        return None;
    }
    let template = result.message_template.as_deref()?;
    let mut detail = template.to_string();
    if let Some(estimate) = &result.estimate_summary {
        detail.push_str(&format!("\n💰 {}", estimate));
    }
    if let Some(note) = &result.estimate_note {
        detail.push_str(&format!("\n{}", note));
    }
    Some(NewHistoryItem {
        kind: AnalysisKind::Defect,
        room_name,
        summary: truncate_summary(template, SUMMARY_MAX_CHARS),
        risk_score: None,
        detail,
    })
}

fn register_entry(result: &RegisterResult, room_name: String) -> Option<NewHistoryItem> {
    let score = result.risk_score?;
    let mut detail = result.summary.clone();
    for cp in &result.checkpoints {
        detail.push_str(&format!("\n{} **{}**: {}", status_icon(cp.status), cp.label, cp.detail));
    }
    Some(NewHistoryItem {
        kind: AnalysisKind::Register,
        room_name,
        summary: truncate_summary(&result.summary, SUMMARY_MAX_CHARS),
        risk_score: Some(score),
        detail,
    })
}

pub fn status_icon(status: CheckpointStatus) -> &'static str {
    match status {
        CheckpointStatus::Safe => "🟢",
        CheckpointStatus::Warning => "🟡",
        CheckpointStatus::Danger => "🔴",
        CheckpointStatus::Unknown => "⚪",
    }
}

/// 홈 화면 히스토리 목록과 상세 모달
pub struct HistoryView<S: KeyValueStore> {
    store: HistoryStore<S>,
    items: Vec<HistoryItem>,
    selected: Option<String>,
}

impl<S: KeyValueStore> HistoryView<S> {
    pub fn load(store: HistoryStore<S>) -> Self {
        let items = store.load();
        Self { store, items, selected: None }
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// 상세 모달 열기
    pub fn open(&mut self, id: &str) -> Option<&HistoryItem> {
        let item = self.items.iter().find(|h| h.id == id)?;
        self.selected = Some(item.id.clone());
        Some(item)
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&HistoryItem> {
        let id = self.selected.as_deref()?;
        self.items.iter().find(|h| h.id == id)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()?;
        self.items.clear();
        self.selected = None;
        Ok(())
    }
}
