//! JS 에서 쓰는 화면 핸들
//!
//! 화면(마크업)은 JS 쪽이 그리고, 상태 전이와 저장은 여기서 한다.
//! 구조체 값은 JSON 문자열로 주고받는다.

use std::fmt::Display;

use checkmyroom_common::checklist::{BuildingType, ContractType};
use checkmyroom_common::history::{format_date, risk_label};
use checkmyroom_common::{
    annotate, render_markdown, AnalysisKind, AnalysisPage, AnalysisResult, AnalyzeRequestBody,
    ChecklistBoard, HistoryStore, HistoryView, PageStatus, SelectedImage,
};
use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::api::post_analyze;
use crate::clipboard;
use crate::file::file_to_data_url;
use crate::preview::PreviewUrl;
use crate::storage::LocalStorageStore;

const LOADING_MESSAGE: &str = "분석 중에는 사진을 바꿀 수 없습니다.";

fn js_err(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_err)
}

// =============================================
// 분석 화면
// =============================================

#[wasm_bindgen]
pub struct AnalysisPageHandle {
    page: AnalysisPage<PreviewUrl>,
    history: HistoryStore<LocalStorageStore>,
}

#[wasm_bindgen]
impl AnalysisPageHandle {
    /// `kind`: "defect" | "register"
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str) -> Result<AnalysisPageHandle, JsValue> {
        let kind: AnalysisKind = kind.parse().map_err(js_err)?;
        Ok(Self {
            page: AnalysisPage::new(kind),
            history: HistoryStore::new(LocalStorageStore::new()),
        })
    }

    /// 사진 추가. 미리보기 URL 을 돌려준다
    pub fn add_image(&mut self, file: &web_sys::File, data_url: String) -> Result<String, JsValue> {
        if self.page.is_loading() {
            return Err(JsValue::from_str(LOADING_MESSAGE));
        }
        let preview = PreviewUrl::new(file)?;
        let url = preview.as_str().to_string();
        self.page.add_images([SelectedImage { data_url, preview }]);
        Ok(url)
    }

    /// 로딩 중이면 false
    pub fn remove_image(&mut self, index: usize) -> bool {
        self.page.remove_image(index)
    }

    pub fn reset(&mut self) -> bool {
        self.page.reset()
    }

    pub fn set_room_name(&mut self, name: String) {
        self.page.set_room_name(name);
    }

    pub fn previews(&self) -> Vec<String> {
        self.page
            .images()
            .iter()
            .map(|img| img.preview.as_str().to_string())
            .collect()
    }

    /// "idle" | "loading" | "success" | "error"
    pub fn status(&self) -> String {
        match self.page.status() {
            PageStatus::Idle => "idle",
            PageStatus::Loading => "loading",
            PageStatus::Success => "success",
            PageStatus::Error(_) => "error",
        }
        .to_string()
    }

    pub fn error_message(&self) -> Option<String> {
        match self.page.status() {
            PageStatus::Error(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.page.is_loading()
    }

    /// 요청 본문 JSON. 보낼 수 없는 상태면 undefined
    pub fn begin_submit(&mut self) -> Result<Option<String>, JsValue> {
        self.page.begin_submit().map(|body| to_json(&body)).transpose()
    }

    /// 성공 결과 반영. 히스토리에 저장했으면 그 항목 JSON
    pub fn complete_success(&mut self, result_json: &str) -> Result<Option<String>, JsValue> {
        let value: serde_json::Value = serde_json::from_str(result_json).map_err(js_err)?;
        let result = AnalysisResult::from_value(self.page.kind(), value).map_err(js_err)?;
        let saved = self.page.complete(Ok(result), &mut self.history).map_err(js_err)?;
        saved.map(|item| to_json(&item)).transpose()
    }

    pub fn complete_error(&mut self, message: String) -> Result<(), JsValue> {
        self.page.complete(Err(message), &mut self.history).map_err(js_err)?;
        Ok(())
    }

    pub fn result_json(&self) -> Result<Option<String>, JsValue> {
        self.page.result().map(to_json).transpose()
    }

    /// 결과 텍스트 블록에 용어 툴팁을 단 세그먼트 JSON
    pub fn annotate(&mut self, text: &str, key_prefix: &str) -> Result<String, JsValue> {
        to_json(&annotate(text, key_prefix, self.page.terms_mut()))
    }

    pub fn toggle_term(&mut self, chip_id: &str) {
        self.page.terms_mut().toggle(chip_id);
    }

    pub fn close_terms(&mut self) {
        self.page.terms_mut().close();
    }

    pub fn open_term(&self) -> Option<String> {
        self.page.terms().open_id().map(str::to_string)
    }

    pub fn copy_text(&self) -> Option<String> {
        self.page.copy_text().map(str::to_string)
    }
}

/// 요청 본문 JSON 을 보내고 결과 JSON 을 돌려준다. 실패하면 메시지로 throw
#[wasm_bindgen]
pub async fn analyze(body_json: String) -> Result<String, JsValue> {
    let body: AnalyzeRequestBody = serde_json::from_str(&body_json).map_err(js_err)?;
    let result = post_analyze(&body).await.map_err(|e| JsValue::from_str(&e))?;
    to_json(&result)
}

#[wasm_bindgen]
pub async fn read_data_url(file: web_sys::File) -> Result<String, JsValue> {
    file_to_data_url(&file).await.map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub async fn copy_to_clipboard(text: String) -> Result<(), JsValue> {
    clipboard::write_text(&text).await
}

// =============================================
// 홈 히스토리
// =============================================

#[wasm_bindgen]
pub struct HistoryHandle {
    view: HistoryView<LocalStorageStore>,
}

#[wasm_bindgen]
impl HistoryHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> HistoryHandle {
        Self {
            view: HistoryView::load(HistoryStore::new(LocalStorageStore::new())),
        }
    }

    /// 목록 JSON (표시용 날짜·위험도 라벨 포함)
    pub fn items_json(&self) -> Result<String, JsValue> {
        let items: Vec<serde_json::Value> = self
            .view
            .items()
            .iter()
            .map(|item| {
                json!({
                    "item": item,
                    "dateLabel": format_date(&item.date.with_timezone(&chrono::Local)),
                    "riskLabel": risk_label(item.risk_score),
                })
            })
            .collect();
        to_json(&items)
    }

    /// 상세 모달 열기. 상세 본문 세그먼트 JSON
    pub fn open(&mut self, id: &str) -> Result<Option<String>, JsValue> {
        self.view
            .open(id)
            .map(|item| to_json(&render_markdown(&item.detail)))
            .transpose()
    }

    pub fn close(&mut self) {
        self.view.close();
    }

    pub fn selected_id(&self) -> Option<String> {
        self.view.selected().map(|item| item.id.clone())
    }

    pub fn clear(&mut self) -> Result<(), JsValue> {
        self.view.clear().map_err(js_err)
    }
}

impl Default for HistoryHandle {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================
// 체크리스트
// =============================================

#[wasm_bindgen]
pub struct ChecklistHandle {
    board: ChecklistBoard<LocalStorageStore>,
}

#[wasm_bindgen]
impl ChecklistHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChecklistHandle {
        Self {
            board: ChecklistBoard::load(LocalStorageStore::new()),
        }
    }

    pub fn select(&mut self, contract: &str, building: &str) -> Result<(), JsValue> {
        let contract: ContractType = contract.parse().map_err(js_err)?;
        let building: BuildingType = building.parse().map_err(js_err)?;
        self.board.select(contract, building).map_err(js_err)
    }

    /// 현재 조합, 항목, 체크 상태, 진행률 JSON
    pub fn state_json(&self) -> Result<String, JsValue> {
        let selection = self.board.selection();
        let progress = self.board.progress();
        let items: Vec<serde_json::Value> = self
            .board
            .items()
            .iter()
            .map(|item| json!({ "item": item, "checked": self.board.is_checked(item.id) }))
            .collect();

        to_json(&json!({
            "contract": selection.contract,
            "building": selection.building,
            "items": items,
            "checked": progress.checked,
            "total": progress.total,
            "percent": progress.percent,
        }))
    }

    pub fn toggle(&mut self, id: &str) -> Result<bool, JsValue> {
        self.board.toggle(id).map_err(js_err)
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.board.reset().map_err(js_err)
    }
}

impl Default for ChecklistHandle {
    fn default() -> Self {
        Self::new()
    }
}
