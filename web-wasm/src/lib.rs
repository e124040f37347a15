//! CheckMyRoom Web (WASM)
//!
//! 브라우저 쪽 연결부: localStorage 저장소, 분석 API 호출,
//! 파일 읽기, 미리보기 URL, 클립보드

mod api;
mod clipboard;
mod file;
mod page;
mod preview;
mod storage;

pub use page::{analyze, copy_to_clipboard, read_data_url, AnalysisPageHandle, ChecklistHandle, HistoryHandle};
pub use storage::LocalStorageStore;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}
