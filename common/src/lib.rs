//! CheckMyRoom Common Library
//!
//! 서버·CLI·Web(WASM)에서 공유하는 타입과 로직

pub mod types;
pub mod error;
pub mod request;
pub mod prompts;
pub mod parser;
pub mod store;
pub mod history;
pub mod checklist;
pub mod markdown;
pub mod terms;
pub mod controller;

pub use types::{
    AnalysisKind, AnalysisResult, AnalyzeResponse, Checkpoint, CheckpointStatus, DefectResult,
    RegisterResult,
};
pub use error::{Error, RequestError, Result};
pub use request::{parse_data_url, AnalysisRequest, AnalyzeRequestBody, ImagePayload};
pub use prompts::{CHECKPOINT_LABELS, DEFECT_PROMPT, REGISTER_PROMPT};
pub use parser::{extract_json_object, fallback_result, normalize_response};
pub use store::{get_json, set_json, KeyValueStore, MemoryStore};
pub use history::{HistoryItem, HistoryStore, NewHistoryItem};
pub use checklist::{get_checklist_items, BuildingType, ChecklistBoard, ChecklistItem, ContractType};
pub use markdown::{render_markdown, Segment};
pub use terms::{annotate, TermContext};
pub use controller::{AnalysisPage, HistoryView, PageStatus, SelectedImage};
