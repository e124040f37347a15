//! 계약 전 체크리스트
//!
//! (계약 유형, 건물 유형) 조합별 고정 항목과
//! 조합별 완료 상태 저장.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::{get_json, set_json, KeyValueStore};

/// 완료 상태 저장 키 접두사
pub const CHECKLIST_STORAGE_PREFIX: &str = "checkmyroom_checklist_";

/// 마지막으로 선택한 조합 저장 키
pub const CHECKLIST_CONFIG_KEY: &str = "checkmyroom_checklist_config";

/// 계약 유형
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    #[default]
    #[serde(rename = "전세")]
    Jeonse,
    #[serde(rename = "월세")]
    Wolse,
}

impl ContractType {
    pub const ALL: [ContractType; 2] = [ContractType::Jeonse, ContractType::Wolse];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Jeonse => "전세",
            ContractType::Wolse => "월세",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "전세" => Ok(ContractType::Jeonse),
            "월세" => Ok(ContractType::Wolse),
            _ => Err(format!("알 수 없는 계약 유형: {} (전세/월세)", s)),
        }
    }
}

/// 건물 유형
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    #[default]
    #[serde(rename = "아파트")]
    Apartment,
    #[serde(rename = "빌라")]
    Villa,
    #[serde(rename = "원룸")]
    OneRoom,
}

impl BuildingType {
    pub const ALL: [BuildingType; 3] = [BuildingType::Apartment, BuildingType::Villa, BuildingType::OneRoom];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingType::Apartment => "아파트",
            BuildingType::Villa => "빌라",
            BuildingType::OneRoom => "원룸",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildingType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "아파트" => Ok(BuildingType::Apartment),
            "빌라" => Ok(BuildingType::Villa),
            "원룸" => Ok(BuildingType::OneRoom),
            _ => Err(format!("알 수 없는 건물 유형: {} (아파트/빌라/원룸)", s)),
        }
    }
}

/// 체크리스트 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<&'static str>,
}

const fn item(id: &'static str, text: &'static str, tip: &'static str) -> ChecklistItem {
    ChecklistItem { id, text, tip: Some(tip) }
}

const JEONSE_APARTMENT: &[ChecklistItem] = &[
    item("j_a_1", "등기부등본 열람 (근저당·가압류 확인)", "계약 당일 최신본을 다시 확인하세요."),
    item("j_a_2", "전세보증보험(HUG/SGI) 가입 가능 여부 확인", "아파트는 대부분 가입 가능하지만 보증금 한도를 꼭 확인하세요."),
    item("j_a_3", "확정일자 및 전입신고 즉시 처리", "잔금 당일 주민센터 방문 또는 정부24 온라인 신청."),
    item("j_a_4", "집주인 신분증·등기 소유자 일치 여부 확인", "대리인 계약 시 위임장·인감증명서 필수."),
];

const JEONSE_VILLA: &[ChecklistItem] = &[
    item("j_v_1", "등기부등본 열람 (근저당·가압류 확인)", "빌라는 근저당 비율이 높은 경우가 많으니 꼼꼼히 확인하세요."),
    item("j_v_2", "전세보증보험 가입 가능 여부 확인 (공시가격 대비 비율)", "빌라는 공시가격이 낮아 보증보험 가입이 거절될 수 있습니다."),
    item("j_v_3", "선순위 채권 합계가 보증금의 80% 이하인지 확인", "초과 시 경매 낙찰 후 보증금 미회수 위험이 있습니다."),
    item("j_v_4", "확정일자 및 전입신고 즉시 처리", "잔금 당일 처리해야 대항력이 생깁니다."),
];

const JEONSE_ONE_ROOM: &[ChecklistItem] = &[
    item("j_r_1", "등기부등본 열람 (근저당·가압류 확인)", "원룸 건물 전체에 근저당이 잡혀 있는 경우가 많습니다."),
    item("j_r_2", "건물 전체 보증금 합산액 확인 (깡통전세 여부)", "다른 세입자 보증금 합산이 건물 시세를 초과하면 위험합니다."),
    item("j_r_3", "전입신고·확정일자 즉시 처리", "잔금 당일 처리 필수."),
    item("j_r_4", "임대인 체납 세금 열람 동의 요청", "세금 체납 시 보증금보다 세금이 우선 변제됩니다."),
];

const WOLSE_APARTMENT: &[ChecklistItem] = &[
    item("w_a_1", "등기부등본 열람 (소유자·근저당 확인)", "월세라도 보증금이 있으면 반드시 확인하세요."),
    item("w_a_2", "확정일자 및 전입신고 (보증금 있는 경우)", "보증금 500만 원 이상이면 반드시 처리하세요."),
    item("w_a_3", "관리비 항목 및 금액 계약서에 명시 확인", "인터넷·TV·청소비 등 포함 여부를 확인하세요."),
    item("w_a_4", "특약사항 (수리 책임·도배·장판) 계약서 기재 확인", "구두 약속은 법적 효력이 없습니다."),
];

const WOLSE_VILLA: &[ChecklistItem] = &[
    item("w_v_1", "등기부등본 열람 (소유자·근저당 확인)", "빌라는 소유자 변경이 잦으니 꼭 확인하세요."),
    item("w_v_2", "확정일자 및 전입신고 (보증금 있는 경우)", "보증금 보호를 위해 반드시 처리하세요."),
    item("w_v_3", "건물 노후도 및 하자 상태 직접 확인", "입주 전 사진 촬영으로 기존 하자를 기록해두세요."),
    item("w_v_4", "특약사항 (수리 책임·도배·장판) 계약서 기재 확인", "구두 약속은 법적 효력이 없습니다."),
];

const WOLSE_ONE_ROOM: &[ChecklistItem] = &[
    item("w_r_1", "등기부등본 열람 (소유자 확인)", "임대인이 실제 소유자인지 확인하세요."),
    item("w_r_2", "확정일자 및 전입신고 (보증금 있는 경우)", "보증금이 소액이라도 처리해두는 것이 안전합니다."),
    item("w_r_3", "관리비 항목 및 금액 계약서에 명시 확인", "원룸은 관리비 분쟁이 잦습니다."),
    item("w_r_4", "입주 전 하자 사진 촬영 및 집주인 확인", "퇴실 시 원상복구 분쟁 예방에 필수입니다."),
];

/// 조합 키 (`전세_아파트` 형식)
pub fn checklist_key(contract: ContractType, building: BuildingType) -> String {
    format!("{}_{}", contract, building)
}

/// 조합별 항목 (고정 순서)
pub fn items_for(contract: ContractType, building: BuildingType) -> &'static [ChecklistItem] {
    match (contract, building) {
        (ContractType::Jeonse, BuildingType::Apartment) => JEONSE_APARTMENT,
        (ContractType::Jeonse, BuildingType::Villa) => JEONSE_VILLA,
        (ContractType::Jeonse, BuildingType::OneRoom) => JEONSE_ONE_ROOM,
        (ContractType::Wolse, BuildingType::Apartment) => WOLSE_APARTMENT,
        (ContractType::Wolse, BuildingType::Villa) => WOLSE_VILLA,
        (ContractType::Wolse, BuildingType::OneRoom) => WOLSE_ONE_ROOM,
    }
}

/// 문자열 조합으로 항목 조회. 알 수 없는 조합은 빈 목록
pub fn get_checklist_items(contract: &str, building: &str) -> &'static [ChecklistItem] {
    match (contract.parse(), building.parse()) {
        (Ok(c), Ok(b)) => items_for(c, b),
        _ => &[],
    }
}

/// 마지막 선택 조합
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSelection {
    pub contract: ContractType,
    pub building: BuildingType,
}

/// 진행률
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub checked: usize,
    pub total: usize,
    /// 반올림한 백분율
    pub percent: u32,
}

/// 선택 조합과 완료 상태를 저장소와 동기화하는 체크리스트 화면 상태
pub struct ChecklistBoard<S: KeyValueStore> {
    store: S,
    selection: ChecklistSelection,
    checks: HashMap<String, bool>,
}

impl<S: KeyValueStore> ChecklistBoard<S> {
    /// 저장된 조합과 그 조합의 완료 상태를 복원
    pub fn load(store: S) -> Self {
        let selection: ChecklistSelection = get_json(&store, CHECKLIST_CONFIG_KEY).unwrap_or_default();
        let checks = load_checks(&store, selection);
        Self { store, selection, checks }
    }

    pub fn selection(&self) -> ChecklistSelection {
        self.selection
    }

    pub fn items(&self) -> &'static [ChecklistItem] {
        items_for(self.selection.contract, self.selection.building)
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checks.get(id).copied().unwrap_or(false)
    }

    /// 조합을 바꾸고 해당 조합의 저장된 상태로 교체
    pub fn select(&mut self, contract: ContractType, building: BuildingType) -> Result<()> {
        self.selection = ChecklistSelection { contract, building };
        set_json(&mut self.store, CHECKLIST_CONFIG_KEY, &self.selection)?;
        self.checks = load_checks(&self.store, self.selection);
        Ok(())
    }

    /// 항목 완료 여부 반전
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let entry = self.checks.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
        let checked = *entry;
        let key = self.storage_key();
        set_json(&mut self.store, &key, &self.checks)?;
        Ok(checked)
    }

    /// 현재 조합의 완료 상태 초기화
    pub fn reset(&mut self) -> Result<()> {
        self.checks.clear();
        let key = self.storage_key();
        self.store.remove(&key)
    }

    pub fn progress(&self) -> ChecklistProgress {
        let items = self.items();
        let checked = items.iter().filter(|i| self.is_checked(i.id)).count();
        let total = items.len();
        let percent = if total > 0 {
            ((checked as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };
        ChecklistProgress { checked, total, percent }
    }

    fn storage_key(&self) -> String {
        storage_key(self.selection)
    }
}

fn storage_key(selection: ChecklistSelection) -> String {
    format!(
        "{}{}",
        CHECKLIST_STORAGE_PREFIX,
        checklist_key(selection.contract, selection.building)
    )
}

fn load_checks(store: &impl KeyValueStore, selection: ChecklistSelection) -> HashMap<String, bool> {
    get_json(store, &storage_key(selection)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    // =============================================
    // 카탈로그 테스트
    // =============================================

    #[test]
    fn test_get_checklist_items_jeonse_oneroom() {
        let items = get_checklist_items("전세", "원룸");
        let ids: Vec<&str> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["j_r_1", "j_r_2", "j_r_3", "j_r_4"]);
        assert_eq!(items[1].text, "건물 전체 보증금 합산액 확인 (깡통전세 여부)");
    }

    #[test]
    fn test_get_checklist_items_unknown_pair() {
        assert!(get_checklist_items("매매", "원룸").is_empty());
        assert!(get_checklist_items("전세", "오피스텔").is_empty());
        assert!(get_checklist_items("jeonse", "oneroom").is_empty());
        assert!(get_checklist_items("전세", "").is_empty());
    }

    #[test]
    fn test_every_combination_has_four_items() {
        for contract in ContractType::ALL {
            for building in BuildingType::ALL {
                let items = items_for(contract, building);
                assert_eq!(items.len(), 4, "{}", checklist_key(contract, building));
                assert!(items.iter().all(|i| i.tip.is_some()));
            }
        }
    }

    #[test]
    fn test_checklist_key() {
        assert_eq!(checklist_key(ContractType::Wolse, BuildingType::Villa), "월세_빌라");
    }

    #[test]
    fn test_types_serialize_korean() {
        let selection = ChecklistSelection {
            contract: ContractType::Wolse,
            building: BuildingType::OneRoom,
        };
        let json = serde_json::to_string(&selection).expect("직렬화 실패");
        assert_eq!(json, r#"{"contract":"월세","building":"원룸"}"#);
    }

    // =============================================
    // ChecklistBoard 테스트
    // =============================================

    #[test]
    fn test_board_defaults() {
        let board = ChecklistBoard::load(MemoryStore::new());
        assert_eq!(board.selection(), ChecklistSelection::default());
        assert_eq!(board.items()[0].id, "j_a_1");
        assert_eq!(board.progress(), ChecklistProgress { checked: 0, total: 4, percent: 0 });
    }

    #[test]
    fn test_board_toggle_and_progress() {
        let mut board = ChecklistBoard::load(MemoryStore::new());
        assert!(board.toggle("j_a_1").unwrap());
        assert!(board.toggle("j_a_3").unwrap());
        assert!(board.toggle("j_a_2").unwrap());
        assert!(!board.toggle("j_a_2").unwrap());
        assert_eq!(board.progress(), ChecklistProgress { checked: 2, total: 4, percent: 50 });
    }

    #[test]
    fn test_board_switch_swaps_completion_map() {
        let mut board = ChecklistBoard::load(MemoryStore::new());
        board.toggle("j_a_1").unwrap();

        board.select(ContractType::Wolse, BuildingType::Villa).unwrap();
        assert!(!board.is_checked("j_a_1"));
        board.toggle("w_v_2").unwrap();

        board.select(ContractType::Jeonse, BuildingType::Apartment).unwrap();
        assert!(board.is_checked("j_a_1"));
        assert!(!board.is_checked("w_v_2"));
    }

    #[test]
    fn test_board_restores_selection_and_checks() {
        let mut store = MemoryStore::new();
        {
            let mut board = ChecklistBoard::load(&mut store);
            board.select(ContractType::Wolse, BuildingType::OneRoom).unwrap();
            board.toggle("w_r_4").unwrap();
        }

        let board = ChecklistBoard::load(store);
        assert_eq!(board.selection().contract, ContractType::Wolse);
        assert_eq!(board.selection().building, BuildingType::OneRoom);
        assert!(board.is_checked("w_r_4"));
        assert_eq!(board.progress().percent, 25);
    }

    #[test]
    fn test_board_reset_removes_key() {
        let mut store = MemoryStore::new();
        {
            let mut board = ChecklistBoard::load(&mut store);
            board.toggle("j_a_1").unwrap();
            board.reset().unwrap();
            assert_eq!(board.progress().checked, 0);
        }
        assert!(store.get("checkmyroom_checklist_전세_아파트").is_none());
    }

    #[test]
    fn test_board_corrupt_state_is_empty() {
        let mut store = MemoryStore::new();
        store.set(CHECKLIST_CONFIG_KEY, "garbage").unwrap();
        store.set("checkmyroom_checklist_전세_아파트", "[1,2").unwrap();

        let board = ChecklistBoard::load(store);
        assert_eq!(board.selection(), ChecklistSelection::default());
        assert_eq!(board.progress().checked, 0);
    }
}
