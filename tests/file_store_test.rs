//! 파일 저장소 테스트
//!
//! 히스토리·체크리스트가 프로세스를 넘어 유지되는지 검증

use checkmyroom::local_store::FileStore;
use checkmyroom_common::checklist::{BuildingType, ContractType};
use checkmyroom_common::{AnalysisKind, ChecklistBoard, HistoryStore, KeyValueStore, NewHistoryItem};
use tempfile::tempdir;

fn item(room: &str) -> NewHistoryItem {
    NewHistoryItem {
        kind: AnalysisKind::Register,
        room_name: room.to_string(),
        summary: "선순위 근저당 없음".to_string(),
        risk_score: Some(15),
        detail: "안전".to_string(),
    }
}

#[test]
fn test_values_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let mut store = FileStore::open(&path);
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.remove("a").unwrap();

    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get("a"), None);
    assert_eq!(reopened.get("b").as_deref(), Some("2"));
}

#[test]
fn test_remove_missing_key_is_ok() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut store = FileStore::open(&path);
    store.remove("nothing").unwrap();
    assert!(!path.exists());
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ broken").unwrap();

    let mut store = FileStore::open(&path);
    assert_eq!(store.get("room_analysis_history"), None);

    store.set("k", "v").unwrap();
    assert_eq!(FileStore::open(&path).get("k").as_deref(), Some("v"));
}

#[test]
fn test_history_persisted_across_runs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let mut history = HistoryStore::new(FileStore::open(&path));
        for i in 1..=6 {
            history.append(item(&format!("{}호", i))).unwrap();
        }
    }

    let history = HistoryStore::new(FileStore::open(&path));
    let items = history.load();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0].room_name, "6호");
    assert_eq!(items[4].room_name, "2호");
}

#[test]
fn test_checklist_selection_and_checks_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let mut board = ChecklistBoard::load(FileStore::open(&path));
        board.select(ContractType::Wolse, BuildingType::OneRoom).unwrap();
        let first = board.items()[0].id;
        assert!(board.toggle(first).unwrap());
    }

    let board = ChecklistBoard::load(FileStore::open(&path));
    let selection = board.selection();
    assert_eq!(selection.contract, ContractType::Wolse);
    assert_eq!(selection.building, BuildingType::OneRoom);
    assert!(board.is_checked(board.items()[0].id));
    assert_eq!(board.progress().checked, 1);
    assert_eq!(board.progress().percent, 25);
}
