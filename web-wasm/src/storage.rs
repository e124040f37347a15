//! localStorage 기반 키-값 저장소

use checkmyroom_common::{Error, KeyValueStore, Result};
use gloo::storage::LocalStorage;
use gloo::storage::Storage;

/// 브라우저 localStorage. 사용할 수 없는 환경(사생활 보호 모드 등)에서는
/// 읽기는 빈 값, 쓰기는 에러가 된다.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| Error::Store(format!("localStorage 쓰기 실패: {:?}", e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| Error::Store(format!("localStorage 삭제 실패: {:?}", e)))
    }
}
