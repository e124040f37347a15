//! 키-값 저장소 추상화
//!
//! 히스토리·체크리스트 상태를 저장하는 백엔드 (브라우저 localStorage,
//! 로컬 JSON 파일, 테스트용 메모리) 를 같은 인터페이스로 다룬다.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// 문자열 키-값 저장소
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// JSON 값 읽기. 없거나 깨진 값은 None
pub fn get_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    serde_json::from_str(&raw).ok()
}

/// JSON 값 쓰기
pub fn set_json<T: Serialize + ?Sized>(store: &mut impl KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// 메모리 저장소
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").as_deref(), Some("value"));
        assert_eq!(store.len(), 1);

        store.remove("key").unwrap();
        assert_eq!(store.get("key"), None);
    }

    #[test]
    fn test_get_json_corrupt_is_none() {
        let mut store = MemoryStore::new();
        store.set("broken", "{not json").unwrap();
        let value: Option<Vec<String>> = get_json(&store, "broken");
        assert!(value.is_none());
    }

    #[test]
    fn test_get_json_missing_is_none() {
        let store = MemoryStore::new();
        let value: Option<Vec<String>> = get_json(&store, "missing");
        assert!(value.is_none());
    }

    #[test]
    fn test_set_json_then_get_json() {
        let mut store = MemoryStore::new();
        set_json(&mut store, "list", &vec!["a", "b"]).unwrap();
        let value: Option<Vec<String>> = get_json(&store, "list");
        assert_eq!(value, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_mut_ref_store() {
        fn write(mut store: impl KeyValueStore) {
            store.set("k", "v").unwrap();
        }

        let mut inner = MemoryStore::new();
        write(&mut inner);
        assert_eq!(inner.get("k").as_deref(), Some("v"));
    }
}
