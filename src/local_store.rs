//! 파일 기반 키-값 저장소
//!
//! CLI 에서 브라우저 localStorage 대신 쓴다.
//! 키 → 문자열 값 맵 하나를 JSON 파일 하나에 저장한다.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use checkmyroom_common::{Error as StoreError, KeyValueStore, Result as StoreResult};

use crate::error::{AppError, Result};

const STORE_FILE_NAME: &str = "store.json";

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// 파일이 없거나 깨졌으면 빈 저장소로 시작
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::read_entries(&path).unwrap_or_default();
        Self { path, entries }
    }

    /// 사용자 데이터 폴더의 기본 저장소
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| AppError::Config("데이터 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(base.join("checkmyroom").join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> Option<BTreeMap<String, String>> {
        let file = File::open(path).ok()?;
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(entries) => Some(entries),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "저장소 파일이 손상되어 새로 시작합니다");
                None
            }
        }
    }

    fn flush(&self) -> StoreResult<()> {
        let io_err = |e: std::io::Error| StoreError::Store(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = File::create(&self.path).map_err(io_err)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.entries)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
