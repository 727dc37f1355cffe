//! LocalStorageによる下書きの永続化
//!
//! `StorageBackend` は文字列をそのまま読み書きするだけで、JSON変換は
//! `FormSnapshot` 側の責務。`DraftStorage` は名前空間付きキー1つだけを扱う。

use std::rc::Rc;

use crate::error::DraftError;
use crate::models::FormSnapshot;

pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, DraftError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), DraftError>;
    fn remove_item(&self, key: &str) -> Result<(), DraftError>;
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct WebLocalStorage;

impl WebLocalStorage {
    fn storage() -> Result<web_sys::Storage, DraftError> {
        let window = web_sys::window().ok_or(DraftError::StorageUnavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            _ => Err(DraftError::StorageUnavailable),
        }
    }
}

impl StorageBackend for WebLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, DraftError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| DraftError::Read(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), DraftError> {
        Self::storage()?.set_item(key, value).map_err(|e| {
            use wasm_bindgen::JsCast;
            match e.dyn_ref::<web_sys::DomException>() {
                Some(ex) if ex.name() == "QuotaExceededError" => DraftError::QuotaExceeded,
                _ => DraftError::Write(format!("{:?}", e)),
            }
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), DraftError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| DraftError::Remove(format!("{:?}", e)))
    }
}

/// 1フォーム分の下書きレコード
#[derive(Clone)]
pub struct DraftStorage {
    backend: Rc<dyn StorageBackend>,
    key: String,
}

impl DraftStorage {
    pub fn new(backend: Rc<dyn StorageBackend>, key: String) -> Self {
        Self { backend, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 下書きを読み込み（なければ None、壊れたJSONは `DraftError::Decode`）
    pub fn load(&self) -> Result<Option<FormSnapshot>, DraftError> {
        match self.backend.get_item(&self.key)? {
            Some(json) => FormSnapshot::from_json(&json).map(Some),
            None => Ok(None),
        }
    }

    /// 先に全体をエンコードしてから1回で書き込む。失敗時は前回のレコードが残る
    pub fn save(&self, snapshot: &FormSnapshot) -> Result<(), DraftError> {
        let json = snapshot.to_json()?;
        self.backend.set_item(&self.key, &json)
    }

    pub fn remove(&self) -> Result<(), DraftError> {
        self.backend.remove_item(&self.key)
    }

    pub fn exists(&self) -> Result<bool, DraftError> {
        Ok(self.backend.get_item(&self.key)?.is_some())
    }
}
