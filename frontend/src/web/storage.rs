//! LocalStorage 封装模块
//!
//! 基于 `gloo-storage`，为核心库提供 `KeyValueStore` 实现。
//! 值一律按原始字符串存取，JSON 编码由调用方负责。

use gloo_storage::{LocalStorage, Storage};
use gorev_takip_shared::store::KeyValueStore;

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    /// 读取原始字符串，不做 JSON 解码
    pub fn read(key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::read(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        LocalStorage::raw().set_item(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        LocalStorage::delete(key);
        true
    }
}
