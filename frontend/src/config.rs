//! 前端配置来源
//!
//! 查找顺序：LocalStorage 覆盖值 -> 编译期环境变量 -> 核心库默认值。

use crate::web::BrowserStore;
use gorev_takip::{ClientConfig, KEY_API_URL, KEY_LOG_LEVEL, KEY_REFRESH_SECS};

fn compiled(key: &str) -> Option<&'static str> {
    match key {
        KEY_API_URL => option_env!("GOREV_API_URL"),
        KEY_REFRESH_SECS => option_env!("GOREV_REFRESH_SECS"),
        KEY_LOG_LEVEL => option_env!("GOREV_LOG_LEVEL"),
        _ => None,
    }
}

pub fn load() -> ClientConfig {
    ClientConfig::from_lookup(|key| {
        BrowserStore::read(key)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| compiled(key).map(str::to_string))
    })
}
