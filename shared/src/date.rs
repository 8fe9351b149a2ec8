//! 时间工具模块
//!
//! 本地补偿记录使用 ISO 8601 字符串（毫秒精度，`Z` 结尾）。
//! 在 wasm32 上 `Utc::now()` 由 chrono 的 `wasmbind` 特性提供。

use chrono::{DateTime, SecondsFormat, Utc};

/// 当前 UTC 时间
#[inline]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// 格式化为 ISO 8601，例如 `2024-05-01T09:30:00.000Z`
pub fn to_iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 解析 RFC 3339 字符串，失败返回 None
pub fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// 页面显示格式 `dd.mm.yyyy HH:MM`，无法解析时原样返回
pub fn display(s: &str) -> String {
    match parse_iso(s) {
        Some(t) => t.format("%d.%m.%Y %H:%M").to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso_format() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(to_iso(t), "2024-05-01T09:30:00.000Z");
        assert_eq!(parse_iso("2024-05-01T09:30:00.000Z"), Some(t));
    }

    #[test]
    fn test_display() {
        assert_eq!(display("2024-05-01T09:30:00.000Z"), "01.05.2024 09:30");
        assert_eq!(display("dün"), "dün");
    }
}
