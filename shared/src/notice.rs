//! 页面提示消息

use std::time::Duration;

pub const SHORT_NOTICE: Duration = Duration::from_secs(3);
pub const LONG_NOTICE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// 显示多久后自动清除
    pub ttl: Duration,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
            ttl: SHORT_NOTICE,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
            ttl: LONG_NOTICE,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
            ttl: SHORT_NOTICE,
        }
    }

    pub fn alert_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "alert alert-success shadow-lg",
            NoticeKind::Error => "alert alert-error shadow-lg",
            NoticeKind::Info => "alert alert-info shadow-lg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_info_clear_after_three_seconds() {
        assert_eq!(Notice::success("Kaydedildi").ttl, Duration::from_secs(3));
        assert_eq!(Notice::info("Bilgi").ttl, SHORT_NOTICE);
    }

    #[test]
    fn test_error_stays_five_seconds() {
        let notice = Notice::error("Sunucu hatası");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.ttl, Duration::from_secs(5));
        assert!(notice.ttl > SHORT_NOTICE);
    }

    #[test]
    fn test_alert_class_follows_kind() {
        assert_eq!(Notice::success("ok").alert_class(), "alert alert-success shadow-lg");
        assert_eq!(Notice::error("x").alert_class(), "alert alert-error shadow-lg");
        assert_eq!(Notice::info("i").alert_class(), "alert alert-info shadow-lg");
    }
}
