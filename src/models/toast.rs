use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

const MAX_TOASTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Toast {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }
}

/// Short-lived notifications, newest last.
#[derive(Debug, Clone)]
pub struct Toasts {
    items: VecDeque<Toast>,
    ttl: Duration,
}

impl Toasts {
    pub fn new(ttl_secs: u64) -> Self {
        Toasts {
            items: VecDeque::new(),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    pub fn push(&mut self, toast: Toast) {
        if self.items.len() == MAX_TOASTS {
            self.items.pop_front();
        }
        self.items.push_back(toast);
    }

    pub fn prune(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.items.retain(|t| now - t.created_at < ttl);
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.items.back()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_drops_expired() {
        let mut toasts = Toasts::new(4);
        let mut old = Toast::warning("old");
        old.created_at = Utc::now() - Duration::seconds(10);
        toasts.push(old);
        toasts.push(Toast::success("fresh"));

        toasts.prune(Utc::now());

        assert_eq!(toasts.iter().count(), 1);
        assert_eq!(toasts.latest().unwrap().message, "fresh");
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut toasts = Toasts::new(4);
        for i in 0..20 {
            toasts.push(Toast::error(format!("e{}", i)));
        }
        assert_eq!(toasts.iter().count(), MAX_TOASTS);
        assert_eq!(toasts.latest().unwrap().message, "e19");
    }
}
