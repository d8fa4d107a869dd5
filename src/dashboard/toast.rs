use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

pub trait Notifier {
    fn notify(&mut self, toast: Toast);

    fn success(&mut self, message: impl Into<String>) {
        self.notify(Toast {
            level: ToastLevel::Success,
            message: message.into(),
        });
    }

    fn error(&mut self, message: impl Into<String>) {
        self.notify(Toast {
            level: ToastLevel::Error,
            message: message.into(),
        });
    }

    fn info(&mut self, message: impl Into<String>) {
        self.notify(Toast {
            level: ToastLevel::Info,
            message: message.into(),
        });
    }
}

/// Transient notifications waiting to be shown.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[Toast] {
        &self.pending
    }

    pub fn last(&self) -> Option<&Toast> {
        self.pending.last()
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.pending)
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => log::error!("{}", toast.message),
            _ => log::info!("{}", toast.message),
        }
        self.pending.push(toast);
    }
}
