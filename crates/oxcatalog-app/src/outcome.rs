//! Controller results handed to the front end

use crate::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub text: String,
}

impl Notification {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

/// What happened as a result of a controller action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notification: Option<Notification>,
    /// Screen the front end should switch to, if any
    pub redirect: Option<Screen>,
}

impl Outcome {
    pub fn quiet() -> Self {
        Self::default()
    }

    pub fn notify(notification: Notification) -> Self {
        Self {
            notification: Some(notification),
            redirect: None,
        }
    }

    pub fn redirect(screen: Screen) -> Self {
        Self {
            notification: None,
            redirect: Some(screen),
        }
    }

    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self.notification,
            Some(Notification {
                level: Level::Error,
                ..
            })
        )
    }
}
