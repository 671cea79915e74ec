//! Login screen controller

use crate::{Notification, Outcome, Screen};
use oxcatalog_core::SessionStore;
use oxcatalog_egress::AuthService;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Credentials entered on the login screen
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub tenant: String,
}

impl LoginForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        tenant: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            tenant: tenant.into(),
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tenant", &self.tenant)
            .finish()
    }
}

pub struct LoginController {
    auth: AuthService,
    store: Arc<dyn SessionStore>,
}

impl LoginController {
    pub fn new(auth: AuthService, store: Arc<dyn SessionStore>) -> Self {
        Self { auth, store }
    }

    /// Authenticate and, on success, store the session and move to products
    ///
    /// A failed attempt leaves the stored session untouched.
    pub async fn submit(&self, form: &LoginForm) -> Outcome {
        let session = match self
            .auth
            .authenticate(&form.username, &form.password, &form.tenant)
            .await
        {
            Ok(session) => session,
            Err(e) => return Outcome::notify(Notification::error(e.user_message())),
        };

        if let Err(e) = self.store.set(session).await {
            warn!("Failed to store session: {}", e);
            return Outcome::notify(Notification::error("could not save session"));
        }

        Outcome::redirect(Screen::Products)
            .with_notification(Notification::success("successfully logged in"))
    }
}
