//! Authentication gate for protected screens

use oxcatalog_core::{Session, SessionStore};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Products,
    Search,
}

impl Screen {
    /// Whether entering the screen needs a session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Screen::Login)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Login => "login",
            Screen::Products => "products",
            Screen::Search => "search",
        };
        f.write_str(name)
    }
}

/// Result of trying to enter a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Entry allowed; protected screens get the active session
    Granted(Option<Session>),
    Redirect(Screen),
}

/// Decides screen entry from the presence of a session
#[derive(Clone)]
pub struct SessionGate {
    store: Arc<dyn SessionStore>,
}

impl SessionGate {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Enter `screen`, redirecting to login when no session is held
    ///
    /// A store that cannot be read counts as holding no session.
    pub async fn enter(&self, screen: Screen) -> Access {
        if !screen.is_protected() {
            return Access::Granted(None);
        }

        match self.store.get().await {
            Ok(Some(session)) => Access::Granted(Some(session)),
            Ok(None) => {
                info!("No session; redirecting {} to login", screen);
                Access::Redirect(Screen::Login)
            }
            Err(e) => {
                warn!("Failed to read session store: {}", e);
                Access::Redirect(Screen::Login)
            }
        }
    }

    /// The session for a protected screen, or the screen to go to instead
    pub async fn require(&self, screen: Screen) -> Result<Session, Screen> {
        match self.enter(screen).await {
            Access::Granted(Some(session)) => Ok(session),
            Access::Granted(None) => Err(Screen::Login),
            Access::Redirect(target) => Err(target),
        }
    }

    /// Drop the session on user request
    pub async fn logout(&self) -> oxcatalog_core::Result<()> {
        self.store.clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Drop a session the backend no longer accepts
    pub async fn invalidate(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear rejected session: {}", e);
        } else {
            info!("Session rejected by backend; cleared");
        }
    }
}
