//! OxCatalog screen controllers
//!
//! Orchestrates the session store, identity connector and catalog connector
//! for the login, product list and search screens. Rendering is left to the
//! front end; controllers hand back state plus an [`Outcome`] describing what
//! to tell the user and where to go next.

pub mod gate;
pub mod login;
pub mod outcome;
pub mod products;
pub mod search;

pub use gate::{Access, Screen, SessionGate};
pub use login::{LoginController, LoginForm};
pub use outcome::{Level, Notification, Outcome};
pub use products::{DEFAULT_PAGE_SIZE, PageFetch, PageTicket, PageUpdate, ProductListController};
pub use search::SearchController;
