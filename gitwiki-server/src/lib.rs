//! HTTP front end for a [`gitwiki`] page store.
//!
//! Routes map onto the storage operations: `GET /{page}` renders a page
//! (absent pages redirect to their edit form), `GET /{page}/edit` shows the
//! form, `POST /{page}` commits the submitted body, `GET /pages` lists all
//! pages and `GET /` redirects to the home page.

pub mod config;
pub mod error;
pub mod routes;
pub mod templates;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use routes::{build_router, AppState};
