//! Search-result formatting and favorites persistence for a catalog browser.
//!
//! - [`services::search::SearchClient`] queries the remote catalog and
//!   normalizes its records into [`Book`]s.
//! - [`services::favorites::FavoritesStore`] keeps the saved shortlist in a
//!   [`models::storage::KeyValueStore`] slot.
//! - [`services::session::SearchSession`] runs the search state machine and
//!   drops responses that arrive after a newer submission.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::CatalogConfig;
pub use error::{CatalogError, ErrorKind, Result};
pub use models::book::Book;
pub use models::responses::{SearchResultEnvelope, WorkDetails};
pub use models::session::{Notice, NoticeLevel, SearchField, SearchSessionState};
pub use services::favorites::FavoritesStore;
pub use services::normalize::normalize;
pub use services::search::SearchClient;
pub use services::session::{SearchSession, SubmitOutcome};
pub use services::transport::{HttpTransport, ReqwestTransport};
pub use utils::cover::{resolve_cover_url, CoverSize};
