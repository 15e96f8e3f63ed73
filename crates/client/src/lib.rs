//! Data supply for the Yurucamp list views.
//!
//! [`DataProvider`] abstracts the backend CRUD API; [`HttpDataProvider`]
//! talks to it over REST and [`StaticDataProvider`] serves fixtures from
//! memory. [`ListBrowser`] ties a provider to a
//! [`ListViewController`](yurucamp_core::list_view::ListViewController),
//! refetching only when the server-side filters change.

pub mod browser;
pub mod error;
pub mod http;
pub mod memory;
pub mod provider;

pub use browser::ListBrowser;
pub use error::ClientError;
pub use http::HttpDataProvider;
pub use memory::StaticDataProvider;
pub use provider::{DataProvider, ListResource, SessionProvider, StaticSession};
