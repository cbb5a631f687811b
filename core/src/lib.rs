mod models;
mod error;
pub mod api;
pub mod debounce;
pub mod images;
pub mod pagination;
pub mod pipeline;
pub mod sequence;

pub use models::*;
pub use error::{FetchError, PageError};
pub use api::{CatalogSource, ClientSettings, TmdbClient};
pub use debounce::Debouncer;
pub use images::{image_url, ImageSize};
pub use pagination::Pager;
pub use pipeline::{derive_view, SortDirection, SortKey};
pub use sequence::{RequestSequence, RequestTicket};

// Re-exported so implementors of `CatalogSource` need no direct dependency.
pub use async_trait::async_trait;
