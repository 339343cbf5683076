pub mod config;
pub mod error;
pub mod handlers;
pub mod interchange;
pub mod local_storage;


pub use error::{MalformedRow, Result, StoreError};
pub use local_storage::part::{Part, PartDraft, PartLocalStorage};
