pub mod core_local_storage;
pub mod part;

pub use core_local_storage::CoreLocalStorage;
