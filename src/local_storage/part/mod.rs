pub mod part_local_storage;
pub mod part_tables;

pub use part_local_storage::{Part, PartDraft, PartLocalStorage};
pub use part_tables::PartTable;
