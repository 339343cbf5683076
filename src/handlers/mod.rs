pub mod part_handler;

pub use part_handler::{HandlerError, OutputFormat, PartChanges, PartHandler};
