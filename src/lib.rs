pub mod cleaner;
pub mod cli;
pub mod core;
pub mod logging;
pub mod notebook;

pub use cleaner::{clean_document, clean_notebook};
