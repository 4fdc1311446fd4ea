pub mod catalog;
pub mod selection;

pub use catalog::BookTable;
