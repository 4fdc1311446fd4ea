pub mod book;

pub use book::{Book, BookResponse, REQUIRED_FIELDS};
