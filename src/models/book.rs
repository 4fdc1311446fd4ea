use serde::Serialize;

/// Column names every dataset must provide, after trimming and lower-casing
pub const REQUIRED_FIELDS: [&str; 6] = ["title", "author", "genre", "mood_tag", "energy", "notes"];

/// One row of the book dataset
///
/// Values are kept exactly as they appear in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub mood_tag: String,
    pub energy: String,
    pub notes: String,
}

/// Flat JSON body returned for a selected book
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookResponse {
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Copied from the record's `mood_tag`
    pub mood: String,
    pub energy: String,
    pub notes: String,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            mood: book.mood_tag.clone(),
            energy: book.energy.clone(),
            notes: book.notes.clone(),
        }
    }
}
