use std::{collections::BTreeMap, io, path::Path};

use csv::{ReaderBuilder, StringRecord};

use crate::{
    error::LoadError,
    models::{Book, REQUIRED_FIELDS},
};

/// Immutable, ordered collection of books loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookTable {
    books: Vec<Book>,
}

impl BookTable {
    /// Loads the table from a CSV file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Reading book source");

        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::from_reader(file)
    }

    /// Loads the table from any CSV source with a header row
    ///
    /// Header names are matched after trimming and lower-casing. Extra columns
    /// are ignored. Cell values are stored verbatim; an empty value in a
    /// required column rejects the whole source.
    pub fn from_reader<R: io::Read>(source: R) -> Result<Self, LoadError> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);

        let columns = ColumnIndex::resolve(reader.headers()?)?;

        let mut books = Vec::new();
        for record in reader.records() {
            books.push(columns.extract(&record?)?);
        }

        tracing::debug!(rows = books.len(), "Book source parsed");

        Ok(Self { books })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Number of books per distinct mood tag
    pub fn mood_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for book in &self.books {
            *counts.entry(book.mood_tag.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Position of each required field within a source row, in `REQUIRED_FIELDS` order
struct ColumnIndex([usize; REQUIRED_FIELDS.len()]);

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let mut positions = [0; REQUIRED_FIELDS.len()];
        let mut missing = Vec::new();

        for (slot, field) in positions.iter_mut().zip(REQUIRED_FIELDS) {
            match normalized.iter().position(|name| name == field) {
                Some(position) => *slot = position,
                None => missing.push(field.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(LoadError::Schema { missing });
        }

        Ok(Self(positions))
    }

    fn extract(&self, record: &StringRecord) -> Result<Book, LoadError> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let value = |slot: usize| {
            let field = REQUIRED_FIELDS[slot];
            match record.get(self.0[slot]) {
                Some(value) if !value.is_empty() => Ok(value.to_string()),
                _ => Err(LoadError::IncompleteRecord { line, field }),
            }
        };

        Ok(Book {
            title: value(0)?,
            author: value(1)?,
            genre: value(2)?,
            mood_tag: value(3)?,
            energy: value(4)?,
            notes: value(5)?,
        })
    }
}
