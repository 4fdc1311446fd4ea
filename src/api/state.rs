use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    error::{AppError, AppResult},
    models::Book,
    services::BookTable,
};

/// Shared application state
///
/// The book table is immutable after startup and read without locking.
/// Only the random source sits behind a mutex.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<BookTable>,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// Creates state with a random source seeded from OS entropy
    pub fn new(catalog: BookTable) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    /// Creates state with a fixed seed, so picks are reproducible
    pub fn with_seed(catalog: BookTable, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: BookTable, rng: StdRng) -> Self {
        Self {
            catalog: Arc::new(catalog),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Runs a selection against the table with exclusive use of the random source
    pub fn select<T>(
        &self,
        pick: impl FnOnce(&[Book], &mut StdRng) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AppError::Internal(format!("random source unavailable: {e}")))?;

        pick(self.catalog.books(), &mut rng)
    }
}
