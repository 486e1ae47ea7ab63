//! Short code generation with collision pre-checks.

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::domain::errors::{GenerationError, StoreError};
use crate::domain::repositories::UrlStore;
use crate::utils::code_generator::draw_code;

/// Default cap on drawing attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Produces short codes, either random or caller-supplied.
///
/// The random source is injected, so a seeded generator yields the same
/// code sequence on every run. The existence check against the store is
/// advisory only: two callers may still draw the same free code, and the
/// loser learns about it from [`crate::domain::errors::StoreError::DuplicateCode`]
/// on insert.
pub struct CodeGenerator<S: UrlStore + ?Sized = dyn UrlStore> {
    store: Arc<S>,
    rng: Mutex<Box<dyn RngCore + Send>>,
    max_attempts: u32,
}

impl<S: UrlStore + ?Sized> CodeGenerator<S> {
    /// Creates a generator drawing from `rng`.
    pub fn new(store: Arc<S>, rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates a generator seeded from the operating system.
    pub fn from_entropy(store: Arc<S>) -> Self {
        Self::new(store, Box::new(StdRng::from_os_rng()))
    }

    /// Overrides the attempt cap. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns a short code.
    ///
    /// A non-empty `custom` code is returned verbatim without any store
    /// lookup; its uniqueness is decided by the insert. Otherwise a random
    /// code is drawn and checked against the store, up to the attempt cap.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Exhausted`] if every drawn code was taken.
    /// Returns [`GenerationError::Store`] if the existence check fails.
    pub async fn generate(&self, custom: Option<&str>) -> Result<String, GenerationError> {
        if let Some(code) = custom.filter(|c| !c.is_empty()) {
            return Ok(code.to_string());
        }

        let mut remaining = self.max_attempts;
        match self.draw_unused(&mut remaining).await? {
            Some(code) => Ok(code),
            None => Err(GenerationError::Exhausted {
                attempts: self.max_attempts,
            }),
        }
    }

    /// Draws random codes until one is not in the store, spending one unit
    /// of `remaining` per draw.
    ///
    /// Returns `Ok(None)` once `remaining` reaches zero. Callers that retry
    /// after a lost insert race pass the same counter back in, so the draws
    /// of one shorten call stay within a single attempt cap.
    pub async fn draw_unused(&self, remaining: &mut u32) -> Result<Option<String>, StoreError> {
        while *remaining > 0 {
            *remaining -= 1;
            let code = self.draw();

            if self.store.get_by_code(&code).await?.is_none() {
                return Ok(Some(code));
            }

            debug!(code = %code, remaining = *remaining, "Drawn short code already taken");
        }

        Ok(None)
    }

    fn draw(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw_code(&mut *rng)
    }
}
