//! # Filter State
//!
//! The current [`FilterOptions`]. Transient: never persisted, reset to
//! defaults for every session.

use explorer_core::FilterOptions;
use std::sync::{Mutex, MutexGuard};

/// Holder of the session's filter options.
#[derive(Debug, Default)]
pub struct FilterState {
    options: Mutex<FilterOptions>,
}

impl FilterState {
    pub fn new() -> Self {
        FilterState::default()
    }

    /// Copy of the current options.
    pub fn get(&self) -> FilterOptions {
        self.lock().clone()
    }

    /// Applies `change` and returns the resulting options.
    pub fn update(&self, change: impl FnOnce(&mut FilterOptions)) -> FilterOptions {
        let mut options = self.lock();
        change(&mut options);
        options.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FilterOptions> {
        self.options
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_core::SortOption;

    #[test]
    fn test_update_returns_new_options() {
        let state = FilterState::new();
        assert_eq!(state.get(), FilterOptions::default());

        let updated = state.update(|options| options.sort_by = SortOption::NameAsc);

        assert_eq!(updated.sort_by, SortOption::NameAsc);
        assert_eq!(state.get(), updated);
    }
}
