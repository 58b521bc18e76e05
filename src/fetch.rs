//! Fetch lifecycle shared by the dashboard components.
//!
//! Each component owns one [`FetchSlot`]. Issuing a fetch bumps a generation
//! counter and moves the slot to Loading. A resolution carries the generation
//! it was issued with; if that generation is no longer current the result is
//! discarded without touching visible state. Input changes and detach bump
//! the counter the same way, so only the most recently issued fetch can ever
//! commit. A fast response for new inputs is never overwritten by a slow
//! response for old ones.

use std::sync::Mutex;

/// Visible state of one component's fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// No fetch issued yet.
    Idle,
    /// A fetch with this generation is in flight.
    Loading { generation: u64 },
    /// The most recent fetch succeeded.
    Success(T),
    /// The most recent fetch failed; the message is what the banner shows.
    Error(String),
}

impl<T> FetchState<T> {
    /// True while Idle or Loading, i.e. nothing resolved yet for the current
    /// inputs.
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Idle | FetchState::Loading { .. })
    }
}

struct Inner<T> {
    state: FetchState<T>,
    generation: u64,
}

/// Generation-counted holder for one component's fetch state.
pub struct FetchSlot<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> FetchSlot<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: FetchState::Idle,
                generation: 0,
            }),
        }
    }

    /// Begin a new fetch attempt, superseding any in-flight one.
    ///
    /// Returns the generation the caller must pass back to [`resolve`].
    ///
    /// [`resolve`]: FetchSlot::resolve
    pub fn begin(&self) -> u64 {
        if let Ok(mut inner) = self.inner.lock() {
            inner.generation += 1;
            inner.state = FetchState::Loading {
                generation: inner.generation,
            };
            inner.generation
        } else {
            0
        }
    }

    /// Commit the result of the fetch issued as `generation`.
    ///
    /// Returns false when the result was stale and discarded.
    pub fn resolve(&self, generation: u64, result: Result<T, String>) -> bool {
        if let Ok(mut inner) = self.inner.lock() {
            if generation != inner.generation {
                log::debug!(
                    "Discarding stale fetch result (generation {} superseded by {})",
                    generation,
                    inner.generation
                );
                return false;
            }
            inner.state = match result {
                Ok(value) => FetchState::Success(value),
                Err(message) => FetchState::Error(message),
            };
            true
        } else {
            false
        }
    }

    /// Invalidate any in-flight fetch without issuing a new one.
    ///
    /// Used on input changes (immediately before the next [`begin`]) and on
    /// detach, where no further state updates may become visible.
    ///
    /// [`begin`]: FetchSlot::begin
    pub fn invalidate(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.generation += 1;
        }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> FetchState<T> {
        self.inner
            .lock()
            .map(|inner| inner.state.clone())
            .unwrap_or(FetchState::Idle)
    }
}

impl<T: Clone> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_enters_loading() {
        let slot: FetchSlot<u32> = FetchSlot::new();
        assert_eq!(slot.snapshot(), FetchState::Idle);
        let generation = slot.begin();
        assert_eq!(slot.snapshot(), FetchState::Loading { generation });
    }

    #[test]
    fn test_current_generation_commits() {
        let slot: FetchSlot<u32> = FetchSlot::new();
        let generation = slot.begin();
        assert!(slot.resolve(generation, Ok(7)));
        assert_eq!(slot.snapshot(), FetchState::Success(7));
    }

    #[test]
    fn test_superseded_generation_is_discarded() {
        let slot: FetchSlot<u32> = FetchSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        // The slow first response arrives after the second fetch was issued.
        assert!(!slot.resolve(first, Ok(1)));
        assert_eq!(slot.snapshot(), FetchState::Loading { generation: second });
        assert!(slot.resolve(second, Ok(2)));
        assert_eq!(slot.snapshot(), FetchState::Success(2));
    }

    #[test]
    fn test_two_input_changes_keep_only_final_result() {
        let slot: FetchSlot<&'static str> = FetchSlot::new();
        let a = slot.begin();
        let b = slot.begin();
        let c = slot.begin();
        assert!(slot.resolve(c, Ok("final")));
        // Older responses resolving late must not overwrite the final state.
        assert!(!slot.resolve(a, Ok("first")));
        assert!(!slot.resolve(b, Err("second failed".into())));
        assert_eq!(slot.snapshot(), FetchState::Success("final"));
    }

    #[test]
    fn test_invalidate_discards_in_flight() {
        let slot: FetchSlot<u32> = FetchSlot::new();
        let generation = slot.begin();
        slot.invalidate();
        assert!(!slot.resolve(generation, Ok(9)));
        // State keeps showing the superseded Loading; nothing committed.
        assert_eq!(slot.snapshot(), FetchState::Loading { generation });
    }

    #[test]
    fn test_error_commits_message() {
        let slot: FetchSlot<u32> = FetchSlot::new();
        let generation = slot.begin();
        assert!(slot.resolve(generation, Err("HTTP 500".into())));
        assert_eq!(slot.snapshot(), FetchState::Error("HTTP 500".into()));
    }

    #[test]
    fn test_pending_states() {
        let slot: FetchSlot<u32> = FetchSlot::new();
        assert!(slot.snapshot().is_pending());
        let generation = slot.begin();
        assert!(slot.snapshot().is_pending());
        slot.resolve(generation, Ok(1));
        assert!(!slot.snapshot().is_pending());
    }
}
