//! Pure state transition.

use super::intent::Intent;
use super::state::StoreState;

/// Folds one intent into a store state.
///
/// Implementations take the previous snapshot by value and return the next
/// one. No I/O, no clocks, no randomness: the same state and intent always
/// give the same result, so a recorded intent log replays exactly.
pub trait Reducer {
    type State: StoreState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
