//! State held by a store.

use std::fmt::Debug;

/// Snapshot type a store publishes to its subscribers.
///
/// `Clone` must give a fully independent copy, since snapshots are handed to
/// listeners and watch receivers on other threads. `Default` is the state a
/// freshly constructed store starts from, and `PartialEq` lets consumers skip
/// unchanged snapshots.
pub trait StoreState: Clone + Debug + PartialEq + Default + Send + Sync + 'static {}
