//! Actions accepted by a store.

use std::fmt::Debug;

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Synchronous user actions (start/cancel editing)
/// - Phases of asynchronous remote calls (pending, fulfilled, rejected)
///
/// Intents are processed by reducers to produce new states. `Debug` is
/// required so every applied intent can be traced.
pub trait Intent: Debug + Send + 'static {}
