//! Blog slice: post collection, edit selection and loading state.

mod intent;
mod reducer;
mod state;

pub use intent::{AsyncPhase, BlogIntent, PhaseKind, RejectReason, RequestMeta, UpdatePostArg};
pub use reducer::BlogReducer;
pub use state::BlogState;
