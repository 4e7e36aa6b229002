//! Model-View-Intent (MVI) primitives for the post store.
//!
//! State only changes by feeding an intent through a reducer:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                                  │
//!    └──────────────────────────────────┘
//! ```
//!
//! - **State**: owned snapshot of the posts, selection and request bookkeeping
//! - **Intent**: user action or settled remote call
//! - **Reducer**: pure function `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;
