//! The selection engine: given an immutable product document and the
//! shopper's in-progress option choices, derives the resolved variant,
//! per-option availability, price, image, and quantity bounds.
//!
//! Pure and synchronous — no I/O, no hidden state. Each shopper session
//! owns one [`SelectionEngine`] instance; derived getters are plain
//! functions of the current selection and may be called repeatedly in any
//! order between mutations.

mod selection;
mod session;

pub use selection::{EngineError, OptionState, OptionStateRow, SelectionEngine, Snapshot};
pub use session::ProductSession;
