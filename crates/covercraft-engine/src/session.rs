use covercraft_core::ProductDocument;

use crate::selection::SelectionEngine;

/// Lifecycle of one shopper session: `Loading` until the fetch-and-normalize
/// step finishes, then `Ready` with a live engine or `Failed` with a
/// human-readable reason.
///
/// There is no terminal "submitted" state — adding to a cart is an external
/// side effect, not a transition of this machine. A later load simply
/// supersedes whatever state came before it.
#[derive(Default)]
pub enum ProductSession {
    #[default]
    Loading,
    Ready(SelectionEngine),
    Failed(String),
}

impl ProductSession {
    /// Applies the outcome of the initial load, superseding prior state.
    pub fn finish_load(&mut self, result: Result<ProductDocument, String>) {
        *self = match result {
            Ok(document) => ProductSession::Ready(SelectionEngine::new(document)),
            Err(reason) => ProductSession::Failed(reason),
        };
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, ProductSession::Loading)
    }

    /// The live engine, once the session is ready.
    #[must_use]
    pub fn engine(&self) -> Option<&SelectionEngine> {
        match self {
            ProductSession::Ready(engine) => Some(engine),
            _ => None,
        }
    }

    /// Mutable access for selection and quantity calls.
    #[must_use]
    pub fn engine_mut(&mut self) -> Option<&mut SelectionEngine> {
        match self {
            ProductSession::Ready(engine) => Some(engine),
            _ => None,
        }
    }

    /// The load failure reason, if the session failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            ProductSession::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}
