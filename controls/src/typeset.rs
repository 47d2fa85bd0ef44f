//! Math typesetting collaborator.
//!
//! Labels carry math markup that an external renderer (MathJax in the
//! browser) re-renders in place. The panel asks for exactly one pass over its
//! container after all rows are attached. Hosts without a renderer pass no
//! typesetter, and the markup stays as raw text.

#[cfg(test)]
#[path = "typeset_test.rs"]
mod typeset_test;

use std::cell::RefCell;

/// Re-renders math notation inside a subtree.
pub trait Typesetter<N> {
    /// Queue a typesetting pass over `root`.
    ///
    /// Returns `false` if the renderer turned out to be unavailable, in which
    /// case nothing happened. Renderer failures are logged, never returned.
    fn typeset(&self, root: &N) -> bool;
}

/// Records typesetting requests instead of performing them.
///
/// Used by headless renders to report what a browser would have typeset.
#[derive(Debug)]
pub struct RecordingTypesetter<N> {
    roots: RefCell<Vec<N>>,
}

impl<N> Default for RecordingTypesetter<N> {
    fn default() -> Self {
        Self { roots: RefCell::new(Vec::new()) }
    }
}

impl<N: Clone> RecordingTypesetter<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Roots passed to [`Typesetter::typeset`] so far, in call order.
    #[must_use]
    pub fn roots(&self) -> Vec<N> {
        self.roots.borrow().clone()
    }
}

impl<N: Clone> Typesetter<N> for RecordingTypesetter<N> {
    fn typeset(&self, root: &N) -> bool {
        self.roots.borrow_mut().push(root.clone());
        true
    }
}
