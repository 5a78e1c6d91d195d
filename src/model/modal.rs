//! Modal stack for managing overlays
//!
//! Overlays are an enum-based stack; only the top modal receives input.

/// A modal overlay drawn on top of the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// State / status / year filter dialog
    Filters,
    /// Keyboard shortcut reference
    Help,
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn contains(&self, modal: &Modal) -> bool {
        self.stack.contains(modal)
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::Filters);
        stack.push(Modal::QuitConfirm);

        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert_eq!(stack.pop(), Some(Modal::Filters));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_modal_stack_contains() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Help);
        stack.push(Modal::QuitConfirm);

        assert!(stack.contains(&Modal::Help));
        assert!(!stack.contains(&Modal::Filters));
    }
}
