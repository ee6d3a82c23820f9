//! Guard predicates for controlling transitions.
//!
//! Guards are boolean closures evaluated while the engine scans the
//! transition table. A rule whose guard returns `false` is skipped and the
//! scan moves on to the next declared rule.

use std::fmt;

/// Predicate that decides whether a transition rule may fire.
///
/// Guards take no arguments: they read whatever entity state they captured
/// (usually through `Rc<RefCell<_>>` or `Cell`). They are invoked synchronously
/// on the thread driving the engine and need not be `Send` or `Sync`.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Guard;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let lives = Rc::new(Cell::new(3));
/// let counter = Rc::clone(&lives);
/// let game_over = Guard::new(move || counter.get() == 0);
///
/// assert!(!game_over.check());
/// lives.set(0);
/// assert!(game_over.check());
/// ```
pub struct Guard {
    predicate: Box<dyn Fn() -> bool>,
}

impl Guard {
    /// Create a guard from a predicate closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn guard_reads_captured_state() {
        let energy = Rc::new(Cell::new(10));
        let e = Rc::clone(&energy);
        let guard = Guard::new(move || e.get() > 5);

        assert!(guard.check());
        energy.set(2);
        assert!(!guard.check());
    }

    #[test]
    fn guard_is_deterministic_for_unchanged_state() {
        let guard = Guard::new(|| true);
        assert_eq!(guard.check(), guard.check());
    }

    #[test]
    fn guard_can_use_complex_predicates() {
        let path = Rc::new(RefCell::new(vec![1, 2, 3]));
        let p = Rc::clone(&path);
        let guard = Guard::new(move || p.borrow().iter().sum::<i32>() > 5);

        assert!(guard.check());
        path.borrow_mut().clear();
        assert!(!guard.check());
    }
}
