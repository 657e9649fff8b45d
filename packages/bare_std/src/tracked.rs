//! An instrumented element type for verifying object lifecycles in tests.
//!
//! Counters are thread-local so that tests running in parallel do not see each other's objects.
//! Moves are bitwise and cannot be observed; a move shows up as the absence of a clone.

use std::cell::Cell;

use crate::TypeTraits;

thread_local! {
    static CONSTRUCTIONS: Cell<usize> = const { Cell::new(0) };
    static CLONES: Cell<usize> = const { Cell::new(0) };
    static DROPS: Cell<usize> = const { Cell::new(0) };

    // Clone number (1-based, counting attempts since the last reset) that will panic.
    static PANIC_ON_CLONE: Cell<Option<usize>> = const { Cell::new(None) };
    static CLONE_ATTEMPTS: Cell<usize> = const { Cell::new(0) };

    // Drop number (1-based, counting drops since arming) that will panic after being counted.
    static PANIC_ON_DROP: Cell<Option<usize>> = const { Cell::new(None) };
    static DROP_ATTEMPTS: Cell<usize> = const { Cell::new(0) };
}

fn bump(counter: &'static std::thread::LocalKey<Cell<usize>>) -> usize {
    counter.with(|cell| {
        let next = cell.get().checked_add(1).unwrap();
        cell.set(next);
        next
    })
}

/// Snapshot of the lifecycle counters of the current thread.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Counts {
    /// Objects created from scratch via `new()` or `default()`.
    pub(crate) constructions: usize,

    /// Objects created via `clone()`.
    pub(crate) clones: usize,

    /// Objects dropped.
    pub(crate) drops: usize,
}

impl Counts {
    /// Number of objects currently alive.
    pub(crate) fn live(self) -> usize {
        self.constructions
            .checked_add(self.clones)
            .and_then(|created| created.checked_sub(self.drops))
            .expect("more objects were dropped than created")
    }

    /// Every object that was created has been dropped exactly once.
    pub(crate) fn is_balanced(self) -> bool {
        self.live() == 0
    }
}

/// Resets all counters of the current thread and disarms any pending clone or drop panic.
pub(crate) fn reset() {
    CONSTRUCTIONS.with(|c| c.set(0));
    CLONES.with(|c| c.set(0));
    DROPS.with(|c| c.set(0));
    CLONE_ATTEMPTS.with(|c| c.set(0));
    PANIC_ON_CLONE.with(|c| c.set(None));
    DROP_ATTEMPTS.with(|c| c.set(0));
    PANIC_ON_DROP.with(|c| c.set(None));
}

pub(crate) fn counts() -> Counts {
    Counts {
        constructions: CONSTRUCTIONS.with(Cell::get),
        clones: CLONES.with(Cell::get),
        drops: DROPS.with(Cell::get),
    }
}

/// Makes the `attempt`-th clone from now panic instead of producing a value.
pub(crate) fn panic_on_clone_number(attempt: usize) {
    CLONE_ATTEMPTS.with(|c| c.set(0));
    PANIC_ON_CLONE.with(|c| c.set(Some(attempt)));
}

/// Makes the `attempt`-th drop from now panic. The object still counts as dropped.
pub(crate) fn panic_on_drop_number(attempt: usize) {
    DROP_ATTEMPTS.with(|c| c.set(0));
    PANIC_ON_DROP.with(|c| c.set(Some(attempt)));
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Tracked {
    value: usize,
}

impl Tracked {
    pub(crate) fn new(value: usize) -> Self {
        bump(&CONSTRUCTIONS);
        Self { value }
    }

    pub(crate) fn value(&self) -> usize {
        self.value
    }
}

impl Default for Tracked {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let attempt = bump(&CLONE_ATTEMPTS);

        if PANIC_ON_CLONE.with(Cell::get) == Some(attempt) {
            PANIC_ON_CLONE.with(|c| c.set(None));
            panic!("clone number {attempt} of Tracked was told to fail");
        }

        bump(&CLONES);
        Self { value: self.value }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        bump(&DROPS);

        let attempt = bump(&DROP_ATTEMPTS);

        if PANIC_ON_DROP.with(Cell::get) == Some(attempt) {
            PANIC_ON_DROP.with(|c| c.set(None));
            panic!("drop number {attempt} of Tracked was told to fail");
        }
    }
}

// SAFETY: The defaults make no promises.
unsafe impl TypeTraits for Tracked {}
