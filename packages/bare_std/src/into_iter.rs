use std::any::type_name;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::{fmt, slice};

use crate::{DynamicArray, uninit};

/// An iterator that moves the elements out of a [`DynamicArray`], front to back.
///
/// Created by the `into_iter()` method of [`DynamicArray`] (provided by the
/// [`IntoIterator`] trait). Elements not yet yielded when the iterator is dropped are dropped
/// with it, after which the storage block is freed.
///
/// # Examples
///
/// ```
/// use bare_std::DynamicArray;
///
/// let array = DynamicArray::from([String::from("a"), String::from("b")]);
///
/// let joined: String = array.into_iter().collect();
///
/// assert_eq!(joined, "ab");
/// ```
pub struct IntoIter<T> {
    /// The storage block taken over from the array, `None` if the array had no block.
    block: Option<NonNull<T>>,

    capacity: usize,

    /// Slots `next..end` hold the elements not yet yielded. Everything else is raw storage.
    next: usize,
    end: usize,

    _owns: PhantomData<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(array: DynamicArray<T>) -> Self {
        let (block, len, capacity) = array.into_raw_parts();

        Self {
            block,
            capacity,
            next: 0,
            end: len,
            _owns: PhantomData,
        }
    }

    /// The elements not yet yielded, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        if self.block.is_none() {
            return &[];
        }

        let first = self.slot(self.next);

        // SAFETY: Slots `next..end` are live and stay untouched while the shared borrow of the
        // iterator lasts.
        unsafe { slice::from_raw_parts(first.as_ptr(), self.remaining()) }
    }

    fn remaining(&self) -> usize {
        self.end
            .checked_sub(self.next)
            .expect("guarded by next never passing end")
    }

    /// # Panics
    ///
    /// Panics if there is no block or `index` exceeds the capacity.
    fn slot(&self, index: usize) -> NonNull<T> {
        assert!(index <= self.capacity);

        let block = self
            .block
            .expect("guarded by callers - a slot is only requested when there is a block");

        // SAFETY: `index` is within the block or one past its end (asserted above).
        unsafe { block.add(index) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.next == self.end {
            return None;
        }

        let index = self.next;
        self.next = index.checked_add(1).expect("guarded by index < end");

        // SAFETY: The slot was live and is now outside `next..end`, so reading it transfers
        // ownership to the caller and the iterator will not drop it again.
        Some(unsafe { self.slot(index).read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.next == self.end {
            return None;
        }

        self.end = self.end.checked_sub(1).expect("guarded by next < end");

        // SAFETY: The slot was live and is now outside `next..end`, so reading it transfers
        // ownership to the caller and the iterator will not drop it again.
        Some(unsafe { self.slot(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let Some(block) = self.block.take() else {
            return;
        };

        let capacity = self.capacity;

        let _release = scopeguard::guard((), |()| {
            // SAFETY: The block came from the array, which allocated it with this capacity. The
            // remaining elements are dropped (or abandoned by a panicking drop) before this runs,
            // so no slot is live any more.
            unsafe { uninit::release_storage(block, 0, capacity) };
        });

        let remaining = self.remaining();
        let next = self.next;
        self.next = self.end;

        // SAFETY: `next <= end <= capacity`, so the slot is within the block or one past its end.
        let first = unsafe { block.add(next) };

        // SAFETY: The `remaining` slots starting at `first` are live and were never yielded.
        unsafe { uninit::destroy_range(first, remaining) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("remaining", &self.as_slice())
            .field("capacity", &self.capacity)
            .finish()
    }
}

// SAFETY: The iterator owns the remaining elements like the array did.
unsafe impl<T: Send> Send for IntoIter<T> {}

// SAFETY: Shared access to the iterator only hands out shared access to the elements.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::tracked::{self, Tracked};

    assert_impl_all!(IntoIter<String>: Send, Sync, ExactSizeIterator, DoubleEndedIterator);

    #[test]
    fn yields_in_order_from_both_ends() {
        let array = DynamicArray::from([1, 2, 3, 4]);
        let mut iter = array.into_iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.as_slice(), &[2, 3]);
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn empty_array_without_block() {
        let mut iter = DynamicArray::<String>::new().into_iter();

        assert_eq!(iter.len(), 0);
        assert!(iter.as_slice().is_empty());
        assert!(iter.next().is_none());
    }

    #[test]
    fn moves_without_cloning() {
        tracked::reset();
        let array: DynamicArray<Tracked> = (0..5).map(Tracked::new).collect();

        let values: Vec<_> = array.into_iter().map(|t| t.value()).collect();

        assert_eq!(values, [0, 1, 2, 3, 4]);
        assert_eq!(tracked::counts().clones, 0);
        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn partial_iteration_drops_rest() {
        tracked::reset();
        let array: DynamicArray<Tracked> = (0..6).map(Tracked::new).collect();

        let mut iter = array.into_iter();
        let first = iter.next();
        let last = iter.next_back();
        drop(iter);

        assert_eq!(tracked::counts().drops, 4);

        drop(first);
        drop(last);
        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn drop_of_partially_consumed_survives_panicking_element() {
        tracked::reset();
        let array: DynamicArray<Tracked> = (0..5).map(Tracked::new).collect();

        let mut iter = array.into_iter();
        let first = iter.next();

        tracked::panic_on_drop_number(1);

        let result = catch_unwind(AssertUnwindSafe(move || drop(iter)));
        assert!(result.is_err());

        // All four remaining elements were dropped, the yielded one is still alive.
        assert_eq!(tracked::counts().drops, 4);
        assert_eq!(first.as_ref().map(Tracked::value), Some(0));

        drop(first);
        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn debug_shows_remaining() {
        let mut iter = DynamicArray::from([7, 8]).into_iter();
        assert_eq!(iter.next(), Some(7));

        let formatted = format!("{iter:?}");

        assert!(formatted.contains("[8]"));
    }
}
