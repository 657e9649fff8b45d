//! Algorithms that bring objects to life in raw storage and tear them down again.
//!
//! Every function here works on storage described by a pointer to the first slot plus an
//! explicit slot count; bounds are never inferred from the pointer. The construct-side
//! functions expect slots that do not hold live objects, the destroy-side functions expect
//! slots that do. None of them allocate.
//!
//! Where a type declares through [`TypeTraits`] that cloning or default construction is a plain
//! byte operation, the functions take a fast path that skips per-slot `Clone`/`Default` calls.
//! Dropping is skipped entirely for types without drop glue.
//!
//! # Panics during construction
//!
//! If a `Clone` or `Default` implementation panics partway through [`fill_range()`],
//! [`fill_default_range()`] or [`copy_construct_range()`], the objects already constructed by
//! that call are dropped before the panic continues. The caller gets back the slots in the same
//! state it handed them over in: not live.
//!
//! # Examples
//!
//! ```
//! use std::alloc::{Layout, alloc};
//! use std::ptr::NonNull;
//!
//! use bare_std::uninit;
//!
//! let layout = Layout::array::<String>(3).unwrap();
//!
//! // SAFETY: The layout is not zero-sized.
//! let block = NonNull::new(unsafe { alloc(layout) }.cast::<String>()).unwrap();
//!
//! // SAFETY: The block has room for 3 strings, none of them live.
//! unsafe { uninit::fill_range(block, 3, &String::from("hi")) };
//!
//! // SAFETY: The first slot is live after the fill.
//! assert_eq!(unsafe { block.as_ref() }, "hi");
//!
//! // SAFETY: All 3 slots are live and the block came from the global allocator with the
//! // array layout for 3 strings.
//! unsafe { uninit::release_storage(block, 3, 3) };
//! ```

use std::ptr::NonNull;

use scopeguard::ScopeGuard;

use crate::{
    TypeTraits, is_trivially_constructible, is_trivially_copyable, is_trivially_destructible,
    storage,
};

/// Constructs a clone of `value` in `slot`.
///
/// # Safety
///
/// `slot` must be valid for writes, properly aligned and must not hold a live object.
/// Afterwards, it holds one.
pub unsafe fn construct_one<T: Clone>(slot: NonNull<T>, value: &T) {
    let clone = value.clone();

    // SAFETY: Forwarding the guarantee from the caller that the slot is writable and not live,
    // so we do not overwrite anything that needs dropping.
    unsafe {
        slot.write(clone);
    }
}

/// Moves `value` into `slot`. This is the ownership-transferring counterpart of
/// [`construct_one()`].
///
/// # Safety
///
/// `slot` must be valid for writes, properly aligned and must not hold a live object.
/// Afterwards, it holds one.
pub unsafe fn emplace_one<T>(slot: NonNull<T>, value: T) {
    // SAFETY: Forwarding the guarantee from the caller that the slot is writable and not live.
    unsafe {
        slot.write(value);
    }
}

/// Drops the object in `slot`, leaving the slot as raw storage.
///
/// # Safety
///
/// `slot` must hold a live object, which must not be used again afterwards.
pub unsafe fn destroy_one<T>(slot: NonNull<T>) {
    // SAFETY: Forwarding the guarantee from the caller that the slot holds a live object.
    unsafe {
        slot.drop_in_place();
    }
}

/// Drops `count` consecutive objects starting at `first`, in ascending order.
///
/// Does nothing for an empty range or for types without drop glue. If one of the drops panics,
/// the remaining objects are still dropped before the panic continues.
///
/// # Safety
///
/// The `count` slots starting at `first` must all hold live objects, which must not be used
/// again afterwards.
pub unsafe fn destroy_range<T>(first: NonNull<T>, count: usize) {
    if is_trivially_destructible::<T>() || count == 0 {
        return;
    }

    let live = NonNull::slice_from_raw_parts(first, count);

    // SAFETY: Forwarding the guarantee from the caller that every slot in the range is live.
    unsafe {
        live.drop_in_place();
    }
}

/// Constructs `count` clones of `value` in consecutive slots starting at `first`.
///
/// Trivially copyable types have their bytes copied into each slot instead of calling `Clone`.
///
/// # Safety
///
/// The `count` slots starting at `first` must be valid for writes, properly aligned and must not
/// hold live objects. `value` must not be located in any of these slots.
pub unsafe fn fill_range<T: Clone + TypeTraits>(first: NonNull<T>, count: usize, value: &T) {
    if is_trivially_copyable::<T>() {
        let source = NonNull::from(value);

        for index in 0..count {
            // SAFETY: The caller guarantees `count` slots, so every index is in bounds.
            let slot = unsafe { first.add(index) };

            // SAFETY: The type declares that a byte copy is a valid clone. The slot is writable
            // and does not overlap `value` as guaranteed by the caller.
            unsafe {
                source.copy_to_nonoverlapping(slot, 1);
            }
        }

        return;
    }

    let clone_value = |slot: NonNull<T>, _: usize| {
        // SAFETY: `construct_each()` only hands out slots from the caller's range, each one
        // exactly once and while it is not live.
        unsafe { construct_one(slot, value) };
    };

    // SAFETY: Forwarding the guarantees from the caller.
    unsafe {
        construct_each(first, count, clone_value);
    }
}

/// Constructs `count` default values in consecutive slots starting at `first`.
///
/// Trivially constructible types have their bytes zeroed instead of calling `Default`.
///
/// # Safety
///
/// The `count` slots starting at `first` must be valid for writes, properly aligned and must not
/// hold live objects.
pub unsafe fn fill_default_range<T: Default + TypeTraits>(first: NonNull<T>, count: usize) {
    if is_trivially_constructible::<T>() {
        // SAFETY: The type declares that its default value is all-zero bytes and the caller
        // guarantees the whole range is writable.
        unsafe {
            first.write_bytes(0, count);
        }

        return;
    }

    let default_into = |slot: NonNull<T>, _: usize| {
        // SAFETY: `construct_each()` only hands out slots from the caller's range, each one
        // exactly once and while it is not live.
        unsafe { emplace_one(slot, T::default()) };
    };

    // SAFETY: Forwarding the guarantees from the caller.
    unsafe {
        construct_each(first, count, default_into);
    }
}

/// Constructs clones of the `count` objects starting at `source` in the `count` slots starting
/// at `destination`, preserving order.
///
/// Trivially copyable types are copied with a single bulk byte copy.
///
/// # Safety
///
/// * The `count` slots starting at `source` must hold live objects.
/// * The `count` slots starting at `destination` must be valid for writes, properly aligned and
///   must not hold live objects.
/// * The two ranges must not overlap.
pub unsafe fn copy_construct_range<T: Clone + TypeTraits>(
    destination: NonNull<T>,
    source: NonNull<T>,
    count: usize,
) {
    if is_trivially_copyable::<T>() {
        // SAFETY: The type declares that a byte copy is a valid clone. The caller guarantees
        // both ranges are valid and do not overlap.
        unsafe {
            source.copy_to_nonoverlapping(destination, count);
        }

        return;
    }

    let clone_from_source = |slot: NonNull<T>, index: usize| {
        // SAFETY: `index` is below `count` and the caller guarantees `count` live objects.
        let original = unsafe { source.add(index) };

        // SAFETY: The original is live and no exclusive reference to it exists while we hold
        // the shared one.
        let original = unsafe { original.as_ref() };

        // SAFETY: `construct_each()` only hands out slots from the caller's range, each one
        // exactly once and while it is not live.
        unsafe { construct_one(slot, original) };
    };

    // SAFETY: Forwarding the guarantees from the caller.
    unsafe {
        construct_each(destination, count, clone_from_source);
    }
}

/// Moves the `count` objects starting at `source` into the `count` slots starting at
/// `destination`, preserving order.
///
/// A move is a byte copy for every type, so this is always a single bulk copy and never panics.
/// Afterwards, the source slots no longer hold live objects and must not be dropped.
///
/// # Safety
///
/// * The `count` slots starting at `source` must hold live objects.
/// * The `count` slots starting at `destination` must be valid for writes, properly aligned and
///   must not hold live objects.
/// * The two ranges must not overlap.
pub unsafe fn relocate_range<T>(destination: NonNull<T>, source: NonNull<T>, count: usize) {
    // SAFETY: Forwarding the guarantees from the caller. Ownership moves with the bytes.
    unsafe {
        source.copy_to_nonoverlapping(destination, count);
    }
}

/// Drops the `len` live objects at the start of a block and then returns the block to the global
/// allocator.
///
/// Types without drop glue skip straight to freeing the block. The block is freed even if one of
/// the drops panics.
///
/// # Safety
///
/// * `block` must have been allocated by the global allocator with the layout of an array of
///   `capacity` objects of `T`, or be a dangling pointer if that layout is zero-sized.
/// * The first `len` slots must hold live objects and `len` must not exceed `capacity`.
/// * Neither the block nor any of the objects in it may be used afterwards.
pub unsafe fn release_storage<T>(block: NonNull<T>, len: usize, capacity: usize) {
    debug_assert!(len <= capacity);

    let _deallocate = scopeguard::guard((), |()| {
        // SAFETY: Forwarding the guarantee from the caller that the block came from the global
        // allocator with exactly this array layout.
        unsafe { storage::deallocate(block, capacity) };
    });

    if !is_trivially_destructible::<T>() {
        // SAFETY: Forwarding the guarantee from the caller that the first `len` slots are live.
        unsafe { destroy_range(block, len) };
    }
}

/// Removes the first `count` objects of the live range of `len` objects starting at `first`,
/// shifting the survivors down to close the gap while preserving their order.
///
/// The removed objects are dropped. Afterwards, the range holds `len - count` live objects and
/// the trailing `count` slots no longer hold live objects. The survivors are shifted even if one
/// of the drops panics.
///
/// # Safety
///
/// * The `len` slots starting at `first` must hold live objects.
/// * `count` must not exceed `len`.
pub unsafe fn shift_erase<T>(first: NonNull<T>, len: usize, count: usize) {
    if count == 0 {
        return;
    }

    let survivors = len
        .checked_sub(count)
        .expect("caller guarantees that count does not exceed len");

    let _shift = scopeguard::guard((), |()| {
        // SAFETY: `count <= len`, so the survivors start inside the caller's range.
        let survivors_start = unsafe { first.add(count) };

        // SAFETY: Both ranges lie inside the caller's range. They may overlap, which `copy_to`
        // permits. The removed objects have been dropped, so nothing is overwritten that still
        // needs dropping, and ownership of the survivors moves with their bytes.
        unsafe { survivors_start.copy_to(first, survivors) };
    });

    // SAFETY: Forwarding the guarantee from the caller that the first `count` slots are live.
    unsafe { destroy_range(first, count) };
}

/// Calls `construct(slot, index)` for each of the `count` slots starting at `first`, in order.
/// Each call must leave its slot live.
///
/// If a call panics, the slots made live by the earlier calls are dropped again before the panic
/// continues.
///
/// # Safety
///
/// The `count` slots starting at `first` must be valid for writes, properly aligned and must not
/// hold live objects.
unsafe fn construct_each<T>(
    first: NonNull<T>,
    count: usize,
    mut construct: impl FnMut(NonNull<T>, usize),
) {
    let mut constructed = scopeguard::guard(0_usize, |constructed| {
        // SAFETY: Exactly the first `constructed` slots were made live by this function.
        unsafe { destroy_range(first, constructed) };
    });

    for index in 0..count {
        // SAFETY: The caller guarantees `count` slots, so every index is in bounds.
        let slot = unsafe { first.add(index) };

        construct(slot, index);

        *constructed = index
            .checked_add(1)
            .expect("guarded by count being a valid slot count");
    }

    // Every slot is live now and belongs to the caller.
    _ = ScopeGuard::into_inner(constructed);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::undocumented_unsafe_blocks, reason = "test code, be concise")]
#[allow(
    clippy::multiple_unsafe_ops_per_block,
    reason = "test code, be concise"
)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;
    use crate::tracked::{self, Tracked};

    /// A block of raw storage that returns itself to the allocator when dropped.
    /// It never drops the objects inside it - the test is responsible for that.
    struct Block<T> {
        first: NonNull<T>,
        capacity: usize,
    }

    impl<T> Block<T> {
        fn new(capacity: usize) -> Self {
            Self {
                first: storage::allocate(capacity).unwrap(),
                capacity,
            }
        }

        fn slot(&self, index: usize) -> NonNull<T> {
            assert!(index < self.capacity);
            unsafe { self.first.add(index) }
        }

        fn read(&self, index: usize) -> &T {
            unsafe { self.slot(index).as_ref() }
        }
    }

    impl<T> Drop for Block<T> {
        fn drop(&mut self) {
            unsafe { storage::deallocate(self.first, self.capacity) };
        }
    }

    #[test]
    fn construct_and_destroy_one() {
        tracked::reset();
        let block = Block::<Tracked>::new(1);
        let original = Tracked::new(7);

        unsafe { construct_one(block.slot(0), &original) };
        assert_eq!(block.read(0).value(), 7);
        assert_eq!(tracked::counts().clones, 1);

        unsafe { destroy_one(block.slot(0)) };
        drop(original);

        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn emplace_one_moves_without_cloning() {
        tracked::reset();
        let block = Block::<Tracked>::new(1);

        unsafe { emplace_one(block.slot(0), Tracked::new(3)) };

        assert_eq!(block.read(0).value(), 3);
        assert_eq!(tracked::counts().clones, 0);

        unsafe { destroy_one(block.slot(0)) };
        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn destroy_range_drops_every_element_once() {
        tracked::reset();
        let block = Block::<Tracked>::new(5);

        unsafe { fill_range(block.first, 5, &Tracked::new(1)) };
        assert_eq!(tracked::counts().live(), 5);

        unsafe { destroy_range(block.first, 5) };

        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn destroy_range_empty_is_noop() {
        tracked::reset();
        let block = Block::<Tracked>::new(1);

        unsafe { destroy_range(block.first, 0) };

        assert_eq!(tracked::counts().drops, 0);
    }

    #[test]
    fn fill_range_trivial_leaves_no_residue() {
        let block = Block::<u64>::new(16);

        unsafe { fill_range(block.first, 16, &0xAAAA_AAAA_AAAA_AAAA) };
        unsafe { destroy_range(block.first, 16) };
        unsafe { fill_range(block.first, 16, &0x1234) };

        for index in 0..16 {
            assert_eq!(*block.read(index), 0x1234);
        }
    }

    #[test]
    fn fill_range_non_trivial_clones_per_slot() {
        let block = Block::<String>::new(3);
        let value = String::from("abc");

        unsafe { fill_range(block.first, 3, &value) };

        for index in 0..3 {
            assert_eq!(block.read(index), "abc");
            assert_ne!(block.read(index).as_ptr(), value.as_ptr());
        }

        unsafe { destroy_range(block.first, 3) };
    }

    #[test]
    fn fill_range_rolls_back_on_panic() {
        tracked::reset();
        let block = Block::<Tracked>::new(8);
        let original = Tracked::new(1);

        tracked::panic_on_clone_number(4);

        let result = catch_unwind(AssertUnwindSafe(|| unsafe {
            fill_range(block.first, 8, &original);
        }));

        assert!(result.is_err());

        drop(original);

        // The three clones that succeeded were dropped again, nothing else was touched.
        let counts = tracked::counts();
        assert_eq!(counts.clones, 3);
        assert!(counts.is_balanced());
    }

    #[test]
    fn fill_default_range_trivial_zeroes() {
        let block = Block::<u32>::new(4);

        unsafe { fill_range(block.first, 4, &u32::MAX) };
        unsafe { destroy_range(block.first, 4) };
        unsafe { fill_default_range(block.first, 4) };

        for index in 0..4 {
            assert_eq!(*block.read(index), 0);
        }
    }

    #[test]
    fn fill_default_range_non_trivial_uses_default() {
        tracked::reset();
        let block = Block::<Tracked>::new(3);

        unsafe { fill_default_range(block.first, 3) };

        for index in 0..3 {
            assert_eq!(block.read(index).value(), 0);
        }
        assert_eq!(tracked::counts().constructions, 3);

        unsafe { destroy_range(block.first, 3) };
        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn copy_construct_range_trivial() {
        let source = [1_u16, 2, 3, 4];
        let block = Block::<u16>::new(4);

        unsafe { copy_construct_range(block.first, NonNull::from(&source).cast(), 4) };

        for index in 0..4 {
            assert_eq!(*block.read(index), source[index]);
        }
    }

    #[test]
    fn copy_construct_range_non_trivial_is_deep() {
        let source = [String::from("a"), String::from("b")];
        let block = Block::<String>::new(2);

        unsafe { copy_construct_range(block.first, NonNull::from(&source).cast(), 2) };

        assert_eq!(block.read(0), "a");
        assert_eq!(block.read(1), "b");
        assert_ne!(block.read(0).as_ptr(), source[0].as_ptr());

        unsafe { destroy_range(block.first, 2) };
    }

    #[test]
    fn copy_construct_range_rolls_back_on_panic() {
        tracked::reset();
        let source = [Tracked::new(1), Tracked::new(2), Tracked::new(3)];
        let block = Block::<Tracked>::new(3);

        tracked::panic_on_clone_number(3);

        let result = catch_unwind(AssertUnwindSafe(|| unsafe {
            copy_construct_range(block.first, NonNull::from(&source).cast(), 3);
        }));

        assert!(result.is_err());

        drop(source);
        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn relocate_range_transfers_ownership() {
        tracked::reset();
        let from = Block::<Tracked>::new(3);
        let to = Block::<Tracked>::new(3);

        unsafe { fill_range(from.first, 3, &Tracked::new(9)) };
        let clones_before = tracked::counts().clones;

        unsafe { relocate_range(to.first, from.first, 3) };

        assert_eq!(tracked::counts().clones, clones_before);
        assert_eq!(to.read(2).value(), 9);

        // Only the destination is dropped - the source slots are raw storage again.
        unsafe { destroy_range(to.first, 3) };
        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn release_storage_drops_live_prefix_only() {
        tracked::reset();
        let block = storage::allocate::<Tracked>(10).unwrap();

        unsafe { fill_range(block, 4, &Tracked::new(5)) };

        unsafe { release_storage(block, 4, 10) };

        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn release_storage_of_trivial_items() {
        let block = storage::allocate::<u8>(64).unwrap();

        unsafe { fill_range(block, 64, &0xFF) };

        // Nothing to observe beyond not crashing; Miri would flag a leak or a bad free.
        unsafe { release_storage(block, 64, 64) };
    }

    #[test]
    fn shift_erase_removes_front_of_range() {
        let block = Block::<String>::new(5);
        for (index, text) in ["1", "2", "3", "4", "5"].iter().enumerate() {
            unsafe { emplace_one(block.slot(index), (*text).to_string()) };
        }

        // Remove "3" from the live range that starts at it.
        unsafe { shift_erase(block.slot(2), 3, 1) };

        assert_eq!(block.read(0), "1");
        assert_eq!(block.read(1), "2");
        assert_eq!(block.read(2), "4");
        assert_eq!(block.read(3), "5");

        unsafe { destroy_range(block.first, 4) };
    }

    #[test]
    fn shift_erase_drops_exactly_removed() {
        tracked::reset();
        let block = Block::<Tracked>::new(6);
        for index in 0..6 {
            unsafe { emplace_one(block.slot(index), Tracked::new(index)) };
        }

        unsafe { shift_erase(block.first, 6, 2) };

        assert_eq!(tracked::counts().drops, 2);
        for index in 0..4 {
            assert_eq!(block.read(index).value(), index + 2);
        }

        unsafe { destroy_range(block.first, 4) };
        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn shift_erase_moves_survivors_when_drop_panics() {
        tracked::reset();
        let block = Block::<Tracked>::new(5);
        for index in 0..5 {
            unsafe { emplace_one(block.slot(index), Tracked::new(index)) };
        }

        tracked::panic_on_drop_number(1);

        let result = catch_unwind(AssertUnwindSafe(|| unsafe {
            shift_erase(block.first, 5, 2);
        }));

        assert!(result.is_err());
        assert_eq!(tracked::counts().drops, 2);
        for index in 0..3 {
            assert_eq!(block.read(index).value(), index + 2);
        }

        unsafe { destroy_range(block.first, 3) };
        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn release_storage_drops_rest_when_drop_panics() {
        tracked::reset();
        let block = storage::allocate::<Tracked>(6).unwrap();
        for index in 0..4 {
            unsafe { emplace_one(block.add(index), Tracked::new(index)) };
        }

        tracked::panic_on_drop_number(2);

        let result = catch_unwind(AssertUnwindSafe(|| unsafe {
            release_storage(block, 4, 6);
        }));

        // The block itself is freed by the guard; a leak or double free would show under Miri.
        assert!(result.is_err());
        assert_eq!(tracked::counts().drops, 4);
        assert!(tracked::counts().is_balanced());
    }

    #[test]
    fn shift_erase_of_everything() {
        tracked::reset();
        let block = Block::<Tracked>::new(3);
        unsafe { fill_range(block.first, 3, &Tracked::new(0)) };

        unsafe { shift_erase(block.first, 3, 3) };

        assert!(tracked::counts().is_balanced());
    }
}
