//! Raw storage blocks: memory sized for a number of `T` slots, none of which are assumed to be
//! live. The block itself does not know how many of its slots hold objects; that is tracked by
//! whoever owns it.

use std::alloc::{Layout, alloc, dealloc};
use std::any::type_name;
use std::ptr::NonNull;

use tracing::trace;

#[must_use]
fn layout<T>(capacity: usize) -> Layout {
    Layout::array::<T>(capacity).unwrap_or_else(|_| {
        panic!(
            "capacity overflow: {capacity} slots of {} do not fit in the address space",
            type_name::<T>()
        )
    })
}

/// Allocates a block with room for `capacity` objects of `T`. None of the slots are initialized.
///
/// Returns `None` for a zero capacity - there is no block in that case. Zero-sized types
/// receive a dangling, well-aligned pointer without touching the allocator.
///
/// # Panics
///
/// Panics if `capacity` slots of `T` would exceed the address space or if the allocation fails.
#[must_use]
pub(crate) fn allocate<T>(capacity: usize) -> Option<NonNull<T>> {
    if capacity == 0 {
        return None;
    }

    let layout = layout::<T>(capacity);

    if layout.size() == 0 {
        return Some(NonNull::dangling());
    }

    // SAFETY: The layout is valid for the target type and not zero-sized (checked above).
    let ptr = unsafe { alloc(layout) };

    let block = NonNull::new(ptr.cast::<T>()).expect(
        "we do not intend to handle allocation failure as a real possibility - OOM is panic",
    );

    trace!(
        capacity,
        bytes = layout.size(),
        item_type = type_name::<T>(),
        "allocated storage block"
    );

    Some(block)
}

/// Returns a block to the allocator. Objects still in the block are not dropped.
///
/// # Safety
///
/// `block` must have been returned by [`allocate()`] for the same `T` and `capacity` and must
/// not have been deallocated yet.
pub(crate) unsafe fn deallocate<T>(block: NonNull<T>, capacity: usize) {
    let layout = layout::<T>(capacity);

    if layout.size() == 0 {
        return;
    }

    // SAFETY: Forwarding the guarantee from the caller that the block came from `allocate()`,
    // which used the same layout.
    unsafe {
        dealloc(block.as_ptr().cast(), layout);
    }

    trace!(
        capacity,
        bytes = layout.size(),
        item_type = type_name::<T>(),
        "released storage block"
    );
}
