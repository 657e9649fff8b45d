//! Integration tests for the public uninitialized-memory algorithms, driven against storage
//! obtained directly from the global allocator.

#![allow(clippy::undocumented_unsafe_blocks, reason = "test code, be concise")]

use std::alloc::{Layout, alloc, dealloc};
use std::ptr::NonNull;
use std::rc::Rc;

use bare_std::uninit;

struct RawBlock<T> {
    first: NonNull<T>,
    layout: Layout,
}

impl<T> RawBlock<T> {
    fn new(capacity: usize) -> Self {
        let layout = Layout::array::<T>(capacity).unwrap();
        assert!(layout.size() > 0);

        let first = NonNull::new(unsafe { alloc(layout) }.cast::<T>()).unwrap();

        Self { first, layout }
    }

    fn get(&self, index: usize) -> &T {
        unsafe { self.first.add(index).as_ref() }
    }
}

impl<T> Drop for RawBlock<T> {
    fn drop(&mut self) {
        unsafe { dealloc(self.first.as_ptr().cast(), self.layout) };
    }
}

#[test]
fn fill_then_destroy_shared_handles() {
    let shared = Rc::new(5);
    let block = RawBlock::<Rc<i32>>::new(4);

    unsafe { uninit::fill_range(block.first, 4, &shared) };
    assert_eq!(Rc::strong_count(&shared), 5);
    assert_eq!(**block.get(3), 5);

    unsafe { uninit::destroy_range(block.first, 4) };
    assert_eq!(Rc::strong_count(&shared), 1);
}

#[test]
fn copy_construct_then_relocate() {
    let source = [String::from("x"), String::from("y"), String::from("z")];
    let first = RawBlock::<String>::new(3);
    let second = RawBlock::<String>::new(3);

    unsafe { uninit::copy_construct_range(first.first, NonNull::from(&source).cast(), 3) };
    unsafe { uninit::relocate_range(second.first, first.first, 3) };

    assert_eq!(second.get(0), "x");
    assert_eq!(second.get(2), "z");

    // Only the relocation target owns the strings now.
    unsafe { uninit::destroy_range(second.first, 3) };
}

#[test]
fn default_fill_of_integers_is_zero() {
    let block = RawBlock::<i64>::new(8);

    unsafe { uninit::fill_default_range(block.first, 8) };

    for index in 0..8 {
        assert_eq!(*block.get(index), 0);
    }
}

#[test]
fn default_fill_of_strings_is_empty() {
    let block = RawBlock::<String>::new(2);

    unsafe { uninit::fill_default_range(block.first, 2) };

    assert!(block.get(0).is_empty());
    assert!(block.get(1).is_empty());

    unsafe { uninit::destroy_range(block.first, 2) };
}

#[test]
fn emplace_and_destroy_one() {
    let shared = Rc::new(());
    let block = RawBlock::<Rc<()>>::new(1);

    unsafe { uninit::emplace_one(block.first, Rc::clone(&shared)) };
    assert_eq!(Rc::strong_count(&shared), 2);

    unsafe { uninit::destroy_one(block.first) };
    assert_eq!(Rc::strong_count(&shared), 1);
}
