use std::any::type_name;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut, Range};
use std::ptr::{self, NonNull};
use std::{fmt, slice};

use tracing::trace;

use crate::{Error, IntoIter, Result, TypeTraits, storage, uninit, utility};

/// Capacity of the first block allocated when appending to an array that has none.
const MIN_GROWN_CAPACITY: usize = 2;

/// A contiguous, growable array of `T` backed by a block of raw storage that it owns exclusively.
///
/// The array tracks how many slots its block has (the capacity) and how many of them, counted
/// from the start, hold live elements (the length). Slots past the length are raw storage and
/// are never read or dropped.
///
/// All element lifecycle transitions go through the algorithms in [`uninit`][crate::uninit]:
/// elements are cloned, moved, default-constructed and dropped there, with fast paths chosen by
/// [`TypeTraits`] for types whose lifecycle is plain byte manipulation.
///
/// # Growth
///
/// Appending to a full array doubles its capacity (starting at 2). Inserting that needs more room
/// grows to double the capacity or to the required size, whichever is larger. [`reserve()`][1]
/// and [`resize()`][2] grow to exactly the requested capacity. Each growth allocates a new block,
/// moves the elements over and frees the old block, invalidating any pointers into it.
///
/// # Element access
///
/// The array dereferences to a slice, so indexing, iteration and all slice methods are available.
/// Indexing panics on an out-of-range index; [`at()`][3] reports it as an [`Error`] instead and
/// `get_unchecked()` from the slice skips the check entirely.
///
/// # Examples
///
/// ```
/// use bare_std::DynamicArray;
///
/// let mut array = DynamicArray::new();
///
/// for value in 0..5 {
///     array.push_back(value);
/// }
///
/// assert_eq!(array.len(), 5);
/// assert_eq!(array[2], 2);
/// assert!(array.at(10).is_err());
///
/// array.erase(2);
/// assert_eq!(array.as_slice(), &[0, 1, 3, 4]);
/// ```
///
/// [1]: Self::reserve
/// [2]: Self::resize
/// [3]: Self::at
pub struct DynamicArray<T> {
    /// The block of raw storage, `None` if and only if the capacity is zero.
    data: Option<NonNull<T>>,

    /// The number of live elements at the start of the block.
    len: usize,

    /// The number of slots in the block.
    capacity: usize,

    _owns: PhantomData<T>,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array. Nothing is allocated until the first element is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use bare_std::DynamicArray;
    ///
    /// let array = DynamicArray::<String>::new();
    ///
    /// assert_eq!(array.len(), 0);
    /// assert_eq!(array.capacity(), 0);
    /// assert!(array.as_ptr().is_null());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: None,
            len: 0,
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Creates an empty array with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the capacity does not fit in the address space or cannot be allocated.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: storage::allocate(capacity),
            len: 0,
            capacity,
            _owns: PhantomData,
        }
    }

    /// Creates an array of `count` clones of `value`. The capacity equals `count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bare_std::DynamicArray;
    ///
    /// let array = DynamicArray::filled(3, &42);
    ///
    /// assert_eq!(array.as_slice(), &[42, 42, 42]);
    /// assert_eq!(array.capacity(), 3);
    /// ```
    #[must_use]
    pub fn filled(count: usize, value: &T) -> Self
    where
        T: Clone + TypeTraits,
    {
        let mut array = Self::with_capacity(count);

        if let Some(data) = array.data {
            // SAFETY: The block was just allocated with room for `count` elements, none live.
            // `value` is borrowed from outside, so it cannot be in the block.
            unsafe {
                uninit::fill_range(data, count, value);
            }

            array.len = count;
        }

        array
    }

    /// Creates an array holding clones of `items`, in order. The capacity equals the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use bare_std::DynamicArray;
    ///
    /// let array = DynamicArray::from_slice(&["a", "b"]);
    ///
    /// assert_eq!(array.len(), 2);
    /// assert_eq!(array[1], "b");
    /// ```
    #[must_use]
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone + TypeTraits,
    {
        let mut array = Self::with_capacity(items.len());

        if let Some(data) = array.data {
            // SAFETY: The block was just allocated with room for `items.len()` elements, none
            // live, and it cannot overlap the borrowed `items`.
            unsafe {
                uninit::copy_construct_range(data, NonNull::from(items).cast(), items.len());
            }

            array.len = items.len();
        }

        array
    }

    /// The number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of elements the array can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// A pointer to the first slot of the storage block, or null if the array has no block.
    ///
    /// The pointer is invalidated by any operation that reallocates.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.data
            .map_or(ptr::null(), |data| data.as_ptr().cast_const())
    }

    /// A mutable pointer to the first slot of the storage block, or null if the array has no
    /// block.
    ///
    /// The pointer is invalidated by any operation that reallocates.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// The live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self.data {
            // SAFETY: The first `len` slots of the block are live and we hand out a shared
            // reference tied to a shared borrow of the array.
            Some(data) => unsafe { slice::from_raw_parts(data.as_ptr(), self.len) },
            None => &[],
        }
    }

    /// The live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.data {
            // SAFETY: The first `len` slots of the block are live and we hand out an exclusive
            // reference tied to an exclusive borrow of the array.
            Some(data) => unsafe { slice::from_raw_parts_mut(data.as_ptr(), self.len) },
            None => &mut [],
        }
    }

    /// The element at `index`, or [`Error::OutOfRange`] if there is no live element there.
    ///
    /// # Examples
    ///
    /// ```
    /// use bare_std::{DynamicArray, Error};
    ///
    /// let array = DynamicArray::from([10, 20, 30]);
    ///
    /// assert_eq!(array.at(1), Ok(&20));
    /// assert_eq!(array.at(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len;

        self.as_slice()
            .get(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// The element at `index` for modification, or [`Error::OutOfRange`] if there is no live
    /// element there.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;

        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// The first element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    #[must_use]
    pub fn front(&self) -> &T {
        self.as_slice().first().unwrap_or_else(|| {
            panic!(
                "front() called on an empty dynamic array of {}",
                type_name::<T>()
            )
        })
    }

    /// The first element, for modification.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    #[must_use]
    pub fn front_mut(&mut self) -> &mut T {
        self.as_mut_slice().first_mut().unwrap_or_else(|| {
            panic!(
                "front_mut() called on an empty dynamic array of {}",
                type_name::<T>()
            )
        })
    }

    /// The last element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    #[must_use]
    pub fn back(&self) -> &T {
        self.as_slice().last().unwrap_or_else(|| {
            panic!(
                "back() called on an empty dynamic array of {}",
                type_name::<T>()
            )
        })
    }

    /// The last element, for modification.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    #[must_use]
    pub fn back_mut(&mut self) -> &mut T {
        self.as_mut_slice().last_mut().unwrap_or_else(|| {
            panic!(
                "back_mut() called on an empty dynamic array of {}",
                type_name::<T>()
            )
        })
    }

    /// Appends `value` to the end of the array, taking ownership of it.
    ///
    /// If the array is full, it first grows to double its capacity (or to 2 if it had none).
    ///
    /// # Panics
    ///
    /// Panics if the grown capacity does not fit in the address space or cannot be allocated.
    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity {
            self.grow_for_push();
        }

        // SAFETY: After growth, `len < capacity`, so the slot is in the block and not live.
        unsafe {
            uninit::emplace_one(self.slot(self.len), value);
        }

        self.len = self
            .len
            .checked_add(1)
            .expect("guarded by len < capacity above");
    }

    /// Appends a clone of `value` to the end of the array.
    ///
    /// Grows the same way as [`push_back()`][Self::push_back].
    ///
    /// # Panics
    ///
    /// Panics if the grown capacity does not fit in the address space or cannot be allocated.
    pub fn push_back_cloned(&mut self, value: &T)
    where
        T: Clone,
    {
        if self.len == self.capacity {
            self.grow_for_push();
        }

        // SAFETY: After growth, `len < capacity`, so the slot is in the block and not live.
        // `value` cannot point into the block because we hold an exclusive borrow of the array.
        unsafe {
            uninit::construct_one(self.slot(self.len), value);
        }

        self.len = self
            .len
            .checked_add(1)
            .expect("guarded by len < capacity above");
    }

    /// Removes the last element and hands it to the caller, or returns `None` if the array is
    /// empty. Discarding the returned value drops it.
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.len.checked_sub(1)?;

        self.len = last;

        // SAFETY: The slot was live and is now past the end of the live prefix, so reading it
        // transfers ownership of the element to the caller and nobody else will drop it.
        Some(unsafe { self.slot(last).read() })
    }

    /// Drops all elements. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops the elements at and after index `len`, keeping the first `len`. Does nothing if the
    /// array is not longer than `len`. The capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        let Some(removed) = self.len.checked_sub(len) else {
            return;
        };

        if removed == 0 {
            return;
        }

        // Shorten first, so that a panicking drop cannot cause the same element to be
        // dropped again later.
        self.len = len;

        // SAFETY: The slots from `len` to the old length were live and are no longer reachable
        // through the array.
        unsafe {
            uninit::destroy_range(self.slot(len), removed);
        }
    }

    /// Ensures the array can hold at least `capacity` elements without reallocating.
    ///
    /// If the current capacity is smaller, the array reallocates to exactly `capacity` slots,
    /// preserving all elements in order. Otherwise, this does nothing.
    ///
    /// # Panics
    ///
    /// Panics if the capacity does not fit in the address space or cannot be allocated.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity > self.capacity {
            self.reallocate(capacity);
        }
    }

    /// Resizes the array to `len` elements.
    ///
    /// Reallocates to exactly `len` slots if the capacity is too small. Drops trailing elements
    /// when shrinking and appends default values when growing.
    ///
    /// # Panics
    ///
    /// Panics if the capacity does not fit in the address space or cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bare_std::DynamicArray;
    ///
    /// let mut array = DynamicArray::from([1, 2, 3]);
    ///
    /// array.resize(5);
    /// assert_eq!(array.as_slice(), &[1, 2, 3, 0, 0]);
    ///
    /// array.resize(2);
    /// assert_eq!(array.as_slice(), &[1, 2]);
    /// ```
    pub fn resize(&mut self, len: usize)
    where
        T: Default + TypeTraits,
    {
        if len > self.capacity {
            self.reallocate(len);
        }

        let Some(added) = len.checked_sub(self.len) else {
            self.truncate(len);
            return;
        };

        if added == 0 {
            return;
        }

        // SAFETY: The capacity is at least `len`, so the `added` slots after the live prefix are
        // in the block and not live.
        unsafe {
            uninit::fill_default_range(self.slot(self.len), added);
        }

        self.len = len;
    }

    /// Inserts `value` before the element at `index`, shifting all later elements back by one.
    /// An `index` equal to the length appends. Returns the index of the inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the length, or if the grown capacity does not fit in
    /// the address space or cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bare_std::DynamicArray;
    ///
    /// let mut array = DynamicArray::from(['a', 'c']);
    ///
    /// assert_eq!(array.insert(1, 'b'), 1);
    /// assert_eq!(array.as_slice(), &['a', 'b', 'c']);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.assert_insert_index(index);
        self.reserve_for_insert(1);

        // SAFETY: After growth, there is at least one slot past the live prefix.
        unsafe {
            uninit::emplace_one(self.slot(self.len), value);
        }

        self.rotate_into_place(index, 1);

        index
    }

    /// Inserts `count` clones of `value` before the element at `index`, shifting all later
    /// elements back by `count`. An `index` equal to the length appends. Returns the index of the
    /// first inserted element, which is `index` even when `count` is zero.
    ///
    /// If a clone panics, the clones made so far are dropped and the array is left unchanged
    /// (apart from possibly having grown its capacity).
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the length, or if the grown capacity does not fit in
    /// the address space or cannot be allocated.
    pub fn insert_copies(&mut self, index: usize, count: usize, value: &T) -> usize
    where
        T: Clone + TypeTraits,
    {
        self.assert_insert_index(index);

        if count == 0 {
            return index;
        }

        self.reserve_for_insert(count);

        // SAFETY: After growth, there are at least `count` slots past the live prefix. `value`
        // cannot point into the block because we hold an exclusive borrow of the array.
        unsafe {
            uninit::fill_range(self.slot(self.len), count, value);
        }

        self.rotate_into_place(index, count);

        index
    }

    /// Removes and drops the element at `index`, shifting all later elements forward by one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than the length.
    pub fn erase(&mut self, index: usize) {
        self.erase_range(index..index.saturating_add(1));
    }

    /// Removes and drops the elements in `range`, shifting all later elements forward to close
    /// the gap. The order of the remaining elements is preserved.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or extends past the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use bare_std::DynamicArray;
    ///
    /// let mut array = DynamicArray::from([1, 2, 3, 4, 5]);
    /// array.erase_range(1..3);
    ///
    /// assert_eq!(array.as_slice(), &[1, 4, 5]);
    /// ```
    pub fn erase_range(&mut self, range: Range<usize>) {
        let Range { start, end } = range;

        assert!(
            start <= end && end <= self.len,
            "erase range {start}..{end} is out of bounds for a dynamic array of {} with length {}",
            type_name::<T>(),
            self.len
        );

        let count = end.checked_sub(start).expect("guarded by assertion above");

        if count == 0 {
            return;
        }

        let tail_len = self
            .len
            .checked_sub(start)
            .expect("guarded by assertion above");

        // Shorten first; `shift_erase()` closes the gap even if a drop panics, so the shortened
        // length is correct either way.
        self.len = self
            .len
            .checked_sub(count)
            .expect("guarded by assertion above");

        // SAFETY: The `tail_len` slots from `start` were live and `count <= tail_len`.
        unsafe {
            uninit::shift_erase(self.slot(start), tail_len, count);
        }
    }

    /// Exchanges the contents of two arrays in constant time, without touching any element.
    pub fn swap(&mut self, other: &mut Self) {
        utility::exchange(&mut self.data, &mut other.data);
        utility::exchange(&mut self.len, &mut other.len);
        utility::exchange(&mut self.capacity, &mut other.capacity);
    }

    /// Takes the storage block and all elements out of the array, leaving it empty with no
    /// block.
    ///
    /// This transfers ownership without touching any element: the returned array uses the very
    /// same storage block.
    ///
    /// # Examples
    ///
    /// ```
    /// use bare_std::DynamicArray;
    ///
    /// let mut source = DynamicArray::from([1, 2, 3]);
    /// let address = source.as_ptr();
    ///
    /// let taken = source.take();
    ///
    /// assert_eq!(taken.as_ptr(), address);
    /// assert_eq!(taken.len(), 3);
    /// assert!(source.as_ptr().is_null());
    /// assert_eq!(source.capacity(), 0);
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        let mut taken = Self::new();
        self.swap(&mut taken);
        taken
    }

    /// Drops all elements and frees the block, leaving the array empty with no block.
    fn release(&mut self) {
        let Some(block) = self.data.take() else {
            return;
        };

        let len = self.len;
        let capacity = self.capacity;

        // Forget the block before running any destructors, so a panicking drop cannot lead to a
        // second release.
        self.len = 0;
        self.capacity = 0;

        // SAFETY: The block came from `storage::allocate()` with this capacity and its first
        // `len` slots are live. The array no longer refers to it.
        unsafe {
            uninit::release_storage(block, len, capacity);
        }
    }

    fn grow_for_push(&mut self) {
        let new_capacity = self.capacity.saturating_mul(2).max(MIN_GROWN_CAPACITY);
        self.reallocate(new_capacity);
    }

    fn reserve_for_insert(&mut self, count: usize) {
        let required = self.len.checked_add(count).unwrap_or_else(|| {
            panic!(
                "capacity overflow: cannot insert {count} more elements into a dynamic array of {}",
                type_name::<T>()
            )
        });

        if required > self.capacity {
            self.reallocate(self.capacity.saturating_mul(2).max(required));
        }
    }

    /// Moves all elements into a new block of `new_capacity` slots and frees the old block.
    fn reallocate(&mut self, new_capacity: usize) {
        assert!(
            new_capacity >= self.len,
            "reallocating to {new_capacity} slots would lose elements of a dynamic array of {} with length {}",
            type_name::<T>(),
            self.len
        );

        let new_block = storage::allocate::<T>(new_capacity);

        if let Some(old_block) = self.data {
            if let Some(new_block) = new_block {
                // SAFETY: The first `len` slots of the old block are live, the new block has
                // room for at least `len` elements and is freshly allocated, so they cannot
                // overlap.
                unsafe {
                    uninit::relocate_range(new_block, old_block, self.len);
                }
            }

            // SAFETY: Every element was moved out above, so no slot of the old block is live.
            // The old block came from `storage::allocate()` with the current capacity.
            unsafe {
                uninit::release_storage(old_block, 0, self.capacity);
            }
        }

        trace!(
            old_capacity = self.capacity,
            new_capacity,
            len = self.len,
            item_type = type_name::<T>(),
            "reallocated dynamic array"
        );

        self.data = new_block;
        self.capacity = new_capacity;
    }

    fn assert_insert_index(&self, index: usize) {
        assert!(
            index <= self.len,
            "insertion index {index} is out of bounds for a dynamic array of {} with length {}",
            type_name::<T>(),
            self.len
        );
    }

    /// Adopts the `count` elements just constructed past the live prefix and rotates them into
    /// position so they start at `index`.
    fn rotate_into_place(&mut self, index: usize, count: usize) {
        self.len = self
            .len
            .checked_add(count)
            .expect("guarded by capacity check in reserve_for_insert()");

        // Rotation moves elements bitwise and cannot panic.
        self.as_mut_slice()
            .get_mut(index..)
            .expect("guarded by assert_insert_index()")
            .rotate_right(count);
    }

    /// A pointer to the slot at `index`, which may be one past the end of the block.
    ///
    /// # Panics
    ///
    /// Panics if the array has no block or `index` exceeds the capacity.
    fn slot(&self, index: usize) -> NonNull<T> {
        assert!(
            index <= self.capacity,
            "slot {index} is outside a dynamic array of {} with capacity {}",
            type_name::<T>(),
            self.capacity
        );

        let data = self
            .data
            .expect("guarded by callers - a slot is only requested when there is a block");

        // SAFETY: `index` is within the block or one past its end (asserted above).
        unsafe { data.add(index) }
    }

    /// Hands the block and elements to an owning iterator, without running the array's `Drop`.
    pub(crate) fn into_raw_parts(self) -> (Option<NonNull<T>>, usize, usize) {
        let array = ManuallyDrop::new(self);
        (array.data, array.len, array.capacity)
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + TypeTraits> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }

    /// Releases the current storage and becomes a deep copy of `source`.
    fn clone_from(&mut self, source: &Self) {
        self.release();

        let mut copy = Self::from_slice(source.as_slice());
        self.swap(&mut copy);
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        let mut array = Self::with_capacity(N);
        let items = ManuallyDrop::new(items);

        if let Some(data) = array.data {
            // SAFETY: The block was just allocated with room for `N` elements. The source array
            // is wrapped in `ManuallyDrop`, so moving its elements out cannot cause a double drop.
            unsafe {
                uninit::relocate_range(data, NonNull::from(&*items).cast(), N);
            }

            array.len = N;
        }

        array
    }
}

impl<T: Clone + TypeTraits> From<&[T]> for DynamicArray<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

// SAFETY: The array owns its elements like a `Vec<T>` does, so it can move between threads
// whenever the elements can.
unsafe impl<T: Send> Send for DynamicArray<T> {}

// SAFETY: Shared access to the array only hands out shared access to the elements.
unsafe impl<T: Sync> Sync for DynamicArray<T> {}
