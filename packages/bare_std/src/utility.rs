//! Ownership transfer and pass-through helpers shared by the rest of the crate.
//!
//! Rust moves values by default, so these functions are thin. [`exchange()`] is what
//! [`DynamicArray::swap()`][1] is built on.
//!
//! [1]: crate::DynamicArray::swap

use std::mem;

/// Hands back ownership of `value` without copying it.
///
/// The caller gives up `value` by passing it in; the compiler rejects any later use of the
/// original binding except overwriting it. Never panics and has no side effects.
///
/// # Examples
///
/// ```
/// use bare_std::utility::to_rvalue;
///
/// let greeting = String::from("hello");
/// let moved = to_rvalue(greeting);
///
/// assert_eq!(moved, "hello");
/// ```
#[inline]
#[must_use]
pub const fn to_rvalue<T>(value: T) -> T {
    value
}

/// Passes a value through a generic wrapper without changing how it is held.
///
/// The type parameter carries the value category: an owned `T` comes out owned, a `&U` comes
/// out as the same shared reference and a `&mut U` as the same exclusive reference. Generic
/// code that relays its arguments to an inner operation can route them through this function
/// and the inner operation sees exactly what the outer caller passed.
///
/// # Examples
///
/// ```
/// use bare_std::utility::forward_value;
///
/// fn relay<T>(value: T) -> T {
///     forward_value(value)
/// }
///
/// let mut counter = 1;
/// *relay(&mut counter) += 1;
/// assert_eq!(counter, 2);
///
/// let owned = relay(String::from("owned"));
/// assert_eq!(owned, "owned");
/// ```
#[inline]
#[must_use]
pub const fn forward_value<T>(value: T) -> T {
    value
}

/// Exchanges the values in two places.
///
/// This is a three-move swap: `a` moves into a temporary, `b` moves into `a` and the temporary
/// moves into `b`. Moves are bitwise, so this never panics.
///
/// # Examples
///
/// ```
/// use bare_std::utility::exchange;
///
/// let mut left = vec![1, 2];
/// let mut right = vec![3];
///
/// exchange(&mut left, &mut right);
///
/// assert_eq!(left, [3]);
/// assert_eq!(right, [1, 2]);
/// ```
#[inline]
pub fn exchange<T>(a: &mut T, b: &mut T) {
    mem::swap(a, b);
}

/// Two values of possibly different types, carried together.
///
/// # Examples
///
/// ```
/// use bare_std::utility::Pair;
///
/// let pair = Pair::new("answer", 42);
///
/// assert_eq!(pair.first, "answer");
/// assert_eq!(pair.second, 42);
///
/// let (name, value) = pair.into_tuple();
/// assert_eq!((name, value), ("answer", 42));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[expect(
    clippy::exhaustive_structs,
    reason = "a pair is exactly its two fields and will never grow more"
)]
pub struct Pair<T, U> {
    /// The first value.
    pub first: T,

    /// The second value.
    pub second: U,
}

impl<T, U> Pair<T, U> {
    /// Creates a pair, taking each argument exactly as the caller passed it.
    #[must_use]
    pub const fn new(first: T, second: U) -> Self {
        Self {
            first: forward_value(first),
            second: forward_value(second),
        }
    }

    /// Splits the pair into a tuple of its two values.
    #[must_use]
    pub fn into_tuple(self) -> (T, U) {
        (self.first, self.second)
    }
}

impl<T, U> From<(T, U)> for Pair<T, U> {
    fn from((first, second): (T, U)) -> Self {
        Self::new(first, second)
    }
}

impl<T, U> From<Pair<T, U>> for (T, U) {
    fn from(pair: Pair<T, U>) -> Self {
        pair.into_tuple()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn to_rvalue_keeps_heap_allocation() {
        let original = String::from("payload");
        let address = original.as_ptr();

        let moved = to_rvalue(original);

        assert_eq!(moved.as_ptr(), address);
    }

    #[test]
    fn forward_value_preserves_reference_identity() {
        let value = 5_u32;
        let forwarded: &u32 = forward_value(&value);

        assert!(std::ptr::eq(forwarded, &value));
    }

    #[test]
    fn forward_value_does_not_clone() {
        let shared = Rc::new(());
        let forwarded = forward_value(Rc::clone(&shared));

        assert_eq!(Rc::strong_count(&shared), 2);
        drop(forwarded);
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn exchange_swaps_owned_resources() {
        let mut a = String::from("a");
        let mut b = String::from("bb");
        let a_address = a.as_ptr();
        let b_address = b.as_ptr();

        exchange(&mut a, &mut b);

        assert_eq!(a, "bb");
        assert_eq!(b, "a");
        assert_eq!(a.as_ptr(), b_address);
        assert_eq!(b.as_ptr(), a_address);
    }

    #[test]
    fn pair_round_trips_through_tuple() {
        let pair = Pair::from((1_u8, "one"));
        let tuple: (u8, &str) = pair.into();

        assert_eq!(tuple, (1, "one"));
    }

    #[test]
    fn pair_orders_by_first_then_second() {
        assert!(Pair::new(1, 9) < Pair::new(2, 0));
        assert!(Pair::new(1, 1) < Pair::new(1, 2));
        assert_eq!(Pair::<u8, u8>::default(), Pair::new(0, 0));
    }
}
