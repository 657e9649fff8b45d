use std::mem;
use std::rc::Rc;
use std::sync::Arc;

use crate::DynamicArray;

/// Declares which lifecycle operations of a type may be replaced by raw byte operations.
///
/// The uninitialized-memory algorithms in [`uninit`][crate::uninit] consult this trait to pick
/// between a fast path (bulk byte copies, zeroing) and a correctness path (calling `Clone` or
/// `Default` once per slot). The constants are resolved at compile time, so the path not taken
/// does not exist in the generated code.
///
/// Whether a type is trivially destructible is not declared here - the compiler already knows.
/// See [`is_trivially_destructible()`].
///
/// The defaults (both `false`) are correct for every type. Primitive types come with fully
/// trivial implementations; for your own `Copy` types, use [`trivial_type_traits!`][1].
///
/// # Safety
///
/// * `TRIVIALLY_COPYABLE` may only be `true` if cloning a value is observably identical to
///   copying its bytes. Any `Copy` type qualifies.
/// * `TRIVIALLY_CONSTRUCTIBLE` may only be `true` if `Default::default()` produces a value whose
///   bytes are all zero.
///
/// # Examples
///
/// ```
/// use bare_std::{TypeTraits, is_trivially_copyable};
///
/// #[derive(Clone)]
/// struct Name(String);
///
/// // SAFETY: The defaults make no promises.
/// unsafe impl TypeTraits for Name {}
///
/// assert!(!is_trivially_copyable::<Name>());
/// assert!(is_trivially_copyable::<u64>());
/// ```
///
/// [1]: crate::trivial_type_traits
pub unsafe trait TypeTraits {
    /// Whether cloning a value may be replaced by copying its bytes.
    const TRIVIALLY_COPYABLE: bool = false;

    /// Whether the default value may be produced by zeroing its bytes.
    const TRIVIALLY_CONSTRUCTIBLE: bool = false;
}

/// Whether cloning a `T` may be replaced by copying its bytes.
#[must_use]
pub const fn is_trivially_copyable<T: TypeTraits>() -> bool {
    T::TRIVIALLY_COPYABLE
}

/// Whether a default `T` may be produced by zeroing its bytes.
#[must_use]
pub const fn is_trivially_constructible<T: TypeTraits>() -> bool {
    T::TRIVIALLY_CONSTRUCTIBLE
}

/// Whether dropping a `T` may be skipped because its drop glue does nothing.
///
/// Unlike the other two queries, this one is answered by the compiler for every type.
#[must_use]
pub const fn is_trivially_destructible<T>() -> bool {
    !mem::needs_drop::<T>()
}

macro_rules! primitive_type_traits {
    ($($ty:ty),+ $(,)?) => {
        $(
            // SAFETY: Primitives are `Copy` and their default value is all-zero bytes.
            unsafe impl TypeTraits for $ty {
                const TRIVIALLY_COPYABLE: bool = true;
                const TRIVIALLY_CONSTRUCTIBLE: bool = true;
            }
        )+
    };
}

primitive_type_traits!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, ()
);

// SAFETY: Shared references are `Copy`. They have no default.
unsafe impl<T: ?Sized> TypeTraits for &T {
    const TRIVIALLY_COPYABLE: bool = true;
}

// SAFETY: Raw pointers are `Copy`. They have no default.
unsafe impl<T: ?Sized> TypeTraits for *const T {
    const TRIVIALLY_COPYABLE: bool = true;
}

// SAFETY: Raw pointers are `Copy`. They have no default.
unsafe impl<T: ?Sized> TypeTraits for *mut T {
    const TRIVIALLY_COPYABLE: bool = true;
}

// SAFETY: An array clones and defaults element by element, so it is exactly as trivial
// as its element type.
unsafe impl<T: TypeTraits, const N: usize> TypeTraits for [T; N] {
    const TRIVIALLY_COPYABLE: bool = T::TRIVIALLY_COPYABLE;
    const TRIVIALLY_CONSTRUCTIBLE: bool = T::TRIVIALLY_CONSTRUCTIBLE;
}

// SAFETY: The defaults make no promises.
unsafe impl TypeTraits for String {}

// SAFETY: The defaults make no promises.
unsafe impl<T> TypeTraits for Vec<T> {}

// SAFETY: The defaults make no promises.
unsafe impl<T: ?Sized> TypeTraits for Box<T> {}

// SAFETY: The defaults make no promises.
unsafe impl<T: ?Sized> TypeTraits for Rc<T> {}

// SAFETY: The defaults make no promises.
unsafe impl<T: ?Sized> TypeTraits for Arc<T> {}

// SAFETY: The defaults make no promises.
unsafe impl<T> TypeTraits for Option<T> {}

// SAFETY: The defaults make no promises.
unsafe impl<T> TypeTraits for DynamicArray<T> {}
