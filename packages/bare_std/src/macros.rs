/// Creates a [`DynamicArray`][crate::DynamicArray] from a literal sequence of elements.
///
/// * `dynamic_array![]` creates an empty array without allocating.
/// * `dynamic_array![a, b, c]` moves the listed elements into a new array, in order.
/// * `dynamic_array![value; count]` creates an array of `count` clones of `value`.
///
/// The capacity of the created array equals its length.
///
/// # Examples
///
/// ```
/// use bare_std::dynamic_array;
///
/// let listed = dynamic_array![1, 2, 3];
/// assert_eq!(listed.as_slice(), &[1, 2, 3]);
///
/// let repeated = dynamic_array![String::from("x"); 2];
/// assert_eq!(repeated.as_slice(), &["x", "x"]);
/// ```
#[macro_export]
macro_rules! dynamic_array {
    () => {
        $crate::DynamicArray::new()
    };
    ($value:expr; $count:expr) => {
        $crate::DynamicArray::filled($count, &$value)
    };
    ($($item:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($item),+])
    };
}

/// Declares one or more `Copy` types as trivially copyable for the purposes of
/// [`TypeTraits`][crate::TypeTraits].
///
/// The macro verifies at compile time that each listed type is `Copy`. It does not declare the
/// types trivially constructible, as that depends on what their `Default` produces; implement
/// [`TypeTraits`][crate::TypeTraits] by hand if the default value is all-zero bytes.
///
/// # Examples
///
/// ```
/// use bare_std::{is_trivially_copyable, trivial_type_traits};
///
/// #[derive(Clone, Copy)]
/// struct Rgb(u8, u8, u8);
///
/// trivial_type_traits!(Rgb);
///
/// assert!(is_trivially_copyable::<Rgb>());
/// ```
#[macro_export]
macro_rules! trivial_type_traits {
    ($($ty:ty),+ $(,)?) => {
        $(
            const _: () = {
                const fn require_copy<T: ::core::marker::Copy>() {}
                require_copy::<$ty>();
            };

            // SAFETY: The type is `Copy` (verified above), so a byte copy is a valid clone.
            unsafe impl $crate::TypeTraits for $ty {
                const TRIVIALLY_COPYABLE: bool = true;
            }
        )+
    };
}
