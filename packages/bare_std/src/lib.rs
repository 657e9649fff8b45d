#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A growable array over manually managed raw storage, built from explicit object lifecycle
//! primitives.
//!
//! The centerpiece is [`DynamicArray`], a contiguous sequence container in the spirit of
//! [`Vec`]. What sets it apart is that every element lifecycle transition it performs (clone into
//! raw storage, move between blocks, default-construct, drop) goes through the public
//! algorithms in [`uninit`], which are also usable on their own with any raw storage block.
//!
//! # Key Features
//!
//! - **Explicit storage states**: a block of `capacity` slots whose first `len` hold live objects,
//!   with the rest raw storage that is never read or dropped
//! - **Type trait fast paths**: types declare through [`TypeTraits`] whether cloning or default
//!   construction is a plain byte operation, and the algorithms skip per-object calls for them
//! - **Panic-safe construction**: if a `Clone` panics partway through a bulk operation, the
//!   objects already built are dropped and the container is left as it was
//! - **Predictable growth**: appending doubles the capacity, explicit reservation is exact
//!
//! # Examples
//!
//! ```
//! use bare_std::{DynamicArray, dynamic_array};
//!
//! let mut names: DynamicArray<String> = DynamicArray::with_capacity(4);
//!
//! names.push_back("Ada".to_string());
//! names.push_back("Grace".to_string());
//! names.insert(1, "Barbara".to_string());
//!
//! assert_eq!(names.len(), 3);
//! assert_eq!(names[1], "Barbara");
//!
//! let copy = names.clone();
//! names.erase(0);
//!
//! assert_eq!(copy.len(), 3);
//! assert_eq!(names.as_slice(), &["Barbara", "Grace"]);
//!
//! let numbers = dynamic_array![1, 2, 3];
//! assert_eq!(numbers.iter().sum::<i32>(), 6);
//! ```
//!
//! Declaring a custom type as trivially copyable lets bulk copies of it use a single byte copy:
//!
//! ```
//! use bare_std::{DynamicArray, trivial_type_traits};
//!
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! struct Point {
//!     x: f32,
//!     y: f32,
//! }
//!
//! trivial_type_traits!(Point);
//!
//! let points = DynamicArray::filled(1000, &Point { x: 1.0, y: 2.0 });
//! let copy = points.clone();
//!
//! assert_eq!(copy[999], Point { x: 1.0, y: 2.0 });
//! ```

mod dynamic_array;
mod error;
mod into_iter;
mod macros;
mod storage;
mod type_traits;

#[cfg(test)]
mod tracked;

pub mod uninit;
pub mod utility;

pub use dynamic_array::*;
pub use error::Error;
pub(crate) use error::Result;
pub use into_iter::*;
pub use type_traits::*;
