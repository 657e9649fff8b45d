//! Basic usage of `DynamicArray`, with storage events logged to stderr.
//!
//! Logging runs at TRACE level, so every allocation, reallocation and release of a storage
//! block shows up in the output.

use bare_std::{DynamicArray, dynamic_array};
use tracing::Level;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();

    let mut words = DynamicArray::new();

    for word in ["storage", "is", "raw", "until", "constructed"] {
        words.push_back(word.to_string());
        println!("len = {}, capacity = {}", words.len(), words.capacity());
    }

    let position = words.insert(3, "memory".to_string());
    println!("inserted {:?} at {position}", words[position]);
    words.erase(2);

    println!("{words:?}");

    let copy = words.clone();
    words.clear();

    println!("after clear: {} words, copy still has {}", words.len(), copy.len());

    let mut checked = DynamicArray::<u32>::with_capacity(8);

    checked.extend(dynamic_array![1, 2, 3]);
    let sum: u32 = checked.iter().sum();
    println!("sum = {sum}");

    match checked.at(10) {
        Ok(value) => println!("unexpected value {value}"),
        Err(error) => println!("{error}"),
    }

    checked.clear();
}
