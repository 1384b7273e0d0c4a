#![doc = include_str!("doc/lib.md")]
#![allow(clippy::len_without_is_empty)]

pub mod column;
pub mod datatypes;
pub mod error;
pub mod io;
pub mod table;

pub use io::ascii::read::{read, ReadOptions, Reader};
