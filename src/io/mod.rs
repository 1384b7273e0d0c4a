//! Contains modules to interface with text formats such as [`ascii`].
pub mod ascii;
