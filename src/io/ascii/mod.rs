//! Transfer data from delimited ASCII text (CSV-like formats) into typed columns.

pub mod read;
