//! Conversion graph tests

mod convert;
mod lookups;
