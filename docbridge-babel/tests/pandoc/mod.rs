//! Pandoc JSON bridge tests

mod bridge;
mod properties;
