//! Plugin registry and discovery tests

mod discovery;
