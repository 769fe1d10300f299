//! Unit tests for the location module.
//!
//! Tests are organised by service, covering happy paths, failure
//! classification, and the ordering rules of debounced search.

mod fixtures;
