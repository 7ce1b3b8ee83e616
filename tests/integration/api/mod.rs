//! API integration tests
//!
//! Integration tests for all API endpoints

mod logging_test;
mod register_test;
