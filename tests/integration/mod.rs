//! Integration tests for coachdesk-rs
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior without mocking the HTTP layer.

pub mod config_tests;
pub mod resolver_tests;
pub mod session_route_tests;
