//! End-to-end tests for coachdesk-rs
//!
//! These tests verify a running gateway over real HTTP and require one.
//! Run with: cargo test -- --ignored
//!
//! Required environment variables:
//! - GATEWAY_E2E_URL: Base URL of a running gateway (e.g. http://localhost:8080)
//! - GATEWAY_E2E_TOKEN: Session token for authenticated flows (optional)
