//! End-to-end tests at the HTTP level.
//!
//! Each test file covers one flow, run against a real portal listener and
//! a fake authentication API with the portal's clock pinned.

#![cfg(test)]

mod helpers;

mod test_login_flow;
mod test_register_flow;
