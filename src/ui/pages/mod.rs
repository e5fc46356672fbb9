//! Page renderers for the two dashboards.
//!
//! Each renderer is a pure function of its inputs, so the same config, logo
//! state and data always produce the same document.

pub mod admin;
pub mod user;
