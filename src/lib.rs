//! Branded user and admin dashboards for the LinkedIn post generator.
//!
//! Each view loads the [`customer_config::CustomerConfig`], checks the
//! optional [`asset::LogoAsset`] and renders HTML with the customer colors,
//! falling back to an emoji heading when no logo is present.

pub mod api;
pub mod asset;
pub mod config;
pub mod customer_config;
pub mod error;
pub mod store;
pub mod ui;

pub use config::AppConfig;
pub use error::{Error, Result};
