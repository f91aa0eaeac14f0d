//! Checkout maintenance crawler library.
//!
//! This crate keeps a fixed set of sibling checkouts fresh by:
//! - Discovering allow-listed checkout directories under a base path
//! - Pulling each up to date from upstream via a helper script
//! - Finding bundle build scripts nested anywhere inside each checkout
//! - Running each bundle and classifying success from the script's output

pub mod config;
pub mod constants;
pub mod crawl;
pub mod output;
pub mod runner;
pub mod scan;
