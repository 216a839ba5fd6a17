//! Individual manifest checks. The engine calls them in report order.

pub mod activity;
pub mod application;
pub mod exposure;
pub mod manifest_wide;
pub mod platform;
