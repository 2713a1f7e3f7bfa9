//! Remote API variant and variant selection for the ctb-web frontend.

pub mod client;
mod select;

pub use client::{CtbClient, CtbClientBuilder};
pub use select::select_api;
