//! Shared plumbing for the `hx711-discover` and `hx711-watch` binaries.

pub mod backend;
pub mod error_fmt;
pub mod logging;
pub mod opts;
pub mod report;
pub mod rt;
