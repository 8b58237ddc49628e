#![forbid(unsafe_code)]
//! ginq-core: element tags, ids, dynamic values, error taxonomy, engine
//! config, and the step/operation contract shared by the driver and the
//! operator library.
//!
//! Nothing in here evaluates a pipeline; see `ginq-exec` for the driver.

pub mod config;
pub mod error;
pub mod id;
pub mod prelude;
pub mod step;
pub mod tag;
pub mod value;
