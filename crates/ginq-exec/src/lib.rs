#![forbid(unsafe_code)]
//! ginq-exec: the `Queryable` pipeline and its enumeration driver.
//!
//! A queryable holds an owned source plus the operations still waiting to be
//! applied. Pulling drives those operations lazily: streaming stages run one
//! element at a time, bulk stages materialize the unconsumed remainder when a
//! pull first needs them.

pub mod driver;
pub mod enumerate;
pub mod metrics;
pub mod queryable;

pub use enumerate::Pulls;
pub use metrics::PullStats;
pub use queryable::Queryable;

pub use ginq_core::error::{Error, Result};
