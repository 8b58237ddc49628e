#![forbid(unsafe_code)]
//! ginq: lazy query pipelines over in-memory ordered collections.
//!
//! Facade over the workspace crates:
//! - `ginq-core`: tags, values, errors, config, the step/operation contract
//! - `ginq-exec`: `Queryable` and the enumeration driver
//! - `ginq-operators`: stock streaming and bulk steps

pub use ginq_operators as ops;

pub use ginq_core::config::EngineConfig;
pub use ginq_core::error::{Error, Result, StepError};
pub use ginq_core::step::{BulkFn, ElementFn, Operation, Step, StepOutput};
pub use ginq_core::tag::ElementTag;
pub use ginq_core::value::Value;
pub use ginq_exec::{PullStats, Pulls, Queryable};

pub mod prelude {
    pub use crate::ops;
    pub use ginq_core::prelude::*;
    pub use ginq_exec::{PullStats, Queryable};
}
