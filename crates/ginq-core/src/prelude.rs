//! Convenient re-exports for downstream crates.

pub use crate::config::EngineConfig;
pub use crate::error::{Error, Result, StepError};
pub use crate::id::QueryId;
pub use crate::step::{BulkFn, ElementFn, Operation, Step, StepOutput};
pub use crate::tag::ElementTag;
pub use crate::value::Value;
