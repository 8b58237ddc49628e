#![forbid(unsafe_code)]
//! ginq-operators: ready-made step functions.
//!
//! Every constructor returns a plain `Operation<T>`; append it with
//! `Queryable::then`. The engine treats these exactly like hand-written
//! steps.
//!
//! - `streaming`: map/filter/take/skip and friends, one element at a time.
//! - `bulk`: sort/distinct/reverse/group-by, which need the whole remainder.

pub mod bulk;
pub mod streaming;

pub use bulk::{distinct, group_by, group_values, reverse, sort, sort_by, sort_by_key, try_bulk};
pub use streaming::{filter, filter_map, inspect, map, map_to, skip, take, take_while, try_map};
