//! Pipeline state: owned source, cursor, and pending operations.
//!
//! Appending an operation consumes the queryable and hands back the derived
//! one, so collaborators cannot keep pulling from a stale view.

use std::borrow::Cow;

use ginq_core::config::EngineConfig;
use ginq_core::error::{Result, StepError};
use ginq_core::id::QueryId;
use ginq_core::step::{BulkFn, ElementFn, Operation, StepOutput};
use ginq_core::tag::ElementTag;

use crate::metrics::PullStats;

pub struct Queryable<T> {
    pub(crate) id: QueryId,
    pub(crate) element_tag: ElementTag,
    pub(crate) source: Vec<T>,
    /// Next unconsumed index into `source`; never exceeds `source.len()`.
    pub(crate) cursor: usize,
    pub(crate) pending: Vec<Operation<T>>,
    pub(crate) exhausted: bool,
    pub(crate) config: EngineConfig,
    pub(crate) stats: PullStats,
}

impl<T> Queryable<T> {
    pub fn new(source: Vec<T>, element_tag: impl Into<ElementTag>) -> Self {
        Self::with_config(source, element_tag, EngineConfig::default())
    }

    pub fn with_config(
        source: Vec<T>,
        element_tag: impl Into<ElementTag>,
        config: EngineConfig,
    ) -> Self {
        Self {
            id: QueryId::next(),
            element_tag: element_tag.into(),
            source,
            cursor: 0,
            pending: Vec::new(),
            exhausted: false,
            config,
            stats: PullStats::default(),
        }
    }

    /// Append one operation. Elements already pulled stay consumed; a bulk
    /// stage appended now only ever sees the unconsumed remainder.
    pub fn then(mut self, mut op: Operation<T>) -> Self {
        op.set_owner(self.id);
        self.pending.push(op);
        self
    }

    pub fn then_streaming<F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: FnMut(T) -> std::result::Result<StepOutput<T>, StepError> + 'static,
    {
        self.then(Operation::streaming(name, f))
    }

    pub fn then_bulk<F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: FnMut(Vec<T>) -> std::result::Result<Vec<T>, StepError> + 'static,
    {
        self.then(Operation::bulk(name, f))
    }

    /// Append from the flag-plus-function form. Fails with
    /// `Error::ShapeMismatch` if the function does not fit the flag.
    pub fn append(
        self,
        name: impl Into<Cow<'static, str>>,
        result_tag: Option<ElementTag>,
        needs_full_enumerate: bool,
        element: Option<ElementFn<T>>,
        bulk: Option<BulkFn<T>>,
    ) -> Result<Self> {
        let op = Operation::from_parts(name, result_tag, needs_full_enumerate, element, bulk)?;
        Ok(self.then(op))
    }

    pub fn id(&self) -> QueryId {
        self.id
    }

    /// Tag of the elements currently sitting in the source.
    pub fn element_tag(&self) -> &ElementTag {
        &self.element_tag
    }

    /// Tag of the elements the pipeline will produce once every pending
    /// operation has been applied.
    pub fn result_tag(&self) -> ElementTag {
        self.pending
            .iter()
            .fold(self.element_tag.clone(), |tag, op| op.output_tag(&tag))
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Unconsumed source elements.
    pub fn remaining(&self) -> &[T] {
        &self.source[self.cursor..]
    }

    pub fn pending(&self) -> &[Operation<T>] {
        &self.pending
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> PullStats {
        self.stats
    }
}

impl<T> std::fmt::Debug for Queryable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queryable")
            .field("id", &self.id)
            .field("element_tag", &self.element_tag)
            .field("len", &self.source.len())
            .field("cursor", &self.cursor)
            .field("pending", &self.pending)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ginq_core::error::Error;

    #[test]
    fn test_new_has_no_pending() {
        let q = Queryable::new(vec![1, 2, 3], "i64");
        assert!(q.pending().is_empty());
        assert_eq!(q.cursor(), 0);
        assert_eq!(q.remaining(), &[1, 2, 3]);
        assert!(!q.is_exhausted());
    }

    #[test]
    fn test_then_records_owner() {
        let q = Queryable::new(vec![1], "i64").then_streaming("id", |x| Ok(StepOutput::Yield(x)));
        assert_eq!(q.pending()[0].owner(), Some(q.id()));
    }

    #[test]
    fn test_result_tag_folds_pending() {
        let q = Queryable::new(vec![1], "i64")
            .then(Operation::streaming("keep", |x| Ok(StepOutput::Yield(x))))
            .then(
                Operation::streaming("label", |x| Ok(StepOutput::Yield(x)))
                    .with_result_tag("label"),
            )
            .then(Operation::bulk("sort", Ok));
        assert_eq!(q.element_tag().as_str(), "i64");
        assert_eq!(q.result_tag().as_str(), "label");
    }

    #[test]
    fn test_append_checks_shape() {
        let identity: ElementFn<i64> = Box::new(|x: i64| Ok(StepOutput::Yield(x)));
        let err = Queryable::new(vec![1], "i64")
            .append("bad", None, true, Some(identity), None)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }
}
