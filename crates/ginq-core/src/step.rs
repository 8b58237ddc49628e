//! Step functions and the `Operation` that wraps one pipeline stage.
//!
//! A stage is either *streaming* (one element in, at most one element out)
//! or *bulk* (the whole remaining upstream in, a whole new sequence out).
//! The two shapes are variants of `Step`, so an operation can never carry a
//! function of the wrong shape once it has been built.
//!
//! Step functions run synchronously to completion. They must not call back
//! into the queryable they belong to; the driver's `&mut self` receivers
//! make that impossible to express without interior mutability, and doing it
//! through interior mutability is unsupported.

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result, StepError};
use crate::id::QueryId;
use crate::tag::ElementTag;

/// Outcome of applying a streaming step to one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutput<T> {
    /// The element made it through, possibly transformed.
    Yield(T),
    /// Filtered out; nothing is produced for this element.
    Skip,
    /// This stage will never produce another element for the current
    /// upstream. The driver stops feeding it.
    Done,
}

pub type ElementFn<T> = Box<dyn FnMut(T) -> std::result::Result<StepOutput<T>, StepError>>;
pub type BulkFn<T> = Box<dyn FnMut(Vec<T>) -> std::result::Result<Vec<T>, StepError>>;

pub enum Step<T> {
    Streaming(ElementFn<T>),
    Bulk(BulkFn<T>),
}

/// One pipeline stage.
pub struct Operation<T> {
    name: Cow<'static, str>,
    result_tag: Option<ElementTag>,
    owner: Option<QueryId>,
    step: Step<T>,
}

impl<T> Operation<T> {
    pub fn streaming<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: FnMut(T) -> std::result::Result<StepOutput<T>, StepError> + 'static,
    {
        Self::new(name, Step::Streaming(Box::new(f)))
    }

    pub fn bulk<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: FnMut(Vec<T>) -> std::result::Result<Vec<T>, StepError> + 'static,
    {
        Self::new(name, Step::Bulk(Box::new(f)))
    }

    pub fn new(name: impl Into<Cow<'static, str>>, step: Step<T>) -> Self {
        Self {
            name: name.into(),
            result_tag: None,
            owner: None,
            step,
        }
    }

    /// Build from the flag-plus-function form collaborators may hold.
    ///
    /// Exactly one of `element`/`bulk` must be given, and it must agree with
    /// `needs_full_enumerate`.
    pub fn from_parts(
        name: impl Into<Cow<'static, str>>,
        result_tag: Option<ElementTag>,
        needs_full_enumerate: bool,
        element: Option<ElementFn<T>>,
        bulk: Option<BulkFn<T>>,
    ) -> Result<Self> {
        let name = name.into();
        let step = match (needs_full_enumerate, element, bulk) {
            (false, Some(f), None) => Step::Streaming(f),
            (true, None, Some(f)) => Step::Bulk(f),
            _ => {
                return Err(Error::ShapeMismatch {
                    op: name.into_owned(),
                    needs_full_enumerate,
                })
            }
        };
        Ok(Self {
            name,
            result_tag,
            owner: None,
            step,
        })
    }

    /// Set the tag of the elements this stage produces. Without one the
    /// input tag is carried forward.
    pub fn with_result_tag(mut self, tag: impl Into<ElementTag>) -> Self {
        self.result_tag = Some(tag.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn needs_full_enumerate(&self) -> bool {
        matches!(self.step, Step::Bulk(_))
    }

    pub fn result_tag(&self) -> Option<&ElementTag> {
        self.result_tag.as_ref()
    }

    /// Tag after this stage, given the tag flowing into it.
    pub fn output_tag(&self, input: &ElementTag) -> ElementTag {
        self.result_tag.clone().unwrap_or_else(|| input.clone())
    }

    /// Queryable this operation was appended to, for diagnostics.
    pub fn owner(&self) -> Option<QueryId> {
        self.owner
    }

    pub fn set_owner(&mut self, owner: QueryId) {
        self.owner = Some(owner);
    }

    /// Run the streaming step on one element. `index` is the stage's position
    /// in the pending list and only feeds error reports.
    pub fn apply_element(&mut self, index: usize, input: T) -> Result<StepOutput<T>> {
        match &mut self.step {
            Step::Streaming(f) => f(input).map_err(|source| Error::Step {
                op: self.name.to_string(),
                index,
                source,
            }),
            Step::Bulk(_) => Err(Error::ShapeMismatch {
                op: self.name.to_string(),
                needs_full_enumerate: true,
            }),
        }
    }

    /// Run the bulk step over the entire available upstream.
    pub fn apply_bulk(&mut self, index: usize, input: Vec<T>) -> Result<Vec<T>> {
        match &mut self.step {
            Step::Bulk(f) => f(input).map_err(|source| Error::Step {
                op: self.name.to_string(),
                index,
                source,
            }),
            Step::Streaming(_) => Err(Error::ShapeMismatch {
                op: self.name.to_string(),
                needs_full_enumerate: false,
            }),
        }
    }
}

impl<T> fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("needs_full_enumerate", &self.needs_full_enumerate())
            .field("result_tag", &self.result_tag)
            .field("owner", &self.owner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double() -> ElementFn<i64> {
        Box::new(|x: i64| Ok(StepOutput::Yield(x * 2)))
    }

    fn reverse() -> BulkFn<i64> {
        Box::new(|mut xs: Vec<i64>| {
            xs.reverse();
            Ok(xs)
        })
    }

    #[test]
    fn test_from_parts_matching_shapes() {
        let op = Operation::from_parts("double", None, false, Some(double()), None).unwrap();
        assert!(!op.needs_full_enumerate());

        let op = Operation::from_parts("rev", None, true, None, Some(reverse())).unwrap();
        assert!(op.needs_full_enumerate());
    }

    #[test]
    fn test_from_parts_rejects_mismatch() {
        let err = Operation::from_parts("double", None, true, Some(double()), None).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                needs_full_enumerate: true,
                ..
            }
        ));

        let err =
            Operation::<i64>::from_parts("nothing", None, false, None, None).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));

        let err = Operation::from_parts("both", None, false, Some(double()), Some(reverse()))
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_wrong_apply_is_reported() {
        let mut op = Operation::bulk("rev", reverse());
        assert!(matches!(
            op.apply_element(0, 1),
            Err(Error::ShapeMismatch { .. })
        ));
        assert_eq!(op.apply_bulk(0, vec![1, 2]).unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_step_error_keeps_source() {
        let mut op = Operation::<i64>::streaming("boom", |_| Err("kaput".into()));
        let err = op.apply_element(3, 1).unwrap_err();
        assert!(matches!(err, Error::Step { index: 3, .. }));
        assert_eq!(err.step_source().unwrap().to_string(), "kaput");
    }

    #[test]
    fn test_output_tag_inherits_when_unset() {
        let input = ElementTag::new("i64");
        let op = Operation::<i64>::streaming("id", |x| Ok(StepOutput::Yield(x)));
        assert_eq!(op.output_tag(&input), input);
        let op = op.with_result_tag("str");
        assert_eq!(op.output_tag(&input).as_str(), "str");
    }
}
