//! Element-at-a-time operators.

use ginq_core::error::StepError;
use ginq_core::step::{Operation, StepOutput};
use ginq_core::tag::ElementTag;

pub fn map<T, F>(mut f: F) -> Operation<T>
where
    T: 'static,
    F: FnMut(T) -> T + 'static,
{
    Operation::streaming("map", move |x| Ok(StepOutput::Yield(f(x))))
}

/// `map` whose output is described by a different element tag.
pub fn map_to<T, F>(tag: impl Into<ElementTag>, f: F) -> Operation<T>
where
    T: 'static,
    F: FnMut(T) -> T + 'static,
{
    map(f).with_result_tag(tag)
}

/// Fallible map. An `Err` from `f` aborts the pull and reaches the caller
/// as `Error::Step` with the original error as its source.
pub fn try_map<T, E, F>(mut f: F) -> Operation<T>
where
    T: 'static,
    E: Into<StepError> + 'static,
    F: FnMut(T) -> Result<T, E> + 'static,
{
    Operation::streaming("try_map", move |x| {
        f(x).map(StepOutput::Yield).map_err(Into::into)
    })
}

pub fn filter<T, F>(mut pred: F) -> Operation<T>
where
    T: 'static,
    F: FnMut(&T) -> bool + 'static,
{
    Operation::streaming("filter", move |x| {
        Ok(if pred(&x) {
            StepOutput::Yield(x)
        } else {
            StepOutput::Skip
        })
    })
}

pub fn filter_map<T, F>(mut f: F) -> Operation<T>
where
    T: 'static,
    F: FnMut(T) -> Option<T> + 'static,
{
    Operation::streaming("filter_map", move |x| {
        Ok(match f(x) {
            Some(v) => StepOutput::Yield(v),
            None => StepOutput::Skip,
        })
    })
}

/// Let at most `n` elements through, then report the stage as done.
///
/// The count moves as soon as an element passes this stage. If a later
/// streaming stage fails on that element, pulling again does not give the
/// slot back, so retrying after a downstream error is not supported. Put
/// fallible stages in front of `take` when the caller retries.
pub fn take<T: 'static>(n: usize) -> Operation<T> {
    let mut taken = 0usize;
    Operation::streaming("take", move |x| {
        if taken >= n {
            return Ok(StepOutput::Done);
        }
        taken += 1;
        Ok(StepOutput::Yield(x))
    })
}

/// Drop the first `n` elements. Like `take`, the count moves when an element
/// reaches this stage and is not restored if a later stage fails.
pub fn skip<T: 'static>(n: usize) -> Operation<T> {
    let mut skipped = 0usize;
    Operation::streaming("skip", move |x| {
        if skipped < n {
            skipped += 1;
            return Ok(StepOutput::Skip);
        }
        Ok(StepOutput::Yield(x))
    })
}

pub fn take_while<T, F>(mut pred: F) -> Operation<T>
where
    T: 'static,
    F: FnMut(&T) -> bool + 'static,
{
    Operation::streaming("take_while", move |x| {
        Ok(if pred(&x) {
            StepOutput::Yield(x)
        } else {
            StepOutput::Done
        })
    })
}

/// Observe each element without changing it.
pub fn inspect<T, F>(mut f: F) -> Operation<T>
where
    T: 'static,
    F: FnMut(&T) + 'static,
{
    Operation::streaming("inspect", move |x| {
        f(&x);
        Ok(StepOutput::Yield(x))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<T>(mut op: Operation<T>, input: Vec<T>) -> Vec<StepOutput<T>> {
        input
            .into_iter()
            .enumerate()
            .map(|(i, x)| op.apply_element(i, x).unwrap())
            .collect()
    }

    #[test]
    fn test_take_reports_done_after_n() {
        let out = run(take(2), vec![1, 2, 3]);
        assert_eq!(
            out,
            vec![StepOutput::Yield(1), StepOutput::Yield(2), StepOutput::Done]
        );
    }

    #[test]
    fn test_take_zero_is_done_immediately() {
        assert_eq!(run(take(0), vec![1]), vec![StepOutput::Done]);
    }

    #[test]
    fn test_skip_then_yield() {
        let out = run(skip(1), vec![1, 2]);
        assert_eq!(out, vec![StepOutput::Skip, StepOutput::Yield(2)]);
    }

    #[test]
    fn test_take_while_stops_at_first_miss() {
        let out = run(take_while(|x: &i32| *x < 3), vec![1, 5, 2]);
        assert_eq!(
            out,
            vec![StepOutput::Yield(1), StepOutput::Done, StepOutput::Yield(2)]
        );
    }

    #[test]
    fn test_map_to_sets_tag() {
        let op = map_to("str", |x: i32| x);
        assert_eq!(op.result_tag().unwrap().as_str(), "str");
        assert_eq!(op.name(), "map");
    }
}
