//! Eager and iterator-style consumers built on `pull_next`.

use ginq_core::error::Result;

use crate::metrics::emit_span;
use crate::queryable::Queryable;

impl<T: Clone> Queryable<T> {
    /// Pull until exhaustion and return everything, in order.
    ///
    /// Equivalent to calling `pull_next` by hand. The queryable is left
    /// exhausted, so a second call returns an empty vector.
    pub fn enumerate_all(&mut self) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(self.config.collect_capacity_hint);
        while let Some(v) = self.pull_next()? {
            out.push(v);
        }
        emit_span("enumerate_all", &self.stats.key_values());
        Ok(out)
    }

    /// Pull at most `n` values, stopping early without touching the rest.
    pub fn take_first(&mut self, n: usize) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(n.min(self.config.collect_capacity_hint));
        while out.len() < n {
            match self.pull_next()? {
                Some(v) => out.push(v),
                None => break,
            }
        }
        Ok(out)
    }

    pub fn first(&mut self) -> Result<Option<T>> {
        self.pull_next()
    }

    /// Iterate over the remaining output. The iterator stops after the first
    /// error.
    pub fn pulls(&mut self) -> Pulls<'_, T> {
        Pulls {
            query: self,
            failed: false,
        }
    }
}

pub struct Pulls<'a, T> {
    query: &'a mut Queryable<T>,
    failed: bool,
}

impl<T: Clone> Iterator for Pulls<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.query.pull_next() {
            Ok(v) => v.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<T: Clone> std::iter::FusedIterator for Pulls<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use ginq_core::step::StepOutput;

    #[test]
    fn test_enumerate_all_twice_is_empty() {
        let mut q = Queryable::new(vec![1, 2, 3], "i64");
        assert_eq!(q.enumerate_all().unwrap(), vec![1, 2, 3]);
        assert!(q.enumerate_all().unwrap().is_empty());
    }

    #[test]
    fn test_take_first_stops_early() {
        let mut q = Queryable::new(vec![1, 2, 3, 4], "i64")
            .then_streaming("inc", |x| Ok(StepOutput::Yield(x + 1)));
        assert_eq!(q.take_first(2).unwrap(), vec![2, 3]);
        assert_eq!(q.cursor(), 2);
        assert_eq!(q.take_first(10).unwrap(), vec![4, 5]);
    }

    #[test]
    fn test_pulls_stop_after_error() {
        let mut q = Queryable::new(vec![1, 2, 3], "i64").then_streaming("fail_on_two", |x| {
            if x == 2 {
                Err("two".into())
            } else {
                Ok(StepOutput::Yield(x))
            }
        });
        let items: Vec<_> = q.pulls().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(*items[0].as_ref().unwrap(), 1);
        assert!(items[1].is_err());
    }

    #[test]
    fn test_pulls_collects_into_result() {
        let mut q = Queryable::new(vec![3, 4], "i64");
        let all: Result<Vec<_>> = q.pulls().collect();
        assert_eq!(all.unwrap(), vec![3, 4]);
        assert_eq!(q.stats().yielded, 2);
    }
}
