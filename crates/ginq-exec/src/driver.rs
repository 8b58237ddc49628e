//! Enumeration driver: pull one value at a time through the pipeline.
//!
//! Streaming stages are chained per element. The first bulk stage in the
//! pending list is materialized as soon as a pull reaches it: the streaming
//! stages in front of it are run over the unconsumed source and their output
//! becomes the new source, then the bulk step gets all of it and its output
//! replaces the source again. Each of the two commits happens only once the
//! work in front of it has succeeded.

use ginq_core::error::{Error, Result};
use ginq_core::step::{Operation, StepOutput};

use crate::metrics::emit_span;
use crate::queryable::Queryable;

impl<T: Clone> Queryable<T> {
    /// Produce the next output value, or `Ok(None)` once the pipeline is
    /// exhausted. Exhaustion is sticky: every later call returns `Ok(None)`.
    ///
    /// On a streaming error the failing element stays unconsumed. On a bulk
    /// error the bulk stage stays first in line over its staged input.
    pub fn pull_next(&mut self) -> Result<Option<T>> {
        loop {
            if self.exhausted {
                return Ok(None);
            }

            if let Some(k) = self.first_bulk_index() {
                self.materialize_through(k)?;
                continue;
            }

            if self.cursor == self.source.len() {
                self.exhausted = true;
                #[cfg(feature = "tracing")]
                tracing::trace!(query = %self.id, "exhausted");
                emit_span("exhausted", &self.stats.key_values());
                return Ok(None);
            }

            let input = self.source[self.cursor].clone();
            match chain(&mut self.pending, input)? {
                StepOutput::Yield(v) => {
                    self.cursor += 1;
                    self.stats.yielded += 1;
                    return Ok(Some(v));
                }
                StepOutput::Skip => {
                    self.cursor += 1;
                    self.stats.filtered += 1;
                }
                StepOutput::Done => {
                    self.stats.filtered += 1;
                    self.cursor = self.source.len();
                }
            }
        }
    }

    fn first_bulk_index(&self) -> Option<usize> {
        self.pending.iter().position(Operation::needs_full_enumerate)
    }

    /// Materialize `pending[k]`, the first bulk stage, over the unconsumed
    /// source and commit its output as the new source.
    ///
    /// The streaming stages in front of it run first and their output is
    /// committed as an intermediate source before the bulk step is called.
    /// If the bulk step or the limit check then fails, the bulk stage is
    /// first in line over that staged input and a later pull resumes there
    /// without running the streaming stages again.
    fn materialize_through(&mut self, k: usize) -> Result<()> {
        if k > 0 {
            self.stage_prefix(k)?;
        }

        let input = self.source[self.cursor..].to_vec();
        let len = input.len();
        if let Some(limit) = self.config.materialize_limit {
            if len > limit {
                return Err(Error::MaterializeLimit {
                    op: self.pending[0].name().to_string(),
                    len,
                    limit,
                });
            }
        }

        let batch = self.pending[0].apply_bulk(0, input)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            query = %self.id,
            op = %self.pending[0].name(),
            input = len,
            output = batch.len(),
            "materialized bulk stage"
        );

        let bulk = self.pending.remove(0);
        self.element_tag = bulk.output_tag(&self.element_tag);
        self.source = batch;
        self.cursor = 0;
        self.stats.materialized_stages += 1;
        self.stats.materialized_elements += len as u64;

        Ok(())
    }

    /// Run `pending[..k]` over the unconsumed source and commit the result
    /// as the new source. A step failure here commits nothing.
    fn stage_prefix(&mut self, k: usize) -> Result<()> {
        let remaining = &self.source[self.cursor..];
        let mut staged = Vec::with_capacity(remaining.len());
        let mut dropped = 0u64;
        for item in remaining {
            match chain(&mut self.pending[..k], item.clone())? {
                StepOutput::Yield(v) => staged.push(v),
                StepOutput::Skip => dropped += 1,
                StepOutput::Done => {
                    dropped += 1;
                    break;
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            query = %self.id,
            fused = k,
            input = remaining.len(),
            output = staged.len(),
            "staged streaming prefix"
        );

        self.element_tag = self.pending[..k]
            .iter()
            .fold(self.element_tag.clone(), |tag, op| op.output_tag(&tag));
        self.source = staged;
        self.cursor = 0;
        self.pending.drain(..k);
        self.stats.filtered += dropped;

        Ok(())
    }
}

/// Run one element through a run of streaming stages, left to right.
fn chain<T>(ops: &mut [Operation<T>], input: T) -> Result<StepOutput<T>> {
    let mut working = input;
    for (index, op) in ops.iter_mut().enumerate() {
        match op.apply_element(index, working)? {
            StepOutput::Yield(v) => working = v,
            other => return Ok(other),
        }
    }
    Ok(StepOutput::Yield(working))
}
