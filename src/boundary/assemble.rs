//! Ring assembly: fold contiguous records of one identifier into rings.
//!
//! The fold state is an explicit [`Accumulator`] value. Group boundaries are
//! found by looking one record ahead, and an identifier that shows up again
//! after its group was closed is an error rather than a second ring.

use std::collections::HashMap;

use crate::errors::AssembleError;
use crate::record::{RecordProperties, VertexRecord};
use crate::types::BoundingBox;

use super::ring::{FinishedRing, RingBuilder};
use super::segment;

/// Relationship between a record and the one after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBoundary {
    /// Next record extends the same boundary
    Continue,
    /// Next record starts a different boundary, or the stream ended
    NewGroup,
}

impl GroupBoundary {
    pub fn between(current: &VertexRecord, next: Option<&VertexRecord>) -> Self {
        match next {
            Some(next) if next.ident() == current.ident() => GroupBoundary::Continue,
            _ => GroupBoundary::NewGroup,
        }
    }
}

/// The boundary currently being built
#[derive(Debug, Clone)]
struct OpenGroup {
    properties: RecordProperties,
    first_line: usize,
    outer: RingBuilder,
    inner: Option<RingBuilder>,
}

impl OpenGroup {
    fn open(record: &VertexRecord) -> Self {
        Self {
            properties: record.properties.clone(),
            first_line: record.line,
            outer: RingBuilder::new(),
            inner: None,
        }
    }

    /// Close both rings and keep the ones worth emitting.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn close(self, finished: &mut Vec<FinishedRing>) {
        let ident = &self.properties.ident;
        let rings = std::iter::once(("outer", self.outer)).chain(self.inner.map(|r| ("inner", r)));
        for (which, ring) in rings {
            match ring.close() {
                Ok(closed) if closed.valid => {
                    crate::log::debug!(ident = %ident, which, points = closed.ring.len(), "ring closed");
                    finished.push(FinishedRing::new(self.properties.clone(), closed));
                }
                Ok(_) => {
                    crate::log::debug!(ident = %ident, which, "ring outside bounds, dropped");
                }
                Err(open) => {
                    crate::log::warn!(
                        ident = %ident,
                        which,
                        distinct = open.distinct_points(),
                        "ring has too few points, dropped"
                    );
                }
            }
        }
    }
}

/// Fold state threaded through [`Accumulator::step`].
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    open: Option<OpenGroup>,
    /// Closed identifiers and the line each group started on
    closed: HashMap<String, usize>,
    finished: Vec<FinishedRing>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of the boundary being built, if any
    pub fn current_ident(&self) -> Option<&str> {
        self.open.as_ref().map(|g| g.properties.ident.as_str())
    }

    /// Rings finished so far
    pub fn finished(&self) -> &[FinishedRing] {
        &self.finished
    }

    /// Consume one record, given a peek at the record after it.
    pub fn step(
        mut self,
        record: &VertexRecord,
        next: Option<&VertexRecord>,
        bounds: &BoundingBox,
    ) -> Result<Self, AssembleError> {
        if self.current_ident() != Some(record.ident()) {
            // A stale group can only be here if the caller skipped the
            // look-ahead; close it so nothing is lost.
            if let Some(group) = self.open.take() {
                self.close_group(group);
            }
            if let Some(&first_line) = self.closed.get(record.ident()) {
                return Err(AssembleError::OutOfOrderIdentifier {
                    ident: record.ident().to_string(),
                    line: record.line,
                    first_line,
                });
            }
            crate::log::debug!(ident = %record.ident(), line = record.line, "group opened");
            self.open = Some(OpenGroup::open(record));
        }

        if let Some(group) = self.open.as_mut() {
            segment::apply(record, &mut group.outer, &mut group.inner, bounds);
        }

        if GroupBoundary::between(record, next) == GroupBoundary::NewGroup {
            if let Some(group) = self.open.take() {
                self.close_group(group);
            }
        }
        Ok(self)
    }

    fn close_group(&mut self, group: OpenGroup) {
        self.closed
            .insert(group.properties.ident.clone(), group.first_line);
        group.close(&mut self.finished);
    }

    /// Close any pending group and return every emitted ring.
    pub fn finish(mut self) -> Vec<FinishedRing> {
        if let Some(group) = self.open.take() {
            self.close_group(group);
        }
        self.finished
    }
}

/// Assemble a stream of records, grouped by contiguous identifier, into
/// closed in-bounds rings.
pub fn assemble<I>(records: I, bounds: &BoundingBox) -> Result<Vec<FinishedRing>, AssembleError>
where
    I: IntoIterator<Item = VertexRecord>,
{
    let mut records = records.into_iter().peekable();
    let mut acc = Accumulator::new();
    while let Some(record) = records.next() {
        acc = acc.step(&record, records.peek(), bounds)?;
    }
    Ok(acc.finish())
}
