//! Streaming proximity filter over a position-sorted variant stream.
//!
//! Suppresses records that sit too close to a kept neighbor on the same
//! chromosome. Whether a record survives depends on both the record before
//! it and the record after it, so decisions are made with one record of
//! lookahead and emitted one step late. A running maximum span end merges
//! overlapping reference spans, so three or more overlapping variants are
//! all treated as mutually too close even though only adjacent pairs are
//! ever compared.
//!
//! The input must be sorted by chromosome, then position; this is a caller
//! responsibility and is not re-validated here.

use crate::variant::record::{RecordError, VariantRecord};
use crate::variant::trim::{trim_alleles, TrimResult};

/// View of a variant carried through the filter.
///
/// The filter owns its buffered items. Implementing this trait lets a
/// caller thread a richer carrier through the filter (for example the raw
/// VCF record alongside the parsed one) so that kept records can be
/// re-emitted byte-for-byte.
pub trait VariantView {
    /// The parsed record used for span arithmetic.
    fn variant(&self) -> &VariantRecord;
}

impl VariantView for VariantRecord {
    fn variant(&self) -> &VariantRecord {
        self
    }
}

/// Streaming filter that keeps only records separated by at least a
/// configured distance from their kept neighbors.
///
/// Internally a fixed ring of three owned record slots: while fewer than
/// three records have been seen nothing is decided, so degenerate streams
/// can be resolved as direct cases at [`finish`](Self::finish). Once the
/// stream is known to be longer, each new record decides the fate of the
/// pending one.
#[derive(Debug)]
pub struct ProximityFilter<T = VariantRecord> {
    distance: i64,
    trim: bool,
    slots: [Option<T>; 3],
    /// Ring index of the record whose decision is still pending.
    pending: usize,
    /// Records buffered before streaming starts; saturates at 3.
    primed: u8,
    /// Maximum span end seen on the current chromosome, merged across
    /// overlapping records whether or not they were kept.
    max_end: i64,
    keep_pending: bool,
}

impl<T: VariantView> ProximityFilter<T> {
    /// Create a filter requiring `distance` bases between kept records.
    ///
    /// With `trim` set, spans are adjusted by the record's canonical trim
    /// before any distance comparison.
    pub fn new(distance: i64, trim: bool) -> Self {
        Self {
            distance,
            trim,
            slots: [None, None, None],
            pending: 0,
            primed: 0,
            max_end: 0,
            keep_pending: false,
        }
    }

    /// Trim-adjusted genomic span of a record.
    fn span(&self, record: &VariantRecord) -> Result<(i64, i64), RecordError> {
        let trim = if self.trim {
            trim_alleles(record)?
        } else {
            TrimResult::default()
        };
        Ok((
            record.pos + trim.ltrim as i64,
            record.end() - trim.rtrim as i64,
        ))
    }

    /// Decide whether `record` is far enough from everything before it.
    ///
    /// Updates the running maximum end unconditionally; a chromosome change
    /// resets it and always passes.
    fn keep_left(&mut self, prev_rid: u32, record: &VariantRecord) -> Result<bool, RecordError> {
        let (start, end) = self.span(record)?;
        if prev_rid != record.rid {
            self.max_end = end;
            return Ok(true);
        }
        let last_end = self.max_end;
        self.max_end = self.max_end.max(end);
        Ok(last_end + self.distance <= start)
    }

    /// Feed the next record in sorted order; decided records are appended
    /// to `out` in their original stream order.
    pub fn push(&mut self, record: T, out: &mut Vec<T>) -> Result<(), RecordError> {
        match self.primed {
            0 => {
                self.slots[0] = Some(record);
                self.primed = 1;
            }
            1 => {
                self.slots[1] = Some(record);
                self.primed = 2;
            }
            2 => {
                // Third record: the stream is long enough that the first
                // two can be decided by the general rule.
                let a = self.slots[0].take();
                let b = self.slots[1].take();
                if let (Some(a), Some(b)) = (a, b) {
                    let (_, a_end) = self.span(a.variant())?;
                    self.max_end = a_end;
                    let kp = self.keep_left(a.variant().rid, b.variant())?;
                    if kp {
                        out.push(a);
                    }
                    let kn = self.keep_left(b.variant().rid, record.variant())?;
                    if kp && kn {
                        out.push(b);
                    }
                    self.keep_pending = kn;
                }
                self.pending = 2;
                self.slots[2] = Some(record);
                self.primed = 3;
            }
            _ => {
                let prev = self.slots[self.pending].take();
                if let Some(prev) = prev {
                    let kn = self.keep_left(prev.variant().rid, record.variant())?;
                    if self.keep_pending && kn {
                        out.push(prev);
                    }
                    self.keep_pending = kn;
                }
                self.pending = (self.pending + 1) % 3;
                self.slots[self.pending] = Some(record);
            }
        }
        Ok(())
    }

    /// Flush the remaining buffered decisions at end of input.
    ///
    /// Degenerate stream lengths are direct cases: a single record is
    /// always kept; of two records, the first is kept by convention and
    /// the second only if the pairwise test passes.
    pub fn finish(mut self, out: &mut Vec<T>) -> Result<(), RecordError> {
        match self.primed {
            0 => {}
            1 => {
                if let Some(only) = self.slots[0].take() {
                    out.push(only);
                }
            }
            2 => {
                let a = self.slots[0].take();
                let b = self.slots[1].take();
                if let (Some(a), Some(b)) = (a, b) {
                    let (_, a_end) = self.span(a.variant())?;
                    self.max_end = a_end;
                    let keep_second = self.keep_left(a.variant().rid, b.variant())?;
                    out.push(a);
                    if keep_second {
                        out.push(b);
                    }
                }
            }
            _ => {
                // The last record has no right neighbor; its own left test
                // is the whole decision.
                if self.keep_pending {
                    if let Some(last) = self.slots[self.pending].take() {
                        out.push(last);
                    }
                }
            }
        }
        Ok(())
    }
}

impl ProximityFilter<VariantRecord> {
    /// Filter an entire sorted stream, collecting the kept records.
    pub fn filter<I>(records: I, distance: i64, trim: bool) -> Result<Vec<VariantRecord>, RecordError>
    where
        I: IntoIterator<Item = VariantRecord>,
    {
        let mut filter = ProximityFilter::new(distance, trim);
        let mut out = Vec::new();
        for record in records {
            filter.push(record, &mut out)?;
        }
        filter.finish(&mut out)?;
        Ok(out)
    }
}
