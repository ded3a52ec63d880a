//! Command segments and print jobs
//!
//! A [`CommandSegment`] is one encoded operation; a [`PrintJob`] is the
//! ordered sequence a document builder produced. The transport treats a job
//! as an undifferentiated byte stream, so composition order is preserved
//! exactly and flattening never reorders or interleaves.

use serde::{Deserialize, Serialize};

/// Classification of an encoded segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Printable payload (possibly wrapped in style toggles)
    Text,
    /// Non-printing state change: styles, alignment, feeds, init, page selects
    Style,
    Cut,
    Barcode,
    Qr,
    CashDrawer,
    /// Unvalidated passthrough
    Raw,
}

/// An immutable, tagged ESC/POS byte sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSegment {
    kind: SegmentKind,
    bytes: Vec<u8>,
}

impl CommandSegment {
    pub(crate) fn new(kind: SegmentKind, bytes: Vec<u8>) -> Self {
        Self { kind, bytes }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Ordered segment sequence, built once and flattened once for transmission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintJob {
    segments: Vec<CommandSegment>,
}

impl PrintJob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment; insertion order is transmission order
    pub fn push(&mut self, segment: CommandSegment) -> &mut Self {
        self.segments.push(segment);
        self
    }

    pub fn segments(&self) -> &[CommandSegment] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total byte length across all segments
    pub fn byte_len(&self) -> usize {
        self.segments.iter().map(CommandSegment::len).sum()
    }

    /// Number of segments of the given kind
    pub fn count_of(&self, kind: SegmentKind) -> usize {
        self.segments.iter().filter(|s| s.kind() == kind).count()
    }

    /// Concatenate all segments into one transmission buffer
    pub fn flatten(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for segment in &self.segments {
            out.extend_from_slice(segment.bytes());
        }
        out
    }
}

impl FromIterator<CommandSegment> for PrintJob {
    fn from_iter<I: IntoIterator<Item = CommandSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Extend<CommandSegment> for PrintJob {
    fn extend<I: IntoIterator<Item = CommandSegment>>(&mut self, iter: I) {
        self.segments.extend(iter);
    }
}

impl IntoIterator for PrintJob {
    type Item = CommandSegment;
    type IntoIter = std::vec::IntoIter<CommandSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(kind: SegmentKind, bytes: &[u8]) -> CommandSegment {
        CommandSegment::new(kind, bytes.to_vec())
    }

    #[test]
    fn test_flatten_preserves_order_and_length() {
        let mut job = PrintJob::new();
        job.push(segment(SegmentKind::Style, &[0x1B, 0x40]));
        job.push(segment(SegmentKind::Text, b"hello"));
        job.push(segment(SegmentKind::Cut, &[0x1D, 0x56, 0x00]));

        let flat = job.flatten();
        assert_eq!(flat.len(), job.byte_len());
        assert_eq!(flat.len(), 2 + 5 + 3);

        // Each segment's bytes appear contiguously at its offset
        let mut offset = 0;
        for seg in job.segments() {
            assert_eq!(&flat[offset..offset + seg.len()], seg.bytes());
            offset += seg.len();
        }
    }

    #[test]
    fn test_empty_job() {
        let job = PrintJob::new();
        assert!(job.is_empty());
        assert_eq!(job.byte_len(), 0);
        assert!(job.flatten().is_empty());
    }

    #[test]
    fn test_count_of() {
        let mut job = PrintJob::new();
        job.push(segment(SegmentKind::Text, b"a"));
        job.push(segment(SegmentKind::Style, &[0x1B, 0x45, 0x01]));
        job.push(segment(SegmentKind::Text, b"b"));
        assert_eq!(job.count_of(SegmentKind::Text), 2);
        assert_eq!(job.count_of(SegmentKind::Style), 1);
        assert_eq!(job.count_of(SegmentKind::Qr), 0);
    }
}
