//! Overlap selection: which trailing segments of a flushed chunk seed the next one.

/// A suffix of an accumulated segment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapSelection {
    /// Index of the first selected segment; equals the list length when nothing is selected.
    pub start: usize,
    /// Characters covered by the selection, separators included.
    pub size: usize,
}

impl OverlapSelection {
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn select<'a, T>(&self, segments: &'a [T]) -> &'a [T] {
        &segments[self.start.min(segments.len())..]
    }
}

/// Greedily select whole trailing segments whose joined size fits `target_size`.
///
/// Scans backward and stops at the first segment that would overflow, so the
/// selection is always a contiguous suffix. Segments are never split.
pub fn calculate_overlap<S: AsRef<str>>(
    segments: &[S],
    target_size: usize,
    separator_size: usize,
) -> OverlapSelection {
    let mut selection = OverlapSelection {
        start: segments.len(),
        size: 0,
    };
    if target_size == 0 {
        return selection;
    }

    for (i, segment) in segments.iter().enumerate().rev() {
        let separator = if selection.start < segments.len() {
            separator_size
        } else {
            0
        };
        let needed = selection.size + segment.as_ref().chars().count() + separator;
        if needed > target_size {
            break;
        }
        selection = OverlapSelection {
            start: i,
            size: needed,
        };
    }
    selection
}
