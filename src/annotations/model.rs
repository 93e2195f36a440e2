//! Committed annotations in paint order

use crate::domain::AnnotationEntry;

/// Ordered list of committed annotations.
///
/// Entries are only ever appended or popped from the end, so index order is
/// paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationModel {
    entries: Vec<AnnotationEntry>,
}

impl AnnotationModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: AnnotationEntry) {
        self.entries.push(entry);
    }

    /// Remove the most recent entry, if any
    pub fn undo(&mut self) -> Option<AnnotationEntry> {
        let removed = self.entries.pop();
        if removed.is_some() {
            log::debug!("Undo, {} annotations left", self.entries.len());
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[AnnotationEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&AnnotationEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
