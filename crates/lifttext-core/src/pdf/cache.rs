use std::collections::VecDeque;
use std::path::Path;

use tempfile::TempPath;
use tracing::debug;

use crate::consts::PAGE_CACHE_CAPACITY;

/// Rendered pages keyed by page index, backed by temporary PNG files.
///
/// Eviction is first-in first-out. Dropping an entry deletes its file.
#[derive(Debug)]
pub struct PageCache {
    capacity: usize,
    entries: VecDeque<(usize, TempPath)>,
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(PAGE_CACHE_CAPACITY)
    }
}

impl PageCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, page: usize) -> bool {
        self.entries.iter().any(|(p, _)| *p == page)
    }

    pub fn get(&self, page: usize) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(p, _)| *p == page)
            .map(|(_, path)| &**path)
    }

    /// Page indices from oldest to newest.
    pub fn pages(&self) -> Vec<usize> {
        self.entries.iter().map(|(p, _)| *p).collect()
    }

    /// Store a rendered page. Returns the evicted page index, if any; its
    /// file is deleted before this returns.
    pub fn insert(&mut self, page: usize, file: TempPath) -> Option<usize> {
        if let Some(pos) = self.entries.iter().position(|(p, _)| *p == page) {
            self.entries.remove(pos);
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front().map(|(p, path)| {
                if let Err(e) = path.close() {
                    debug!(page = p, error = %e, "failed to remove evicted page file");
                }
                p
            })
        } else {
            None
        };

        self.entries.push_back((page, file));
        evicted
    }

    /// Drop every entry and its file.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
