//! Memoized layouts for the widths a host keeps asking about.
//!
//! A host typically measures and then lays out at the same width, and
//! resizes between a handful of widths. The container owns one cache and
//! invalidates it whenever the arrangement or the settings change, so the
//! width alone identifies an entry.

use crate::wrap::Layout;

/// Widths remembered by default.
pub const DEFAULT_CAPACITY: usize = 4;

#[derive(Debug, Clone)]
struct Entry {
    width: i32,
    layout: Layout,
}

/// Most-recently-used layouts keyed by container width.
#[derive(Debug, Clone)]
pub struct LayoutCache {
    // Most recent first
    entries: Vec<Entry>,
    capacity: usize,
    hits: usize,
    misses: usize,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LayoutCache {
    /// Cache remembering [`DEFAULT_CAPACITY`] widths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache remembering up to `capacity` widths; 0 disables caching.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Layout computed for `width`, promoted to most recent.
    pub fn get(&mut self, width: i32) -> Option<Layout> {
        match self.entries.iter().position(|e| e.width == width) {
            Some(pos) => {
                self.hits += 1;
                self.entries[..=pos].rotate_right(1);
                Some(self.entries[0].layout.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Remember `layout` for `width`, dropping the least recent entry when full.
    pub fn insert(&mut self, width: i32, layout: Layout) {
        if self.capacity == 0 {
            return;
        }
        self.entries.retain(|e| e.width != width);
        self.entries.insert(0, Entry { width, layout });
        self.entries.truncate(self.capacity);
    }

    /// Forget every layout. Statistics are kept.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Number of cache hits.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Number of cache misses.
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// Widths currently cached, most recent first.
    pub fn widths(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().map(|e| e.width)
    }

    /// Number of cached layouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
