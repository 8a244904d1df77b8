//! Greedy left-to-right wrapping.

use flowpack_core::{ItemId, Point, Rect, Slot};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where one entry landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The placed entry
    pub slot: Slot,
    /// Row index
    pub row: usize,
    /// Left edge of the content box (margin applied)
    pub x: i32,
    /// Top edge of the content box (margin applied)
    pub y: i32,
}

impl Placement {
    /// Content box of the entry.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::new(self.x, self.y), self.slot.size())
    }

    /// Item handle, `None` for spacers.
    #[must_use]
    pub fn id(&self) -> Option<ItemId> {
        self.slot.as_item().map(|item| item.id)
    }
}

/// A horizontal band of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Row index, top to bottom
    pub index: usize,
    /// Top of the row band
    pub y: i32,
    /// Sum of entry widths, margins included
    pub used_width: i32,
    /// Tallest entry, margins included
    pub height: i32,
    /// Entries in left-to-right order
    pub placements: Vec<Placement>,
}

impl Row {
    /// Number of entries, spacers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// True if the row holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Item handles in the row, spacers skipped.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.placements.iter().filter_map(Placement::id)
    }
}

/// Result of a wrapping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Rows, top to bottom
    pub rows: Vec<Row>,
    /// Sum of row heights plus the gaps between rows
    pub content_height: i32,
}

impl Layout {
    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All placements in order.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.rows.iter().flat_map(|row| row.placements.iter())
    }

    /// First placement of an item.
    #[must_use]
    pub fn find(&self, id: ItemId) -> Option<&Placement> {
        self.placements().find(|p| p.id() == Some(id))
    }

    /// Entry count per row.
    #[must_use]
    pub fn row_sizes(&self) -> Vec<usize> {
        self.rows.iter().map(Row::len).collect()
    }

    /// Shift every row and placement, e.g. by container padding.
    #[must_use]
    pub fn offset(mut self, dx: i32, dy: i32) -> Self {
        for row in &mut self.rows {
            row.y = row.y.saturating_add(dy);
            for p in &mut row.placements {
                p.x = p.x.saturating_add(dx);
                p.y = p.y.saturating_add(dy);
            }
        }
        self
    }
}

/// Wrap entries into rows no wider than `line_width`.
///
/// An entry that alone exceeds `line_width` gets a row to itself, and with
/// `line_width <= 0` every entry does. Gone items are skipped. Blank spacers
/// take width but no height.
pub fn wrap<S>(entries: &[S], line_width: i32, row_spacing: i32) -> Layout
where
    S: Copy + Into<Slot>,
{
    let mut rows: Vec<Row> = Vec::new();
    let mut current: Vec<Placement> = Vec::new();
    let mut line_used: i64 = 0;
    let mut line_height: i32 = 0;
    let mut cursor_y: i32 = 0;

    for &entry in entries {
        let slot: Slot = entry.into();
        if !slot.takes_space() {
            continue;
        }
        let space_width = slot.space_width();

        if !current.is_empty() && breaks_before(line_used, space_width, line_width) {
            rows.push(Row {
                index: rows.len(),
                y: cursor_y,
                used_width: saturate(line_used),
                height: line_height,
                placements: std::mem::take(&mut current),
            });
            cursor_y = cursor_y
                .saturating_add(line_height)
                .saturating_add(row_spacing);
            line_used = 0;
            line_height = 0;
        }

        let margin = slot.margin();
        current.push(Placement {
            slot,
            row: rows.len(),
            x: saturate(line_used + i64::from(margin.left)),
            y: cursor_y.saturating_add(margin.top),
        });
        line_height = line_height.max(slot.space_height());
        line_used += i64::from(space_width);
    }

    if !current.is_empty() {
        rows.push(Row {
            index: rows.len(),
            y: cursor_y,
            used_width: saturate(line_used),
            height: line_height,
            placements: current,
        });
    }

    let content_height = rows
        .last()
        .map_or(0, |last| last.y.saturating_add(last.height));
    debug!(
        rows = rows.len(),
        content_height, line_width, "wrapped entries into rows"
    );

    Layout {
        rows,
        content_height,
    }
}

/// Number of rows [`wrap`] produces for entries of these widths.
pub(crate) fn count_rows(widths: impl IntoIterator<Item = i32>, line_width: i32) -> usize {
    let mut rows = 0;
    let mut line_used: i64 = 0;
    let mut row_open = false;
    for width in widths {
        if row_open && breaks_before(line_used, width, line_width) {
            line_used = 0;
            rows += 1;
        }
        row_open = true;
        line_used += i64::from(width);
    }
    rows + usize::from(row_open)
}

/// Whether an entry of `width` starts a new row after `line_used` pixels.
/// Only asked when the current row is non-empty.
fn breaks_before(line_used: i64, width: i32, line_width: i32) -> bool {
    line_width <= 0 || line_used + i64::from(width) > i64::from(line_width)
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
