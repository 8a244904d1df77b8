//! Row compression: reorder items so that wrapping needs fewer rows.
//!
//! The default strategy peels one row at a time. Each peel solves a 0/1
//! knapsack over the remaining items (capacity = line width, value = weight =
//! clamped item width), takes the selected subset in its original relative
//! order, and repeats on what is left. The table is indexed by pixel width up
//! to the smaller of the line width and the total item width, so each peel
//! costs `O(n × min(line_width, Σ width))`. Packings whose table would exceed
//! [`MAX_TABLE_CELLS`] use first-fit decreasing instead.
//!
//! Peeling the fullest row first is not always better than the input order,
//! so [`compress`] keeps the input order when the packed one wraps into more
//! rows.

use flowpack_core::{CompressStrategy, Item};
use tracing::{debug, trace, warn};

use crate::wrap::count_rows;

/// Largest knapsack table, in cells, allocated for one peel.
pub const MAX_TABLE_CELLS: usize = 1 << 24;

/// Reorder items with the exact knapsack packer.
#[must_use]
pub fn compress(items: &[Item], line_width: i32) -> Vec<Item> {
    compress_with(items, line_width, CompressStrategy::Knapsack)
}

/// Reorder items with the given strategy.
///
/// Never wraps into more rows than `items` in their given order.
#[must_use]
pub fn compress_with(items: &[Item], line_width: i32, strategy: CompressStrategy) -> Vec<Item> {
    let widths: Vec<i32> = items.iter().map(Item::space_width).collect();
    packed_order(&widths, line_width, strategy, |i| items[i].takes_space())
        .into_iter()
        .map(|i| items[i])
        .collect()
}

/// Packed order of the entries, or the input order when wrapping the packed
/// order needs more rows. `wraps(i)` tells whether entry `i` takes part in
/// wrapping at all.
pub(crate) fn packed_order<F>(
    widths: &[i32],
    line_width: i32,
    strategy: CompressStrategy,
    wraps: F,
) -> Vec<usize>
where
    F: Fn(usize) -> bool,
{
    let order: Vec<usize> = pack_indices(widths, line_width, strategy)
        .into_iter()
        .flatten()
        .collect();

    let before = count_rows(
        (0..widths.len()).filter(|&i| wraps(i)).map(|i| widths[i]),
        line_width,
    );
    let after = count_rows(
        order.iter().copied().filter(|&i| wraps(i)).map(|i| widths[i]),
        line_width,
    );
    if after > before {
        debug!(before, after, "packed order wraps worse, keeping input order");
        return (0..widths.len()).collect();
    }
    order
}

/// Group items into rows, one group per peel.
#[must_use]
pub fn pack_rows(items: &[Item], line_width: i32, strategy: CompressStrategy) -> Vec<Vec<Item>> {
    let widths: Vec<i32> = items.iter().map(Item::space_width).collect();
    pack_indices(&widths, line_width, strategy)
        .into_iter()
        .map(|group| group.into_iter().map(|i| items[i]).collect())
        .collect()
}

/// Group entry indices into rows given each entry's width, margins included.
#[must_use]
pub fn pack_indices(widths: &[i32], line_width: i32, strategy: CompressStrategy) -> Vec<Vec<usize>> {
    let groups = if line_width <= 0 {
        // Nothing fits; one entry per row keeps the order and terminates.
        (0..widths.len()).map(|i| vec![i]).collect()
    } else {
        match strategy {
            CompressStrategy::Knapsack if table_cells(widths, line_width) > MAX_TABLE_CELLS => {
                warn!(
                    items = widths.len(),
                    line_width,
                    limit = MAX_TABLE_CELLS,
                    "knapsack table too large, packing first-fit decreasing"
                );
                first_fit_decreasing_rows(widths, line_width)
            }
            CompressStrategy::Knapsack => knapsack_rows(widths, line_width),
            CompressStrategy::FirstFitDecreasing => first_fit_decreasing_rows(widths, line_width),
        }
    };
    debug!(
        items = widths.len(),
        rows = groups.len(),
        line_width,
        ?strategy,
        "packed rows"
    );
    groups
}

/// Cells of the first, largest peel's table.
fn table_cells(widths: &[i32], capacity: i32) -> usize {
    let columns = table_capacity(widths, capacity).saturating_add(1);
    widths.len().saturating_add(1).saturating_mul(columns)
}

/// Table width needed for `widths`: the capacity, or the clamped total when
/// that is smaller. Table rows are constant above the total.
fn table_capacity(widths: &[i32], capacity: i32) -> usize {
    let cap = capacity.max(0);
    let total: i64 = widths.iter().map(|&w| i64::from(w.clamp(0, cap))).sum();
    let used = total.min(i64::from(cap));
    usize::try_from(used).unwrap_or(0)
}

fn knapsack_rows(widths: &[i32], capacity: i32) -> Vec<Vec<usize>> {
    let mut remaining: Vec<usize> = (0..widths.len()).collect();
    let mut groups = Vec::new();

    while !remaining.is_empty() {
        let clamped: Vec<i32> = remaining
            .iter()
            .map(|&i| widths[i].clamp(0, capacity))
            .collect();
        let mut selected = select_row(&clamped, capacity);

        // Zero-width entries never improve the table. Attach them to the first
        // row that really fits, so they cannot trail an over-wide entry.
        let real: i64 = remaining
            .iter()
            .zip(&selected)
            .filter(|(_, &taken)| taken)
            .map(|(&i, _)| i64::from(widths[i]))
            .sum();
        if real <= i64::from(capacity) {
            for (flag, &i) in selected.iter_mut().zip(&remaining) {
                if widths[i] <= 0 {
                    *flag = true;
                }
            }
        }
        if !selected.contains(&true) {
            selected[0] = true;
        }

        let (taken, rest): (Vec<(usize, bool)>, Vec<(usize, bool)>) = remaining
            .iter()
            .copied()
            .zip(selected)
            .partition(|&(_, taken)| taken);
        let group: Vec<usize> = taken.into_iter().map(|(i, _)| i).collect();
        trace!(row = groups.len(), size = group.len(), packed = real, "peeled row");

        groups.push(group);
        remaining = rest.into_iter().map(|(i, _)| i).collect();
    }

    groups
}

/// Select the subset of `widths` with the largest sum not exceeding
/// `capacity`. Ties keep entries out: an entry is taken only when including
/// it strictly raises the table value.
pub(crate) fn select_row(widths: &[i32], capacity: i32) -> Vec<bool> {
    let n = widths.len();
    let cap = table_capacity(widths, capacity);
    let stride = cap + 1;
    let mut table = vec![0_i32; (n + 1) * stride];

    for i in 1..=n {
        let w = widths[i - 1].max(0) as usize;
        let (prev, cur) = table.split_at_mut(i * stride);
        let prev = &prev[(i - 1) * stride..];
        let cur = &mut cur[..stride];
        for j in 0..stride {
            cur[j] = if j >= w {
                prev[j].max(prev[j - w] + w as i32)
            } else {
                prev[j]
            };
        }
    }

    let mut selected = vec![false; n];
    let mut v = cap;
    for i in (1..=n).rev() {
        if table[i * stride + v] > table[(i - 1) * stride + v] {
            selected[i - 1] = true;
            v -= widths[i - 1].max(0) as usize;
        }
    }
    selected
}

fn first_fit_decreasing_rows(widths: &[i32], capacity: i32) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..widths.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(widths[i].max(0)));

    // Free space per bin; over-wide bins are closed with `None`.
    let mut free: Vec<Option<i32>> = Vec::new();
    let mut bins: Vec<Vec<usize>> = Vec::new();

    for i in order {
        let w = widths[i].max(0);
        if w > capacity {
            free.push(None);
            bins.push(vec![i]);
            continue;
        }
        match free.iter().position(|f| f.is_some_and(|space| space >= w)) {
            Some(b) => {
                free[b] = free[b].map(|space| space - w);
                bins[b].push(i);
            }
            None => {
                free.push(Some(capacity - w));
                bins.push(vec![i]);
            }
        }
    }

    for bin in &mut bins {
        bin.sort_unstable();
    }
    bins
}
