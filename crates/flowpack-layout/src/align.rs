//! Row alignment: spread the leftover width of each full row as spacers.

use flowpack_core::{BlankItem, Item, Slot};
use tracing::debug;

/// One entry of an alignment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Planned {
    /// Input entry by index
    Entry(usize),
    /// Spacer of the given width
    Blank(i32),
}

/// Insert spacers between the items of every row that overflowed.
///
/// Each full row gets `(line_width - used) / (len - 1)` pixels between
/// consecutive items; the division remainder is dropped. A row holding a
/// single item, and the trailing row, are left as they are. With
/// `line_width <= 0` every item is its own row and no spacers are inserted.
#[must_use]
pub fn align(items: &[Item], line_width: i32) -> Vec<Slot> {
    let widths: Vec<i32> = items.iter().map(Item::space_width).collect();
    plan(&widths, line_width)
        .into_iter()
        .map(|entry| match entry {
            Planned::Entry(i) => Slot::Item(items[i]),
            Planned::Blank(width) => Slot::Blank(BlankItem::new(width)),
        })
        .collect()
}

pub(crate) fn plan(widths: &[i32], line_width: i32) -> Vec<Planned> {
    if line_width <= 0 {
        // Every entry is a row of its own; nothing to spread.
        return (0..widths.len()).map(Planned::Entry).collect();
    }

    let budget = i64::from(line_width);
    let mut out = Vec::with_capacity(widths.len() * 2);
    let mut row: Vec<usize> = Vec::new();
    let mut line_total: i64 = 0;
    let mut spacers = 0;

    for (i, &width) in widths.iter().enumerate() {
        let width = i64::from(width);
        if line_total + width > budget {
            if !row.is_empty() {
                // The open row fits, so the leftover lies in 0..=line_width.
                let leftover = i32::try_from(budget - line_total).unwrap_or(0);
                spacers += close_row(&mut out, &row, leftover);
                row.clear();
                line_total = 0;
            }
            if width > budget {
                out.push(Planned::Entry(i));
                continue;
            }
        }
        row.push(i);
        line_total += width;
    }
    out.extend(row.into_iter().map(Planned::Entry));

    debug!(entries = widths.len(), spacers, line_width, "aligned rows");
    out
}

fn close_row(out: &mut Vec<Planned>, row: &[usize], leftover: i32) -> usize {
    let gaps = row.len() - 1;
    if gaps == 0 {
        out.push(Planned::Entry(row[0]));
        return 0;
    }
    let each = leftover / gaps as i32;
    for (k, &i) in row.iter().enumerate() {
        out.push(Planned::Entry(i));
        if k < gaps {
            out.push(Planned::Blank(each));
        }
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowpack_core::strip_blanks;

    fn items(widths: &[i32]) -> Vec<Item> {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| Item::new(i as u64, w, 10))
            .collect()
    }

    fn shape(slots: &[Slot]) -> Vec<String> {
        slots
            .iter()
            .map(|s| match s {
                Slot::Item(item) => format!("i{}", item.id.0),
                Slot::Blank(b) => format!("_{}", b.width),
            })
            .collect()
    }

    #[test]
    fn test_align_empty() {
        assert!(align(&[], 100).is_empty());
    }

    #[test]
    fn test_align_full_rows_get_spacers() {
        let out = align(&items(&[30, 30, 30, 30]), 100);
        // Row 0: 30+30+30 = 90, 10 left over two gaps; row 1 is trailing
        assert_eq!(shape(&out), vec!["i0", "_5", "i1", "_5", "i2", "i3"]);
    }

    #[test]
    fn test_align_drops_remainder() {
        let out = align(&items(&[20, 20, 20, 90]), 100);
        // 60 used, 40 left over two gaps
        assert_eq!(shape(&out), vec!["i0", "_20", "i1", "_20", "i2", "i3"]);

        let out = align(&items(&[31, 31, 31, 90]), 100);
        // 7 left over two gaps -> 3 each, 1 pixel lost
        assert_eq!(shape(&out), vec!["i0", "_3", "i1", "_3", "i2", "i3"]);
    }

    #[test]
    fn test_align_single_item_row_untouched() {
        let out = align(&items(&[80, 80, 80]), 100);
        assert_eq!(shape(&out), vec!["i0", "i1", "i2"]);
    }

    #[test]
    fn test_align_oversized_item_alone() {
        let out = align(&items(&[40, 40, 250, 30, 30]), 100);
        assert_eq!(shape(&out), vec!["i0", "_20", "i1", "i2", "i3", "i4"]);
    }

    #[test]
    fn test_align_trailing_row_not_padded() {
        let out = align(&items(&[10, 10, 10]), 100);
        assert_eq!(shape(&out), vec!["i0", "i1", "i2"]);
    }

    #[test]
    fn test_align_exact_fill_inserts_zero_spacers() {
        let out = align(&items(&[50, 50, 10]), 100);
        assert_eq!(shape(&out), vec!["i0", "_0", "i1", "i2"]);
    }

    #[test]
    fn test_align_is_repeatable() {
        let input = items(&[30, 45, 20, 60, 15, 70, 5]);
        let once = align(&input, 100);
        let twice = align(&strip_blanks(&once), 100);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_align_non_positive_width() {
        let out = align(&items(&[10, 20]), 0);
        assert_eq!(shape(&out), vec!["i0", "i1"]);
    }

    #[test]
    fn test_align_zero_budget_inserts_no_spacers() {
        let out = align(&items(&[0, 0, 5]), 0);
        assert_eq!(shape(&out), vec!["i0", "i1", "i2"]);
    }

    #[test]
    fn test_align_huge_widths_do_not_overflow() {
        let out = align(&items(&[1_100_000_000, 1_100_000_000, 5]), i32::MAX);
        assert_eq!(shape(&out), vec!["i0", "i1", "i2"]);

        let out = align(&items(&[1_000_000_000, 1_000_000_000, 1_000_000_000]), i32::MAX);
        // 147_483_647 left over one gap
        assert_eq!(shape(&out), vec!["i0", "_147483647", "i1", "i2"]);
    }
}
