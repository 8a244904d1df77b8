//! Integration tests for flowpack-layout.
//!
//! These tests drive the full pipeline the way a host would: supply items,
//! run optional passes, and collect positions through a renderer.

use flowpack_core::{Edges, FlowConfig, HeightMode, Item, ItemId, Rect, Size, Visibility};
use flowpack_layout::{align, compress, wrap, FlowLayout, Renderer};
use std::collections::BTreeMap;

// =============================================================================
// Test Renderer
// =============================================================================

/// Records every placement by item id.
#[derive(Default)]
struct RecordingRenderer {
    placed: BTreeMap<ItemId, Rect>,
    calls: usize,
}

impl Renderer for RecordingRenderer {
    fn place(&mut self, id: ItemId, rect: Rect) {
        self.placed.insert(id, rect);
        self.calls += 1;
    }
}

fn items(widths: &[i32]) -> Vec<Item> {
    widths
        .iter()
        .enumerate()
        .map(|(i, &w)| Item::new(i as u64, w, 20))
        .collect()
}

fn row_widths(layout: &flowpack_layout::Layout) -> Vec<Vec<i32>> {
    layout
        .rows
        .iter()
        .map(|r| r.placements.iter().map(|p| p.slot.space_width()).collect())
        .collect()
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn test_equal_items_wrap_and_compress_agree() {
    let input = items(&[50, 50, 50, 50]);
    let direct = wrap(&input, 120, 0);
    assert_eq!(row_widths(&direct), vec![vec![50, 50], vec![50, 50]]);

    let compressed = wrap(&compress(&input, 120), 120, 0);
    assert_eq!(row_widths(&compressed), row_widths(&direct));
}

#[test]
fn test_mixed_items_compress_saves_a_row() {
    let input = items(&[30, 90, 40]);
    let direct = wrap(&input, 100, 0);
    assert_eq!(row_widths(&direct), vec![vec![30], vec![90], vec![40]]);

    let compressed = wrap(&compress(&input, 100), 100, 0);
    assert_eq!(row_widths(&compressed), vec![vec![90], vec![30, 40]]);
}

#[test]
fn test_compress_then_align_pipeline() {
    let input = items(&[45, 70, 25, 55, 30, 20]);
    let packed = compress(&input, 100);
    let aligned = align(&packed, 100);
    let layout = wrap(&aligned, 100, 4);

    // Every row except the last spans the full width once spacers are in
    for row in &layout.rows[..layout.row_count() - 1] {
        if row.ids().count() > 1 {
            assert!(row.used_width > 100 - row.ids().count() as i32);
            assert!(row.used_width <= 100);
        }
    }
    assert_eq!(layout.placements().filter(|p| !p.slot.is_blank()).count(), 6);
}

// =============================================================================
// Container
// =============================================================================

#[test]
fn test_container_render_positions() {
    let config = FlowConfig::new()
        .with_padding(Edges::uniform(8))
        .with_row_spacing(4);
    let input = vec![
        Item::new(1, 40, 20).with_margin(Edges::symmetric(2, 1)),
        Item::new(2, 40, 30),
        Item::new(3, 40, 20),
    ];
    let mut flow = FlowLayout::new(config).with_items(input);

    // Content width 100: [1, 2] fit (44 + 40), 3 wraps
    let mut renderer = RecordingRenderer::default();
    let placed = flow.render(116, &mut renderer);
    assert_eq!(placed, 3);
    assert_eq!(renderer.calls, 3);
    assert_eq!(renderer.placed[&ItemId(1)], Rect::new(10, 9, 40, 20));
    assert_eq!(renderer.placed[&ItemId(2)], Rect::new(52, 8, 40, 30));
    assert_eq!(renderer.placed[&ItemId(3)], Rect::new(8, 8 + 30 + 4, 40, 20));

    assert_eq!(
        flow.measure(116, HeightMode::Wrap),
        Size::new(116, 8 + 30 + 4 + 20 + 8)
    );
}

#[test]
fn test_container_compress_align_and_truncate() {
    let mut flow = FlowLayout::default().with_items(items(&[30, 90, 40, 60, 10]));
    assert_eq!(flow.layout(100).row_count(), 4);

    flow.compress_and_align(100);
    let layout = flow.layout(100);
    assert!(layout.row_count() <= 3);

    flow.keep_rows(100, 1);
    let first_row = flow.layout(100);
    assert_eq!(first_row.row_count(), 1);
    assert_eq!(first_row.rows[0].used_width, 100);
}

#[test]
fn test_container_columns_and_gone_items() {
    let config = FlowConfig::new().with_columns(4);
    let input = vec![
        Item::new(1, 0, 10),
        Item::new(2, 0, 10).with_visibility(Visibility::Gone),
        Item::new(3, 0, 10),
        Item::new(4, 0, 10),
        Item::new(5, 0, 10),
        Item::new(6, 0, 10),
    ];
    let mut flow = FlowLayout::new(config).with_items(input);
    let layout = flow.layout(200);
    assert_eq!(layout.row_sizes(), vec![4, 1]);
    assert!(layout.find(ItemId(2)).is_none());
    assert_eq!(layout.find(ItemId(6)).unwrap().rect(), Rect::new(0, 10, 50, 10));
}

#[test]
fn test_container_degenerate_width() {
    let mut flow = FlowLayout::default().with_items(items(&[10, 0, 30]));
    // A non-positive budget puts every item on its own row
    assert_eq!(flow.layout(0).row_count(), 3);
    flow.compress(0);
    flow.align(0);
    assert_eq!(flow.items().len(), 3);
    assert_eq!(flow.layout(-20).row_count(), 3);
}

#[test]
fn test_container_json_roundtrip_of_layout() {
    let mut flow = FlowLayout::default().with_items(items(&[60, 60]));
    let layout = flow.layout(100);
    let json = serde_json::to_string(&layout).unwrap();
    let back: flowpack_layout::Layout = serde_json::from_str(&json).unwrap();
    assert_eq!(back, layout);
}
