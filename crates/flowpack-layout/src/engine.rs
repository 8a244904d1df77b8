//! Flow container: owns an arrangement and runs the layout pipeline on it.

use flowpack_core::{
    strip_blanks, BlankItem, FlowConfig, HeightMode, Item, ItemId, Rect, Size, Slot, Visibility,
};
use tracing::{debug, info};

use crate::align::{plan, Planned};
use crate::cache::LayoutCache;
use crate::compress::packed_order;
use crate::wrap::{count_rows, wrap, Layout, Row};

/// Receives final item positions.
pub trait Renderer {
    /// Position one item's content box.
    fn place(&mut self, id: ItemId, rect: Rect);
}

impl<F> Renderer for F
where
    F: FnMut(ItemId, Rect),
{
    fn place(&mut self, id: ItemId, rect: Rect) {
        self(id, rect);
    }
}

/// A flow container.
///
/// Holds the current arrangement (items, plus spacers after alignment) and
/// the settings. Every pass works on a copy of the arrangement and swaps the
/// result in at the end, so a pass never observes a half-updated sequence.
#[derive(Debug, Clone, Default)]
pub struct FlowLayout {
    config: FlowConfig,
    slots: Vec<Slot>,
    cache: LayoutCache,
}

impl FlowLayout {
    /// Create an empty container.
    #[must_use]
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Builder form of [`FlowLayout::set_items`].
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.set_items(items);
        self
    }

    /// Current settings.
    #[must_use]
    pub const fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Replace the settings.
    pub fn set_config(&mut self, config: FlowConfig) {
        self.config = config;
        self.cache.invalidate();
    }

    /// Replace the arrangement with fresh items, dropping any spacers.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item>) {
        let slots = items
            .into_iter()
            .map(|item| Slot::Item(item.sanitized()))
            .collect();
        self.replace(slots);
    }

    /// Append an item.
    pub fn push(&mut self, item: Item) {
        self.slots.push(Slot::Item(item.sanitized()));
        self.cache.invalidate();
    }

    /// Current arrangement.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Current items in arrangement order, spacers dropped.
    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        strip_blanks(&self.slots)
    }

    /// Owned copy of the arrangement.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Slot> {
        self.slots.clone()
    }

    /// Number of entries, spacers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if there is nothing to lay out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Layout cache statistics.
    #[must_use]
    pub const fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    /// Measure the container at `width`.
    pub fn measure(&mut self, width: i32, mode: HeightMode) -> Size {
        let height = match mode {
            HeightMode::Exact(height) => height,
            HeightMode::Wrap => {
                let padding = self.config.padding;
                padding
                    .top
                    .saturating_add(self.layout(width).content_height)
                    .saturating_add(padding.bottom)
            }
        };
        Size::new(width, height)
    }

    /// Lay out the arrangement in a container of `width`.
    ///
    /// Placements are in container coordinates, padding included.
    pub fn layout(&mut self, width: i32) -> Layout {
        if let Some(hit) = self.cache.get(width) {
            return hit;
        }
        let content_width = self.config.content_width(width);
        let padding = self.config.padding;
        let computed = wrap(
            &self.resolved(content_width),
            content_width,
            self.config.row_spacing,
        )
        .offset(padding.left, padding.top);
        self.cache.insert(width, computed.clone());
        computed
    }

    /// Reorder items to use as few rows as possible. The arrangement is left
    /// in its current order when packing would wrap into more rows.
    ///
    /// Spacers are dropped first. Gone items keep their relative order after
    /// the visible ones.
    pub fn compress(&mut self, width: i32) {
        let content_width = self.config.content_width(width);
        let (visible, gone) = self.partition_items();
        let widths = self.packing_widths(&visible, content_width);

        let order = packed_order(&widths, content_width, self.config.strategy, |_| true);
        info!(
            items = visible.len(),
            rows = count_rows(order.iter().map(|&i| widths[i]), content_width),
            "compressed arrangement"
        );

        let slots = order
            .into_iter()
            .map(|i| Slot::Item(visible[i]))
            .chain(gone.into_iter().map(Slot::Item))
            .collect();
        self.replace(slots);
    }

    /// Insert spacers so every full row spans the content width.
    ///
    /// Spacers from an earlier pass are dropped first, so aligning twice is
    /// the same as aligning once.
    pub fn align(&mut self, width: i32) {
        let content_width = self.config.content_width(width);
        let (visible, gone) = self.partition_items();
        let widths = self.packing_widths(&visible, content_width);

        let slots: Vec<Slot> = plan(&widths, content_width)
            .into_iter()
            .map(|entry| match entry {
                Planned::Entry(i) => Slot::Item(visible[i]),
                Planned::Blank(w) => Slot::Blank(BlankItem::new(w)),
            })
            .chain(gone.into_iter().map(Slot::Item))
            .collect();
        info!(
            items = visible.len(),
            spacers = slots.iter().filter(|s| s.is_blank()).count(),
            "aligned arrangement"
        );
        self.replace(slots);
    }

    /// Compress, then align.
    pub fn compress_and_align(&mut self, width: i32) {
        self.compress(width);
        self.align(width);
    }

    /// Keep only the entries of the first `rows` rows. Returns how many
    /// entries were removed.
    ///
    /// Spacers count as entries. Asking for at least as many rows as there
    /// are keeps everything.
    pub fn keep_rows(&mut self, width: i32, rows: usize) -> usize {
        let layout = self.layout(width);
        if rows >= layout.row_count() {
            return 0;
        }
        let keep: usize = layout.rows.iter().take(rows).map(Row::len).sum();

        let mut kept = Vec::with_capacity(self.slots.len());
        let mut placed = 0;
        for &slot in &self.slots {
            if placed >= keep {
                break;
            }
            if slot.takes_space() {
                placed += 1;
            }
            kept.push(slot);
        }

        let removed = self.slots.len() - kept.len();
        debug!(rows, removed, "truncated arrangement");
        self.replace(kept);
        removed
    }

    /// Change the column count. Item order is preserved; only widths derived
    /// from the column count change.
    pub fn set_number_of_columns(&mut self, columns: u32) {
        self.config.number_of_columns = columns;
        self.cache.invalidate();
    }

    /// Lay out at `width` and hand every visible item to `renderer`.
    /// Returns the number of items placed.
    pub fn render<R>(&mut self, width: i32, renderer: &mut R) -> usize
    where
        R: Renderer + ?Sized,
    {
        let layout = self.layout(width);
        let mut placed = 0;
        for p in layout.placements() {
            if let Slot::Item(item) = p.slot {
                if item.visibility == Visibility::Visible {
                    renderer.place(item.id, p.rect());
                    placed += 1;
                }
            }
        }
        placed
    }

    fn replace(&mut self, slots: Vec<Slot>) {
        self.slots = slots;
        self.cache.invalidate();
    }

    fn partition_items(&self) -> (Vec<Item>, Vec<Item>) {
        strip_blanks(&self.slots)
            .into_iter()
            .partition(Item::takes_space)
    }

    fn packing_widths(&self, items: &[Item], content_width: i32) -> Vec<i32> {
        items
            .iter()
            .map(|&item| self.config.resolve_item(item, content_width).space_width())
            .collect()
    }

    fn resolved(&self, content_width: i32) -> Vec<Slot> {
        self.slots
            .iter()
            .map(|slot| match *slot {
                Slot::Item(item) => Slot::Item(self.config.resolve_item(item, content_width)),
                blank @ Slot::Blank(_) => blank,
            })
            .collect()
    }
}
