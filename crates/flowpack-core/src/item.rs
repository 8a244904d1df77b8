//! Layout items: caller-owned rectangles and the spacers the aligner inserts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{Edges, Size};

/// Opaque handle to a caller-owned element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether an item takes part in layout and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Laid out and drawn
    #[default]
    Visible,
    /// Laid out but not drawn
    Invisible,
    /// Takes no space at all
    Gone,
}

/// A fixed-size rectangle with margins.
///
/// All dimensions are clamped to be non-negative on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Handle back to the host element
    pub id: ItemId,
    /// Content width
    #[serde(default)]
    pub width: i32,
    /// Content height
    #[serde(default)]
    pub height: i32,
    /// Outer margins
    #[serde(default)]
    pub margin: Edges,
    /// Visibility
    #[serde(default)]
    pub visibility: Visibility,
}

impl Item {
    /// Create a visible item without margins.
    #[must_use]
    pub const fn new(id: u64, width: i32, height: i32) -> Self {
        Self {
            id: ItemId(id),
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
            margin: Edges::ZERO,
            visibility: Visibility::Visible,
        }
    }

    /// Set the margins.
    #[must_use]
    pub const fn with_margin(mut self, margin: Edges) -> Self {
        self.margin = margin.non_negative();
        self
    }

    /// Set the visibility.
    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set the content width.
    #[must_use]
    pub const fn with_width(mut self, width: i32) -> Self {
        self.width = if width < 0 { 0 } else { width };
        self
    }

    /// Content size without margins.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Horizontal space taken in a row, margins included.
    #[must_use]
    pub const fn space_width(&self) -> i32 {
        self.width.saturating_add(self.margin.horizontal())
    }

    /// Vertical space taken in a row, margins included.
    #[must_use]
    pub const fn space_height(&self) -> i32 {
        self.height.saturating_add(self.margin.vertical())
    }

    /// True unless the item is `Gone`.
    #[must_use]
    pub const fn takes_space(&self) -> bool {
        !matches!(self.visibility, Visibility::Gone)
    }

    /// Copy with negative dimensions raised to zero.
    ///
    /// Deserialized items bypass the constructors, so hosts loading items
    /// from data should pass them through here.
    #[must_use]
    pub const fn sanitized(self) -> Self {
        Self {
            id: self.id,
            width: if self.width < 0 { 0 } else { self.width },
            height: if self.height < 0 { 0 } else { self.height },
            margin: self.margin.non_negative(),
            visibility: self.visibility,
        }
    }
}

/// Zero-height spacer produced by alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlankItem {
    /// Spacer width
    pub width: i32,
}

impl BlankItem {
    /// Create a spacer.
    #[must_use]
    pub const fn new(width: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
        }
    }
}

/// An entry of an arrangement: a real item or an alignment spacer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slot {
    /// Caller-owned item
    Item(Item),
    /// Spacer inserted by alignment
    Blank(BlankItem),
}

impl Slot {
    /// Horizontal space taken in a row.
    #[must_use]
    pub const fn space_width(&self) -> i32 {
        match self {
            Self::Item(item) => item.space_width(),
            Self::Blank(blank) => blank.width,
        }
    }

    /// Vertical space taken in a row. Spacers have none.
    #[must_use]
    pub const fn space_height(&self) -> i32 {
        match self {
            Self::Item(item) => item.space_height(),
            Self::Blank(_) => 0,
        }
    }

    /// Left and top margins.
    #[must_use]
    pub const fn margin(&self) -> Edges {
        match self {
            Self::Item(item) => item.margin,
            Self::Blank(_) => Edges::ZERO,
        }
    }

    /// Content size, margins excluded.
    #[must_use]
    pub const fn size(&self) -> Size {
        match self {
            Self::Item(item) => item.size(),
            Self::Blank(blank) => Size::new(blank.width, 0),
        }
    }

    /// False only for gone items.
    #[must_use]
    pub const fn takes_space(&self) -> bool {
        match self {
            Self::Item(item) => item.takes_space(),
            Self::Blank(_) => true,
        }
    }

    /// The wrapped item, if this is not a spacer.
    #[must_use]
    pub const fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(item) => Some(item),
            Self::Blank(_) => None,
        }
    }

    /// True for alignment spacers.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }
}

impl From<Item> for Slot {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

impl From<BlankItem> for Slot {
    fn from(blank: BlankItem) -> Self {
        Self::Blank(blank)
    }
}

/// Drop spacers, keeping items in order.
#[must_use]
pub fn strip_blanks(slots: &[Slot]) -> Vec<Item> {
    slots.iter().filter_map(Slot::as_item).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_new_clamps_negative() {
        let item = Item::new(1, -5, -1);
        assert_eq!(item.width, 0);
        assert_eq!(item.height, 0);
    }

    #[test]
    fn test_item_space_includes_margins() {
        let item = Item::new(1, 40, 20).with_margin(Edges::new(2, 3, 4, 5));
        assert_eq!(item.space_width(), 46);
        assert_eq!(item.space_height(), 28);
    }

    #[test]
    fn test_item_negative_margin_clamped() {
        let item = Item::new(1, 10, 10).with_margin(Edges::new(-3, 0, 2, 0));
        assert_eq!(item.space_width(), 12);
    }

    #[test]
    fn test_item_gone_takes_no_space() {
        assert!(Item::new(1, 10, 10).takes_space());
        assert!(Item::new(1, 10, 10)
            .with_visibility(Visibility::Invisible)
            .takes_space());
        assert!(!Item::new(1, 10, 10)
            .with_visibility(Visibility::Gone)
            .takes_space());
    }

    #[test]
    fn test_item_sanitized() {
        let raw = Item {
            id: ItemId(9),
            width: -4,
            height: 7,
            margin: Edges::new(-1, -1, 3, 0),
            visibility: Visibility::Visible,
        };
        let item = raw.sanitized();
        assert_eq!(item.width, 0);
        assert_eq!(item.height, 7);
        assert_eq!(item.margin, Edges::new(0, 0, 3, 0));
    }

    #[test]
    fn test_slot_blank_has_no_height() {
        let slot = Slot::from(BlankItem::new(12));
        assert_eq!(slot.space_width(), 12);
        assert_eq!(slot.space_height(), 0);
        assert!(slot.is_blank());
        assert!(slot.as_item().is_none());
    }

    #[test]
    fn test_strip_blanks_keeps_order() {
        let slots = vec![
            Slot::from(Item::new(1, 10, 10)),
            Slot::from(BlankItem::new(5)),
            Slot::from(Item::new(2, 10, 10)),
        ];
        let items = strip_blanks(&slots);
        let ids: Vec<u64> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId(42).to_string(), "#42");
    }

    #[test]
    fn test_item_deserialize_defaults() {
        let item: Item = serde_json::from_str(r#"{"id": 3, "width": 10}"#).unwrap();
        assert_eq!(item.id, ItemId(3));
        assert_eq!(item.height, 0);
        assert_eq!(item.margin, Edges::ZERO);
        assert_eq!(item.visibility, Visibility::Visible);
    }

    #[test]
    fn test_slot_serde_tagged() {
        let json = serde_json::to_string(&Slot::Blank(BlankItem::new(4))).unwrap();
        assert!(json.contains("\"kind\":\"blank\""));
        let back: Slot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Slot::Blank(BlankItem::new(4)));
    }

    #[test]
    fn test_item_space_width_saturates() {
        let item = Item::new(0, i32::MAX, 1).with_margin(Edges::symmetric(5, 0));
        assert_eq!(item.space_width(), i32::MAX);
        let tall = Item::new(0, 1, i32::MAX).with_margin(Edges::symmetric(0, 5));
        assert_eq!(tall.space_height(), i32::MAX);
    }

    // =========================================================================
    // Property tests
    // =========================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_raw_item() -> impl Strategy<Value = Item> {
            (any::<i32>(), any::<i32>(), any::<[i32; 4]>()).prop_map(|(width, height, m)| Item {
                id: ItemId(0),
                width,
                height,
                margin: Edges::new(m[0], m[1], m[2], m[3]),
                visibility: Visibility::Visible,
            })
        }

        proptest! {
            #[test]
            fn prop_sanitized_is_non_negative(raw in arb_raw_item()) {
                let item = raw.sanitized();
                prop_assert!(item.width >= 0 && item.height >= 0);
                prop_assert!(item.space_width() >= 0);
                prop_assert!(item.space_height() >= 0);
            }

            #[test]
            fn prop_sanitized_is_idempotent(raw in arb_raw_item()) {
                let once = raw.sanitized();
                prop_assert_eq!(once.sanitized(), once);
            }

            #[test]
            fn prop_space_width_covers_content(raw in arb_raw_item()) {
                let item = raw.sanitized();
                prop_assert!(item.space_width() >= item.width);
                prop_assert!(item.space_height() >= item.height);
            }
        }
    }
}
