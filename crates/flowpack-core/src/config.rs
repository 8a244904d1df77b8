//! Container configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Edges;
use crate::item::Item;

/// How the compressor packs rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressStrategy {
    /// Exact 0/1 knapsack per row over a width-indexed table
    #[default]
    Knapsack,
    /// First-fit decreasing; no table, approximate row assignment
    FirstFitDecreasing,
}

/// Height constraint passed by the host when measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightMode {
    /// Height follows the content
    #[default]
    Wrap,
    /// Height fixed by the host
    Exact(i32),
}

/// Flow container settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Extra vertical gap between rows
    pub row_spacing: i32,
    /// Column count used to size zero-width items (0 = off)
    pub number_of_columns: u32,
    /// Container padding
    pub padding: Edges,
    /// Packing strategy for compression
    pub strategy: CompressStrategy,
}

impl FlowConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set row spacing.
    #[must_use]
    pub const fn with_row_spacing(mut self, spacing: i32) -> Self {
        self.row_spacing = spacing;
        self
    }

    /// Set the column count.
    #[must_use]
    pub const fn with_columns(mut self, columns: u32) -> Self {
        self.number_of_columns = columns;
        self
    }

    /// Set padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Set the compression strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: CompressStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reject negative spacing and padding.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_spacing < 0 {
            return Err(ConfigError::NegativeRowSpacing(self.row_spacing));
        }
        let p = self.padding;
        for (side, value) in [
            ("left", p.left),
            ("top", p.top),
            ("right", p.right),
            ("bottom", p.bottom),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativePadding { side, value });
            }
        }
        Ok(())
    }

    /// Width available to items inside a container of `width`.
    #[must_use]
    pub const fn content_width(&self, width: i32) -> i32 {
        width.saturating_sub(self.padding.horizontal())
    }

    /// Apply column sizing to an item.
    ///
    /// With columns configured, a zero-width item gets one column of the
    /// content width minus its own horizontal margins.
    #[must_use]
    pub const fn resolve_item(&self, item: Item, content_width: i32) -> Item {
        if self.number_of_columns == 0 || item.width != 0 {
            return item;
        }
        let column = content_width / self.number_of_columns as i32;
        item.with_width(column.saturating_sub(item.margin.horizontal()))
    }
}
