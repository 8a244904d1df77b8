#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::doc_markdown)]
//! Flow layout for fixed-size items.
//!
//! Items are placed left to right and wrap to a new row when the width
//! budget runs out. Two optional passes run on top of wrapping:
//!
//! - **Compression** ([`compress`]): reorder items with a knapsack packer so
//!   that wrapping needs fewer rows.
//! - **Alignment** ([`align`]): insert blank spacers so each full row spans
//!   the whole width.
//!
//! The passes are independent pure functions over item slices. [`FlowLayout`]
//! wraps them into a stateful container with padding, column sizing, a
//! layout cache, and a [`Renderer`] callback for the host.

mod align;
mod cache;
mod compress;
mod engine;
mod wrap;

pub use align::align;
pub use cache::{LayoutCache, DEFAULT_CAPACITY};
pub use compress::{compress, compress_with, pack_indices, pack_rows, MAX_TABLE_CELLS};
pub use engine::{FlowLayout, Renderer};
pub use wrap::{wrap, Layout, Placement, Row};
