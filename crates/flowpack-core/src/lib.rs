#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Core types for the flowpack layout kernel.
//!
//! This crate provides the data every layout pass works on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Edges`]
//! - Items and spacers: [`Item`], [`BlankItem`], [`Slot`]
//! - Container settings: [`FlowConfig`] with [`CompressStrategy`] and [`HeightMode`]

mod config;
mod error;
mod geometry;
mod item;

pub use config::{CompressStrategy, FlowConfig, HeightMode};
pub use error::ConfigError;
pub use geometry::{Edges, Point, Rect, Size};
pub use item::{strip_blanks, BlankItem, Item, ItemId, Slot, Visibility};
