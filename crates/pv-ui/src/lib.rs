//! egui front end for the paged content control
//!
//! This crate provides the [`PageView`] widget, which shows one page at a
//! time, recognises horizontal swipes, and keeps a [`SelectionBinding`]
//! in sync with the page on screen.

pub mod config;
pub mod content;
pub mod page_view;
pub mod theme;
pub mod widget_utils;

/// Re-export commonly used types
pub use config::{ConfigError, PageViewConfig};
pub use content::{PageContent, PageFn};
pub use page_view::PageView;
pub use theme::{Theme, apply_theme};
pub use widget_utils::{WidgetId, ScrollAreaExt, page_id};

pub use pv_core::{Direction, EventLog, PageCallbacks, PageEvent, SelectionBinding};
