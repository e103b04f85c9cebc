//! Widget utilities for managing IDs and preventing conflicts
//!
//! Every page a pager draws gets its own child `Ui`. Two pages are on screen
//! during a transition, so their IDs are derived from the pager's base ID and
//! the page tag to keep widgets inside them from colliding.

use egui::{Id, ScrollArea};
use std::fmt::{Debug, Display};

/// Widget ID builder that ensures unique IDs by combining multiple components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetId {
    components: Vec<String>,
}

impl WidgetId {
    /// Create a new widget ID builder
    pub fn new(base: impl Display) -> Self {
        Self {
            components: vec![base.to_string()],
        }
    }

    /// Add a component to the ID
    pub fn with(mut self, component: impl Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    /// Build the final ID string
    pub fn build(&self) -> String {
        self.components.join("_")
    }

    /// Create an egui ID from this widget ID
    pub fn id(&self) -> Id {
        Id::new(self.build())
    }
}

/// ID of the child `Ui` a pager draws the page tagged `tag` into
pub fn page_id<S: Debug>(base: &WidgetId, tag: &S) -> Id {
    base.clone().with(format!("page_{tag:?}")).id()
}

/// Extension trait for ScrollArea to easily add unique IDs
pub trait ScrollAreaExt {
    /// Set the ID source using a WidgetId builder
    fn id_builder(self, builder: WidgetId) -> Self;
}

impl ScrollAreaExt for ScrollArea {
    fn id_builder(self, builder: WidgetId) -> Self {
        self.id_source(builder.build())
    }
}
