//! Binding reconciliation loop

use tracing::{debug, trace};

use super::PagingCoordinator;
use crate::container::PageContainer;
use crate::selection::Selection;

impl<S, C, K> PagingCoordinator<S, C, K>
where
    S: Selection,
    K: PageContainer<S, C>,
{
    /// Bring the pager in line with the binding.
    ///
    /// Called once per update cycle of the host. Re-renders the displayed
    /// page, then jumps if the application moved the binding to a selection
    /// the pager is neither showing nor heading to. Swipes never go through
    /// here; they write the binding themselves.
    pub fn reconcile(&mut self) {
        let Some(page) = self.container.displayed_mut() else {
            trace!("Nothing displayed, skipping reconcile");
            return;
        };
        page.refresh(&*self.render);

        let selection = self.binding.get();
        match self.shown_tag() {
            Some(shown) if shown != selection => {
                debug!(shown = ?shown, selection = ?selection, "Binding changed externally");
                self.jump_to(selection);
            }
            _ => {}
        }
    }
}
