//! Tagged page units

use std::fmt;

/// Function producing the content shown for a selection
pub type RenderFn<S, C> = Box<dyn Fn(&S) -> C>;

/// Content paired with the selection it was rendered for.
///
/// The tag never changes after construction. Content can be re-rendered in
/// place when the render function depends on more than the tag.
pub struct TaggedPage<S, C> {
    tag: S,
    content: C,
}

impl<S, C> TaggedPage<S, C> {
    /// Render a new page for `tag`
    pub fn new(tag: S, render: &dyn Fn(&S) -> C) -> Self {
        let content = render(&tag);
        Self { tag, content }
    }

    /// The selection this page shows
    pub fn tag(&self) -> &S {
        &self.tag
    }

    /// The last rendered content
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Re-render the content, keeping the tag
    pub fn refresh(&mut self, render: &dyn Fn(&S) -> C) {
        self.content = render(&self.tag);
    }
}

impl<S: fmt::Debug, C> fmt::Debug for TaggedPage<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedPage")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}
