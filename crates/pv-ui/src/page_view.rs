//! Swipeable page view widget
//!
//! Shows the page for the current selection and lets the user drag
//! horizontally to the neighbouring pages. Writes to the selection binding
//! made elsewhere in the application are picked up on the next frame and
//! animated as a slide in the matching direction.

use std::fmt::Display;

use egui::{Align, Align2, FontId, Layout, Rect, Response, Rounding, Sense, Ui, Vec2};
use pv_core::{
    Direction, Navigator, PageCallbacks, PageContainer, PageStack, PagingCoordinator, Selection,
    SelectionBinding, TaggedPage,
};
use tracing::{debug, warn};

use crate::config::PageViewConfig;
use crate::content::PageContent;
use crate::theme;
use crate::widget_utils::{page_id, WidgetId};

/// Time a page takes to slide fully in or out
const SLIDE_SECONDS: f32 = 0.25;

/// Frames longer than this are treated as this long so a stall does not
/// skip an animation
const MAX_FRAME_DT: f32 = 0.1;

/// An interactive drag in progress
#[derive(Debug, Default)]
struct SwipeGesture {
    /// Horizontal displacement of the displayed page
    offset: f32,
    /// Chosen once the drag passes the slop distance
    direction: Option<Direction>,
    /// Set on release: whether the swipe commits
    release: Option<bool>,
}

/// Paged content widget
pub struct PageView<S, C> {
    /// Coordinator owning the pages
    coordinator: PagingCoordinator<S, C, PageStack<S, C>>,

    /// Widget configuration
    config: PageViewConfig,

    /// Base ID for the page child UIs
    id: WidgetId,

    /// Drag in progress
    gesture: Option<SwipeGesture>,

    /// Progress of the programmatic slide in flight, from 0 to 1
    slide_progress: f32,
}

impl<S, C> PageView<S, C>
where
    S: Selection,
    C: PageContent,
{
    /// Create a page view.
    ///
    /// `previous` and `next` compute the neighbouring selections and
    /// `render` produces the content for any selection. The page for the
    /// binding's current value is shown first.
    pub fn new(
        id_source: impl Display,
        selection: SelectionBinding<S>,
        previous: impl Fn(&S) -> S + 'static,
        next: impl Fn(&S) -> S + 'static,
        render: impl Fn(&S) -> C + 'static,
    ) -> Self {
        let coordinator = PagingCoordinator::new(
            selection,
            Navigator::new(previous, next),
            render,
            PageStack::new(),
        );

        Self {
            coordinator,
            config: PageViewConfig::default(),
            id: WidgetId::new(id_source),
            gesture: None,
            slide_progress: 0.0,
        }
    }

    /// Set configuration
    pub fn with_config(mut self, config: PageViewConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the lifecycle callbacks
    pub fn with_callbacks(mut self, callbacks: PageCallbacks<S>) -> Self {
        self.coordinator = self.coordinator.with_callbacks(callbacks);
        self
    }

    /// Called with the incoming page's selection when a transition starts
    pub fn on_page_will_change(mut self, f: impl FnMut(&S) + 'static) -> Self {
        self.coordinator = self.coordinator.on_page_will_change(f);
        self
    }

    /// Called with the new selection once a transition is committed
    pub fn on_page_changed(mut self, f: impl FnMut(&S) + 'static) -> Self {
        self.coordinator = self.coordinator.on_page_changed(f);
        self
    }

    pub fn config(&self) -> &PageViewConfig {
        &self.config
    }

    /// The coordinator driving this view
    pub fn coordinator(&self) -> &PagingCoordinator<S, C, PageStack<S, C>> {
        &self.coordinator
    }

    /// Whether a swipe, slide or jump is still running
    pub fn is_animating(&self) -> bool {
        self.gesture.is_some() || !self.coordinator.is_settled()
    }

    /// Show the page view, filling the available space
    pub fn ui(&mut self, ui: &mut Ui) -> Response {
        let size = Vec2::new(
            ui.available_width(),
            ui.available_height().max(self.config.min_height),
        );
        let (rect, response) = ui.allocate_exact_size(size, Sense::drag());

        self.coordinator.reconcile();
        self.coordinator.run_pending();

        let dt = ui.input(|i| i.stable_dt).clamp(0.0, MAX_FRAME_DT);
        if rect.width() > 0.0 {
            self.handle_gesture(ui, &response, rect.width(), dt);
        }
        self.advance_slide(dt);

        self.paint(ui, rect);

        if self.is_animating() {
            ui.ctx().request_repaint();
        }
        response
    }

    fn handle_gesture(&mut self, ui: &Ui, response: &Response, width: f32, dt: f32) {
        if self.gesture.is_none()
            && response.dragged()
            && self.coordinator.is_idle()
            && !self.coordinator.container().is_animating()
        {
            self.gesture = Some(SwipeGesture::default());
        }
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };

        if gesture.release.is_none() {
            gesture.offset += response.drag_delta().x;

            if gesture.direction.is_none() && gesture.offset.abs() > self.config.drag_slop {
                // Dragging the page left reveals the next one
                let direction = if gesture.offset < 0.0 {
                    Direction::Forward
                } else {
                    Direction::Reverse
                };
                match self.coordinator.begin_swipe(direction) {
                    Ok(()) => gesture.direction = Some(direction),
                    Err(err) => {
                        debug!(%err, "Swipe refused");
                        self.gesture = None;
                        return;
                    }
                }
            }

            if let Some(direction) = gesture.direction {
                gesture.offset = match direction {
                    Direction::Forward => gesture.offset.clamp(-width, 0.0),
                    Direction::Reverse => gesture.offset.clamp(0.0, width),
                };
            }

            let released =
                response.drag_released() || !ui.input(|i| i.pointer.primary_down());
            if released {
                let Some(direction) = gesture.direction else {
                    self.gesture = None;
                    return;
                };
                let velocity = ui.input(|i| i.pointer.velocity().x);
                let travelled = gesture.offset.abs() / width;
                let commit = commits_on_release(&self.config, direction, travelled, velocity);
                debug!(travelled, velocity, commit, "Swipe released");
                gesture.release = Some(commit);
            }
        }

        if let (Some(commit), Some(direction)) = (gesture.release, gesture.direction) {
            let target = if commit { -direction.sign() * width } else { 0.0 };
            let step = width / SLIDE_SECONDS * dt;
            gesture.offset = approach(gesture.offset, target, step);

            if (gesture.offset - target).abs() < 0.5 {
                self.gesture = None;
                if let Err(err) = self.coordinator.finish_swipe(commit) {
                    warn!(%err, "Swipe could not be finished");
                }
            }
        }
    }

    fn advance_slide(&mut self, dt: f32) {
        if !self.coordinator.container().is_animating() {
            self.slide_progress = 0.0;
            return;
        }
        self.slide_progress = (self.slide_progress + dt / SLIDE_SECONDS).min(1.0);
        if self.slide_progress >= 1.0 {
            self.slide_progress = 0.0;
            self.coordinator.container_mut().settle();
        }
    }

    fn paint(&self, ui: &mut Ui, rect: Rect) {
        let visuals = ui.visuals().clone();
        ui.painter_at(rect)
            .rect_filled(rect, Rounding::same(4.0), theme::page_background(&visuals));

        let stack = self.coordinator.container();
        let width = rect.width();

        if let Some((pending, direction)) = stack.pending() {
            let offset = self.gesture.as_ref().map_or(0.0, |g| g.offset);
            if let Some(displayed) = stack.displayed() {
                self.paint_page(ui, rect, displayed, offset);
            }
            self.paint_page(ui, rect, pending, offset + direction.sign() * width);
        } else if let (Some(outgoing), Some(direction)) =
            (stack.outgoing(), stack.animation_direction())
        {
            let shift = ease_out(self.slide_progress) * width;
            self.paint_page(ui, rect, outgoing, -direction.sign() * shift);
            if let Some(displayed) = stack.displayed() {
                self.paint_page(ui, rect, displayed, direction.sign() * (width - shift));
            }
        } else if let Some(displayed) = stack.displayed() {
            self.paint_page(ui, rect, displayed, 0.0);
        }

        if self.config.show_indicator {
            self.paint_indicator(ui, rect, &visuals);
        }
    }

    fn paint_page(&self, ui: &mut Ui, clip: Rect, page: &TaggedPage<S, C>, dx: f32) {
        let page_rect = clip.translate(Vec2::new(dx, 0.0));
        if !page_rect.intersects(clip) {
            return;
        }

        let mut child = ui.child_ui_with_id_source(
            page_rect,
            Layout::top_down(Align::Center),
            page_id(&self.id, page.tag()),
        );
        child.set_clip_rect(clip.intersect(ui.clip_rect()));
        page.content().ui(&mut child);
    }

    fn paint_indicator(&self, ui: &Ui, rect: Rect, visuals: &egui::Visuals) {
        let painter = ui.painter_at(rect);
        let swiping = self.gesture.as_ref().and_then(|g| g.direction);
        let font = FontId::proportional(20.0);

        for (direction, glyph, anchor, align) in [
            (Direction::Reverse, "‹", rect.left_center() + Vec2::new(10.0, 0.0), Align2::LEFT_CENTER),
            (Direction::Forward, "›", rect.right_center() - Vec2::new(10.0, 0.0), Align2::RIGHT_CENTER),
        ] {
            let color = theme::indicator_color(visuals, swiping == Some(direction));
            painter.text(anchor, align, glyph, font.clone(), color);
        }
    }
}

/// Move `value` towards `target` by at most `step`
fn approach(value: f32, target: f32, step: f32) -> f32 {
    if (target - value).abs() <= step {
        target
    } else {
        value + step.copysign(target - value)
    }
}

/// Whether a swipe released after `travelled` widths at `velocity` commits.
///
/// A fling back towards the start cancels even past the commit fraction.
fn commits_on_release(
    config: &PageViewConfig,
    direction: Direction,
    travelled: f32,
    velocity: f32,
) -> bool {
    // Pages slide opposite to the direction they come from
    let toward = -direction.sign() * velocity;
    let back = -direction.flipped().sign() * velocity;
    if back > config.fling_velocity {
        return false;
    }
    travelled >= config.commit_fraction || toward > config.fling_velocity
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}
