//! Content that can be shown on a page

use egui::{RichText, Ui};

/// Something a page can draw
pub trait PageContent {
    /// Draw the content into the page's area
    fn ui(&self, ui: &mut Ui);
}

impl PageContent for String {
    fn ui(&self, ui: &mut Ui) {
        centered(ui, RichText::new(self.as_str()).heading());
    }
}

impl PageContent for &'static str {
    fn ui(&self, ui: &mut Ui) {
        centered(ui, RichText::new(*self).heading());
    }
}

impl PageContent for RichText {
    fn ui(&self, ui: &mut Ui) {
        centered(ui, self.clone());
    }
}

fn centered(ui: &mut Ui, text: RichText) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.4);
        ui.label(text);
    });
}

/// Page content drawn by a closure
pub struct PageFn(Box<dyn Fn(&mut Ui)>);

impl PageFn {
    pub fn new(f: impl Fn(&mut Ui) + 'static) -> Self {
        Self(Box::new(f))
    }
}

impl PageContent for PageFn {
    fn ui(&self, ui: &mut Ui) {
        (self.0)(ui);
    }
}
