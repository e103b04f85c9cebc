//! Day pager demo entry point
//!
//! One page per calendar day. Swipe between days, or move the selection
//! from the side panel and watch the pager slide to it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::{Days, Local, NaiveDate};
use eframe::egui::{self, Context, RichText};
use parking_lot::RwLock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pv_ui::{
    apply_theme, EventLog, PageEvent, PageFn, PageView, PageViewConfig, ScrollAreaExt,
    SelectionBinding, Theme, WidgetId,
};

/// Notes attached to days, shown on their pages
type Notes = Arc<RwLock<HashMap<NaiveDate, String>>>;

/// Number of lifecycle events kept on screen
const EVENT_HISTORY: usize = 40;

/// Main application state
struct DayPagerApp {
    /// Day currently selected, shared with the pager
    selection: SelectionBinding<NaiveDate>,

    /// The pager itself
    pager: PageView<NaiveDate, PageFn>,

    /// Lifecycle events reported by the pager
    events: EventLog<NaiveDate>,

    /// Per-day notes; edits show up on the page without changing selection
    notes: Notes,

    /// Contents of the "go to date" field
    jump_text: String,

    /// Last parse error of the "go to date" field
    jump_error: Option<String>,
}

impl DayPagerApp {
    fn new(cc: &eframe::CreationContext<'_>, config: PageViewConfig) -> Self {
        apply_theme(&cc.egui_ctx, &Theme::default());

        let today = Local::now().date_naive();
        let selection = SelectionBinding::new(today);
        let notes: Notes = Arc::new(RwLock::new(HashMap::new()));
        let events = EventLog::new();

        let page_notes = notes.clone();
        let pager = PageView::new(
            "day_pager",
            selection.clone(),
            previous_day,
            next_day,
            move |day: &NaiveDate| render_day(*day, page_notes.read().get(day).cloned()),
        )
        .with_config(config)
        .with_callbacks(events.callbacks());

        Self {
            selection,
            pager,
            events,
            notes,
            jump_text: today.format("%Y-%m-%d").to_string(),
            jump_error: None,
        }
    }

    /// Selection controls and the event log
    fn side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Selection");
        ui.label(RichText::new(self.selection.get().format("%a %d %b %Y").to_string()).strong());
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("« Week").clicked() {
                self.selection.update(|day| *day = day.checked_sub_days(Days::new(7)).unwrap_or(*day));
            }
            if ui.button("Today").clicked() {
                self.selection.set(Local::now().date_naive());
            }
            if ui.button("Week »").clicked() {
                self.selection.update(|day| *day = day.checked_add_days(Days::new(7)).unwrap_or(*day));
            }
        });

        ui.horizontal(|ui| {
            let field = ui.add(egui::TextEdit::singleline(&mut self.jump_text).desired_width(100.0));
            let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Go").clicked() || submitted {
                match parse_day(&self.jump_text) {
                    Ok(day) => {
                        self.jump_error = None;
                        self.selection.set(day);
                    }
                    Err(err) => {
                        warn!("Rejected date '{}': {}", self.jump_text, err);
                        self.jump_error = Some(err.to_string());
                    }
                }
            }
        });
        if let Some(err) = &self.jump_error {
            ui.colored_label(pv_ui::theme::accent_color(), err);
        }

        ui.separator();
        ui.label("Note for this day");
        let day = self.selection.get();
        let mut note = self.notes.read().get(&day).cloned().unwrap_or_default();
        if ui.text_edit_multiline(&mut note).changed() {
            let mut notes = self.notes.write();
            if note.is_empty() {
                notes.remove(&day);
            } else {
                notes.insert(day, note);
            }
        }

        ui.separator();
        ui.horizontal(|ui| {
            ui.label("Events");
            if ui.small_button("Clear").clicked() {
                self.events.clear();
            }
        });
        egui::ScrollArea::vertical()
            .id_builder(WidgetId::new("day_pager").with("events"))
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for event in self.events.latest(EVENT_HISTORY) {
                    let label = match &event {
                        PageEvent::WillChange(_) => "will change",
                        PageEvent::Changed(_) => "changed",
                    };
                    ui.monospace(format!("{label} → {}", event.tag()));
                }
            });
    }
}

impl eframe::App for DayPagerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Arrow keys move the selection without a gesture
        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowLeft) {
                self.selection.update(|day| *day = previous_day(day));
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                self.selection.update(|day| *day = next_day(day));
            }
        });

        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| self.side_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.pager.ui(ui);
        });
    }
}

fn previous_day(day: &NaiveDate) -> NaiveDate {
    day.pred_opt().unwrap_or(*day)
}

fn next_day(day: &NaiveDate) -> NaiveDate {
    day.succ_opt().unwrap_or(*day)
}

fn parse_day(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .with_context(|| format!("'{}' is not a YYYY-MM-DD date", text.trim()))
}

fn render_day(day: NaiveDate, note: Option<String>) -> PageFn {
    PageFn::new(move |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.heading(day.format("%A").to_string());
            ui.label(RichText::new(day.format("%d %B %Y").to_string()).size(16.0));
            if let Some(note) = &note {
                ui.add_space(12.0);
                ui.label(RichText::new(note).italics());
            }
        });
    })
}

/// Page view configuration from the first argument or `PAGEVIEW_CONFIG`
fn load_config() -> Result<PageViewConfig> {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("PAGEVIEW_CONFIG"))
        .map(PathBuf::from);

    match path {
        Some(path) => {
            info!("Loading page view config from {}", path.display());
            PageViewConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => Ok(PageViewConfig::default()),
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    info!("Starting day pager");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([600.0, 400.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Day Pager",
        options,
        Box::new(move |cc| Box::new(DayPagerApp::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
