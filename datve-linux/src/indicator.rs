use gtk4::prelude::*;

use datve_core::ProgressIndicator;

/// Thin progress strip overlaid on the top edge of the web view.
pub struct BarIndicator {
    bar: gtk4::ProgressBar,
}

impl BarIndicator {
    pub fn new() -> Self {
        let bar = gtk4::ProgressBar::new();
        bar.add_css_class("osd");
        bar.add_css_class("page-progress");
        bar.set_valign(gtk4::Align::Start);
        bar.set_hexpand(true);
        bar.set_can_target(false);
        bar.set_visible(false);
        BarIndicator { bar }
    }

    pub fn widget(&self) -> &gtk4::ProgressBar {
        &self.bar
    }
}

impl ProgressIndicator for BarIndicator {
    fn set_visible(&mut self, visible: bool) {
        self.bar.set_visible(visible);
    }

    fn set_progress(&mut self, percent: u8) {
        self.bar.set_fraction(f64::from(percent) / 100.0);
    }
}
