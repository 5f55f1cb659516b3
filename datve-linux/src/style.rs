const CSS: &str = r#"
    /* --- Page load indicator --- */
    progressbar.page-progress trough,
    progressbar.page-progress progress {
        min-height: 3px;
        border-radius: 0;
    }
    progressbar.page-progress trough {
        background: transparent;
    }
"#;

pub fn load_css() -> Option<gtk4::CssProvider> {
    let Some(display) = gtk4::gdk::Display::default() else {
        log::warn!("No default display; skipping stylesheet");
        return None;
    };
    let provider = gtk4::CssProvider::new();
    provider.load_from_string(CSS);
    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
    Some(provider)
}
