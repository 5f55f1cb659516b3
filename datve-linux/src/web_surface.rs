use gtk4::glib;
use gtk4::prelude::*;
use url::Url;
use webkit6::prelude::*;

use datve_core::{BrowserSurface, CacheMode, ShellError, SurfaceSettings};

/// `BrowserSurface` backed by a WebKitGTK web view.
///
/// Signal handlers connected by the window are recorded here so that
/// `release` can disconnect them before the web process is terminated.
pub struct WebKitSurface {
    webview: Option<webkit6::WebView>,
    handlers: Vec<glib::SignalHandlerId>,
}

impl WebKitSurface {
    pub fn new() -> Self {
        let webview = webkit6::WebView::builder()
            .hexpand(true)
            .vexpand(true)
            .build();
        WebKitSurface {
            webview: Some(webview),
            handlers: Vec::new(),
        }
    }

    pub fn webview(&self) -> Option<&webkit6::WebView> {
        self.webview.as_ref()
    }

    pub fn track_handler(&mut self, id: glib::SignalHandlerId) {
        self.handlers.push(id);
    }

    fn require_webview(&self) -> Result<&webkit6::WebView, ShellError> {
        self.webview
            .as_ref()
            .ok_or_else(|| ShellError::SurfaceUnavailable("web view already released".to_string()))
    }
}

impl BrowserSurface for WebKitSurface {
    fn is_available(&self) -> bool {
        self.webview.is_some()
    }

    fn configure(&mut self, settings: &SurfaceSettings) -> Result<(), ShellError> {
        let webview = self.require_webview()?;
        let wk_settings = webkit6::prelude::WebViewExt::settings(webview).ok_or_else(|| {
            ShellError::SurfaceUnavailable("web view has no settings object".to_string())
        })?;

        wk_settings.set_enable_javascript(settings.script_execution_enabled);
        wk_settings.set_enable_html5_local_storage(settings.local_storage_enabled);
        // Older engines expose a separate switch for database storage; newer
        // ones always enable IndexedDB.
        if wk_settings.find_property("enable-html5-database").is_some() {
            wk_settings.set_property("enable-html5-database", settings.structured_storage_enabled);
        }

        if settings.viewport_adaptive_layout {
            webview.set_hexpand(true);
            webview.set_vexpand(true);
            wk_settings.set_zoom_text_only(false);
        }

        let cache_model = match settings.cache_mode {
            CacheMode::PreferCacheThenNetwork => Some(webkit6::CacheModel::WebBrowser),
            CacheMode::NetworkOnly => Some(webkit6::CacheModel::DocumentViewer),
            CacheMode::Default => None,
        };
        if let (Some(model), Some(context)) =
            (cache_model, webkit6::prelude::WebViewExt::context(webview))
        {
            context.set_cache_model(model);
        }

        log::debug!("Configured web view: {:?}", settings);
        Ok(())
    }

    fn load_url(&mut self, url: &Url) {
        if let Some(webview) = &self.webview {
            webview.load_uri(url.as_str());
        }
    }

    fn can_go_back(&self) -> bool {
        self.webview.as_ref().is_some_and(|wv| wv.can_go_back())
    }

    fn go_back(&mut self) {
        if let Some(webview) = &self.webview {
            webview.go_back();
        }
    }

    fn release(&mut self) {
        let Some(webview) = self.webview.take() else {
            return;
        };
        for id in self.handlers.drain(..) {
            webview.disconnect(id);
        }
        webview.terminate_web_process();
    }
}
