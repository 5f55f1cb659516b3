use url::Url;

use crate::error::ShellError;
use crate::surface::{BrowserSurface, ProgressIndicator, SurfaceSettings};
use crate::util;

/// Loading state of the hosted page.
///
/// `can_go_back` is deliberately absent: history belongs to the browser
/// surface and is queried on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub target_url: Url,
    pub is_loading: bool,
    /// Last reported progress, 0..=100.
    pub progress: u8,
}

impl NavigationState {
    fn new(target_url: Url) -> Self {
        NavigationState {
            target_url,
            is_loading: false,
            progress: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Active,
    Released,
}

/// Mediates between browser surface signals and the loading indicator, and
/// decides what a back request does.
///
/// All methods run on the UI thread. Visibility of the indicator is a pure
/// function of the last signal handled, so duplicate or out-of-order
/// delivery of started/finished/progress signals is harmless.
pub struct NavigationController<S: BrowserSurface, I: ProgressIndicator> {
    surface: S,
    indicator: I,
    settings: SurfaceSettings,
    state: Option<NavigationState>,
    phase: Phase,
}

impl<S: BrowserSurface, I: ProgressIndicator> NavigationController<S, I> {
    pub fn new(surface: S, indicator: I) -> Self {
        Self::with_settings(surface, indicator, SurfaceSettings::default())
    }

    pub fn with_settings(surface: S, indicator: I, settings: SurfaceSettings) -> Self {
        NavigationController {
            surface,
            indicator,
            settings,
            state: None,
            phase: Phase::Idle,
        }
    }

    /// Configure the surface and issue the initial load of `target_url`.
    ///
    /// The navigation-started signal arrives asynchronously after this
    /// returns.
    pub fn initialize(&mut self, target_url: &str) -> Result<(), ShellError> {
        if self.phase == Phase::Released {
            return Err(ShellError::SurfaceUnavailable(
                "surface was already released".to_string(),
            ));
        }
        if !self.surface.is_available() {
            return Err(ShellError::SurfaceUnavailable(
                "no native browser handle".to_string(),
            ));
        }
        let url = util::parse_target_url(target_url)?;

        self.surface.configure(&self.settings)?;
        self.indicator.set_visible(false);
        log::info!("Loading {}", url);
        self.surface.load_url(&url);

        self.state = Some(NavigationState::new(url));
        self.phase = Phase::Active;
        Ok(())
    }

    pub fn on_navigation_started(&mut self) {
        self.apply_progress(0);
    }

    pub fn on_navigation_finished(&mut self) {
        self.apply_progress(100);
    }

    pub fn on_progress_changed(&mut self, percent: u8) {
        self.apply_progress(percent.min(100));
    }

    fn apply_progress(&mut self, percent: u8) {
        if self.phase != Phase::Active {
            log::debug!("Ignoring navigation signal ({}%) outside active phase", percent);
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let loading = percent < 100;
        state.is_loading = loading;
        state.progress = percent;
        self.indicator.set_progress(percent);
        self.indicator.set_visible(loading);
    }

    /// Returns `true` when the request was consumed by in-page history.
    /// On `false` the host closes the view.
    pub fn on_back_requested(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        if self.surface.can_go_back() {
            log::debug!("Back request handled by surface history");
            self.surface.go_back();
            true
        } else {
            false
        }
    }

    /// Release the browser surface. Safe to call in any phase, any number
    /// of times; also invoked on drop.
    pub fn teardown(&mut self) {
        if self.phase == Phase::Released {
            return;
        }
        if self.phase == Phase::Active {
            self.indicator.set_visible(false);
        }
        self.surface.release();
        self.state = None;
        self.phase = Phase::Released;
        log::debug!("Browser surface released");
    }

    pub fn state(&self) -> Option<&NavigationState> {
        self.state.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.is_loading)
    }

    pub fn is_released(&self) -> bool {
        self.phase == Phase::Released
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for the host to attach listener bookkeeping to the
    /// surface before the first signal arrives.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }
}

impl<S: BrowserSurface, I: ProgressIndicator> Drop for NavigationController<S, I> {
    fn drop(&mut self) {
        self.teardown();
    }
}
