use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;
use webkit6::prelude::*;

use std::cell::RefCell;
use std::rc::Rc;

use datve_core::keybindings::{self, ParsedAccel};
use datve_core::settings::{self, Settings};
use datve_core::{util, NavigationController};

use crate::indicator::BarIndicator;
use crate::web_surface::WebKitSurface;

type Controller = NavigationController<WebKitSurface, BarIndicator>;
type SharedController = Rc<RefCell<Controller>>;

/// Mouse button 8 is "back" on most mice.
const MOUSE_BACK_BUTTON: u32 = 8;

pub fn build_window(app: &adw::Application) {
    let settings = Rc::new(RefCell::new(settings::load()));

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Datve")
        .default_width(settings.borrow().window_width)
        .default_height(settings.borrow().window_height)
        .build();
    if settings.borrow().maximized {
        window.maximize();
    }

    let surface = WebKitSurface::new();
    let Some(webview) = surface.webview().cloned() else {
        log::error!("Web view could not be created");
        window.destroy();
        return;
    };
    let indicator = BarIndicator::new();

    let overlay = gtk4::Overlay::new();
    overlay.set_child(Some(&webview));
    overlay.add_overlay(indicator.widget());

    let toolbar_view = adw::ToolbarView::new();
    toolbar_view.add_top_bar(&adw::HeaderBar::new());
    toolbar_view.set_content(Some(&overlay));
    window.set_content(Some(&toolbar_view));

    let surface_settings = settings.borrow().surface.clone();
    let controller: SharedController = Rc::new(RefCell::new(NavigationController::with_settings(
        surface,
        indicator,
        surface_settings,
    )));

    connect_navigation_signals(&webview, &window, &controller);

    let initialized = controller.borrow_mut().initialize(datve_core::TARGET_URL);
    if let Err(e) = initialized {
        log::error!("Failed to initialize browser view: {}", e);
        controller.borrow_mut().teardown();
        window.destroy();
        return;
    }

    setup_back_input(&window, &controller, &settings.borrow());
    setup_close_handler(&window, &controller, &settings);

    window.present();
}

/// Run `f` against the controller now, or on the next idle if a handler
/// further up the stack already holds it.
fn dispatch<F>(controller: &SharedController, f: F)
where
    F: FnOnce(&mut Controller) + 'static,
{
    match controller.try_borrow_mut() {
        Ok(mut c) => f(&mut *c),
        Err(_) => {
            let weak = Rc::downgrade(controller);
            glib::idle_add_local_once(move || {
                if let Some(controller) = weak.upgrade() {
                    f(&mut *controller.borrow_mut());
                }
            });
        }
    }
}

fn connect_navigation_signals(
    webview: &webkit6::WebView,
    window: &adw::ApplicationWindow,
    controller: &SharedController,
) {
    let weak = Rc::downgrade(controller);
    let load_changed = webview.connect_load_changed(move |_, event| {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        match event {
            webkit6::LoadEvent::Started => {
                dispatch(&controller, |c| c.on_navigation_started());
            }
            webkit6::LoadEvent::Finished => {
                dispatch(&controller, |c| c.on_navigation_finished());
            }
            _ => {}
        }
    });

    let weak = Rc::downgrade(controller);
    let progress = webview.connect_estimated_load_progress_notify(move |wv| {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        let percent = util::fraction_to_percent(wv.estimated_load_progress());
        dispatch(&controller, move |c| c.on_progress_changed(percent));
    });

    // The engine shows its own error page and still emits Finished.
    let load_failed = webview.connect_load_failed(|_, _, uri, err| {
        log::warn!("Failed to load {}: {}", uri, err);
        false
    });

    let title = webview.connect_title_notify(glib::clone!(
        #[weak]
        window,
        move |wv| {
            let title = wv.title().filter(|t| !t.is_empty());
            window.set_title(Some(title.as_deref().unwrap_or("Datve")));
        }
    ));

    let mut c = controller.borrow_mut();
    let surface = c.surface_mut();
    for id in [load_changed, progress, load_failed, title] {
        surface.track_handler(id);
    }
}

/// Ask the page to go back; close the window when there is no history.
fn request_back(controller: &SharedController, window: &adw::ApplicationWindow) {
    let handled = match controller.try_borrow_mut() {
        Ok(mut c) => c.on_back_requested(),
        Err(_) => return,
    };
    if !handled {
        log::info!("No page history, closing window");
        window.close();
    }
}

fn matches_any(
    accels: &[ParsedAccel],
    key: gtk4::gdk::Key,
    modifiers: gtk4::gdk::ModifierType,
) -> bool {
    let Some(name) = key.name() else {
        return false;
    };
    let ctrl = modifiers.contains(gtk4::gdk::ModifierType::CONTROL_MASK);
    let shift = modifiers.contains(gtk4::gdk::ModifierType::SHIFT_MASK);
    let alt = modifiers.contains(gtk4::gdk::ModifierType::ALT_MASK);
    let super_ = modifiers.contains(gtk4::gdk::ModifierType::SUPER_MASK);
    accels
        .iter()
        .any(|accel| accel.matches(&name, ctrl, shift, alt, super_))
}

fn setup_back_input(
    window: &adw::ApplicationWindow,
    controller: &SharedController,
    settings: &Settings,
) {
    let accels = keybindings::back_accels(&settings.keybinding_overrides);
    log::debug!(
        "Back keybindings: {}",
        keybindings::describe_back_bindings(&settings.keybinding_overrides).join(", ")
    );

    // Capture phase: the web view would otherwise consume the keys.
    let key_ctrl = gtk4::EventControllerKey::new();
    key_ctrl.set_propagation_phase(gtk4::PropagationPhase::Capture);
    {
        let controller = controller.clone();
        let window = window.clone();
        key_ctrl.connect_key_pressed(move |_, key, _keycode, modifiers| {
            if matches_any(&accels, key, modifiers) {
                request_back(&controller, &window);
                return glib::Propagation::Stop;
            }
            glib::Propagation::Proceed
        });
    }
    window.add_controller(key_ctrl);

    let gesture = gtk4::GestureClick::new();
    gesture.set_button(MOUSE_BACK_BUTTON);
    gesture.set_propagation_phase(gtk4::PropagationPhase::Capture);
    {
        let controller = controller.clone();
        let window = window.clone();
        gesture.connect_pressed(move |gesture, _, _, _| {
            gesture.set_state(gtk4::EventSequenceState::Claimed);
            request_back(&controller, &window);
        });
    }
    window.add_controller(gesture);
}

fn setup_close_handler(
    window: &adw::ApplicationWindow,
    controller: &SharedController,
    settings: &Rc<RefCell<Settings>>,
) {
    let controller = controller.clone();
    let settings = settings.clone();
    window.connect_close_request(move |window| {
        {
            let mut s = settings.borrow_mut();
            s.maximized = window.is_maximized();
            if !s.maximized {
                s.window_width = window.width();
                s.window_height = window.height();
            }
        }
        if let Err(e) = settings::save(&settings.borrow()) {
            log::warn!("Failed to save settings: {}", e);
        }

        dispatch(&controller, |c| c.teardown());
        glib::Propagation::Proceed
    });
}
