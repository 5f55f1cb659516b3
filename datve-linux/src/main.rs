mod indicator;
mod style;
mod web_surface;
mod window;

use gtk4::glib;
use libadwaita as adw;
use libadwaita::prelude::*;

const APP_ID: &str = "tech.giapzech.Datve";

fn main() -> glib::ExitCode {
    env_logger::init();

    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_startup(|_app| {
        style::load_css();
    });

    app.connect_activate(move |app| {
        // Single-window shell: re-activation raises the existing window.
        if let Some(window) = app.active_window() {
            window.present();
            return;
        }
        window::build_window(app);
    });

    app.run()
}
