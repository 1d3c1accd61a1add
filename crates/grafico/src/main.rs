use grafico::config;
use grafico::gui::app::AppModel;
use grafico::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    // Seed a config file on first run, so there is something to edit
    // and for the watcher to pick up.
    match config::write_default_config() {
        Ok(path) => log::debug!("config file: {}", path.display()),
        Err(e) => log::warn!("Could not write the default config: {}", e),
    }

    let config = config::load_or_sample();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.grafico");

    app.run::<AppModel>((config, rx));
}
