mod app;
mod components;
mod services;

use services::logging::Logger;

fn main() {
    Logger::init(log::LevelFilter::Warn);
    app::on_dom_ready(|| {
        if let Err(err) = app::start() {
            log::error!(target: "app", "{:#}", err);
        }
    });
}
