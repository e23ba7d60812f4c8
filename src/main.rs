//! Binary entry point for the orb viewer.

use std::path::Path;

use orb::options::Options;

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load options from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = orb::viewer::run(options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
