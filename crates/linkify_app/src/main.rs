mod app;
mod logging;

fn main() {
    logging::initialize(logging::LogDestination::File);
    if let Err(err) = app::run() {
        // Refuse to run against a store we cannot trust.
        eprintln!("linkify: failed to start: {err}");
        std::process::exit(1);
    }
}
