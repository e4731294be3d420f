//! Binary entry point: resolve configuration, start file logging, then hand
//! an empty record store to the interactive shell until the user exits.
use clap::Parser;
use student_records::{init_logging, run_app, App, Cli, Config, RecordStore};

fn main() -> anyhow::Result<()> {
    let config = Config::load(Cli::parse());

    // A missing log directory should not stop anyone from editing records.
    if let Err(err) = init_logging(config.log_dir.as_deref()) {
        eprintln!("warning: logging disabled ({err:#})");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "session started");

    let mut app = App::new(RecordStore::new(), config.export_path.clone());
    run_app(&mut app, config.startup_file.as_deref(), config.color)
}
