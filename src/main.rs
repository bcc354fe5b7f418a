// Entrypoint for the CLI application.
// - Resolves the data directory, makes sure the record files exist and
//   starts file logging before handing control to the menu loop.

use anyhow::Context;
use student_records::{config::Config, logging, records::Records, store, ui::main_menu};

fn main() -> anyhow::Result<()> {
    // Data directory from `STUDENT_RECORDS_DIR`, or the current directory.
    let config = Config::from_env();
    store::initialize(&config).with_context(|| {
        format!("Failed to prepare data directory {}", config.data_dir().display())
    })?;

    if let Err(e) = logging::init(&config) {
        eprintln!("Logging disabled: {}", e);
    }

    // Blocks until the user exits.
    main_menu(Records::new(config))?;
    Ok(())
}
