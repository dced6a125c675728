use std::fs::File;
use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::eyre;

/// File-backed logging. The TUI owns the terminal, so stderr is not an
/// option while the alternate screen is active.
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let make_writer = move || file.try_clone().expect("failed to clone log file handle");

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(make_writer)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}
