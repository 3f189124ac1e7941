//! `mdstyle watch` command implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use mdstyle_config::{CliSettings, Config};
use mdstyle_preview::{FileWatcher, LivePreview, ViewMode, pipeline_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Markdown file to watch.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover mdstyle.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// View to print: `preview` (styled outline) or `code` (HTML).
    #[arg(long)]
    view: Option<ViewMode>,

    /// Debounce for file change events in milliseconds (overrides config).
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Disable GitHub Flavored Markdown extensions.
    #[arg(long)]
    no_gfm: bool,

    /// Enable verbose output (render and file watcher logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl WatchArgs {
    /// Execute the watch command.
    ///
    /// Prints the active view of every published snapshot until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the file cannot be watched.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            gfm: self.no_gfm.then_some(false),
            view: self.view,
            debounce_ms: self.debounce_ms,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let view = config.preview.view;
        if let Some(path) = &config.config_path {
            output.info(&format!("Using config {}", path.display()));
        }

        let pipeline = pipeline_from_config(&config);
        tracing::info!(gfm = pipeline.gfm(), view = ?view, "Render pipeline ready");
        let preview = Arc::new(LivePreview::spawn(pipeline));
        let mut snapshots = preview.subscribe();
        let mut watcher = FileWatcher::new(
            self.file,
            Duration::from_millis(config.preview.debounce_ms),
        );
        watcher.start(Arc::clone(&preview))?;

        output.success(&format!("Watching {}", watcher.path().display()));
        output.info("Press Ctrl-C to stop");

        loop {
            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        output.warning("Render worker stopped");
                        break;
                    }
                    let snapshot = Arc::clone(&*snapshots.borrow_and_update());
                    output.highlight(&format!("-- revision {} --", snapshot.revision));
                    output.print_view(snapshot.view(view))?;
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        watcher.stop();
        output.info("Stopped");
        Ok(())
    }
}
