//! `mdstyle render` command implementation.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use mdstyle_config::{CliSettings, Config};
use mdstyle_preview::{ViewMode, ViewState, pipeline_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdstyle.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// View to print: `preview` (styled outline) or `code` (HTML).
    #[arg(long)]
    view: Option<ViewMode>,

    /// Print the styled tree as JSON.
    #[arg(long, conflicts_with = "view")]
    json: bool,

    /// Disable GitHub Flavored Markdown extensions.
    #[arg(long)]
    no_gfm: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            gfm: self.no_gfm.then_some(false),
            view: self.view,
            debounce_ms: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let pipeline = pipeline_from_config(&config);
        tracing::debug!(
            config = ?config.config_path,
            gfm = pipeline.gfm(),
            "Loaded configuration"
        );

        let markdown = read_input(self.file.as_deref())?;
        let mut state = ViewState::new(pipeline, config.preview.view);
        state.edit(markdown);

        if self.json {
            let snapshot = state.snapshot();
            output.print(&serde_json::to_string_pretty(snapshot.tree())?)?;
        } else {
            output.print_view(state.visible())?;
        }
        Ok(())
    }
}

/// Read Markdown from `file`, or from stdin when absent or `-`.
fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
