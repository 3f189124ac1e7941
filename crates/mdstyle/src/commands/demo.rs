//! `mdstyle demo` command implementation.

use clap::Args;
use mdstyle_preview::{DEMO_MARKDOWN, ViewMode, ViewState};
use mdstyle_renderer::RenderPipeline;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the demo command.
#[derive(Args)]
pub(crate) struct DemoArgs {
    /// View to print: `preview` (styled outline) or `code` (HTML).
    #[arg(long, default_value_t = ViewMode::Preview)]
    view: ViewMode,
}

impl DemoArgs {
    /// Execute the demo command.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let mut state = ViewState::new(RenderPipeline::new(), self.view);
        state.edit(DEMO_MARKDOWN);
        Output::new().print_view(state.visible())?;
        Ok(())
    }
}
