//! `confmark convert` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use confmark_converter::convert;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Write storage markup to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if the markdown file cannot be read or the output written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown = std::fs::read_to_string(&self.markdown_file)?;
        let markup = convert(&markdown);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &markup)?;
                Output::new().success(&format!(
                    "Converted {} -> {}",
                    self.markdown_file.display(),
                    path.display()
                ));
            }
            None => Term::stdout().write_line(&markup)?,
        }

        Ok(())
    }
}
