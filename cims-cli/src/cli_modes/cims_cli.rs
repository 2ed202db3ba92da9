use super::session_command::{SESSION_HELP, SessionCommand};
use crate::{BaseCli, CliModeResult, Renderer};
use anyhow::Result;
use cims_core::{Cims, CompletionOutcome};
use std::io::{BufRead, Write};

pub struct CimsCli {
    cli: BaseCli,
    renderer: Renderer,
    cims: Cims,
}

impl CimsCli {
    pub fn new(cli: BaseCli, cims: Cims) -> Self {
        let renderer = Renderer::for_config(cli.color, &cims.config);
        CimsCli {
            cli,
            renderer,
            cims,
        }
    }

    pub fn cims(&self) -> &Cims {
        &self.cims
    }

    pub fn run(&mut self, input: &mut impl BufRead) -> Result<()> {
        if let CliModeResult::Finish = self.stats_mode() {
            return Ok(());
        };

        if let CliModeResult::Finish = self.log_mode() {
            return Ok(());
        };

        self.session_mode(input)?;
        Ok(())
    }

    pub fn stats_mode(&self) -> CliModeResult {
        if !self.cli.stats {
            return CliModeResult::NothingToDo;
        }
        self.print_stats();
        CliModeResult::Finish
    }

    pub fn log_mode(&self) -> CliModeResult {
        if !self.cli.log {
            return CliModeResult::NothingToDo;
        }
        self.print_log();
        CliModeResult::Finish
    }

    /// The entry view: reads one line at a time until `:quit` or end of input.
    /// Nothing that happens inside the loop ends the session.
    pub fn session_mode(&mut self, input: &mut impl BufRead) -> Result<CliModeResult> {
        self.renderer.print_md("# CIMS Transaction Time Measure\n");
        self.renderer.print_info(&format!(
            "Logging to {}",
            self.cims.log.path().display()
        ));
        self.renderer
            .print_md("Paste a CIMS ID and press Enter. `:done` stops the oldest timer, `:help` lists commands.\n");

        let mut buf = Vec::new();
        loop {
            print!("> ");
            std::io::stdout().flush()?;
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let Ok(line) = std::str::from_utf8(&buf) else {
                self.renderer
                    .print_warning("Ignored a line that is not valid UTF-8.");
                continue;
            };
            match SessionCommand::parse(line) {
                SessionCommand::Empty => {}
                SessionCommand::Submit(identifier) => self.submit(identifier),
                SessionCommand::Done => self.complete_oldest(),
                SessionCommand::Pending => self.renderer.print_pending(self.cims.tracker.pending()),
                SessionCommand::Completed => {
                    self.renderer.print_completed(self.cims.tracker.completed())
                }
                SessionCommand::Log => self.print_log(),
                SessionCommand::Stats => self.print_stats(),
                SessionCommand::Help => self.renderer.print_md(SESSION_HELP),
                SessionCommand::Quit => break,
                SessionCommand::Unknown(command) => self.renderer.print_warning(&format!(
                    "Unknown command `{command}`. Type `:help`, or `:{command}` to time it as an ID."
                )),
            }
        }

        let pending = self.cims.tracker.pending_count();
        if pending > 0 {
            self.renderer.print_warning(&format!(
                "{pending} pending entries were not completed and are discarded."
            ));
        }
        Ok(CliModeResult::Finish)
    }

    fn submit(&mut self, identifier: &str) {
        if let Some(entry) = self.cims.submit(identifier) {
            self.renderer.print_started(entry);
        }
    }

    fn complete_oldest(&mut self) {
        match self.cims.complete_oldest() {
            CompletionOutcome::NothingPending => {
                self.renderer.print_info("No pending entries to complete.");
                return;
            }
            CompletionOutcome::Saved(row) => self.renderer.print_submitted(&row),
            CompletionOutcome::SaveFailed { row, error } => {
                self.renderer
                    .print_error(&format!("Failed to save: {error:#}"));
                self.renderer.print_warning(&format!(
                    "ID {} is kept and will be written with the next saved entry.",
                    row.identifier
                ));
            }
        }
        if self.cims.tracker.pending_count() > 0 {
            self.renderer.print_pending(self.cims.tracker.pending());
        }
    }

    fn print_log(&self) {
        self.renderer.print_md("## Logged Entries\n");
        self.renderer
            .print_log_table(self.cims.log.schema(), self.cims.log.rows());
    }

    /// The analytics view.
    fn print_stats(&self) {
        self.renderer.print_md("## Time Analysis\n");
        let Some(summary) = self.cims.log.summarize() else {
            self.renderer.print_warning("No processed entries available.");
            return;
        };
        self.renderer.print_summary(&summary);
        self.renderer.print_md("### Time Trend\n");
        self.renderer.print_chart(&self.cims.log.durations());
        self.renderer.print_md("### Raw Data\n");
        self.renderer
            .print_log_table(self.cims.log.schema(), self.cims.log.rows());
    }
}
