/// Drives command lines through one `Standings` until END or end of input.
use frozenboard_core::{Outcome, Standings};
use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::config::OutputFormat;
use crate::output::{render_json, render_text};
use crate::parse::parse_line;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Counters reported in verbose mode.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub commands: usize,
    pub failed: usize,
    /// Lines that could not be parsed.
    pub skipped: usize,
    pub ended: bool,
}

pub fn run_session<R: BufRead, W: Write>(
    standings: &mut Standings,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<SessionStats, SessionError> {
    let mut stats = SessionStats::default();

    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                log::warn!("line {}: {e}, skipping", line_no + 1);
                stats.skipped += 1;
                continue;
            }
        };

        let kind = command.kind();
        let result = standings.execute(command);
        stats.commands += 1;
        if let Err(e) = &result {
            stats.failed += 1;
            log::debug!("line {}: {kind:?} rejected: {e}", line_no + 1);
        }

        match format {
            OutputFormat::Text => {
                for rendered in render_text(kind, &result) {
                    writeln!(out, "{rendered}")?;
                }
            }
            OutputFormat::Json => writeln!(out, "{}", render_json(kind, &result)?)?,
        }

        if matches!(result, Ok(Outcome::Ended)) {
            stats.ended = true;
            break;
        }
    }

    out.flush()?;
    Ok(stats)
}
