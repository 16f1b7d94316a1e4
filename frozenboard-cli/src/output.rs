/// Output formatting: plain text lines and JSON lines.
use frozenboard_core::{
    Cell, CommandKind, ErrorKind, Outcome, ScoreboardRow, StandingsError, problem_letter,
};
use serde::Serialize;

const FROZEN_WARNING: &str =
    "[Warning]Scoreboard is frozen. The ranking may be inaccurate until it were scrolled.";

#[derive(Serialize)]
struct JsonEvent<'a> {
    command: CommandKind,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

#[derive(Serialize)]
struct JsonError {
    kind: ErrorKind,
    reason: String,
}

/// Text form of a scoreboard cell.
pub fn render_cell(cell: &Cell) -> String {
    match *cell {
        Cell::Unattempted => ".".to_string(),
        Cell::Solved { wrong: 0 } => "+".to_string(),
        Cell::Solved { wrong } => format!("+{wrong}"),
        Cell::Failed { wrong } => format!("-{wrong}"),
        Cell::Frozen { wrong_at_freeze: 0, post_freeze } => format!("0/{post_freeze}"),
        Cell::Frozen { wrong_at_freeze, post_freeze } => format!("-{wrong_at_freeze}/{post_freeze}"),
    }
}

/// `<team> <rank> <solved> <penalty> <cell>...`
pub fn render_row(row: &ScoreboardRow) -> String {
    let mut line = format!("{} {} {} {}", row.team, row.rank, row.solved, row.penalty);
    for cell in &row.cells {
        line.push(' ');
        line.push_str(&render_cell(cell));
    }
    line
}

/// Verb used in `[Error]<verb> failed: ...` lines.
fn failure_verb(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::AddTeam => "Add",
        CommandKind::Start => "Start",
        CommandKind::Submit => "Submit",
        CommandKind::Flush => "Flush",
        CommandKind::Freeze => "Freeze",
        CommandKind::Scroll => "Scroll",
        CommandKind::QueryRanking => "Query ranking",
        CommandKind::QuerySubmission => "Query submission",
        CommandKind::End => "End",
    }
}

/// Render the result of one command as zero or more text lines.
pub fn render_text(kind: CommandKind, result: &Result<Outcome, StandingsError>) -> Vec<String> {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => return vec![format!("[Error]{} failed: {e}.", failure_verb(kind))],
    };

    match outcome {
        Outcome::TeamAdded => vec!["[Info]Add successfully.".to_string()],
        Outcome::Started => vec!["[Info]Competition starts.".to_string()],
        Outcome::Submitted => Vec::new(),
        Outcome::Flushed => vec!["[Info]Flush scoreboard.".to_string()],
        Outcome::Frozen => vec!["[Info]Freeze scoreboard.".to_string()],
        Outcome::Scrolled(report) => {
            let mut lines = vec!["[Info]Scroll scoreboard.".to_string()];
            lines.extend(report.before.iter().map(render_row));
            lines.extend(report.changes.iter().map(|c| {
                format!("{} {} {} {}", c.team, c.displaced, c.solved, c.penalty)
            }));
            lines.extend(report.after.iter().map(render_row));
            lines
        }
        Outcome::Ranking(q) => {
            let mut lines = vec!["[Info]Complete query ranking.".to_string()];
            if q.stale {
                lines.push(FROZEN_WARNING.to_string());
            }
            lines.push(format!("{} NOW AT RANKING {}", q.team, q.rank));
            lines
        }
        Outcome::Submission(q) => {
            let found = match q.found {
                Some(s) => format!("{} {} {} {}", q.team, problem_letter(s.problem), s.status, s.time),
                None => "Cannot find any submission.".to_string(),
            };
            vec!["[Info]Complete query submission.".to_string(), found]
        }
        Outcome::Ended => vec!["[Info]Competition ends.".to_string()],
    }
}

/// Render the result of one command as a single JSON object.
pub fn render_json(
    kind: CommandKind,
    result: &Result<Outcome, StandingsError>,
) -> serde_json::Result<String> {
    let event = match result {
        Ok(outcome) => JsonEvent { command: kind, ok: true, outcome: Some(outcome), error: None },
        Err(e) => JsonEvent {
            command: kind,
            ok: false,
            outcome: None,
            error: Some(JsonError { kind: e.kind(), reason: e.to_string() }),
        },
    };
    serde_json::to_string(&event)
}
