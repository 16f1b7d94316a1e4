/// Command-line text → typed `Command`.
///
/// One command per line, whitespace separated. Keywords are fixed by the
/// input format:
///
/// ```text
/// ADDTEAM <name>
/// START DURATION <minutes> PROBLEM <count>
/// SUBMIT <letter> BY <team> WITH <status> AT <time>
/// FLUSH | FREEZE | SCROLL | END
/// QUERY_RANKING <team>
/// QUERY_SUBMISSION <team> WHERE PROBLEM=<letter|ALL> AND STATUS=<status|ALL>
/// ```
use frozenboard_core::{Command, JudgeStatus, UnknownStatus, problem_index};
use std::str::FromStr;
use thiserror::Error;

/// Wildcard accepted by both submission-query filters.
const ANY: &str = "ALL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command \"{0}\"")]
    UnknownCommand(String),

    #[error("malformed {command}: expected `{usage}`")]
    Malformed { command: &'static str, usage: &'static str },

    #[error("invalid number \"{0}\"")]
    InvalidNumber(String),

    #[error("invalid problem \"{0}\"")]
    InvalidProblem(String),

    #[error(transparent)]
    Status(#[from] UnknownStatus),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&keyword) = tokens.first() else {
        return Ok(None);
    };

    let command = match keyword {
        "ADDTEAM" => match tokens[..] {
            [_, name] => Command::AddTeam { name: name.to_string() },
            _ => return Err(malformed("ADDTEAM", "ADDTEAM <name>")),
        },
        "START" => match tokens[..] {
            [_, "DURATION", duration, "PROBLEM", count] => Command::Start {
                duration: number(duration)?,
                problem_count: number(count)?,
            },
            _ => return Err(malformed("START", "START DURATION <minutes> PROBLEM <count>")),
        },
        "SUBMIT" => match tokens[..] {
            [_, problem, "BY", team, "WITH", status, "AT", time] => Command::Submit {
                problem: problem_letter(problem)?,
                team: team.to_string(),
                status: status.parse()?,
                time: number(time)?,
            },
            _ => {
                return Err(malformed(
                    "SUBMIT",
                    "SUBMIT <letter> BY <team> WITH <status> AT <time>",
                ));
            }
        },
        "FLUSH" => Command::Flush,
        "FREEZE" => Command::Freeze,
        "SCROLL" => Command::Scroll,
        "END" => Command::End,
        "QUERY_RANKING" => match tokens[..] {
            [_, team] => Command::QueryRanking { team: team.to_string() },
            _ => return Err(malformed("QUERY_RANKING", "QUERY_RANKING <team>")),
        },
        "QUERY_SUBMISSION" => {
            const USAGE: &str = "QUERY_SUBMISSION <team> WHERE PROBLEM=<letter|ALL> AND STATUS=<status|ALL>";
            let [_, team, "WHERE", problem, "AND", status] = tokens[..] else {
                return Err(malformed("QUERY_SUBMISSION", USAGE));
            };
            let (Some(problem), Some(status)) =
                (problem.strip_prefix("PROBLEM="), status.strip_prefix("STATUS="))
            else {
                return Err(malformed("QUERY_SUBMISSION", USAGE));
            };
            Command::QuerySubmission {
                team: team.to_string(),
                problem: filter(problem, problem_letter)?,
                status: filter(status, |s| Ok(JudgeStatus::from_str(s)?))?,
            }
        }
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn malformed(command: &'static str, usage: &'static str) -> ParseError {
    ParseError::Malformed { command, usage }
}

fn number<T: FromStr>(token: &str) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber(token.to_string()))
}

fn problem_letter(token: &str) -> Result<usize, ParseError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => {
            problem_index(letter).ok_or_else(|| ParseError::InvalidProblem(token.to_string()))
        }
        _ => Err(ParseError::InvalidProblem(token.to_string())),
    }
}

/// `ALL` → `None`, anything else goes through `parse`.
fn filter<T>(
    token: &str,
    parse: impl Fn(&str) -> Result<T, ParseError>,
) -> Result<Option<T>, ParseError> {
    if token == ANY { Ok(None) } else { parse(token).map(Some) }
}
