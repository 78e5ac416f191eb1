//! Interactive terminal front end.
//!
//! Reads names, selections, winners, scores and confirmations from any
//! `BufRead`, re-asking until the input is acceptable, and writes prompts,
//! leaderboards and recaps to any `Write`.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    LeaderboardRow, Lineup, MatchRecord, Roster, RosterBuilder, RosterError, SelectionError,
    Side,
};
use crate::session::{PendingResult, Session};

/// Terminal input that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter y or n.")]
    NotYesNo,

    #[error("Please type 1 or 2.")]
    NotAWinner,

    #[error("Please enter two numbers like 11-7.")]
    NotTwoNumbers,

    #[error("Please enter numbers only.")]
    NotANumber,

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Errors that end an interactive session.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed")]
    UnexpectedEof,

    #[error("Invalid roster: {0}")]
    Roster(#[from] RosterError),
}

/// How each round's four players are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Use the matchmaker's suggestion
    #[default]
    Suggested,
    /// Ask for four player numbers every round
    Manual,
}

fn delimiters() -> &'static Regex {
    static DELIMITERS: OnceLock<Regex> = OnceLock::new();
    DELIMITERS.get_or_init(|| Regex::new(r"[\s,:\-]+").expect("delimiter pattern is valid"))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Parse a `y`/`n` answer.
pub fn parse_yes_no(raw: &str) -> Result<bool, InputError> {
    match raw.trim().to_lowercase().as_str() {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(InputError::NotYesNo),
    }
}

/// Parse the winning side, `1` or `2`.
pub fn parse_winner(raw: &str) -> Result<Side, InputError> {
    match raw.trim() {
        "1" => Ok(Side::One),
        "2" => Ok(Side::Two),
        _ => Err(InputError::NotAWinner),
    }
}

/// Parse a score such as `11-7`, `11 7`, `11,7` or `11:7`.
///
/// Values too large for `u32` come back as `u32::MAX` so the validator
/// reports them as out of range.
pub fn parse_score(raw: &str) -> Result<(u32, u32), InputError> {
    let parts: Vec<&str> = delimiters()
        .split(raw.trim())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() != 2 || !parts.iter().all(|p| is_digits(p)) {
        return Err(InputError::NotTwoNumbers);
    }

    let value = |p: &str| p.parse::<u32>().unwrap_or(u32::MAX);
    Ok((value(parts[0]), value(parts[1])))
}

/// Parse four 1-based player numbers into 0-based positions.
///
/// Range and duplicate checks against the roster happen in
/// [`Roster::select`].
pub fn parse_selection(raw: &str, roster_len: usize) -> Result<Vec<usize>, InputError> {
    let normalized = raw.replace(',', " ");
    let parts: Vec<&str> = normalized.split_whitespace().collect();

    if parts.len() != 4 {
        return Err(SelectionError::WrongCount(parts.len()).into());
    }
    if !parts.iter().all(|p| is_digits(p)) {
        return Err(InputError::NotANumber);
    }

    parts
        .iter()
        .map(|p| match p.parse::<usize>() {
            Ok(n) if (1..=roster_len).contains(&n) => Ok(n - 1),
            Ok(n) => Err(InputError::from(SelectionError::OutOfRange {
                index: n,
                max: roster_len,
            })),
            Err(_) => Err(InputError::from(SelectionError::OutOfRange {
                index: usize::MAX,
                max: roster_len,
            })),
        })
        .collect()
}

/// One leaderboard line.
pub fn format_leaderboard_row(row: &LeaderboardRow) -> String {
    let s = &row.stats;
    format!(
        "{:12}  Pts:{:2}  W:{:2}  L:{:2}  GP:{:2}  PF:{:3}  PA:{:3}  PF/G:{:4.1}  PA/G:{:4.1}",
        row.name,
        s.points,
        s.wins,
        s.losses,
        s.played,
        s.points_for,
        s.points_against,
        row.points_for_avg,
        row.points_against_avg
    )
}

/// One recap line.
pub fn format_recap_row(record: &MatchRecord) -> String {
    let resting = if record.resting.is_empty() {
        "-".to_string()
    } else {
        record.resting.join(", ")
    };
    format!(
        "Round {:2}: {} vs {}  {}  winner: {} ({})  resting: {}",
        record.round,
        record.team1,
        record.team2,
        record.score,
        record.winner,
        record.winning_team(),
        resting
    )
}

/// Prompt-driven session runner over arbitrary input and output streams.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::UnexpectedEof);
        }
        Ok(line.trim().to_string())
    }

    /// Keep asking until `parse` accepts the answer.
    fn ask<T, E, F>(&mut self, prompt: &str, parse: F) -> Result<T, ConsoleError>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        loop {
            let raw = self.read_line(prompt)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!("Rejected input {:?}: {}", raw, e);
                    writeln!(self.output, "{}", e)?;
                }
            }
        }
    }

    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool, ConsoleError> {
        self.ask(prompt, parse_yes_no)
    }

    /// Collect the first four names, then offer more until the roster is full.
    pub fn collect_roster(&mut self) -> Result<Roster, ConsoleError> {
        let mut builder = RosterBuilder::new();

        while !builder.has_minimum() {
            self.add_player(&mut builder)?;
        }
        while !builder.is_full() && self.ask_yes_no("add new player? (y/n): ")? {
            self.add_player(&mut builder)?;
        }

        Ok(builder.build()?)
    }

    fn add_player(&mut self, builder: &mut RosterBuilder) -> Result<(), ConsoleError> {
        let prompt = format!("add player {}: ", builder.len() + 1);
        let name = self.read_line(&prompt)?;
        if let Err(e) = builder.add(&name) {
            writeln!(self.output, "{}", e)?;
        }
        Ok(())
    }

    pub fn show_players(&mut self, roster: &Roster) -> Result<(), ConsoleError> {
        writeln!(self.output, "\nPlayers:")?;
        for (i, name) in roster.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, name)?;
        }
        Ok(())
    }

    /// Ask for four player numbers until they form a valid lineup.
    pub fn pick_four(&mut self, roster: &Roster) -> Result<Lineup, ConsoleError> {
        let prompt = format!(
            "Choose FOUR player numbers separated by spaces (1..{}, e.g. 1 2 3 4): ",
            roster.len()
        );
        self.ask(&prompt, |raw| {
            let indices = parse_selection(raw, roster.len())?;
            roster.select(&indices).map_err(InputError::from)
        })
    }

    pub fn prompt_winner(&mut self) -> Result<Side, ConsoleError> {
        self.ask("Who won? (1 or 2): ", parse_winner)
    }

    /// Ask for the winner, then for a score until it validates.
    pub fn prompt_result(
        &mut self,
        session: &Session,
        lineup: Lineup,
    ) -> Result<PendingResult, ConsoleError> {
        let winner = self.prompt_winner()?;
        let prompt = format!(
            "Enter score for Team1 ({}) and Team2 ({}) e.g. 11-7: ",
            lineup.team1, lineup.team2
        );

        loop {
            let (s1, s2) = self.ask(&prompt, parse_score)?;
            match session.propose(lineup.clone(), winner, s1, s2) {
                Ok(pending) => return Ok(pending),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Play one round through to a confirmed result.
    pub fn play_round(
        &mut self,
        session: &mut Session,
        mode: SelectionMode,
    ) -> Result<MatchRecord, ConsoleError> {
        let mut lineup = match mode {
            SelectionMode::Suggested => session.suggest(),
            SelectionMode::Manual => self.pick_four(session.roster())?,
        };

        writeln!(self.output, "\nRound {}", session.next_round())?;
        writeln!(self.output, "Match: {}", lineup)?;
        if lineup.resting.is_empty() {
            writeln!(self.output, "Resting: -")?;
        } else {
            writeln!(self.output, "Resting: {}", lineup.resting.join(", "))?;
        }

        loop {
            let pending = self.prompt_result(session, lineup)?;
            let summary = format!(
                "{} wins {} ({} vs {}). Confirm result? (y/n): ",
                pending.winner(),
                pending.score(),
                pending.lineup().team1,
                pending.lineup().team2
            );
            if self.ask_yes_no(&summary)? {
                return Ok(session.confirm(pending).clone());
            }
            writeln!(self.output, "Result discarded, enter it again.")?;
            lineup = pending.decline();
        }
    }

    pub fn show_leaderboard(&mut self, rows: &[LeaderboardRow]) -> Result<(), ConsoleError> {
        writeln!(self.output, "\nLeaderboard")?;
        for row in rows {
            writeln!(self.output, "{}", format_leaderboard_row(row))?;
        }
        Ok(())
    }

    pub fn show_recap(&mut self, matches: &[MatchRecord]) -> Result<(), ConsoleError> {
        writeln!(self.output, "\nMatch recap")?;
        if matches.is_empty() {
            writeln!(self.output, "No matches played.")?;
        }
        for record in matches {
            writeln!(self.output, "{}", format_recap_row(record))?;
        }
        Ok(())
    }

    /// Play rounds until the players stop, then print the recap.
    ///
    /// Closed input ends the session the same way as answering `n`.
    pub fn run(&mut self, session: &mut Session, mode: SelectionMode) -> Result<(), ConsoleError> {
        loop {
            self.show_players(session.roster())?;

            match self.play_round(session, mode) {
                Ok(_) => {}
                Err(ConsoleError::UnexpectedEof) => break,
                Err(e) => return Err(e),
            }

            self.show_leaderboard(&session.leaderboard())?;

            match self.ask_yes_no("\nPlay another? (y/n): ") {
                Ok(true) => {}
                Ok(false) | Err(ConsoleError::UnexpectedEof) => break,
                Err(e) => return Err(e),
            }
        }

        self.show_recap(session.recap())?;
        writeln!(self.output, "Good games, everyone!")?;
        Ok(())
    }
}
