//! Player roster model.

use thiserror::Error;

use super::Lineup;

/// Fewest players a session can start with.
pub const MIN_PLAYERS: usize = 4;

/// Most players a session can hold.
pub const MAX_PLAYERS: usize = 8;

/// Errors raised while collecting a roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Name cannot be empty.")]
    EmptyName,

    #[error("That name is already added: {0}")]
    DuplicateName(String),

    #[error("Need at least {min} players, got {0}", min = MIN_PLAYERS)]
    TooFewPlayers(usize),

    #[error("At most {max} players can join, got {0}", max = MAX_PLAYERS)]
    TooManyPlayers(usize),
}

/// Errors raised when picking four players out of a roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please enter exactly FOUR numbers.")]
    WrongCount(usize),

    #[error("Numbers must be between 1 and {max}.")]
    OutOfRange { index: usize, max: usize },

    #[error("Duplicate numbers detected, pick four different players.")]
    Duplicate(usize),
}

/// Incrementally collects player names, enforcing the roster rules.
#[derive(Debug, Clone, Default)]
pub struct RosterBuilder {
    players: Vec<String>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of names collected so far.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// True once the minimum roster size has been reached.
    pub fn has_minimum(&self) -> bool {
        self.players.len() >= MIN_PLAYERS
    }

    /// True once no further players can be added.
    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    /// Check whether a name is already taken (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        let low = name.trim().to_lowercase();
        self.players.iter().any(|p| p.to_lowercase() == low)
    }

    /// Add a trimmed, non-empty, not-yet-taken name.
    pub fn add(&mut self, name: &str) -> Result<(), RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.contains(name) {
            return Err(RosterError::DuplicateName(name.to_string()));
        }
        if self.is_full() {
            return Err(RosterError::TooManyPlayers(self.players.len() + 1));
        }
        self.players.push(name.to_string());
        Ok(())
    }

    /// Finish collecting.
    pub fn build(self) -> Result<Roster, RosterError> {
        if !self.has_minimum() {
            return Err(RosterError::TooFewPlayers(self.players.len()));
        }
        Ok(Roster {
            players: self.players,
        })
    }
}

/// Ordered, duplicate-free list of 4 to 8 players, fixed for a session.
///
/// Players are referenced by name or by their 0-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    players: Vec<String>,
}

impl Roster {
    /// Build a roster from names in entry order.
    pub fn new<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = RosterBuilder::new();
        let mut count = 0;
        for name in names {
            count += 1;
            if count > MAX_PLAYERS {
                return Err(RosterError::TooManyPlayers(count));
            }
            builder.add(name.as_ref())?;
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false; a roster holds at least four players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player at a 0-based position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.players.get(index).map(String::as_str)
    }

    /// Iterate over names in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.players
    }

    /// Pick four players by 0-based index.
    ///
    /// The first two form team 1, the last two team 2; everybody else rests.
    pub fn select(&self, indices: &[usize]) -> Result<Lineup, SelectionError> {
        if indices.len() != 4 {
            return Err(SelectionError::WrongCount(indices.len()));
        }
        for (i, &index) in indices.iter().enumerate() {
            if index >= self.players.len() {
                return Err(SelectionError::OutOfRange {
                    index,
                    max: self.players.len(),
                });
            }
            if indices[..i].contains(&index) {
                return Err(SelectionError::Duplicate(index));
            }
        }
        Ok(Lineup::from_indices(
            self,
            [indices[0], indices[1], indices[2], indices[3]],
        ))
    }
}
