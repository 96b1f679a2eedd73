use std::fmt;

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

/// Trump suit for a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    /// Fixed trump cycle, indexed by `round % 4`.
    pub const ROTATION: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub fn as_str(self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Where a session is in the bid -> tricks cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingBids,
    AwaitingTricks,
    Finished,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::AwaitingBids => "awaiting_bids",
            Phase::AwaitingTricks => "awaiting_tricks",
            Phase::Finished => "finished",
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Finished)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Player and round records
// ---------------------------------------------------------------------------

/// Per-player bookkeeping. `bid` and `tricks_won` hold the latest round's
/// values; `score` is the running total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    pub bid: u32,
    pub tricks_won: u32,
    pub score: i64,
}

/// Description of the round about to be played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundInfo {
    pub round: u32,
    pub trump: Suit,
    pub dealer: String,
    pub cards_per_round: u32,
}

/// What happens after a round has been scored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Next(RoundInfo),
    GameOver,
}

impl RoundOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, RoundOutcome::GameOver)
    }

    pub fn next_round(&self) -> Option<&RoundInfo> {
        match self {
            RoundOutcome::Next(info) => Some(info),
            RoundOutcome::GameOver => None,
        }
    }
}

/// One player's line in a scored round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundEntry {
    pub player: String,
    pub bid: u32,
    pub tricks_won: u32,
    pub delta: i64,
}

/// The most recently scored round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredRound {
    pub round: u32,
    pub trump: Suit,
    pub entries: Vec<RoundEntry>,
}

/// Running totals in seating order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard(Vec<(String, i64)>);

impl Scoreboard {
    pub fn new(entries: Vec<(String, i64)>) -> Self {
        Self(entries)
    }

    pub fn get(&self, player: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|(name, _)| name == player)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest total(s); ties share the lead.
    pub fn leaders(&self) -> Vec<&str> {
        let Some(best) = self.0.iter().map(|(_, s)| *s).max() else {
            return Vec::new();
        };
        self.0
            .iter()
            .filter(|(_, s)| *s == best)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Result of recording a round's tricks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TricksResult {
    pub scores: Scoreboard,
    pub outcome: RoundOutcome,
}

// ---------------------------------------------------------------------------
// JudgmentError
// ---------------------------------------------------------------------------

/// Domain errors for the score keeper. None of them mutate session state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JudgmentError {
    #[error("a game needs between 3 and 6 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("invalid player name: {0}")]
    InvalidPlayerName(String),

    #[error("expected {expected} values, one per player, got {got}")]
    PlayerCountMismatch { expected: usize, got: usize },

    #[error("cannot {action} while the game is {phase}")]
    PhaseViolation { action: &'static str, phase: Phase },

    #[error("no game has been started")]
    NoActiveSession,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
