//! Round-by-round state machine for a single game of Judgment.
//!
//! `GameSession` owns the seating order, running scores, and the current
//! round's trump, dealer, and hand size. Every operation validates its input
//! in full before touching any state, so a rejected call leaves the session
//! exactly as it was.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::rules;
use crate::engine::types::{
    JudgmentError, Phase, PlayerRecord, RoundEntry, RoundInfo, RoundOutcome, Scoreboard,
    ScoredRound, Suit, TricksResult,
};

// =========================================================================
// GameSession
// =========================================================================

#[derive(Clone, Debug)]
pub struct GameSession {
    players: Vec<String>,
    /// Indexed by seat, parallel to `players`.
    records: Vec<PlayerRecord>,

    round: u32,
    max_rounds: u32,
    cards_per_round: u32,
    trump: Suit,
    dealer_index: usize,
    phase: Phase,
    last_round: Option<ScoredRound>,

    // Metadata
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl GameSession {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// Seat the given players in order. Names are trimmed and must be
    /// non-empty and unique.
    pub fn new<S: AsRef<str>>(players: &[S]) -> Result<Self, JudgmentError> {
        if !rules::is_valid_player_count(players.len()) {
            return Err(JudgmentError::InvalidPlayerCount(players.len()));
        }

        let mut names: Vec<String> = Vec::with_capacity(players.len());
        for raw in players {
            let name = raw.as_ref().trim();
            if name.is_empty() {
                return Err(JudgmentError::InvalidPlayerName("name is empty".into()));
            }
            if names.iter().any(|n| n == name) {
                return Err(JudgmentError::InvalidPlayerName(format!(
                    "duplicate player {name}"
                )));
            }
            names.push(name.to_string());
        }

        let n = names.len();
        Ok(Self {
            players: names,
            records: vec![PlayerRecord::default(); n],
            round: 1,
            max_rounds: rules::max_rounds(n),
            cards_per_round: 1,
            trump: rules::OPENING_TRUMP,
            dealer_index: 0,
            phase: Phase::AwaitingBids,
            last_round: None,
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        })
    }

    /// Seat `count` players named `Player 1` .. `Player N`.
    pub fn with_player_count(count: usize) -> Result<Self, JudgmentError> {
        if !rules::is_valid_player_count(count) {
            return Err(JudgmentError::InvalidPlayerCount(count));
        }
        let names: Vec<String> = (1..=count).map(|i| format!("Player {i}")).collect();
        Self::new(&names)
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn record(&self, player: &str) -> Option<&PlayerRecord> {
        let seat = self.players.iter().position(|p| p == player)?;
        self.records.get(seat)
    }

    /// Players paired with their records, in seating order.
    pub fn seats(&self) -> impl Iterator<Item = (&str, &PlayerRecord)> {
        self.players
            .iter()
            .map(String::as_str)
            .zip(self.records.iter())
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn cards_per_round(&self) -> u32 {
        self.cards_per_round
    }

    pub fn trump(&self) -> Suit {
        self.trump
    }

    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }

    pub fn dealer(&self) -> &str {
        &self.players[self.dealer_index]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn last_round(&self) -> Option<&ScoredRound> {
        self.last_round.as_ref()
    }

    /// The round currently being played (or the final round once finished).
    pub fn round_info(&self) -> RoundInfo {
        RoundInfo {
            round: self.round,
            trump: self.trump,
            dealer: self.dealer().to_string(),
            cards_per_round: self.cards_per_round,
        }
    }

    /// Running totals in seating order. Valid in every phase.
    pub fn scores(&self) -> Scoreboard {
        Scoreboard::new(
            self.seats()
                .map(|(name, rec)| (name.to_string(), rec.score))
                .collect(),
        )
    }

    // -----------------------------------------------------------------
    // Round operations
    // -----------------------------------------------------------------

    /// Record each player's bid for the current round, in seating order.
    pub fn record_bids(&mut self, bids: &[u32]) -> Result<(), JudgmentError> {
        self.expect_phase(Phase::AwaitingBids, "record bids")?;
        self.expect_len(bids.len())?;

        for (rec, &bid) in self.records.iter_mut().zip(bids) {
            rec.bid = bid;
        }
        self.phase = Phase::AwaitingTricks;
        Ok(())
    }

    /// Record tricks won, score the round, and advance to the next one.
    pub fn record_tricks(&mut self, tricks: &[u32]) -> Result<TricksResult, JudgmentError> {
        self.expect_phase(Phase::AwaitingTricks, "record tricks")?;
        self.expect_len(tricks.len())?;

        let mut entries = Vec::with_capacity(self.players.len());
        for ((name, rec), &won) in self.players.iter().zip(self.records.iter_mut()).zip(tricks) {
            rec.tricks_won = won;
            let delta = rules::bid_score(rec.bid, won);
            rec.score += delta;
            entries.push(RoundEntry {
                player: name.clone(),
                bid: rec.bid,
                tricks_won: won,
                delta,
            });
        }
        self.last_round = Some(ScoredRound {
            round: self.round,
            trump: self.trump,
            entries,
        });

        let outcome = self.advance_round();
        Ok(TricksResult {
            scores: self.scores(),
            outcome,
        })
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn advance_round(&mut self) -> RoundOutcome {
        if self.round >= self.max_rounds {
            self.phase = Phase::Finished;
            return RoundOutcome::GameOver;
        }

        self.round += 1;
        self.cards_per_round += 1;
        self.trump = rules::trump_for_round(self.round);
        self.dealer_index = (self.dealer_index + 1) % self.players.len();
        self.phase = Phase::AwaitingBids;
        RoundOutcome::Next(self.round_info())
    }

    fn expect_phase(&self, wanted: Phase, action: &'static str) -> Result<(), JudgmentError> {
        if self.phase == wanted {
            Ok(())
        } else {
            Err(JudgmentError::PhaseViolation {
                action,
                phase: self.phase,
            })
        }
    }

    fn expect_len(&self, got: usize) -> Result<(), JudgmentError> {
        let expected = self.players.len();
        if got == expected {
            Ok(())
        } else {
            Err(JudgmentError::PlayerCountMismatch { expected, got })
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
