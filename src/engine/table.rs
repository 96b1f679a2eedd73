//! The single active game slot.
//!
//! A `Table` holds at most one `GameSession`. Starting a game replaces
//! whatever was there; every other operation fails with `NoActiveSession`
//! until a game has been started.

use tracing::{debug, info};

use crate::engine::session::GameSession;
use crate::engine::types::{JudgmentError, RoundInfo, RoundOutcome, Scoreboard, TricksResult};

#[derive(Debug, Default)]
pub struct Table {
    session: Option<GameSession>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `session` as the active game and return its opening round.
    pub fn start(&mut self, session: GameSession) -> RoundInfo {
        if let Some(old) = self.session.as_ref() {
            info!(
                replaced = %old.id,
                round = old.round(),
                "replacing game in progress"
            );
        }
        info!(
            game = %session.id,
            players = session.player_count(),
            max_rounds = session.max_rounds(),
            "game started"
        );
        let opening = session.round_info();
        self.session = Some(session);
        opening
    }

    pub fn session(&self) -> Result<&GameSession, JudgmentError> {
        self.session.as_ref().ok_or(JudgmentError::NoActiveSession)
    }

    fn session_mut(&mut self) -> Result<&mut GameSession, JudgmentError> {
        self.session.as_mut().ok_or(JudgmentError::NoActiveSession)
    }

    pub fn record_bids(&mut self, bids: &[u32]) -> Result<RoundInfo, JudgmentError> {
        let session = self.session_mut()?;
        session.record_bids(bids)?;
        debug!(game = %session.id, round = session.round(), ?bids, "bids recorded");
        Ok(session.round_info())
    }

    pub fn record_tricks(&mut self, tricks: &[u32]) -> Result<TricksResult, JudgmentError> {
        let session = self.session_mut()?;
        let scored_round = session.round();
        let result = session.record_tricks(tricks)?;
        match &result.outcome {
            RoundOutcome::Next(next) => {
                debug!(game = %session.id, round = scored_round, next = next.round, "round scored")
            }
            RoundOutcome::GameOver => info!(
                game = %session.id,
                rounds = scored_round,
                leaders = ?result.scores.leaders(),
                "game finished"
            ),
        }
        Ok(result)
    }

    pub fn scores(&self) -> Result<Scoreboard, JudgmentError> {
        Ok(self.session()?.scores())
    }
}
