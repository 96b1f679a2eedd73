//! Scoring and progression rules for Judgment.
//!
//! The game is played with a single 52-card deck. Round `r` deals `r` cards
//! to every player, so the number of rounds is capped by how many full hands
//! the deck can supply: `52 / players`.

use crate::engine::types::Suit;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 6;
pub const DECK_SIZE: usize = 52;

/// Points for an exact bid, before the tricks themselves are added.
pub const EXACT_BID_BONUS: i64 = 10;

/// Trump for round 1.
pub const OPENING_TRUMP: Suit = Suit::Spades;

pub fn is_valid_player_count(n: usize) -> bool {
    (MIN_PLAYERS..=MAX_PLAYERS).contains(&n)
}

/// Rounds in a game of `players` seats: 3 -> 17, 4 -> 13, 5 -> 10, 6 -> 8.
pub fn max_rounds(players: usize) -> u32 {
    (DECK_SIZE / players.max(1)) as u32
}

/// Score change for one player in one round. A missed bid scores nothing.
pub fn bid_score(bid: u32, tricks_won: u32) -> i64 {
    if bid == tricks_won {
        EXACT_BID_BONUS + i64::from(tricks_won)
    } else {
        0
    }
}

/// Trump suit in effect once the game has advanced to `round`.
pub fn trump_for_round(round: u32) -> Suit {
    Suit::ROTATION[(round % 4) as usize]
}
