use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::engine::{GameSession, PlayerRecord, RoundInfo, RoundOutcome, Scoreboard, ScoredRound};

use super::errors::ApiError;

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

/// A list supplied either as a JSON array or as a comma-separated string
/// (`"Ann, Bo, Cy"`, `"1,2,0"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListInput<T> {
    List(Vec<T>),
    Csv(String),
}

impl<T> ListInput<T>
where
    T: FromStr,
{
    /// Flatten into an ordered list. `field` names the offending field in
    /// the error message.
    pub fn into_values(self, field: &str) -> Result<Vec<T>, ApiError> {
        match self {
            ListInput::List(values) => Ok(values),
            ListInput::Csv(raw) => raw
                .split(',')
                .map(|item| {
                    let item = item.trim();
                    item.parse().map_err(|_| {
                        ApiError::InvalidRequest(format!("{field}: cannot parse {item:?}"))
                    })
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    pub players: Option<ListInput<String>>,
    #[serde(alias = "num_players")]
    pub num_players: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidsRequest {
    pub bids: ListInput<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TricksRequest {
    pub tricks: ListInput<u32>,
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub engine: String,
    pub uptime: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundInfoResponse {
    pub round: u32,
    pub trump_suit: String,
    pub dealer: String,
    pub cards_per_round: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameResponse {
    pub game_id: String,
    pub message: String,
    pub players: Vec<String>,
    pub max_rounds: u32,
    #[serde(flatten)]
    pub round: RoundInfoResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidsResponse {
    pub message: String,
    #[serde(flatten)]
    pub round: RoundInfoResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundEntryResponse {
    pub player: String,
    pub bid: u32,
    pub tricks_won: u32,
    pub delta: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResultResponse {
    pub round: u32,
    pub trump_suit: String,
    pub entries: Vec<RoundEntryResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TricksResponse {
    pub message: String,
    pub scores: ScoresBody,
    /// `None` once the final round has been scored.
    pub next_round: Option<RoundInfoResponse>,
    pub game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_result: Option<RoundResultResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoresResponse {
    pub scores: ScoresBody,
    pub game_over: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateResponse {
    pub name: String,
    pub bid: u32,
    pub tricks_won: u32,
    pub score: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    pub game_id: String,
    pub created_at: DateTime<Utc>,
    pub phase: String,
    pub max_rounds: u32,
    #[serde(flatten)]
    pub round: RoundInfoResponse,
    pub players: Vec<PlayerStateResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_round: Option<RoundResultResponse>,
}

/// Scores as a JSON object keyed by player, in seating order.
#[derive(Debug)]
pub struct ScoresBody(pub Scoreboard);

impl Serialize for ScoresBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (player, score) in self.0.iter() {
            map.serialize_entry(player, &score)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub fn round_to_api(info: &RoundInfo) -> RoundInfoResponse {
    RoundInfoResponse {
        round: info.round,
        trump_suit: info.trump.to_string(),
        dealer: info.dealer.clone(),
        cards_per_round: info.cards_per_round,
    }
}

pub fn outcome_to_api(outcome: &RoundOutcome) -> Option<RoundInfoResponse> {
    outcome.next_round().map(round_to_api)
}

pub fn scored_round_to_api(scored: &ScoredRound) -> RoundResultResponse {
    RoundResultResponse {
        round: scored.round,
        trump_suit: scored.trump.to_string(),
        entries: scored
            .entries
            .iter()
            .map(|e| RoundEntryResponse {
                player: e.player.clone(),
                bid: e.bid,
                tricks_won: e.tricks_won,
                delta: e.delta,
            })
            .collect(),
    }
}

fn player_to_api(name: &str, rec: &PlayerRecord) -> PlayerStateResponse {
    PlayerStateResponse {
        name: name.to_string(),
        bid: rec.bid,
        tricks_won: rec.tricks_won,
        score: rec.score,
    }
}

pub fn session_to_api(session: &GameSession) -> GameStateResponse {
    GameStateResponse {
        game_id: session.id.clone(),
        created_at: session.created_at,
        phase: session.phase().to_string(),
        max_rounds: session.max_rounds(),
        round: round_to_api(&session.round_info()),
        players: session
            .seats()
            .map(|(name, rec)| player_to_api(name, rec))
            .collect(),
        last_round: session.last_round().map(scored_round_to_api),
    }
}
