use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::engine::GameSession;

use super::errors::ApiError;
use super::extract::ValidatedJson;
use super::models::*;
use super::state::SharedState;

// =========================================================================
// Home & Health
// =========================================================================

/// GET /
pub async fn home(State(state): State<SharedState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        message: state.config.banner.clone(),
    })
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: "judgment-scorekeeper".to_string(),
        uptime,
    })
}

// =========================================================================
// Start Game
// =========================================================================

/// POST /api/game
pub async fn start_game(
    State(state): State<SharedState>,
    ValidatedJson(input): ValidatedJson<StartGameRequest>,
) -> Result<(StatusCode, Json<StartGameResponse>), ApiError> {
    let session = match (input.players, input.num_players) {
        (Some(players), _) => GameSession::new(&players.into_values("players")?)?,
        (None, Some(count)) => GameSession::with_player_count(count)?,
        (None, None) => {
            return Err(ApiError::InvalidRequest(
                "either players or numPlayers is required".into(),
            ));
        }
    };

    let game_id = session.id.clone();
    let players = session.players().to_vec();
    let max_rounds = session.max_rounds();

    let opening = state.table.write().await.start(session);

    Ok((
        StatusCode::CREATED,
        Json(StartGameResponse {
            game_id,
            message: format!(
                "Game started with {} players. Round 1 begins.",
                players.len()
            ),
            players,
            max_rounds,
            round: round_to_api(&opening),
        }),
    ))
}

// =========================================================================
// Game State
// =========================================================================

/// GET /api/game
pub async fn get_game(
    State(state): State<SharedState>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let table = state.table.read().await;
    let session = table.session()?;
    Ok(Json(session_to_api(session)))
}

// =========================================================================
// Bids
// =========================================================================

/// POST /api/game/bids
pub async fn set_bids(
    State(state): State<SharedState>,
    ValidatedJson(input): ValidatedJson<BidsRequest>,
) -> Result<Json<BidsResponse>, ApiError> {
    let bids = input.bids.into_values("bids")?;
    let round = state.table.write().await.record_bids(&bids)?;

    Ok(Json(BidsResponse {
        message: "Bids recorded. Start playing!".to_string(),
        round: round_to_api(&round),
    }))
}

// =========================================================================
// Tricks
// =========================================================================

/// POST /api/game/tricks
pub async fn record_tricks(
    State(state): State<SharedState>,
    ValidatedJson(input): ValidatedJson<TricksRequest>,
) -> Result<Json<TricksResponse>, ApiError> {
    let tricks = input.tricks.into_values("tricks")?;

    let mut table = state.table.write().await;
    let result = table.record_tricks(&tricks)?;
    let round_result = table.session()?.last_round().map(scored_round_to_api);
    drop(table);

    let game_over = result.outcome.is_game_over();

    Ok(Json(TricksResponse {
        message: if game_over {
            "Scores updated. Game over.".to_string()
        } else {
            "Scores updated.".to_string()
        },
        next_round: outcome_to_api(&result.outcome),
        scores: ScoresBody(result.scores),
        game_over,
        round_result,
    }))
}

// =========================================================================
// Scores
// =========================================================================

/// GET /api/game/scores
pub async fn get_scores(
    State(state): State<SharedState>,
) -> Result<Json<ScoresResponse>, ApiError> {
    let table = state.table.read().await;
    let session = table.session()?;
    Ok(Json(ScoresResponse {
        scores: ScoresBody(session.scores()),
        game_over: session.is_finished(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::router::create_router;
    use crate::api::state::{AppState, SharedState};
    use crate::config::AppConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state() -> SharedState {
        AppState::new(AppConfig::default())
    }

    async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_string(response: axum::http::Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn post(state: &SharedState, uri: &str, body: &str) -> axum::http::Response<Body> {
        create_router(state.clone())
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get(state: &SharedState, uri: &str) -> axum::http::Response<Body> {
        create_router(state.clone())
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    // --- Home & Health ---

    #[tokio::test]
    async fn health_returns_200() {
        let resp = get(&test_state(), "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["engine"], "judgment-scorekeeper");
    }

    #[tokio::test]
    async fn home_returns_banner() {
        let resp = get(&test_state(), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["message"], "Judgment Score Keeper API is running!");
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let resp = get(&test_state(), "/nope").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    // --- Start ---

    #[tokio::test]
    async fn start_game_with_csv_players() {
        let state = test_state();
        let resp = post(&state, "/api/game", r#"{"players":"Ann, Bo, Cy"}"#).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["round"], 1);
        assert_eq!(json["trumpSuit"], "Spades");
        assert_eq!(json["dealer"], "Ann");
        assert_eq!(json["cardsPerRound"], 1);
        assert_eq!(json["maxRounds"], 17);
        assert_eq!(json["players"], serde_json::json!(["Ann", "Bo", "Cy"]));
        assert!(json["gameId"].is_string());
    }

    #[tokio::test]
    async fn start_game_with_player_count() {
        let state = test_state();
        let resp = post(&state, "/api/game", r#"{"numPlayers":6}"#).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["maxRounds"], 8);
        assert_eq!(json["dealer"], "Player 1");
    }

    #[tokio::test]
    async fn start_game_rejects_bad_player_count() {
        let state = test_state();
        let resp = post(&state, "/api/game", r#"{"players":["A","B"]}"#).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "INVALID_PLAYER_COUNT");

        let resp = get(&state, "/api/game/scores").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn start_game_rejects_duplicate_names() {
        let resp = post(&test_state(), "/api/game", r#"{"players":"A,B,A"}"#).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "INVALID_PLAYER_NAME");
    }

    #[tokio::test]
    async fn start_game_requires_players() {
        let resp = post(&test_state(), "/api/game", "{}").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn malformed_json_returns_400() {
        let resp = post(&test_state(), "/api/game", "{not json").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "INVALID_REQUEST");
    }

    // --- Rounds ---

    #[tokio::test]
    async fn bids_before_start_returns_404() {
        let resp = post(&test_state(), "/api/game/bids", r#"{"bids":"1,2,0"}"#).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "NO_ACTIVE_GAME");
    }

    #[tokio::test]
    async fn tricks_before_bids_is_phase_violation() {
        let state = test_state();
        post(&state, "/api/game", r#"{"players":"A,B,C"}"#).await;

        let resp = post(&state, "/api/game/tricks", r#"{"tricks":[1,1,0]}"#).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "PHASE_VIOLATION");

        let json = body_json(get(&state, "/api/game/scores").await).await;
        assert_eq!(json["scores"]["A"], 0);
    }

    #[tokio::test]
    async fn bid_count_mismatch_returns_400() {
        let state = test_state();
        post(&state, "/api/game", r#"{"players":"A,B,C,D"}"#).await;
        let resp = post(&state, "/api/game/bids", r#"{"bids":[1,2,0]}"#).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "PLAYER_COUNT_MISMATCH");
    }

    #[tokio::test]
    async fn full_round_scores_and_advances() {
        let state = test_state();
        post(&state, "/api/game", r#"{"players":"A,B,C"}"#).await;

        let resp = post(&state, "/api/game/bids", r#"{"bids":"1,2,0"}"#).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["message"], "Bids recorded. Start playing!");

        let resp = post(&state, "/api/game/tricks", r#"{"tricks":"1,1,0"}"#).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["scores"]["A"], 11);
        assert_eq!(json["scores"]["B"], 0);
        assert_eq!(json["scores"]["C"], 10);
        assert_eq!(json["gameOver"], false);
        assert_eq!(json["nextRound"]["round"], 2);
        assert_eq!(json["nextRound"]["cardsPerRound"], 2);
        assert_eq!(json["nextRound"]["dealer"], "B");
        assert_eq!(json["nextRound"]["trumpSuit"], "Clubs");
        assert_eq!(json["roundResult"]["entries"][0]["delta"], 11);

        let json = body_json(get(&state, "/api/game").await).await;
        assert_eq!(json["phase"], "awaiting_bids");
        assert_eq!(json["round"], 2);
        assert_eq!(json["players"][1]["bid"], 2);
        assert_eq!(json["players"][1]["tricksWon"], 1);
        assert_eq!(json["lastRound"]["round"], 1);
    }

    #[tokio::test]
    async fn scores_keep_seating_order() {
        let state = test_state();
        post(&state, "/api/game", r#"{"players":"Zed,Amy,Max"}"#).await;
        let body = body_string(get(&state, "/api/game/scores").await).await;
        assert_eq!(body, r#"{"scores":{"Zed":0,"Amy":0,"Max":0},"gameOver":false}"#);
    }

    #[tokio::test]
    async fn last_round_reports_game_over() {
        let state = test_state();
        post(&state, "/api/game", r#"{"numPlayers":6}"#).await;
        for _ in 0..7 {
            post(&state, "/api/game/bids", r#"{"bids":"0,0,0,0,0,0"}"#).await;
            post(&state, "/api/game/tricks", r#"{"tricks":"0,0,0,0,0,0"}"#).await;
        }
        post(&state, "/api/game/bids", r#"{"bids":"0,0,0,0,0,0"}"#).await;
        let resp = post(&state, "/api/game/tricks", r#"{"tricks":"0,0,0,0,0,0"}"#).await;
        let json = body_json(resp).await;
        assert_eq!(json["gameOver"], true);
        assert!(json["nextRound"].is_null());
        assert_eq!(json["scores"]["Player 1"], 80);

        let json = body_json(get(&state, "/api/game/scores").await).await;
        assert_eq!(json["gameOver"], true);
        assert_eq!(json["scores"]["Player 6"], 80);

        let resp = post(&state, "/api/game/bids", r#"{"bids":"0,0,0,0,0,0"}"#).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // --- Legacy routes ---

    #[tokio::test]
    async fn legacy_routes_drive_a_round() {
        let state = test_state();
        let resp = post(&state, "/start_game", r#"{"players":"A,B,C"}"#).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let resp = post(&state, "/set_bids", r#"{"bids":"0,0,1"}"#).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = post(&state, "/record_tricks", r#"{"tricks":"0,0,1"}"#).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(get(&state, "/show_scores").await).await;
        assert_eq!(json["scores"]["C"], 11);
    }

    #[tokio::test]
    async fn legacy_start_accepts_num_players() {
        let state = test_state();
        let resp = post(&state, "/start_game", r#"{"num_players":4}"#).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["maxRounds"], 13);
        assert_eq!(json["dealer"], "Player 1");
        assert_eq!(json["players"].as_array().unwrap().len(), 4);
    }
}
