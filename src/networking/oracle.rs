//! Legality oracle client
//!
//! The client never decides legality itself. Before a move is applied, and
//! when a piece is picked up, the oracle is asked over HTTP. After a move it
//! is asked whether the next player has been mated or stalemated. Any failure
//! is reported as an error and the engine treats it as "no".

use crate::game::resources::Position;
use crate::game::types::{PieceColor, PieceType, Square};
use crate::networking::error::{OracleError, OracleResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

const VALIDATE_MOVE_PATH: &str = "move_validation_api/validate-move/";
const LEGAL_MOVES_PATH: &str = "move_validation_api/get-legal-moves/";
const CHECKMATED_PATH: &str = "move_validation_api/get-is-checkmated/";
const STALEMATED_PATH: &str = "move_validation_api/get-is-stalemated/";
const PARSE_FEN_PATH: &str = "gameplay_api/parse-fen/";

/// The piece and squares a question is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveInfo {
    pub piece_color: PieceColor,
    pub piece_type: PieceType,
    pub starting_square: Square,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_square: Option<Square>,
}

impl MoveInfo {
    pub fn new(piece_color: PieceColor, piece_type: PieceType, starting_square: Square) -> Self {
        Self {
            piece_color,
            piece_type,
            starting_square,
            destination_square: None,
        }
    }

    pub fn to(mut self, destination: Square) -> Self {
        self.destination_square = Some(destination);
        self
    }
}

/// Remote rule engine
#[async_trait]
pub trait LegalityOracle: Send + Sync {
    /// Whether `move_info` (with a destination) is legal in `position`
    async fn is_move_legal(&self, position: &Position, move_info: &MoveInfo) -> OracleResult<bool>;

    /// Every legal destination of the piece on `move_info.starting_square`
    async fn legal_moves(&self, position: &Position, move_info: &MoveInfo)
        -> OracleResult<Vec<Square>>;

    /// Whether the `king_color` side is checkmated in `position`
    async fn is_checkmated(&self, position: &Position, king_color: PieceColor) -> OracleResult<bool>;

    /// Whether the `king_color` side has no legal move without being in check
    async fn is_stalemated(&self, position: &Position, king_color: PieceColor) -> OracleResult<bool>;
}

#[derive(Serialize)]
struct OracleRequest<'a> {
    parsed_fen: &'a Position,
    move_info: &'a MoveInfo,
}

#[derive(Serialize)]
struct GameResultRequest<'a> {
    parsed_fen: &'a Position,
    king_color: PieceColor,
}

#[derive(Deserialize)]
struct ValidateMoveResponse {
    is_valid: bool,
}

#[derive(Deserialize)]
struct CheckmatedResponse {
    is_checkmated: bool,
}

#[derive(Deserialize)]
struct StalematedResponse {
    is_stalemated: bool,
}

/// Oracle backed by the game server's REST API
#[derive(Debug, Clone)]
pub struct HttpLegalityOracle {
    client: reqwest::Client,
    api_base: Url,
    access_token: Option<String>,
}

impl HttpLegalityOracle {
    pub fn new(mut api_base: Url, access_token: Option<String>) -> Self {
        // `Url::join` replaces the last segment unless the base ends with a slash
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }
        Self {
            client: reqwest::Client::new(),
            api_base,
            access_token,
        }
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub(crate) fn endpoint(&self, path: &str) -> OracleResult<Url> {
        Ok(self.api_base.join(path)?)
    }

    /// Ask the FEN-parsing service for an initial position
    pub async fn parse_fen(&self, fen: &str) -> OracleResult<Position> {
        let mut url = self.endpoint(PARSE_FEN_PATH)?;
        url.query_pairs_mut().append_pair("raw_fen_string", fen);
        debug!("[ORACLE] GET {}", url);
        let request = self.client.get(url.clone());
        let response = self.authorize(request).send().await?;
        let response = check_status(response, &url)?;
        Ok(response.json::<Position>().await?)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> OracleResult<R>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de> + Send,
    {
        let url = self.endpoint(path)?;
        let request = self.client.post(url.clone()).json(body);
        let response = self.authorize(request).send().await?;
        let response = check_status(response, &url)?;
        Ok(response.json::<R>().await?)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn check_status(response: reqwest::Response, url: &Url) -> OracleResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(OracleError::Status {
            status: status.as_u16(),
            endpoint: url.to_string(),
        })
    }
}

#[async_trait]
impl LegalityOracle for HttpLegalityOracle {
    async fn is_move_legal(&self, position: &Position, move_info: &MoveInfo) -> OracleResult<bool> {
        let body = OracleRequest {
            parsed_fen: position,
            move_info,
        };
        let response: ValidateMoveResponse = self.post(VALIDATE_MOVE_PATH, &body).await?;
        debug!(
            "[ORACLE] {} {} {:?} -> {}",
            move_info.piece_type, move_info.starting_square, move_info.destination_square,
            response.is_valid
        );
        Ok(response.is_valid)
    }

    async fn legal_moves(
        &self,
        position: &Position,
        move_info: &MoveInfo,
    ) -> OracleResult<Vec<Square>> {
        let body = OracleRequest {
            parsed_fen: position,
            move_info,
        };
        self.post(LEGAL_MOVES_PATH, &body).await
    }

    async fn is_checkmated(&self, position: &Position, king_color: PieceColor) -> OracleResult<bool> {
        let body = GameResultRequest {
            parsed_fen: position,
            king_color,
        };
        let response: CheckmatedResponse = self.post(CHECKMATED_PATH, &body).await?;
        debug!("[ORACLE] {} checkmated -> {}", king_color, response.is_checkmated);
        Ok(response.is_checkmated)
    }

    async fn is_stalemated(&self, position: &Position, king_color: PieceColor) -> OracleResult<bool> {
        let body = GameResultRequest {
            parsed_fen: position,
            king_color,
        };
        let response: StalematedResponse = self.post(STALEMATED_PATH, &body).await?;
        debug!("[ORACLE] {} stalemated -> {}", king_color, response.is_stalemated);
        Ok(response.is_stalemated)
    }
}
