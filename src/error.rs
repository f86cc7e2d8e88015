//! Error types for the rules engine and the store-facing shell.
//!
//! Every failure is a structured value, never a panic crossing the engine
//! boundary. Two families are kept separate so callers (and the test
//! suite) can tell an illegal move from a transport fault:
//! - `GameError`: rules-engine and lobby validation failures
//! - `StoreError`: shared-store transport/serialization failures

use thiserror::Error;

/// Reason a chip placement was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The target cell number does not exist on the board.
    #[error("cell does not exist")]
    CellMissing,

    /// The target cell already holds a chip and overrides are disabled.
    #[error("cell is already occupied")]
    CellOccupied,

    /// Natural play requires the target to equal the card value.
    #[error("natural play requires exact match")]
    NaturalMismatch,

    /// Higher play requires the target to exceed the card value.
    #[error("higher play requires target > card value")]
    HigherNotGreater,
}

/// Reason the lobby is not ready to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LobbyBlocker {
    #[error("need at least 2 players")]
    NotEnoughPlayers,

    #[error("all players must select colors")]
    MissingColors,

    #[error("all players must be ready")]
    NotAllReady,

    #[error("all players must be assigned to a team")]
    UnassignedTeams,

    #[error("need at least 2 teams")]
    TooFewTeams,

    #[error("all teams must have colors")]
    MissingTeamColors,
}

/// A shared-store transport or serialization failure.
///
/// Deliberately a plain string: store backends vary, and the rules engine
/// only needs to surface the failure, not interpret it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("store failure: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// All non-fatal failures surfaced by the engine and sync shell.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("room not found")]
    RoomNotFound,

    #[error("game is not in progress")]
    GameNotInProgress,

    #[error("game already in progress")]
    GameInProgress,

    #[error("not your turn")]
    NotYourTurn,

    #[error("invalid placement: {0}")]
    InvalidPlacement(#[from] PlacementError),

    #[error("card not in hand")]
    CardNotInHand,

    #[error("no other players in game")]
    NoOtherPlayers,

    #[error("only the host can do that")]
    HostOnlyAction,

    #[error("room is full")]
    RoomFull,

    #[error("color already taken")]
    ColorAlreadyTaken,

    #[error("no colors available")]
    NoColorsAvailable,

    #[error("must select a color first")]
    ColorNotSelected,

    #[error("bot not found")]
    BotNotFound,

    #[error("player not in room")]
    PlayerNotInRoom,

    #[error("already in this room")]
    AlreadyJoined,

    #[error("cannot start: {0}")]
    LobbyNotReady(LobbyBlocker),

    #[error(transparent)]
    Store(#[from] StoreError),
}
