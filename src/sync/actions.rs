//! Store-backed room operations.
//!
//! Each operation is one read-mutate-write cycle against the room
//! document. Writes bump the public `version` counter so subscribers
//! can discard snapshots that arrive out of order. Hands travel only
//! through `privateHands/{player}/hand`; the public player records
//! always carry empty hands.

use serde_json::Value;

use crate::board::check_winner;
use crate::core::{ChipColor, GameRng, GameSettings, PlayerId};
use crate::deck::Card;
use crate::error::{GameError, StoreError};
use crate::game::{
    valid_placements, GameState, GameStatus, Placements, TurnOutcome, TurnRequest,
};
use crate::lobby::LobbyState;
use crate::store::{paths, DocumentStore, RoomDocument};

const ROOM_CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ROOM_CODE_LEN: usize = 6;

/// Random 6-character room code, A-Z and digits.
#[must_use]
pub fn generate_room_code(rng: &mut GameRng) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| ROOM_CODE_CHARS[rng.gen_range_usize(0..ROOM_CODE_CHARS.len())] as char)
        .collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, GameError> {
    serde_json::to_value(value)
        .map_err(|e| GameError::from(StoreError::new(format!("serialize failed: {e}"))))
}

/// Read and parse the room document.
pub fn read_room(store: &dyn DocumentStore, code: &str) -> Result<RoomDocument, GameError> {
    let value = store.get(&paths::room(code))?.ok_or(GameError::RoomNotFound)?;
    Ok(RoomDocument::from_value(value)?)
}

fn write_lobby(store: &dyn DocumentStore, lobby: &LobbyState) -> Result<(), GameError> {
    store.set(&paths::room(&lobby.room_id), to_json(lobby)?)?;
    Ok(())
}

/// Read-mutate-write against a room that must still be in the lobby
/// phase.
fn with_lobby<T>(
    store: &dyn DocumentStore,
    code: &str,
    mutate: impl FnOnce(&mut LobbyState) -> Result<T, GameError>,
) -> Result<T, GameError> {
    let mut lobby = match read_room(store, code)? {
        RoomDocument::Lobby(lobby) => lobby,
        RoomDocument::Game(_) => return Err(GameError::GameInProgress),
    };
    let result = mutate(&mut lobby)?;
    write_lobby(store, &lobby)?;
    Ok(result)
}

/// Create a room with the caller seated as host. Returns the code.
pub fn create_lobby(
    store: &dyn DocumentStore,
    host_id: PlayerId,
    host_name: &str,
    settings: GameSettings,
    rng: &mut GameRng,
    now_ms: u64,
) -> Result<String, GameError> {
    let code = loop {
        let candidate = generate_room_code(rng);
        if store.get(&paths::room(&candidate))?.is_none() {
            break candidate;
        }
    };
    let lobby = LobbyState::new(code.clone(), host_id, host_name, settings, now_ms);
    write_lobby(store, &lobby)?;
    tracing::info!(room = %code, "lobby created");
    Ok(code)
}

pub fn join_lobby(
    store: &dyn DocumentStore,
    code: &str,
    player_id: PlayerId,
    player_name: &str,
) -> Result<(), GameError> {
    with_lobby(store, code, |lobby| lobby.join(player_id, player_name))
}

/// Remove a player; deletes the room when the last seat empties.
pub fn leave_lobby(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
) -> Result<(), GameError> {
    let mut lobby = match read_room(store, code)? {
        RoomDocument::Lobby(lobby) => lobby,
        RoomDocument::Game(_) => return Err(GameError::GameInProgress),
    };
    if lobby.leave(player_id)? {
        store.remove(&paths::room(code))?;
        tracing::info!(room = %code, "room deleted, last player left");
        return Ok(());
    }
    write_lobby(store, &lobby)
}

pub fn select_color(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
    color: ChipColor,
) -> Result<(), GameError> {
    with_lobby(store, code, |lobby| lobby.select_color(player_id, color))
}

pub fn toggle_ready(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
) -> Result<(), GameError> {
    with_lobby(store, code, |lobby| lobby.toggle_ready(player_id))
}

pub fn update_settings(
    store: &dyn DocumentStore,
    code: &str,
    host_id: &PlayerId,
    settings: GameSettings,
) -> Result<(), GameError> {
    with_lobby(store, code, |lobby| lobby.update_settings(host_id, settings))
}

pub fn add_bot(
    store: &dyn DocumentStore,
    code: &str,
    host_id: &PlayerId,
    rng: &mut GameRng,
) -> Result<PlayerId, GameError> {
    with_lobby(store, code, |lobby| lobby.add_bot(host_id, rng))
}

pub fn remove_bot(
    store: &dyn DocumentStore,
    code: &str,
    host_id: &PlayerId,
    bot_id: &PlayerId,
) -> Result<(), GameError> {
    with_lobby(store, code, |lobby| lobby.remove_bot(host_id, bot_id))
}

pub fn assign_team(
    store: &dyn DocumentStore,
    code: &str,
    host_id: &PlayerId,
    target: &PlayerId,
    team_index: Option<usize>,
) -> Result<(), GameError> {
    with_lobby(store, code, |lobby| {
        lobby.assign_team(host_id, target, team_index)
    })
}

pub fn select_team_color(
    store: &dyn DocumentStore,
    code: &str,
    host_id: &PlayerId,
    team_index: usize,
    color: ChipColor,
) -> Result<(), GameError> {
    with_lobby(store, code, |lobby| {
        lobby.select_team_color(host_id, team_index, color)
    })
}

/// Split a game into store changes: public fields (players handless)
/// plus one private subtree entry per hand.
fn game_changes(game: &GameState) -> Result<serde_json::Map<String, Value>, GameError> {
    let mut public = game.clone();
    let mut changes = serde_json::Map::new();

    for player in &mut public.players {
        changes.insert(
            format!("privateHands/{}/hand", player.id),
            to_json(&player.hand)?,
        );
        player.hand.clear();
    }
    // The log lives in its own append-only subtree.
    public.turn_history.clear();

    match to_json(&public)? {
        Value::Object(fields) => changes.extend(fields),
        _ => return Err(StoreError::new("game state is not an object").into()),
    }
    Ok(changes)
}

fn write_game(store: &dyn DocumentStore, game: &GameState) -> Result<(), GameError> {
    store.update(&paths::room(&game.room_id), game_changes(game)?)?;
    Ok(())
}

/// Host only; replaces the lobby document with the freshly dealt game.
pub fn start_game(
    store: &dyn DocumentStore,
    code: &str,
    host_id: &PlayerId,
    rng: &mut GameRng,
    now_ms: u64,
) -> Result<(), GameError> {
    let lobby = match read_room(store, code)? {
        RoomDocument::Lobby(lobby) => lobby,
        RoomDocument::Game(_) => return Err(GameError::GameInProgress),
    };
    let mut game = lobby.start_game(host_id, rng, now_ms)?;
    game.version = 1;

    // Full replace: clears any leftover state from a previous game.
    let mut hands = serde_json::Map::new();
    for player in &mut game.players {
        hands.insert(
            player.id.to_string(),
            serde_json::json!({ "hand": to_json(&player.hand)? }),
        );
        player.hand.clear();
    }
    let mut document = to_json(&game)?;
    document["privateHands"] = Value::Object(hands);
    store.set(&paths::room(code), document)?;
    tracing::info!(room = %code, players = game.players.len(), "game started");
    Ok(())
}

/// Public game state, hands empty.
pub fn load_game(store: &dyn DocumentStore, code: &str) -> Result<GameState, GameError> {
    match read_room(store, code)? {
        RoomDocument::Game(game) => Ok(*game),
        RoomDocument::Lobby(_) => Err(GameError::GameNotInProgress),
    }
}

/// One player's private hand.
pub fn private_hand(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
) -> Result<Vec<Card>, GameError> {
    match store.get(&paths::private_hand(code, player_id))? {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| StoreError::new(format!("malformed hand: {e}")).into()),
        None => Ok(Vec::new()),
    }
}

/// Public state plus every private hand, for the acting client.
pub fn load_full_game(store: &dyn DocumentStore, code: &str) -> Result<GameState, GameError> {
    let mut game = load_game(store, code)?;
    for index in 0..game.players.len() {
        let id = game.players[index].id.clone();
        game.players[index].hand = private_hand(store, code, &id)?;
    }
    Ok(game)
}

/// Result of a turn executed through the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub outcome: TurnOutcome,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

/// Validate and apply one turn, then publish the result.
///
/// The full state is reconstructed from the public zone and the
/// private hands, the turn machine runs locally, the board is scanned
/// for a win, and the split state goes back to the store along with an
/// appended history entry.
pub fn execute_player_turn(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
    request: &TurnRequest,
    rng: &mut GameRng,
    now_ms: u64,
) -> Result<TurnReport, GameError> {
    let mut game = load_full_game(store, code)?;
    let outcome = game.apply_turn(player_id, request, rng, now_ms)?;

    let win = check_winner(&game.board, game.settings.win_length);
    if let Some(win) = &win {
        game.status = GameStatus::Finished;
        game.winner = Some(win.winner.clone());
    }
    game.version += 1;

    write_game(store, &game)?;
    store.append(&paths::turn_history(code), to_json(&outcome.entry)?)?;

    tracing::debug!(
        room = %code,
        player = %player_id,
        action = ?outcome.entry.action,
        cell = ?outcome.entry.cell_number,
        "turn applied"
    );
    if let Some(win) = &win {
        tracing::info!(room = %code, winner = %win.winner, "game over");
    }

    Ok(TurnReport {
        outcome,
        game_over: win.is_some(),
        winner: win.map(|w| w.winner),
    })
}

/// Concede (or be conceded by the timer policy).
pub fn forfeit_player(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
) -> Result<Option<PlayerId>, GameError> {
    let mut game = load_full_game(store, code)?;
    let outcome = game.forfeit(player_id)?;
    game.version += 1;
    write_game(store, &game)?;

    if outcome.game_over {
        tracing::info!(room = %code, winner = ?outcome.winner, "game over by forfeit");
    }
    Ok(outcome.winner)
}

/// Rematch: convert a finished game back into a lobby. Only the host
/// or the winner may trigger it.
pub fn reset_to_lobby(
    store: &dyn DocumentStore,
    code: &str,
    requester: &PlayerId,
    now_ms: u64,
) -> Result<(), GameError> {
    let game = load_game(store, code)?;
    let allowed = game
        .player(requester)
        .is_some_and(|p| p.is_host)
        || game.winner.as_ref() == Some(requester);
    if !allowed {
        return Err(GameError::HostOnlyAction);
    }

    let lobby = LobbyState::from_game(&game, now_ms);
    // Full replace clears the board, deck, hands, and turn log.
    store.set(&paths::room(code), to_json(&lobby)?)?;
    Ok(())
}

/// Legal targets for one card in the requester's hand.
pub fn valid_moves_for_card(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
    card_id: &crate::core::CardId,
) -> Result<Placements, GameError> {
    let game = load_game(store, code)?;
    let hand = private_hand(store, code, player_id)?;
    let card = hand
        .iter()
        .find(|c| &c.id == card_id)
        .ok_or(GameError::CardNotInHand)?;
    Ok(valid_placements(&game.board, card, &game.settings))
}
