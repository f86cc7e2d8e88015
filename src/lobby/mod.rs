//! Pre-game lobby: seating, colors, teams, and the admission gate.
//!
//! ## Lifecycle
//!
//! A room starts as a `LobbyState` (status `waiting`), collects players
//! and their color picks, and converts into a `GameState` exactly once
//! when the host starts it and `can_start` holds. A finished game
//! converts back with `from_game` for a rematch, keeping seats and
//! colors but clearing readiness.
//!
//! Host-only operations verify the caller against the seated host; the
//! store shell passes identities through rather than trusting ambient
//! ones.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bot::{generate_bot_id, BOT_NAMES};
use crate::core::{ChipColor, GameRng, GameSettings, PlayerId, AVAILABLE_COLORS};
use crate::error::{GameError, LobbyBlocker};
use crate::game::{GameState, GameStatus, PlayerSeed};

/// One seat in the lobby. Color is `None` until picked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyPlayer {
    pub id: PlayerId,
    pub name: String,
    pub color: Option<ChipColor>,
    pub is_host: bool,
    pub is_ready: bool,
    #[serde(default)]
    pub is_bot: bool,
}

/// A room before (or between) games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyState {
    pub room_id: String,
    /// Always `Waiting`; present so the stored room document is tagged
    /// by lifecycle phase.
    pub status: GameStatus,
    pub settings: GameSettings,
    pub players: Vec<LobbyPlayer>,
    pub created_at: u64,
    /// Color per team index, team mode only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub team_colors: Vec<Option<ChipColor>>,
    /// Player to team index assignments, team mode only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub teams: BTreeMap<PlayerId, usize>,
}

impl LobbyState {
    /// Open a new lobby with the creator seated as host.
    #[must_use]
    pub fn new(
        room_id: impl Into<String>,
        host_id: PlayerId,
        host_name: impl Into<String>,
        settings: GameSettings,
        now_ms: u64,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            status: GameStatus::Waiting,
            settings,
            players: vec![LobbyPlayer {
                id: host_id,
                name: host_name.into(),
                color: None,
                is_host: true,
                is_ready: false,
                is_bot: false,
            }],
            created_at: now_ms,
            team_colors: Vec::new(),
            teams: BTreeMap::new(),
        }
    }

    /// Rebuild a lobby from a finished game for a rematch.
    ///
    /// Seats and colors carry over; humans must ready up again, bots
    /// are always ready.
    #[must_use]
    pub fn from_game(game: &GameState, now_ms: u64) -> Self {
        Self {
            room_id: game.room_id.clone(),
            status: GameStatus::Waiting,
            settings: game.settings.clone(),
            players: game
                .players
                .iter()
                .map(|p| LobbyPlayer {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    color: Some(p.color),
                    is_host: p.is_host,
                    is_ready: p.is_bot,
                    is_bot: p.is_bot,
                })
                .collect(),
            created_at: now_ms,
            team_colors: Vec::new(),
            teams: BTreeMap::new(),
        }
    }

    fn player(&self, id: &PlayerId) -> Option<&LobbyPlayer> {
        self.players.iter().find(|p| &p.id == id)
    }

    fn player_mut(&mut self, id: &PlayerId) -> Option<&mut LobbyPlayer> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    fn require_host(&self, id: &PlayerId) -> Result<(), GameError> {
        match self.player(id) {
            Some(p) if p.is_host => Ok(()),
            _ => Err(GameError::HostOnlyAction),
        }
    }

    /// Colors nobody has picked yet.
    #[must_use]
    pub fn available_colors(&self) -> Vec<ChipColor> {
        AVAILABLE_COLORS
            .into_iter()
            .filter(|color| !self.players.iter().any(|p| p.color == Some(*color)))
            .collect()
    }

    /// Seat a new human player.
    pub fn join(&mut self, id: PlayerId, name: impl Into<String>) -> Result<(), GameError> {
        if self.players.len() >= self.settings.max_players {
            return Err(GameError::RoomFull);
        }
        if self.player(&id).is_some() {
            return Err(GameError::AlreadyJoined);
        }
        self.players.push(LobbyPlayer {
            id,
            name: name.into(),
            color: None,
            is_host: false,
            is_ready: false,
            is_bot: false,
        });
        Ok(())
    }

    /// Remove a player. A departing host hands the role to the first
    /// remaining seat. Returns `true` when the room is now empty and
    /// should be deleted.
    pub fn leave(&mut self, id: &PlayerId) -> Result<bool, GameError> {
        let index = self
            .players
            .iter()
            .position(|p| &p.id == id)
            .ok_or(GameError::PlayerNotInRoom)?;
        let was_host = self.players[index].is_host;
        self.players.remove(index);
        self.teams.remove(id);

        if self.players.is_empty() {
            return Ok(true);
        }
        if was_host {
            self.players[0].is_host = true;
        }
        Ok(false)
    }

    /// Pick a chip color. Fails if another seat already has it.
    pub fn select_color(&mut self, id: &PlayerId, color: ChipColor) -> Result<(), GameError> {
        let taken = self
            .players
            .iter()
            .any(|p| p.color == Some(color) && &p.id != id);
        if taken {
            return Err(GameError::ColorAlreadyTaken);
        }
        let player = self.player_mut(id).ok_or(GameError::PlayerNotInRoom)?;
        player.color = Some(color);
        Ok(())
    }

    /// Toggle readiness. Requires a color first.
    pub fn toggle_ready(&mut self, id: &PlayerId) -> Result<(), GameError> {
        let player = self.player_mut(id).ok_or(GameError::PlayerNotInRoom)?;
        if player.color.is_none() {
            return Err(GameError::ColorNotSelected);
        }
        player.is_ready = !player.is_ready;
        Ok(())
    }

    /// Replace the game settings. Host only.
    pub fn update_settings(
        &mut self,
        host_id: &PlayerId,
        settings: GameSettings,
    ) -> Result<(), GameError> {
        self.require_host(host_id)?;
        self.settings = settings;
        Ok(())
    }

    /// Add a bot with an unused roster name and the first free color.
    /// Host only. Bots are ready from the moment they sit down.
    pub fn add_bot(&mut self, host_id: &PlayerId, rng: &mut GameRng) -> Result<PlayerId, GameError> {
        self.require_host(host_id)?;
        if self.players.len() >= self.settings.max_players {
            return Err(GameError::RoomFull);
        }
        let color = *self
            .available_colors()
            .first()
            .ok_or(GameError::NoColorsAvailable)?;
        let name = BOT_NAMES
            .iter()
            .find(|n| !self.players.iter().any(|p| p.name == **n))
            .map(|n| (*n).to_string())
            .unwrap_or_else(|| format!("Bot {}", self.players.len()));
        let id = generate_bot_id(rng);

        self.players.push(LobbyPlayer {
            id: id.clone(),
            name,
            color: Some(color),
            is_host: false,
            is_ready: true,
            is_bot: true,
        });
        Ok(id)
    }

    /// Remove a bot seat. Host only.
    pub fn remove_bot(&mut self, host_id: &PlayerId, bot_id: &PlayerId) -> Result<(), GameError> {
        self.require_host(host_id)?;
        let index = self
            .players
            .iter()
            .position(|p| &p.id == bot_id && p.is_bot)
            .ok_or(GameError::BotNotFound)?;
        self.players.remove(index);
        self.teams.remove(bot_id);
        Ok(())
    }

    /// Assign (or with `None`, unassign) a player to a team. Host only.
    pub fn assign_team(
        &mut self,
        host_id: &PlayerId,
        target: &PlayerId,
        team_index: Option<usize>,
    ) -> Result<(), GameError> {
        self.require_host(host_id)?;
        if self.player(target).is_none() {
            return Err(GameError::PlayerNotInRoom);
        }
        match team_index {
            Some(index) => {
                self.teams.insert(target.clone(), index);
            }
            None => {
                self.teams.remove(target);
            }
        }
        Ok(())
    }

    /// Set a team's chip color. Host only; colors are exclusive across
    /// teams.
    pub fn select_team_color(
        &mut self,
        host_id: &PlayerId,
        team_index: usize,
        color: ChipColor,
    ) -> Result<(), GameError> {
        self.require_host(host_id)?;
        let used_elsewhere = self
            .team_colors
            .iter()
            .enumerate()
            .any(|(i, c)| *c == Some(color) && i != team_index);
        if used_elsewhere {
            return Err(GameError::ColorAlreadyTaken);
        }
        if self.team_colors.len() <= team_index {
            self.team_colors.resize(team_index + 1, None);
        }
        self.team_colors[team_index] = Some(color);
        Ok(())
    }

    /// The admission gate: why the game cannot start yet, or `Ok`.
    ///
    /// Checked in a fixed order so clients show a stable first blocker.
    pub fn can_start(&self) -> Result<(), LobbyBlocker> {
        if self.players.len() < 2 {
            return Err(LobbyBlocker::NotEnoughPlayers);
        }

        if self.settings.teams_enabled {
            if !self.players.iter().all(|p| self.teams.contains_key(&p.id)) {
                return Err(LobbyBlocker::UnassignedTeams);
            }
            let used: std::collections::BTreeSet<usize> = self.teams.values().copied().collect();
            if used.len() < 2 {
                return Err(LobbyBlocker::TooFewTeams);
            }
            for team in used {
                if self.team_colors.get(team).copied().flatten().is_none() {
                    return Err(LobbyBlocker::MissingTeamColors);
                }
            }
        } else if !self.players.iter().all(|p| p.color.is_some()) {
            return Err(LobbyBlocker::MissingColors);
        }

        let all_ready = self
            .players
            .iter()
            .filter(|p| !p.is_host && !p.is_bot)
            .all(|p| p.is_ready);
        if !all_ready {
            return Err(LobbyBlocker::NotAllReady);
        }
        Ok(())
    }

    /// Convert the lobby into a running game. Host only.
    ///
    /// In team mode every member inherits their team's color, which is
    /// what lets win detection treat teammates' chips as one line.
    pub fn start_game(
        &self,
        host_id: &PlayerId,
        rng: &mut GameRng,
        now_ms: u64,
    ) -> Result<GameState, GameError> {
        self.require_host(host_id)?;
        self.can_start().map_err(GameError::LobbyNotReady)?;

        let seeds: Vec<PlayerSeed> = self
            .players
            .iter()
            .map(|p| {
                let (color, team_index) = if self.settings.teams_enabled {
                    let team = self.teams.get(&p.id).copied().unwrap_or(0);
                    let color = self
                        .team_colors
                        .get(team)
                        .copied()
                        .flatten()
                        .unwrap_or(ChipColor::Coral);
                    (color, Some(team))
                } else {
                    (p.color.unwrap_or(ChipColor::Coral), None)
                };
                PlayerSeed {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    color,
                    is_host: p.is_host,
                    is_bot: p.is_bot,
                    team_index,
                }
            })
            .collect();

        Ok(GameState::new(
            self.room_id.clone(),
            seeds,
            self.settings.clone(),
            rng,
            now_ms,
        ))
    }
}
