//! Synchronization shell: everything that reads or writes the shared
//! store on behalf of a client.
//!
//! The rules engine stays pure; this layer does the read-mutate-write
//! cycles, splits hands into the private zone, appends the turn log,
//! and carries the host-side policies (bot driving, turn timing,
//! presence) that exactly one client runs.

pub mod actions;
pub mod host;
pub mod presence;
pub mod timer;

pub use actions::{
    add_bot, assign_team, create_lobby, execute_player_turn, forfeit_player, generate_room_code,
    join_lobby, leave_lobby, load_full_game, load_game, private_hand, read_room, remove_bot,
    reset_to_lobby, select_color, select_team_color, start_game, toggle_ready, update_settings,
    valid_moves_for_card, TurnReport,
};
pub use host::HostDriver;
pub use presence::{
    go_offline, heartbeat, init_presence, is_online, offline_players, read_presence,
    PresenceRecord, ONLINE_WINDOW_MS,
};
pub use timer::{
    enforce_timeout, TimerTick, TurnTimer, AFK_FORFEIT_THRESHOLD, TURN_DURATION_SECS,
    WARNING_THRESHOLDS,
};
