//! Canonical paths within the shared store.
//!
//! Every read and write goes through these builders so the room layout
//! is defined in exactly one place.

use crate::core::PlayerId;

/// `rooms/{code}`: the whole room document.
#[must_use]
pub fn room(code: &str) -> String {
    format!("rooms/{code}")
}

/// `rooms/{code}/privateHands`: all hands, host-only reads.
#[must_use]
pub fn private_hands(code: &str) -> String {
    format!("rooms/{code}/privateHands")
}

/// `rooms/{code}/privateHands/{player}/hand`: one player's hand.
#[must_use]
pub fn private_hand(code: &str, player: &PlayerId) -> String {
    format!("rooms/{code}/privateHands/{player}/hand")
}

/// `rooms/{code}/turnHistory`: append-only turn log.
#[must_use]
pub fn turn_history(code: &str) -> String {
    format!("rooms/{code}/turnHistory")
}

/// `rooms/{code}/presence/{player}`: liveness record.
#[must_use]
pub fn presence(code: &str, player: &PlayerId) -> String {
    format!("rooms/{code}/presence/{player}")
}

/// `rooms/{code}/presence`: all liveness records.
#[must_use]
pub fn presence_root(code: &str) -> String {
    format!("rooms/{code}/presence")
}
