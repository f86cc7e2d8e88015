//! Team turn order: round-robin interleaving across teams.
//!
//! Computed once at game start and stored on the state; forfeiture never
//! rebuilds it, the turn machine just skips forfeited entries while
//! walking it.

use std::collections::BTreeMap;

use super::player::Player;

/// Build the interleaved turn sequence for team play.
///
/// Team keys are visited in ascending order; for each round index, the
/// round-th member of every team (in seating order) is appended. Uneven
/// teams simply contribute nothing once exhausted. The result is a
/// permutation of player indices, reproducible from the same
/// assignment.
#[must_use]
pub fn team_turn_order(players: &[Player]) -> Vec<usize> {
    let mut teams: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, player) in players.iter().enumerate() {
        teams
            .entry(player.team_index.unwrap_or(0))
            .or_default()
            .push(idx);
    }

    let longest = teams.values().map(Vec::len).max().unwrap_or(0);
    let mut order = Vec::with_capacity(players.len());
    for round in 0..longest {
        for members in teams.values() {
            if let Some(&idx) = members.get(round) {
                order.push(idx);
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChipColor, PlayerId};

    fn player(id: &str, team: Option<usize>) -> Player {
        Player {
            id: PlayerId::from(id),
            name: id.to_string(),
            color: ChipColor::Coral,
            hand: Vec::new(),
            is_host: false,
            is_bot: false,
            team_index: team,
            forfeited: false,
            consecutive_timeouts: 0,
        }
    }

    #[test]
    fn test_two_even_teams_interleave() {
        let players = vec![
            player("a0", Some(0)),
            player("a1", Some(0)),
            player("b0", Some(1)),
            player("b1", Some(1)),
        ];
        assert_eq!(team_turn_order(&players), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_uneven_teams() {
        let players = vec![
            player("a0", Some(0)),
            player("a1", Some(0)),
            player("a2", Some(0)),
            player("b0", Some(1)),
        ];
        // Team 1 runs out after round 0.
        assert_eq!(team_turn_order(&players), vec![0, 3, 1, 2]);
    }

    #[test]
    fn test_team_keys_sorted_regardless_of_seating() {
        // Seating order puts team 2 first; the order still starts with
        // team 0's first member.
        let players = vec![
            player("c0", Some(2)),
            player("a0", Some(0)),
            player("b0", Some(1)),
        ];
        assert_eq!(team_turn_order(&players), vec![1, 2, 0]);
    }

    #[test]
    fn test_order_is_a_permutation() {
        let players = vec![
            player("a", Some(1)),
            player("b", Some(0)),
            player("c", Some(1)),
            player("d", Some(2)),
            player("e", Some(0)),
        ];
        let mut order = team_turn_order(&players);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }
}
