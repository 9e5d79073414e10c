//! Proptest generators for property-based testing.

use proptest::collection::SizeRange;
use proptest::prelude::*;
use shakmaty::san::San;
use shakmaty::{Chess, Position};

/// Replay `choices` from the starting position, picking one legal move per
/// entry, and return the SAN of each ply. Stops early at mate or stalemate.
pub fn game_from_choices(choices: &[u16]) -> Vec<String> {
    let mut pos = Chess::default();
    let mut sans = Vec::with_capacity(choices.len());
    for &choice in choices {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            break;
        }
        let m = &moves[choice as usize % moves.len()];
        sans.push(San::from_move(&pos, m).to_string());
        pos.play_unchecked(m);
    }
    sans
}

/// Generate a legal game as SAN tokens.
pub fn legal_game(plies: impl Into<SizeRange>) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(any::<u16>(), plies).prop_map(|choices| game_from_choices(&choices))
}

/// Generate a password that passes the default length policy.
pub fn password() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 !@#%&*-]{8,32}".prop_filter("must not trim below 8 chars", |p| {
        p.trim().chars().count() >= 8
    })
}

/// Generate message bytes of up to `max_len`.
pub fn message(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate small carrier dimensions.
pub fn carrier_dims() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=96, 1u32..=96)
}
