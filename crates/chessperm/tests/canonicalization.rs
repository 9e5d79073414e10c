//! Statistical checks on seed and key derivation: collisions, avalanche,
//! and single-bit differential propagation.

use std::collections::HashSet;

use chessperm::core::{kdf, SharedSecret, MESSAGE_KEY_LABEL};
use chessperm::{Engine, EngineConfig, KeyInput};
use chessperm_testkit::generators::{game_from_choices, legal_game, message, password};
use chessperm_testkit::vectors::verify_with;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn engine() -> Engine {
    Engine::new(EngineConfig::for_tests())
}

fn bit_diff(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

#[test]
fn test_vectors_hold_under_engine_config() {
    let canonicalizer = EngineConfig::for_tests().canonicalizer();
    for (name, passed) in verify_with(&canonicalizer) {
        assert!(passed, "vector '{name}' failed");
    }
}

#[test]
fn test_no_collisions_across_random_games() {
    let engine = engine();
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    let mut games = HashSet::new();
    let mut seeds = HashSet::new();

    for _ in 0..2000 {
        let choices: Vec<u16> = (0..12).map(|_| rng.gen()).collect();
        let game = game_from_choices(&choices);
        let seed = engine.canonicalize(&KeyInput::moves(&game).unwrap()).unwrap();
        games.insert(game);
        seeds.insert(*seed.as_bytes());
    }
    assert_eq!(seeds.len(), games.len());
}

#[test]
fn test_no_collisions_across_passwords() {
    let engine = engine();
    let mut seeds = HashSet::new();
    for i in 0..200 {
        let seed = engine
            .canonicalize(&KeyInput::password(&format!("password-{i:04}")))
            .unwrap();
        seeds.insert(*seed.as_bytes());
    }
    assert_eq!(seeds.len(), 200);
}

#[test]
fn test_last_move_avalanche() {
    let engine = engine();
    let base_moves = ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6"];
    let base = engine.canonicalize(&KeyInput::moves(base_moves).unwrap()).unwrap();

    let alternatives = ["Nf6", "b5", "d6", "Bc5", "Qe7", "Nge7", "f5", "g6"];
    let mut total = 0u32;
    let mut count = 0u32;
    for alt in alternatives {
        let mut moves = base_moves;
        moves[7] = alt;
        if moves == base_moves {
            continue;
        }
        let other = engine.canonicalize(&KeyInput::moves(moves).unwrap()).unwrap();
        total += bit_diff(base.as_bytes(), other.as_bytes());
        count += 1;
    }
    let mean = total as f64 / count as f64;
    assert!((96.0..=160.0).contains(&mean), "mean flipped bits {mean}");
}

#[test]
fn test_password_single_bit_propagation() {
    let engine = engine();
    let base_text = "password123";
    let base = engine.canonicalize(&KeyInput::password(base_text)).unwrap();

    let mut total = 0u32;
    let bytes = base_text.as_bytes();
    for i in 0..bytes.len() {
        let mut flipped = bytes.to_vec();
        flipped[i] ^= 1;
        let text = String::from_utf8(flipped).unwrap();
        let other = engine.canonicalize(&KeyInput::password(&text)).unwrap();
        let d = bit_diff(base.as_bytes(), other.as_bytes());
        assert!(d > 0);
        total += d;
    }
    let mean = total as f64 / bytes.len() as f64;
    assert!((96.0..=160.0).contains(&mean), "mean flipped bits {mean}");
}

#[test]
fn test_key_avalanche_through_kdf() {
    let engine = engine();
    let shared = SharedSecret::from_bytes([0x33; 32]);
    let a = engine.canonicalize(&KeyInput::moves(["d4", "d5", "c4"]).unwrap()).unwrap();
    let b = engine.canonicalize(&KeyInput::moves(["d4", "d5", "Nf3"]).unwrap()).unwrap();
    let ka = kdf::derive(&a, &shared, MESSAGE_KEY_LABEL);
    let kb = kdf::derive(&b, &shared, MESSAGE_KEY_LABEL);
    assert!(bit_diff(ka.as_bytes(), kb.as_bytes()) > 64);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_transcript_seed_deterministic(game in legal_game(1..40)) {
        let engine = engine();
        let from_tokens = engine.canonicalize(&KeyInput::moves(&game).unwrap()).unwrap();
        let from_text = engine.canonicalize(&KeyInput::pgn(&game.join(" ")).unwrap()).unwrap();
        prop_assert_eq!(from_tokens.as_bytes(), from_text.as_bytes());
    }

    #[test]
    fn prop_password_roundtrip(pw in password(), msg in message(64)) {
        let engine = engine();
        let mut rng = ChaCha20Rng::seed_from_u64(msg.len() as u64);
        let input = KeyInput::password(&pw);
        let out = engine.encrypt(&mut rng, &input, &msg, None).unwrap();
        let back = engine.decrypt(&out.stego, &out.private_key, &input).unwrap();
        prop_assert_eq!(back, msg);
    }

    #[test]
    fn prop_transcript_roundtrip(game in legal_game(1..40), msg in message(64)) {
        let engine = engine();
        let mut rng = ChaCha20Rng::seed_from_u64(game.len() as u64);
        let input = KeyInput::moves(&game).unwrap();
        let out = engine.encrypt(&mut rng, &input, &msg, None).unwrap();

        // The receiver retypes the game as plain movetext.
        let receiver = KeyInput::pgn(&game.join(" ")).unwrap();
        let back = engine.decrypt(&out.stego, &out.private_key, &receiver).unwrap();
        prop_assert_eq!(back, msg);
    }
}
