//! Canonicalization vectors.
//!
//! Each vector is a pair of key inputs and whether they must resolve to the
//! same seed. Together they pin down what canonicalization ignores (move
//! numbers, comments, annotation, redundant disambiguation, surrounding
//! whitespace) and what it must never ignore.

use chessperm_core::{Argon2Params, Canonicalizer, KeyInput};

/// One side of a vector.
#[derive(Debug, Clone, Copy)]
pub enum VectorInput {
    /// PGN movetext.
    Pgn(&'static str),
    /// A password.
    Password(&'static str),
}

impl VectorInput {
    fn to_key_input(self) -> KeyInput {
        match self {
            VectorInput::Pgn(text) => KeyInput::pgn(text).expect("vector PGN must be legal"),
            VectorInput::Password(pw) => KeyInput::password(pw),
        }
    }
}

/// A canonicalization vector.
#[derive(Debug, Clone)]
pub struct EquivalenceVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub a: VectorInput,
    pub b: VectorInput,
    /// Whether `a` and `b` must produce the same seed.
    pub same_seed: bool,
}

/// Get all vectors.
pub fn all_vectors() -> Vec<EquivalenceVector> {
    use VectorInput::{Password, Pgn};
    vec![
        EquivalenceVector {
            name: "move numbers and spacing",
            a: Pgn("1. e4 e5 2. Nf3"),
            b: Pgn("1.e4   e5\n2.Nf3"),
            same_seed: true,
        },
        EquivalenceVector {
            name: "comments, NAGs and variations",
            a: Pgn("1. e4 {best by test} e5 $1 2. Nf3 (2. f4) Nc6"),
            b: Pgn("1. e4 e5 2. Nf3 Nc6"),
            same_seed: true,
        },
        EquivalenceVector {
            name: "tag pairs and result",
            a: Pgn("[Event \"x\"]\n[Site \"y\"]\n\n1. d4 d5 1/2-1/2"),
            b: Pgn("d4 d5"),
            same_seed: true,
        },
        EquivalenceVector {
            name: "redundant disambiguation",
            a: Pgn("1. d4 d5 2. Nbd2"),
            b: Pgn("1. d4 d5 2. Nd2"),
            same_seed: true,
        },
        EquivalenceVector {
            name: "check marks and annotation",
            a: Pgn("1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6?? 4. Qxf7#"),
            b: Pgn("1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7"),
            same_seed: true,
        },
        EquivalenceVector {
            name: "zero castling",
            a: Pgn("1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. 0-0"),
            b: Pgn("1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. O-O"),
            same_seed: true,
        },
        EquivalenceVector {
            name: "password whitespace",
            a: Password("  correct horse  "),
            b: Password("correct horse"),
            same_seed: true,
        },
        EquivalenceVector {
            name: "one move differs",
            a: Pgn("1. e4 e5 2. Nf3"),
            b: Pgn("1. e4 e5 2. Nc3"),
            same_seed: false,
        },
        EquivalenceVector {
            name: "prefix game",
            a: Pgn("1. e4 e5"),
            b: Pgn("1. e4 e5 2. Nf3"),
            same_seed: false,
        },
        EquivalenceVector {
            name: "transposition",
            a: Pgn("1. Nf3 Nf6 2. d4"),
            b: Pgn("1. d4 Nf6 2. Nf3"),
            same_seed: false,
        },
        EquivalenceVector {
            name: "password case",
            a: Password("correct horse"),
            b: Password("Correct horse"),
            same_seed: false,
        },
        EquivalenceVector {
            name: "password inner whitespace",
            a: Password("correct horse"),
            b: Password("correct  horse"),
            same_seed: false,
        },
        EquivalenceVector {
            name: "movetext as password",
            a: Pgn("1. e4 e5 2. Nf3"),
            b: Password("1. e4 e5 2. Nf3"),
            same_seed: false,
        },
    ]
}

/// Check every vector with the given canonicalizer.
///
/// Returns `(name, passed)` per vector.
pub fn verify_with(canonicalizer: &Canonicalizer) -> Vec<(String, bool)> {
    all_vectors()
        .iter()
        .map(|v| {
            let a = canonicalizer.canonicalize(&v.a.to_key_input());
            let b = canonicalizer.canonicalize(&v.b.to_key_input());
            let passed = match (a, b) {
                (Ok(a), Ok(b)) => {
                    let same = a.origin() == b.origin() && a.as_bytes() == b.as_bytes();
                    same == v.same_seed
                }
                _ => false,
            };
            (v.name.to_string(), passed)
        })
        .collect()
}

/// Check every vector with fast Argon2 settings.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    verify_with(&Canonicalizer::new(Argon2Params::insecure_fast(), 8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_pass() {
        for (name, passed) in verify_all_vectors() {
            assert!(passed, "vector '{name}' failed");
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }
}
