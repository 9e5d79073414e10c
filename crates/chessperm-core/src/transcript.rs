//! Move transcripts: replaying movetext into canonical SAN.
//!
//! A transcript is accepted only if every move replays legally from the
//! standard starting position. Each move is re-rendered as minimal SAN from
//! the position it was played in, so equivalent spellings (`Nbd2` where `Nd2`
//! is unambiguous, a spurious `+`, `0-0` for `O-O`) produce the same record.

use shakmaty::san::{San, SanPlus};
use shakmaty::{Chess, Color, Position};

use crate::error::{CoreError, Result};
use crate::types::Blake3Hash;

/// Game termination markers that end PGN movetext.
const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// One replayed ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// 1-based ply index.
    pub ply: u32,
    /// Minimal SAN, without check or annotation suffixes.
    pub san: String,
    /// Hash of the board placement and side to move after this ply.
    pub board_hash: Blake3Hash,
}

/// An ordered, fully replayed sequence of moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTranscript {
    records: Vec<MoveRecord>,
}

impl MoveTranscript {
    /// Parse PGN movetext (with optional tag pairs, comments, variations,
    /// move numbers and result marker) and replay it.
    pub fn parse(movetext: &str) -> Result<Self> {
        let tokens = movetext_tokens(movetext)?;
        Self::from_moves(tokens)
    }

    /// Replay a sequence of SAN tokens, e.g. `["e4", "e5", "Nf3"]`.
    pub fn from_moves<I, S>(moves: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pos = Chess::default();
        let mut records = Vec::new();

        for (idx, raw) in moves.into_iter().enumerate() {
            let ply = idx as u32 + 1;
            let raw = raw.as_ref().trim();
            let invalid = |reason: String| CoreError::InvalidTranscript {
                ply,
                token: raw.to_string(),
                reason,
            };

            let token = normalize_token(raw);
            if token.is_empty() {
                return Err(invalid("empty move".into()));
            }

            let parsed: SanPlus = token.parse().map_err(|e| invalid(format!("{e}")))?;
            let m = parsed
                .san
                .to_move(&pos)
                .map_err(|e| invalid(format!("{e}")))?;

            let canonical = San::from_move(&pos, &m).to_string();
            pos.play_unchecked(&m);

            records.push(MoveRecord {
                ply,
                san: canonical,
                board_hash: board_hash(&pos),
            });
        }

        if records.is_empty() {
            return Err(CoreError::EmptyTranscript);
        }

        Ok(Self { records })
    }

    /// The replayed plies, in order.
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Number of plies.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed transcript; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The canonical SAN of every ply.
    pub fn san_moves(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.san.as_str())
    }

    /// Render as numbered movetext (`1. e4 e5 2. Nf3`).
    pub fn to_movetext(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            if record.ply % 2 == 1 {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&format!("{}. ", record.ply / 2 + 1));
            } else {
                out.push(' ');
            }
            out.push_str(&record.san);
        }
        out
    }
}

/// Hash of the position reached after a move.
fn board_hash(pos: &Chess) -> Blake3Hash {
    let side = match pos.turn() {
        Color::White => 'w',
        Color::Black => 'b',
    };
    Blake3Hash::hash(format!("{} {}", pos.board(), side).as_bytes())
}

/// Strip annotation suffixes and normalize zero-castling.
fn normalize_token(token: &str) -> String {
    let trimmed = token.trim_end_matches(&['!', '?'][..]);
    match trimmed.trim_end_matches(&['+', '#'][..]) {
        "0-0" => "O-O".to_string(),
        "0-0-0" => "O-O-O".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Split PGN movetext into bare SAN tokens.
///
/// Skips tag pairs, `{}` and `;` comments, `()` variations, NAGs, move
/// numbers and the result marker. Anything after a result marker is ignored.
pub(crate) fn movetext_tokens(text: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    let mut variation_depth = 0usize;

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.is_empty() {
            tokens.push(std::mem::take(current));
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                flush(&mut current, &mut tokens);
                if !chars.by_ref().any(|c| c == '}') {
                    return Err(CoreError::MalformedMovetext("unterminated comment".into()));
                }
            }
            ';' => {
                flush(&mut current, &mut tokens);
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '[' if variation_depth == 0 && current.is_empty() => {
                let mut in_quotes = false;
                let mut closed = false;
                for c in chars.by_ref() {
                    match c {
                        '"' => in_quotes = !in_quotes,
                        ']' if !in_quotes => {
                            closed = true;
                            break;
                        }
                        _ => {}
                    }
                }
                if !closed {
                    return Err(CoreError::MalformedMovetext("unterminated tag pair".into()));
                }
            }
            '(' => {
                flush(&mut current, &mut tokens);
                variation_depth += 1;
            }
            ')' => {
                if variation_depth == 0 {
                    return Err(CoreError::MalformedMovetext("unbalanced ')'".into()));
                }
                flush(&mut current, &mut tokens);
                variation_depth -= 1;
            }
            c if c.is_whitespace() => flush(&mut current, &mut tokens),
            c => {
                if variation_depth == 0 {
                    current.push(c);
                }
            }
        }
    }
    flush(&mut current, &mut tokens);

    if variation_depth != 0 {
        return Err(CoreError::MalformedMovetext("unterminated variation".into()));
    }

    let mut moves = Vec::with_capacity(tokens.len());
    for token in tokens {
        if RESULT_TOKENS.contains(&token.as_str()) {
            break;
        }
        if token.starts_with('$') || token == "e.p." {
            continue;
        }
        let san = strip_move_number(&token);
        if !san.is_empty() {
            moves.push(san.to_string());
        }
    }
    Ok(moves)
}

/// `12.` / `12...` / `12.e4` / `1...e5` -> the part after the dots.
fn strip_move_number(token: &str) -> &str {
    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return token;
    }
    let rest = &token[digits..];
    if rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}
