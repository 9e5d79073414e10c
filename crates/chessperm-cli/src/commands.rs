//! Subcommand implementations.

use anyhow::{Context, Result};
use clap::Args;
use rand::{CryptoRng, RngCore};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

use chessperm::{CarrierImage, Engine, KeyInput, MoveTranscript};

/// Where the key material comes from. Exactly one is required.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct KeyArgs {
    /// Game movetext (PGN), e.g. "1. e4 e5 2. Nf3"
    #[arg(long)]
    pgn: Option<String>,

    /// File containing a PGN game
    #[arg(long, value_name = "PATH")]
    pgn_file: Option<PathBuf>,

    /// Password (at least 8 characters by default)
    #[arg(long)]
    password: Option<String>,
}

impl KeyArgs {
    fn to_key_input(&self) -> Result<KeyInput> {
        if let Some(password) = &self.password {
            return Ok(KeyInput::password(password));
        }
        let movetext = read_movetext(self.pgn.as_deref(), self.pgn_file.as_deref())?;
        Ok(KeyInput::pgn(&movetext).map_err(chessperm::EngineError::from)?)
    }
}

/// A game, for `canonicalize`.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct PgnArgs {
    /// Game movetext (PGN)
    #[arg(long)]
    pgn: Option<String>,

    /// File containing a PGN game
    #[arg(long, value_name = "PATH")]
    pgn_file: Option<PathBuf>,
}

fn read_movetext(pgn: Option<&str>, pgn_file: Option<&Path>) -> Result<Zeroizing<String>> {
    match (pgn, pgn_file) {
        (Some(text), _) => Ok(Zeroizing::new(text.to_string())),
        (None, Some(path)) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading PGN file {}", path.display()))?;
            Ok(Zeroizing::new(text))
        }
        (None, None) => anyhow::bail!("no game given"),
    }
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct MessageArgs {
    /// Message text
    #[arg(long)]
    message: Option<String>,

    /// File whose bytes are the message
    #[arg(long, value_name = "PATH")]
    message_file: Option<PathBuf>,
}

impl MessageArgs {
    fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        match (&self.message, &self.message_file) {
            (Some(text), _) => Ok(Zeroizing::new(text.as_bytes().to_vec())),
            (None, Some(path)) => fs::read(path)
                .map(Zeroizing::new)
                .with_context(|| format!("reading message file {}", path.display())),
            (None, None) => anyhow::bail!("no message given"),
        }
    }
}

#[derive(Args)]
pub struct EncryptArgs {
    #[command(flatten)]
    key: KeyArgs,

    #[command(flatten)]
    message: MessageArgs,

    /// Lossless carrier image (PNG, BMP, TIFF, QOI). A textured carrier is
    /// generated when omitted.
    #[arg(long, value_name = "PATH")]
    carrier: Option<PathBuf>,

    /// Output directory for stego.png and private_key.txt
    #[arg(long, value_name = "DIR")]
    out: PathBuf,
}

#[derive(Args)]
pub struct DecryptArgs {
    /// Stego image
    #[arg(long, value_name = "PATH")]
    stego: PathBuf,

    /// Private key file written by `encrypt`
    #[arg(long, value_name = "PATH")]
    private_key: PathBuf,

    #[command(flatten)]
    key: KeyArgs,

    /// Write the raw message bytes here instead of printing them
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CapacityArgs {
    /// Carrier image; the generated default carrier when omitted
    #[arg(long, value_name = "PATH")]
    carrier: Option<PathBuf>,
}

#[derive(Args)]
pub struct CanonicalizeArgs {
    #[command(flatten)]
    game: PgnArgs,
}

pub fn encrypt<R: RngCore + CryptoRng>(
    engine: &Engine,
    rng: &mut R,
    args: EncryptArgs,
) -> Result<()> {
    let input = args.key.to_key_input()?;
    let message = args.message.to_bytes()?;
    let carrier = args
        .carrier
        .as_deref()
        .map(|path| {
            fs::read(path).with_context(|| format!("reading carrier {}", path.display()))
        })
        .transpose()?;

    let bundle = engine.encrypt_png(rng, &input, &message, carrier.as_deref())?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;
    let stego_path = args.out.join("stego.png");
    let key_path = args.out.join("private_key.txt");
    fs::write(&stego_path, &bundle.stego_png)
        .with_context(|| format!("writing {}", stego_path.display()))?;
    fs::write(&key_path, format!("{}\n", bundle.private_key_hex.as_str()))
        .with_context(|| format!("writing {}", key_path.display()))?;

    tracing::info!(message_len = message.len(), out = %args.out.display(), "bundle written");
    println!("Stego image:  {}", stego_path.display());
    println!("Private key:  {}", key_path.display());
    Ok(())
}

pub fn decrypt(engine: &Engine, args: DecryptArgs) -> Result<()> {
    let stego = fs::read(&args.stego)
        .with_context(|| format!("reading stego image {}", args.stego.display()))?;
    let private_key = Zeroizing::new(
        fs::read_to_string(&args.private_key)
            .with_context(|| format!("reading private key {}", args.private_key.display()))?,
    );
    let input = args.key.to_key_input()?;

    let message = engine.decrypt_png(&stego, &private_key, &input)?;
    tracing::debug!(message_len = message.len(), "message recovered");

    match &args.output {
        Some(path) => {
            fs::write(path, &message).with_context(|| format!("writing {}", path.display()))?;
            println!("Message written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&message)?;
            if !message.ends_with(b"\n") {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

pub fn capacity(engine: &Engine, args: CapacityArgs) -> Result<()> {
    let carrier = args
        .carrier
        .as_deref()
        .map(|path| CarrierImage::open(path).map_err(chessperm::EngineError::from))
        .transpose()?;
    let bytes = engine.capacity_for(carrier.as_ref())?;
    let (width, height) = match &carrier {
        Some(c) => (c.width(), c.height()),
        None => (engine.config().carrier.width, engine.config().carrier.height),
    };
    println!("{width}x{height} carrier holds up to {bytes} message bytes");
    Ok(())
}

pub fn canonicalize(args: CanonicalizeArgs) -> Result<()> {
    let movetext = read_movetext(args.game.pgn.as_deref(), args.game.pgn_file.as_deref())?;
    let transcript = MoveTranscript::parse(&movetext).map_err(chessperm::EngineError::from)?;
    print!("{}", render_canonical(&transcript));
    Ok(())
}

/// One `ply  san` line per move, then the normalized movetext.
fn render_canonical(transcript: &MoveTranscript) -> String {
    let mut out = String::new();
    for record in transcript.records() {
        out.push_str(&format!("{:>4}  {}\n", record.ply, record.san));
    }
    out.push('\n');
    out.push_str(&transcript.to_movetext());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessperm::{EngineConfig, EngineError, ErrorKind};
    use rand::SeedableRng;

    fn engine() -> Engine {
        Engine::new(EngineConfig::for_tests())
    }

    fn pgn_key(pgn: &str) -> KeyArgs {
        KeyArgs {
            pgn: Some(pgn.to_string()),
            pgn_file: None,
            password: None,
        }
    }

    fn password_key(password: &str) -> KeyArgs {
        KeyArgs {
            pgn: None,
            pgn_file: None,
            password: Some(password.to_string()),
        }
    }

    fn kind(err: &anyhow::Error) -> Option<ErrorKind> {
        err.chain()
            .find_map(|e| e.downcast_ref::<EngineError>())
            .map(EngineError::kind)
    }

    #[test]
    fn test_encrypt_then_decrypt_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bundle");
        let engine = engine();
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);

        encrypt(
            &engine,
            &mut rng,
            EncryptArgs {
                key: pgn_key("1. e4 e5 2. Nf3"),
                message: MessageArgs {
                    message: Some("hello".into()),
                    message_file: None,
                },
                carrier: None,
                out: out.clone(),
            },
        )
        .unwrap();
        assert!(out.join("stego.png").exists());
        assert!(out.join("private_key.txt").exists());

        let recovered = dir.path().join("message.txt");
        decrypt(
            &engine,
            DecryptArgs {
                stego: out.join("stego.png"),
                private_key: out.join("private_key.txt"),
                key: pgn_key("e4 e5 Nf3"),
                output: Some(recovered.clone()),
            },
        )
        .unwrap();
        assert_eq!(fs::read(&recovered).unwrap(), b"hello");

        let err = decrypt(
            &engine,
            DecryptArgs {
                stego: out.join("stego.png"),
                private_key: out.join("private_key.txt"),
                key: pgn_key("e4 e5 Nc3"),
                output: None,
            },
        )
        .unwrap_err();
        assert_eq!(kind(&err), Some(ErrorKind::AuthFailure));
    }

    #[test]
    fn test_encrypt_with_carrier_and_message_file() {
        let dir = tempfile::tempdir().unwrap();
        let carrier_path = dir.path().join("carrier.png");
        let carrier_png = CarrierImage::synthesize(80, 80).unwrap().to_png().unwrap();
        fs::write(&carrier_path, carrier_png).unwrap();
        let message_path = dir.path().join("secret.bin");
        fs::write(&message_path, [0u8, 1, 2, 255]).unwrap();

        let engine = engine();
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        let out = dir.path().join("out");
        encrypt(
            &engine,
            &mut rng,
            EncryptArgs {
                key: password_key("correct horse"),
                message: MessageArgs {
                    message: None,
                    message_file: Some(message_path),
                },
                carrier: Some(carrier_path),
                out: out.clone(),
            },
        )
        .unwrap();

        let stego = CarrierImage::open(out.join("stego.png")).unwrap();
        assert_eq!((stego.width(), stego.height()), (80, 80));

        let recovered = dir.path().join("recovered.bin");
        decrypt(
            &engine,
            DecryptArgs {
                stego: out.join("stego.png"),
                private_key: out.join("private_key.txt"),
                key: password_key("correct horse"),
                output: Some(recovered.clone()),
            },
        )
        .unwrap();
        assert_eq!(fs::read(&recovered).unwrap(), [0u8, 1, 2, 255]);
    }

    #[test]
    fn test_pgn_file_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.pgn");
        fs::write(&path, "[Event \"x\"]\n\n1. d4 d5 2. c4 *\n").unwrap();
        let args = KeyArgs {
            pgn: None,
            pgn_file: Some(path),
            password: None,
        };
        assert!(matches!(args.to_key_input().unwrap(), KeyInput::Transcript(t) if t.len() == 3));
    }

    #[test]
    fn test_illegal_game_is_invalid_input() {
        let err = pgn_key("1. e4 e4").to_key_input().unwrap_err();
        assert_eq!(kind(&err), Some(ErrorKind::InvalidInput));
    }

    #[test]
    fn test_missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = decrypt(
            &engine(),
            DecryptArgs {
                stego: dir.path().join("nope.png"),
                private_key: dir.path().join("nope.txt"),
                key: password_key("correct horse"),
                output: None,
            },
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("nope.png"));
        assert_eq!(kind(&err), None);
    }

    #[test]
    fn test_capacity_and_canonicalize_run() {
        capacity(&engine(), CapacityArgs { carrier: None }).unwrap();
        canonicalize(CanonicalizeArgs {
            game: PgnArgs {
                pgn: Some("1. d4 d5 2. Nbd2".into()),
                pgn_file: None,
            },
        })
        .unwrap();
    }

    #[test]
    fn test_render_canonical_normalizes_movetext() {
        let transcript = MoveTranscript::parse("1. d4 {main line} d5 2. Nbd2!? *").unwrap();
        let rendered = render_canonical(&transcript);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, ["   1  d4", "   2  d5", "   3  Nd2", "", "1. d4 d5 2. Nd2"]);
    }
}
