//! The interactive turn loop.

use crate::render::render;
use chess_core::PieceKind;
use chess_rules::{Game, GameStatus, PlayError};
use chess_store::SnapshotStore;
use std::io::{self, BufRead, Write};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A move request: start and end cell labels.
    Move { from: String, to: String },
    /// Persist the game under a key.
    Save { key: String },
    /// Leave the session.
    Quit,
}

/// Parses a line of input. Moves are accepted as "e2 e4" or "e2e4";
/// label validity is the engine's call, not the parser's.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    match (words.next()?, words.next(), words.next()) {
        ("quit" | "exit", None, None) => Some(Command::Quit),
        ("save", Some(key), None) => Some(Command::Save {
            key: key.to_string(),
        }),
        ("save", None, None) => None,
        (from, Some(to), None) => Some(Command::Move {
            from: from.to_string(),
            to: to.to_string(),
        }),
        (pair, None, None) if pair.len() == 4 && pair.is_ascii() => Some(Command::Move {
            from: pair[..2].to_string(),
            to: pair[2..].to_string(),
        }),
        _ => None,
    }
}

/// Parses a promotion choice by name or initial letter.
pub fn parse_promotion(line: &str) -> Option<PieceKind> {
    let choice = line.trim().to_ascii_lowercase();
    match choice.as_str() {
        "q" => Some(PieceKind::Queen),
        "r" => Some(PieceKind::Rook),
        "b" => Some(PieceKind::Bishop),
        "n" | "k" => Some(PieceKind::Knight),
        _ => PieceKind::from_name(&choice),
    }
}

/// Runs the session until the game ends or a player quits.
pub fn run(mut game: Game, store: &SnapshotStore) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}", render(game.board()));
        match game.status() {
            GameStatus::Checkmate => {
                let winner = game.player(game.turn().opposite());
                println!("Checkmate. {} wins!", winner.name());
                return Ok(());
            }
            GameStatus::Stalemate => {
                println!("Stalemate. The game is a draw.");
                return Ok(());
            }
            GameStatus::Check => {
                println!("{} is in check!", game.current_player().name());
            }
            GameStatus::InProgress => {}
        }

        let player = game.current_player();
        print!("{} ({}) > ", player.name(), player.color());
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };

        match parse_command(&line) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::Save { key }) => match store.save(&key, &game.snapshot()) {
                Ok(path) => {
                    tracing::info!(key, path = %path.display(), "game saved");
                    println!("Saved as '{key}'.");
                }
                Err(err) => eprintln!("{err}"),
            },
            Some(Command::Move { from, to }) => match game.make_play(&from, &to) {
                Ok(_) => {
                    if game.pending_promotion().is_some() {
                        resolve_promotion(&mut game, &mut lines)?;
                    }
                }
                Err(err) => println!("{err}"),
            },
            None => println!("Enter a move like 'e2 e4', or 'save <name>', or 'quit'."),
        }
    }
}

fn resolve_promotion(
    game: &mut Game,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<()> {
    loop {
        print!("Promote to (queen/rook/bishop/knight): ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        let choice = parse_promotion(&line);
        match choice.map(|kind| game.promote(kind)) {
            Some(Ok(square)) => {
                println!("Promoted on {square}.");
                return Ok(());
            }
            Some(Err(PlayError::PromotionInvalid)) | None => {
                println!("Pick queen, rook, bishop, or knight.");
            }
            Some(Err(err)) => println!("{err}"),
        }
    }
}
