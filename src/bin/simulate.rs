use std::fs::File;
use std::hash::BuildHasherDefault;
use std::io::Write;
use std::path::PathBuf;
use std::thread;

use clap::{Parser, ValueEnum};
use crossbeam_channel::bounded;
use hashbrown::HashSet as HbHashSet;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use krapette::{ai_step, state_key, AiStep, Game, PlayerId, Rules};

type FastHasher = BuildHasherDefault<ahash::AHasher>;
type FastSet = HbHashSet<u128, FastHasher>;

/// Play AI-vs-AI Krapette games in parallel and report the results.
#[derive(Debug, Parser)]
#[command(name = "simulate")]
struct Args {
    /// Number of games to play.
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Base seed; game N is dealt from (seed, N).
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Abort a game after this many AI plies.
    #[arg(long, default_value_t = 5000)]
    max_plies: u32,

    /// A position repeating this often scores the game a draw.
    #[arg(long, default_value_t = 3)]
    max_repeats: u32,

    #[arg(long, value_enum, default_value_t = VariantArg::Krapette)]
    variant: VariantArg,

    /// Enable the compulsory-moves rule.
    #[arg(long)]
    compulsory: bool,

    /// Enable multi-card move shortcuts.
    #[arg(long)]
    shortcuts: bool,

    /// Write per-game records as JSON to this file.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    Krapette,
    RussianBank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum Outcome {
    Player1,
    Player2,
    /// Repeated position or a stalled AI: nobody can make progress.
    Loop,
    PlyLimit,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GameRecord {
    game_id: u64,
    outcome: Outcome,
    plies: u32,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    games: u64,
    player1_wins: u64,
    player2_wins: u64,
    loops: u64,
    ply_limited: u64,
    total_plies: u64,
}

impl Summary {
    fn add(&mut self, rec: &GameRecord) {
        self.games += 1;
        self.total_plies += u64::from(rec.plies);
        match rec.outcome {
            Outcome::Player1 => self.player1_wins += 1,
            Outcome::Player2 => self.player2_wins += 1,
            Outcome::Loop => self.loops += 1,
            Outcome::PlyLimit => self.ply_limited += 1,
        }
    }
}

fn rules_for(args: &Args) -> Rules {
    let mut rules = match args.variant {
        VariantArg::Krapette => Rules::krapette(),
        VariantArg::RussianBank => Rules::russian_bank(),
    };
    rules.compulsory_moves = args.compulsory;
    rules.move_shortcuts = args.shortcuts;
    rules
}

fn winner(game: &Game) -> Option<Outcome> {
    for p in [PlayerId::One, PlayerId::Two] {
        if game.state().total_cards(p) == 0 {
            return Some(match p {
                PlayerId::One => Outcome::Player1,
                PlayerId::Two => Outcome::Player2,
            });
        }
    }
    None
}

fn play_game(args: &Args, rules: Rules, game_id: u64) -> Result<GameRecord, String> {
    let mut game = Game::new(rules)?;
    game.state_mut().set_human(PlayerId::One, false);
    game.state_mut().set_human(PlayerId::Two, false);
    game.restart_seeded(args.seed, game_id)?;

    let mut seen = FastSet::default();
    let mut repeats = 0u32;
    let mut plies = 0u32;

    loop {
        if let Some(outcome) = winner(&game) {
            return Ok(GameRecord {
                game_id,
                outcome,
                plies,
            });
        }
        if plies >= args.max_plies {
            return Ok(GameRecord {
                game_id,
                outcome: Outcome::PlyLimit,
                plies,
            });
        }

        let step = ai_step(game.state_mut());
        plies += 1;
        match step {
            AiStep::Played(_) | AiStep::Drew => {}
            AiStep::Stalled => {
                return Ok(GameRecord {
                    game_id,
                    outcome: Outcome::Loop,
                    plies,
                });
            }
            AiStep::NotComputer => {
                return Err(format!("game {game_id}: player unexpectedly human"));
            }
        }

        if !seen.insert(state_key(game.state())) {
            repeats += 1;
            if repeats >= args.max_repeats {
                return Ok(GameRecord {
                    game_id,
                    outcome: Outcome::Loop,
                    plies,
                });
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let rules = rules_for(&args);
    rules.validate()?;

    let pb = ProgressBar::new(args.games);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] games {bar:40.cyan/blue} {pos}/{len}")
            .map_err(|e| format!("progress template: {e}"))?,
    );

    // Workers stream records to one aggregator; stats stay single-writer.
    let (tx, rx) = bounded::<GameRecord>(256);
    let aggregator = thread::spawn(move || {
        let mut summary = Summary::default();
        let mut records: Vec<GameRecord> = Vec::new();
        for rec in rx {
            summary.add(&rec);
            records.push(rec);
        }
        records.sort_by_key(|r| r.game_id);
        (summary, records)
    });

    let errors: Vec<String> = (0..args.games)
        .into_par_iter()
        .filter_map(|game_id| {
            let res = play_game(&args, rules, game_id);
            pb.inc(1);
            match res {
                Ok(rec) => {
                    // The receiver outlives the workers; a send failure means
                    // the aggregator died, surfaced below as a join error.
                    let _ = tx.send(rec);
                    None
                }
                Err(e) => Some(e),
            }
        })
        .collect();
    drop(tx);
    pb.finish();

    let (summary, records) = aggregator
        .join()
        .map_err(|_| "aggregator thread panicked".to_string())?;

    for e in &errors {
        eprintln!("[simulate] {e}");
    }

    println!(
        "[simulate] {} games: player1 {} / player2 {} / loops {} / ply-limited {} (avg {:.1} plies)",
        summary.games,
        summary.player1_wins,
        summary.player2_wins,
        summary.loops,
        summary.ply_limited,
        if summary.games > 0 {
            summary.total_plies as f64 / summary.games as f64
        } else {
            0.0
        }
    );

    if let Some(path) = &args.json {
        #[derive(Serialize)]
        struct Report<'a> {
            summary: &'a Summary,
            records: &'a [GameRecord],
        }
        let mut file = File::create(path)?;
        serde_json::to_writer_pretty(
            &mut file,
            &Report {
                summary: &summary,
                records: &records,
            },
        )?;
        file.write_all(b"\n")?;
        println!("[simulate] wrote report to {}", path.display());
    }

    if !errors.is_empty() {
        return Err(format!("{} game(s) failed", errors.len()).into());
    }
    Ok(())
}
