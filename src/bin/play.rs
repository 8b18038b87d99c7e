//! Batch driver: play every secret word against the strategy.
//!
//! Usage: play [options] <corpus-file> [word-list-file ...]
//!
//! Word-list files supply the secrets; with none given, every corpus word
//! is played. Prints per-guess traces and per-game results under `-v`,
//! and a batch summary either way.

use std::process;
use std::time::Instant;

use hangman::game::{Game, GameStatus};
use hangman::{Corpus, Guess, HangmanGame, Index, Strategy, StrategyConfig};

// A game can never need more turns than letters plus word attempts; this
// only guards against a corpus/referee mismatch spinning the loop.
const MAX_TURNS: usize = 1024;

struct Args {
    corpus_path: String,
    word_lists: Vec<String>,
    verbose: bool,
    num_games: Option<usize>,
    tries: usize,
    cache_size: usize,
    samples: usize,
    target_p: f64,
}

fn usage() -> ! {
    println!(
        "Usage: play [options] <corpus-file> [word-list-file ...]\n\
         \n\
         Plays each word from the word-list files (default: every corpus\n\
         word) as a Hangman secret against the corpus-search strategy.\n\
         \n\
         Options:\n\
         \x20 -h           show this help\n\
         \x20 -v           trace every guess and per-game result\n\
         \x20 -n N         play at most N games\n\
         \x20 -t TRIES     wrong-guess budget per game (default 5)\n\
         \x20 -c CACHE     distribution cache capacity (default 512)\n\
         \x20 -s SAMPLES   max candidates sampled per move (default 65536)\n\
         \x20 -p P         target character probability (default 0.7)"
    );
    process::exit(0);
}

fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let mut positional: Vec<String> = Vec::new();
    let mut verbose = false;
    let mut num_games: Option<usize> = None;
    let mut tries = 5usize;
    let mut cache_size = 512usize;
    let mut samples = 65_536usize;
    let mut target_p = 0.7f64;

    fn value<T: std::str::FromStr>(argv: &[String], i: usize, flag: &str) -> T {
        argv.get(i)
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| {
                eprintln!("Invalid or missing value for {}", flag);
                process::exit(2);
            })
    }

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "-h" | "--help" => usage(),
            "-v" => verbose = true,
            "-n" => {
                i += 1;
                num_games = Some(value(&argv, i, "-n"));
            }
            "-t" => {
                i += 1;
                tries = value(&argv, i, "-t");
            }
            "-c" => {
                i += 1;
                cache_size = value(&argv, i, "-c");
            }
            "-s" => {
                i += 1;
                samples = value(&argv, i, "-s");
            }
            "-p" => {
                i += 1;
                target_p = value(&argv, i, "-p");
            }
            flag if flag.starts_with('-') => {
                eprintln!("Unknown option: {}", flag);
                process::exit(2);
            }
            path => positional.push(path.to_string()),
        }
        i += 1;
    }

    if positional.is_empty() {
        eprintln!("Missing corpus file (try -h)");
        process::exit(2);
    }
    let corpus_path = positional.remove(0);
    Args {
        corpus_path,
        word_lists: positional,
        verbose,
        num_games,
        tries,
        cache_size,
        samples,
        target_p,
    }
}

/// Play one secret to completion; returns the final referee state.
/// Under `verbose`, traces every guess and the board it produced.
fn play_game(strategy: &Strategy, secret: &str, tries: usize, verbose: bool) -> HangmanGame {
    let mut game = HangmanGame::new(secret, tries);
    for turn in 1..=MAX_TURNS {
        if game.status() != GameStatus::KeepGuessing {
            break;
        }
        let guess = strategy.next_guess(&game).unwrap_or_else(|e| {
            eprintln!("Guess failed for {}: {}", secret, e);
            process::exit(1);
        });
        game.make_guess(&guess);
        if verbose {
            let shown = match &guess {
                Guess::Letter(c) => c.to_string(),
                Guess::Word(w) => w.clone(),
            };
            let board: String = game.guessed_so_far().iter().collect();
            println!(
                "  {:2} {:12} {} wrong={}",
                turn,
                shown,
                board,
                game.wrong_guess_count()
            );
        }
    }
    game
}

fn main() {
    let args = parse_args();

    let corpus = Corpus::load(&args.corpus_path).unwrap_or_else(|e| {
        eprintln!("Failed to read corpus {}: {}", args.corpus_path, e);
        process::exit(1);
    });
    if corpus.is_empty() {
        eprintln!("Corpus {} contains no words", args.corpus_path);
        process::exit(1);
    }

    let mut secrets: Vec<String> = if args.word_lists.is_empty() {
        corpus.words().to_vec()
    } else {
        let mut words = Vec::new();
        for path in &args.word_lists {
            let list = Corpus::load(path).unwrap_or_else(|e| {
                eprintln!("Failed to read word list {}: {}", path, e);
                process::exit(1);
            });
            words.extend(list.words().iter().cloned());
        }
        words
    };
    if let Some(n) = args.num_games {
        secrets.truncate(n);
    }

    let config = StrategyConfig {
        sample_size: args.samples,
        cache_size: args.cache_size,
        target_char_p: args.target_p,
        ..Default::default()
    };

    let build_start = Instant::now();
    let index = Index::build(&corpus, config.threads).unwrap_or_else(|e| {
        eprintln!("Index build failed: {}", e);
        process::exit(1);
    });
    println!(
        "Indexed {} words ({} terms) with {} threads in {:.1} ms",
        corpus.len(),
        index.term_count(),
        config.threads,
        build_start.elapsed().as_secs_f64() * 1000.0
    );

    let strategy = Strategy::new(&corpus, &index, &config).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(2);
    });

    let play_start = Instant::now();
    let mut scores: Vec<u32> = Vec::with_capacity(secrets.len());
    let mut wins = 0usize;
    for secret in &secrets {
        if args.verbose {
            println!("{}", secret);
        }
        let game = play_game(&strategy, secret, args.tries, args.verbose);
        let won = game.status() == GameStatus::Won;
        if won {
            wins += 1;
        }
        scores.push(game.current_score());
        if args.verbose {
            println!(
                "  {} score={} wrong={}\n",
                if won { "WON" } else { "LOST" },
                game.current_score(),
                game.wrong_guess_count()
            );
        }
    }
    let elapsed = play_start.elapsed().as_secs_f64();

    let total: u64 = scores.iter().map(|&s| s as u64).sum();
    let mean = total as f64 / scores.len().max(1) as f64;
    println!("\n=== Batch Summary ===");
    println!("Games:  {}", scores.len());
    println!(
        "Won:    {} ({:.1}%)",
        wins,
        100.0 * wins as f64 / scores.len().max(1) as f64
    );
    println!("Score:  mean {:.2}", mean);
    println!(
        "        min {}  max {}",
        scores.iter().min().copied().unwrap_or(0),
        scores.iter().max().copied().unwrap_or(0)
    );
    println!(
        "Time:   {:.2}s ({:.0} games/s)",
        elapsed,
        scores.len() as f64 / elapsed.max(1e-9)
    );
}
