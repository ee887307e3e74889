use std::io::Write;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_i18n::t;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::data;
use crate::names;
use crate::quiz::engine::QuizEngine;
use crate::quiz::questions::QuestionPolicy;
use crate::quiz::view::ConsoleView;

pub struct PlayOptions {
    /// Dataset file path or URL.
    pub data: String,
    /// Random 10-of-20 variant instead of the fixed question set.
    pub random: bool,
    pub locale: String,
    /// Fixes the secret and the question draw, for reproducible rounds.
    pub seed: Option<u64>,
}

/// The interactive quiz loop: load the dataset, run rounds until the player
/// quits. Typed input is matched against the unique roster by
/// case-insensitive substring, the way the site's dropdown search filtered
/// its options.
pub async fn play(opts: PlayOptions) -> Result<()> {
    let dataset = data::load_dataset(&opts.data)
        .await
        .wrap_err("could not load character data")?;
    tracing::info!(
        "loaded {} cards, {} characters from {}",
        dataset.characters.len(),
        dataset.unique_characters.len(),
        opts.data
    );

    let rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let policy = if opts.random {
        QuestionPolicy::RandomDraw {
            count: names::QUESTIONS_PER_ROUND,
        }
    } else {
        QuestionPolicy::Fixed
    };

    let locale = opts.locale;
    let mut view = ConsoleView::stdout(locale.clone());
    let mut engine = QuizEngine::new(dataset, policy, rng)?;

    println!("{}", t!("quiz.intro", locale = &locale));
    println!("{}", t!("quiz.commands", locale = &locale));
    engine.start_round(&mut view);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" => break,
            "restart" => {
                engine.restart(&mut view);
                continue;
            }
            _ => {}
        }

        let Some(char_id) = resolve_guess(&engine, input, &locale) else {
            continue;
        };
        if let Some(transition) = engine.guess(&char_id, &mut view) {
            tokio::time::sleep(transition.delay()).await;
            engine.apply(transition, &mut view);
            if engine.game_ended() {
                println!("{}", t!("quiz.play_again", locale = &locale));
            }
        }
    }

    Ok(())
}

/// Maps a typed query to a character id: a single substring match (or an
/// exact name among several) is a guess, anything else gets reported back.
fn resolve_guess(engine: &QuizEngine, input: &str, locale: &str) -> Option<String> {
    let query = input.to_lowercase();
    let matches: Vec<_> = engine
        .unique_characters()
        .iter()
        .filter(|c| c.name_en.to_lowercase().contains(&query))
        .collect();

    match matches.as_slice() {
        [] => {
            println!("{}", t!("quiz.no_match", locale = locale, query = input));
            None
        }
        [single] => Some(single.char_id.clone()),
        many => {
            if let Some(exact) = many.iter().find(|c| c.name_en.eq_ignore_ascii_case(input)) {
                return Some(exact.char_id.clone());
            }
            println!("{}", t!("quiz.several_matches", locale = locale));
            for candidate in many {
                println!("  - {}", candidate.name_en);
            }
            None
        }
    }
}
