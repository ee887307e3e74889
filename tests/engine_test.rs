mod common;

use std::collections::HashSet;

use common::{sample_dataset, TestView};
use gubuk_trainer::quiz::questions::{QuestionPolicy, RANDOM_POOL, STANDARD_QUESTIONS};
use gubuk_trainer::quiz::view::ClueCount;
use gubuk_trainer::quiz::QuizEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn engine(seed: u64, policy: QuestionPolicy) -> QuizEngine {
    QuizEngine::new(sample_dataset(), policy, StdRng::seed_from_u64(seed))
        .expect("sample roster is non-empty")
}

/// A char_id from the unique roster that is not the current secret.
fn wrong_id(engine: &QuizEngine) -> String {
    let answer_id = engine.answer().expect("round started").char_id.clone();
    engine
        .unique_characters()
        .iter()
        .find(|c| c.char_id != answer_id)
        .expect("roster has more than one character")
        .char_id
        .clone()
}

#[test]
fn start_round_reveals_exactly_one_clue() {
    let mut view = TestView::default();
    let mut engine = engine(1, QuestionPolicy::Fixed);
    engine.start_round(&mut view);

    assert_eq!(engine.revealed_clues(), 1);
    assert!(!engine.game_ended());

    let board = &view.boards[0];
    assert_eq!(board.len(), 10);
    assert!(board[0].value.is_some());
    assert!(board[1..].iter().all(|slot| slot.value.is_none()));
    assert_eq!(view.progress.last(), Some(&(1, 10)));
}

#[test]
fn fixed_policy_uses_the_standard_questions_in_order() {
    let mut view = TestView::default();
    let mut engine = engine(2, QuestionPolicy::Fixed);
    engine.start_round(&mut view);
    assert_eq!(engine.questions(), STANDARD_QUESTIONS.as_slice());
}

#[test]
fn wrong_guess_reveals_next_clue_after_transition() {
    let mut view = TestView::default();
    let mut engine = engine(3, QuestionPolicy::Fixed);
    engine.start_round(&mut view);

    let guessed = wrong_id(&engine);
    let transition = engine.guess(&guessed, &mut view).expect("guess evaluated");

    // Nothing advances until the transition is applied
    assert_eq!(engine.revealed_clues(), 1);
    assert!(!engine.game_ended());
    assert_eq!(view.wrong_guesses.len(), 1);
    assert_eq!(view.wrong_guesses[0].0, guessed);

    engine.apply(transition, &mut view);
    assert_eq!(engine.revealed_clues(), 2);
    assert!(!engine.game_ended());
    assert_eq!(view.progress.last(), Some(&(2, 10)));
    assert!(view.finals.is_empty());
}

#[test]
fn wrong_guess_surfaces_the_specific_card() {
    // Both cards of char 1001 are in the roster; the wrong-answer panel
    // must show the first full-roster card, not the deduplicated entry.
    let mut view = TestView::default();
    let mut engine = (4u64..)
        .map(|seed| {
            let mut candidate = engine(seed, QuestionPolicy::Fixed);
            candidate.start_round(&mut TestView::default());
            candidate
        })
        .find(|candidate| candidate.answer().unwrap().char_id != "1001")
        .unwrap();
    engine.guess("1001", &mut view);
    assert_eq!(view.wrong_guesses, vec![("1001".to_string(), "100101".to_string())]);
}

#[test]
fn correct_guess_ends_the_game_and_shows_the_win_panel() {
    let mut view = TestView::default();
    let mut engine = engine(5, QuestionPolicy::Fixed);
    engine.start_round(&mut view);

    let answer = engine.answer().unwrap().clone();
    let transition = engine.guess(&answer.char_id, &mut view).expect("guess evaluated");
    assert!(engine.game_ended());

    engine.apply(transition, &mut view);
    assert_eq!(view.finals.len(), 1);
    let results = &view.finals[0];
    assert!(results.won);
    assert_eq!(results.answer_name, answer.name_en);
    assert_eq!(results.clues, ClueCount::Count(1));
}

#[test]
fn exhausting_all_clues_loses_with_all_shown() {
    let mut view = TestView::default();
    let mut engine = engine(6, QuestionPolicy::Fixed);
    engine.start_round(&mut view);

    let guessed = wrong_id(&engine);
    for _ in 0..9 {
        let transition = engine.guess(&guessed, &mut view).expect("guess evaluated");
        engine.apply(transition, &mut view);
    }
    assert_eq!(engine.revealed_clues(), 10);
    assert!(!engine.game_ended());

    // Out of clues: this wrong guess is terminal
    let transition = engine.guess(&guessed, &mut view).expect("guess evaluated");
    assert!(engine.game_ended());
    engine.apply(transition, &mut view);

    let results = view.finals.last().expect("loss panel shown");
    assert!(!results.won);
    assert_eq!(results.clues, ClueCount::All);
    assert_eq!(results.answer_name, engine.answer().unwrap().name_en);
}

#[test]
fn revealed_count_never_decreases_within_a_round() {
    let mut view = TestView::default();
    let mut engine = engine(7, QuestionPolicy::Fixed);
    engine.start_round(&mut view);

    let guessed = wrong_id(&engine);
    for _ in 0..5 {
        let before = engine.revealed_clues();
        let transition = engine.guess(&guessed, &mut view).expect("guess evaluated");
        engine.apply(transition, &mut view);
        assert_eq!(engine.revealed_clues(), before + 1);
    }
}

#[test]
fn empty_guess_is_ignored() {
    let mut view = TestView::default();
    let mut engine = engine(8, QuestionPolicy::Fixed);
    engine.start_round(&mut view);

    assert!(engine.guess("", &mut view).is_none());
    assert_eq!(engine.revealed_clues(), 1);
    assert!(view.results.is_empty());
}

#[test]
fn guesses_after_the_game_ended_are_ignored() {
    let mut view = TestView::default();
    let mut engine = engine(9, QuestionPolicy::Fixed);
    engine.start_round(&mut view);

    let answer_id = engine.answer().unwrap().char_id.clone();
    let transition = engine.guess(&answer_id, &mut view).expect("guess evaluated");
    engine.apply(transition, &mut view);

    assert!(engine.guess(&answer_id, &mut view).is_none());
    assert!(engine.guess(&wrong_id(&engine), &mut view).is_none());
    assert_eq!(view.finals.len(), 1);
}

#[test]
fn restart_resets_the_round() {
    let mut view = TestView::default();
    let mut engine = engine(10, QuestionPolicy::Fixed);
    engine.start_round(&mut view);

    let answer_id = engine.answer().unwrap().char_id.clone();
    let transition = engine.guess(&answer_id, &mut view).expect("guess evaluated");
    engine.apply(transition, &mut view);
    assert!(engine.game_ended());

    engine.restart(&mut view);
    assert!(!engine.game_ended());
    assert_eq!(engine.revealed_clues(), 1);
    assert_eq!(view.cleared, 1);
    assert_eq!(view.progress.last(), Some(&(1, 10)));
    assert!(engine.answer().is_some());
}

#[test]
fn transitions_from_before_a_restart_are_dropped() {
    let mut view = TestView::default();
    let mut engine = engine(11, QuestionPolicy::Fixed);
    engine.start_round(&mut view);

    let stale = engine
        .guess(&wrong_id(&engine), &mut view)
        .expect("guess evaluated");
    engine.restart(&mut view);

    engine.apply(stale, &mut view);
    assert_eq!(engine.revealed_clues(), 1);
    assert_eq!(view.progress.last(), Some(&(1, 10)));
}

#[test]
fn random_policy_draws_ten_distinct_pool_questions() {
    let mut view = TestView::default();
    let mut engine = engine(12, QuestionPolicy::RandomDraw { count: 10 });
    engine.start_round(&mut view);

    let questions = engine.questions();
    assert_eq!(questions.len(), 10);
    let fields: HashSet<&str> = questions.iter().map(|q| q.field).collect();
    assert_eq!(fields.len(), 10, "drawn questions must be distinct");
    assert!(questions.iter().all(|q| RANDOM_POOL.contains(q)));
}

#[test]
fn restart_redraws_the_random_subset() {
    let mut view = TestView::default();
    let mut engine = engine(13, QuestionPolicy::RandomDraw { count: 10 });
    engine.start_round(&mut view);
    let first: Vec<&str> = engine.questions().iter().map(|q| q.field).collect();

    // Drawn fresh each round; with this seed the order differs.
    let mut redraws = Vec::new();
    for _ in 0..5 {
        engine.restart(&mut view);
        redraws.push(engine.questions().iter().map(|q| q.field).collect::<Vec<_>>());
        assert_eq!(engine.questions().len(), 10);
    }
    assert!(
        redraws.iter().any(|redraw| *redraw != first),
        "five redraws of 10-of-20 should not all repeat the first order"
    );
}

#[test]
fn worked_example_three_characters_fixed_variant() {
    let mut view = TestView::default();
    let mut engine = engine(14, QuestionPolicy::Fixed);
    engine.start_round(&mut view);

    // Exactly 1 clue visible, progress 1/10
    let visible = view.boards[0].iter().filter(|s| s.value.is_some()).count();
    assert_eq!(visible, 1);
    assert_eq!(view.progress.last(), Some(&(1, 10)));

    // One wrong guess: progress 2/10 and a wrong-answer card appears
    let guessed = wrong_id(&engine);
    let transition = engine.guess(&guessed, &mut view).expect("guess evaluated");
    engine.apply(transition, &mut view);
    assert_eq!(view.progress.last(), Some(&(2, 10)));
    assert_eq!(view.wrong_guesses.len(), 1);
    assert_eq!(view.wrong_guesses[0].0, guessed);
}

#[test]
fn empty_roster_is_rejected() {
    use gubuk_trainer::models::CharacterDataset;

    let empty = CharacterDataset {
        characters: Vec::new(),
        unique_characters: Vec::new(),
    };
    let result = QuizEngine::new(empty, QuestionPolicy::Fixed, StdRng::seed_from_u64(0));
    assert!(result.is_err());
}
