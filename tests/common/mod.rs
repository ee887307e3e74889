use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use gubuk_trainer::models::{CharacterDataset, CharacterRecord};
use gubuk_trainer::quiz::questions::QuestionSpec;
use gubuk_trainer::quiz::view::{ClueSlot, FinalResults, GuessResult, QuizView};

/// Fresh scratch directory under the system temp dir, unique per call.
pub fn scratch_dir(label: &str) -> PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "gubuk_trainer_test_{label}_{}_{id}",
        std::process::id()
    ));
    // Clean up leftovers from previous runs
    let _ = std::fs::remove_dir_all(&path);
    std::fs::create_dir_all(&path).expect("failed to create scratch dir");
    path
}

/// A fully populated record: every fixed-quiz field gets a value derived
/// from the card id, so clue values are distinguishable per card.
pub fn record(card_id: &str, char_id: &str, name_en: &str) -> CharacterRecord {
    let mut fields = BTreeMap::new();
    for field in [
        "weight",
        "ears",
        "weak",
        "tail",
        "strong",
        "three_sizes",
        "active",
        "record",
        "va_en",
        "title",
    ] {
        fields.insert(field.to_string(), format!("{field}-{card_id}"));
    }
    CharacterRecord {
        card_id: card_id.to_string(),
        char_id: char_id.to_string(),
        name_en: name_en.to_string(),
        image_url: None,
        fields,
    }
}

/// Three characters, one of them with two card variants.
pub fn sample_dataset() -> CharacterDataset {
    let characters = vec![
        record("100101", "1001", "Special Week"),
        record("100102", "1001", "Special Week"),
        record("100201", "1002", "Silence Suzuka"),
        record("100301", "1003", "Tokai Teio"),
    ];
    let unique_characters = vec![
        characters[0].clone(),
        characters[2].clone(),
        characters[3].clone(),
    ];
    CharacterDataset {
        characters,
        unique_characters,
    }
}

/// Records every render call so tests can assert on what the engine showed.
#[derive(Default)]
pub struct TestView {
    pub boards: Vec<Vec<ClueSlot>>,
    pub clues: Vec<(usize, String)>,
    pub progress: Vec<(usize, usize)>,
    pub results: Vec<GuessResult>,
    pub wrong_guesses: Vec<(String, String)>,
    pub finals: Vec<FinalResults>,
    pub cleared: usize,
}

impl QuizView for TestView {
    fn render_board(&mut self, slots: &[ClueSlot]) {
        self.boards.push(slots.to_vec());
    }

    fn render_clue(&mut self, index: usize, _label_key: &'static str, value: &str) {
        self.clues.push((index, value.to_string()));
    }

    fn render_progress(&mut self, revealed: usize, total: usize) {
        self.progress.push((revealed, total));
    }

    fn render_result(&mut self, result: &GuessResult) {
        self.results.push(result.clone());
    }

    fn render_wrong_guess(&mut self, record: &CharacterRecord, _questions: &[QuestionSpec]) {
        self.wrong_guesses
            .push((record.char_id.clone(), record.card_id.clone()));
    }

    fn render_final(&mut self, results: &FinalResults) {
        self.finals.push(results.clone());
    }

    fn clear_round(&mut self) {
        self.cleared += 1;
    }
}
