use std::io::{self, Write};

use rust_i18n::t;

use crate::models::CharacterRecord;
use crate::names;
use crate::quiz::questions::QuestionSpec;

/// One slot on the clue board. `value` is `None` while the clue is hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct ClueSlot {
    pub label_key: &'static str,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuessResult {
    Correct { name: String },
    Wrong { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClueCount {
    Count(usize),
    /// The loss panel reads "all" rather than a number.
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinalResults {
    pub won: bool,
    pub answer_name: String,
    pub clues: ClueCount,
}

/// Render target the engine drives. The engine itself never touches the
/// terminal (or anything else); swapping this out is how tests observe it.
pub trait QuizView {
    /// A fresh clue board: first clue revealed, the rest placeholders.
    fn render_board(&mut self, slots: &[ClueSlot]);
    /// One newly revealed clue, `index` counted from zero.
    fn render_clue(&mut self, index: usize, label_key: &'static str, value: &str);
    fn render_progress(&mut self, revealed: usize, total: usize);
    fn render_result(&mut self, result: &GuessResult);
    /// The wrongly guessed card's own trivia for the round's questions.
    fn render_wrong_guess(&mut self, record: &CharacterRecord, questions: &[QuestionSpec]);
    fn render_final(&mut self, results: &FinalResults);
    /// Restart: drop the result banner, final panel and wrong-guess cards.
    fn clear_round(&mut self);
}

/// Terminal renderer.
pub struct ConsoleView<W: Write> {
    out: W,
    locale: String,
}

impl ConsoleView<io::Stdout> {
    pub fn stdout(locale: impl Into<String>) -> Self {
        ConsoleView {
            out: io::stdout(),
            locale: locale.into(),
        }
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W, locale: impl Into<String>) -> Self {
        ConsoleView {
            out,
            locale: locale.into(),
        }
    }

    fn label(&self, key: &str) -> String {
        t!(key, locale = &self.locale).into_owned()
    }
}

impl<W: Write> QuizView for ConsoleView<W> {
    fn render_board(&mut self, slots: &[ClueSlot]) {
        let _ = writeln!(self.out);
        for (index, slot) in slots.iter().enumerate() {
            match &slot.value {
                Some(value) => {
                    let label = self.label(slot.label_key);
                    let _ = writeln!(self.out, "  {:>2}. {label}: {value}", index + 1);
                }
                None => {
                    let _ = writeln!(self.out, "  {:>2}. ···", index + 1);
                }
            }
        }
    }

    fn render_clue(&mut self, index: usize, label_key: &'static str, value: &str) {
        let label = self.label(label_key);
        let _ = writeln!(self.out, "  {:>2}. {label}: {value}", index + 1);
    }

    fn render_progress(&mut self, revealed: usize, total: usize) {
        let bar: String = (0..total).map(|i| if i < revealed { '#' } else { '·' }).collect();
        let _ = writeln!(self.out, "  [{bar}] {revealed}/{total}");
    }

    fn render_result(&mut self, result: &GuessResult) {
        let banner = match result {
            GuessResult::Correct { name } => t!("quiz.correct", locale = &self.locale, name = name),
            GuessResult::Wrong { name } => t!("quiz.wrong", locale = &self.locale, name = name),
        };
        let _ = writeln!(self.out, "\n{banner}");
    }

    fn render_wrong_guess(&mut self, record: &CharacterRecord, questions: &[QuestionSpec]) {
        let header = t!(
            "quiz.wrong_guess_header",
            locale = &self.locale,
            name = &record.name_en
        );
        let _ = writeln!(self.out, "{header}");
        let image = names::image_file_name(&record.char_id, &record.card_id);
        let _ = writeln!(self.out, "    [{image}]");
        for question in questions {
            let label = self.label(question.label_key);
            let _ = writeln!(self.out, "    {label}: {}", record.clue(question.field));
        }
    }

    fn render_final(&mut self, results: &FinalResults) {
        let title = if results.won {
            t!("quiz.win_title", locale = &self.locale)
        } else {
            t!("quiz.lose_title", locale = &self.locale)
        };
        let _ = writeln!(self.out, "\n{title}");
        let answer = t!(
            "quiz.the_answer",
            locale = &self.locale,
            name = &results.answer_name
        );
        let _ = writeln!(self.out, "{answer}");
        let count = match results.clues {
            ClueCount::Count(n) => n.to_string(),
            ClueCount::All => t!("quiz.all", locale = &self.locale).into_owned(),
        };
        let used = t!("quiz.clues_used", locale = &self.locale, count = count);
        let _ = writeln!(self.out, "{used}");
    }

    fn clear_round(&mut self) {
        let _ = writeln!(self.out, "\n{}", "─".repeat(40));
        let _ = writeln!(self.out, "{}", t!("quiz.new_round", locale = &self.locale));
    }
}
