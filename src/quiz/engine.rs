use std::time::Duration;

use color_eyre::eyre::bail;
use color_eyre::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::models::{CharacterDataset, CharacterRecord};
use crate::names;
use crate::quiz::questions::{QuestionPolicy, QuestionSpec};
use crate::quiz::view::{ClueCount, ClueSlot, FinalResults, GuessResult, QuizView};

/// A state change the caller must apply after `delay` has elapsed. Stamped
/// with the round it belongs to: a restart bumps the round counter, so a
/// transition scheduled before the restart is dropped instead of mutating
/// the new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    round: u64,
    delay: Duration,
    action: TransitionAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionAction {
    RevealNext,
    ShowFinal { won: bool },
}

impl Transition {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// The quiz state machine. Holds the roster, the secret answer and the
/// round's questions; rendering goes through the injected [`QuizView`] and
/// randomness through the injected rng, so rounds are fully scriptable.
pub struct QuizEngine {
    characters: Vec<CharacterRecord>,
    unique_characters: Vec<CharacterRecord>,
    policy: QuestionPolicy,
    rng: StdRng,
    questions: Vec<QuestionSpec>,
    answer: Option<CharacterRecord>,
    revealed_clues: usize,
    game_ended: bool,
    round: u64,
}

impl QuizEngine {
    pub fn new(dataset: CharacterDataset, policy: QuestionPolicy, rng: StdRng) -> Result<Self> {
        if dataset.characters.is_empty() {
            bail!("character roster is empty");
        }
        Ok(QuizEngine {
            characters: dataset.characters,
            unique_characters: dataset.unique_characters,
            policy,
            rng,
            questions: Vec::new(),
            answer: None,
            revealed_clues: 0,
            game_ended: false,
            round: 0,
        })
    }

    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    pub fn unique_characters(&self) -> &[CharacterRecord] {
        &self.unique_characters
    }

    pub fn answer(&self) -> Option<&CharacterRecord> {
        self.answer.as_ref()
    }

    pub fn revealed_clues(&self) -> usize {
        self.revealed_clues
    }

    pub fn game_ended(&self) -> bool {
        self.game_ended
    }

    /// Picks a fresh secret and question set, reveals the first clue and
    /// renders the board.
    pub fn start_round(&mut self, view: &mut impl QuizView) {
        let answer = self
            .characters
            .choose(&mut self.rng)
            .cloned()
            .expect("roster checked non-empty in new()");
        tracing::debug!("answer: {}", answer.name_en);

        self.questions = self.policy.draw(&mut self.rng);
        self.revealed_clues = 1;

        let slots: Vec<ClueSlot> = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| ClueSlot {
                label_key: question.label_key,
                value: (index == 0).then(|| answer.clue(question.field).to_string()),
            })
            .collect();
        view.render_board(&slots);
        view.render_progress(self.revealed_clues, self.questions.len());

        self.answer = Some(answer);
    }

    /// Evaluates a guess by character id. No-op (returning `None`) once the
    /// game has ended, before the first round, or for an empty id — "no
    /// selection" is the empty string, never a real identifier.
    pub fn guess(&mut self, guess_id: &str, view: &mut impl QuizView) -> Option<Transition> {
        if self.game_ended || guess_id.is_empty() {
            return None;
        }
        let answer = self.answer.as_ref()?;

        if guess_id == answer.char_id {
            self.game_ended = true;
            view.render_result(&GuessResult::Correct {
                name: answer.name_en.clone(),
            });
            return Some(self.schedule(TransitionAction::ShowFinal { won: true }));
        }

        // The full roster, not the deduplicated one: a wrong guess surfaces
        // the specific card's trivia.
        if let Some(record) = self.characters.iter().find(|c| c.char_id == guess_id) {
            view.render_wrong_guess(record, &self.questions);
        }
        let name = self
            .unique_characters
            .iter()
            .find(|c| c.char_id == guess_id)
            .map(|c| c.name_en.clone())
            .unwrap_or_else(|| guess_id.to_string());
        view.render_result(&GuessResult::Wrong { name });

        if self.revealed_clues < self.questions.len() {
            Some(self.schedule(TransitionAction::RevealNext))
        } else {
            // Out of clues: terminal now, so nothing can race the delayed
            // final-panel display.
            self.game_ended = true;
            Some(self.schedule(TransitionAction::ShowFinal { won: false }))
        }
    }

    /// Applies a due transition. Transitions from a previous round are
    /// dropped silently.
    pub fn apply(&mut self, transition: Transition, view: &mut impl QuizView) {
        if transition.round != self.round {
            tracing::debug!("dropping transition from a previous round");
            return;
        }
        match transition.action {
            TransitionAction::RevealNext => {
                if !self.game_ended {
                    self.reveal_next(view);
                }
            }
            TransitionAction::ShowFinal { won } => self.show_final(won, view),
        }
    }

    fn reveal_next(&mut self, view: &mut impl QuizView) {
        if self.revealed_clues >= self.questions.len() {
            return;
        }
        let question = self.questions[self.revealed_clues];
        let value = self
            .answer
            .as_ref()
            .map(|a| a.clue(question.field).to_string())
            .unwrap_or_else(|| names::NOT_AVAILABLE.to_string());
        view.render_clue(self.revealed_clues, question.label_key, &value);
        self.revealed_clues += 1;
        view.render_progress(self.revealed_clues, self.questions.len());
    }

    fn show_final(&mut self, won: bool, view: &mut impl QuizView) {
        let Some(answer) = self.answer.as_ref() else {
            return;
        };
        view.render_final(&FinalResults {
            won,
            answer_name: answer.name_en.clone(),
            clues: if won {
                ClueCount::Count(self.revealed_clues)
            } else {
                ClueCount::All
            },
        });
    }

    /// Cancels anything in flight, clears the terminal flag and the view's
    /// round-scoped panels, then starts over with a fresh secret (and, for
    /// the random variant, a freshly drawn question subset).
    pub fn restart(&mut self, view: &mut impl QuizView) {
        self.round += 1;
        self.game_ended = false;
        view.clear_round();
        self.start_round(view);
    }

    fn schedule(&self, action: TransitionAction) -> Transition {
        Transition {
            round: self.round,
            delay: names::REVEAL_DELAY,
            action,
        }
    }
}
