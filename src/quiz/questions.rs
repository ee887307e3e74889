use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// One clue: the flattened field it reads and the locale key of its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSpec {
    pub field: &'static str,
    pub label_key: &'static str,
}

const fn q(field: &'static str, label_key: &'static str) -> QuestionSpec {
    QuestionSpec { field, label_key }
}

/// The classic quiz: the same ten clues every round, in this order.
pub const STANDARD_QUESTIONS: [QuestionSpec; 10] = [
    q("weight", "question.weight"),
    q("ears", "question.ears"),
    q("weak", "question.weak"),
    q("tail", "question.tail"),
    q("strong", "question.strong"),
    q("three_sizes", "question.three_sizes"),
    q("active", "question.active"),
    q("record", "question.record"),
    q("va_en", "question.va_en"),
    q("title", "question.title"),
];

/// Everything the random variant may ask about.
pub const RANDOM_POOL: [QuestionSpec; 20] = [
    q("title", "question.title"),
    q("tagline", "question.tagline"),
    q("weight", "question.weight"),
    q("shoes", "question.shoes"),
    q("dorm", "question.dorm"),
    q("class", "question.class"),
    q("ears", "question.ears"),
    q("tail", "question.tail"),
    q("strong", "question.strong"),
    q("weak", "question.weak"),
    q("family", "question.family"),
    q("secrets", "question.secrets"),
    q("va_en", "question.va_en"),
    q("three_sizes", "question.three_sizes"),
    q("country", "question.country"),
    q("death", "question.death"),
    q("record", "question.record"),
    q("earnings", "question.earnings"),
    q("active", "question.active"),
    q("release_en", "question.release_en"),
];

/// How a round's questions get picked. The two quiz variants differ only
/// here; the state machine is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionPolicy {
    /// Always [`STANDARD_QUESTIONS`], in order.
    Fixed,
    /// Shuffle [`RANDOM_POOL`] and take `count` distinct questions, fresh
    /// every round.
    RandomDraw { count: usize },
}

impl QuestionPolicy {
    pub fn draw(&self, rng: &mut StdRng) -> Vec<QuestionSpec> {
        match *self {
            QuestionPolicy::Fixed => STANDARD_QUESTIONS.to_vec(),
            QuestionPolicy::RandomDraw { count } => {
                let mut pool = RANDOM_POOL.to_vec();
                pool.shuffle(rng);
                pool.truncate(count.min(RANDOM_POOL.len()));
                pool
            }
        }
    }
}
