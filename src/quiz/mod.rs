pub mod engine;
pub mod questions;
pub mod runner;
pub mod view;

pub use engine::{QuizEngine, Transition};
pub use questions::{QuestionPolicy, QuestionSpec};
pub use view::QuizView;
