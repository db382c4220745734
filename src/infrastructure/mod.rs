pub mod random;

pub use random::QuizRng;
