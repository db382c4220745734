pub mod problem_ctx;
pub mod problem_generator;
pub mod result_assembler;

pub use problem_ctx::ProblemCtx;
pub use problem_generator::generate_problem;
pub use result_assembler::{generate, GenerationOutcome};
