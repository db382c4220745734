pub mod distractor;
pub mod exam_search;
pub mod grade_matcher;
pub mod query_interpreter;
pub mod vocabulary_filter;

pub use distractor::{select_distractors, DistractorField};
pub use exam_search::{filter_exam_questions, parse_exam_query};
pub use query_interpreter::{interpret, QueryInterpreter};
