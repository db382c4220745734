pub mod criteria;
pub mod exam;
pub mod grade;
pub mod loaders;
pub mod problem;
pub mod vocabulary;

pub use criteria::{CefrLevel, Difficulty, PartOfSpeech, ProblemType, SearchCriteria};
pub use exam::{ExamDifficulty, ExamQuestion, ExamSearchCriteria};
pub use grade::{GradeToken, SchoolStage};
pub use loaders::{load_dataset, sample_exam_questions, sample_vocabulary, DataSource, Dataset};
pub use problem::GeneratedProblem;
pub use vocabulary::VocabularyRecord;
