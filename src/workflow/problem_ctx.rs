//! 出题上下文
//!
//! 封装"这是哪一批的第几道题"这一信息，并由此生成题目 ID

use rand::Rng;
use std::fmt::Display;

/// 出题上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemCtx {
    /// 批次标记，每次请求随机生成
    pub batch_tag: u32,

    /// 题目在本批中的索引（从0开始）
    pub index: usize,
}

impl ProblemCtx {
    pub fn new(batch_tag: u32, index: usize) -> Self {
        Self { batch_tag, index }
    }

    /// 为新的一批题目生成批次标记
    pub fn new_batch_tag<R: Rng + ?Sized>(rng: &mut R) -> u32 {
        rng.gen()
    }

    /// 批次内唯一的题目 ID，例如 "3fa2c91b-007"
    pub fn problem_id(&self) -> String {
        format!("{:08x}-{:03}", self.batch_tag, self.index + 1)
    }
}

impl Display for ProblemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[批次#{:08x} 题目#{}]", self.batch_tag, self.index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_problem_ids_unique_within_batch() {
        let ids: HashSet<String> = (0..100).map(|i| ProblemCtx::new(0xabc, i).problem_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_problem_id_format() {
        assert_eq!(ProblemCtx::new(0x1f, 6).problem_id(), "0000001f-007");
        assert_eq!(ProblemCtx::new(0x1f, 6).to_string(), "[批次#0000001f 题目#7]");
    }
}
