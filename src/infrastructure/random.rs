//! 随机源 - 基础设施层
//!
//! 洗牌和抽样用到的唯一可变共享资源。每个请求各自持有一个实例。

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// 随机源
///
/// 职责：
/// - 持有本次请求的随机数生成器
/// - 指定种子时结果可复现（测试、排查问题）
/// - 不认识 Vocabulary / Problem
pub struct QuizRng {
    inner: StdRng,
    seed: Option<u64>,
}

impl QuizRng {
    /// 使用固定种子创建
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// 使用系统熵创建
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// 有种子用种子，没有则取系统熵
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RngCore for QuizRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
