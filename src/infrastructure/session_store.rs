//! 会话存储 - 基础设施层
//!
//! 持有一次评估会话内唯一的共享可变状态：评估结果、得分摘要、
//! 已检查创意缓冲区以及当前轮次。以 idea_id 为键，后写覆盖先写。
//! 由调用方创建并注入评分器与轮次控制器，不同会话互不影响。

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::models::{CheckedIdea, Evaluation, IdeaScore};

#[derive(Debug, Default)]
struct SessionState {
    evaluations: HashMap<String, Evaluation>,
    idea_scores: HashMap<String, IdeaScore>,
    idea_buffer: HashMap<String, CheckedIdea>,
    current_round: i64,
}

/// 会话存储
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // 写入都是整键覆盖，锁中毒时沿用内部数据即可
    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// 记录一次评估（同一 idea_id 后写覆盖）
    pub fn record_evaluation(&self, evaluation: &Evaluation, score: IdeaScore) {
        let mut state = self.write();
        debug!(
            "记录评估: {} | 总分 {:.2}",
            evaluation.idea_id, evaluation.total_score
        );
        state
            .idea_scores
            .insert(evaluation.idea_id.clone(), score);
        state
            .evaluations
            .insert(evaluation.idea_id.clone(), evaluation.clone());
    }

    pub fn evaluation(&self, idea_id: &str) -> Option<Evaluation> {
        self.read().evaluations.get(idea_id).cloned()
    }

    pub fn idea_score(&self, idea_id: &str) -> Option<IdeaScore> {
        self.read().idea_scores.get(idea_id).copied()
    }

    pub fn evaluation_count(&self) -> usize {
        self.read().evaluations.len()
    }

    /// 缓冲一条检查结果
    pub fn buffer_checked(&self, checked: &CheckedIdea) {
        self.write()
            .idea_buffer
            .insert(checked.idea.idea_id().to_string(), checked.clone());
    }

    pub fn buffered(&self, idea_id: &str) -> Option<CheckedIdea> {
        self.read().idea_buffer.get(idea_id).cloned()
    }

    pub fn buffered_count(&self) -> usize {
        self.read().idea_buffer.len()
    }

    pub fn current_round(&self) -> i64 {
        self.read().current_round
    }

    pub fn set_current_round(&self, round: i64) {
        self.write().current_round = round;
    }

    /// 清空全部状态，轮次归零
    pub fn clear(&self) {
        let mut state = self.write();
        state.evaluations.clear();
        state.idea_scores.clear();
        state.idea_buffer.clear();
        state.current_round = 0;
    }
}
