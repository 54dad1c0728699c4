//! 排序流程
//!
//! 逐个评分后按总分降序排列，截取前 top_k 个。

use crate::models::{Idea, ScoredIdea};
use crate::services::CriteriaScorer;

/// 评估并排序一批创意
///
/// 使用稳定排序：总分相同的创意保持输入顺序。
/// 调用方保证 `ideas` 非空；`top_k` 大于批次大小时返回全部。
pub fn rank_ideas(scorer: &CriteriaScorer, ideas: &[Idea], top_k: usize) -> Vec<ScoredIdea> {
    let mut ranked: Vec<ScoredIdea> = ideas
        .iter()
        .map(|idea| ScoredIdea {
            idea: idea.clone(),
            evaluation: scorer.evaluate(idea),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.evaluation
            .total_score
            .total_cmp(&a.evaluation.total_score)
    });
    ranked.truncate(top_k);
    ranked
}
