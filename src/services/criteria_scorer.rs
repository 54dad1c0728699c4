//! 多维度评分服务 - 业务能力层
//!
//! 只负责"给一个创意打分"，不关心批量和排序。

use std::sync::Arc;

use tracing::debug;

use crate::infrastructure::SessionStore;
use crate::models::evaluation::criteria_table;
use crate::models::{Criterion, CriterionScores, Evaluation, Idea, IdeaScore};

/// 无匹配评审时的默认分数
pub const DEFAULT_REVIEW_SCORE: f64 = 7.0;
/// 启发式维度的基础分
const BASE_SCORE: f64 = 5.0;
const MAX_SCORE: f64 = 10.0;
/// 每命中一个指示词的加分
const INDICATOR_BONUS: f64 = 0.5;

const NOVELTY_INDICATORS: [&str; 8] = [
    "novel",
    "innovative",
    "breakthrough",
    "pioneering",
    "first",
    "new approach",
    "unprecedented",
    "groundbreaking",
];

const RELEVANCE_INDICATORS: [&str; 9] = [
    "current",
    "emerging",
    "trend",
    "recent",
    "state-of-the-art",
    "sota",
    "cutting-edge",
    "timely",
    "important",
];

const CLARITY_KEYWORDS: [&str; 4] = ["objective", "goal", "approach", "method"];

const WELL_BALANCED: &str = "This is a well-balanced idea with good potential";

/// 多维度评分器
///
/// 每次评分都会把结果写入注入的 `SessionStore`。
pub struct CriteriaScorer {
    store: Arc<SessionStore>,
}

impl CriteriaScorer {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// 评估单个创意
    pub fn evaluate(&self, idea: &Idea) -> Evaluation {
        let scores = score_criteria(idea);
        let total = scores.weighted_total();

        let evaluation = Evaluation {
            idea_id: idea.idea_id().to_string(),
            idea_title: idea.display_title().to_string(),
            scores,
            total_score: round2(total),
            criteria: criteria_table(),
            strengths: identify_strengths(&scores),
            weaknesses: identify_weaknesses(&scores),
            recommendations: generate_recommendations(&scores),
        };

        debug!(
            "评估完成: {} | 总分 {:.2}",
            evaluation.idea_id, evaluation.total_score
        );

        self.store.record_evaluation(
            &evaluation,
            IdeaScore {
                total,
                individual: scores,
            },
        );

        evaluation
    }
}

/// 计算五项维度得分
pub fn score_criteria(idea: &Idea) -> CriterionScores {
    CriterionScores {
        technical_feasibility: review_score(idea, "technical"),
        impact: review_score(idea, "impact"),
        novelty: assess_novelty(idea),
        relevance: assess_relevance(idea),
        clarity: assess_clarity(idea),
    }
}

/// 从评审中取分，超出 [0, 10] 的分数截断到边界
fn review_score(idea: &Idea, category: &str) -> f64 {
    match idea.review_score(category) {
        Some(score) if score.is_finite() => score.clamp(0.0, MAX_SCORE),
        _ => DEFAULT_REVIEW_SCORE,
    }
}

fn indicator_score(haystacks: &[&str], indicators: &[&str]) -> f64 {
    let hits = indicators
        .iter()
        .filter(|term| haystacks.iter().any(|h| h.contains(**term)))
        .count();
    (BASE_SCORE + INDICATOR_BONUS * hits as f64).min(MAX_SCORE)
}

pub fn assess_novelty(idea: &Idea) -> f64 {
    let title = idea.title_text().to_lowercase();
    let description = idea.description.to_lowercase();
    indicator_score(&[title.as_str(), description.as_str()], &NOVELTY_INDICATORS)
}

pub fn assess_relevance(idea: &Idea) -> f64 {
    let description = idea.description.to_lowercase();
    indicator_score(&[description.as_str()], &RELEVANCE_INDICATORS)
}

/// 清晰度：三项加分均命中时最高 8.0
pub fn assess_clarity(idea: &Idea) -> f64 {
    let title_len = idea.title_text().chars().count();
    let description_len = idea.description.chars().count();
    let mut score = BASE_SCORE;

    if title_len > 5 && title_len < 100 {
        score += 1.0;
    }
    if description_len > 50 && description_len < 1000 {
        score += 1.0;
    }

    let description = idea.description.to_lowercase();
    if CLARITY_KEYWORDS.iter().any(|k| description.contains(k)) {
        score += 1.0;
    }

    score.min(MAX_SCORE)
}

pub fn identify_strengths(scores: &CriterionScores) -> Vec<String> {
    scores
        .iter()
        .filter_map(|(criterion, score)| {
            if score >= 8.0 {
                Some(format!("Excellent {}", criterion.label()))
            } else if score >= 6.0 {
                Some(format!("Good {}", criterion.label()))
            } else {
                None
            }
        })
        .collect()
}

pub fn identify_weaknesses(scores: &CriterionScores) -> Vec<String> {
    scores
        .iter()
        .filter_map(|(criterion, score)| {
            if score < 5.0 {
                Some(format!("Needs improvement in {}", criterion.label()))
            } else if score < 6.0 {
                Some(format!("Moderate {}", criterion.label()))
            } else {
                None
            }
        })
        .collect()
}

fn recommendation_for(criterion: Criterion) -> Option<&'static str> {
    match criterion {
        Criterion::TechnicalFeasibility => {
            Some("Consider simplifying the technical approach or breaking into smaller milestones")
        }
        Criterion::Impact => Some("Explore ways to increase potential impact or applications"),
        Criterion::Novelty => {
            Some("Consider incorporating more innovative elements or novel approaches")
        }
        Criterion::Clarity => {
            Some("Improve articulation of the idea with clearer objectives and methodology")
        }
        Criterion::Relevance => None,
    }
}

pub fn generate_recommendations(scores: &CriterionScores) -> Vec<String> {
    let mut recommendations: Vec<String> = scores
        .iter()
        .filter(|(_, score)| *score < 6.0)
        .filter_map(|(criterion, _)| recommendation_for(criterion))
        .map(str::to_string)
        .collect();

    if recommendations.is_empty() {
        recommendations.push(WELL_BALANCED.to_string());
    }
    recommendations
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
