use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::models::idea::Idea;

/// 评估维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    TechnicalFeasibility,
    Impact,
    Novelty,
    Relevance,
    Clarity,
}

impl Criterion {
    /// 固定顺序，评分、报告、优缺点都按此顺序遍历
    pub const ALL: [Criterion; 5] = [
        Criterion::TechnicalFeasibility,
        Criterion::Impact,
        Criterion::Novelty,
        Criterion::Relevance,
        Criterion::Clarity,
    ];

    /// 权重，五项之和为 1.0
    pub fn weight(self) -> f64 {
        match self {
            Criterion::TechnicalFeasibility => 0.25,
            Criterion::Impact => 0.30,
            Criterion::Novelty => 0.20,
            Criterion::Relevance => 0.15,
            Criterion::Clarity => 0.10,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Criterion::TechnicalFeasibility => "technical_feasibility",
            Criterion::Impact => "impact",
            Criterion::Novelty => "novelty",
            Criterion::Relevance => "relevance",
            Criterion::Clarity => "clarity",
        }
    }

    /// 人类可读名称（下划线替换为空格）
    pub fn label(self) -> &'static str {
        match self {
            Criterion::TechnicalFeasibility => "technical feasibility",
            Criterion::Impact => "impact",
            Criterion::Novelty => "novelty",
            Criterion::Relevance => "relevance",
            Criterion::Clarity => "clarity",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Criterion::TechnicalFeasibility => "Technical feasibility and implementation difficulty",
            Criterion::Impact => "Potential impact on the field and society",
            Criterion::Novelty => "Novelty and innovation level",
            Criterion::Relevance => "Relevance to current research trends",
            Criterion::Clarity => "Clarity and articulation of the idea",
        }
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// 五项维度得分，每项位于 [0, 10]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub technical_feasibility: f64,
    pub impact: f64,
    pub novelty: f64,
    pub relevance: f64,
    pub clarity: f64,
}

impl CriterionScores {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::TechnicalFeasibility => self.technical_feasibility,
            Criterion::Impact => self.impact,
            Criterion::Novelty => self.novelty,
            Criterion::Relevance => self.relevance,
            Criterion::Clarity => self.clarity,
        }
    }

    /// 按固定维度顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// 加权总分（未取整）
    pub fn weighted_total(&self) -> f64 {
        self.iter().map(|(c, score)| score * c.weight()).sum()
    }
}

/// 维度配置（权重 + 描述），随评估结果一并下发
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionInfo {
    pub weight: f64,
    pub description: String,
}

/// 全部维度配置
pub fn criteria_table() -> BTreeMap<Criterion, CriterionInfo> {
    Criterion::ALL
        .iter()
        .map(|&c| {
            (
                c,
                CriterionInfo {
                    weight: c.weight(),
                    description: c.description().to_string(),
                },
            )
        })
        .collect()
}

/// 单个创意的评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub idea_id: String,
    pub idea_title: String,
    pub scores: CriterionScores,
    /// 保留两位小数的加权总分
    pub total_score: f64,
    pub criteria: BTreeMap<Criterion, CriterionInfo>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

/// 存储层保存的得分摘要
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdeaScore {
    /// 未取整的加权总分
    pub total: f64,
    pub individual: CriterionScores,
}

/// 创意与其评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredIdea {
    pub idea: Idea,
    pub evaluation: Evaluation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = Criterion::ALL.iter().map(|c| c.weight()).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(Criterion::ALL.iter().all(|c| c.weight() > 0.0));
    }

    #[test]
    fn test_scores_serialize_with_criterion_keys() {
        let scores = CriterionScores {
            technical_feasibility: 7.0,
            impact: 7.0,
            novelty: 5.0,
            relevance: 5.0,
            clarity: 5.0,
        };
        let value = serde_json::to_value(scores).unwrap();
        assert_eq!(value["technical_feasibility"], 7.0);
        assert_eq!(
            serde_json::to_value(criteria_table()).unwrap()["impact"]["weight"],
            0.30
        );
        assert!((scores.weighted_total() - 6.1).abs() < 1e-9);
    }
}
