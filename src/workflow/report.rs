//! 评估报告生成
//!
//! 纯格式化函数，无内部状态：同样的输入总是得到同样的文本。

use crate::models::ScoredIdea;

const RULE_WIDTH: usize = 80;

/// 评估报告生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// 生成排序后创意的多段落报告
    pub fn generate(&self, ranked: &[ScoredIdea]) -> String {
        let mut report = vec!["# Research Ideas Evaluation Report\n".to_string()];

        for (idx, item) in ranked.iter().enumerate() {
            let evaluation = &item.evaluation;

            report.push(format!("## {}. {}", idx + 1, evaluation.idea_title));
            report.push(format!(
                "**Overall Score:** {}/10\n",
                format_score(evaluation.total_score)
            ));

            report.push("### Detailed Scores:".to_string());
            for (criterion, score) in evaluation.scores.iter() {
                report.push(format!(
                    "- **{}:** {}/10 (weight: {:.0}%)",
                    criterion,
                    format_score(score),
                    criterion.weight() * 100.0
                ));
            }

            push_section(&mut report, "Strengths", &evaluation.strengths);
            push_section(&mut report, "Areas for Improvement", &evaluation.weaknesses);
            push_section(&mut report, "Recommendations", &evaluation.recommendations);

            report.push(format!("\n{}\n", "-".repeat(RULE_WIDTH)));
        }

        report.join("\n")
    }
}

fn push_section(report: &mut Vec<String>, heading: &str, items: &[String]) {
    report.push(format!("\n### {}:", heading));
    report.extend(items.iter().map(|item| format!("- {}", item)));
}

/// 整数分也保留一位小数（7 → "7.0"）
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        format!("{}", score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SessionStore;
    use crate::models::Idea;
    use crate::services::CriteriaScorer;
    use crate::workflow::rank_ideas;
    use std::sync::Arc;

    fn ranked() -> Vec<ScoredIdea> {
        let scorer = CriteriaScorer::new(Arc::new(SessionStore::new()));
        let ideas = vec![
            Idea {
                title: Some("A Novel Approach".to_string()),
                ..Default::default()
            },
            Idea::default(),
        ];
        rank_ideas(&scorer, &ideas, 5)
    }

    #[test]
    fn test_report_layout() {
        let report = ReportGenerator::new().generate(&ranked());

        assert!(report.starts_with("# Research Ideas Evaluation Report\n"));
        assert!(report.contains("## 1. A Novel Approach"));
        assert!(report.contains("## 2. Untitled"));
        assert!(report.contains("**Overall Score:** 6.1/10"));
        assert!(report.contains("- **technical_feasibility:** 7.0/10 (weight: 25%)"));
        assert!(report.contains("- **relevance:** 5.0/10 (weight: 15%)"));
        assert!(report.contains("### Areas for Improvement:\n- Moderate novelty"));
        assert_eq!(report.matches(&"-".repeat(80)).count(), 2);
    }

    #[test]
    fn test_report_is_deterministic() {
        let generator = ReportGenerator::new();
        let items = ranked();
        assert_eq!(generator.generate(&items), generator.generate(&items));
    }

    #[test]
    fn test_empty_report_has_only_heading() {
        assert_eq!(
            ReportGenerator::new().generate(&[]),
            "# Research Ideas Evaluation Report\n"
        );
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(7.0), "7.0");
        assert_eq!(format_score(6.15), "6.15");
    }
}
