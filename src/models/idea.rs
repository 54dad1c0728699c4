use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// 缺少 id 时使用的占位标识
pub const UNKNOWN_IDEA_ID: &str = "unknown";
/// 缺少标题时评估结果使用的占位标题
pub const UNTITLED: &str = "Untitled";

/// 研究创意
///
/// 标题区分"缺失"与"显式空串"，其余文本字段缺省为空字符串；
/// 未识别的字段原样保留在 `extra` 中，以便检查结果回传完整记录。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub methodology: String,
    #[serde(default)]
    pub experimental_setup: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Idea {
    /// 创意标识，缺省为 "unknown"
    pub fn idea_id(&self) -> &str {
        self.id.as_deref().unwrap_or(UNKNOWN_IDEA_ID)
    }

    /// 用于关键词匹配和长度计算的标题文本，缺失时为空串
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// 展示用标题，仅在缺失时使用 "Untitled"；显式空串原样返回
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// 查找第一条评审类别包含 `category` 的评审分数（类别不区分大小写）
    ///
    /// 没有匹配评审或匹配评审未给分时返回 `None`。
    pub fn review_score(&self, category: &str) -> Option<f64> {
        self.reviews
            .iter()
            .find(|r| r.critic.to_lowercase().contains(category))
            .and_then(|r| r.review.score)
    }
}

/// 单条评审
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// 评审类别标签，例如 "technical_critic"、"impact_critic"
    #[serde(default)]
    pub critic: String,
    #[serde(default)]
    pub review: ReviewBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Review {
    pub fn new(critic: impl Into<String>, score: f64) -> Self {
        Self {
            critic: critic.into(),
            review: ReviewBody {
                score: Some(score),
                extra: Map::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        let idea: Idea = serde_json::from_value(json!({})).unwrap();
        assert_eq!(idea.idea_id(), "unknown");
        assert_eq!(idea.display_title(), "Untitled");
        assert!(idea.methodology.is_empty());
        assert!(idea.reviews.is_empty());
    }

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let idea: Idea = serde_json::from_value(json!({
            "id": "i1",
            "title": "t",
            "author": "domain_expert"
        }))
        .unwrap();
        let back = serde_json::to_value(&idea).unwrap();
        assert_eq!(back["author"], "domain_expert");
    }

    #[test]
    fn test_explicit_empty_title_is_not_missing() {
        let empty: Idea = serde_json::from_value(json!({ "title": "" })).unwrap();
        assert_eq!(empty.title.as_deref(), Some(""));
        assert_eq!(empty.display_title(), "");
        assert_eq!(empty.title_text(), "");

        let back = serde_json::to_value(&empty).unwrap();
        assert_eq!(back["title"], "");
        let missing = serde_json::to_value(Idea::default()).unwrap();
        assert!(missing.get("title").is_none());
    }

    #[test]
    fn test_review_score_first_match_case_insensitive() {
        let idea = Idea {
            reviews: vec![
                Review::new("Impact_Critic", 4.0),
                Review::new("TECHNICAL critic", 9.0),
                Review::new("technical_critic", 2.0),
            ],
            ..Default::default()
        };
        assert_eq!(idea.review_score("technical"), Some(9.0));
        assert_eq!(idea.review_score("impact"), Some(4.0));
        assert_eq!(idea.review_score("novelty"), None);
    }
}
