//! 请求 / 响应 / 出站消息
//!
//! 传输层不在本 crate 内：路由器只产出 `Dispatch`，由调用方决定如何投递。

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::error::AppError;
use crate::models::check::CheckedIdea;
use crate::models::evaluation::ScoredIdea;
use crate::models::idea::Idea;

/// 评估请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub ideas: Vec<Idea>,
    /// 缺省时使用 `Config::default_top_k`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
}

/// 检查请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub ideas: Vec<Idea>,
    #[serde(default = "default_round")]
    pub round: i64,
}

fn default_round() -> i64 {
    1
}

/// 评估结果负载
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPayload {
    pub scored_ideas: Vec<ScoredIdea>,
    pub total_evaluated: usize,
    pub top_k_returned: usize,
}

/// 一轮检查的汇总结论
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundVerdict {
    pub round: i64,
    pub all_passed: bool,
    pub ideas: Vec<CheckedIdea>,
    pub needs_method_improvement: Vec<CheckedIdea>,
    pub needs_experiment_improvement: Vec<CheckedIdea>,
    pub count: usize,
}

impl RoundVerdict {
    /// 接收方据此决定是否发起下一轮：未全部通过且尚未达到最大轮数
    pub fn needs_another_round(&self, max_rounds: u32) -> bool {
        !self.all_passed && self.round < i64::from(max_rounds)
    }
}

/// 同步响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: JsonValue,
}

impl Response {
    pub fn ok(message: impl Into<String>, data: JsonValue) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    /// 失败响应，`data.error` 携带错误码
    pub fn failure(message: impl Into<String>, error_code: &str) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: json!({ "error": error_code }),
        }
    }

    pub fn from_error(err: &AppError) -> Self {
        Self::failure(err.to_string(), err.error_code())
    }

    /// 失败响应的错误码
    pub fn error_code(&self) -> Option<&str> {
        self.data.get("error").and_then(|v| v.as_str())
    }
}

/// 出站消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outbound {
    /// 定向事件
    Event {
        event_name: String,
        destination_id: String,
        payload: JsonValue,
    },
    /// 发布到共享讨论频道的文本
    ChannelPost { channel: String, text: String },
}

impl Outbound {
    pub fn event(event_name: &str, destination_id: &str, payload: JsonValue) -> Self {
        Outbound::Event {
            event_name: event_name.to_string(),
            destination_id: destination_id.to_string(),
            payload,
        }
    }

    pub fn event_name(&self) -> Option<&str> {
        match self {
            Outbound::Event { event_name, .. } => Some(event_name),
            Outbound::ChannelPost { .. } => None,
        }
    }
}

/// 一次请求分发的完整产物
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub response: Response,
    pub outbound: Vec<Outbound>,
}

impl Dispatch {
    pub fn reply(response: Response) -> Self {
        Self {
            response,
            outbound: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let check: CheckRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(check.round, 1);
        assert!(check.ideas.is_empty());

        let eval: EvaluateRequest = serde_json::from_value(json!({ "ideas": [] })).unwrap();
        assert_eq!(eval.top_k, None);
    }

    #[test]
    fn test_needs_another_round_is_bounded() {
        let verdict = RoundVerdict {
            round: 1,
            all_passed: false,
            ideas: Vec::new(),
            needs_method_improvement: Vec::new(),
            needs_experiment_improvement: Vec::new(),
            count: 0,
        };
        assert!(verdict.needs_another_round(2));
        assert!(!RoundVerdict { round: 2, ..verdict.clone() }.needs_another_round(2));
        assert!(!RoundVerdict { all_passed: true, ..verdict }.needs_another_round(3));
    }
}
