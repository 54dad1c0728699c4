//! 命令路由器 - 编排层
//!
//! ## 职责
//!
//! 把"操作名 + JSON 负载"映射到带类型的处理函数，
//! 并把处理结果统一转换成 `Dispatch`（同步响应 + 出站消息）。
//!
//! | 操作名 | 请求 | 出站 |
//! |---|---|---|
//! | `idea.evaluate` | `EvaluateRequest` | `idea.evaluated` → 请求方 |
//! | `idea.check` | `CheckRequest` | 讨论频道摘要 + `idea.check.result` → 协调者 |
//! | `research.ideas.clear` | 无 | `research.ideas.cleared` → 协调者 |
//!
//! 处理函数内的任何错误都在这里转换为失败响应，不会向调用方传播。

use std::sync::Arc;

use phf::phf_map;
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, PayloadError, ValidationError};
use crate::infrastructure::{SessionStore, SimulatedLatency};
use crate::models::{
    CheckRequest, Dispatch, EvaluateRequest, EvaluationPayload, Outbound, Response,
};
use crate::services::{CriteriaScorer, RefinementChecker};
use crate::workflow::{format_check_digest, rank_ideas, RoundController};

pub const EVALUATE: &str = "idea.evaluate";
pub const CHECK: &str = "idea.check";
pub const CLEAR: &str = "research.ideas.clear";

pub const EVALUATED_EVENT: &str = "idea.evaluated";
pub const CHECK_RESULT_EVENT: &str = "idea.check.result";
pub const CLEARED_EVENT: &str = "research.ideas.cleared";

/// 已注册的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Evaluate,
    Check,
    Clear,
}

static OPERATIONS: phf::Map<&'static str, Operation> = phf_map! {
    "idea.evaluate" => Operation::Evaluate,
    "idea.check" => Operation::Check,
    "research.ideas.clear" => Operation::Clear,
};

impl Operation {
    pub fn from_name(name: &str) -> Option<Self> {
        OPERATIONS.get(name).copied()
    }
}

/// 命令路由器
///
/// 持有一个会话的全部组件，同一个 `SessionStore` 注入评分器和轮次控制器。
pub struct CommandRouter {
    store: Arc<SessionStore>,
    scorer: CriteriaScorer,
    rounds: RoundController,
    default_top_k: usize,
    coordinator_id: String,
    discussion_channel: String,
}

impl CommandRouter {
    /// 使用全新的会话存储创建路由器
    pub fn new(config: &Config) -> Self {
        Self::with_store(config, Arc::new(SessionStore::new()))
    }

    pub fn with_store(config: &Config, store: Arc<SessionStore>) -> Self {
        let checker =
            RefinementChecker::new(SimulatedLatency::from_millis(config.simulated_latency_ms));

        Self {
            scorer: CriteriaScorer::new(store.clone()),
            rounds: RoundController::new(
                store.clone(),
                checker,
                config.max_rounds,
                config.max_concurrent_checks,
            ),
            store,
            default_top_k: config.default_top_k,
            coordinator_id: config.coordinator_id.clone(),
            discussion_channel: config.discussion_channel.clone(),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn rounds(&self) -> &RoundController {
        &self.rounds
    }

    /// 按操作名分发请求
    pub async fn dispatch(&self, operation: &str, source_id: &str, payload: JsonValue) -> Dispatch {
        let Some(op) = Operation::from_name(operation) else {
            warn!("⚠️ 收到未知操作: {}", operation);
            let err = AppError::from(PayloadError::UnknownOperation {
                operation: operation.to_string(),
            });
            return Dispatch::reply(Response::from_error(&err));
        };

        match op {
            Operation::Evaluate => match parse_payload::<EvaluateRequest>(operation, payload) {
                Ok(request) => self.evaluate(request, source_id),
                Err(e) => Dispatch::reply(Response::from_error(&e)),
            },
            Operation::Check => match parse_payload::<CheckRequest>(operation, payload) {
                Ok(request) => self.check(request).await,
                Err(e) => Dispatch::reply(Response::from_error(&e)),
            },
            Operation::Clear => self.clear(),
        }
    }

    /// 评估请求
    pub fn evaluate(&self, request: EvaluateRequest, source_id: &str) -> Dispatch {
        match self.try_evaluate(request, source_id) {
            Ok(dispatch) => dispatch,
            Err(AppError::Validation(e)) => {
                warn!("⚠️ 评估请求被拒绝: {}", e);
                let message = e.to_string();
                Dispatch::reply(Response::failure(message, AppError::from(e).error_code()))
            }
            Err(e) => {
                error!("Error evaluating ideas: {}", e);
                Dispatch::reply(Response::failure(
                    format!("Error evaluating ideas: {}", e),
                    e.error_code(),
                ))
            }
        }
    }

    fn try_evaluate(&self, request: EvaluateRequest, source_id: &str) -> AppResult<Dispatch> {
        if request.ideas.is_empty() {
            return Err(ValidationError::EmptyIdeasList.into());
        }

        let top_k = request.top_k.unwrap_or(self.default_top_k);
        let scored_ideas = rank_ideas(&self.scorer, &request.ideas, top_k);

        let payload = EvaluationPayload {
            total_evaluated: request.ideas.len(),
            top_k_returned: scored_ideas.len(),
            scored_ideas,
        };
        info!(
            "✓ 已评估 {} 个创意，返回前 {} 个",
            payload.total_evaluated, payload.top_k_returned
        );

        let data = serde_json::to_value(&payload)?;
        Ok(Dispatch {
            response: Response::ok(
                format!("Successfully evaluated {} ideas", payload.total_evaluated),
                data.clone(),
            ),
            outbound: vec![Outbound::event(EVALUATED_EVENT, source_id, data)],
        })
    }

    /// 检查请求：空批次视为全部通过
    pub async fn check(&self, request: CheckRequest) -> Dispatch {
        let verdict = self.rounds.run_round(&request.ideas, request.round).await;
        let digest = format_check_digest(&verdict);

        match serde_json::to_value(&verdict) {
            Ok(data) => Dispatch {
                response: Response::ok(
                    format!(
                        "Checked {} ideas in round {}",
                        verdict.count, verdict.round
                    ),
                    data.clone(),
                ),
                outbound: vec![
                    Outbound::ChannelPost {
                        channel: self.discussion_channel.clone(),
                        text: digest,
                    },
                    Outbound::event(CHECK_RESULT_EVENT, &self.coordinator_id, data),
                ],
            },
            Err(e) => {
                let err = AppError::from(e);
                error!("检查结果序列化失败: {}", err);
                Dispatch::reply(Response::from_error(&err))
            }
        }
    }

    /// 清空请求
    pub fn clear(&self) -> Dispatch {
        self.rounds.clear();
        let payload = json!({ "status": "buffers_cleared" });
        Dispatch {
            response: Response::ok("Buffers cleared", payload.clone()),
            outbound: vec![Outbound::event(
                CLEARED_EVENT,
                &self.coordinator_id,
                payload,
            )],
        }
    }
}

/// 解析负载；空负载按 `{}` 处理，缺省字段取默认值
fn parse_payload<T: DeserializeOwned>(operation: &str, payload: JsonValue) -> AppResult<T> {
    let payload = if payload.is_null() { json!({}) } else { payload };
    serde_json::from_value(payload).map_err(|e| AppError::invalid_payload(operation, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> CommandRouter {
        CommandRouter::new(&Config::without_latency())
    }

    #[test]
    fn test_operation_table() {
        assert_eq!(Operation::from_name(EVALUATE), Some(Operation::Evaluate));
        assert_eq!(Operation::from_name(CHECK), Some(Operation::Check));
        assert_eq!(Operation::from_name(CLEAR), Some(Operation::Clear));
        assert_eq!(Operation::from_name("idea.generate"), None);
    }

    #[tokio::test]
    async fn test_empty_ideas_rejected() {
        let dispatch = router()
            .dispatch(EVALUATE, "leader", json!({ "ideas": [] }))
            .await;
        assert!(!dispatch.response.success);
        assert_eq!(dispatch.response.message, "No ideas provided for evaluation");
        assert_eq!(dispatch.response.error_code(), Some("empty_ideas_list"));
        assert!(dispatch.outbound.is_empty());
    }

    #[tokio::test]
    async fn test_missing_ideas_field_is_also_empty() {
        let dispatch = router().dispatch(EVALUATE, "leader", JsonValue::Null).await;
        assert_eq!(dispatch.response.error_code(), Some("empty_ideas_list"));
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let dispatch = router()
            .dispatch(EVALUATE, "leader", json!({ "ideas": "not a list" }))
            .await;
        assert!(!dispatch.response.success);
        assert_eq!(dispatch.response.error_code(), Some("invalid_payload"));
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let dispatch = router().dispatch("idea.generate", "leader", json!({})).await;
        assert!(!dispatch.response.success);
        assert_eq!(dispatch.response.error_code(), Some("unknown_operation"));
    }

    #[tokio::test]
    async fn test_evaluate_publishes_to_requester() {
        let dispatch = router()
            .dispatch(
                EVALUATE,
                "leader",
                json!({ "ideas": [{ "id": "a" }, { "id": "b" }, { "id": "c" }], "top_k": 2 }),
            )
            .await;

        assert!(dispatch.response.success);
        assert_eq!(dispatch.response.message, "Successfully evaluated 3 ideas");
        assert_eq!(dispatch.response.data["total_evaluated"], 3);
        assert_eq!(dispatch.response.data["top_k_returned"], 2);

        match &dispatch.outbound[..] {
            [Outbound::Event {
                event_name,
                destination_id,
                payload,
            }] => {
                assert_eq!(event_name, EVALUATED_EVENT);
                assert_eq!(destination_id, "leader");
                assert_eq!(payload, &dispatch.response.data);
            }
            other => panic!("unexpected outbound: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_check_defaults_round_and_accepts_empty() {
        let router = router();
        let dispatch = router.dispatch(CHECK, "leader", json!({ "ideas": [] })).await;

        assert!(dispatch.response.success);
        assert_eq!(dispatch.response.data["round"], 1);
        assert_eq!(dispatch.response.data["all_passed"], true);
        assert_eq!(dispatch.response.data["count"], 0);
        assert_eq!(router.rounds().current_round(), 1);

        assert!(matches!(
            &dispatch.outbound[0],
            Outbound::ChannelPost { channel, .. } if channel == "discussion"
        ));
        assert_eq!(dispatch.outbound[1].event_name(), Some(CHECK_RESULT_EVENT));
    }

    #[tokio::test]
    async fn test_check_accepts_negative_round() {
        let router = router();
        let dispatch = router
            .dispatch(CHECK, "leader", json!({ "ideas": [], "round": -1 }))
            .await;

        assert!(dispatch.response.success);
        assert_eq!(dispatch.response.message, "Checked 0 ideas in round -1");
        assert_eq!(dispatch.response.data["round"], -1);
        assert_eq!(dispatch.response.data["all_passed"], true);
        assert_eq!(router.rounds().current_round(), -1);
    }

    #[tokio::test]
    async fn test_evaluate_echoes_explicit_empty_title() {
        let dispatch = router()
            .dispatch(EVALUATE, "leader", json!({ "ideas": [{ "id": "a", "title": "" }] }))
            .await;
        let evaluation = &dispatch.response.data["scored_ideas"][0]["evaluation"];
        assert_eq!(evaluation["idea_title"], "");
    }

    #[tokio::test]
    async fn test_clear_acknowledges() {
        let router = router();
        router
            .dispatch(EVALUATE, "leader", json!({ "ideas": [{ "id": "a" }] }))
            .await;
        router
            .dispatch(CHECK, "leader", json!({ "ideas": [{ "id": "a" }], "round": 2 }))
            .await;
        assert_eq!(router.rounds().current_round(), 2);

        let dispatch = router.dispatch(CLEAR, "leader", JsonValue::Null).await;
        assert!(dispatch.response.success);
        assert_eq!(dispatch.outbound[0].event_name(), Some(CLEARED_EVENT));
        assert_eq!(router.rounds().current_round(), 0);
        assert_eq!(router.store().evaluation_count(), 0);
        assert_eq!(router.store().buffered_count(), 0);
    }
}
