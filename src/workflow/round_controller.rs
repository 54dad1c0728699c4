//! 轮次控制 - 流程层
//!
//! ## 状态机
//!
//! ```text
//! Idle ──check──▶ Checking ──全部创意检查完成──▶ Resolved
//!  ▲                                              │
//!  └──────────────────── clear ◀──────────────────┘
//! ```
//!
//! 控制器本身不循环：每次检查请求产出一份汇总结论，
//! 是否发起下一轮由结论的接收方根据 `all_passed` 和轮次自行决定。

use std::sync::{Arc, Mutex};

use futures::stream::{self, StreamExt};
use tracing::info;

use crate::infrastructure::SessionStore;
use crate::models::{CheckedIdea, Idea, RoundVerdict};
use crate::services::RefinementChecker;

/// 控制器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// 没有进行中的批次
    Idle,
    /// 正在检查某一轮
    Checking { round: i64 },
    /// 某一轮已给出结论
    Resolved { round: i64, all_passed: bool },
}

/// 轮次控制器
pub struct RoundController {
    store: Arc<SessionStore>,
    checker: RefinementChecker,
    max_rounds: u32,
    max_concurrent: usize,
    phase: Mutex<RoundPhase>,
}

impl RoundController {
    pub fn new(
        store: Arc<SessionStore>,
        checker: RefinementChecker,
        max_rounds: u32,
        max_concurrent: usize,
    ) -> Self {
        Self {
            store,
            checker,
            max_rounds,
            max_concurrent: max_concurrent.max(1),
            phase: Mutex::new(RoundPhase::Idle),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_phase(&self, phase: RoundPhase) {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = phase;
    }

    pub fn current_round(&self) -> i64 {
        self.store.current_round()
    }

    /// 策略常量：接收方发起下一轮的上限
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// 检查一批创意并汇总结论
    ///
    /// 各创意并发检查（上限 `max_concurrent`），结果保持输入顺序；
    /// 全部完成后才进行汇总。
    pub async fn run_round(&self, ideas: &[Idea], round: i64) -> RoundVerdict {
        self.store.set_current_round(round);
        self.set_phase(RoundPhase::Checking { round });
        info!("🔍 开始第 {} 轮检查，共 {} 个创意", round, ideas.len());

        let checker = self.checker;
        let checked: Vec<CheckedIdea> = stream::iter(ideas)
            .map(|idea| async move { checker.check_async(idea, round).await })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        for item in &checked {
            self.store.buffer_checked(item);
        }

        let verdict = aggregate(round, checked);
        self.set_phase(RoundPhase::Resolved {
            round,
            all_passed: verdict.all_passed,
        });

        info!(
            "✓ 第 {} 轮检查完成: {} 个创意, 方法需改进 {} 个, 实验需改进 {} 个",
            round,
            verdict.count,
            verdict.needs_method_improvement.len(),
            verdict.needs_experiment_improvement.len()
        );

        verdict
    }

    /// 清空缓冲状态，轮次归零并回到 Idle
    pub fn clear(&self) {
        self.store.clear();
        self.set_phase(RoundPhase::Idle);
        info!("🧹 已清空创意与评估缓冲");
    }
}

/// 把逐个检查结果划分为两个待改进列表
pub fn aggregate(round: i64, checked: Vec<CheckedIdea>) -> RoundVerdict {
    let needs_method_improvement: Vec<CheckedIdea> = checked
        .iter()
        .filter(|c| c.needs_method_improvement)
        .cloned()
        .collect();
    let needs_experiment_improvement: Vec<CheckedIdea> = checked
        .iter()
        .filter(|c| c.needs_experiment_improvement)
        .cloned()
        .collect();

    RoundVerdict {
        round,
        all_passed: needs_method_improvement.is_empty() && needs_experiment_improvement.is_empty(),
        count: checked.len(),
        ideas: checked,
        needs_method_improvement,
        needs_experiment_improvement,
    }
}

/// 发布到讨论频道的检查摘要
pub fn format_check_digest(verdict: &RoundVerdict) -> String {
    let mut text = format!("🔍 完善Agent检查结果（第{}轮）：\n\n", verdict.round);

    for (i, checked) in verdict.ideas.iter().enumerate() {
        let title = match checked.idea.title.as_deref() {
            Some(title) => title.to_string(),
            None => format!("创意{}", i + 1),
        };
        let status = if checked.passed() {
            "✅ 通过"
        } else {
            "⚠️ 需要改进"
        };

        text.push_str(&format!("{} {}\n", status, title));
        if !checked.method_feedback.is_empty() {
            text.push_str(&format!("   方法反馈：{}\n", checked.method_feedback));
        }
        if !checked.experiment_feedback.is_empty() {
            text.push_str(&format!("   实验反馈：{}\n", checked.experiment_feedback));
        }
        text.push('\n');
    }

    text
}
