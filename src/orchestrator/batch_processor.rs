//! 批量创意处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是命令行程序的入口，扮演"传输层 + 协调者"的角色，
//! 把磁盘上的创意批次逐个送进 `CommandRouter`。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：初始化报告文件、创建路由器（持有会话存储）
//! 2. **批量加载**：扫描并加载所有创意批次（`Vec<IdeaBatch>`）
//! 3. **逐批处理**：评估 → 写报告 → 检查 → 写摘要 → 投递出站消息
//! 4. **轮次判断**：根据结论和最大轮数决定是否需要下一轮
//! 5. **会话结束**：清空会话存储，输出全局统计
//!
//! 批次之间串行（轮次状态是会话级的），批次内各创意的检查并发进行。

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::{
    CheckRequest, Dispatch, EvaluateRequest, EvaluationPayload, IdeaBatch, Outbound,
    RoundVerdict,
};
use crate::orchestrator::router::CommandRouter;
use crate::utils::logging::{
    append_to_log, init_log_file, log_batch_complete, log_batch_start, log_batches_loaded,
    log_startup, print_final_stats, truncate_text,
};
use crate::workflow::ReportGenerator;

/// 本程序作为请求方时使用的 ID
const REQUESTER_ID: &str = "batch_runner";

/// 应用主结构
pub struct App {
    config: Config,
    router: CommandRouter,
    reports: ReportGenerator,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let router = CommandRouter::new(&config);

        Ok(Self {
            config,
            router,
            reports: ReportGenerator::new(),
        })
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let batches = self.load_batches().await?;

        if batches.is_empty() {
            warn!("⚠️ 没有找到待处理的创意批次，程序结束");
            return Ok(());
        }

        let total_batches = batches.len();
        log_batches_loaded(total_batches);

        let mut stats = ProcessingStats {
            total: total_batches,
            ..Default::default()
        };

        for (idx, batch) in batches.iter().enumerate() {
            let batch_num = idx + 1;
            log_batch_start(
                batch_num,
                total_batches,
                batch.file_path.as_deref().unwrap_or("-"),
                batch.ideas.len(),
            );

            match self.process_batch(batch).await {
                Ok(result) => {
                    stats.success += 1;
                    stats.ideas += batch.ideas.len();
                    stats.passed += result.passed;
                    log_batch_complete(batch_num, result.passed, batch.ideas.len());
                }
                Err(e) => {
                    error!("[批次 {}] ❌ 处理过程中发生错误: {:#}", batch_num, e);
                    stats.failed += 1;
                }
            }
        }

        // 会话结束，清空存储
        self.router.clear();

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            stats.passed,
            stats.ideas,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 加载创意批次
    async fn load_batches(&self) -> Result<Vec<IdeaBatch>> {
        info!("\n📁 正在扫描待处理的创意批次...");
        crate::models::load_all_idea_batches(&self.config.idea_folder).await
    }

    /// 处理单个批次：评估 + 一轮检查
    pub async fn process_batch(&self, batch: &IdeaBatch) -> Result<BatchResult> {
        let evaluation = self.router.evaluate(
            EvaluateRequest {
                ideas: batch.ideas.clone(),
                top_k: batch.top_k,
            },
            REQUESTER_ID,
        );

        if evaluation.response.success {
            let payload: EvaluationPayload =
                serde_json::from_value(evaluation.response.data.clone())
                    .context("无法解析评估结果")?;
            let report = self.reports.generate(&payload.scored_ideas);
            append_to_log(&self.config.output_log_file, &report)?;

            if self.config.verbose_logging {
                for (rank, item) in payload.scored_ideas.iter().enumerate() {
                    info!(
                        "  {}. {} | 总分 {:.2}",
                        rank + 1,
                        truncate_text(&item.evaluation.idea_title, 40),
                        item.evaluation.total_score
                    );
                }
            }
        } else {
            warn!("⚠️ 评估失败: {}", evaluation.response.message);
        }
        self.deliver(&evaluation)?;

        let round = batch.round.unwrap_or(1);
        let check = self
            .router
            .check(CheckRequest {
                ideas: batch.ideas.clone(),
                round,
            })
            .await;
        let verdict: RoundVerdict =
            serde_json::from_value(check.response.data.clone()).context("无法解析检查结论")?;
        self.deliver(&check)?;

        let max_rounds = self.router.rounds().max_rounds();
        let needs_another_round = verdict.needs_another_round(max_rounds);
        if needs_another_round {
            info!(
                "🔁 第 {} 轮未全部通过，需进入第 {} 轮（配置上限 {} 轮，指令宣称上限 {} 轮）",
                verdict.round,
                verdict.round + 1,
                max_rounds,
                self.config.advertised_max_rounds
            );
        } else if verdict.all_passed {
            info!("🎉 第 {} 轮全部通过", verdict.round);
        } else {
            warn!("⚠️ 已达到最大轮数 {}，仍有创意未通过", max_rounds);
        }

        Ok(BatchResult {
            passed: verdict.ideas.iter().filter(|c| c.passed()).count(),
            needs_another_round,
        })
    }

    /// 投递出站消息：频道摘要写入报告文件，定向事件写日志
    fn deliver(&self, dispatch: &Dispatch) -> Result<()> {
        for outbound in &dispatch.outbound {
            match outbound {
                Outbound::ChannelPost { channel, text } => {
                    info!("💬 发布到频道 #{}", channel);
                    append_to_log(&self.config.output_log_file, text)?;
                }
                Outbound::Event {
                    event_name,
                    destination_id,
                    ..
                } => {
                    info!("📨 事件 {} → {}", event_name, destination_id);
                }
            }
        }
        Ok(())
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
    ideas: usize,
    passed: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 检查全部通过的创意数
    pub passed: usize,
    /// 是否需要发起下一轮检查
    pub needs_another_round: bool,
}
