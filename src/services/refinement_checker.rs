//! 完善检查服务 - 业务能力层
//!
//! 只负责检查单个创意的方法论与实验设置是否充分。
//!
//! 所有判断都是确定性的字符串规则：
//! 1. 长度门槛：少于 50 个字符直接判定过于简略
//! 2. 通用探针：每个创意都要满足
//! 3. 领域探针：由标题关键词决定是否启用
//!
//! 关键词匹配区分大小写，直接作用于原始文本。

use tracing::debug;

use crate::infrastructure::SimulatedLatency;
use crate::models::{CheckedIdea, Idea};

/// 文本少于该字符数即视为过于简略
pub const MIN_SECTION_CHARS: usize = 50;

const ISSUE_SEPARATOR: &str = "；";

const METHOD_TOO_BRIEF: &str = "方法论描述过于简略，需要更详细的研究方法说明";
const METHOD_COMPLETE: &str = "方法论描述较为完整";
const EXPERIMENT_TOO_BRIEF: &str = "实验设置描述过于简略，需要更详细的实验配置说明";
const EXPERIMENT_COMPLETE: &str = "实验设置描述较为完整";

/// 单条检查探针
///
/// 标题命中 `title_any` 之一（为空则总是启用）且包含 `title_also`（若有）时启用；
/// 启用后正文需包含 `required_any` 之一，否则记录 `issue`。
#[derive(Debug, Clone, Copy)]
struct Probe {
    title_any: &'static [&'static str],
    title_also: Option<&'static str>,
    required_any: &'static [&'static str],
    issue: &'static str,
}

impl Probe {
    const fn always(required_any: &'static [&'static str], issue: &'static str) -> Self {
        Self {
            title_any: &[],
            title_also: None,
            required_any,
            issue,
        }
    }

    const fn when(
        title_any: &'static [&'static str],
        required_any: &'static [&'static str],
        issue: &'static str,
    ) -> Self {
        Self {
            title_any,
            title_also: None,
            required_any,
            issue,
        }
    }

    const fn when_also(
        title_any: &'static [&'static str],
        title_also: &'static str,
        required_any: &'static [&'static str],
        issue: &'static str,
    ) -> Self {
        Self {
            title_any,
            title_also: Some(title_also),
            required_any,
            issue,
        }
    }

    fn applies_to(&self, title: &str) -> bool {
        let topic = self.title_any.is_empty() || self.title_any.iter().any(|k| title.contains(k));
        topic && self.title_also.map_or(true, |k| title.contains(k))
    }

    fn satisfied_by(&self, text: &str) -> bool {
        self.required_any.iter().any(|k| text.contains(k))
    }
}

const DATA_TOPIC: &[&str] = &["数据", "数据集"];
const MODEL_TOPIC: &[&str] = &["模型", "网络", "算法"];
const FEDERATED_TOPIC: &[&str] = &["联邦"];
const MULTIMODAL_TOPIC: &[&str] = &["多模态", "跨"];
const SIMULATION_TOPIC: &[&str] = &["物理", "合成"];
const RECONSTRUCTION_TOPIC: &[&str] = &["3D", "重建"];

const METHOD_PROBES: &[Probe] = &[
    Probe::always(&["步骤", "流程", "过程"], "缺乏具体的实施步骤"),
    Probe::when(DATA_TOPIC, &["预处理", "清洗"], "数据预处理流程不明确"),
    Probe::when_also(DATA_TOPIC, "标注", &["标注"], "数据标注方法未说明"),
    Probe::when(MODEL_TOPIC, &["架构", "结构"], "模型架构描述不清晰"),
    Probe::when(MODEL_TOPIC, &["参数", "超参数"], "模型参数设置未说明"),
    Probe::when_also(MODEL_TOPIC, "训练", &["训练"], "训练策略不明确"),
    Probe::when(
        FEDERATED_TOPIC,
        &["通信", "聚合"],
        "联邦学习的通信和聚合机制未说明",
    ),
    Probe::when_also(
        FEDERATED_TOPIC,
        "隐私",
        &["加密", "差分"],
        "隐私保护机制未详细说明",
    ),
    Probe::when(
        MULTIMODAL_TOPIC,
        &["融合", "对齐"],
        "多模态数据融合或对齐方法未说明",
    ),
    Probe::when(SIMULATION_TOPIC, &["仿真", "模拟"], "物理仿真或模拟方法未说明"),
    Probe::when(RECONSTRUCTION_TOPIC, &["渲染", "投影"], "3D重建或渲染方法未说明"),
];

const EXPERIMENT_PROBES: &[Probe] = &[
    Probe::always(&["数据集", "数据"], "缺乏数据集信息"),
    Probe::always(&["设备", "硬件"], "缺乏硬件设备配置"),
    Probe::always(&["评估", "指标"], "缺乏评估指标"),
    Probe::always(&["对比", "基线"], "缺乏对比实验或基线方法"),
    Probe::always(&["消融", "ablation"], "建议增加消融实验"),
    Probe::always(&["参数", "超参数"], "参数设置未详细说明"),
    Probe::when(&["训练"], &["训练"], "训练配置不明确"),
    Probe::when(FEDERATED_TOPIC, &["节点"], "联邦节点配置未说明"),
    Probe::when(&["多模态"], &["采集"], "多模态数据采集配置未说明"),
];

/// 单项检查结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionVerdict {
    pub feedback: String,
    pub needs_improvement: bool,
}

/// 对一段文本运行长度门槛和探针清单
fn check_section(
    text: &str,
    title: &str,
    probes: &[Probe],
    too_brief: &str,
    complete: &str,
) -> SectionVerdict {
    if text.chars().count() < MIN_SECTION_CHARS {
        return SectionVerdict {
            feedback: too_brief.to_string(),
            needs_improvement: true,
        };
    }

    let issues: Vec<&str> = probes
        .iter()
        .filter(|p| p.applies_to(title) && !p.satisfied_by(text))
        .map(|p| p.issue)
        .collect();

    if issues.is_empty() {
        SectionVerdict {
            feedback: complete.to_string(),
            needs_improvement: false,
        }
    } else {
        SectionVerdict {
            feedback: issues.join(ISSUE_SEPARATOR),
            needs_improvement: true,
        }
    }
}

/// 检查方法论
pub fn check_methodology(idea: &Idea) -> SectionVerdict {
    check_section(
        &idea.methodology,
        idea.title_text(),
        METHOD_PROBES,
        METHOD_TOO_BRIEF,
        METHOD_COMPLETE,
    )
}

/// 检查实验设置
pub fn check_experimental_setup(idea: &Idea) -> SectionVerdict {
    check_section(
        &idea.experimental_setup,
        idea.title_text(),
        EXPERIMENT_PROBES,
        EXPERIMENT_TOO_BRIEF,
        EXPERIMENT_COMPLETE,
    )
}

/// 完善检查器
///
/// 职责：
/// - 对单个创意给出方法论 / 实验设置的反馈和改进标记
/// - 不出现 Vec<Idea>
/// - 不访问任何外部资源，永不失败
#[derive(Debug, Clone, Copy, Default)]
pub struct RefinementChecker {
    latency: SimulatedLatency,
}

impl RefinementChecker {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self { latency }
    }

    /// 同步检查，不经过延迟钩子
    pub fn check(&self, idea: &Idea, round: i64) -> CheckedIdea {
        let method = check_methodology(idea);
        let experiment = check_experimental_setup(idea);

        debug!(
            "检查创意 {}（第{}轮）: 方法{} 实验{}",
            idea.idea_id(),
            round,
            if method.needs_improvement { "需改进" } else { "通过" },
            if experiment.needs_improvement { "需改进" } else { "通过" },
        );

        CheckedIdea {
            idea: idea.clone(),
            method_feedback: method.feedback,
            experiment_feedback: experiment.feedback,
            needs_method_improvement: method.needs_improvement,
            needs_experiment_improvement: experiment.needs_improvement,
            check_round: round,
        }
    }

    /// 经过模拟延迟后检查
    pub async fn check_async(&self, idea: &Idea, round: i64) -> CheckedIdea {
        self.latency.pause().await;
        self.check(idea, round)
    }
}
