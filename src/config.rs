/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 评估请求未指定 top_k 时返回的数量
    pub default_top_k: usize,
    /// 完善流程的最大轮数（Agent 配置常量）
    pub max_rounds: u32,
    /// 指令文本中宣称的最大轮数，与 `max_rounds` 由部署方自行协调
    pub advertised_max_rounds: u32,
    /// 每个创意检查的模拟延迟（毫秒），0 表示关闭
    pub simulated_latency_ms: u64,
    /// 同时检查的创意数量
    pub max_concurrent_checks: usize,
    /// 协调者（接收检查结果的参与方）ID
    pub coordinator_id: String,
    /// 检查摘要发布的讨论频道
    pub discussion_channel: String,
    /// 创意批次 TOML 文件目录
    pub idea_folder: String,
    /// 输出报告文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            max_rounds: 2,
            advertised_max_rounds: 3,
            simulated_latency_ms: 100,
            max_concurrent_checks: 16,
            coordinator_id: "leader".to_string(),
            discussion_channel: "discussion".to_string(),
            idea_folder: "ideas".to_string(),
            output_log_file: "evaluation_report.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            default_top_k: std::env::var("DEFAULT_TOP_K").ok().and_then(|v| v.parse().ok()).unwrap_or(default.default_top_k),
            max_rounds: std::env::var("MAX_ROUNDS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_rounds),
            advertised_max_rounds: std::env::var("ADVERTISED_MAX_ROUNDS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.advertised_max_rounds),
            simulated_latency_ms: std::env::var("SIMULATED_LATENCY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.simulated_latency_ms),
            max_concurrent_checks: std::env::var("MAX_CONCURRENT_CHECKS").ok().and_then(|v| v.parse().ok()).filter(|n: &usize| *n > 0).unwrap_or(default.max_concurrent_checks),
            coordinator_id: std::env::var("COORDINATOR_ID").unwrap_or(default.coordinator_id),
            discussion_channel: std::env::var("DISCUSSION_CHANNEL").unwrap_or(default.discussion_channel),
            idea_folder: std::env::var("IDEA_FOLDER").unwrap_or(default.idea_folder),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 测试用配置：关闭模拟延迟
    pub fn without_latency() -> Self {
        Self {
            simulated_latency_ms: 0,
            ..Self::default()
        }
    }
}
