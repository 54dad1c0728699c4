use serde::{Deserialize, Serialize};

use crate::models::idea::Idea;

/// 单个创意的完善检查结果
///
/// 序列化时与原始创意字段平铺在同一层，便于接收方直接当作"带检查信息的创意"使用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckedIdea {
    #[serde(flatten)]
    pub idea: Idea,
    pub method_feedback: String,
    pub experiment_feedback: String,
    pub needs_method_improvement: bool,
    pub needs_experiment_improvement: bool,
    pub check_round: i64,
}

impl CheckedIdea {
    /// 两项检查都通过
    pub fn passed(&self) -> bool {
        !self.needs_method_improvement && !self.needs_experiment_improvement
    }
}
