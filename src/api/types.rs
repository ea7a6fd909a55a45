//! API类型定义

use serde::{Deserialize, Serialize};

use crate::history::PredictionRecord;

/// 根路径响应
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub status: String,
    pub model_loaded: bool,
    pub version: String,
    /// 可用端点列表
    pub endpoints: Vec<String>,
}

/// 历史记录查询参数
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// 返回的记录数量
    pub limit: Option<usize>,
}

/// 历史记录响应
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub records: Vec<PredictionRecord>,
    pub count: usize,
}

/// 清空历史记录响应
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub message: String,
    pub cleared: usize,
}
