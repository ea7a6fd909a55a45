//! API服务器状态管理
//! 提供API服务器的状态结构和初始化逻辑

use std::sync::Arc;

use crate::config::Config;
use crate::service::PredictionService;

/// API服务器状态
#[derive(Clone)]
pub struct ApiServerState {
    /// 预测服务
    pub service: Arc<PredictionService>,
}

impl ApiServerState {
    /// 创建新的API服务器状态
    pub fn new(service: Arc<PredictionService>) -> Self {
        Self { service }
    }

    /// 根据配置创建状态，启动时加载模型
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(PredictionService::from_config(config)))
    }

    /// 检查模型是否已加载
    pub fn is_model_ready(&self) -> bool {
        self.service.is_model_loaded()
    }
}
