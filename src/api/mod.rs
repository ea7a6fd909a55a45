//! HTTP API module
//!
//! This module provides the REST endpoints of the prediction service.

pub mod handlers;

// API响应类型
pub mod response;

// API服务器状态
pub mod server;

// 请求与响应类型
pub mod types;


pub use handlers::configure_routes;
pub use response::ApiResponse;
pub use server::ApiServerState;
