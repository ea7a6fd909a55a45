//! API request handlers

use actix_web::{
    error::{ErrorInternalServerError, InternalError},
    web, HttpRequest, HttpResponse, Result as ActixResult,
};
use tracing::{error, info, warn};

use crate::api::{
    response::{error_response, ApiResponse},
    server::ApiServerState,
    types::{ClearHistoryResponse, HistoryQuery, HistoryResponse, WelcomeResponse},
};
use crate::types::PredictionInput;
use crate::Error;

const ENDPOINTS: &[&str] = &[
    "GET /",
    "GET /health",
    "POST /predict",
    "GET /model-info",
    "GET /statistics",
    "GET /history?limit=N",
    "DELETE /history",
    "POST /reload-model",
];

/// 配置所有API路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict))
        .route("/model-info", web::get().to(model_info))
        .route("/statistics", web::get().to(statistics))
        .service(
            web::resource("/history")
                .route(web::get().to(get_history))
                .route(web::delete().to(clear_history)),
        )
        .route("/reload-model", web::post().to(reload_model));
}

/// 请求体解析失败时返回 422 和解析错误
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("rejected request body: {}", err);
        let response = HttpResponse::UnprocessableEntity()
            .json(ApiResponse::<()>::error(format!("Invalid request body: {}", err), 422));
        InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        warn!("rejected query string: {}", err);
        let response = HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error(format!("Invalid query: {}", err), 400));
        InternalError::from_response(err, response).into()
    })
}

fn server_state(req: &HttpRequest) -> ActixResult<&web::Data<ApiServerState>> {
    req.app_data::<web::Data<ApiServerState>>().ok_or_else(|| {
        error!("无法获取服务器数据");
        ErrorInternalServerError("server state not configured")
    })
}

/// 根路径处理器
async fn root(req: HttpRequest) -> ActixResult<HttpResponse> {
    let state = server_state(&req)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(WelcomeResponse {
        message: "Welcome to the Salary Predictor API".to_string(),
        status: "active".to_string(),
        model_loaded: state.is_model_ready(),
        version: crate::VERSION.to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })))
}

/// 健康检查处理器
async fn health_check(req: HttpRequest) -> ActixResult<HttpResponse> {
    let state = server_state(&req)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(state.service.health())))
}

/// 预测处理器
async fn predict(req: HttpRequest, body: web::Json<PredictionInput>) -> ActixResult<HttpResponse> {
    let state = server_state(&req)?;
    let input = body.into_inner();
    info!("预测请求: years_of_experience={}", input.years_of_experience);

    match state.service.predict(input) {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(outcome))),
        Err(err) if err.is_client_error() => {
            warn!("预测请求无效: {}", err);
            Ok(error_response(&err))
        }
        Err(err) => {
            error!("预测失败: {}", err);
            Ok(error_response(&err))
        }
    }
}

/// 模型信息处理器
async fn model_info(req: HttpRequest) -> ActixResult<HttpResponse> {
    let state = server_state(&req)?;
    match state.service.model_info() {
        Ok(info) => Ok(HttpResponse::Ok().json(ApiResponse::success(info))),
        Err(err) => {
            warn!("获取模型信息失败: {}", err);
            Ok(error_response(&err))
        }
    }
}

/// 统计信息处理器
async fn statistics(req: HttpRequest) -> ActixResult<HttpResponse> {
    let state = server_state(&req)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(state.service.statistics())))
}

/// 历史记录处理器
async fn get_history(req: HttpRequest, query: web::Query<HistoryQuery>) -> ActixResult<HttpResponse> {
    let state = server_state(&req)?;
    let records = state.service.recent_history(query.limit);
    let count = records.len();
    Ok(HttpResponse::Ok().json(ApiResponse::success(HistoryResponse { records, count })))
}

/// 清空历史记录处理器
async fn clear_history(req: HttpRequest) -> ActixResult<HttpResponse> {
    let state = server_state(&req)?;
    let cleared = state.service.clear_history();
    Ok(HttpResponse::Ok().json(ApiResponse::success(ClearHistoryResponse {
        message: "Prediction history cleared".to_string(),
        cleared,
    })))
}

/// 重新加载模型处理器
async fn reload_model(req: HttpRequest) -> ActixResult<HttpResponse> {
    let service = server_state(&req)?.service.clone();
    info!("重新加载模型请求");

    let result = match web::block(move || service.reload()).await {
        Ok(result) => result,
        Err(err) => Err(Error::internal(format!("reload task failed: {}", err))),
    };

    match result {
        Ok(status) => Ok(HttpResponse::Ok().json(ApiResponse::success(status))),
        Err(err) => {
            error!("重新加载模型失败: {}", err);
            Ok(error_response(&err))
        }
    }
}
