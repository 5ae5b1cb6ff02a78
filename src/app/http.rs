// ==========================================
// 披萨销售数据看板 - HTTP 路由与处理器
// ==========================================
// 职责: 请求参数提取、API 调用、响应序列化
// 约定: CORS 对任意来源/方法/头开放,所有端点无鉴权
// ==========================================

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::api::{ApiError, PIZZAS_CSV_FILENAME};
use crate::app::AppState;
use crate::domain::{Order, OrderDetail, Pizza, PizzaType};

// ==========================================
// 错误映射
// ==========================================

/// API 错误的 HTTP 包装（参数错误 → 400，其余 → 500）
pub struct HttpError(ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.0.to_string()).into_response()
    }
}

// ==========================================
// 查询参数
// ==========================================

#[derive(Debug, Deserialize)]
pub struct PizzaQuery {
    /// 品类过滤（源参数名为 type）
    #[serde(rename = "type")]
    pizza_type: Option<String>,
    /// 尺寸过滤
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    /// 起始日期（YYYY-MM-DD）
    from: Option<String>,
    /// 截止日期（YYYY-MM-DD）
    to: Option<String>,
}

// ==========================================
// 处理器
// ==========================================

async fn list_pizzas(
    State(state): State<AppState>,
    Query(query): Query<PizzaQuery>,
) -> Result<Json<Vec<Pizza>>, HttpError> {
    let pizzas = state
        .catalog_api
        .list_pizzas(query.pizza_type.as_deref(), query.size.as_deref())?;
    Ok(Json(pizzas))
}

async fn list_pizza_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<PizzaType>>, HttpError> {
    let types = state.catalog_api.list_pizza_types()?;
    Ok(Json(types))
}

async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<Order>>, HttpError> {
    let orders = state
        .order_api
        .list_orders(query.from.as_deref(), query.to.as_deref())?;
    Ok(Json(orders))
}

async fn list_order_details(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderDetail>>, HttpError> {
    let details = state.order_api.list_order_details()?;
    Ok(Json(details))
}

async fn export_pizzas_csv(State(state): State<AppState>) -> Result<Response, HttpError> {
    let bytes = state.export_api.export_pizzas_csv()?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", PIZZAS_CSV_FILENAME),
        ),
    ];

    Ok((headers, bytes).into_response())
}

async fn export_orders_json(State(state): State<AppState>) -> Result<Response, HttpError> {
    let bytes = state.export_api.export_orders_json()?;

    let headers = [(header::CONTENT_TYPE, "application/json".to_string())];

    Ok((headers, bytes).into_response())
}

// ==========================================
// 路由装配与服务入口
// ==========================================

/// 构建完整路由（含 CORS 层）
///
/// 单独拆出便于集成测试直接驱动 Router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/pizzas", get(list_pizzas))
        .route("/api/pizza-types", get(list_pizza_types))
        .route("/api/orders", get(list_orders))
        .route("/api/order-details", get(list_order_details))
        .route("/api/export/pizzas/csv", get(export_pizzas_csv))
        .route("/api/export/orders/json", get(export_orders_json))
        .layer(cors)
        .with_state(state)
}

/// 绑定监听地址并服务至收到退出信号
pub async fn serve(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    info!("服务监听于 {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已退出");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("收到 Ctrl+C，准备退出");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("收到 terminate 信号，准备退出");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
