// ==========================================
// 披萨销售数据看板 - 应用层
// ==========================================
// 职责: HTTP 集成,连接前端与后端
// ==========================================

pub mod http;
pub mod state;

// 重导出
pub use http::{build_router, serve};
pub use state::AppState;
