// ==========================================
// 披萨销售数据看板 - 订单 API
// ==========================================
// 职责: 订单与订单行项目查询,日期区间参数校验
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Order, OrderDetail};
use crate::repository::{OrderDetailRepository, OrderRepository};

/// 订单API
///
/// 职责：
/// 1. 订单列表查询（下单时间闭区间过滤）
/// 2. 订单行项目全量查询
/// 3. 日期参数校验（格式错误返回 InvalidInput）
pub struct OrderApi {
    order_repo: Arc<OrderRepository>,
    order_detail_repo: Arc<OrderDetailRepository>,
}

impl OrderApi {
    pub fn new(
        order_repo: Arc<OrderRepository>,
        order_detail_repo: Arc<OrderDetailRepository>,
    ) -> Self {
        Self {
            order_repo,
            order_detail_repo,
        }
    }

    /// 查询订单列表
    ///
    /// # 参数
    /// - from: 可选起始日期（YYYY-MM-DD），按当日 00:00:00 取下界
    /// - to: 可选截止日期（YYYY-MM-DD），按当日 23:59:59 取上界
    ///
    /// 区间两端均为闭区间；空字符串视为未传；格式错误返回 InvalidInput
    pub fn list_orders(&self, from: Option<&str>, to: Option<&str>) -> ApiResult<Vec<Order>> {
        let from_bound = parse_date_param("from", from)?
            .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default());
        let to_bound = parse_date_param("to", to)?
            .map(|d| d.and_hms_opt(23, 59, 59).unwrap_or_default());

        let orders = self.order_repo.list(from_bound, to_bound)?;
        Ok(orders)
    }

    /// 查询全部订单行项目
    pub fn list_order_details(&self) -> ApiResult<Vec<OrderDetail>> {
        let details = self.order_detail_repo.list_all()?;
        Ok(details)
    }
}

/// 解析日期过滤参数（空/纯空白视为未传）
fn parse_date_param(name: &str, value: Option<&str>) -> ApiResult<Option<NaiveDate>> {
    match value {
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    ApiError::InvalidInput(format!(
                        "参数 {} 不是合法日期（期望 YYYY-MM-DD）: {}",
                        name, trimmed
                    ))
                })
        }
        None => Ok(None),
    }
}
