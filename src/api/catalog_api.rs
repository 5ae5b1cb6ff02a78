// ==========================================
// 披萨销售数据看板 - 商品目录 API
// ==========================================
// 职责: 披萨与品类查询
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::domain::{Pizza, PizzaType};
use crate::repository::{PizzaRepository, PizzaTypeRepository};

/// 商品目录API
///
/// 职责：
/// 1. 披萨列表查询（品类/尺寸精确过滤）
/// 2. 品类全量查询
pub struct CatalogApi {
    pizza_repo: Arc<PizzaRepository>,
    pizza_type_repo: Arc<PizzaTypeRepository>,
}

impl CatalogApi {
    pub fn new(pizza_repo: Arc<PizzaRepository>, pizza_type_repo: Arc<PizzaTypeRepository>) -> Self {
        Self {
            pizza_repo,
            pizza_type_repo,
        }
    }

    /// 查询披萨列表
    ///
    /// # 参数
    /// - pizza_type_id: 可选品类过滤（精确匹配）
    /// - size: 可选尺寸过滤（精确匹配）
    ///
    /// 空字符串/纯空白过滤值视为「该维度不约束」
    pub fn list_pizzas(
        &self,
        pizza_type_id: Option<&str>,
        size: Option<&str>,
    ) -> ApiResult<Vec<Pizza>> {
        let type_filter = normalize(pizza_type_id);
        let size_filter = normalize(size);

        let pizzas = self.pizza_repo.list(type_filter, size_filter)?;
        Ok(pizzas)
    }

    /// 查询全部品类
    pub fn list_pizza_types(&self) -> ApiResult<Vec<PizzaType>> {
        let types = self.pizza_type_repo.list_all()?;
        Ok(types)
    }
}

/// 空/纯空白过滤值归一化为 None
fn normalize(value: Option<&str>) -> Option<&str> {
    match value {
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(Some("   ")), None);
        assert_eq!(normalize(Some(" S ")), Some("S"));
    }
}
