// ==========================================
// 披萨销售数据看板 - 字段映射器
// ==========================================
// 职责: 源列名 → 实体字段映射 + 类型转换
// 约定: 行号从 1 起（不含表头）,任何转换失败立即返回错误
// ==========================================

use crate::domain::{Order, OrderDetail, Pizza, PizzaType, RawOrderRecord};
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDateTime;
use std::collections::HashMap;

pub struct FieldMapper;

impl FieldMapper {
    // ==========================================
    // 行映射入口
    // ==========================================

    /// pizza_types.csv 行 → PizzaType
    pub fn map_pizza_type(
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<PizzaType> {
        Ok(PizzaType {
            pizza_type_id: Self::required(row, "pizza_type_id", row_number)?,
            name: Self::required(row, "name", row_number)?,
            category: Self::required(row, "category", row_number)?,
            ingredients: Self::required(row, "ingredients", row_number)?,
        })
    }

    /// pizzas.csv 行 → Pizza
    pub fn map_pizza(row: &HashMap<String, String>, row_number: usize) -> ImportResult<Pizza> {
        Ok(Pizza {
            pizza_id: Self::required(row, "pizza_id", row_number)?,
            pizza_type_id: Self::required(row, "pizza_type_id", row_number)?,
            size: Self::required(row, "size", row_number)?,
            price: Self::parse_f64(row, "price", row_number)?,
        })
    }

    /// orders.csv 行 → RawOrderRecord（date/time 尚未合并）
    pub fn map_raw_order(
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawOrderRecord> {
        Ok(RawOrderRecord {
            order_id: Self::parse_i64(row, "order_id", row_number)?,
            date: Self::required(row, "date", row_number)?,
            time: Self::required(row, "time", row_number)?,
        })
    }

    /// order_details.csv 行 → OrderDetail
    pub fn map_order_detail(
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<OrderDetail> {
        Ok(OrderDetail {
            order_details_id: Self::parse_i64(row, "order_details_id", row_number)?,
            order_id: Self::parse_i64(row, "order_id", row_number)?,
            pizza_id: Self::required(row, "pizza_id", row_number)?,
            quantity: Self::parse_i64(row, "quantity", row_number)?,
        })
    }

    /// RawOrderRecord → Order（拼接 date + time 为单一时间戳）
    pub fn combine_order(raw: &RawOrderRecord, row_number: usize) -> ImportResult<Order> {
        let combined = format!("{} {}", raw.date, raw.time);
        let date = NaiveDateTime::parse_from_str(&combined, "%Y-%m-%d %H:%M:%S").map_err(|_| {
            ImportError::TimestampFormatError {
                row: row_number,
                value: combined,
            }
        })?;

        Ok(Order {
            order_id: raw.order_id,
            date,
        })
    }

    // ==========================================
    // 基础取值与类型转换
    // ==========================================

    /// 必填字符串字段（缺列或空值均视为缺失）
    fn required(
        row: &HashMap<String, String>,
        column: &str,
        row_number: usize,
    ) -> ImportResult<String> {
        match row.get(column) {
            Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
            _ => Err(ImportError::MissingColumn {
                row: row_number,
                column: column.to_string(),
            }),
        }
    }

    /// 解析浮点数
    fn parse_f64(
        row: &HashMap<String, String>,
        field: &str,
        row_number: usize,
    ) -> ImportResult<f64> {
        let value = Self::required(row, field, row_number)?;
        value
            .parse::<f64>()
            .map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: field.to_string(),
                message: format!("无法解析为浮点数: {}", value),
            })
    }

    /// 解析整数
    fn parse_i64(
        row: &HashMap<String, String>,
        field: &str,
        row_number: usize,
    ) -> ImportResult<i64> {
        let value = Self::required(row, field, row_number)?;
        value
            .parse::<i64>()
            .map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: field.to_string(),
                message: format!("无法解析为整数: {}", value),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_pizza() {
        let pizza = FieldMapper::map_pizza(
            &row(&[
                ("pizza_id", "bbq_ckn_s"),
                ("pizza_type_id", "bbq_ckn"),
                ("size", "S"),
                ("price", "12.75"),
            ]),
            1,
        )
        .expect("Failed to map pizza");

        assert_eq!(pizza.pizza_id, "bbq_ckn_s");
        assert_eq!(pizza.price, 12.75);
    }

    #[test]
    fn test_map_pizza_bad_price() {
        let result = FieldMapper::map_pizza(
            &row(&[
                ("pizza_id", "bbq_ckn_s"),
                ("pizza_type_id", "bbq_ckn"),
                ("size", "S"),
                ("price", "twelve"),
            ]),
            3,
        );

        match result {
            Err(ImportError::TypeConversionError { row, field, .. }) => {
                assert_eq!(row, 3);
                assert_eq!(field, "price");
            }
            other => panic!("Expected TypeConversionError, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_map_pizza_missing_column() {
        let result = FieldMapper::map_pizza(
            &row(&[("pizza_id", "bbq_ckn_s"), ("price", "12.75")]),
            2,
        );
        assert!(matches!(
            result,
            Err(ImportError::MissingColumn { row: 2, .. })
        ));
    }

    #[test]
    fn test_combine_order() {
        let raw = RawOrderRecord {
            order_id: 1,
            date: "2015-01-01".to_string(),
            time: "11:38:36".to_string(),
        };

        let order = FieldMapper::combine_order(&raw, 1).expect("Failed to combine");
        assert_eq!(order.order_id, 1);
        assert_eq!(order.date.to_string(), "2015-01-01 11:38:36");
    }

    #[test]
    fn test_combine_order_bad_timestamp() {
        let raw = RawOrderRecord {
            order_id: 7,
            date: "2015-13-01".to_string(),
            time: "11:38:36".to_string(),
        };

        let result = FieldMapper::combine_order(&raw, 5);
        assert!(matches!(
            result,
            Err(ImportError::TimestampFormatError { row: 5, .. })
        ));
    }
}
