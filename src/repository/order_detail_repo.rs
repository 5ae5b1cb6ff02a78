// ==========================================
// 披萨销售数据看板 - 订单行项目仓储
// ==========================================
// 职责: 管理 order_detail 表
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::OrderDetail;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Transaction};
use std::sync::{Arc, Mutex};

pub struct OrderDetailRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderDetailRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 确保表存在（如果不存在则创建）
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS order_detail (
              order_details_id INTEGER PRIMARY KEY,
              order_id         INTEGER NOT NULL,
              pizza_id         TEXT NOT NULL,
              quantity         INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_order_detail_order ON order_detail(order_id);
            CREATE INDEX IF NOT EXISTS idx_order_detail_pizza ON order_detail(pizza_id);
            "#,
        )?;
        Ok(())
    }

    /// 在事务中批量插入行项目（仅供导入层调用）
    pub fn insert_batch_tx(tx: &Transaction, rows: &[OrderDetail]) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO order_detail (order_details_id, order_id, pizza_id, quantity)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )?;

        let mut count = 0;
        for row in rows {
            stmt.execute(params![
                row.order_details_id,
                row.order_id,
                row.pizza_id,
                row.quantity,
            ])?;
            count += 1;
        }

        Ok(count)
    }

    /// 行项目总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM order_detail", [], |row| row.get(0))?;
        Ok(n)
    }

    /// 列出全部行项目（存储迭代顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<OrderDetail>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT order_details_id, order_id, pizza_id, quantity FROM order_detail",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(OrderDetail {
                    order_details_id: row.get(0)?,
                    order_id: row.get(1)?,
                    pizza_id: row.get(2)?,
                    quantity: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_details() -> Vec<OrderDetail> {
        vec![
            OrderDetail {
                order_details_id: 1,
                order_id: 1,
                pizza_id: "bbq_ckn_s".to_string(),
                quantity: 1,
            },
            OrderDetail {
                order_details_id: 2,
                order_id: 1,
                pizza_id: "five_cheese_l".to_string(),
                quantity: 2,
            },
        ]
    }

    #[test]
    fn test_insert_and_list_all() {
        let repo = OrderDetailRepository::new(":memory:").expect("Failed to create repository");

        {
            let mut conn = repo.conn.lock().expect("Failed to lock connection");
            let tx = conn.transaction().expect("Failed to begin transaction");
            let inserted = OrderDetailRepository::insert_batch_tx(&tx, &sample_details())
                .expect("Failed to insert");
            assert_eq!(inserted, 2);
            tx.commit().expect("Failed to commit");
        }

        let details = repo.list_all().expect("Failed to list");
        assert_eq!(details.len(), 2);
        assert_eq!(details[1].quantity, 2);
        assert_eq!(repo.count().expect("Failed to count"), 2);
    }
}
