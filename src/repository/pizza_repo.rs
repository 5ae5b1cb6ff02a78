// ==========================================
// 披萨销售数据看板 - 披萨仓储
// ==========================================
// 职责: 管理 pizza 表,支持品类/尺寸精确过滤
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::Pizza;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row, Transaction};
use std::sync::{Arc, Mutex};

pub struct PizzaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PizzaRepository {
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
            CREATE TABLE IF NOT EXISTS pizza (
              pizza_id      TEXT PRIMARY KEY,
              pizza_type_id TEXT NOT NULL,
              size          TEXT NOT NULL,
              price         REAL NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_pizza_type ON pizza(pizza_type_id);
            CREATE INDEX IF NOT EXISTS idx_pizza_size ON pizza(size);
            "#,
        )?;
        Ok(())
    }

    fn map_row(row: &Row) -> SqliteResult<Pizza> {
        Ok(Pizza {
            pizza_id: row.get(0)?,
            pizza_type_id: row.get(1)?,
            size: row.get(2)?,
            price: row.get(3)?,
        })
    }

    /// 在事务中批量插入披萨（仅供导入层调用）
    pub fn insert_batch_tx(tx: &Transaction, rows: &[Pizza]) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO pizza (pizza_id, pizza_type_id, size, price)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )?;

        let mut count = 0;
        for row in rows {
            stmt.execute(params![row.pizza_id, row.pizza_type_id, row.size, row.price])?;
            count += 1;
        }

        Ok(count)
    }

    /// 披萨总数（导入幂等守卫依赖此计数）
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM pizza", [], |row| row.get(0))?;
        Ok(n)
    }

    /// 按品类/尺寸精确过滤（None = 该维度不约束）
    ///
    /// 结果为存储迭代顺序，调用方不应依赖更强的排序
    pub fn list(
        &self,
        pizza_type_id: Option<&str>,
        size: Option<&str>,
    ) -> RepositoryResult<Vec<Pizza>> {
        let conn = self.get_conn()?;

        const BASE: &str = "SELECT pizza_id, pizza_type_id, size, price FROM pizza";

        let rows = match (pizza_type_id, size) {
            (Some(t), Some(s)) => {
                let mut stmt = conn.prepare(&format!(
                    "{} WHERE pizza_type_id = ?1 AND size = ?2",
                    BASE
                ))?;
                let rows = stmt.query_map(params![t, s], Self::map_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                rows
            }
            (Some(t), None) => {
                let mut stmt = conn.prepare(&format!("{} WHERE pizza_type_id = ?1", BASE))?;
                let rows = stmt.query_map(params![t], Self::map_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                rows
            }
            (None, Some(s)) => {
                let mut stmt = conn.prepare(&format!("{} WHERE size = ?1", BASE))?;
                let rows = stmt.query_map(params![s], Self::map_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                rows
            }
            (None, None) => {
                let mut stmt = conn.prepare(BASE)?;
                let rows = stmt.query_map([], Self::map_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                rows
            }
        };

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pizzas() -> Vec<Pizza> {
        vec![
            Pizza {
                pizza_id: "bbq_ckn_s".to_string(),
                pizza_type_id: "bbq_ckn".to_string(),
                size: "S".to_string(),
                price: 12.75,
            },
            Pizza {
                pizza_id: "bbq_ckn_m".to_string(),
                pizza_type_id: "bbq_ckn".to_string(),
                size: "M".to_string(),
                price: 16.75,
            },
            Pizza {
                pizza_id: "five_cheese_l".to_string(),
                pizza_type_id: "five_cheese".to_string(),
                size: "L".to_string(),
                price: 18.5,
            },
        ]
    }

    fn setup_test_repo() -> PizzaRepository {
        let repo = PizzaRepository::new(":memory:").expect("Failed to create repository");
        {
            let mut conn = repo.conn.lock().expect("Failed to lock connection");
            let tx = conn.transaction().expect("Failed to begin transaction");
            PizzaRepository::insert_batch_tx(&tx, &sample_pizzas()).expect("Failed to insert");
            tx.commit().expect("Failed to commit");
        }
        repo
    }

    #[test]
    fn test_list_unfiltered() {
        let repo = setup_test_repo();
        let pizzas = repo.list(None, None).expect("Failed to list");
        assert_eq!(pizzas.len(), 3);
        assert_eq!(repo.count().expect("Failed to count"), 3);
    }

    #[test]
    fn test_list_by_type() {
        let repo = setup_test_repo();
        let pizzas = repo.list(Some("bbq_ckn"), None).expect("Failed to list");
        assert_eq!(pizzas.len(), 2);
        assert!(pizzas.iter().all(|p| p.pizza_type_id == "bbq_ckn"));
    }

    #[test]
    fn test_list_by_size() {
        let repo = setup_test_repo();

        let small = repo.list(None, Some("S")).expect("Failed to list");
        assert_eq!(small.len(), 1);
        assert_eq!(small[0].pizza_id, "bbq_ckn_s");
        assert_eq!(small[0].price, 12.75);

        // 尺寸 L 不包含 bbq_ckn_s
        let large = repo.list(None, Some("L")).expect("Failed to list");
        assert!(large.iter().all(|p| p.pizza_id != "bbq_ckn_s"));
    }

    #[test]
    fn test_list_by_type_and_size() {
        let repo = setup_test_repo();
        let pizzas = repo
            .list(Some("bbq_ckn"), Some("M"))
            .expect("Failed to list");
        assert_eq!(pizzas.len(), 1);
        assert_eq!(pizzas[0].pizza_id, "bbq_ckn_m");
    }

    #[test]
    fn test_list_no_match_returns_empty() {
        let repo = setup_test_repo();
        let pizzas = repo.list(Some("hawaiian"), None).expect("Failed to list");
        assert!(pizzas.is_empty());
    }
}
