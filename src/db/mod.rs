mod schema;

use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, TrackerError};
use crate::models::*;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| TrackerError::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let db = Self { conn };
        db.configure()?;
        log::debug!("opened database at {}", path.display());
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.configure()?;
        Ok(db)
    }

    /// Pragmas and schema applied by every constructor.
    fn configure(&self) -> Result<()> {
        // Expenses may point at categories that do not exist. The bundled
        // SQLite turns foreign keys on by default.
        self.conn.execute_batch("PRAGMA foreign_keys=OFF;")?;
        self.conn.execute_batch(schema::SCHEMA)?;
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn insert_category(&self, cat: &Category) -> Result<i64> {
        self.conn
            .execute("INSERT INTO categories (name) VALUES (?1)", params![cat.name])?;
        let id = self.conn.last_insert_rowid();
        log::debug!("inserted category {id} ({})", cat.name);
        Ok(id)
    }

    pub(crate) fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: Some(row.get(0)?),
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        let result = self.conn.query_row(
            "SELECT id, name FROM categories WHERE id = ?1",
            params![id],
            |row| {
                Ok(Category {
                    id: Some(row.get(0)?),
                    name: row.get(1)?,
                })
            },
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (title, amount, date, category_id) VALUES (?1, ?2, ?3, ?4)",
            params![
                expense.title,
                expense.amount.to_string(),
                expense.date,
                expense.category_id,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("inserted expense {id} in category {}", expense.category_id);
        Ok(id)
    }

    pub(crate) fn get_expense_by_id(&self, id: i64) -> Result<Option<Expense>> {
        let result = self.conn.query_row(
            "SELECT id, title, amount, date, category_id FROM expenses WHERE id = ?1",
            params![id],
            expense_from_row,
        );
        match result {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the title, amount and date of an existing expense.
    /// The category is left as it was.
    pub(crate) fn update_expense(
        &self,
        id: i64,
        title: &str,
        amount: Decimal,
        date: &str,
    ) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE expenses SET title = ?1, amount = ?2, date = ?3 WHERE id = ?4",
            params![title, amount.to_string(), date, id],
        )?;
        if changed == 0 {
            return Err(TrackerError::not_found("Expense", id));
        }
        log::debug!("updated expense {id}");
        Ok(())
    }

    pub(crate) fn delete_expense(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(TrackerError::not_found("Expense", id));
        }
        log::debug!("deleted expense {id}");
        Ok(())
    }

    /// Expenses whose date is exactly `date`. No range or prefix matching.
    pub(crate) fn find_expenses_by_date(&self, date: &str) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, amount, date, category_id FROM expenses WHERE date = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![date], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// All expenses, or only those in `month` (date prefix), oldest first.
    pub(crate) fn get_expenses(&self, month: Option<&str>) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, amount, date, category_id FROM expenses
             WHERE ?1 IS NULL OR substr(date, 1, length(?1)) = ?1
             ORDER BY date, id",
        )?;
        let rows = stmt.query_map(params![month], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Subscriptions ─────────────────────────────────────────

    pub(crate) fn insert_subscription(&self, sub: &Subscription) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO subscriptions (name, amount, next_date) VALUES (?1, ?2, ?3)",
            params![sub.name, sub.amount.to_string(), sub.next_date],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_subscriptions(&self) -> Result<Vec<Subscription>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, amount, next_date FROM subscriptions ORDER BY next_date, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Subscription {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                amount: decimal_at(row, 2)?,
                next_date: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Budgets ───────────────────────────────────────────────

    /// Budgets are not unique per month; a second one for the same month
    /// is stored alongside the first.
    pub(crate) fn insert_budget(&self, budget: &Budget) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO budgets (month, limit_amount) VALUES (?1, ?2)",
            params![budget.month, budget.limit_amount.to_string()],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("inserted budget {id} for {}", budget.month);
        Ok(id)
    }

    /// The earliest budget recorded for `month`.
    pub(crate) fn get_budget(&self, month: &str) -> Result<Option<Budget>> {
        let result = self.conn.query_row(
            "SELECT id, month, limit_amount FROM budgets WHERE month = ?1 ORDER BY id LIMIT 1",
            params![month],
            |row| {
                Ok(Budget {
                    id: Some(row.get(0)?),
                    month: row.get(1)?,
                    limit_amount: decimal_at(row, 2)?,
                })
            },
        );
        match result {
            Ok(b) => Ok(Some(b)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ── Analytics ─────────────────────────────────────────────

    /// Total spent per category. Categories without expenses are left out.
    /// Amounts are added as `Decimal` so totals stay exact.
    pub(crate) fn get_category_totals(&self) -> Result<Vec<CategoryTotal>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.name, e.amount
             FROM categories c
             JOIN expenses e ON e.category_id = c.id
             ORDER BY c.name, c.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, decimal_at(row, 2)?))
        })?;

        let mut totals: Vec<(i64, CategoryTotal)> = Vec::new();
        for row in rows {
            let (id, name, amount) = row?;
            match totals.last_mut() {
                Some((last_id, total)) if *last_id == id => total.total += amount,
                _ => totals.push((id, CategoryTotal { name, total: amount })),
            }
        }
        Ok(totals.into_iter().map(|(_, total)| total).collect())
    }

    /// Sum of expenses whose date starts with `month`.
    pub(crate) fn get_month_spending(&self, month: &str) -> Result<Decimal> {
        let mut stmt = self.conn.prepare(
            "SELECT amount FROM expenses WHERE substr(date, 1, length(?1)) = ?1",
        )?;
        let rows = stmt.query_map(params![month], |row| decimal_at(row, 0))?;
        let mut total = Decimal::ZERO;
        for amount in rows {
            total += amount?;
        }
        Ok(total)
    }

    pub(crate) fn get_budget_status(&self, month: &str) -> Result<BudgetStatus> {
        let spent = self.get_month_spending(month)?;
        let limit = self.get_budget(month)?.map(|b| b.limit_amount);
        Ok(BudgetStatus {
            month: month.to_string(),
            spent,
            limit,
        })
    }
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        amount: decimal_at(row, 2)?,
        date: row.get(3)?,
        category_id: row.get(4)?,
    })
}

/// Read a decimal stored as text. Older rows may use exponent notation.
fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}
