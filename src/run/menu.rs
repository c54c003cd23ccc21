use anyhow::Result;
use std::io::{BufRead, Write};

use crate::db::Database;
use crate::error::TrackerError;
use crate::models::{Budget, Category, Expense};
use crate::ui::theme::Theme;
use crate::ui::util::{format_amount, parse_amount, parse_id};

const MENU: &str = "\
1. Add Category
2. Add Expense
3. Update Expense
4. Delete Expense
5. Search Expense by Date
6. Category Analytics
7. Set Monthly Budget
8. Budget Alert
9. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuState {
    Running,
    Terminated,
}

/// The input stream ended while a prompt was waiting.
#[derive(Debug, thiserror::Error)]
#[error("input closed")]
struct InputClosed;

/// Interactive numbered menu over any line-oriented input and output.
pub(crate) struct Menu<R, W> {
    input: R,
    output: W,
    theme: Theme,
    state: MenuState,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub(crate) fn new(input: R, output: W, theme: Theme) -> Self {
        Self {
            input,
            output,
            theme,
            state: MenuState::Running,
        }
    }

    pub(crate) fn state(&self) -> MenuState {
        self.state
    }

    pub(crate) fn run(&mut self, db: &Database) -> Result<()> {
        while self.state() == MenuState::Running {
            self.show_menu()?;
            let result = match self.read_line() {
                Ok(Some(choice)) => self.dispatch(choice.trim(), db),
                Ok(None) => Err(InputClosed.into()),
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                if e.is::<InputClosed>() {
                    log::debug!("input closed, leaving menu");
                    self.state = MenuState::Terminated;
                } else if let Some(err) = e.downcast_ref::<TrackerError>() {
                    if !err.is_recoverable() {
                        return Err(e);
                    }
                    log::debug!("{err:?}");
                    writeln!(self.output, "{}", self.theme.warning(&err.to_string()))?;
                } else {
                    return Err(e);
                }
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.theme.heading("===== FINTRACK ====="))?;
        writeln!(self.output, "{MENU}")?;
        writeln!(self.output)?;
        write!(self.output, "Choose: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, choice: &str, db: &Database) -> Result<()> {
        match choice {
            "1" => self.add_category(db),
            "2" => self.add_expense(db),
            "3" => self.update_expense(db),
            "4" => self.delete_expense(db),
            "5" => self.search_by_date(db),
            "6" => self.category_analytics(db),
            "7" => self.set_budget(db),
            "8" => self.budget_alert(db),
            "9" => {
                writeln!(self.output, "Exiting FinTrack")?;
                self.state = MenuState::Terminated;
                Ok(())
            }
            _ => {
                writeln!(self.output, "Invalid choice")?;
                Ok(())
            }
        }
    }

    // ── Input ─────────────────────────────────────────────────

    /// One line without its terminator. A line that is not UTF-8 is
    /// consumed and reported as invalid input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8(buf).map_err(|e| TrackerError::InvalidInput {
            field: "input",
            value: String::from_utf8_lossy(e.as_bytes()).trim_end().to_string(),
        })?;
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        match self.read_line()? {
            Some(line) => Ok(line),
            None => Err(InputClosed.into()),
        }
    }

    // ── Handlers ──────────────────────────────────────────────

    fn add_category(&mut self, db: &Database) -> Result<()> {
        let name = self.prompt("Category name: ")?;
        db.insert_category(&Category::new(name))?;
        writeln!(self.output, "{}", self.theme.success("Category added"))?;
        Ok(())
    }

    fn add_expense(&mut self, db: &Database) -> Result<()> {
        let categories = db.get_categories()?;
        if !categories.is_empty() {
            let listing: Vec<String> = categories
                .iter()
                .map(|c| format!("{}={c}", c.id.unwrap_or(0)))
                .collect();
            writeln!(self.output, "Categories: {}", listing.join(", "))?;
        }

        let title = self.prompt("Expense title: ")?;
        let amount = parse_amount("amount", &self.prompt("Amount: ")?)?;
        let date = self.prompt("Date (YYYY-MM-DD): ")?.trim().to_string();
        let category_id = parse_id("category id", &self.prompt("Category ID: ")?)?;

        if db.get_category_by_id(category_id)?.is_none() {
            log::warn!("expense filed under missing category {category_id}");
            let msg = format!("Warning: category {category_id} does not exist");
            writeln!(self.output, "{}", self.theme.warning(&msg))?;
        }

        db.insert_expense(&Expense::new(title, amount, date, category_id))?;
        writeln!(self.output, "{}", self.theme.success("Expense added"))?;
        Ok(())
    }

    fn update_expense(&mut self, db: &Database) -> Result<()> {
        let id = parse_id("expense id", &self.prompt("Expense ID: ")?)?;
        if db.get_expense_by_id(id)?.is_none() {
            return Err(TrackerError::not_found("Expense", id).into());
        }

        let title = self.prompt("Updated title: ")?;
        let amount = parse_amount("amount", &self.prompt("Updated amount: ")?)?;
        let date = self.prompt("Updated date (YYYY-MM-DD): ")?.trim().to_string();
        db.update_expense(id, &title, amount, &date)?;
        writeln!(self.output, "{}", self.theme.success("Expense updated"))?;
        Ok(())
    }

    fn delete_expense(&mut self, db: &Database) -> Result<()> {
        let id = parse_id("expense id", &self.prompt("Expense ID: ")?)?;
        db.delete_expense(id)?;
        writeln!(self.output, "{}", self.theme.success("Expense deleted"))?;
        Ok(())
    }

    fn search_by_date(&mut self, db: &Database) -> Result<()> {
        let date = self.prompt("Enter date (YYYY-MM-DD): ")?;
        let expenses = db.find_expenses_by_date(date.trim())?;
        if expenses.is_empty() {
            writeln!(self.output, "No expenses found")?;
            return Ok(());
        }
        for expense in &expenses {
            writeln!(
                self.output,
                "{} → {}",
                expense.title,
                format_amount(expense.amount)
            )?;
        }
        Ok(())
    }

    fn category_analytics(&mut self, db: &Database) -> Result<()> {
        let totals = db.get_category_totals()?;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{}",
            self.theme.heading("Category Wise Expense Report")
        )?;
        if totals.is_empty() {
            writeln!(self.output, "No expenses recorded")?;
        }
        for row in &totals {
            writeln!(self.output, "{} → {}", row.name, format_amount(row.total))?;
        }
        Ok(())
    }

    fn set_budget(&mut self, db: &Database) -> Result<()> {
        let month = self.prompt("Month (YYYY-MM): ")?;
        let limit = parse_amount("budget limit", &self.prompt("Budget limit: ")?)?;
        db.insert_budget(&Budget::new(month.trim().to_string(), limit))?;
        writeln!(self.output, "{}", self.theme.success("Monthly budget set"))?;
        Ok(())
    }

    fn budget_alert(&mut self, db: &Database) -> Result<()> {
        let month = self.prompt("Month (YYYY-MM): ")?;
        let status = db.get_budget_status(month.trim())?;
        let line = match status.limit {
            Some(limit) if status.is_exceeded() => self.theme.alert(&format!(
                "⚠ Budget exceeded: spent {} of {}",
                format_amount(status.spent),
                format_amount(limit)
            )),
            Some(limit) => self.theme.success(&format!(
                "Within budget: spent {} of {}",
                format_amount(status.spent),
                format_amount(limit)
            )),
            None => format!("Within budget (no budget set for {})", status.month),
        };
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "menu_tests.rs"]
mod tests;
