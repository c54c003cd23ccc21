#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_expense_new() {
    let expense = Expense::new("Lunch".into(), dec!(12.50), "2024-05-01".into(), 3);
    assert!(expense.id.is_none());
    assert_eq!(expense.title, "Lunch");
    assert_eq!(expense.amount, dec!(12.50));
    assert_eq!(expense.date, "2024-05-01");
    assert_eq!(expense.category_id, 3);
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_new() {
    let cat = Category::new("Food".into());
    assert!(cat.id.is_none());
    assert_eq!(cat.name, "Food");
}

#[test]
fn test_category_display() {
    let cat = Category::new("Groceries".into());
    assert_eq!(format!("{cat}"), "Groceries");
}

// ── Subscription ──────────────────────────────────────────────

#[test]
fn test_subscription_new() {
    let sub = Subscription::new("Streaming".into(), dec!(9.99), "2024-06-01".into());
    assert!(sub.id.is_none());
    assert_eq!(sub.amount, dec!(9.99));
    assert_eq!(sub.next_date, "2024-06-01");
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_new() {
    let budget = Budget::new("2024-01".into(), dec!(500));
    assert!(budget.id.is_none());
    assert_eq!(budget.month, "2024-01");
    assert_eq!(budget.limit_amount, dec!(500));
}

fn status(spent: Decimal, limit: Option<Decimal>) -> BudgetStatus {
    BudgetStatus {
        month: "2024-05".into(),
        spent,
        limit,
    }
}

#[test]
fn test_budget_status_exceeded() {
    assert!(status(dec!(110), Some(dec!(100))).is_exceeded());
}

#[test]
fn test_budget_status_at_limit_is_within() {
    // Only strictly greater spending counts as exceeded
    assert!(!status(dec!(100), Some(dec!(100))).is_exceeded());
}

#[test]
fn test_budget_status_without_budget_is_within() {
    let s = status(dec!(10000), None);
    assert!(!s.is_exceeded());
    assert!(s.remaining().is_none());
}

#[test]
fn test_budget_status_remaining() {
    assert_eq!(status(dec!(60), Some(dec!(100))).remaining(), Some(dec!(40)));
    assert_eq!(status(dec!(110), Some(dec!(100))).remaining(), Some(dec!(-10)));
}
