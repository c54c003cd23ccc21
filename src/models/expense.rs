use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: Option<i64>,
    pub title: String,
    pub amount: Decimal,
    /// Format: "YYYY-MM-DD" by convention; stored as entered.
    pub date: String,
    pub category_id: i64,
}

impl Expense {
    pub fn new(title: String, amount: Decimal, date: String, category_id: i64) -> Self {
        Self {
            id: None,
            title,
            amount,
            date,
            category_id,
        }
    }
}
