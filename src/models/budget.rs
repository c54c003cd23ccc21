use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    pub id: Option<i64>,
    /// Format: "YYYY-MM"
    pub month: String,
    pub limit_amount: Decimal,
}

impl Budget {
    pub fn new(month: String, limit_amount: Decimal) -> Self {
        Self {
            id: None,
            month,
            limit_amount,
        }
    }
}

/// Spending for a month measured against its budget, if one was set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatus {
    pub month: String,
    pub spent: Decimal,
    pub limit: Option<Decimal>,
}

impl BudgetStatus {
    /// A month without a budget is never exceeded.
    pub fn is_exceeded(&self) -> bool {
        self.limit.is_some_and(|limit| self.spent > limit)
    }

    /// Amount left before the limit is reached; negative once exceeded.
    pub fn remaining(&self) -> Option<Decimal> {
        self.limit.map(|limit| limit - self.spent)
    }
}
