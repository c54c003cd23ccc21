use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: Option<i64>,
    pub name: String,
    pub amount: Decimal,
    pub next_date: String,
}

impl Subscription {
    pub fn new(name: String, amount: Decimal, next_date: String) -> Self {
        Self {
            id: None,
            name,
            amount,
            next_date,
        }
    }
}
