mod budget;
mod category;
mod expense;
mod subscription;

pub use budget::{Budget, BudgetStatus};
pub use category::{Category, CategoryTotal};
pub use expense::Expense;
pub use subscription::Subscription;

#[cfg(test)]
mod tests;
