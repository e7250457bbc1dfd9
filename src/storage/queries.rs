//! Read-only query interface consumed by the reports
//!
//! The dashboard and alert computations never touch repositories directly;
//! they are handed records fetched through this trait, which makes them easy
//! to drive from in-memory fixtures.

use crate::error::SpendlogResult;
use crate::models::{
    BudgetWithCategory, CategoryId, DateRange, Expense, ExpenseWithCategory, UserId,
};

use super::Storage;

/// Queries over one user's records
pub trait FinanceQueries {
    /// All of a user's expenses with their categories resolved, newest first
    fn list_expenses(
        &self,
        user_id: UserId,
        range: Option<DateRange>,
    ) -> SpendlogResult<Vec<ExpenseWithCategory>>;

    /// A user's expenses in a single category
    fn list_expenses_by_category(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> SpendlogResult<Vec<Expense>>;

    /// A user's budgets with their categories resolved, in creation order
    fn list_budgets(&self, user_id: UserId) -> SpendlogResult<Vec<BudgetWithCategory>>;
}

impl FinanceQueries for Storage {
    fn list_expenses(
        &self,
        user_id: UserId,
        range: Option<DateRange>,
    ) -> SpendlogResult<Vec<ExpenseWithCategory>> {
        self.expenses
            .get_for_user(user_id, range)?
            .into_iter()
            .map(|expense| {
                let category = self
                    .categories
                    .get(expense.category_id)?
                    .filter(|c| c.user_id == user_id);
                Ok(ExpenseWithCategory { expense, category })
            })
            .collect()
    }

    fn list_expenses_by_category(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> SpendlogResult<Vec<Expense>> {
        self.expenses.get_by_category(user_id, category_id)
    }

    fn list_budgets(&self, user_id: UserId) -> SpendlogResult<Vec<BudgetWithCategory>> {
        self.budgets
            .get_for_user(user_id)?
            .into_iter()
            .map(|budget| {
                let category = self
                    .categories
                    .get(budget.category_id)?
                    .filter(|c| c.user_id == user_id);
                Ok(BudgetWithCategory { budget, category })
            })
            .collect()
    }
}
