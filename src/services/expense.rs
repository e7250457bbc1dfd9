//! Expense service
//!
//! Logging, editing and removing expenses. Every access is scoped to the
//! owning user; another user's expense behaves as if it did not exist.

use chrono::NaiveDate;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{CategoryId, DateRange, Expense, ExpenseId, ExpenseWithCategory, Money, UserId};
use crate::storage::{FinanceQueries, Storage};

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Fields to change on an existing expense
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
    /// `Some(None)` clears the note
    pub notes: Option<Option<String>>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.date.is_none()
            && self.category_id.is_none()
            && self.notes.is_none()
    }
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn ensure_positive(amount: Money) -> SpendlogResult<()> {
        if !amount.is_positive() {
            return Err(SpendlogError::Validation(format!(
                "Expense amount must be greater than zero, got {}",
                amount
            )));
        }
        if amount > Money::MAX {
            return Err(SpendlogError::Validation(format!(
                "Expense amount must not exceed {}, got {}",
                Money::MAX,
                amount
            )));
        }
        Ok(())
    }

    fn ensure_category(&self, user_id: UserId, category_id: CategoryId) -> SpendlogResult<()> {
        match self.storage.categories.get(category_id)? {
            Some(c) if c.user_id == user_id => Ok(()),
            _ => Err(SpendlogError::category_not_found(category_id.to_string())),
        }
    }

    /// Log a new expense
    pub fn create(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        amount: Money,
        date: NaiveDate,
        notes: Option<String>,
    ) -> SpendlogResult<Expense> {
        Self::ensure_positive(amount)?;
        self.ensure_category(user_id, category_id)?;

        let mut expense = Expense::new(user_id, category_id, amount, date);
        expense.set_notes(notes);

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(
            id = %expense.id,
            amount = %expense.amount,
            date = %expense.expense_date,
            "expense created"
        );
        Ok(expense)
    }

    /// Get one of the user's expenses by ID
    pub fn get(&self, user_id: UserId, id: ExpenseId) -> SpendlogResult<Option<Expense>> {
        Ok(self
            .storage
            .expenses
            .get(id)?
            .filter(|e| e.user_id == user_id))
    }

    /// Find an expense by full ID or by the short form shown in listings
    pub fn find(&self, user_id: UserId, identifier: &str) -> SpendlogResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.get(user_id, id);
        }

        let mut matches = self
            .storage
            .expenses
            .get_for_user(user_id, None)?
            .into_iter()
            .filter(|e| e.id.matches_short(identifier));

        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(Some(expense)),
            (Some(_), Some(_)) => Err(SpendlogError::Validation(format!(
                "Expense reference '{}' is ambiguous",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    /// Find an expense or fail with NotFound
    pub fn require(&self, user_id: UserId, identifier: &str) -> SpendlogResult<Expense> {
        self.find(user_id, identifier)?
            .ok_or_else(|| SpendlogError::expense_not_found(identifier))
    }

    /// The user's expenses, newest first, with categories resolved
    pub fn list(
        &self,
        user_id: UserId,
        range: Option<DateRange>,
    ) -> SpendlogResult<Vec<ExpenseWithCategory>> {
        self.storage.list_expenses(user_id, range)
    }

    /// Apply an update to an expense
    pub fn update(
        &self,
        user_id: UserId,
        id: ExpenseId,
        update: ExpenseUpdate,
    ) -> SpendlogResult<Expense> {
        let mut expense = self
            .get(user_id, id)?
            .ok_or_else(|| SpendlogError::expense_not_found(id.to_string()))?;

        if let Some(amount) = update.amount {
            Self::ensure_positive(amount)?;
            expense.set_amount(amount);
        }
        if let Some(date) = update.date {
            expense.set_date(date);
        }
        if let Some(category_id) = update.category_id {
            self.ensure_category(user_id, category_id)?;
            expense.set_category(category_id);
        }
        if let Some(notes) = update.notes {
            expense.set_notes(notes);
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(id = %expense.id, "expense updated");
        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, user_id: UserId, id: ExpenseId) -> SpendlogResult<Expense> {
        let expense = self
            .get(user_id, id)?
            .ok_or_else(|| SpendlogError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        tracing::info!(id = %expense.id, "expense deleted");
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpendlogPaths;
    use crate::models::{Category, CategoryType};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn setup(storage: &Storage) -> (UserId, Category) {
        let user = UserId::new();
        let category = Category::new("Food", CategoryType::Daily, user);
        storage.categories.upsert(category.clone()).unwrap();
        (user, category)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_create_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let (user, food) = setup(&storage);
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(user, food.id, Money::from_cents(1250), day(4), Some("lunch".into()))
            .unwrap();
        assert_eq!(expense.amount, "12.50");
        assert_eq!(expense.expense_date, "2025-03-04");
        assert_eq!(expense.notes.as_deref(), Some("lunch"));

        let listed = service.list(user, None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category_name(), "Food");
    }

    #[test]
    fn test_create_rejects_out_of_range_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let (user, food) = setup(&storage);
        let service = ExpenseService::new(&storage);

        assert!(service
            .create(user, food.id, Money::zero(), day(1), None)
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(user, food.id, Money::from_cents(-100), day(1), None)
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(user, food.id, Money::from_cents(Money::MAX.cents() + 1), day(1), None)
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(user, food.id, Money::MAX, day(1), None)
            .is_ok());
    }

    #[test]
    fn test_create_requires_owned_category() {
        let (_temp_dir, storage) = create_test_storage();
        let (_user, food) = setup(&storage);
        let service = ExpenseService::new(&storage);

        let err = service
            .create(UserId::new(), food.id, Money::from_units(1), day(1), None)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let (user, food) = setup(&storage);
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(user, food.id, Money::from_units(3), day(2), None)
            .unwrap();
        let short = expense.id.to_string();
        assert_eq!(service.require(user, &short).unwrap().id, expense.id);
        assert!(service.find(UserId::new(), &short).unwrap().is_none());
    }

    #[test]
    fn test_update_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let (user, food) = setup(&storage);
        let rent = Category::new("Rent", CategoryType::Big, user);
        storage.categories.upsert(rent.clone()).unwrap();
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(user, food.id, Money::from_units(3), day(2), Some("x".into()))
            .unwrap();

        let updated = service
            .update(
                user,
                expense.id,
                ExpenseUpdate {
                    amount: Some(Money::from_cents(4599)),
                    date: Some(day(9)),
                    category_id: Some(rent.id),
                    notes: Some(None),
                },
            )
            .unwrap();
        assert_eq!(updated.amount, "45.99");
        assert_eq!(updated.expense_date, "2025-03-09");
        assert_eq!(updated.category_id, rent.id);
        assert!(updated.notes.is_none());
        assert_eq!(storage.expenses.get_by_category(user, rent.id).unwrap().len(), 1);

        let err = service
            .update(
                user,
                expense.id,
                ExpenseUpdate {
                    amount: Some(Money::zero()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_delete_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let (user, food) = setup(&storage);
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(user, food.id, Money::from_units(3), day(2), None)
            .unwrap();
        assert!(service.delete(UserId::new(), expense.id).unwrap_err().is_not_found());
        service.delete(user, expense.id).unwrap();
        assert!(service.list(user, None).unwrap().is_empty());
    }
}
