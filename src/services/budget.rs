//! Budget service
//!
//! Spending ceilings per category, renewed monthly or yearly.

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Budget, BudgetId, BudgetPeriod, BudgetWithCategory, CategoryId, Money, UserId};
use crate::storage::{FinanceQueries, Storage};

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn validate(budget: &Budget) -> SpendlogResult<()> {
        budget
            .validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))
    }

    /// Create a budget on one of the user's categories
    pub fn create(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        amount: Money,
        period: BudgetPeriod,
    ) -> SpendlogResult<Budget> {
        match self.storage.categories.get(category_id)? {
            Some(c) if c.user_id == user_id => {}
            _ => return Err(SpendlogError::category_not_found(category_id.to_string())),
        }

        let budget = Budget::new(user_id, category_id, amount, period);
        Self::validate(&budget)?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        tracing::info!(
            id = %budget.id,
            amount = %budget.amount,
            period = %budget.period,
            "budget created"
        );
        Ok(budget)
    }

    pub fn get(&self, user_id: UserId, id: BudgetId) -> SpendlogResult<Option<Budget>> {
        Ok(self
            .storage
            .budgets
            .get(id)?
            .filter(|b| b.user_id == user_id))
    }

    /// Find a budget by full or short ID
    pub fn find(&self, user_id: UserId, identifier: &str) -> SpendlogResult<Option<Budget>> {
        if let Ok(id) = identifier.parse::<BudgetId>() {
            return self.get(user_id, id);
        }

        Ok(self
            .storage
            .budgets
            .get_for_user(user_id)?
            .into_iter()
            .find(|b| b.id.matches_short(identifier)))
    }

    pub fn require(&self, user_id: UserId, identifier: &str) -> SpendlogResult<Budget> {
        self.find(user_id, identifier)?
            .ok_or_else(|| SpendlogError::budget_not_found(identifier))
    }

    /// The user's budgets in creation order with categories resolved
    pub fn list(&self, user_id: UserId) -> SpendlogResult<Vec<BudgetWithCategory>> {
        self.storage.list_budgets(user_id)
    }

    /// Change a budget's ceiling and/or period
    pub fn update(
        &self,
        user_id: UserId,
        id: BudgetId,
        amount: Option<Money>,
        period: Option<BudgetPeriod>,
    ) -> SpendlogResult<Budget> {
        let mut budget = self
            .get(user_id, id)?
            .ok_or_else(|| SpendlogError::budget_not_found(id.to_string()))?;

        if let Some(amount) = amount {
            budget.set_amount(amount);
        }
        if let Some(period) = period {
            budget.set_period(period);
        }
        Self::validate(&budget)?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        tracing::info!(id = %budget.id, "budget updated");
        Ok(budget)
    }

    pub fn delete(&self, user_id: UserId, id: BudgetId) -> SpendlogResult<Budget> {
        let budget = self
            .get(user_id, id)?
            .ok_or_else(|| SpendlogError::budget_not_found(id.to_string()))?;

        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;

        tracing::info!(id = %budget.id, "budget deleted");
        Ok(budget)
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
        let category = Category::new("Travel", CategoryType::Big, user);
        storage.categories.upsert(category.clone()).unwrap();
        (user, category)
    }

    #[test]
    fn test_create_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let (user, travel) = setup(&storage);
        let service = BudgetService::new(&storage);

        let budget = service
            .create(user, travel.id, Money::from_units(50_000), BudgetPeriod::Yearly)
            .unwrap();
        assert_eq!(budget.amount, "50000.00");

        let listed = service.list(user).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category.as_ref().unwrap().name, "Travel");
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let (_temp_dir, storage) = create_test_storage();
        let (user, travel) = setup(&storage);
        let service = BudgetService::new(&storage);

        assert!(service
            .create(user, travel.id, Money::zero(), BudgetPeriod::Monthly)
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(
                user,
                travel.id,
                Money::from_units(10),
                BudgetPeriod::Unrecognized("weekly".into())
            )
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(user, CategoryId::new(), Money::from_units(10), BudgetPeriod::Monthly)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let (user, travel) = setup(&storage);
        let service = BudgetService::new(&storage);

        let budget = service
            .create(user, travel.id, Money::from_units(100), BudgetPeriod::Monthly)
            .unwrap();
        let updated = service
            .update(user, budget.id, Some(Money::from_cents(12345)), Some(BudgetPeriod::Yearly))
            .unwrap();
        assert_eq!(updated.amount, "123.45");
        assert_eq!(updated.period, BudgetPeriod::Yearly);

        assert!(service
            .update(user, budget.id, Some(Money::from_cents(-1)), None)
            .unwrap_err()
            .is_validation());

        assert_eq!(service.require(user, &budget.id.to_string()).unwrap().id, budget.id);
        service.delete(user, budget.id).unwrap();
        assert!(service.list(user).unwrap().is_empty());
    }
}
