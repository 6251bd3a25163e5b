use shared_types::{
    expense_summary, expense_years, filter_expenses, new_id, AppError, BulkAction, BulkOutcome,
    Expense, ExpenseFilter, ExpenseStatus, ExpenseSummary, LogExpenseRequest,
};

use super::{find_mut, remove};
use crate::db::SharedStore;
use crate::error_convert::ValidateRequest;

/// Filtered ledger, newest first. Exports use the same rows.
pub async fn list(store: &SharedStore, filter: &ExpenseFilter) -> Vec<Expense> {
    filter_expenses(&store.read().await.expenses, filter)
}

pub async fn summary(store: &SharedStore, today: chrono::NaiveDate, year: i32) -> ExpenseSummary {
    expense_summary(&store.read().await.expenses, today, year)
}

pub async fn years(store: &SharedStore) -> Vec<i32> {
    expense_years(&store.read().await.expenses)
}

pub async fn log(
    store: &SharedStore,
    req: LogExpenseRequest,
    today: chrono::NaiveDate,
) -> Result<Expense, AppError> {
    req.validate_request()?;
    if let Some(receipt) = &req.receipt {
        receipt.check("receipt")?;
    }
    let expense = req.into_expense(new_id("exp"), today);
    store.write().await.expenses.insert(0, expense.clone());
    tracing::info!(id = %expense.id, payee = %expense.payee, amount = expense.amount, "Expense logged");
    Ok(expense)
}

/// Approve (Paid) or reject (Rejected) one expense awaiting approval.
pub async fn decide(store: &SharedStore, id: &str, approve: bool) -> Result<Expense, AppError> {
    let mut store = store.write().await;
    let expense = find_mut(&mut store.expenses, id)?;
    if expense.status != ExpenseStatus::PendingApproval {
        return Err(AppError::conflict(format!("Expense {id} is not pending approval")));
    }
    expense.status = if approve {
        ExpenseStatus::Paid
    } else {
        ExpenseStatus::Rejected
    };
    tracing::info!(id, status = ?expense.status, "Expense decided");
    Ok(expense.clone())
}

pub async fn delete(store: &SharedStore, id: &str) -> Result<Expense, AppError> {
    let removed = remove(&mut store.write().await.expenses, id)?;
    tracing::info!(id, "Expense deleted");
    Ok(removed)
}

/// Apply a bulk action to the selected ids. Approve and reject only touch
/// selected expenses still pending approval.
pub async fn bulk(
    store: &SharedStore,
    ids: &[String],
    action: BulkAction,
) -> Result<BulkOutcome, AppError> {
    if ids.is_empty() {
        return Err(AppError::field("ids", "Please select at least one expense."));
    }
    let mut store = store.write().await;
    let affected = match action {
        BulkAction::Delete => {
            let before = store.expenses.len();
            store.expenses.retain(|e| !ids.contains(&e.id));
            before - store.expenses.len()
        }
        BulkAction::Approve | BulkAction::Reject => {
            let target = if action == BulkAction::Approve {
                ExpenseStatus::Paid
            } else {
                ExpenseStatus::Rejected
            };
            let mut n = 0;
            for e in store
                .expenses
                .iter_mut()
                .filter(|e| ids.contains(&e.id) && e.status == ExpenseStatus::PendingApproval)
            {
                e.status = target;
                n += 1;
            }
            n
        }
    };
    tracing::info!(action = action.past_tense(), affected, "Bulk expense action");
    Ok(BulkOutcome { action, affected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support::{day, store};
    use shared_types::{AppErrorKind, Attachment, ExpenseCategory};

    fn req(payee: &str, amount: f64) -> LogExpenseRequest {
        LogExpenseRequest {
            date: None,
            category: ExpenseCategory::Maintenance,
            payee: payee.into(),
            amount,
            description: "Pump service".into(),
            receipt: None,
        }
    }

    #[tokio::test]
    async fn logged_expense_awaits_approval() {
        let store = store();
        let e = log(&store, req("Reliable Pumps", 4500.0), day(2024, 8, 10)).await.unwrap();
        assert_eq!(e.status, ExpenseStatus::PendingApproval);
        assert_eq!(e.date, day(2024, 8, 10));
        assert_eq!(store.read().await.expenses.len(), 18);
    }

    #[tokio::test]
    async fn invalid_expense_adds_nothing() {
        let store = store();
        assert!(log(&store, req("", 4500.0), day(2024, 8, 10)).await.is_err());
        assert!(log(&store, req("Reliable Pumps", -1.0), day(2024, 8, 10)).await.is_err());
        let mut bad_receipt = req("Reliable Pumps", 10.0);
        bad_receipt.receipt = Some(Attachment::new("receipt.exe", 10));
        let err = log(&store, bad_receipt, day(2024, 8, 10)).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(store.read().await.expenses.len(), 17);
    }

    #[tokio::test]
    async fn bulk_approve_skips_settled() {
        let store = store();
        let ids = vec!["exp-4".to_string(), "exp-5".to_string()];
        let out = bulk(&store, &ids, BulkAction::Approve).await.unwrap();
        assert_eq!(out.affected, 1);
        let s = store.read().await;
        assert!(s.expenses.iter().all(|e| e.status == ExpenseStatus::Paid));
    }

    #[tokio::test]
    async fn bulk_delete_removes_selected() {
        let store = store();
        let ids = vec!["exp-1".to_string(), "exp-2".to_string(), "missing".to_string()];
        let out = bulk(&store, &ids, BulkAction::Delete).await.unwrap();
        assert_eq!(out.affected, 2);
        assert_eq!(store.read().await.expenses.len(), 15);
    }

    #[tokio::test]
    async fn decide_rejects_pending_only() {
        let store = store();
        assert_eq!(decide(&store, "exp-4", false).await.unwrap().status, ExpenseStatus::Rejected);
        assert_eq!(decide(&store, "exp-4", true).await.unwrap_err().kind, AppErrorKind::Conflict);
    }
}
