use dioxus::prelude::*;
use shared_types::{
    BulkAction, BulkOutcome, Expense, ExpenseFilter, ExpenseSummary, LogExpenseRequest,
};

#[cfg(feature = "server")]
use crate::db::{get_db, today};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::{access, RoleSet};

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_expenses(filter: ExpenseFilter) -> Result<Vec<Expense>, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    Ok(crate::repo::expense::list(get_db(), &filter).await)
}

/// Summary cards plus the monthly chart for `year`.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn expense_summary(year: i32) -> Result<ExpenseSummary, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    Ok(crate::repo::expense::summary(get_db(), today(), year).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn expense_years() -> Result<Vec<i32>, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    Ok(crate::repo::expense::years(get_db()).await)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn log_expense(req: LogExpenseRequest) -> Result<Expense, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    crate::repo::expense::log(get_db(), req, today())
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Approve (mark Paid) or reject one expense awaiting approval.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn decide_expense(id: String, approve: bool) -> Result<Expense, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    crate::repo::expense::decide(get_db(), &id, approve)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_expense(id: String) -> Result<(), ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    crate::repo::expense::delete(get_db(), &id)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    Ok(())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn bulk_expenses(ids: Vec<String>, action: BulkAction) -> Result<BulkOutcome, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    crate::repo::expense::bulk(get_db(), &ids, action)
        .await
        .map_err(|e| e.into_server_fn_error())
}
