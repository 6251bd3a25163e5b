use shared_types::{
    new_id, tenant_rows, AppError, Resident, ResidentInput, Tenant, TenantFilter, TenantInput,
    TenantRow,
};

use super::{find_mut, remove};
use crate::db::{SharedStore, Store};
use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// Residents (office staff)
// ---------------------------------------------------------------------------

pub async fn list(store: &SharedStore) -> Vec<Resident> {
    store.read().await.residents.clone()
}

/// Add a resident at the top of the directory.
pub async fn create(store: &SharedStore, input: ResidentInput) -> Result<Resident, AppError> {
    input.validate_request()?;
    let resident = input.into_resident(new_id("res"));
    let mut store = store.write().await;
    store.residents.insert(0, resident.clone());
    tracing::info!(id = %resident.id, flat = %resident.flat_no, "Resident added");
    Ok(resident)
}

pub async fn update(
    store: &SharedStore,
    id: &str,
    input: ResidentInput,
) -> Result<Resident, AppError> {
    input.validate_request()?;
    let mut store = store.write().await;
    let resident = find_mut(&mut store.residents, id)?;
    input.apply_to(resident);
    tracing::info!(id, "Resident updated");
    Ok(resident.clone())
}

pub async fn delete(store: &SharedStore, id: &str) -> Result<Resident, AppError> {
    let mut store = store.write().await;
    let removed = remove(&mut store.residents, id)?;
    tracing::info!(id, "Resident deleted");
    Ok(removed)
}

/// Tenant directory across every flat.
pub async fn tenants(store: &SharedStore, filter: &TenantFilter) -> Vec<TenantRow> {
    tenant_rows(&store.read().await.residents, filter)
}

// ---------------------------------------------------------------------------
// Own tenant (resident)
// ---------------------------------------------------------------------------

fn by_flat<'a>(store: &'a mut Store, flat_no: &str) -> Result<&'a mut Resident, AppError> {
    store
        .residents
        .iter_mut()
        .find(|r| r.flat_no.eq_ignore_ascii_case(flat_no.trim()))
        .ok_or_else(|| no_resident(flat_no))
}

fn no_resident(flat_no: &str) -> AppError {
    AppError::not_found(format!("No resident record found for flat {flat_no}"))
}

/// The resident record for a flat, with its tenant if any.
pub async fn for_flat(store: &SharedStore, flat_no: &str) -> Result<Resident, AppError> {
    let store = store.read().await;
    store
        .residents
        .iter()
        .find(|r| r.flat_no.eq_ignore_ascii_case(flat_no.trim()))
        .cloned()
        .ok_or_else(|| no_resident(flat_no))
}

pub async fn add_tenant(
    store: &SharedStore,
    flat_no: &str,
    input: TenantInput,
) -> Result<Tenant, AppError> {
    let mut store = store.write().await;
    let resident = by_flat(&mut store, flat_no)?;
    if resident.tenant.is_some() {
        return Err(AppError::conflict("A tenant is already registered for this flat."));
    }
    let tenant = input.into_new_tenant(new_id("ten"))?;
    resident.tenant = Some(tenant.clone());
    tracing::info!(flat = flat_no, tenant = %tenant.id, "Tenant added");
    Ok(tenant)
}

pub async fn update_tenant(
    store: &SharedStore,
    flat_no: &str,
    input: TenantInput,
) -> Result<Tenant, AppError> {
    let mut store = store.write().await;
    let resident = by_flat(&mut store, flat_no)?;
    let tenant = resident
        .tenant
        .as_mut()
        .ok_or_else(|| AppError::not_found("No tenant registered for this flat."))?;
    input.apply_to(tenant)?;
    tracing::info!(flat = flat_no, "Tenant updated");
    Ok(tenant.clone())
}

pub async fn remove_tenant(store: &SharedStore, flat_no: &str) -> Result<Tenant, AppError> {
    let mut store = store.write().await;
    let resident = by_flat(&mut store, flat_no)?;
    let tenant = resident
        .tenant
        .take()
        .ok_or_else(|| AppError::not_found("No tenant registered for this flat."))?;
    tracing::info!(flat = flat_no, "Tenant removed");
    Ok(tenant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support::{day, store};
    use shared_types::{AppErrorKind, ResidentStatus, TenantDocuments};

    fn input(name: &str, flat: &str, contact: &str) -> ResidentInput {
        ResidentInput {
            name: name.into(),
            wing: None,
            flat_no: flat.into(),
            contact: contact.into(),
            status: None,
        }
    }

    #[tokio::test]
    async fn create_prepends_with_defaults() {
        let store = store();
        let created = create(&store, input("Farah Khan", "A-204", "9000000000")).await.unwrap();
        let all = list(&store).await;
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].id, created.id);
        assert!(created.id.starts_with("res-"));
        assert_eq!(created.wing, "A");
        assert_eq!(created.status, ResidentStatus::Active);
    }

    #[tokio::test]
    async fn missing_contact_adds_nothing() {
        let store = store();
        let err = create(&store, input("Farah Khan", "A-204", "")).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(list(&store).await.len(), 5);
    }

    #[tokio::test]
    async fn update_keeps_tenant() {
        let store = store();
        let updated = update(&store, "res-jd", input("John D.", "A-101", "9876543214")).await.unwrap();
        assert_eq!(updated.name, "John D.");
        assert!(updated.tenant.is_some());
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let err = delete(&store(), "res-404").await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::NotFound);
    }

    fn tenant_input(docs: TenantDocuments) -> TenantInput {
        TenantInput {
            name: "Kabir Rao".into(),
            contact: "7777777777".into(),
            move_in_date: Some(day(2024, 9, 1)),
            move_out_date: None,
            documents: docs,
        }
    }

    #[tokio::test]
    async fn add_tenant_requires_empty_flat() {
        let store = store();
        let err = add_tenant(&store, "A-101", tenant_input(TenantDocuments::default()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }

    #[tokio::test]
    async fn add_tenant_needs_every_document() {
        let store = store();
        let err = add_tenant(&store, "B-204", tenant_input(TenantDocuments::default()))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Please upload all required documents.");
        assert!(for_flat(&store, "B-204").await.unwrap().tenant.is_none());
    }

    #[tokio::test]
    async fn edit_then_remove_tenant() {
        let store = store();
        let mut edit = tenant_input(TenantDocuments::default());
        edit.documents.photo = Some("kabir.jpg".into());
        let tenant = update_tenant(&store, "A-101", edit).await.unwrap();
        assert_eq!(tenant.name, "Kabir Rao");
        assert_eq!(tenant.photo, "kabir.jpg");
        assert_eq!(tenant.agreement_doc, "priya_agreement.pdf");

        remove_tenant(&store, "a-101").await.unwrap();
        assert!(for_flat(&store, "A-101").await.unwrap().tenant.is_none());
        assert_eq!(tenants(&store, &TenantFilter::default()).await.len(), 0);
    }
}
