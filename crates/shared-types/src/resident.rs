use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::{matches_search, Labeled, Tone, ALL_FILTER};
use crate::AppError;

// ---------------------------------------------------------------------------
// Domain Structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ResidentStatus {
    #[default]
    Active,
    Inactive,
}

impl Labeled for ResidentStatus {
    const ALL: &'static [Self] = &[ResidentStatus::Active, ResidentStatus::Inactive];

    fn label(self) -> &'static str {
        match self {
            ResidentStatus::Active => "Active",
            ResidentStatus::Inactive => "Inactive",
        }
    }
}

impl ResidentStatus {
    pub fn tone(self) -> Tone {
        match self {
            ResidentStatus::Active => Tone::Success,
            ResidentStatus::Inactive => Tone::Neutral,
        }
    }
}

/// Tenant occupying a resident's flat. Documents are stored as filenames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub move_in_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_out_date: Option<NaiveDate>,
    pub agreement_doc: String,
    pub aadhaar_doc: String,
    pub pan_doc: String,
    pub photo: String,
    pub police_verification_doc: String,
}

impl Tenant {
    /// (label, filename) pairs for the document list.
    pub fn documents(&self) -> [(&'static str, &str); 5] {
        [
            ("Rental Agreement", &self.agreement_doc),
            ("Aadhaar Card", &self.aadhaar_doc),
            ("PAN Card", &self.pan_doc),
            ("Photo", &self.photo),
            ("Police Verification", &self.police_verification_doc),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Resident {
    pub id: String,
    pub name: String,
    pub wing: String,
    pub flat_no: String,
    pub contact: String,
    pub status: ResidentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<Tenant>,
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Add/edit form for a resident. Wing defaults to "A", status to Active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct ResidentInput {
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "crate::common::not_blank", message = "Please fill all fields."))
    )]
    pub name: String,
    #[serde(default)]
    pub wing: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "crate::common::not_blank", message = "Please fill all fields."))
    )]
    pub flat_no: String,
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "crate::common::not_blank", message = "Please fill all fields."))
    )]
    pub contact: String,
    #[serde(default)]
    pub status: Option<ResidentStatus>,
}

pub const DEFAULT_WING: &str = "A";

impl ResidentInput {
    pub fn into_resident(self, id: String) -> Resident {
        Resident {
            id,
            name: self.name.trim().to_string(),
            wing: self.wing_or_default(),
            flat_no: self.flat_no.trim().to_string(),
            contact: self.contact.trim().to_string(),
            status: self.status.unwrap_or_default(),
            tenant: None,
        }
    }

    /// Overwrite the editable fields, keeping id and tenant.
    pub fn apply_to(self, resident: &mut Resident) {
        resident.wing = self.wing_or_default();
        resident.name = self.name.trim().to_string();
        resident.flat_no = self.flat_no.trim().to_string();
        resident.contact = self.contact.trim().to_string();
        if let Some(status) = self.status {
            resident.status = status;
        }
    }

    fn wing_or_default(&self) -> String {
        match self.wing.as_deref().map(str::trim) {
            Some(w) if !w.is_empty() => w.to_string(),
            _ => DEFAULT_WING.to_string(),
        }
    }
}

/// Tenant documents. On edit, `None` keeps the existing filename.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TenantDocuments {
    #[serde(default)]
    pub agreement_doc: Option<String>,
    #[serde(default)]
    pub aadhaar_doc: Option<String>,
    #[serde(default)]
    pub pan_doc: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub police_verification_doc: Option<String>,
}

impl TenantDocuments {
    fn provided(value: &Option<String>) -> Option<String> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn all_provided(&self) -> bool {
        [
            &self.agreement_doc,
            &self.aadhaar_doc,
            &self.pan_doc,
            &self.photo,
            &self.police_verification_doc,
        ]
        .into_iter()
        .all(|d| Self::provided(d).is_some())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TenantInput {
    pub name: String,
    pub contact: String,
    #[serde(default)]
    pub move_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub move_out_date: Option<NaiveDate>,
    #[serde(default)]
    pub documents: TenantDocuments,
}

impl TenantInput {
    fn check_details(&self) -> Result<NaiveDate, AppError> {
        const MSG: &str = "Please fill in tenant's name, contact, and move-in date.";
        if self.name.trim().is_empty() {
            return Err(AppError::field("name", MSG));
        }
        if self.contact.trim().is_empty() {
            return Err(AppError::field("contact", MSG));
        }
        self.move_in_date
            .ok_or_else(|| AppError::field("move_in_date", MSG))
    }

    /// A new tenant needs every document.
    pub fn into_new_tenant(self, id: String) -> Result<Tenant, AppError> {
        let move_in_date = self.check_details()?;
        if !self.documents.all_provided() {
            return Err(AppError::field(
                "documents",
                "Please upload all required documents.",
            ));
        }
        let docs = &self.documents;
        let doc = |d: &Option<String>| TenantDocuments::provided(d).unwrap_or_default();
        Ok(Tenant {
            id,
            name: self.name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            move_in_date,
            move_out_date: self.move_out_date,
            agreement_doc: doc(&docs.agreement_doc),
            aadhaar_doc: doc(&docs.aadhaar_doc),
            pan_doc: doc(&docs.pan_doc),
            photo: doc(&docs.photo),
            police_verification_doc: doc(&docs.police_verification_doc),
        })
    }

    /// Edit in place. Documents not supplied keep their current filenames.
    pub fn apply_to(self, tenant: &mut Tenant) -> Result<(), AppError> {
        let move_in_date = self.check_details()?;
        tenant.name = self.name.trim().to_string();
        tenant.contact = self.contact.trim().to_string();
        tenant.move_in_date = move_in_date;
        tenant.move_out_date = self.move_out_date;

        let docs = self.documents;
        let keep = |new: &Option<String>, current: &mut String| {
            if let Some(v) = TenantDocuments::provided(new) {
                *current = v;
            }
        };
        keep(&docs.agreement_doc, &mut tenant.agreement_doc);
        keep(&docs.aadhaar_doc, &mut tenant.aadhaar_doc);
        keep(&docs.pan_doc, &mut tenant.pan_doc);
        keep(&docs.photo, &mut tenant.photo);
        keep(&docs.police_verification_doc, &mut tenant.police_verification_doc);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tenant directory
// ---------------------------------------------------------------------------

/// A tenant flattened with the owning resident's details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TenantRow {
    pub resident_id: String,
    pub owner_name: String,
    pub flat_no: String,
    pub wing: String,
    pub tenant: Tenant,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct TenantFilter {
    /// A wing letter, or "All".
    #[serde(default)]
    pub wing: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl TenantFilter {
    fn matches(&self, row: &TenantRow) -> bool {
        let wing_ok = match self.wing.as_deref().map(str::trim) {
            None | Some("") | Some(ALL_FILTER) => true,
            Some(w) => row.wing == w,
        };
        wing_ok
            && matches_search(
                &[&row.tenant.name, &row.flat_no, &row.owner_name],
                self.search.as_deref().unwrap_or_default(),
            )
    }
}

pub fn tenant_rows(residents: &[Resident], filter: &TenantFilter) -> Vec<TenantRow> {
    residents
        .iter()
        .filter_map(|r| {
            r.tenant.as_ref().map(|t| TenantRow {
                resident_id: r.id.clone(),
                owner_name: r.name.clone(),
                flat_no: r.flat_no.clone(),
                wing: r.wing.clone(),
                tenant: t.clone(),
            })
        })
        .filter(|row| filter.matches(row))
        .collect()
}

/// Distinct wings, sorted, for the wing dropdown.
pub fn wings(residents: &[Resident]) -> Vec<String> {
    let mut wings: Vec<String> = residents.iter().map(|r| r.wing.clone()).collect();
    wings.sort();
    wings.dedup();
    wings
}
