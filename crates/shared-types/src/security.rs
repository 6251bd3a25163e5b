//! Gate and patrol records kept by the security desk.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::{matches_search, Labeled, Tone};
use crate::AppError;
use crate::export::{Cell, ExportFormat, Tabular};

const NOT_AVAILABLE: &str = "N/A";

/// Inside the premises or already left. Shared by visitors and vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PresenceStatus {
    Inside,
    Exited,
}

impl Labeled for PresenceStatus {
    const ALL: &'static [Self] = &[PresenceStatus::Inside, PresenceStatus::Exited];

    fn label(self) -> &'static str {
        match self {
            PresenceStatus::Inside => "Inside",
            PresenceStatus::Exited => "Exited",
        }
    }
}

impl PresenceStatus {
    pub fn tone(self) -> Tone {
        match self {
            PresenceStatus::Inside => Tone::Success,
            PresenceStatus::Exited => Tone::Neutral,
        }
    }
}

// ---------------------------------------------------------------------------
// Visitors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Visitor {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub vehicle_no: String,
    pub visiting_flat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub in_time: String,
    #[serde(default)]
    pub out_time: Option<String>,
    pub status: PresenceStatus,
}

impl Visitor {
    pub fn purpose_or_na(&self) -> &str {
        self.purpose.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn out_time_or_na(&self) -> &str {
        self.out_time.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Check out a visitor still inside. A recorded out time is never overwritten.
    pub fn mark_exited(&mut self, at: String) -> Result<(), AppError> {
        if self.status != PresenceStatus::Inside {
            return Err(AppError::conflict(format!("{} has already exited.", self.name)));
        }
        self.status = PresenceStatus::Exited;
        self.out_time = Some(at);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct VisitorFilter {
    /// Include exited visitors.
    #[serde(default)]
    pub history: bool,
    #[serde(default)]
    pub search: Option<String>,
}

impl VisitorFilter {
    pub fn matches(&self, v: &Visitor) -> bool {
        (self.history || v.status == PresenceStatus::Inside)
            && matches_search(
                &[
                    &v.name,
                    &v.contact,
                    &v.visiting_flat,
                    &v.vehicle_no,
                    v.purpose.as_deref().unwrap_or_default(),
                ],
                self.search.as_deref().unwrap_or_default(),
            )
    }
}

pub fn filter_visitors(visitors: &[Visitor], filter: &VisitorFilter) -> Vec<Visitor> {
    visitors
        .iter()
        .filter(|v| filter.matches(v))
        .cloned()
        .collect()
}

const VISITOR_REQUIRED: &str = "Name, Contact, and Visiting Flat are required.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct VisitorInput {
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Name, Contact, and Visiting Flat are required."
        ))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Name, Contact, and Visiting Flat are required."
        ))
    )]
    pub contact: String,
    #[serde(default)]
    pub vehicle_no: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Name, Contact, and Visiting Flat are required."
        ))
    )]
    pub visiting_flat: String,
    #[serde(default)]
    pub purpose: Option<String>,
}

fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

impl VisitorInput {
    /// Message shown when any of the three required fields is blank.
    pub const REQUIRED_MESSAGE: &'static str = VISITOR_REQUIRED;

    pub fn into_visitor(self, id: String, in_time: String) -> Visitor {
        Visitor {
            id,
            name: self.name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            vehicle_no: or_na(self.vehicle_no.as_deref()),
            visiting_flat: self.visiting_flat.trim().to_string(),
            purpose: Some(or_na(self.purpose.as_deref())),
            in_time,
            out_time: None,
            status: PresenceStatus::Inside,
        }
    }

    /// Edit keeps id, times and status.
    pub fn apply_to(self, visitor: &mut Visitor) {
        visitor.name = self.name.trim().to_string();
        visitor.contact = self.contact.trim().to_string();
        visitor.vehicle_no = or_na(self.vehicle_no.as_deref());
        visitor.visiting_flat = self.visiting_flat.trim().to_string();
        visitor.purpose = Some(or_na(self.purpose.as_deref()));
    }
}

impl Tabular for Visitor {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Name",
        "Contact",
        "Vehicle No",
        "Visiting Flat",
        "Purpose",
        "In Time",
        "Out Time",
        "Status",
    ];
    const SHEET_NAME: &'static str = "Visitor Log";
    const FILE_STEM: &'static str = "visitor_log";
    const EMPTY_MESSAGE: &'static str = "No data to export.";

    fn cells(&self, _format: ExportFormat) -> Vec<Cell> {
        vec![
            Cell::text(&self.id),
            Cell::text(&self.name),
            Cell::text(&self.contact),
            Cell::text(&self.vehicle_no),
            Cell::text(&self.visiting_flat),
            Cell::text(self.purpose_or_na()),
            Cell::text(&self.in_time),
            Cell::text(self.out_time_or_na()),
            Cell::text(self.status.label()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Patrols
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PatrolStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Labeled for PatrolStatus {
    const ALL: &'static [Self] = &[
        PatrolStatus::Scheduled,
        PatrolStatus::InProgress,
        PatrolStatus::Completed,
    ];

    fn label(self) -> &'static str {
        match self {
            PatrolStatus::Scheduled => "Scheduled",
            PatrolStatus::InProgress => "In Progress",
            PatrolStatus::Completed => "Completed",
        }
    }
}

impl PatrolStatus {
    pub fn tone(self) -> Tone {
        match self {
            PatrolStatus::Scheduled => Tone::Info,
            PatrolStatus::InProgress => Tone::Warning,
            PatrolStatus::Completed => Tone::Success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Patrol {
    pub id: String,
    pub route_name: String,
    pub guard_name: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub status: PatrolStatus,
}

impl Patrol {
    /// Scheduled -> In Progress.
    pub fn start(&mut self, at: String) -> Result<(), AppError> {
        if self.status != PatrolStatus::Scheduled {
            return Err(AppError::conflict(format!(
                "Only scheduled patrols can be started; this one is {}.",
                self.status.label()
            )));
        }
        self.status = PatrolStatus::InProgress;
        self.start_time = Some(at);
        Ok(())
    }

    /// In Progress -> Completed.
    pub fn complete(&mut self, at: String) -> Result<(), AppError> {
        if self.status != PatrolStatus::InProgress {
            return Err(AppError::conflict(format!(
                "Only patrols in progress can be ended; this one is {}.",
                self.status.label()
            )));
        }
        self.status = PatrolStatus::Completed;
        self.end_time = Some(at);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct SchedulePatrolRequest {
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Route Name and Guard Name are required."
        ))
    )]
    pub route_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Route Name and Guard Name are required."
        ))
    )]
    pub guard_name: String,
}

impl SchedulePatrolRequest {
    pub fn into_patrol(self, id: String) -> Patrol {
        Patrol {
            id,
            route_name: self.route_name.trim().to_string(),
            guard_name: self.guard_name.trim().to_string(),
            start_time: None,
            end_time: None,
            status: PatrolStatus::Scheduled,
        }
    }
}

// ---------------------------------------------------------------------------
// Incidents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum IncidentSeverity {
    #[default]
    Low,
    Medium,
    High,
}

impl Labeled for IncidentSeverity {
    const ALL: &'static [Self] = &[
        IncidentSeverity::Low,
        IncidentSeverity::Medium,
        IncidentSeverity::High,
    ];

    fn label(self) -> &'static str {
        match self {
            IncidentSeverity::Low => "Low",
            IncidentSeverity::Medium => "Medium",
            IncidentSeverity::High => "High",
        }
    }
}

impl IncidentSeverity {
    pub fn tone(self) -> Tone {
        match self {
            IncidentSeverity::Low => Tone::Info,
            IncidentSeverity::Medium => Tone::Warning,
            IncidentSeverity::High => Tone::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum IncidentStatus {
    Reported,
    #[serde(rename = "Under Investigation")]
    UnderInvestigation,
    Resolved,
}

impl Labeled for IncidentStatus {
    const ALL: &'static [Self] = &[
        IncidentStatus::Reported,
        IncidentStatus::UnderInvestigation,
        IncidentStatus::Resolved,
    ];

    fn label(self) -> &'static str {
        match self {
            IncidentStatus::Reported => "Reported",
            IncidentStatus::UnderInvestigation => "Under Investigation",
            IncidentStatus::Resolved => "Resolved",
        }
    }
}

impl IncidentStatus {
    pub fn tone(self) -> Tone {
        match self {
            IncidentStatus::Reported => Tone::Error,
            IncidentStatus::UnderInvestigation => Tone::Warning,
            IncidentStatus::Resolved => Tone::Success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub reported_by: String,
    pub date: NaiveDate,
    pub time: String,
    pub severity: IncidentSeverity,
    pub status: IncidentStatus,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct ReportIncidentRequest {
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Title and Description are required."
        ))
    )]
    pub title: String,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Title and Description are required."
        ))
    )]
    pub description: String,
    #[serde(default)]
    pub severity: IncidentSeverity,
}

impl ReportIncidentRequest {
    pub fn into_incident(
        self,
        id: String,
        reported_by: &str,
        date: NaiveDate,
        time: String,
    ) -> Incident {
        Incident {
            id,
            title: self.title.trim().to_string(),
            reported_by: reported_by.to_string(),
            date,
            time,
            severity: self.severity,
            status: IncidentStatus::Reported,
            description: self.description.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SetIncidentStatusRequest {
    pub status: IncidentStatus,
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum OwnerType {
    Resident,
    Visitor,
}

impl Labeled for OwnerType {
    const ALL: &'static [Self] = &[OwnerType::Resident, OwnerType::Visitor];

    fn label(self) -> &'static str {
        match self {
            OwnerType::Resident => "Resident",
            OwnerType::Visitor => "Visitor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Vehicle {
    pub id: String,
    pub vehicle_no: String,
    pub owner_type: OwnerType,
    pub owner_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_no: Option<String>,
    pub in_time: String,
    #[serde(default)]
    pub out_time: Option<String>,
    pub status: PresenceStatus,
}

impl Vehicle {
    pub fn mark_exited(&mut self, at: String) -> Result<(), AppError> {
        if self.status != PresenceStatus::Inside {
            return Err(AppError::conflict(format!("{} has already left.", self.vehicle_no)));
        }
        self.status = PresenceStatus::Exited;
        self.out_time = Some(at);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct VehicleFilter {
    #[serde(default)]
    pub search: Option<String>,
}

pub fn filter_vehicles(vehicles: &[Vehicle], filter: &VehicleFilter) -> Vec<Vehicle> {
    let query = filter.search.as_deref().unwrap_or_default();
    vehicles
        .iter()
        .filter(|v| {
            matches_search(
                &[
                    &v.vehicle_no,
                    &v.owner_name,
                    v.flat_no.as_deref().unwrap_or_default(),
                ],
                query,
            )
        })
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SecurityDashboard {
    pub visitors_inside: usize,
    pub patrols_in_progress: usize,
    /// Anything not yet Resolved.
    pub open_incidents: usize,
    pub vehicles_inside: usize,
    pub active_patrols: Vec<Patrol>,
    pub recent_incidents: Vec<Incident>,
}

pub fn security_dashboard(
    visitors: &[Visitor],
    patrols: &[Patrol],
    incidents: &[Incident],
    vehicles: &[Vehicle],
) -> SecurityDashboard {
    let active_patrols: Vec<Patrol> = patrols
        .iter()
        .filter(|p| p.status == PatrolStatus::InProgress)
        .cloned()
        .collect();
    SecurityDashboard {
        visitors_inside: visitors
            .iter()
            .filter(|v| v.status == PresenceStatus::Inside)
            .count(),
        patrols_in_progress: active_patrols.len(),
        open_incidents: incidents
            .iter()
            .filter(|i| i.status != IncidentStatus::Resolved)
            .count(),
        vehicles_inside: vehicles
            .iter()
            .filter(|v| v.status == PresenceStatus::Inside)
            .count(),
        active_patrols,
        recent_incidents: incidents.iter().take(3).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::to_csv;
    use pretty_assertions::assert_eq;

    fn visitor(id: &str, name: &str, status: PresenceStatus) -> Visitor {
        Visitor {
            id: id.into(),
            name: name.into(),
            contact: "9123456780".into(),
            vehicle_no: "MH12AB1234".into(),
            visiting_flat: "A-101".into(),
            purpose: Some("Personal Visit".into()),
            in_time: "10:30 AM".into(),
            out_time: None,
            status,
        }
    }

    #[test]
    fn current_view_hides_exited() {
        let all = vec![
            visitor("v1", "Ravi Sharma", PresenceStatus::Exited),
            visitor("v2", "Priya Mehta", PresenceStatus::Inside),
        ];
        let current = filter_visitors(&all, &VisitorFilter::default());
        assert_eq!(current.len(), 1);
        let history = filter_visitors(
            &all,
            &VisitorFilter {
                history: true,
                search: Some("ravi".into()),
            },
        );
        assert_eq!(history[0].id, "v1");
    }

    #[test]
    fn new_visitor_defaults() {
        let input = VisitorInput {
            name: " Amit ".into(),
            contact: "9000000000".into(),
            vehicle_no: Some("  ".into()),
            visiting_flat: "B-405".into(),
            purpose: None,
        };
        let v = input.into_visitor("vis-x".into(), "03:30 PM".into());
        assert_eq!(v.vehicle_no, "N/A");
        assert_eq!(v.purpose.as_deref(), Some("N/A"));
        assert_eq!(v.status, PresenceStatus::Inside);
        assert!(v.out_time.is_none());
        assert_eq!(VisitorInput::REQUIRED_MESSAGE, "Name, Contact, and Visiting Flat are required.");
    }

    #[test]
    fn visitor_csv_uses_na_for_missing_out_time() {
        let mut exited = visitor("v1", "Ravi \"RS\" Sharma", PresenceStatus::Exited);
        exited.out_time = Some("11:45 AM".into());
        let inside = visitor("v2", "Priya", PresenceStatus::Inside);
        let csv = to_csv(&[exited, inside]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            r#"v1,"Ravi ""RS"" Sharma",9123456780,MH12AB1234,A-101,Personal Visit,10:30 AM,11:45 AM,Exited"#
        );
        assert!(lines[2].ends_with("10:30 AM,N/A,Inside"));
    }

    #[test]
    fn patrol_lifecycle() {
        let mut p = SchedulePatrolRequest {
            route_name: "Perimeter".into(),
            guard_name: "Ram Singh".into(),
        }
        .into_patrol("pat-x".into());
        assert_eq!(p.status, PatrolStatus::Scheduled);
        assert_eq!(
            p.complete("02:00 PM".into()).unwrap_err().kind,
            crate::AppErrorKind::Conflict
        );
        assert_eq!(p.end_time, None);
        p.start("02:30 PM".into()).unwrap();
        assert_eq!(p.status, PatrolStatus::InProgress);
        assert!(p.start("02:31 PM".into()).is_err());
        p.complete("03:10 PM".into()).unwrap();
        assert_eq!(p.status, PatrolStatus::Completed);
        assert_eq!(p.start_time.as_deref(), Some("02:30 PM"));
        assert_eq!(p.end_time.as_deref(), Some("03:10 PM"));
        assert!(p.complete("03:20 PM".into()).is_err());
    }

    #[test]
    fn vehicle_search_covers_flat() {
        let v = Vehicle {
            id: "veh-3".into(),
            vehicle_no: "MH04XY5555".into(),
            owner_type: OwnerType::Resident,
            owner_name: "Alice Johnson".into(),
            flat_no: Some("A-102".into()),
            in_time: "08:00 AM".into(),
            out_time: None,
            status: PresenceStatus::Inside,
        };
        let found = filter_vehicles(
            std::slice::from_ref(&v),
            &VehicleFilter {
                search: Some("a-102".into()),
            },
        );
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn dashboard_counts() {
        let visitors = vec![
            visitor("v1", "A", PresenceStatus::Inside),
            visitor("v2", "B", PresenceStatus::Exited),
        ];
        let patrols = vec![SchedulePatrolRequest {
            route_name: "r".into(),
            guard_name: "g".into(),
        }
        .into_patrol("p1".into())];
        let incident = ReportIncidentRequest {
            title: "Gate".into(),
            description: "Loitering".into(),
            severity: IncidentSeverity::Medium,
        }
        .into_incident(
            "i1".into(),
            "Security Head",
            NaiveDate::from_ymd_opt(2024, 7, 31).unwrap(),
            "11:00 AM".into(),
        );
        let d = security_dashboard(&visitors, &patrols, &[incident], &[]);
        assert_eq!(d.visitors_inside, 1);
        assert_eq!(d.patrols_in_progress, 0);
        assert_eq!(d.open_incidents, 1);
        assert_eq!(d.vehicles_inside, 0);
    }
}
