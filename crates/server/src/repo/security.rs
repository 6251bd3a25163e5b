use chrono::NaiveDate;
use shared_types::{
    filter_vehicles, filter_visitors, new_id, security_dashboard, AppError, Incident,
    IncidentStatus, Patrol, PresenceStatus, ReportIncidentRequest, SchedulePatrolRequest,
    SecurityDashboard, Vehicle, VehicleFilter, Visitor, VisitorFilter, VisitorInput,
};

use super::find_mut;
use crate::db::SharedStore;
use crate::error_convert::ValidateRequest;

pub const NO_VISITORS_INSIDE: &str = "No visitors are currently inside to mark for exit.";

// ---------------------------------------------------------------------------
// Visitors
// ---------------------------------------------------------------------------

pub async fn visitors(store: &SharedStore, filter: &VisitorFilter) -> Vec<Visitor> {
    filter_visitors(&store.read().await.visitors, filter)
}

/// Check a visitor in at `in_time`.
pub async fn add_visitor(
    store: &SharedStore,
    input: VisitorInput,
    in_time: String,
) -> Result<Visitor, AppError> {
    input.validate_request()?;
    let visitor = input.into_visitor(new_id("vis"), in_time);
    store.write().await.visitors.insert(0, visitor.clone());
    tracing::info!(id = %visitor.id, flat = %visitor.visiting_flat, "Visitor checked in");
    Ok(visitor)
}

pub async fn update_visitor(
    store: &SharedStore,
    id: &str,
    input: VisitorInput,
) -> Result<Visitor, AppError> {
    input.validate_request()?;
    let mut store = store.write().await;
    let visitor = find_mut(&mut store.visitors, id)?;
    input.apply_to(visitor);
    Ok(visitor.clone())
}

pub async fn exit_visitor(store: &SharedStore, id: &str, at: String) -> Result<Visitor, AppError> {
    let mut store = store.write().await;
    let visitor = find_mut(&mut store.visitors, id)?;
    visitor.mark_exited(at)?;
    tracing::info!(id, "Visitor checked out");
    Ok(visitor.clone())
}

/// Gate scanner stand-in: checks out the first visitor still inside.
pub async fn qr_exit(store: &SharedStore, at: String) -> Result<Visitor, AppError> {
    let mut store = store.write().await;
    let visitor = store
        .visitors
        .iter_mut()
        .find(|v| v.status == PresenceStatus::Inside)
        .ok_or_else(|| AppError::bad_request(NO_VISITORS_INSIDE))?;
    visitor.mark_exited(at)?;
    tracing::info!(id = %visitor.id, "Visitor checked out by QR scan");
    Ok(visitor.clone())
}

// ---------------------------------------------------------------------------
// Patrols
// ---------------------------------------------------------------------------

pub async fn patrols(store: &SharedStore) -> Vec<Patrol> {
    store.read().await.patrols.clone()
}

pub async fn schedule_patrol(store: &SharedStore, req: SchedulePatrolRequest) -> Result<Patrol, AppError> {
    req.validate_request()?;
    let patrol = req.into_patrol(new_id("pat"));
    store.write().await.patrols.insert(0, patrol.clone());
    tracing::info!(id = %patrol.id, route = %patrol.route_name, "Patrol scheduled");
    Ok(patrol)
}

pub async fn start_patrol(store: &SharedStore, id: &str, at: String) -> Result<Patrol, AppError> {
    let mut store = store.write().await;
    let patrol = find_mut(&mut store.patrols, id)?;
    patrol.start(at)?;
    tracing::info!(id, "Patrol started");
    Ok(patrol.clone())
}

pub async fn end_patrol(store: &SharedStore, id: &str, at: String) -> Result<Patrol, AppError> {
    let mut store = store.write().await;
    let patrol = find_mut(&mut store.patrols, id)?;
    patrol.complete(at)?;
    tracing::info!(id, "Patrol completed");
    Ok(patrol.clone())
}

// ---------------------------------------------------------------------------
// Incidents
// ---------------------------------------------------------------------------

pub async fn incidents(store: &SharedStore) -> Vec<Incident> {
    store.read().await.incidents.clone()
}

pub async fn report_incident(
    store: &SharedStore,
    reported_by: &str,
    req: ReportIncidentRequest,
    date: NaiveDate,
    time: String,
) -> Result<Incident, AppError> {
    req.validate_request()?;
    let incident = req.into_incident(new_id("inc"), reported_by, date, time);
    store.write().await.incidents.insert(0, incident.clone());
    tracing::warn!(id = %incident.id, severity = ?incident.severity, "Incident reported");
    Ok(incident)
}

pub async fn set_incident_status(
    store: &SharedStore,
    id: &str,
    status: IncidentStatus,
) -> Result<Incident, AppError> {
    let mut store = store.write().await;
    let incident = find_mut(&mut store.incidents, id)?;
    incident.status = status;
    tracing::info!(id, status = ?status, "Incident status set");
    Ok(incident.clone())
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

pub async fn vehicles(store: &SharedStore, filter: &VehicleFilter) -> Vec<Vehicle> {
    filter_vehicles(&store.read().await.vehicles, filter)
}

pub async fn exit_vehicle(store: &SharedStore, id: &str, at: String) -> Result<Vehicle, AppError> {
    let mut store = store.write().await;
    let vehicle = find_mut(&mut store.vehicles, id)?;
    vehicle.mark_exited(at)?;
    tracing::info!(id, "Vehicle exited");
    Ok(vehicle.clone())
}

pub async fn dashboard(store: &SharedStore) -> SecurityDashboard {
    let s = store.read().await;
    security_dashboard(&s.visitors, &s.patrols, &s.incidents, &s.vehicles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support::{day, store};
    use shared_types::{AppErrorKind, IncidentSeverity, PatrolStatus};

    fn visitor(name: &str) -> VisitorInput {
        VisitorInput {
            name: name.into(),
            contact: "9000011111".into(),
            vehicle_no: None,
            visiting_flat: "C-101".into(),
            purpose: Some("  ".into()),
        }
    }

    #[tokio::test]
    async fn visitor_defaults_to_na_and_inside() {
        let store = store();
        let v = add_visitor(&store, visitor("Meera Iyer"), "04:10 PM".into()).await.unwrap();
        assert_eq!(v.vehicle_no, "N/A");
        assert_eq!(v.purpose.as_deref(), Some("N/A"));
        assert_eq!(v.status, PresenceStatus::Inside);
        assert_eq!(visitors(&store, &VisitorFilter::default()).await[0].id, v.id);
    }

    #[tokio::test]
    async fn blank_name_adds_no_visitor() {
        let store = store();
        let err = add_visitor(&store, visitor(""), "04:10 PM".into()).await.unwrap_err();
        assert_eq!(
            err.field_errors.get("name").map(String::as_str),
            Some(VisitorInput::REQUIRED_MESSAGE)
        );
        let all = visitors(&store, &VisitorFilter { history: true, search: None }).await;
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn qr_exit_drains_inside_then_fails() {
        let store = store();
        assert_eq!(qr_exit(&store, "05:00 PM".into()).await.unwrap().id, "vis-2");
        assert_eq!(qr_exit(&store, "05:01 PM".into()).await.unwrap().id, "vis-4");
        let err = qr_exit(&store, "05:02 PM".into()).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        assert_eq!(err.message, NO_VISITORS_INSIDE);
    }

    #[tokio::test]
    async fn patrol_lifecycle() {
        let store = store();
        let p = schedule_patrol(
            &store,
            SchedulePatrolRequest {
                route_name: "Basement".into(),
                guard_name: "Ram Singh".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(p.status, PatrolStatus::Scheduled);
        let p = start_patrol(&store, &p.id, "10:00 PM".into()).await.unwrap();
        assert_eq!(p.status, PatrolStatus::InProgress);
        let p = end_patrol(&store, &p.id, "10:40 PM".into()).await.unwrap();
        assert_eq!(p.status, PatrolStatus::Completed);
        assert_eq!(p.end_time.as_deref(), Some("10:40 PM"));
    }

    #[tokio::test]
    async fn incident_report_and_dashboard() {
        let store = store();
        report_incident(
            &store,
            "Security Head",
            ReportIncidentRequest {
                title: "Broken lock".into(),
                description: "Side gate lock broken".into(),
                severity: IncidentSeverity::High,
            },
            day(2024, 8, 10),
            "01:00 AM".into(),
        )
        .await
        .unwrap();
        let d = dashboard(&store).await;
        assert_eq!(d.open_incidents, 2);
        assert_eq!(d.visitors_inside, 2);
        assert_eq!(d.patrols_in_progress, 1);
        assert_eq!(d.vehicles_inside, 4);

        set_incident_status(&store, "inc-2", IncidentStatus::Resolved).await.unwrap();
        assert_eq!(dashboard(&store).await.open_incidents, 1);
    }

    #[tokio::test]
    async fn vehicle_search_and_exit() {
        let store = store();
        let found = vehicles(&store, &VehicleFilter { search: Some("b-204".into()) }).await;
        assert_eq!(found.len(), 1);
        let v = exit_vehicle(&store, &found[0].id, "06:00 PM".into()).await.unwrap();
        assert_eq!(v.status, PresenceStatus::Exited);
    }

    #[tokio::test]
    async fn second_exit_keeps_first_out_time() {
        let store = store();
        let v = exit_visitor(&store, "vis-2", "01:00 PM".into()).await.unwrap();
        assert_eq!(v.out_time.as_deref(), Some("01:00 PM"));
        let err = exit_visitor(&store, "vis-2", "09:00 PM".into()).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
        let all = visitors(&store, &VisitorFilter { history: true, search: None }).await;
        let v = all.iter().find(|v| v.id == "vis-2").unwrap();
        assert_eq!(v.out_time.as_deref(), Some("01:00 PM"));

        let found = vehicles(&store, &VehicleFilter::default()).await;
        let inside = found.iter().find(|v| v.status == PresenceStatus::Inside).unwrap();
        exit_vehicle(&store, &inside.id, "02:00 PM".into()).await.unwrap();
        let err = exit_vehicle(&store, &inside.id, "03:00 PM".into()).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }

    #[tokio::test]
    async fn scheduled_patrol_cannot_be_ended() {
        let store = store();
        let scheduled = patrols(&store)
            .await
            .into_iter()
            .find(|p| p.status == PatrolStatus::Scheduled)
            .unwrap();
        let err = end_patrol(&store, &scheduled.id, "10:00 PM".into()).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
        let after = patrols(&store).await.into_iter().find(|p| p.id == scheduled.id).unwrap();
        assert_eq!(after.status, PatrolStatus::Scheduled);
        assert_eq!(after.end_time, None);
    }
}
