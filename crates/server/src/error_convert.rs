use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Convert an AppError into a ServerFnError by serializing as JSON, so the
/// client can recover the kind and field errors with `AppError::from_server_error`.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;

    #[test]
    fn server_fn_error_round_trips_kind() {
        let err = AppError::forbidden("Admin or Secretary role required");
        let sfe = err.into_server_fn_error();
        let parsed = AppError::from_server_error(&sfe.to_string()).unwrap();
        assert_eq!(parsed.kind, AppErrorKind::Forbidden);
        assert_eq!(parsed.message, "Admin or Secretary role required");
    }

    #[test]
    fn validate_request_maps_field_errors() {
        let req = shared_types::SchedulePatrolRequest {
            route_name: " ".into(),
            guard_name: "Ram Singh".into(),
        };
        let err = req.validate_request().unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert!(err.field_errors.contains_key("route_name"));
    }
}
