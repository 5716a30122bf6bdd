use crate::wire::HealthRes;

/// Simple health service used by the REST API.
///
/// Reports liveness only; it does not touch the data file.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "ok".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serialises_status_ok() {
        let value = serde_json::to_value(HealthService::check_health()).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "ok" }));
    }
}
