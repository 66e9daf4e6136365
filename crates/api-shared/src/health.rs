use crate::dto::HealthRes;
use curecast_core::PredictionService;

/// Health reporting shared by the REST server and the CLI.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Report that the service is up, with the sizes of what was loaded at startup.
    ///
    /// # Returns
    /// A `HealthRes` describing the loaded vocabulary, catalog and model.
    pub fn check_health(service: &PredictionService) -> HealthRes {
        HealthRes {
            ok: true,
            message: "CureCast is alive".into(),
            symptoms: service.vocabulary().len(),
            diseases: service.catalog().len(),
            classes: service.n_classes(),
            accuracy: service.accuracy(),
        }
    }
}
