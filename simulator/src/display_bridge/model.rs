use crate::workflow::config::NoiseRange;
use serde::{Deserialize, Serialize};

/// Body of `POST /noise`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseRequest {
    pub sigma: f64,
}

/// Reply of `GET /noise` and of an accepted `POST /noise`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseStatus {
    pub sigma: f64,
    pub adjustable: bool,
    pub range: NoiseRange,
}
