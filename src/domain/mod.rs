// Domain layer: models and ports (interfaces), std and serde only.

pub mod model;
pub mod ports;
