// Domain layer: core models and ports (interfaces). External systems only
// appear here as traits; concrete implementations live under src/adapters.

pub mod model;
pub mod ports;
