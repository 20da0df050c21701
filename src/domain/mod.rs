// Domain layer: core models and ports (interfaces). No external dependencies beyond std/serde/url.

pub mod model;
pub mod ports;
