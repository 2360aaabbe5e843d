// Domain layer: result-set and record models plus the ports the core talks through.

pub mod model;
pub mod ports;
