// Domain layer: directory records, output formats and the ports the engine talks through.

pub mod model;
pub mod ports;
