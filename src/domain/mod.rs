// Domain layer: quote input, pricing tables and ports. No I/O here.

pub mod form;
pub mod model;
pub mod ports;
pub mod rates;
