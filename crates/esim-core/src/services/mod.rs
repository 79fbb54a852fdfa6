//! Services orchestrating domain logic over the platform ports.

mod gateway;

pub use gateway::EsimGateway;
