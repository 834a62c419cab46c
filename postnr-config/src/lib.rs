//! Configuration loading and shared configuration types for postnr services.

pub mod environment;
pub mod load;
pub mod shared;
