//! Application state

pub mod atm;
