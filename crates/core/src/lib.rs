#![forbid(unsafe_code)]

pub mod access;
pub mod model;
pub mod time;

pub use time::Clock;
