//! Raw line sources.
//!
//! - `properties`: `.properties` text reader producing ordered raw entries

pub mod properties;
