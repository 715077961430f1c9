//! Request planning.
//!
//! A parameter builder turns one descriptor and a [`QueryWindow`] into the
//! ordered list of requests to issue. Builders are pure: no I/O, no clock.

mod elexon;
mod entsoe;

use std::collections::BTreeMap;

pub use elexon::ElexonParameterBuilder;
pub use entsoe::EntsoeParameterBuilder;

use crate::QueryWindow;

/// One planned request: its query parameters and where its payload lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub params: BTreeMap<String, String>,
    pub logical_path: String,
}

impl Emission {
    pub fn new(params: BTreeMap<String, String>, logical_path: impl Into<String>) -> Self {
        Self {
            params,
            logical_path: logical_path.into(),
        }
    }
}

pub trait ParameterBuilder {
    type Descriptor;

    /// Emissions in non-decreasing date order (and period order within a
    /// day, where periods are expanded).
    fn build(&self, descriptor: &Self::Descriptor, window: &QueryWindow) -> Vec<Emission>;
}
