//! Text-keyed views of kernel results for binding layers that cannot marshal composite keys.
//!
//! Keys are encoded with [`TripletKey`]'s `Display` form, `"i,j,k"`, and can be decoded
//! again with `str::parse::<TripletKey>()`.

use crate::core::models::keys::TripletKey;
use crate::engine::kernel::GeometryKernel;
use std::collections::BTreeMap;

/// Re-keys a triplet map by the `"i,j,k"` text form of each key.
pub fn string_keyed(values: &BTreeMap<TripletKey, f64>) -> BTreeMap<String, f64> {
    values
        .iter()
        .map(|(key, &value)| (key.to_string(), value))
        .collect()
}

impl GeometryKernel {
    /// [`GeometryKernel::angle_cosines`] keyed by `"i,j,k"` strings.
    pub fn angle_cosines_string_keyed(&self) -> BTreeMap<String, f64> {
        string_keyed(&self.angle_cosines())
    }
}
