//! Distribution selection
//!
//! Looks up the catalog for a (class, hour, quantity) triple and instantiates
//! the matching distribution. Selection is a pure function of the catalog.

use super::catalog;
use super::class::{Hour, QuantityKind, UserClass};
use super::Error;
use crate::distribution::Distribution;

/// Instantiate the distribution for `kind` at `hour` for `class`
pub fn select(class: UserClass, hour: Hour, kind: QuantityKind) -> Result<Box<dyn Distribution>, Error> {
    let peak = catalog::is_peak_hour(class, kind, hour);
    Ok(catalog::family_for(class, kind, peak).build()?)
}

/// Same as [`select`], starting from an unparsed class label and raw hour
///
/// Fails with [`Error::UnknownClass`] for any label other than the six
/// classes, and with [`Error::InvalidHour`] outside 1..=23.
pub fn select_label(label: &str, hour: u32, kind: QuantityKind) -> Result<Box<dyn Distribution>, Error> {
    let class: UserClass = label.parse()?;
    select(class, Hour::new(hour)?, kind)
}
