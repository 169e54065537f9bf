//! Per-hour traffic model

use super::class::{Hour, QuantityKind, UserClass};
use super::selector::select;
use super::Error;
use crate::distribution::{Distribution, SimRng};

/// The three distributions that drive one (class, hour)
///
/// Built once when a user is created and never modified afterwards.
#[derive(Debug)]
pub struct TrafficModel {
    hour: Hour,
    /// Whole-hour byte volume
    volume: Box<dyn Distribution>,
    /// Seconds between requests
    iat: Box<dyn Distribution>,
    /// Requests in the hour
    count: Box<dyn Distribution>,
}

impl TrafficModel {
    pub fn new(class: UserClass, hour: Hour) -> Result<Self, Error> {
        Ok(Self {
            hour,
            volume: select(class, hour, QuantityKind::Volume)?,
            iat: select(class, hour, QuantityKind::InterArrivalTime)?,
            count: select(class, hour, QuantityKind::RequestCount)?,
        })
    }

    pub fn hour(&self) -> Hour {
        self.hour
    }

    pub fn volume(&self) -> &dyn Distribution {
        self.volume.as_ref()
    }

    pub fn iat(&self) -> &dyn Distribution {
        self.iat.as_ref()
    }

    pub fn count(&self) -> &dyn Distribution {
        self.count.as_ref()
    }

    /// Draw the number of requests for the hour
    pub fn draw_count(&self, rng: &mut SimRng) -> usize {
        self.count.sample(rng) as usize
    }
}
