//! Per-user traffic synthesis
//!
//! A [`User`] owns one [`TrafficModel`] per modeled hour and, once generated,
//! the request records of every hour. Each hour is synthesized independently:
//!
//! 1. Draw the request count `n`.
//! 2. Draw `n` inter-arrival times. Count and inter-arrival times come from
//!    independent distributions, so their sum can overflow the hour. The whole
//!    vector is redrawn until it fits or the attempt cap is reached, in which
//!    case the last draw is kept.
//! 3. Drop requests off the end while the total reaches the end of the hour.
//! 4. Accumulate the inter-arrival times into offsets and timestamps.
//! 5. Draw one whole-hour volume and split it evenly over the `n` requests.
//!
//! Records within an hour are chronological by construction, and hours are
//! stored in order, so the user's full stream is chronological as well.

use crate::distribution::{seeded_rng, Distribution, SimRng};
use crate::model::{Error, Hour, TrafficModel, UserClass};
use crate::stats::GenerationStats;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Seconds in one modeled hour
pub const HOUR_SECONDS: f64 = 3600.0;

/// Default cap on full-vector inter-arrival redraws per hour
pub const DEFAULT_MAX_RESAMPLE_ATTEMPTS: u32 = 100_000;

/// Knobs of the synthesis algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPolicy {
    /// Redraws allowed before falling back to trimming; 0 trims right away
    pub max_resample_attempts: u32,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            max_resample_attempts: DEFAULT_MAX_RESAMPLE_ATTEMPTS,
        }
    }
}

/// One synthetic request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Request {
    /// Bytes
    pub size: f64,
    pub timestamp: NaiveDateTime,
}

/// Records of one hour
///
/// The three sequences are always the same length and index-aligned.
#[derive(Debug, Clone, Default)]
pub struct HourTrace {
    offsets: Vec<f64>,
    timestamps: Vec<NaiveDateTime>,
    sizes: Vec<f64>,
}

impl HourTrace {
    /// Seconds since the start of the hour
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Bytes per request
    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    fn clear(&mut self) {
        self.offsets.clear();
        self.timestamps.clear();
        self.sizes.clear();
    }
}

/// Result of drawing the inter-arrival vector for one hour
#[derive(Debug)]
struct InterArrivals {
    values: Vec<f64>,
    redraws: u32,
    exhausted: bool,
}

/// A synthetic user
#[derive(Debug)]
pub struct User {
    uid: u64,
    class: UserClass,
    initial_date: NaiveDate,
    /// Indexed by `Hour::slot`
    models: Vec<TrafficModel>,
    hours: Vec<HourTrace>,
    stats: GenerationStats,
}

impl User {
    /// Build a user and its 23 traffic models
    pub fn new(uid: u64, class: UserClass, initial_date: NaiveDate) -> Result<Self, Error> {
        let models = Hour::all()
            .map(|hour| TrafficModel::new(class, hour))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            uid,
            class,
            initial_date,
            models,
            hours: vec![HourTrace::default(); Hour::COUNT],
            stats: GenerationStats::default(),
        })
    }

    /// Build a user from a class label
    pub fn from_label(uid: u64, label: &str, initial_date: NaiveDate) -> Result<Self, Error> {
        Self::new(uid, label.parse()?, initial_date)
    }

    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn class(&self) -> UserClass {
        self.class
    }

    pub fn initial_date(&self) -> NaiveDate {
        self.initial_date
    }

    pub fn model(&self, hour: Hour) -> &TrafficModel {
        &self.models[hour.slot()]
    }

    pub fn hour(&self, hour: Hour) -> &HourTrace {
        &self.hours[hour.slot()]
    }

    /// Counters from the last generation
    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Generate all hours with an RNG seeded by the user id
    pub fn generate_seeded(&mut self, policy: &GenerationPolicy) -> &GenerationStats {
        let mut rng = seeded_rng(self.uid);
        self.generate(&mut rng, policy)
    }

    /// Generate all hours, replacing any earlier records
    ///
    /// Hours 1 through 23 are generated in order from the same stream: for
    /// each hour the request count is drawn, then the inter-arrival vector
    /// (redrawn whole until it fits the hour or the policy's cap is reached),
    /// then, if any request survives trimming, one volume for the hour.
    ///
    /// # Arguments
    ///
    /// * `rng` - Stream every draw is taken from; the same starting state
    ///   always yields the same records
    /// * `policy` - Resampling cap; hours that hit it are trimmed and counted
    ///   in [`GenerationStats::exhausted_hours`]
    ///
    /// # Returns
    ///
    /// Counters for this generation, also available later via [`User::stats`].
    ///
    /// # Example
    ///
    /// ```
    /// use synthtraffic::distribution::seeded_rng;
    /// use synthtraffic::generator::{GenerationPolicy, User};
    /// use synthtraffic::model::UserClass;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2013, 8, 25).unwrap();
    /// let mut user = User::new(7, UserClass::MO, date).unwrap();
    /// let policy = GenerationPolicy { max_resample_attempts: 1_000 };
    ///
    /// let requests = user.generate(&mut seeded_rng(7), &policy).requests;
    /// assert_eq!(requests as usize, user.request_count());
    /// ```
    pub fn generate(&mut self, rng: &mut SimRng, policy: &GenerationPolicy) -> &GenerationStats {
        log::debug!("Generating synthetic traffic for user {} ({})", self.uid, self.class);

        self.stats = GenerationStats::default();
        for trace in &mut self.hours {
            trace.clear();
        }

        for hour in Hour::all() {
            let n = self.model(hour).draw_count(rng);
            self.generate_hour(hour, n, rng, policy);
        }

        &self.stats
    }

    /// Synthesize one hour with a request count already drawn
    pub(crate) fn generate_hour(&mut self, hour: Hour, n: usize, rng: &mut SimRng, policy: &GenerationPolicy) {
        if n == 0 {
            return;
        }

        let model = &self.models[hour.slot()];
        let mut draw = draw_inter_arrivals(model.iat(), n, rng, policy);
        if draw.exhausted {
            log::warn!(
                "User {} hour {}: inter-arrival resampling exhausted after {} attempts for {} requests, trimming",
                self.uid,
                hour,
                draw.redraws,
                n
            );
        }

        let offsets = trim_to_hour(&mut draw.values);
        let kept = offsets.len();
        let trimmed = n - kept;
        if trimmed > 0 {
            log::debug!("User {} hour {}: trimmed {} of {} requests", self.uid, hour, trimmed, n);
        }

        let mut volume = 0.0;
        if kept > 0 {
            // The volume distribution describes the whole hour
            volume = model.volume().sample(rng);
            let share = volume / kept as f64;

            let start = hour_start(self.initial_date, hour);
            let trace = &mut self.hours[hour.slot()];
            trace.timestamps.extend(offsets.iter().map(|&offset| start + offset_duration(offset)));
            trace.sizes.extend(std::iter::repeat(share).take(kept));
            trace.offsets.extend(offsets);
        }

        self.stats
            .record_hour(kept, volume, draw.redraws as u64, trimmed, draw.exhausted);
    }

    /// Every request of the day in chronological order
    pub fn requests(&self) -> impl Iterator<Item = Request> + '_ {
        self.hours.iter().flat_map(|trace| {
            trace
                .sizes
                .iter()
                .zip(trace.timestamps.iter())
                .map(|(&size, &timestamp)| Request { size, timestamp })
        })
    }

    /// Number of generated requests over the day
    pub fn request_count(&self) -> usize {
        self.hours.iter().map(HourTrace::len).sum()
    }
}

/// Draw `n` inter-arrival times, redrawing the whole vector until it fits
fn draw_inter_arrivals(iat: &dyn Distribution, n: usize, rng: &mut SimRng, policy: &GenerationPolicy) -> InterArrivals {
    if n == 1 {
        return InterArrivals {
            values: vec![iat.sample(rng)],
            redraws: 0,
            exhausted: false,
        };
    }

    let mut values = iat.sample_n(rng, n);
    let mut redraws = 0;
    while total(&values) > HOUR_SECONDS && redraws < policy.max_resample_attempts {
        iat.sample_into(rng, n, &mut values);
        redraws += 1;
    }

    let exhausted = total(&values) > HOUR_SECONDS;
    InterArrivals {
        values,
        redraws,
        exhausted,
    }
}

#[inline]
fn total(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Turn inter-arrival times into offsets, dropping the tail that reaches the
/// end of the hour
///
/// Equivalent to popping the last element while the sum is at least
/// [`HOUR_SECONDS`]; inter-arrival times are non-negative, so the running sum
/// only grows.
fn trim_to_hour(inter_arrivals: &mut Vec<f64>) -> Vec<f64> {
    let mut elapsed = 0.0;
    let offsets: Vec<f64> = inter_arrivals
        .iter()
        .map(|&iat| {
            elapsed += iat;
            elapsed
        })
        .take_while(|&offset| offset < HOUR_SECONDS)
        .collect();

    inter_arrivals.truncate(offsets.len());
    offsets
}

fn hour_start(date: NaiveDate, hour: Hour) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(hour.get() as i64)
}

/// Offset in seconds to a microsecond-resolution duration, truncated so an
/// offset below the end of the hour never rounds into the next one
fn offset_duration(offset: f64) -> Duration {
    Duration::microseconds((offset * 1_000_000.0) as i64)
}
