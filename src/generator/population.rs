//! Population generation
//!
//! Assigns a behavioral class to every user id and hands out users (or units
//! of work) lazily. Classes are drawn from one RNG seeded with the global
//! seed: one uniform draw in [0, 1) per uid, matched against contiguous bands
//! whose widths are the measured class shares.
//!
//! A class override for a uid replaces the drawn class but does not skip the
//! draw, so overriding one user never shifts the classes of the others.

use crate::distribution::{seeded_rng, SimRng};
use crate::generator::user::User;
use crate::model::catalog::CLASS_PROBABILITIES;
use crate::model::{Error, UserClass};
use chrono::NaiveDate;
use rand::Rng;
use std::collections::BTreeMap;

/// Global seed used when none is configured
pub const DEFAULT_GLOBAL_SEED: u64 = 1234;

/// Class for a uniform draw in [0, 1)
pub fn classify(draw: f64) -> UserClass {
    let mut upper = 0.0;
    for (class, probability) in &CLASS_PROBABILITIES[..CLASS_PROBABILITIES.len() - 1] {
        upper += probability;
        if draw < upper {
            return *class;
        }
    }
    CLASS_PROBABILITIES[CLASS_PROBABILITIES.len() - 1].0
}

/// Where a user's class comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassChoice {
    /// Drawn from the class bands
    Drawn(UserClass),
    /// Configured label, parsed when the user is built
    Forced(String),
}

impl ClassChoice {
    pub fn resolve(&self) -> Result<UserClass, Error> {
        match self {
            ClassChoice::Drawn(class) => Ok(*class),
            ClassChoice::Forced(label) => label.parse(),
        }
    }
}

/// One user's unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserJob {
    pub uid: u64,
    pub class: ClassChoice,
}

impl UserJob {
    /// Build the user this job describes
    pub fn build(&self, initial_date: NaiveDate) -> Result<User, Error> {
        User::new(self.uid, self.class.resolve()?, initial_date)
    }
}

/// Lazy sequence of (uid, class) pairs
#[derive(Debug)]
pub struct Assignments {
    rng: SimRng,
    next: u64,
    end: u64,
}

impl Iterator for Assignments {
    type Item = (u64, UserClass);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let uid = self.next;
        self.next += 1;
        Some((uid, classify(self.rng.gen::<f64>())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Assignments {}

/// A population of synthetic users
#[derive(Debug, Clone)]
pub struct Population {
    size: u64,
    global_seed: u64,
    overrides: BTreeMap<u64, String>,
}

impl Population {
    pub fn new(size: u64, global_seed: u64) -> Self {
        Self {
            size,
            global_seed,
            overrides: BTreeMap::new(),
        }
    }

    /// Force the class label of specific uids
    pub fn with_overrides(mut self, overrides: BTreeMap<u64, String>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn global_seed(&self) -> u64 {
        self.global_seed
    }

    /// Drawn classes for uids `0..size`, ignoring overrides
    pub fn assignments(&self) -> Assignments {
        Assignments {
            rng: seeded_rng(self.global_seed),
            next: 0,
            end: self.size,
        }
    }

    /// Units of work for uids `0..size`, overrides applied
    ///
    /// The sequence is lazy: one class draw is taken from the population RNG
    /// per job, in uid order, whether or not the uid is overridden. Jobs are
    /// independent of each other and can be run in any order or in parallel.
    ///
    /// # Returns
    ///
    /// Exactly `size` jobs with uids `0, 1, .., size - 1`. A forced class is
    /// carried as its raw label and only parsed by [`UserJob::build`], so an
    /// unknown label fails that job alone.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use synthtraffic::generator::{ClassChoice, Population};
    ///
    /// let mut overrides = BTreeMap::new();
    /// overrides.insert(1, "HF".to_string());
    /// let population = Population::new(3, 1234).with_overrides(overrides);
    ///
    /// let jobs: Vec<_> = population.jobs().collect();
    /// assert_eq!(jobs.len(), 3);
    /// assert_eq!(jobs[1].class, ClassChoice::Forced("HF".into()));
    /// ```
    pub fn jobs(&self) -> impl Iterator<Item = UserJob> + '_ {
        self.assignments().map(move |(uid, drawn)| {
            let class = match self.overrides.get(&uid) {
                Some(label) => ClassChoice::Forced(label.clone()),
                None => ClassChoice::Drawn(drawn),
            };
            UserJob { uid, class }
        })
    }

    /// Users for uids `0..size`, built lazily
    pub fn users(&self, initial_date: NaiveDate) -> impl Iterator<Item = Result<User, Error>> + '_ {
        self.jobs().map(move |job| job.build(initial_date))
    }
}
