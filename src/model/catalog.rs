//! Distribution parameter catalog
//!
//! Fixed parameters fitted offline against the measured dataset. Every
//! (class, quantity) pair has its own list of peak hours and two parameter
//! sets: one for peak hours, one for the rest of the day. There is no shared
//! peak calendar.
//!
//! Volumes are in bytes for the whole hour, inter-arrival times in seconds,
//! request counts per hour.

use super::class::{Hour, QuantityKind, UserClass};
use crate::distribution::{
    gamma::GammaDistribution, lognormal::LogNormalDistribution,
    negative_binomial::NegativeBinomialDistribution, weibull::WeibullDistribution, Distribution,
    ParameterError,
};

/// Distribution family with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Family {
    Weibull { shape: f64, scale: f64, location: f64 },
    Gamma { shape: f64, rate: f64, location: f64 },
    LogNormal { shape: f64, scale: f64, location: f64 },
    NegativeBinomial { size: f64, mean: f64 },
}

impl Family {
    pub fn name(&self) -> &'static str {
        match self {
            Family::Weibull { .. } => "Weibull",
            Family::Gamma { .. } => "Gamma",
            Family::LogNormal { .. } => "LogNormal",
            Family::NegativeBinomial { .. } => "NegativeBinomial",
        }
    }

    /// Instantiate a sampleable distribution
    pub fn build(&self) -> Result<Box<dyn Distribution>, ParameterError> {
        Ok(match *self {
            Family::Weibull { shape, scale, location } => {
                Box::new(WeibullDistribution::new(shape, scale, location)?)
            }
            Family::Gamma { shape, rate, location } => {
                Box::new(GammaDistribution::new(shape, rate, location)?)
            }
            Family::LogNormal { shape, scale, location } => {
                Box::new(LogNormalDistribution::new(shape, scale, location)?)
            }
            Family::NegativeBinomial { size, mean } => {
                Box::new(NegativeBinomialDistribution::new(size, mean)?)
            }
        })
    }
}

/// Parameters of one (class, quantity) pair
#[derive(Debug, Clone, Copy)]
pub struct QuantityEntry {
    pub peak_hours: &'static [u32],
    pub peak: Family,
    pub off_peak: Family,
}

impl QuantityEntry {
    pub fn is_peak(&self, hour: Hour) -> bool {
        self.peak_hours.contains(&hour.get())
    }

    /// Parameter set that applies to `peak`
    pub fn family(&self, peak: bool) -> Family {
        if peak {
            self.peak
        } else {
            self.off_peak
        }
    }
}

const fn weibull(shape: f64, scale: f64, location: f64) -> Family {
    Family::Weibull { shape, scale, location }
}

const fn gamma(shape: f64, rate: f64, location: f64) -> Family {
    Family::Gamma { shape, rate, location }
}

const fn lognormal(shape: f64, scale: f64, location: f64) -> Family {
    Family::LogNormal { shape, scale, location }
}

const fn nbinom(size: f64, mean: f64) -> Family {
    Family::NegativeBinomial { size, mean }
}

const DAYTIME: &[u32] = &[8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22];

/// Rows follow `UserClass` order, columns follow `QuantityKind` order
static CATALOG: [[QuantityEntry; 3]; 6] = [
    // HF
    [
        QuantityEntry {
            peak_hours: &[10, 11, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
            peak: weibull(0.819409132355671, 774639.610211396, 40.0),
            off_peak: weibull(0.634477150024807, 384935.669023795, 40.0),
        },
        QuantityEntry {
            peak_hours: &[1, 2, 3, 4, 5, 6],
            peak: lognormal(4.09174469261446, 1.12850165892419, 4.6875),
            off_peak: lognormal(3.93740014906562, 0.982210300411203, 3.0),
        },
        QuantityEntry {
            peak_hours: &[10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
            peak: nbinom(0.470368548315641, 34.7861725808564),
            off_peak: nbinom(0.143761308534382, 14.158264589062),
        },
    ],
    // HO
    [
        QuantityEntry {
            peak_hours: &[1, 2, 6, 7, 8, 9, 10, 14, 15, 16, 17, 18, 19, 21],
            peak: weibull(0.498273622342091, 476551.703412746, 30.0),
            off_peak: weibull(0.507073160695169, 452332.836400453, 30.0),
        },
        QuantityEntry {
            peak_hours: &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13],
            peak: gamma(1.25170029089175, 0.00178381168026473, 0.5),
            off_peak: gamma(1.20448161464647, 0.00177591076721503, 0.5),
        },
        QuantityEntry {
            peak_hours: &[10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
            peak: nbinom(0.113993444740046, 1.04026982546095),
            off_peak: nbinom(0.0448640346452827, 0.366034837767499),
        },
    ],
    // MF
    [
        QuantityEntry {
            peak_hours: &[10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22],
            peak: weibull(0.801202265360056, 13959.452422549, 37.0),
            off_peak: weibull(0.797283673532605, 10657.9935943482, 33.0),
        },
        QuantityEntry {
            peak_hours: &[1, 2, 3, 4, 5, 6, 7, 22, 23],
            peak: gamma(2.20816848575484, 0.00343216949000565, 1.0),
            off_peak: gamma(2.03011412986896, 0.00342699308280547, 1.0),
        },
        QuantityEntry {
            peak_hours: &[8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20],
            peak: nbinom(0.758889839349924, 4.83390315655562),
            off_peak: nbinom(0.314653746175354, 3.22861572712093),
        },
    ],
    // MO
    [
        QuantityEntry {
            peak_hours: &[1, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
            peak: weibull(0.596142171663733, 31936.8353050143, 29.0),
            off_peak: weibull(0.588535361156048, 26617.7612810844, 30.0),
        },
        QuantityEntry {
            peak_hours: &[1, 2, 3, 4, 5, 6],
            peak: gamma(1.29908195595742, 0.00163527376977441, 0.5),
            off_peak: gamma(1.19210494792398, 0.00170354443324898, 0.5),
        },
        QuantityEntry {
            peak_hours: DAYTIME,
            peak: nbinom(0.177211316065872, 0.406726610288464),
            off_peak: nbinom(0.0536955764781434, 0.124289074773539),
        },
    ],
    // LF
    [
        QuantityEntry {
            peak_hours: DAYTIME,
            peak: weibull(0.926450022452343, 1181.70293939011, 33.0),
            off_peak: weibull(1.03429757728009, 873.579218199549, 34.0),
        },
        QuantityEntry {
            peak_hours: &[1, 2, 3, 4, 5, 6, 7],
            peak: gamma(1.79297773527656, 0.00191590321039876, 2.0),
            off_peak: weibull(1.1988117443903, 827.961760834184, 1.0),
        },
        QuantityEntry {
            peak_hours: &[8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21],
            peak: nbinom(0.480203280455517, 0.978733578849008),
            off_peak: nbinom(0.240591506072217, 0.487956906502501),
        },
    ],
    // LO
    [
        QuantityEntry {
            peak_hours: &[1, 3, 4, 19, 20, 21, 22, 23],
            peak: weibull(0.856409898006734, 3228.75558535546, 29.0),
            off_peak: weibull(0.797856625454382, 2800.11615587819, 29.0),
        },
        QuantityEntry {
            peak_hours: &[2, 3, 4, 10, 11, 12, 13, 14, 15, 17, 18, 19, 20],
            peak: weibull(0.850890858519732, 548.241539446292, 1.0),
            off_peak: gamma(0.707816241615835, 0.00135537879658998, 1.0),
        },
        QuantityEntry {
            peak_hours: DAYTIME,
            peak: nbinom(0.188551092877969, 0.111187768162793),
            off_peak: nbinom(0.0810585648991726, 0.0405013083716073),
        },
    ],
];

/// Catalog entry for a (class, quantity) pair
pub fn entry(class: UserClass, kind: QuantityKind) -> &'static QuantityEntry {
    &CATALOG[class.index()][kind.index()]
}

/// Whether `hour` is a peak hour for this (class, quantity) pair
pub fn is_peak_hour(class: UserClass, kind: QuantityKind, hour: Hour) -> bool {
    entry(class, kind).is_peak(hour)
}

/// Parameters keyed by (class, quantity, peak flag)
pub fn family_for(class: UserClass, kind: QuantityKind, peak: bool) -> Family {
    entry(class, kind).family(peak)
}

/// Share of the measured user population in each class
///
/// Listed in band order: a uniform draw is matched against these widths
/// cumulatively, the last band taking whatever remains of [0, 1).
pub const CLASS_PROBABILITIES: [(UserClass, f64); 6] = [
    (UserClass::MO, 0.39444894558049604),   // 598340 users
    (UserClass::LO, 0.26755074985117683),   // 405848
    (UserClass::HO, 0.31970379082089073),   // 484959
    (UserClass::LF, 0.008566808249186994),  // 12995
    (UserClass::MF, 0.008291246429397832),  // 12577
    (UserClass::HF, 0.0014384590688515599), // 2182
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_probabilities_sum_to_one() {
        let total: f64 = CLASS_PROBABILITIES.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9, "probabilities sum to {}", total);
    }

    #[test]
    fn test_class_probabilities_cover_every_class() {
        for class in UserClass::ALL {
            assert_eq!(CLASS_PROBABILITIES.iter().filter(|(c, _)| *c == class).count(), 1);
        }
    }

    #[test]
    fn test_every_entry_builds() {
        for class in UserClass::ALL {
            for kind in QuantityKind::ALL {
                for peak in [true, false] {
                    family_for(class, kind, peak)
                        .build()
                        .unwrap_or_else(|e| panic!("{} {:?} peak={}: {}", class, kind, peak, e));
                }
            }
        }
    }

    #[test]
    fn test_peak_hours_within_day() {
        for class in UserClass::ALL {
            for kind in QuantityKind::ALL {
                for &hour in entry(class, kind).peak_hours {
                    assert!(Hour::new(hour).is_ok(), "{} {:?} lists hour {}", class, kind, hour);
                }
            }
        }
    }

    #[test]
    fn test_families_per_quantity() {
        for class in UserClass::ALL {
            for peak in [true, false] {
                assert_eq!(family_for(class, QuantityKind::Volume, peak).name(), "Weibull");
                assert_eq!(family_for(class, QuantityKind::RequestCount, peak).name(), "NegativeBinomial");
            }
        }
        assert_eq!(family_for(UserClass::HF, QuantityKind::InterArrivalTime, true).name(), "LogNormal");
        assert_eq!(family_for(UserClass::LF, QuantityKind::InterArrivalTime, true).name(), "Gamma");
        assert_eq!(family_for(UserClass::LF, QuantityKind::InterArrivalTime, false).name(), "Weibull");
        assert_eq!(family_for(UserClass::LO, QuantityKind::InterArrivalTime, true).name(), "Weibull");
        assert_eq!(family_for(UserClass::LO, QuantityKind::InterArrivalTime, false).name(), "Gamma");
    }

    #[test]
    fn test_hf_hour_14_peak_flags() {
        let hour = Hour::new(14).unwrap();
        assert!(is_peak_hour(UserClass::HF, QuantityKind::Volume, hour));
        assert!(is_peak_hour(UserClass::HF, QuantityKind::RequestCount, hour));
        // IAT peak hours for HF are the early morning ones
        assert!(!is_peak_hour(UserClass::HF, QuantityKind::InterArrivalTime, hour));
    }
}
