//! Simulation time model.
//!
//! # Design
//!
//! The simulator counts time in integer picoseconds.  Two newtypes keep the
//! two uses of that integer apart:
//!
//! - [`AbsTime`] — a point on the simulation timeline (the host's "now", the
//!   time a timer fires at).
//! - [`RelTime`] — a duration (pin transition delays, timer delays).
//!
//! `AbsTime + RelTime = AbsTime` and `AbsTime - AbsTime = RelTime`; the other
//! combinations are deliberately not implemented.

use std::fmt;

/// Picoseconds per nanosecond.
pub const PS_PER_NS: u64 = 1_000;
/// Picoseconds per microsecond.
pub const PS_PER_US: u64 = 1_000_000;
/// Picoseconds per millisecond.
pub const PS_PER_MS: u64 = 1_000_000_000;
/// Picoseconds per second.
pub const PS_PER_SEC: u64 = 1_000_000_000_000;

// ── AbsTime ──────────────────────────────────────────────────────────────────

/// An absolute simulation time in picoseconds.
///
/// A `u64` of picoseconds spans roughly 213 days of simulated time, far longer
/// than any interactive circuit simulation runs.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbsTime(pub u64);

impl AbsTime {
    pub const ZERO: AbsTime = AbsTime(0);

    /// Time elapsed from `earlier` to `self`, or `None` if `earlier` is later.
    #[inline]
    pub fn checked_since(self, earlier: AbsTime) -> Option<RelTime> {
        self.0.checked_sub(earlier.0).map(RelTime)
    }

    /// Seconds since simulation start, for display.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / PS_PER_SEC as f64
    }
}

impl std::ops::Add<RelTime> for AbsTime {
    type Output = AbsTime;
    #[inline]
    fn add(self, rhs: RelTime) -> AbsTime {
        AbsTime(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign<RelTime> for AbsTime {
    #[inline]
    fn add_assign(&mut self, rhs: RelTime) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for AbsTime {
    type Output = RelTime;
    /// # Panics
    /// Panics in debug mode if `rhs > self`.
    #[inline]
    fn sub(self, rhs: AbsTime) -> RelTime {
        RelTime(self.0 - rhs.0)
    }
}

impl fmt::Display for AbsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", RelTime(self.0))
    }
}

// ── RelTime ──────────────────────────────────────────────────────────────────

/// A duration in picoseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelTime(pub u64);

impl RelTime {
    pub const ZERO: RelTime = RelTime(0);

    #[inline]
    pub const fn from_picos(ps: u64) -> RelTime {
        RelTime(ps)
    }

    #[inline]
    pub const fn from_nanos(ns: u64) -> RelTime {
        RelTime(ns * PS_PER_NS)
    }

    #[inline]
    pub const fn from_micros(us: u64) -> RelTime {
        RelTime(us * PS_PER_US)
    }

    #[inline]
    pub const fn from_millis(ms: u64) -> RelTime {
        RelTime(ms * PS_PER_MS)
    }

    /// Convert fractional seconds, rounding to the nearest picosecond.
    ///
    /// Negative and NaN inputs clamp to zero; values beyond the `u64` range
    /// saturate.
    pub fn from_secs_f64(secs: f64) -> RelTime {
        let ps = (secs * PS_PER_SEC as f64).round();
        if ps.is_nan() || ps <= 0.0 {
            RelTime::ZERO
        } else {
            // `as` saturates for out-of-range floats.
            RelTime(ps as u64)
        }
    }

    #[inline]
    pub fn as_picos(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / PS_PER_SEC as f64
    }
}

impl std::ops::Add for RelTime {
    type Output = RelTime;
    #[inline]
    fn add(self, rhs: RelTime) -> RelTime {
        RelTime(self.0 + rhs.0)
    }
}

impl std::ops::Mul<u64> for RelTime {
    type Output = RelTime;
    #[inline]
    fn mul(self, rhs: u64) -> RelTime {
        RelTime(self.0 * rhs)
    }
}

impl fmt::Display for RelTime {
    /// Prints the value in the largest unit that represents it exactly
    /// (`5ns`, `250us`, `1200ps`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [(u64, &str); 4] = [
            (PS_PER_SEC, "s"),
            (PS_PER_MS, "ms"),
            (PS_PER_US, "us"),
            (PS_PER_NS, "ns"),
        ];
        if self.0 == 0 {
            return write!(f, "0s");
        }
        for (scale, unit) in UNITS {
            if self.0 % scale == 0 {
                return write!(f, "{}{unit}", self.0 / scale);
            }
        }
        write!(f, "{}ps", self.0)
    }
}
