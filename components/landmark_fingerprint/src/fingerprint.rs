use std::fmt;

use serde::{Deserialize, Serialize};
use spectral_primitives::EventPoint;

use crate::FingerprintError;

/// Two equally-hashed fingerprints whose start frames are closer than this
/// are treated as detections of the same acoustic event.
pub const SAME_EVENT_FRAME_TOLERANCE: u32 = 100;

/// A landmark pair: two spectral event points linked into one hashable unit.
///
/// Both points are (analysis frame index, frequency bin index) integers.
/// The pair always runs forward in time; constructing one with `t2 <= t1`
/// fails rather than swapping or clamping the values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    t1: u32,
    f1: u32,
    t2: u32,
    f2: u32,
    energy: f64,
}

impl Fingerprint {
    pub fn new(t1: u32, f1: u32, t2: u32, f2: u32) -> Result<Self, FingerprintError> {
        if t2 <= t1 {
            return Err(FingerprintError::InvalidTimeOrder { t1, t2 });
        }
        Ok(Self {
            t1,
            f1,
            t2,
            f2,
            energy: 0.0,
        })
    }

    /// Link two event points, earlier one first.
    pub fn from_event_points(
        first: EventPoint,
        second: EventPoint,
    ) -> Result<Self, FingerprintError> {
        Self::new(first.t, first.f, second.t, second.f)
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    pub fn t1(&self) -> u32 {
        self.t1
    }

    pub fn f1(&self) -> u32 {
        self.f1
    }

    pub fn t2(&self) -> u32 {
        self.t2
    }

    pub fn f2(&self) -> u32 {
        self.f2
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Frames between the two events.
    pub fn time_delta(&self) -> u32 {
        self.t2 - self.t1
    }

    /// Pack this fingerprint into its 22-bit hash code.
    ///
    /// 8 bits locate the first frequency component, 8 bits hold the
    /// truncated frequency delta and 7 bits the truncated time delta:
    /// `(f1 & 0xFF) << 15 | (|Δf| & 0xFF) << 7 | (|Δt| & 0x7F)`.
    /// A downward frequency movement (`f1 > f2`) negates the result; that
    /// sign is all that survives of the delta's direction. The truncation
    /// makes the code collision-prone on purpose: nearby landmark pairs
    /// share codes, and the matching statistic absorbs the collisions.
    pub fn hash(&self) -> i32 {
        let f_part = self.f1 & 0xFF;
        let delta_f = self.f1.abs_diff(self.f2) & 0xFF;
        let delta_t = self.time_delta() & 0x7F;
        let packed = ((f_part << 15) + (delta_f << 7) + delta_t) as i32;
        if self.f1 > self.f2 {
            -packed
        } else {
            packed
        }
    }

    /// Whether this fingerprint and `other` look like the same acoustic
    /// event: equal hash codes and start frames within
    /// [`SAME_EVENT_FRAME_TOLERANCE`] of each other.
    ///
    /// This is deliberately not the identity used by hash-keyed lookups.
    /// The matcher keys its maps on the packed hash alone, so two prints
    /// far apart in time can share a map slot while failing this check.
    /// Keep the two notions separate.
    pub fn same_event(&self, other: &Fingerprint) -> bool {
        self.hash() == other.hash() && self.t1.abs_diff(other.t1) < SAME_EVENT_FRAME_TOLERANCE
    }
}

/// Canonical `"t1,f1,t2,f2,hash"` rendering for logs and debugging.
impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.t1,
            self.f1,
            self.t2,
            self.f2,
            self.hash()
        )
    }
}

/// The three truncated fields packed into a fingerprint hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParts {
    pub f1: u32,
    pub delta_f: u32,
    pub delta_t: u32,
}

/// Split a packed hash back into its truncated fields.
///
/// Inspection aid only, not an inverse of [`Fingerprint::hash`]. The fields
/// come back exactly as packed: `f1` modulo 256, the deltas modulo their
/// bit widths, and no sign. The original `f1, f2, t1, t2` were lost to
/// truncation at encoding time, so `reverse_hash(print.hash())` never
/// reconstructs `print`.
pub fn reverse_hash(hash: i32) -> HashParts {
    let magnitude = hash.unsigned_abs();
    HashParts {
        f1: magnitude >> 15,
        delta_f: (magnitude >> 7) & 0xFF,
        delta_t: magnitude & 0x7F,
    }
}
