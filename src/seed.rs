/// Session seed: four measurement counts plus a cosmetic device id.
///
/// The counts come from a two-qubit Bell-pair measurement.  Roughly half of
/// the shots land in `00` and half in `11`; `01` and `10` only appear as
/// noise.  The game uses them purely as parameters for its random ranges.

use std::collections::HashMap;
use std::ops::{Range, RangeInclusive};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SeedError;

pub const DEFAULT_N00: i32 = 100;
pub const DEFAULT_N11: i32 = 100;
pub const DEFAULT_N01: i32 = 1;
pub const DEFAULT_N10: i32 = 1;

/// Cosmetic id used when the device is unrecognised or the measurement failed.
pub const UNKNOWN_DEVICE: &str = "unknown";

/// Raw result of one measurement job.
#[derive(Clone, Debug, Default)]
pub struct Measurement {
    /// Name of the device that ran the job.
    pub device: String,
    /// Outcome bitstring ("00", "11", "01", "10") to shot count.
    pub counts: HashMap<String, i64>,
}

/// Anything that can run the measurement.  Called once per process.
pub trait SeedSource {
    fn measure(&mut self) -> Result<Measurement, SeedError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSeed {
    pub cosmetic_id: String,
    pub n00: i32,
    pub n11: i32,
    pub n01: i32,
    pub n10: i32,
}

impl Default for SessionSeed {
    fn default() -> Self {
        Self {
            cosmetic_id: UNKNOWN_DEVICE.to_string(),
            n00: DEFAULT_N00,
            n11: DEFAULT_N11,
            n01: DEFAULT_N01,
            n10: DEFAULT_N10,
        }
    }
}

/// Largest count taken from a measurement.  Keeps every derived range
/// bound (`n + 12`, `-n + 40`) well inside `i32`.
pub const MAX_COUNT: i32 = 1_000_000;

fn count_or(value: Option<i64>, default: i32) -> i32 {
    match value {
        Some(v) if v > 0 => v.min(MAX_COUNT as i64) as i32,
        _ => default,
    }
}

impl SessionSeed {
    /// Build a seed, substituting the default for any count that is missing
    /// or not positive and capping the rest at [`MAX_COUNT`].
    pub fn from_counts(
        cosmetic_id: impl Into<String>,
        n00: Option<i64>,
        n11: Option<i64>,
        n01: Option<i64>,
        n10: Option<i64>,
    ) -> Self {
        Self {
            cosmetic_id: cosmetic_id.into(),
            n00: count_or(n00, DEFAULT_N00),
            n11: count_or(n11, DEFAULT_N11),
            n01: count_or(n01, DEFAULT_N01),
            n10: count_or(n10, DEFAULT_N10),
        }
    }

    pub fn from_measurement(m: &Measurement) -> Self {
        let get = |key: &str| m.counts.get(key).copied();
        Self::from_counts(
            cosmetic_for_device(&m.device),
            get("00"),
            get("11"),
            get("01"),
            get("10"),
        )
    }

    // ── Ranges ───────────────────────────────────────────────────────────────

    /// Top edge of an obstacle re-entering from above.
    pub fn respawn_top(&self) -> Range<i32> {
        -self.n00..-self.n00 + 40
    }

    /// Vertical speed for a freshly spawned obstacle.
    pub fn spawn_speed_y(&self) -> Range<i32> {
        self.n01..self.n01 + 12
    }

    /// Vertical speed for an obstacle re-entering after leaving the viewport.
    pub fn respawn_speed_y(&self) -> Range<i32> {
        self.n01..self.n01 + 10
    }

    /// Horizontal speed, the open interval (-n10, n10).
    pub fn speed_x(&self) -> RangeInclusive<i32> {
        (1 - self.n10)..=(self.n10 - 1)
    }

    /// Shield restored by a shield pickup.
    pub fn shield_heal(&self) -> Range<i32> {
        self.n11 - 10..self.n11
    }
}

/// Map a device name to the sprite variant drawn for the cosmetic obstacle.
pub fn cosmetic_for_device(device: &str) -> &'static str {
    match device {
        "ibmq_16_melbourne" => "melbourne",
        "ibmq_burlington" => "burlington",
        "ibmq_essex" => "essex",
        "ibmq_london" => "london",
        "ibmq_ourense" => "ourense",
        "ibmq_vigo" => "vigo",
        "ibmqx2" => "yorktown",
        _ => UNKNOWN_DEVICE,
    }
}

/// Run the measurement once and turn it into a session seed.  Never fails:
/// a source error yields the all-default seed.
pub fn fetch_session_seed(source: &mut impl SeedSource) -> SessionSeed {
    match source.measure() {
        Ok(m) => {
            log::info!("measurement ran on {}", m.device);
            let seed = SessionSeed::from_measurement(&m);
            for (key, value) in [("00", seed.n00), ("11", seed.n11), ("01", seed.n01), ("10", seed.n10)] {
                if m.counts.get(key).copied().unwrap_or(0) <= 0 {
                    log::warn!("{key} missing from measurement, using {value}");
                }
                log::info!("{key} has {value} counts");
            }
            seed
        }
        Err(e) => {
            log::warn!("seed source failed ({e}), using defaults");
            SessionSeed::default()
        }
    }
}

// ── Local simulated device ───────────────────────────────────────────────────

pub const DEVICE_ROSTER: [&str; 7] = [
    "ibmq_16_melbourne",
    "ibmq_burlington",
    "ibmq_essex",
    "ibmq_london",
    "ibmq_ourense",
    "ibmq_vigo",
    "ibmqx2",
];

/// Samples an entangled pair locally: each shot reads `00` or `11` with equal
/// odds, except that with probability `noise` a single bit flips.
pub struct SimulatedDevice<R: Rng> {
    rng: R,
    shots: u32,
    noise: f64,
}

impl<R: Rng> SimulatedDevice<R> {
    pub const DEFAULT_SHOTS: u32 = 200;
    pub const DEFAULT_NOISE: f64 = 0.03;

    pub fn new(rng: R) -> Self {
        Self {
            rng,
            shots: Self::DEFAULT_SHOTS,
            noise: Self::DEFAULT_NOISE,
        }
    }

    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise.clamp(0.0, 1.0);
        self
    }
}

impl<R: Rng> SeedSource for SimulatedDevice<R> {
    fn measure(&mut self) -> Result<Measurement, SeedError> {
        if self.shots == 0 {
            return Err(SeedError::Measurement("zero shots requested".into()));
        }
        let device = DEVICE_ROSTER
            .choose(&mut self.rng)
            .ok_or(SeedError::NoDevice)?
            .to_string();

        let mut counts: HashMap<String, i64> = HashMap::new();
        for _ in 0..self.shots {
            let correlated = self.rng.gen_bool(0.5);
            let flipped = self.rng.gen_bool(self.noise);
            let key = match (correlated, flipped) {
                (false, false) => "00",
                (true, false) => "11",
                (false, true) => "01",
                (true, true) => "10",
            };
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
        Ok(Measurement { device, counts })
    }
}
