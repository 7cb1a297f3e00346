use crate::{
    error::{NiteglowError, NiteglowResult},
    rng::{FrameRng, stable_hash64},
};

/// One fake dashboard stat: a display id, a value range, and formatting.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StatSpec {
    pub id: String,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub decimals: u8,
    #[serde(default)]
    pub suffix: String,
}

impl StatSpec {
    pub fn validate(&self) -> NiteglowResult<()> {
        if self.id.trim().is_empty() {
            return Err(NiteglowError::validation("stat id must be non-empty"));
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(NiteglowError::validation(format!(
                "stat '{}' bounds must be finite",
                self.id
            )));
        }
        if self.min > self.max {
            return Err(NiteglowError::validation(format!(
                "stat '{}' min must be <= max",
                self.id
            )));
        }
        Ok(())
    }

    fn format(&self, value: f64) -> String {
        if self.decimals == 0 {
            format!("{}{}", value.round() as i64, self.suffix)
        } else {
            format!("{:.*}{}", self.decimals as usize, value, self.suffix)
        }
    }
}

struct StatState {
    spec: StatSpec,
    rng: FrameRng,
    /// Fixed tick period, drawn once per stat in [2, 3) seconds.
    period: f64,
    next_tick: f64,
    value: f64,
    display: String,
}

/// Mutates displayed stat text at randomized intervals. Purely cosmetic;
/// nothing ever reads the values back.
pub struct LiveStatBoard {
    stats: Vec<StatState>,
    clock: f64,
}

impl LiveStatBoard {
    pub fn new(specs: Vec<StatSpec>, seed: u64) -> NiteglowResult<Self> {
        let mut stats = Vec::with_capacity(specs.len());
        for spec in specs {
            spec.validate()?;
            if stats
                .iter()
                .any(|s: &StatState| s.spec.id == spec.id)
            {
                return Err(NiteglowError::validation(format!(
                    "duplicate stat id '{}'",
                    spec.id
                )));
            }
            let mut rng = FrameRng::new(stable_hash64(seed, &spec.id));
            let period = rng.in_range(2.0, 3.0);
            let value = rng.in_range(spec.min, spec.max);
            let display = spec.format(value);
            stats.push(StatState {
                spec,
                rng,
                period,
                next_tick: period,
                value,
                display,
            });
        }
        Ok(Self { stats, clock: 0.0 })
    }

    pub fn advance(&mut self, dt: f64) {
        self.clock += dt.max(0.0);
        for s in &mut self.stats {
            while self.clock >= s.next_tick {
                s.value = s.rng.in_range(s.spec.min, s.spec.max);
                s.display = s.spec.format(s.value);
                s.next_tick += s.period;
            }
        }
    }

    /// Current display text, or `None` for an unknown id (missing element
    /// skip).
    pub fn text(&self, id: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|s| s.spec.id == id)
            .map(|s| s.display.as_str())
    }

    pub fn value(&self, id: &str) -> Option<f64> {
        self.stats.iter().find(|s| s.spec.id == id).map(|s| s.value)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.stats.iter().map(|s| s.spec.id.as_str())
    }
}
