//! Price and indoor-temperature signals fed to the runner each tick.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Two-level tariff: `peak_price` inside `[peak_start_hour, peak_end_hour)`,
/// `base_price` elsewhere. The window wraps past midnight when start > end.
#[derive(Debug, Clone, Copy)]
pub struct PriceProfile {
    pub base_price: f64,
    pub peak_price: f64,
    pub peak_start_hour: u32,
    pub peak_end_hour: u32,
}

impl PriceProfile {
    pub fn is_peak(&self, hour: u32) -> bool {
        if self.peak_start_hour <= self.peak_end_hour {
            hour >= self.peak_start_hour && hour < self.peak_end_hour
        } else {
            hour >= self.peak_start_hour || hour < self.peak_end_hour
        }
    }

    /// Price for the given hour of day.
    pub fn price_at(&self, hour: u32) -> f64 {
        if self.is_peak(hour) {
            self.peak_price
        } else {
            self.base_price
        }
    }
}

/// Sinusoidal daily indoor temperature with Gaussian noise.
///
/// # Examples
///
/// ```
/// use home_ems::sim::profile::TemperatureProfile;
///
/// let mut temp = TemperatureProfile::new(22.0, 3.0, 0.0, 0.0, 24, 42);
/// let t0 = temp.temperature_at(0);
/// assert!((t0 - 22.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct TemperatureProfile {
    /// Daily mean temperature.
    pub mean: f64,
    /// Swing amplitude around the mean.
    pub amplitude: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Standard deviation of the Gaussian noise.
    pub noise_std: f64,
    /// Ticks per simulated day.
    pub steps_per_day: usize,
    rng: StdRng,
}

impl TemperatureProfile {
    pub fn new(
        mean: f64,
        amplitude: f64,
        phase_rad: f64,
        noise_std: f64,
        steps_per_day: usize,
        seed: u64,
    ) -> Self {
        Self {
            mean,
            amplitude,
            phase_rad,
            noise_std,
            steps_per_day: steps_per_day.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Temperature at tick `t`. Advances the noise generator.
    pub fn temperature_at(&mut self, t: usize) -> f64 {
        let day_frac = (t % self.steps_per_day) as f64 / self.steps_per_day as f64;
        let swing = self.amplitude * (2.0 * PI * day_frac - self.phase_rad).sin();
        let noise = gaussian_noise(&mut self.rng, self.noise_std);
        self.mean + swing + noise
    }
}

/// Gaussian noise via the Box-Muller transform.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    z0 * std_dev
}
