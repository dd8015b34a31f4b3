// Signal primitives shared by every synthesizer
use rand::Rng;

/// Shape of one synthetic analog channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalProfile {
    pub base: f64,
    pub amplitude: f64,
    pub angular_frequency: f64,
    pub noise_spread: f64,
    pub precision: u32,
}

impl SignalProfile {
    pub const fn new(
        base: f64,
        amplitude: f64,
        angular_frequency: f64,
        noise_spread: f64,
        precision: u32,
    ) -> Self {
        Self {
            base,
            amplitude,
            angular_frequency,
            noise_spread,
            precision,
        }
    }

    /// Sample the profile at `t` and round to the channel precision.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, t: f64) -> f64 {
        let raw = noisy_signal(
            rng,
            self.base,
            self.amplitude,
            self.angular_frequency,
            t,
            self.noise_spread,
        );
        round_to(raw, self.precision)
    }

    /// Largest distance a sample can land from `base`.
    pub fn max_deviation(&self) -> f64 {
        self.amplitude.abs() + self.noise_spread.abs() / 2.0
    }
}

/// `base + amplitude * sin(angular_frequency * t)` plus uniform noise in
/// `[-noise_spread / 2, noise_spread / 2)`.
pub fn noisy_signal<R: Rng + ?Sized>(
    rng: &mut R,
    base: f64,
    amplitude: f64,
    angular_frequency: f64,
    t: f64,
    noise_spread: f64,
) -> f64 {
    base + amplitude * (angular_frequency * t).sin() + centered_noise(rng, noise_spread)
}

/// Uniform noise in `[-spread / 2, spread / 2)`.
pub fn centered_noise<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    (rng.r#gen::<f64>() - 0.5) * spread
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_noisy_signal_stays_within_envelope() {
        let mut rng = StdRng::seed_from_u64(7);
        for step in 0..500 {
            let t = step as f64 * 0.5;
            let value = noisy_signal(&mut rng, 10.0, 2.0, 0.1, t, 1.0);
            assert!((7.5..=12.5).contains(&value), "value {} out of envelope", value);
        }
    }

    #[test]
    fn test_zero_noise_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let value = noisy_signal(&mut rng, 5.0, 1.0, 1.0, std::f64::consts::FRAC_PI_2, 0.0);
        assert_eq!(value, 6.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.345_6, 2), 2.35);
        assert_eq!(round_to(78.04, 1), 78.0);
        assert_eq!(round_to(249.5, 0), 250.0);
        assert_eq!(round_to(-1.25, 1), -1.3);
    }

    #[test]
    fn test_profile_sample_respects_precision() {
        let profile = SignalProfile::new(2.5, 0.5, 0.03, 0.2, 2);
        let mut rng = StdRng::seed_from_u64(3);
        for step in 0..50 {
            let value = profile.sample(&mut rng, step as f64);
            assert_eq!(round_to(value, 2), value);
            assert!((value - profile.base).abs() <= profile.max_deviation() + 0.005);
        }
    }
}
