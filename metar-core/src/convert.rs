//! Unit conversions used to present decoded METAR values.

/// Converts inches of mercury to hectopascals.
pub fn inhg_to_hpa(in_hg: f64) -> f64 {
    in_hg * 33.8638866667
}

/// Converts millibars to hectopascals.
pub fn mb_to_hpa(mb: f64) -> f64 {
    mb * 0.1
}

/// Converts knots to meters per second.
pub fn knots_to_ms(kts: f64) -> f64 {
    kts * 0.514444
}

/// Converts statute miles to kilometers.
pub fn statute_miles_to_km(sm: f64) -> f64 {
    sm * 1.60934
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    (c * 9.0 / 5.0) + 32.0
}

/// Inclusive lower bound, in knots, of Beaufort forces 1 through 12.
const BEAUFORT_THRESHOLDS: [f64; 12] = [
    1.0, 4.0, 7.0, 11.0, 16.0, 22.0, 28.0, 34.0, 41.0, 48.0, 56.0, 64.0,
];

/// Maps a wind speed in knots onto the Beaufort scale (0..=12).
///
/// Anything below 1 kt, negative speeds included, is force 0.
pub fn knots_to_beaufort(kts: f64) -> u8 {
    BEAUFORT_THRESHOLDS
        .iter()
        .take_while(|&&threshold| kts >= threshold)
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_scale_by_exact_factor() {
        assert_eq!(knots_to_ms(1.0), 0.514444);
        assert_eq!(inhg_to_hpa(1.0), 33.8638866667);
        assert_eq!(statute_miles_to_km(1.0), 1.60934);
        assert_eq!(mb_to_hpa(1.0), 0.1);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
    }

    #[test]
    fn beaufort_band_edges() {
        assert_eq!(knots_to_beaufort(5.0), 2);
        assert_eq!(knots_to_beaufort(0.5), 0);
        assert_eq!(knots_to_beaufort(63.9), 11);
        assert_eq!(knots_to_beaufort(64.0), 12);
        assert_eq!(knots_to_beaufort(150.0), 12);
        assert_eq!(knots_to_beaufort(-3.0), 0);
    }

    #[test]
    fn beaufort_reaches_every_force_in_order() {
        let lower_bounds = [0.0, 1.0, 4.0, 7.0, 11.0, 16.0, 22.0, 28.0, 34.0, 41.0, 48.0, 56.0, 64.0];

        for (force, &kts) in lower_bounds.iter().enumerate() {
            assert_eq!(knots_to_beaufort(kts), force as u8, "{kts} kt");
            if kts > 0.0 {
                assert_eq!(knots_to_beaufort(kts - 0.01), force as u8 - 1, "just below {kts} kt");
            }
        }
    }

    #[test]
    fn beaufort_is_monotonic() {
        let mut previous = 0;
        let mut kts = -5.0;
        while kts < 80.0 {
            let force = knots_to_beaufort(kts);
            assert!(force >= previous, "{kts} kt dropped to force {force}");
            previous = force;
            kts += 0.25;
        }
    }
}
