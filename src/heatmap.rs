//! Synthetic activity samples for the heatmap layer.
//!
//! Produces two independent clusters of weighted samples:
//! - a larger, high-intensity cluster jittered around the viewport center
//! - a smaller, low-intensity cluster jittered around a fixed secondary point
//!
//! Jitter is uniform per axis within `±radius` degrees. The random source is
//! always passed in, so a seeded generator reproduces the same sequence.

use std::iter::FusedIterator;

use rand::Rng;

use crate::error::{ComposeError, Result};
use crate::{GeoPoint, HeatSample};

/// Cluster sizes, jitter radii and weight ranges for synthetic sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    /// Samples in the cluster around the viewport center (default: 60)
    pub primary_count: u32,
    /// Jitter radius in degrees (default: 0.01)
    pub primary_radius: f64,
    /// Inclusive weight range (default: 0.5-1.0)
    pub primary_weight_range: (f64, f64),
    /// Fixed center of the secondary cluster
    pub secondary_center: GeoPoint,
    /// Samples in the secondary cluster (default: 30)
    pub secondary_count: u32,
    /// Jitter radius in degrees (default: 0.005)
    pub secondary_radius: f64,
    /// Inclusive weight range (default: 0.0-0.5)
    pub secondary_weight_range: (f64, f64),
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            primary_count: 60,
            primary_radius: 0.01,
            primary_weight_range: (0.5, 1.0),
            secondary_center: GeoPoint::new(45.521, -122.685),
            secondary_count: 30,
            secondary_radius: 0.005,
            secondary_weight_range: (0.0, 0.5),
        }
    }
}

impl HeatmapConfig {
    /// Check radii and weight ranges.
    ///
    /// Radii must lie in `[0, MAX_RADIUS_DEGREES]`; weight ranges must satisfy
    /// `0 <= lo <= hi <= 1`; the secondary center must be finite.
    pub fn validate(&self) -> Result<()> {
        check_radius("primary_radius", self.primary_radius)?;
        check_radius("secondary_radius", self.secondary_radius)?;
        check_weights("primary_weight_range", self.primary_weight_range)?;
        check_weights("secondary_weight_range", self.secondary_weight_range)?;
        if !self.secondary_center.is_finite() {
            return Err(ComposeError::InvalidConfig(
                "secondary_center must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn total_count(&self) -> usize {
        self.primary_count as usize + self.secondary_count as usize
    }
}

/// Largest jitter radius in degrees.
pub const MAX_RADIUS_DEGREES: f64 = 180.0;

fn check_radius(field: &str, radius: f64) -> Result<()> {
    if (0.0..=MAX_RADIUS_DEGREES).contains(&radius) {
        Ok(())
    } else {
        Err(ComposeError::InvalidConfig(format!(
            "{} must be between 0 and {} degrees (got {})",
            field, MAX_RADIUS_DEGREES, radius
        )))
    }
}

fn check_weights(field: &str, (lo, hi): (f64, f64)) -> Result<()> {
    if (0.0..=1.0).contains(&lo) && (0.0..=1.0).contains(&hi) && lo <= hi {
        Ok(())
    } else {
        Err(ComposeError::InvalidConfig(format!(
            "{} must satisfy 0 <= lo <= hi <= 1 (got {} to {})",
            field, lo, hi
        )))
    }
}

#[derive(Debug, Clone)]
struct Cluster {
    center: GeoPoint,
    remaining: u32,
    radius: f64,
    weights: (f64, f64),
}

/// Finite lazy sequence of [`HeatSample`]s, primary cluster first.
///
/// Consumed once; build a new sampler for another pass.
pub struct SyntheticSampler<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    clusters: [Cluster; 2],
    current: usize,
}

impl<R: Rng + ?Sized> SyntheticSampler<'_, R> {
    fn remaining(&self) -> usize {
        self.clusters[self.current.min(1)..]
            .iter()
            .map(|c| c.remaining as usize)
            .sum()
    }
}

impl<R: Rng + ?Sized> Iterator for SyntheticSampler<'_, R> {
    type Item = HeatSample;

    fn next(&mut self) -> Option<HeatSample> {
        while self.current < self.clusters.len() {
            let cluster = &mut self.clusters[self.current];
            if cluster.remaining == 0 {
                self.current += 1;
                continue;
            }
            cluster.remaining -= 1;

            let r = cluster.radius;
            let latitude = cluster.center.latitude + self.rng.gen_range(-r..=r);
            let longitude = cluster.center.longitude + self.rng.gen_range(-r..=r);
            let weight = self.rng.gen_range(cluster.weights.0..=cluster.weights.1);

            return Some(HeatSample { latitude, longitude, weight });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for SyntheticSampler<'_, R> {}

impl<R: Rng + ?Sized> FusedIterator for SyntheticSampler<'_, R> {}

/// Start sampling both clusters around `center`.
///
/// # Errors
///
/// [`ComposeError::InvalidConfig`] when `config` fails
/// [`HeatmapConfig::validate`] or `center` is not finite.
///
/// # Example
/// ```
/// use map_composer::{sample_heatmap, GeoPoint, HeatmapConfig};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let center = GeoPoint::new(45.515, -122.679);
/// let samples: Vec<_> = sample_heatmap(center, &HeatmapConfig::default(), &mut rng)
///     .unwrap()
///     .collect();
/// assert_eq!(samples.len(), 90);
/// ```
pub fn sample_heatmap<'r, R: Rng + ?Sized>(
    center: GeoPoint,
    config: &HeatmapConfig,
    rng: &'r mut R,
) -> Result<SyntheticSampler<'r, R>> {
    config.validate()?;
    if !center.is_finite() {
        return Err(ComposeError::InvalidConfig(
            "heatmap center must be finite".to_string(),
        ));
    }

    Ok(SyntheticSampler {
        rng,
        clusters: [
            Cluster {
                center,
                remaining: config.primary_count,
                radius: config.primary_radius,
                weights: config.primary_weight_range,
            },
            Cluster {
                center: config.secondary_center,
                remaining: config.secondary_count,
                radius: config.secondary_radius,
                weights: config.secondary_weight_range,
            },
        ],
        current: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const CENTER: GeoPoint = GeoPoint {
        latitude: 45.515,
        longitude: -122.679,
    };

    fn collect(config: &HeatmapConfig, seed: u64) -> Vec<HeatSample> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        sample_heatmap(CENTER, config, &mut rng).unwrap().collect()
    }

    #[test]
    fn test_default_cluster_sizes() {
        let config = HeatmapConfig::default();
        let samples = collect(&config, 1);
        assert_eq!(samples.len(), 90);
        assert_eq!(samples.len(), config.total_count());
    }

    #[test]
    fn test_same_seed_same_samples() {
        let config = HeatmapConfig::default();
        assert_eq!(collect(&config, 7), collect(&config, 7));
        assert_ne!(collect(&config, 7), collect(&config, 8));
    }

    #[test]
    fn test_primary_cluster_bounds() {
        let config = HeatmapConfig::default();
        let samples = collect(&config, 3);
        for s in &samples[..60] {
            assert!((s.latitude - CENTER.latitude).abs() <= 0.01 + 1e-12);
            assert!((s.longitude - CENTER.longitude).abs() <= 0.01 + 1e-12);
            assert!((0.5..=1.0).contains(&s.weight));
        }
    }

    #[test]
    fn test_secondary_cluster_bounds() {
        let config = HeatmapConfig::default();
        let samples = collect(&config, 4);
        let c = config.secondary_center;
        for s in &samples[60..] {
            assert!((s.latitude - c.latitude).abs() <= 0.005 + 1e-12);
            assert!((s.longitude - c.longitude).abs() <= 0.005 + 1e-12);
            assert!((0.0..=0.5).contains(&s.weight));
        }
    }

    #[test]
    fn test_size_hint_counts_down() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = HeatmapConfig {
            primary_count: 2,
            secondary_count: 1,
            ..HeatmapConfig::default()
        };
        let mut sampler = sample_heatmap(CENTER, &config, &mut rng).unwrap();
        assert_eq!(sampler.len(), 3);
        sampler.next();
        assert_eq!(sampler.len(), 2);
        sampler.next();
        sampler.next();
        assert_eq!(sampler.len(), 0);
        assert!(sampler.next().is_none());
        assert!(sampler.next().is_none());
    }

    #[test]
    fn test_empty_primary_cluster() {
        let config = HeatmapConfig {
            primary_count: 0,
            secondary_count: 4,
            ..HeatmapConfig::default()
        };
        let samples = collect(&config, 9);
        assert_eq!(samples.len(), 4);
        assert!(samples.iter().all(|s| s.weight <= 0.5));
    }

    #[test]
    fn test_zero_radius_and_fixed_weight() {
        let config = HeatmapConfig {
            primary_count: 5,
            primary_radius: 0.0,
            primary_weight_range: (0.7, 0.7),
            secondary_count: 0,
            ..HeatmapConfig::default()
        };
        let samples = collect(&config, 11);
        assert!(samples.iter().all(|s| s.latitude == CENTER.latitude && s.weight == 0.7));
    }

    #[test]
    fn test_largest_radius_samples() {
        let config = HeatmapConfig {
            primary_count: 3,
            primary_radius: MAX_RADIUS_DEGREES,
            secondary_count: 0,
            ..HeatmapConfig::default()
        };
        assert!(config.validate().is_ok());
        let samples = collect(&config, 12);
        assert_eq!(samples.len(), 3);
        assert!(samples.iter().all(|s| s.latitude.is_finite() && s.longitude.is_finite()));
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let bad = [
            HeatmapConfig { primary_radius: -0.1, ..HeatmapConfig::default() },
            HeatmapConfig { secondary_radius: f64::NAN, ..HeatmapConfig::default() },
            HeatmapConfig { primary_radius: 1e308, ..HeatmapConfig::default() },
            HeatmapConfig { secondary_radius: 180.5, ..HeatmapConfig::default() },
            HeatmapConfig { primary_weight_range: (0.9, 0.1), ..HeatmapConfig::default() },
            HeatmapConfig { secondary_weight_range: (0.0, 1.5), ..HeatmapConfig::default() },
            HeatmapConfig {
                secondary_center: GeoPoint::new(f64::INFINITY, 0.0),
                ..HeatmapConfig::default()
            },
        ];
        for config in &bad {
            assert!(matches!(
                sample_heatmap(CENTER, config, &mut rng),
                Err(ComposeError::InvalidConfig(_))
            ));
        }
        let nan_center = GeoPoint::new(f64::NAN, 0.0);
        assert!(sample_heatmap(nan_center, &HeatmapConfig::default(), &mut rng).is_err());
    }
}
