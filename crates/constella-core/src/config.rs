//! Per-instance particle field constants.

use serde::Deserialize;

/// Rejected [`FieldConfig`] value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidFieldConfig {
    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be within 0.0..=1.0, got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },
    #[error("{name} must be finite and not negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("pointer_smoothing must be within (0.0, 1.0], got {0}")]
    Smoothing(f64),
    #[error("pointer_sentinel must be at most -mouse_radius ({radius}), got {value}")]
    Sentinel { value: f64, radius: f64 },
}

/// Immutable tuning constants for a particle field.
///
/// Built once and shared by every field instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Dot opacity away from the pointer.
    pub base_opacity: f64,
    /// Dot opacity right under the pointer.
    pub hover_opacity: f64,
    /// Line opacity scale away from the pointer.
    pub line_base_opacity: f64,
    /// Line opacity scale when an endpoint is near the pointer.
    pub line_hover_opacity: f64,
    /// Pairs farther apart than this are never connected.
    pub max_line_distance: f64,
    /// Radius of pointer influence.
    pub mouse_radius: f64,
    pub dot_radius: f64,
    /// Extra radius added to a dot right under the pointer.
    pub dot_radius_boost: f64,
    pub dot_count_desktop: usize,
    pub dot_count_mobile: usize,
    /// Velocity components are drawn from `±drift_speed / 2`.
    pub drift_speed: f64,
    /// Viewports at most this wide use the mobile count.
    pub mobile_width: f64,
    /// Fraction of the remaining pointer distance covered per frame.
    pub pointer_smoothing: f64,
    /// Pointer coordinate meaning "no pointer".
    pub pointer_sentinel: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            base_opacity: 0.28,
            hover_opacity: 0.65,
            line_base_opacity: 0.22,
            line_hover_opacity: 0.5,
            max_line_distance: 150.0,
            mouse_radius: 140.0,
            dot_radius: 1.6,
            dot_radius_boost: 1.4,
            dot_count_desktop: 95,
            dot_count_mobile: 50,
            drift_speed: 0.08,
            mobile_width: 768.0,
            pointer_smoothing: 0.12,
            pointer_sentinel: -1000.0,
        }
    }
}

impl FieldConfig {
    /// Particle count for the tier selected by `viewport_width`.
    pub fn particle_count(&self, viewport_width: f64) -> usize {
        if viewport_width <= self.mobile_width {
            self.dot_count_mobile
        } else {
            self.dot_count_desktop
        }
    }

    /// Check the values the frame step divides by or blends with.
    pub fn validate(&self) -> Result<(), InvalidFieldConfig> {
        for (name, value) in [
            ("max_line_distance", self.max_line_distance),
            ("mouse_radius", self.mouse_radius),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(InvalidFieldConfig::NotPositive { name, value });
            }
        }

        for (name, value) in [
            ("base_opacity", self.base_opacity),
            ("hover_opacity", self.hover_opacity),
            ("line_base_opacity", self.line_base_opacity),
            ("line_hover_opacity", self.line_hover_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidFieldConfig::OutOfUnitRange { name, value });
            }
        }

        for (name, value) in [
            ("drift_speed", self.drift_speed),
            ("dot_radius", self.dot_radius),
            ("dot_radius_boost", self.dot_radius_boost),
            ("mobile_width", self.mobile_width),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(InvalidFieldConfig::Negative { name, value });
            }
        }

        if !(self.pointer_smoothing > 0.0 && self.pointer_smoothing <= 1.0) {
            return Err(InvalidFieldConfig::Smoothing(self.pointer_smoothing));
        }

        // The sentinel sits up and left of the surface origin; it must stay
        // beyond pointer reach of every point on the surface.
        if !(self.pointer_sentinel.is_finite() && self.pointer_sentinel <= -self.mouse_radius) {
            return Err(InvalidFieldConfig::Sentinel {
                value: self.pointer_sentinel,
                radius: self.mouse_radius,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_particle_count_tiers() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count(1920.0), 95);
        assert_eq!(config.particle_count(768.0), 50);
        assert_eq!(config.particle_count(320.0), 50);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = FieldConfig {
            max_line_distance: 0.0,
            ..FieldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InvalidFieldConfig::NotPositive { name: "max_line_distance", .. })
        ));

        let config = FieldConfig {
            hover_opacity: 1.5,
            ..FieldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InvalidFieldConfig::OutOfUnitRange { name: "hover_opacity", .. })
        ));

        let config = FieldConfig {
            pointer_smoothing: 0.0,
            ..FieldConfig::default()
        };
        assert_eq!(config.validate(), Err(InvalidFieldConfig::Smoothing(0.0)));
    }

    #[test]
    fn test_validate_rejects_non_finite_motion_and_radii() {
        for config in [
            FieldConfig {
                drift_speed: f64::NAN,
                ..FieldConfig::default()
            },
            FieldConfig {
                drift_speed: -0.1,
                ..FieldConfig::default()
            },
            FieldConfig {
                dot_radius: f64::INFINITY,
                ..FieldConfig::default()
            },
            FieldConfig {
                dot_radius_boost: -1.0,
                ..FieldConfig::default()
            },
        ] {
            assert!(matches!(
                config.validate(),
                Err(InvalidFieldConfig::Negative { .. })
            ));
        }
    }

    #[test]
    fn test_validate_rejects_sentinel_within_reach() {
        for sentinel in [0.0, -100.0, f64::NAN, f64::NEG_INFINITY] {
            let config = FieldConfig {
                pointer_sentinel: sentinel,
                ..FieldConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(InvalidFieldConfig::Sentinel { .. })
            ));
        }

        let config = FieldConfig {
            pointer_sentinel: -140.0,
            ..FieldConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
