use std::ops::Range;

use crate::error::EngineError;

use super::palette::{DEFAULT_PALETTE, Rgb};

/// Tuning knobs for the node field.
///
/// Defaults reproduce the stock background effect. Distances are in logical
/// pixels; velocities and phase steps are per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Lower bound on the node count, whatever the surface size.
    pub min_nodes: usize,
    /// Surface area (px²) that earns one node above the minimum.
    pub area_per_node: f32,

    /// Full span of each velocity component, centered on zero (`0.8` → ±0.4).
    pub velocity_span: f32,
    pub radius_range: Range<f32>,
    pub opacity_range: Range<f32>,
    /// Phase advance per frame, in radians.
    pub phase_step: f64,
    pub palette: Vec<Rgb>,

    /// Pairs closer than this are linked.
    pub link_distance: f32,
    /// Link opacity at zero distance; falls off linearly to 0 at `link_distance`.
    pub link_max_opacity: f32,
    pub link_width: f32,

    /// Pointer influence radius.
    pub pointer_radius: f32,
    pub pointer_opacity_boost: f32,
    pub pointer_radius_boost: f32,

    /// `pulse = sin(phase) * pulse_amplitude + pulse_base`
    pub pulse_amplitude: f32,
    pub pulse_base: f32,

    /// Glow radius as a multiple of the node radius.
    pub glow_scale: f32,
    /// Glow center alpha as a fraction of the node opacity.
    pub glow_alpha: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            min_nodes: 40,
            area_per_node: 20_000.0,

            velocity_span: 0.8,
            radius_range: 1.0..3.0,
            opacity_range: 0.3..0.9,
            phase_step: 0.02,
            palette: DEFAULT_PALETTE.to_vec(),

            link_distance: 150.0,
            link_max_opacity: 0.4,
            link_width: 0.5,

            pointer_radius: 100.0,
            pointer_opacity_boost: 0.3,
            pointer_radius_boost: 1.0,

            pulse_amplitude: 0.3,
            pulse_base: 0.7,

            glow_scale: 2.0,
            glow_alpha: 0.8,
        }
    }
}

impl FieldConfig {
    /// Checks the values the simulation divides by or samples from.
    pub fn validate(&self) -> Result<(), EngineError> {
        fn positive(v: f32) -> bool {
            v.is_finite() && v > 0.0
        }
        fn ordered(r: &Range<f32>) -> bool {
            r.start.is_finite() && r.end.is_finite() && r.start <= r.end
        }

        if !positive(self.area_per_node) {
            return Err(EngineError::invalid_config("area_per_node", "must be finite and > 0"));
        }
        if !positive(self.link_distance) {
            return Err(EngineError::invalid_config("link_distance", "must be finite and > 0"));
        }
        if !positive(self.pointer_radius) {
            return Err(EngineError::invalid_config("pointer_radius", "must be finite and > 0"));
        }
        if !self.velocity_span.is_finite() || self.velocity_span < 0.0 {
            return Err(EngineError::invalid_config("velocity_span", "must be finite and >= 0"));
        }
        if !ordered(&self.radius_range) || self.radius_range.start < 0.0 {
            return Err(EngineError::invalid_config("radius_range", "must be finite, non-negative and ordered"));
        }
        if !ordered(&self.opacity_range) {
            return Err(EngineError::invalid_config("opacity_range", "must be finite and ordered"));
        }
        if self.palette.is_empty() {
            return Err(EngineError::invalid_config("palette", "needs at least one color"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_link_distance_is_rejected() {
        let cfg = FieldConfig { link_distance: 0.0, ..FieldConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(EngineError::InvalidConfig { field: "link_distance", .. })
        ));
    }

    #[test]
    fn empty_palette_is_rejected() {
        let cfg = FieldConfig { palette: Vec::new(), ..FieldConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(EngineError::InvalidConfig { field: "palette", .. })
        ));
    }

    #[test]
    fn reversed_radius_range_is_rejected() {
        let cfg = FieldConfig { radius_range: 3.0..1.0, ..FieldConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
