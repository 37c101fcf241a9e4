//! Zoom-dependent sizing for graph visuals.
//!
//! Two coordinate spaces are in play: world-space (simulation units, scaled
//! by the viewport) and screen-space (canvas pixels, constant under zoom).
//! Every tunable here declares which space it lives in, and `ScaledValues`
//! resolves the whole set once per frame so drawing code never reasons about
//! the zoom factor directly.

/// How a base size responds to the zoom factor `k`.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World/Screen variants complete the API for users customizing ScaleConfig"
)]
pub enum SizeRule {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size. Divides by `k` to counteract the canvas
	/// transform.
	Screen,
	/// World-space size with the on-screen extent clamped to a pixel range.
	Clamped { min_px: f64, max_px: f64 },
}

impl SizeRule {
	/// World-space value to use after the canvas transform is applied.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			SizeRule::World => base,
			SizeRule::Screen => base / k,
			SizeRule::Clamped { min_px, max_px } => base.clamp(min_px / k, max_px / k),
		}
	}
}

/// Zoom-gated opacity ramp for fine detail that turns to noise when zoomed
/// out (relation labels, arrowheads).
#[derive(Clone, Debug)]
pub struct FadeRule {
	/// Zoom at or below which the element is fully transparent.
	pub hidden_below: f64,
	/// Zoom at or above which the element is fully opaque.
	pub solid_above: f64,
}

impl FadeRule {
	/// Opacity multiplier in `[0, 1]` at zoom `k`.
	pub fn alpha(&self, k: f64) -> f64 {
		if self.solid_above <= self.hidden_below {
			return 1.0;
		}
		((k - self.hidden_below) / (self.solid_above - self.hidden_below)).clamp(0.0, 1.0)
	}
}

/// Visual sizing configuration for every drawn element.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node circle radius in world units.
	pub node_radius: f64,
	/// Pointer hit-test radius in world units. Larger than the visual
	/// radius so nodes are easy to grab.
	pub hit_radius: f64,
	/// Rule governing node and hit radii under zoom.
	pub size_rule: SizeRule,
	/// Node label font size in screen pixels.
	pub label_px: f64,
	/// Relation label font size in screen pixels.
	pub relation_px: f64,
	/// Floor for the font-size divisor, so labels stop growing when zoomed
	/// far out.
	pub min_label_zoom: f64,
	/// Link line width in screen pixels.
	pub link_width_px: f64,
	/// Arrowhead length in world units.
	pub arrow_size: f64,
	/// Rule governing arrowhead size under zoom.
	pub arrow_rule: SizeRule,
	/// Arrowheads fade out as the view zooms away.
	pub arrow_fade: FadeRule,
	/// Relation labels fade out as the view zooms away.
	pub relation_fade: FadeRule,
	/// Hover/selection ring stroke width in screen pixels.
	pub ring_width_px: f64,
	/// Ring offset from the node edge in screen pixels.
	pub ring_offset_px: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 8.0,
			hit_radius: 14.0,
			size_rule: SizeRule::Clamped {
				min_px: 4.0,
				max_px: 40.0,
			},
			label_px: 11.0,
			relation_px: 9.0,
			min_label_zoom: 0.5,
			link_width_px: 1.5,
			arrow_size: 6.0,
			arrow_rule: SizeRule::Clamped {
				min_px: 0.0,
				max_px: 18.0,
			},
			arrow_fade: FadeRule {
				hidden_below: 0.25,
				solid_above: 0.8,
			},
			relation_fade: FadeRule {
				hidden_below: 0.6,
				solid_above: 1.1,
			},
			ring_width_px: 1.5,
			ring_offset_px: 3.0,
		}
	}
}

/// Pre-computed sizes for one frame at a specific zoom level. All lengths
/// are world-space, ready to use after the canvas transform.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node circle radius in world-space.
	pub node_radius: f64,
	/// Hit-test radius in world-space.
	pub hit_radius: f64,
	/// Node label font (e.g. "11px sans-serif").
	pub label_font: String,
	/// Relation label font.
	pub relation_font: String,
	/// Relation label opacity multiplier in `[0, 1]`.
	pub relation_alpha: f64,
	/// Link line width in world-space.
	pub link_width: f64,
	/// Arrowhead length in world-space.
	pub arrow_size: f64,
	/// Arrowhead opacity multiplier in `[0, 1]`.
	pub arrow_alpha: f64,
	/// Ring stroke width in world-space.
	pub ring_width: f64,
	/// Ring offset from the node edge in world-space.
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Resolve the configuration at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let font_k = k.max(config.min_label_zoom);
		Self {
			k,
			node_radius: config.size_rule.apply(config.node_radius, k),
			hit_radius: config.size_rule.apply(config.hit_radius, k),
			label_font: format!("{}px sans-serif", config.label_px / font_k),
			relation_font: format!("{}px sans-serif", config.relation_px / font_k),
			relation_alpha: config.relation_fade.alpha(k),
			link_width: config.link_width_px / k,
			arrow_size: config.arrow_rule.apply(config.arrow_size, k),
			arrow_alpha: config.arrow_fade.alpha(k),
			ring_width: config.ring_width_px / k,
			ring_offset: config.ring_offset_px / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn world_rule_ignores_zoom() {
		assert_eq!(SizeRule::World.apply(8.0, 0.25), 8.0);
		assert_eq!(SizeRule::World.apply(8.0, 4.0), 8.0);
	}

	#[test]
	fn screen_rule_counteracts_zoom() {
		assert_eq!(SizeRule::Screen.apply(8.0, 2.0), 4.0);
		assert_eq!(SizeRule::Screen.apply(8.0, 0.5), 16.0);
	}

	#[test]
	fn clamped_rule_bounds_screen_extent() {
		let rule = SizeRule::Clamped {
			min_px: 4.0,
			max_px: 40.0,
		};
		// 8 world units at k=0.25 would be 2 px on screen; clamp to 4 px.
		assert_eq!(rule.apply(8.0, 0.25), 16.0);
		// At k=1 the 4..40 px window leaves the base untouched.
		assert_eq!(rule.apply(8.0, 1.0), 8.0);
		// At k=10 the node would cover 80 px; clamp to 40 px.
		assert_eq!(rule.apply(8.0, 10.0), 4.0);
	}

	#[test]
	fn fade_ramps_between_thresholds() {
		let fade = FadeRule {
			hidden_below: 0.5,
			solid_above: 1.0,
		};
		assert_eq!(fade.alpha(0.2), 0.0);
		assert_eq!(fade.alpha(0.5), 0.0);
		assert!((fade.alpha(0.75) - 0.5).abs() < 1e-9);
		assert_eq!(fade.alpha(1.0), 1.0);
		assert_eq!(fade.alpha(3.0), 1.0);
	}

	#[test]
	fn degenerate_fade_is_always_solid() {
		let fade = FadeRule {
			hidden_below: 1.0,
			solid_above: 1.0,
		};
		assert_eq!(fade.alpha(0.1), 1.0);
	}

	#[test]
	fn scaled_values_resolve_once_per_zoom() {
		let config = ScaleConfig::default();
		let scale = ScaledValues::new(&config, 2.0);
		assert_eq!(scale.k, 2.0);
		assert_eq!(scale.link_width, config.link_width_px / 2.0);
		assert_eq!(scale.label_font, "5.5px sans-serif");
		assert_eq!(scale.relation_alpha, 1.0);
	}
}
