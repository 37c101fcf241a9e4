//! Pan/zoom state for the explorer view.
//!
//! The viewport is a pure display-space transform over world (simulation)
//! coordinates: `screen = world * k + (x, y)`. Gestures mutate scale and
//! translation only; node positions are never touched from here, so panning
//! and zooming mid-layout is always safe.

/// Zoom bounds. Translation is unbounded; only the scale is clamped.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;

/// Display transform mapping world coordinates to screen pixels.
#[derive(Clone, Debug)]
pub struct Viewport {
	/// Screen-space translation.
	pub x: f64,
	pub y: f64,
	/// Zoom factor, kept within `[MIN_ZOOM, MAX_ZOOM]`.
	pub k: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl Viewport {
	/// World point to screen pixels.
	pub fn apply(&self, p: (f64, f64)) -> (f64, f64) {
		(p.0 * self.k + self.x, p.1 * self.k + self.y)
	}

	/// Screen pixels to world point. Inverse of [`Viewport::apply`].
	pub fn invert(&self, p: (f64, f64)) -> (f64, f64) {
		((p.0 - self.x) / self.k, (p.1 - self.y) / self.k)
	}

	/// Scale by `factor`, keeping the world point under the screen-space
	/// `pivot` stationary. A zoom that hits the clamp degrades to a smaller
	/// zoom with the same pivot behavior.
	pub fn zoom_by(&mut self, factor: f64, pivot: (f64, f64)) {
		let k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.k;
		self.x = pivot.0 - (pivot.0 - self.x) * ratio;
		self.y = pivot.1 - (pivot.1 - self.y) * ratio;
		self.k = k;
	}

	/// Translate by a screen-space delta (background pan).
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn apply_and_invert_round_trip() {
		let mut view = Viewport::default();
		view.zoom_by(1.7, (120.0, 45.0));
		view.pan_by(-33.0, 12.5);
		for p in [(0.0, 0.0), (400.0, 300.0), (-250.0, 999.0)] {
			let (rx, ry) = view.invert(view.apply(p));
			assert!((rx - p.0).abs() < 1e-9);
			assert!((ry - p.1).abs() < 1e-9);
		}
	}

	#[test]
	fn zoom_keeps_pivot_stationary() {
		let mut view = Viewport {
			x: 40.0,
			y: -20.0,
			k: 1.0,
		};
		let pivot = (200.0, 150.0);
		let world_under_pivot = view.invert(pivot);
		view.zoom_by(1.5, pivot);
		let (sx, sy) = view.apply(world_under_pivot);
		assert!((sx - pivot.0).abs() < 1e-9);
		assert!((sy - pivot.1).abs() < 1e-9);
	}

	#[test]
	fn zoom_clamps_at_bounds() {
		let mut view = Viewport::default();
		for _ in 0..100 {
			view.zoom_by(1.1, (0.0, 0.0));
		}
		assert_eq!(view.k, MAX_ZOOM);
		for _ in 0..200 {
			view.zoom_by(0.9, (0.0, 0.0));
		}
		assert_eq!(view.k, MIN_ZOOM);
	}

	#[test]
	fn clamped_zoom_keeps_pivot_stationary() {
		let mut view = Viewport {
			x: 10.0,
			y: 10.0,
			k: 3.8,
		};
		let pivot = (500.0, 100.0);
		let world_under_pivot = view.invert(pivot);
		// Requests 3.8 * 1.5 but clamps to MAX_ZOOM.
		view.zoom_by(1.5, pivot);
		assert_eq!(view.k, MAX_ZOOM);
		let (sx, sy) = view.apply(world_under_pivot);
		assert!((sx - pivot.0).abs() < 1e-9);
		assert!((sy - pivot.1).abs() < 1e-9);
	}

	#[test]
	fn pan_translates_only() {
		let mut view = Viewport::default();
		view.pan_by(15.0, -7.0);
		assert_eq!((view.x, view.y), (15.0, -7.0));
		assert_eq!(view.k, 1.0);
		assert_eq!(view.apply((100.0, 100.0)), (115.0, 93.0));
	}
}
