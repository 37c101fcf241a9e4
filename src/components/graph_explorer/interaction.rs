//! Pointer input state machine: node drags, background pans, and click
//! disambiguation.
//!
//! A press on a node immediately pins it and reheats the simulation, so a
//! drag feels responsive from the first pixel of movement. Whether the
//! gesture was "really" a click is decided at release time from total travel
//! and hold duration; a release that qualifies reports a selection instead.
//! Either way the pin is released, so a click never leaves a node anchored.
//!
//! The controller is pure state: the host feeds it screen coordinates and
//! event timestamps, and it mutates the simulation (pins, temperature) and
//! viewport (pans) it is handed. That keeps every gesture testable without
//! a DOM.

use super::simulation::Simulation;
use super::viewport::Viewport;

/// Maximum screen-space travel (px) for a press-release to count as a click.
const CLICK_DISTANCE: f64 = 4.0;
/// Maximum hold duration (ms) for a press-release to count as a click.
const CLICK_DURATION_MS: f64 = 400.0;
/// Temperature target held while a node drag is live.
const DRAG_HEAT: f64 = 0.3;

/// Active pointer session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Pointer {
	#[default]
	Idle,
	/// Button down on a node, not yet moved past the click threshold.
	Pressed {
		node: usize,
		start: (f64, f64),
		started_ms: f64,
		/// World-space offset from the pointer to the node center at press
		/// time. Preserved through the drag so the node does not snap to
		/// the cursor.
		grab: (f64, f64),
	},
	/// Moved past the click threshold; every move re-pins the node.
	Dragging { node: usize, grab: (f64, f64) },
	/// Button down on empty canvas; moves translate the viewport.
	Panning { last: (f64, f64), moved: bool },
}

/// What a completed gesture asks the host to do.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Gesture {
	/// Press and release stayed within the click thresholds on a node.
	Select(usize),
	/// Press and release on empty canvas without panning movement.
	ClearSelection,
}

/// Routes press/move/release/cancel into the simulation and viewport.
#[derive(Clone, Debug, Default)]
pub struct PointerController {
	state: Pointer,
}

impl PointerController {
	/// Begin a session. `hit` is the node under the pointer, if any.
	pub fn press(
		&mut self,
		sim: &mut Simulation,
		viewport: &Viewport,
		hit: Option<usize>,
		screen: (f64, f64),
		time_ms: f64,
	) {
		match hit {
			Some(node) => {
				let world = viewport.invert(screen);
				let pos = (sim.nodes()[node].x, sim.nodes()[node].y);
				sim.set_pin(node, Some(pos));
				sim.set_alpha_target(DRAG_HEAT);
				sim.reheat(DRAG_HEAT);
				self.state = Pointer::Pressed {
					node,
					start: screen,
					started_ms: time_ms,
					grab: (pos.0 - world.0, pos.1 - world.1),
				};
			}
			None => {
				self.state = Pointer::Panning {
					last: screen,
					moved: false,
				};
			}
		}
	}

	/// Track pointer movement; re-pins or pans depending on the session.
	pub fn moved(&mut self, sim: &mut Simulation, viewport: &mut Viewport, screen: (f64, f64)) {
		match self.state {
			Pointer::Pressed {
				node, start, grab, ..
			} => {
				if travel(start, screen) >= CLICK_DISTANCE {
					self.state = Pointer::Dragging { node, grab };
					pin_to_pointer(sim, viewport, node, grab, screen);
				}
			}
			Pointer::Dragging { node, grab } => {
				pin_to_pointer(sim, viewport, node, grab, screen);
			}
			Pointer::Panning { last, .. } => {
				let (dx, dy) = (screen.0 - last.0, screen.1 - last.1);
				if dx != 0.0 || dy != 0.0 {
					viewport.pan_by(dx, dy);
					self.state = Pointer::Panning {
						last: screen,
						moved: true,
					};
				}
			}
			Pointer::Idle => {}
		}
	}

	/// End the session. Returns the gesture the host should act on, at most
	/// one per press.
	pub fn release(
		&mut self,
		sim: &mut Simulation,
		screen: (f64, f64),
		time_ms: f64,
	) -> Option<Gesture> {
		match std::mem::take(&mut self.state) {
			Pointer::Pressed {
				node,
				start,
				started_ms,
				..
			} => {
				sim.set_pin(node, None);
				sim.set_alpha_target(0.0);
				let is_click = travel(start, screen) < CLICK_DISTANCE
					&& time_ms - started_ms < CLICK_DURATION_MS;
				is_click.then_some(Gesture::Select(node))
			}
			Pointer::Dragging { node, .. } => {
				sim.set_pin(node, None);
				sim.set_alpha_target(0.0);
				None
			}
			Pointer::Panning { moved, .. } => (!moved).then_some(Gesture::ClearSelection),
			Pointer::Idle => None,
		}
	}

	/// Abort the session without reporting a gesture (pointer left the
	/// surface). Releases any pin.
	pub fn cancel(&mut self, sim: &mut Simulation) {
		match std::mem::take(&mut self.state) {
			Pointer::Pressed { node, .. } | Pointer::Dragging { node, .. } => {
				sim.set_pin(node, None);
				sim.set_alpha_target(0.0);
			}
			Pointer::Panning { .. } | Pointer::Idle => {}
		}
	}

	/// Whether any session is live. Hover tracking pauses during one.
	pub fn active(&self) -> bool {
		self.state != Pointer::Idle
	}
}

fn pin_to_pointer(
	sim: &mut Simulation,
	viewport: &Viewport,
	node: usize,
	grab: (f64, f64),
	screen: (f64, f64),
) {
	let world = viewport.invert(screen);
	sim.set_pin(node, Some((world.0 + grab.0, world.1 + grab.1)));
}

fn travel(a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	(dx * dx + dy * dy).sqrt()
}
