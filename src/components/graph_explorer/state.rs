//! Per-view explorer state: graph data, simulation, viewport, pointer
//! session, and hover emphasis, composed behind the lifecycle the host
//! component drives.
//!
//! Display data (`GraphData`) and kinematic data (`Simulation`) stay in
//! parallel arrays joined by index. Links are resolved once per data load;
//! anything that fails to resolve is dropped and logged, never simulated.

use log::warn;

use super::interaction::{Gesture, PointerController};
use super::scale::{ScaleConfig, ScaledValues};
use super::simulation::{SimLink, Simulation, SimulationConfig};
use super::types::{GraphData, Node, ResolvedLink};
use super::viewport::Viewport;

/// Temperature used when the surface is resized: enough for the layout to
/// glide toward the new center without restarting the full cooldown.
const RESIZE_HEAT: f64 = 0.1;
/// Exponential smoothing speed for hover emphasis (per second).
const EMPHASIS_SPEED: f64 = 8.0;

/// Everything one mounted explorer view owns.
pub struct ExplorerState {
	pub data: GraphData,
	pub sim: Simulation,
	pub viewport: Viewport,
	/// Links that survived endpoint resolution, in input order.
	pub links: Vec<ResolvedLink>,
	/// Node whose details are currently selected, if any.
	pub selected: Option<usize>,
	/// Node currently under the pointer.
	pub hovered: Option<usize>,
	pub width: f64,
	pub height: f64,
	pointer: PointerController,
	/// Smoothed per-node emphasis in `[0, 1]`, driven by hover adjacency.
	emphasis: Vec<f64>,
}

impl ExplorerState {
	pub fn new(data: GraphData, width: f64, height: f64) -> Self {
		let (links, sim) = build_simulation(&data, &[], (width / 2.0, height / 2.0));
		let emphasis = vec![0.0; data.nodes.len()];
		Self {
			data,
			sim,
			viewport: Viewport::default(),
			links,
			selected: None,
			hovered: None,
			width,
			height,
			pointer: PointerController::default(),
			emphasis,
		}
	}

	/// Swap in a new graph. The old simulation is stopped and discarded;
	/// nodes pinned at replacement time reappear at their pinned position
	/// when the same id exists in the new data. The viewport and selection
	/// reset, since neither is meaningful against different content.
	pub fn replace_data(&mut self, data: GraphData) {
		self.sim.stop();
		let carried: Vec<(&str, (f64, f64))> = self
			.data
			.nodes
			.iter()
			.zip(self.sim.nodes())
			.filter_map(|(node, sim)| sim.pin.map(|pin| (node.id.as_str(), pin)))
			.collect();

		let (links, sim) = build_simulation(&data, &carried, (self.width / 2.0, self.height / 2.0));
		self.sim = sim;
		self.links = links;
		self.viewport = Viewport::default();
		self.pointer = PointerController::default();
		self.selected = None;
		self.hovered = None;
		self.emphasis = vec![0.0; data.nodes.len()];
		self.data = data;
	}

	/// The drawing surface changed size. Positions and viewport survive;
	/// the centering force is retargeted and the simulation nudged so the
	/// layout drifts toward the new center.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.sim.set_center(width / 2.0, height / 2.0);
		self.sim.reheat(RESIZE_HEAT);
	}

	/// Stop the simulation for good (component teardown).
	pub fn stop(&mut self) {
		self.sim.stop();
	}

	/// Advance one frame: a simulation tick (if live) plus display
	/// smoothing. `dt` is the frame delta in seconds.
	pub fn tick(&mut self, dt: f64) {
		self.sim.tick();
		self.animate_emphasis(dt);
	}

	/// Topmost node whose hit circle contains the screen point.
	pub fn node_at_position(&self, screen: (f64, f64), config: &ScaleConfig) -> Option<usize> {
		let (gx, gy) = self.viewport.invert(screen);
		let scale = ScaledValues::new(config, self.viewport.k);
		let mut found = None;
		for (i, node) in self.sim.nodes().iter().enumerate() {
			let (dx, dy) = (node.x - gx, node.y - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(i);
			}
		}
		found
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.hovered = node;
	}

	/// Smoothed hover emphasis for a node.
	pub fn emphasis(&self, index: usize) -> f64 {
		self.emphasis.get(index).copied().unwrap_or(0.0)
	}

	pub fn pointer_pressed(&mut self, screen: (f64, f64), time_ms: f64, config: &ScaleConfig) {
		let hit = self.node_at_position(screen, config);
		self.pointer
			.press(&mut self.sim, &self.viewport, hit, screen, time_ms);
	}

	pub fn pointer_moved(&mut self, screen: (f64, f64), config: &ScaleConfig) {
		self.pointer
			.moved(&mut self.sim, &mut self.viewport, screen);
		if !self.pointer.active() {
			let hovered = self.node_at_position(screen, config);
			self.set_hover(hovered);
		}
	}

	/// Complete the pointer session. A disambiguated node click updates the
	/// selection and returns the full node for the host's callback; any
	/// other outcome returns `None`.
	pub fn pointer_released(&mut self, screen: (f64, f64), time_ms: f64) -> Option<Node> {
		match self.pointer.release(&mut self.sim, screen, time_ms) {
			Some(Gesture::Select(index)) => {
				self.selected = Some(index);
				self.data.nodes.get(index).cloned()
			}
			Some(Gesture::ClearSelection) => {
				self.selected = None;
				None
			}
			None => None,
		}
	}

	/// Pointer left the surface: abort any session and clear hover.
	pub fn pointer_left(&mut self) {
		self.pointer.cancel(&mut self.sim);
		self.set_hover(None);
	}

	/// Zoom around a screen-space pivot (wheel gesture).
	pub fn zoom(&mut self, factor: f64, pivot: (f64, f64)) {
		self.viewport.zoom_by(factor, pivot);
	}

	/// Ease each node's emphasis toward 1 when hovered or adjacent to the
	/// hovered node, 0 otherwise.
	fn animate_emphasis(&mut self, dt: f64) {
		let blend = 1.0 - (-EMPHASIS_SPEED * dt).exp();
		let mut target = vec![0.0_f64; self.emphasis.len()];
		if let Some(h) = self.hovered {
			if let Some(slot) = target.get_mut(h) {
				*slot = 1.0;
			}
			for link in &self.links {
				if link.source == h {
					target[link.target] = 1.0;
				} else if link.target == h {
					target[link.source] = 1.0;
				}
			}
		}
		for (value, target) in self.emphasis.iter_mut().zip(target) {
			*value += (target - *value) * blend;
		}
	}
}

/// Resolve links (dropping and logging any with missing endpoints) and
/// build a hot simulation, seeding carried-over positions by node id.
fn build_simulation(
	data: &GraphData,
	carried: &[(&str, (f64, f64))],
	center: (f64, f64),
) -> (Vec<ResolvedLink>, Simulation) {
	let (links, dropped) = data.resolved_links();
	if dropped > 0 {
		warn!(
			"graph-explorer: dropped {dropped} link(s) with endpoints not present in the node set"
		);
	}

	let seeds: Vec<Option<(f64, f64)>> = data
		.nodes
		.iter()
		.map(|node| {
			carried
				.iter()
				.find(|(id, _)| *id == node.id)
				.map(|(_, pin)| *pin)
		})
		.collect();
	let sim_links = links
		.iter()
		.map(|link| SimLink {
			source: link.source,
			target: link.target,
		})
		.collect();

	(
		links,
		Simulation::new(&seeds, sim_links, SimulationConfig::default(), center),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_explorer::types::{Category, Link};

	fn node(id: &str) -> Node {
		Node {
			id: id.to_string(),
			label: id.to_uppercase(),
			group: Category::Policy,
			description: Some(format!("entity {id}")),
		}
	}

	fn link(source: &str, target: &str) -> Link {
		Link {
			source: source.to_string(),
			target: target.to_string(),
			relation: "relates_to".to_string(),
		}
	}

	fn make_data() -> GraphData {
		GraphData {
			nodes: vec![node("a"), node("b"), node("c")],
			links: vec![link("a", "b"), link("b", "c")],
		}
	}

	fn settle(state: &mut ExplorerState) {
		for _ in 0..400 {
			state.tick(1.0 / 60.0);
		}
		assert!(state.sim.settled());
	}

	#[test]
	fn dangling_links_never_reach_the_simulation() {
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			links: vec![link("a", "b"), link("a", "ghost")],
		};
		let mut state = ExplorerState::new(data, 800.0, 600.0);
		assert_eq!(state.links.len(), 1);
		// Ticking with the bad link dropped runs clean.
		for _ in 0..10 {
			state.tick(1.0 / 60.0);
		}
	}

	#[test]
	fn empty_graph_is_a_no_op() {
		let mut state = ExplorerState::new(GraphData::default(), 800.0, 600.0);
		state.tick(1.0 / 60.0);
		assert!(state.sim.nodes().is_empty());
		assert_eq!(state.node_at_position((400.0, 300.0), &ScaleConfig::default()), None);
	}

	#[test]
	fn click_selects_and_returns_the_full_node() {
		let config = ScaleConfig::default();
		let mut state = ExplorerState::new(make_data(), 800.0, 600.0);
		// Before any tick, node 0 sits on the seeding ring at angle 0.
		let (x, y) = (state.sim.nodes()[0].x, state.sim.nodes()[0].y);

		state.pointer_pressed((x, y), 1000.0, &config);
		let selected = state.pointer_released((x, y), 1100.0);

		let selected = selected.expect("click should select");
		assert_eq!(selected.id, "a");
		assert_eq!(selected.label, "A");
		assert_eq!(selected.description.as_deref(), Some("entity a"));
		assert_eq!(state.selected, Some(0));
		assert!(state.sim.nodes()[0].pin.is_none());
	}

	#[test]
	fn drag_repositions_without_selecting() {
		let config = ScaleConfig::default();
		let mut state = ExplorerState::new(make_data(), 800.0, 600.0);
		let (x, y) = (state.sim.nodes()[0].x, state.sim.nodes()[0].y);

		state.pointer_pressed((x, y), 0.0, &config);
		state.pointer_moved((x + 80.0, y), &config);
		state.tick(1.0 / 60.0);
		assert_eq!((state.sim.nodes()[0].x, state.sim.nodes()[0].y), (x + 80.0, y));

		let selected = state.pointer_released((x + 80.0, y), 1000.0);
		assert!(selected.is_none());
		assert_eq!(state.selected, None);
		assert!(state.sim.nodes()[0].pin.is_none());
	}

	#[test]
	fn background_click_clears_selection() {
		let config = ScaleConfig::default();
		let mut state = ExplorerState::new(make_data(), 800.0, 600.0);
		let (x, y) = (state.sim.nodes()[1].x, state.sim.nodes()[1].y);
		state.pointer_pressed((x, y), 0.0, &config);
		state.pointer_released((x, y), 50.0);
		assert_eq!(state.selected, Some(1));

		// Far corner, no node there.
		state.pointer_pressed((5.0, 5.0), 100.0, &config);
		state.pointer_released((5.0, 5.0), 150.0);
		assert_eq!(state.selected, None);
	}

	#[test]
	fn hit_testing_tracks_the_viewport() {
		let config = ScaleConfig::default();
		let mut state = ExplorerState::new(make_data(), 800.0, 600.0);
		let world = (state.sim.nodes()[0].x, state.sim.nodes()[0].y);

		state.zoom(2.0, (0.0, 0.0));
		state.viewport.pan_by(30.0, -10.0);
		let screen = state.viewport.apply(world);
		assert_eq!(state.node_at_position(screen, &config), Some(0));

		// The node's old screen position no longer hits.
		assert_eq!(state.node_at_position(world, &config), None);
	}

	#[test]
	fn resize_preserves_positions_and_retargets_center() {
		let mut state = ExplorerState::new(make_data(), 800.0, 600.0);
		settle(&mut state);
		let before: Vec<(f64, f64)> = state.sim.nodes().iter().map(|n| (n.x, n.y)).collect();
		state.viewport.pan_by(50.0, 50.0);

		state.resize(1600.0, 900.0);
		let after: Vec<(f64, f64)> = state.sim.nodes().iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(before, after, "resize must not move nodes by itself");
		assert!(!state.sim.settled(), "resize should wake the simulation");
		assert_eq!((state.viewport.x, state.viewport.y), (50.0, 50.0));

		// The reheated layout drifts toward the new center.
		settle(&mut state);
		let nodes = state.sim.nodes();
		let cx = nodes.iter().map(|n| n.x).sum::<f64>() / nodes.len() as f64;
		assert!(cx > 500.0, "centroid stuck at {cx}");
	}

	#[test]
	fn replacement_rebuilds_and_resets_the_view() {
		let mut state = ExplorerState::new(make_data(), 800.0, 600.0);
		state.zoom(2.0, (100.0, 100.0));
		state.selected = Some(2);
		settle(&mut state);

		let next = GraphData {
			nodes: vec![node("x"), node("y")],
			links: vec![link("x", "y")],
		};
		state.replace_data(next);

		assert_eq!(state.data.nodes.len(), 2);
		assert_eq!(state.links.len(), 1);
		assert_eq!(state.selected, None);
		assert_eq!(state.viewport.k, 1.0);
		assert!(!state.sim.settled(), "new data starts a fresh layout");
	}

	#[test]
	fn replacement_carries_pinned_positions_by_id() {
		let config = ScaleConfig::default();
		let mut state = ExplorerState::new(make_data(), 800.0, 600.0);
		let (x, y) = (state.sim.nodes()[1].x, state.sim.nodes()[1].y);

		// Hold node "b" mid-drag while the data swaps underneath.
		state.pointer_pressed((x, y), 0.0, &config);
		state.pointer_moved((x + 50.0, y + 20.0), &config);
		assert!(state.sim.nodes()[1].pin.is_some());

		let next = GraphData {
			nodes: vec![node("b"), node("z")],
			links: vec![link("b", "z")],
		};
		state.replace_data(next);

		let b = &state.sim.nodes()[0];
		assert_eq!((b.x, b.y), (x + 50.0, y + 20.0));
		// Carried over as a seed only; the new node is free to move.
		assert!(b.pin.is_none());
	}

	#[test]
	fn hover_emphasizes_node_and_neighbors() {
		let mut state = ExplorerState::new(make_data(), 800.0, 600.0);
		state.set_hover(Some(1));
		for _ in 0..30 {
			state.tick(1.0 / 60.0);
		}
		assert!(state.emphasis(1) > 0.9);
		assert!(state.emphasis(0) > 0.9, "neighbor of hovered");
		assert!(state.emphasis(2) > 0.9, "neighbor of hovered");

		state.set_hover(None);
		for _ in 0..60 {
			state.tick(1.0 / 60.0);
		}
		assert!(state.emphasis(1) < 0.1);
	}
}
