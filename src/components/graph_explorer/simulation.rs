//! Force simulation: the kinematic arena and the tick loop.
//!
//! The simulation owns every mutable kinematic field (position, velocity,
//! drag pin). Nodes live in a dense array parallel to the display data;
//! links arrive pre-resolved to indices, so a dangling reference cannot
//! reach tick-time math. One `tick` advances the layout a single step; the
//! host drives ticks from whatever scheduler it has (an animation frame in
//! the browser, a plain loop in tests).
//!
//! Temperature follows the d3-force convention: `alpha` starts at 1.0 and
//! decays toward `alpha_target` each step. The simulation counts as settled
//! once `alpha` drops below `alpha_min`; interactions reheat it.

use std::f64::consts::TAU;

use log::debug;

use super::forces::{CenterForce, ChargeForce, CollideForce, LinkForce};

/// Per-node kinematic state. Only the simulation mutates these fields,
/// except the drag pin which the pointer controller sets through
/// [`Simulation::set_pin`].
#[derive(Clone, Debug, Default)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Drag override. While set, integration snaps the node here and zeroes
	/// its velocity; forces still act on everything around it.
	pub pin: Option<(f64, f64)>,
}

/// A link resolved to arena indices, as consumed by the link force.
#[derive(Clone, Copy, Debug)]
pub struct SimLink {
	pub source: usize,
	pub target: usize,
}

/// Tunable simulation parameters.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
	/// Temperature below which the simulation counts as settled.
	pub alpha_min: f64,
	/// Per-step decay rate of the temperature toward its target.
	pub alpha_decay: f64,
	/// Velocity multiplier applied each step before integration.
	pub velocity_decay: f64,
	/// Hard cap on per-step speed, so force spikes cannot teleport nodes.
	pub max_speed: f64,
	pub link: LinkForce,
	pub charge: ChargeForce,
	pub center: CenterForce,
	pub collide: CollideForce,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			alpha_min: 0.001,
			// Hot to settled in roughly 300 steps.
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
			velocity_decay: 0.6,
			max_speed: 80.0,
			link: LinkForce::default(),
			charge: ChargeForce::default(),
			center: CenterForce::default(),
			collide: CollideForce::default(),
		}
	}
}

/// The force-directed layout engine for one graph.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	config: SimulationConfig,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	stopped: bool,
}

impl Simulation {
	/// Build the arena and start hot. `seeds` supplies one entry per node: a
	/// position carried over from a previous layout, or `None` for the
	/// default placement on a ring around `center`. Ring placement is purely
	/// index-based, so the same input always produces the same start state.
	///
	/// Every link index must be `< seeds.len()`; the caller resolves ids to
	/// indices (and drops dangling links) before construction.
	pub fn new(
		seeds: &[Option<(f64, f64)>],
		links: Vec<SimLink>,
		config: SimulationConfig,
		center: (f64, f64),
	) -> Self {
		let n = seeds.len();
		let ring = 60.0 + 12.0 * (n as f64).sqrt();
		let nodes = seeds
			.iter()
			.enumerate()
			.map(|(i, seed)| {
				let (x, y) = seed.unwrap_or_else(|| {
					let angle = i as f64 * TAU / n.max(1) as f64;
					(center.0 + ring * angle.cos(), center.1 + ring * angle.sin())
				});
				SimNode {
					x,
					y,
					..Default::default()
				}
			})
			.collect();
		debug!("simulation: {} nodes, {} links", n, links.len());

		Self {
			nodes,
			links,
			config,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			stopped: false,
		}
	}

	/// Advance one step if the simulation is live. Returns whether a step
	/// ran, so the host can skip repaint bookkeeping while settled.
	pub fn tick(&mut self) -> bool {
		if self.stopped || self.settled() || self.nodes.is_empty() {
			return false;
		}
		self.step();
		true
	}

	/// Advance exactly one integration step, regardless of temperature.
	pub fn step(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

		self.config
			.link
			.apply(&mut self.nodes, &self.links, self.alpha);
		self.config.charge.apply(&mut self.nodes, self.alpha);
		self.config.center.apply(&mut self.nodes, self.center);
		self.config.collide.apply(&mut self.nodes);

		for node in &mut self.nodes {
			if let Some((px, py)) = node.pin {
				node.x = px;
				node.y = py;
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			node.vx *= self.config.velocity_decay;
			node.vy *= self.config.velocity_decay;
			let speed = (node.vx * node.vx + node.vy * node.vy).sqrt();
			if speed > self.config.max_speed {
				let clamp = self.config.max_speed / speed;
				node.vx *= clamp;
				node.vy *= clamp;
			}
			node.x += node.vx;
			node.y += node.vy;
		}
	}

	/// True once the temperature has decayed below the settle threshold.
	pub fn settled(&self) -> bool {
		self.alpha < self.config.alpha_min
	}

	/// Raise the temperature so subsequent ticks move nodes again. Clears a
	/// prior `stop`, since a reheated simulation is explicitly live.
	pub fn reheat(&mut self, heat: f64) {
		self.alpha = self.alpha.max(heat.clamp(0.0, 1.0));
		self.stopped = false;
	}

	/// Floor the temperature decays toward. Held above `alpha_min` for the
	/// duration of a drag so the layout keeps responding, returned to zero
	/// on release so it can settle.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.clamp(0.0, 1.0);
	}

	/// Halt stepping. Idempotent; `tick` mutates nothing afterwards.
	pub fn stop(&mut self) {
		self.stopped = true;
	}

	/// Retarget the centering force, preserving accumulated positions.
	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = (x, y);
	}

	/// Pin a node to a world position, or release it with `None`. Out of
	/// range indices are ignored.
	pub fn set_pin(&mut self, index: usize, pin: Option<(f64, f64)>) {
		if let Some(node) = self.nodes.get_mut(index) {
			node.pin = pin;
		}
	}

	/// Read-only view of the arena for rendering and hit tests.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Current temperature.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn linked_pair() -> Simulation {
		Simulation::new(
			&[None, None],
			vec![SimLink {
				source: 0,
				target: 1,
			}],
			SimulationConfig::default(),
			(400.0, 300.0),
		)
	}

	fn run_to_rest(sim: &mut Simulation) -> usize {
		let mut steps = 0;
		while sim.tick() {
			steps += 1;
			assert!(steps < 1000, "simulation failed to settle");
		}
		steps
	}

	fn dist(sim: &Simulation, a: usize, b: usize) -> f64 {
		let nodes = sim.nodes();
		let (dx, dy) = (nodes[b].x - nodes[a].x, nodes[b].y - nodes[a].y);
		(dx * dx + dy * dy).sqrt()
	}

	#[test]
	fn empty_graph_is_inert() {
		let mut sim = Simulation::new(&[], vec![], SimulationConfig::default(), (0.0, 0.0));
		assert!(!sim.tick());
		assert!(sim.nodes().is_empty());
	}

	#[test]
	fn single_node_drifts_to_center() {
		let mut sim = Simulation::new(&[None], vec![], SimulationConfig::default(), (400.0, 300.0));
		run_to_rest(&mut sim);
		let node = &sim.nodes()[0];
		assert!((node.x - 400.0).abs() < 1.0);
		assert!((node.y - 300.0).abs() < 1.0);
	}

	#[test]
	fn settles_within_cooldown_window() {
		let mut sim = linked_pair();
		let steps = run_to_rest(&mut sim);
		assert!(sim.settled());
		assert!((250..400).contains(&steps), "settled after {steps} steps");
	}

	#[test]
	fn linked_pair_converges_near_rest_distance() {
		let mut sim = linked_pair();
		run_to_rest(&mut sim);
		let rest = sim.config.link.distance;
		let d = dist(&sim, 0, 1);
		assert!(d > rest * 0.5, "pair collapsed to {d}");
		assert!(d < rest * 2.0, "pair diverged to {d}");
	}

	#[test]
	fn path_graph_lays_out_linearly() {
		let links = vec![
			SimLink {
				source: 0,
				target: 1,
			},
			SimLink {
				source: 1,
				target: 2,
			},
		];
		let mut sim = Simulation::new(
			&[None, None, None],
			links,
			SimulationConfig::default(),
			(400.0, 300.0),
		);
		run_to_rest(&mut sim);
		for node in sim.nodes() {
			assert!(node.x.is_finite() && node.y.is_finite());
		}
		// The unlinked ends repel past the linked neighbors.
		assert!(dist(&sim, 0, 2) > dist(&sim, 0, 1));
		assert!(dist(&sim, 0, 2) > dist(&sim, 1, 2));
	}

	#[test]
	fn layout_settles_around_center() {
		let mut sim = linked_pair();
		run_to_rest(&mut sim);
		let nodes = sim.nodes();
		let cx = nodes.iter().map(|n| n.x).sum::<f64>() / nodes.len() as f64;
		let cy = nodes.iter().map(|n| n.y).sum::<f64>() / nodes.len() as f64;
		assert!((cx - 400.0).abs() < 10.0);
		assert!((cy - 300.0).abs() < 10.0);
	}

	#[test]
	fn star_settles_without_overlap() {
		let links = (1..7)
			.map(|leaf| SimLink {
				source: 0,
				target: leaf,
			})
			.collect();
		let mut sim = Simulation::new(
			&[None; 7],
			links,
			SimulationConfig::default(),
			(400.0, 300.0),
		);
		run_to_rest(&mut sim);
		let min_dist = sim.config.collide.radius * 2.0;
		for i in 0..7 {
			for j in (i + 1)..7 {
				assert!(
					dist(&sim, i, j) >= min_dist - 1e-6,
					"nodes {i} and {j} overlap"
				);
			}
		}
	}

	#[test]
	fn coincident_seeds_separate() {
		let seeds = [Some((100.0, 100.0)), Some((100.0, 100.0))];
		let mut sim = Simulation::new(&seeds, vec![], SimulationConfig::default(), (100.0, 100.0));
		for _ in 0..10 {
			sim.step();
		}
		assert!(dist(&sim, 0, 1) > 1.0);
	}

	#[test]
	fn carried_seeds_take_effect() {
		let seeds = [Some((5.0, 6.0)), None];
		let sim = Simulation::new(&seeds, vec![], SimulationConfig::default(), (400.0, 300.0));
		assert_eq!((sim.nodes()[0].x, sim.nodes()[0].y), (5.0, 6.0));
		assert_ne!((sim.nodes()[1].x, sim.nodes()[1].y), (400.0, 300.0));
	}

	#[test]
	fn identical_input_produces_identical_layout() {
		let mut a = linked_pair();
		let mut b = linked_pair();
		run_to_rest(&mut a);
		run_to_rest(&mut b);
		for (na, nb) in a.nodes().iter().zip(b.nodes()) {
			assert_eq!(na.x, nb.x);
			assert_eq!(na.y, nb.y);
		}
	}

	#[test]
	fn stop_freezes_the_arena() {
		let mut sim = linked_pair();
		sim.step();
		sim.stop();
		sim.stop();
		let before: Vec<(f64, f64)> = sim.nodes().iter().map(|n| (n.x, n.y)).collect();
		for _ in 0..3 {
			assert!(!sim.tick());
		}
		let after: Vec<(f64, f64)> = sim.nodes().iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(before, after);
	}

	#[test]
	fn reheat_wakes_a_settled_simulation() {
		let mut sim = linked_pair();
		run_to_rest(&mut sim);
		assert!(!sim.tick());
		sim.reheat(0.5);
		assert!(!sim.settled());
		assert!(sim.tick());
	}

	#[test]
	fn reheat_clears_stop() {
		let mut sim = linked_pair();
		sim.stop();
		assert!(!sim.tick());
		sim.reheat(0.3);
		assert!(sim.tick());
	}

	#[test]
	fn alpha_target_holds_temperature_up() {
		let mut sim = linked_pair();
		sim.set_alpha_target(0.3);
		for _ in 0..600 {
			sim.step();
		}
		assert!(sim.alpha() > 0.29);
		sim.set_alpha_target(0.0);
		let mut steps = 0;
		while sim.tick() {
			steps += 1;
			assert!(steps < 1000, "never settled after target release");
		}
		assert!(sim.settled());
	}

	#[test]
	fn pinned_node_stays_put() {
		let mut sim = linked_pair();
		sim.set_pin(0, Some((50.0, 60.0)));
		for _ in 0..50 {
			sim.step();
		}
		let node = &sim.nodes()[0];
		assert_eq!((node.x, node.y), (50.0, 60.0));
		assert_eq!((node.vx, node.vy), (0.0, 0.0));
		sim.set_pin(0, None);
		sim.step();
		let node = &sim.nodes()[0];
		assert_ne!((node.x, node.y), (50.0, 60.0));
	}

	#[test]
	fn out_of_range_pin_is_ignored() {
		let mut sim = linked_pair();
		sim.set_pin(99, Some((0.0, 0.0)));
		assert!(sim.nodes().iter().all(|n| n.pin.is_none()));
	}
}
