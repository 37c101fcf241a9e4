//! Layout forces composed into each simulation step.
//!
//! Each force is a small parameter struct with an `apply` pass over the node
//! arena. Link and charge accelerate nodes (scaled by the simulation
//! temperature); center and collide adjust positions directly, so collision
//! separation holds even once the simulation has cooled.
//!
//! Charge and collide visit every node pair: O(n²) per tick. That is the
//! known scaling limit of this engine, and acceptable at the graph sizes the
//! explorer targets (hundreds of nodes, not tens of thousands).

use std::f64::consts::TAU;

use super::simulation::{SimLink, SimNode};

/// Deterministic sub-pixel offset derived from a pair's indices. Coincident
/// nodes always separate, and always in the same direction for the same
/// input, so layouts stay reproducible.
fn jitter(seed: usize) -> (f64, f64) {
	let h = (seed as f64 * 12.9898 + 78.233).sin() * 43758.5453;
	let angle = (h - h.floor()) * TAU;
	(1e-3 * angle.cos(), 1e-3 * angle.sin())
}

/// Vector from node `a` to node `b` with its length. Exactly coincident
/// pairs are nudged apart so distance math never divides by zero.
fn separation(nodes: &[SimNode], a: usize, b: usize) -> (f64, f64, f64) {
	let (mut dx, mut dy) = (nodes[b].x - nodes[a].x, nodes[b].y - nodes[a].y);
	let mut d2 = dx * dx + dy * dy;
	if d2 < 1e-12 {
		let (jx, jy) = jitter(a + b * 7919);
		dx = jx;
		dy = jy;
		d2 = dx * dx + dy * dy;
	}
	(dx, dy, d2.sqrt())
}

/// Spring force pulling linked pairs toward a rest distance.
#[derive(Clone, Debug)]
pub struct LinkForce {
	/// Rest length of every link, in world units.
	pub distance: f64,
	/// Spring stiffness. Applied velocity is split evenly between the two
	/// endpoints.
	pub strength: f64,
}

impl Default for LinkForce {
	fn default() -> Self {
		Self {
			distance: 130.0,
			strength: 0.1,
		}
	}
}

impl LinkForce {
	pub fn apply(&self, nodes: &mut [SimNode], links: &[SimLink], alpha: f64) {
		for link in links {
			// Self-loops carry a label but exert no force.
			if link.source == link.target {
				continue;
			}
			let (dx, dy, dist) = separation(nodes, link.source, link.target);
			let f = (dist - self.distance) / dist * self.strength * alpha;
			let (fx, fy) = (dx * f * 0.5, dy * f * 0.5);
			nodes[link.source].vx += fx;
			nodes[link.source].vy += fy;
			nodes[link.target].vx -= fx;
			nodes[link.target].vy -= fy;
		}
	}
}

/// Pairwise repulsion keeping unrelated nodes apart. Negative strength
/// repels; magnitude falls off with distance.
#[derive(Clone, Debug)]
pub struct ChargeForce {
	pub strength: f64,
}

impl Default for ChargeForce {
	fn default() -> Self {
		Self { strength: -600.0 }
	}
}

impl ChargeForce {
	pub fn apply(&self, nodes: &mut [SimNode], alpha: f64) {
		let n = nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let (dx, dy, dist) = separation(nodes, i, j);
				// Clamp the squared distance so near-coincident pairs
				// cannot produce unbounded impulses.
				let w = self.strength * alpha / (dist * dist).max(1.0);
				nodes[i].vx += dx * w;
				nodes[i].vy += dy * w;
				nodes[j].vx -= dx * w;
				nodes[j].vy -= dy * w;
			}
		}
	}
}

/// Drift correction: translates the whole layout a fraction of the way
/// toward the configured center each tick. Relative node spacing is
/// untouched, so a running layout survives a center change intact.
#[derive(Clone, Debug)]
pub struct CenterForce {
	pub strength: f64,
}

impl Default for CenterForce {
	fn default() -> Self {
		Self { strength: 0.08 }
	}
}

impl CenterForce {
	pub fn apply(&self, nodes: &mut [SimNode], center: (f64, f64)) {
		if nodes.is_empty() {
			return;
		}
		let n = nodes.len() as f64;
		let cx = nodes.iter().map(|node| node.x).sum::<f64>() / n;
		let cy = nodes.iter().map(|node| node.y).sum::<f64>() / n;
		let sx = (center.0 - cx) * self.strength;
		let sy = (center.1 - cy) * self.strength;
		for node in nodes.iter_mut().filter(|node| node.pin.is_none()) {
			node.x += sx;
			node.y += sy;
		}
	}
}

/// Hard circle separation at a fixed radius. Position-based and not
/// temperature-scaled, which keeps circles from overlapping even as the
/// simulation cools.
#[derive(Clone, Debug)]
pub struct CollideForce {
	/// Collision radius of every node circle, in world units.
	pub radius: f64,
}

impl Default for CollideForce {
	fn default() -> Self {
		Self { radius: 12.0 }
	}
}

impl CollideForce {
	pub fn apply(&self, nodes: &mut [SimNode]) {
		let min_dist = self.radius * 2.0;
		let n = nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let (dx, dy, dist) = separation(nodes, i, j);
				if dist >= min_dist {
					continue;
				}
				let overlap = min_dist - dist;
				let (ux, uy) = (dx / dist, dy / dist);
				// Pinned nodes never move; the free one absorbs the
				// whole separation instead.
				match (nodes[i].pin.is_some(), nodes[j].pin.is_some()) {
					(true, true) => {}
					(true, false) => {
						nodes[j].x += ux * overlap;
						nodes[j].y += uy * overlap;
					}
					(false, true) => {
						nodes[i].x -= ux * overlap;
						nodes[i].y -= uy * overlap;
					}
					(false, false) => {
						let half = overlap * 0.5;
						nodes[i].x -= ux * half;
						nodes[i].y -= uy * half;
						nodes[j].x += ux * half;
						nodes[j].y += uy * half;
					}
				}
			}
		}
	}
}
