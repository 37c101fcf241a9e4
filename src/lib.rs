//! atlas-graph: interactive force-directed explorer for entity-relation
//! knowledge graphs.
//!
//! This crate provides a WASM-based canvas component that lays out policies,
//! organizations, beneficiaries, and data assets with a force simulation and
//! lets the user pan, zoom, drag nodes, and click them to inspect details.
//! Graph data is produced upstream and embedded in the page as JSON; the
//! selection callback hands the full node back to the host.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::graph_explorer::{
	Category, GraphData, GraphDataError, GraphExplorer, Link, Node, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("atlas-graph: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			if let Err(err) = data.validate() {
				warn!("atlas-graph: rejecting embedded graph data: {err}");
				return None;
			}
			info!(
				"atlas-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("atlas-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Built-in demonstration graph: a small policy and data-lineage network
/// shown when the page embeds no (or invalid) data.
fn sample_graph() -> GraphData {
	let node = |id: &str, label: &str, group: Category, description: &str| Node {
		id: id.to_string(),
		label: label.to_string(),
		group,
		description: Some(description.to_string()),
	};
	let link = |source: &str, target: &str, relation: &str| Link {
		source: source.to_string(),
		target: target.to_string(),
		relation: relation.to_string(),
	};

	GraphData {
		nodes: vec![
			node(
				"privacy-policy",
				"Privacy Policy",
				Category::Policy,
				"Rules for handling personally identifiable information",
			),
			node(
				"retention-policy",
				"Data Retention Policy",
				Category::Policy,
				"How long records are kept before deletion",
			),
			node(
				"health-dept",
				"Dept. of Health",
				Category::Organization,
				"State agency overseeing health programs",
			),
			node(
				"benefits-agency",
				"Benefits Agency",
				Category::Organization,
				"Administers enrollment and claims processing",
			),
			node(
				"households",
				"Enrolled Households",
				Category::Beneficiary,
				"Households receiving program benefits",
			),
			node(
				"caregivers",
				"Registered Caregivers",
				Category::Beneficiary,
				"Caregivers acting on behalf of enrollees",
			),
			node(
				"claims",
				"claims",
				Category::Table,
				"One row per submitted claim",
			),
			node(
				"enrollments",
				"enrollments",
				Category::Table,
				"Current program enrollment records",
			),
			node(
				"claims.amount",
				"claims.amount",
				Category::Column,
				"Claimed amount in cents",
			),
			node(
				"claims.member_id",
				"claims.member_id",
				Category::Column,
				"Foreign key to the enrolled member",
			),
			node(
				"enrollments.household_id",
				"enrollments.household_id",
				Category::Column,
				"Identifier of the enrolled household",
			),
		],
		links: vec![
			link("health-dept", "privacy-policy", "administers"),
			link("benefits-agency", "retention-policy", "administers"),
			link("privacy-policy", "claims", "governs"),
			link("retention-policy", "enrollments", "applies_to"),
			link("privacy-policy", "households", "protects"),
			link("benefits-agency", "households", "serves"),
			link("benefits-agency", "caregivers", "serves"),
			link("claims", "claims.amount", "contains"),
			link("claims", "claims.member_id", "contains"),
			link("enrollments", "enrollments.household_id", "contains"),
			link("claims.member_id", "enrollments.household_id", "references"),
			link("households", "enrollments", "recorded_in"),
		],
	}
}

/// Main application component. Loads graph data from the DOM (falling back
/// to the built-in sample) and renders the explorer.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_else(sample_graph);
	let graph_signal = Signal::derive(move || graph_data.clone());
	let on_select = Callback::new(|node: Node| {
		info!(
			"atlas-graph: selected {:?} `{}`: {}",
			node.group,
			node.label,
			node.description.as_deref().unwrap_or("(no description)")
		);
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Knowledge Graph Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphExplorer data=graph_signal on_select=on_select fullscreen=true />
			<div class="graph-overlay">
				<h1>"Knowledge Graph"</h1>
				<p class="subtitle">
					"Click a node for details. Drag nodes to reposition. Scroll to zoom. Drag the background to pan."
				</p>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_graph_is_internally_consistent() {
		let data = sample_graph();
		assert_eq!(data.validate(), Ok(()));
		let (resolved, dropped) = data.resolved_links();
		assert_eq!(dropped, 0);
		assert_eq!(resolved.len(), data.links.len());
	}

	#[test]
	fn sample_graph_covers_every_category() {
		let data = sample_graph();
		for category in [
			Category::Policy,
			Category::Organization,
			Category::Beneficiary,
			Category::Table,
			Category::Column,
		] {
			assert!(
				data.nodes.iter().any(|n| n.group == category),
				"no sample node for {category:?}"
			);
		}
	}
}
