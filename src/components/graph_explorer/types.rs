//! Graph data structures for input to the explorer component.
//!
//! `GraphData` is the external contract: an upstream producer hands the
//! explorer entities and typed relations as JSON. Link endpoints are string
//! ids at this layer; they are resolved to dense node indices before any
//! layout work so tick-time code never sees a dangling reference.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

/// Entity category, mapped to a color by the theme palette.
///
/// Unrecognized category strings deserialize to [`Category::Unknown`] and
/// render in the palette's neutral fallback color instead of failing the
/// whole graph.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
	/// A policy or rule document.
	Policy,
	/// An organization or agency.
	Organization,
	/// A person or group a policy applies to.
	Beneficiary,
	/// A data table.
	Table,
	/// A column within a data table.
	Column,
	/// Any category this build does not recognize.
	#[default]
	#[serde(other)]
	Unknown,
}

/// An entity in the graph.
#[derive(Clone, Debug, Deserialize)]
pub struct Node {
	/// Unique identifier. Links reference nodes by this id.
	pub id: String,
	/// Display label drawn next to the node circle.
	pub label: String,
	/// Entity category. Missing or unrecognized values become
	/// [`Category::Unknown`].
	#[serde(default)]
	pub group: Category,
	/// Optional longer description, forwarded with the node on selection.
	#[serde(default)]
	pub description: Option<String>,
}

/// A directed, labeled relation between two entities.
#[derive(Clone, Debug, Deserialize)]
pub struct Link {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Relation label (e.g. "administers", "contains").
	pub relation: String,
}

/// Complete graph data: entities and relations.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<Node>,
	pub links: Vec<Link>,
}

/// Violation of the graph integrity rules.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphDataError {
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNodeId(String),
	/// A link endpoint references an id with no matching node.
	#[error("link `{source}` -> `{target}` references unknown node `{missing}`")]
	UnknownEndpoint {
		/// Source id as written in the link.
		source: String,
		/// Target id as written in the link.
		target: String,
		/// Whichever endpoint failed to resolve.
		missing: String,
	},
}

/// A link with endpoints resolved to indices into `GraphData::nodes`.
///
/// `index` points back at the originating entry in `GraphData::links`, which
/// carries the relation label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResolvedLink {
	pub source: usize,
	pub target: usize,
	pub index: usize,
}

impl GraphData {
	/// Check the integrity rules: unique node ids and resolvable link
	/// endpoints. Returns the first violation found.
	pub fn validate(&self) -> Result<(), GraphDataError> {
		let mut seen: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !seen.insert(node.id.as_str()) {
				return Err(GraphDataError::DuplicateNodeId(node.id.clone()));
			}
		}
		for link in &self.links {
			for id in [&link.source, &link.target] {
				if !seen.contains(id.as_str()) {
					return Err(GraphDataError::UnknownEndpoint {
						source: link.source.clone(),
						target: link.target.clone(),
						missing: id.clone(),
					});
				}
			}
		}
		Ok(())
	}

	/// Resolve link endpoints to node indices, dropping links that reference
	/// missing ids. Returns the resolved links and the number dropped so the
	/// caller can log the loss.
	pub fn resolved_links(&self) -> (Vec<ResolvedLink>, usize) {
		let by_id: HashMap<&str, usize> = self
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.as_str(), i))
			.collect();

		let mut dropped = 0;
		let resolved = self
			.links
			.iter()
			.enumerate()
			.filter_map(|(index, link)| {
				match (
					by_id.get(link.source.as_str()),
					by_id.get(link.target.as_str()),
				) {
					(Some(&source), Some(&target)) => Some(ResolvedLink {
						source,
						target,
						index,
					}),
					_ => {
						dropped += 1;
						None
					}
				}
			})
			.collect();
		(resolved, dropped)
	}
}
