//! Interactive force-directed knowledge-graph explorer.
//!
//! Renders an entity-relation graph on an HTML canvas with:
//! - Physics-based layout via an in-crate force simulation
//! - Pan, zoom, and node dragging interactions
//! - Click-to-select with a synchronous callback carrying the full node
//! - Category-colored nodes and labeled relations
//!
//! # Example
//!
//! ```ignore
//! use atlas_graph::{Category, GraphData, GraphExplorer, Link, Node};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         Node { id: "privacy".into(), label: "Privacy Policy".into(),
//!                group: Category::Policy, description: None },
//!         Node { id: "claims".into(), label: "claims".into(),
//!                group: Category::Table, description: None },
//!     ],
//!     links: vec![
//!         Link { source: "privacy".into(), target: "claims".into(),
//!                relation: "governs".into() },
//!     ],
//! };
//!
//! view! {
//!     <GraphExplorer
//!         data=data.into()
//!         on_select=Callback::new(|node| log::info!("picked {}", node.id))
//!         fullscreen=true
//!     />
//! }
//! ```

mod component;
mod forces;
mod interaction;
mod render;
pub mod scale;
mod simulation;
mod state;
pub mod theme;
mod types;
mod viewport;

pub use component::GraphExplorer;
pub use theme::Theme;
pub use types::{Category, GraphData, GraphDataError, Link, Node};
