//! Editor configuration and page-embedded overrides.
//!
//! A page may carry `<script type="application/json" id="editor-config">` with
//! any subset of [`EditorConfig`] fields, and `<script id="graph-data">` with a
//! full dataset replacing the built-in seed.

use force_graph::SimulationParameters;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::error::ConfigError;
use crate::graph::GraphData;

/// Label given to edges created without one.
pub const DEFAULT_EDGE_LABEL: &str = "关联";

/// Id of the script element holding configuration overrides.
pub const CONFIG_ELEMENT: &str = "editor-config";
/// Id of the script element holding a dataset.
pub const DATA_ELEMENT: &str = "graph-data";

/// Force simulation tuning, handed to `force_graph`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	pub node_mass: f32,
	/// Radius of the circle new nodes are placed on before the simulation runs.
	pub initial_radius: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			force_charge: 1200.0,
			force_spring: 0.04,
			force_max: 120.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			initial_radius: 220.0,
		}
	}
}

impl LayoutConfig {
	pub fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// Top-level editor settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
	pub title: String,
	pub default_edge_label: String,
	/// Diameter used for nodes without an explicit size.
	pub default_node_size: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	/// How long a toast notice stays up, in milliseconds.
	pub notice_ms: u64,
	pub layout: LayoutConfig,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			title: "食管癌知识图谱管理系统".into(),
			default_edge_label: DEFAULT_EDGE_LABEL.into(),
			default_node_size: 40.0,
			min_zoom: 0.1,
			max_zoom: 10.0,
			notice_ms: 2500,
			layout: LayoutConfig::default(),
		}
	}
}

impl EditorConfig {
	/// Parses a JSON override; unspecified fields keep their defaults.
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		parse_json(CONFIG_ELEMENT, text)
	}

	/// Reads `#editor-config` from the page, falling back to defaults.
	pub fn load() -> Self {
		match read_script(CONFIG_ELEMENT).map(|text| Self::from_json(&text)) {
			Some(Ok(config)) => {
				info!("editor config loaded from #{CONFIG_ELEMENT}");
				config
			}
			Some(Err(e)) => {
				warn!("{e}; using default config");
				Self::default()
			}
			None => Self::default(),
		}
	}
}

/// Reads a dataset from `#graph-data`, if the page provides a valid one.
pub fn load_graph_data() -> Option<GraphData> {
	let text = read_script(DATA_ELEMENT)?;
	match parse_json::<GraphData>(DATA_ELEMENT, &text) {
		Ok(data) => {
			info!(
				"loaded {} nodes, {} edges from #{DATA_ELEMENT}",
				data.nodes.len(),
				data.edges.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("{e}; using built-in dataset");
			None
		}
	}
}

fn parse_json<T: DeserializeOwned>(element: &'static str, text: &str) -> Result<T, ConfigError> {
	serde_json::from_str(text).map_err(|source| ConfigError::Json { element, source })
}

fn read_script(id: &str) -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_defaults() {
		let json = r#"{"default_edge_label":"related","layout":{"force_charge":50}}"#;
		let config = EditorConfig::from_json(json).unwrap();
		assert_eq!(config.default_edge_label, "related");
		assert_eq!(config.layout.force_charge, 50.0);
		assert_eq!(config.layout.force_spring, LayoutConfig::default().force_spring);
		assert_eq!(config.title, EditorConfig::default().title);
	}

	#[test]
	fn bad_json_names_the_element() {
		let err = EditorConfig::from_json("{").unwrap_err();
		assert!(err.to_string().contains(CONFIG_ELEMENT));
	}
}
