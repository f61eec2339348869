//! Graph data structures shared by the store, the controller and the canvas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Kind of medical entity a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
	/// 疾病
	Disease,
	/// 症状
	Symptom,
	/// 风险因素
	RiskFactor,
	/// 检查
	Examination,
	/// 治疗
	Treatment,
}

impl NodeType {
	/// Every type, in legend order.
	pub const ALL: [NodeType; 5] = [
		NodeType::Disease,
		NodeType::Symptom,
		NodeType::RiskFactor,
		NodeType::Examination,
		NodeType::Treatment,
	];

	/// Name used in serialized data and form values.
	pub fn name(self) -> &'static str {
		match self {
			Self::Disease => "Disease",
			Self::Symptom => "Symptom",
			Self::RiskFactor => "RiskFactor",
			Self::Examination => "Examination",
			Self::Treatment => "Treatment",
		}
	}

	/// Bilingual label shown in selects and the legend.
	pub fn label(self) -> &'static str {
		match self {
			Self::Disease => "疾病 (Disease)",
			Self::Symptom => "症状 (Symptom)",
			Self::RiskFactor => "风险因素 (RiskFactor)",
			Self::Examination => "检查 (Examination)",
			Self::Treatment => "治疗 (Treatment)",
		}
	}

	/// Default fill color, always canonical `#rrggbb`.
	pub fn color(self) -> &'static str {
		match self {
			Self::Disease => "#ff4d4f",
			Self::Symptom => "#fa8c16",
			Self::RiskFactor => "#ffec3d",
			Self::Examination => "#4096ff",
			Self::Treatment => "#73d13d",
		}
	}

	/// Size given to freshly created nodes of this type.
	pub fn default_size(self) -> f64 {
		match self {
			Self::Disease => 50.0,
			_ => 40.0,
		}
	}
}

impl fmt::Display for NodeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for NodeType {
	type Err = FormError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|t| t.name() == s)
			.ok_or_else(|| FormError::UnknownNodeType(s.to_string()))
	}
}

/// A typed entity in the knowledge graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique among all nodes.
	pub id: String,
	pub label: String,
	#[serde(rename = "type")]
	pub node_type: NodeType,
	/// Canonical `#rrggbb`.
	pub color: String,
	/// Display diameter; the configured default applies when unset.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub x: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub y: Option<f64>,
}

/// A labeled, directed relationship between two nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
	/// Assigned by the store when missing from input data.
	#[serde(default)]
	pub id: String,
	pub source: String,
	pub target: String,
	pub label: String,
}

impl GraphEdge {
	/// True if `node_id` is either endpoint.
	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}
}

/// Complete graph data: nodes and edges, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

/// Partial update for a node; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePatch {
	pub label: Option<String>,
	pub node_type: Option<NodeType>,
	pub color: Option<String>,
	pub size: Option<f64>,
}
