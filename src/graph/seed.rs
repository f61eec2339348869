//! The dataset the editor starts from.

use super::types::{GraphData, GraphEdge, GraphNode, NodeType};

const NODES: &[(&str, &str, NodeType, Option<f64>)] = &[
	("1", "食管癌", NodeType::Disease, Some(60.0)),
	("2", "进行性吞咽困难", NodeType::Symptom, None),
	("3", "胸骨后疼痛", NodeType::Symptom, None),
	("4", "消瘦/贫血", NodeType::Symptom, None),
	("5", "吸烟与重度饮酒", NodeType::RiskFactor, None),
	("6", "亚硝胺(腌制食品)", NodeType::RiskFactor, None),
	("7", "进食过烫", NodeType::RiskFactor, None),
	("8", "胃镜检查", NodeType::Examination, None),
	("9", "病理活检", NodeType::Examination, None),
	("10", "CT扫描", NodeType::Examination, None),
	("11", "手术切除", NodeType::Treatment, None),
	("12", "放射治疗", NodeType::Treatment, None),
	("13", "化学治疗", NodeType::Treatment, None),
	("14", "食管鳞状细胞癌", NodeType::Disease, None),
	("15", "食管腺癌", NodeType::Disease, None),
];

const EDGES: &[(&str, &str, &str)] = &[
	("1", "2", "临床表现"),
	("1", "3", "临床表现"),
	("1", "4", "伴随症状"),
	("5", "1", "诱发"),
	("6", "1", "诱发"),
	("7", "1", "高危因素"),
	("1", "8", "首选检查"),
	("8", "9", "确诊依据"),
	("1", "10", "辅助分期"),
	("1", "11", "早期治疗"),
	("1", "12", "联合治疗"),
	("1", "13", "联合治疗"),
	("14", "1", "属于"),
	("15", "1", "属于"),
];

/// Esophageal cancer graph: 15 nodes, 14 edges. Edge ids are left empty and
/// assigned when the store loads the data.
pub fn initial_data() -> GraphData {
	let nodes = NODES
		.iter()
		.map(|&(id, label, node_type, size)| GraphNode {
			id: id.into(),
			label: label.into(),
			node_type,
			color: node_type.color().into(),
			size,
			x: None,
			y: None,
		})
		.collect();

	let edges = EDGES
		.iter()
		.map(|&(source, target, label)| GraphEdge {
			id: String::new(),
			source: source.into(),
			target: target.into(),
			label: label.into(),
		})
		.collect();

	GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn seed_shape() {
		let data = initial_data();
		assert_eq!(data.nodes.len(), 15);
		assert_eq!(data.edges.len(), 14);
		assert!(data.edges.iter().all(|e| e.touches("1") || e.source == "8"));
	}
}
