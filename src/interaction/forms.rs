//! Form drafts as the widgets fill them in, and their validation into values
//! the store accepts.

use crate::error::FormError;
use crate::graph::color::ColorInput;
use crate::graph::{GraphEdge, GraphNode, NodePatch, NodeType};

/// Node fields as typed into the new-node modal or the edit drawer.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeForm {
	pub label: String,
	pub node_type: NodeType,
	pub color: ColorInput,
}

/// A node form that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidNode {
	pub label: String,
	pub node_type: NodeType,
	/// Canonical `#rrggbb`.
	pub color: String,
}

impl Default for NodeForm {
	fn default() -> Self {
		Self::for_type(NodeType::Symptom)
	}
}

impl NodeForm {
	/// Blank form preset to `node_type` and its default color.
	pub fn for_type(node_type: NodeType) -> Self {
		Self {
			label: String::new(),
			node_type,
			color: node_type.color().into(),
		}
	}

	/// Form prefilled from an existing node, for the edit drawer.
	pub fn from_node(node: &GraphNode) -> Self {
		Self {
			label: node.label.clone(),
			node_type: node.node_type,
			color: node.color.as_str().into(),
		}
	}

	/// Switches type and resets the color to that type's default.
	pub fn set_type(&mut self, node_type: NodeType) {
		self.node_type = node_type;
		self.color = node_type.color().into();
	}

	pub fn validate(&self) -> Result<ValidNode, FormError> {
		let label = required(&self.label)?;
		Ok(ValidNode {
			label,
			node_type: self.node_type,
			color: self.color.to_hex()?,
		})
	}
}

impl ValidNode {
	/// Patch replacing label, type and color.
	pub fn into_patch(self) -> NodePatch {
		NodePatch {
			label: Some(self.label),
			node_type: Some(self.node_type),
			color: Some(self.color),
			size: None,
		}
	}
}

/// Relabels an existing edge; the label is required.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeForm {
	pub label: String,
}

impl EdgeForm {
	pub fn from_edge(edge: &GraphEdge) -> Self {
		Self {
			label: edge.label.clone(),
		}
	}

	pub fn validate(&self) -> Result<String, FormError> {
		required(&self.label)
	}
}

/// Label for a link being created. Blank means "use the default label".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkForm {
	pub label: String,
}

impl LinkForm {
	pub fn label(&self) -> Option<&str> {
		Some(self.label.trim()).filter(|l| !l.is_empty())
	}
}

fn required(label: &str) -> Result<String, FormError> {
	let label = label.trim();
	if label.is_empty() {
		Err(FormError::EmptyLabel)
	} else {
		Ok(label.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_form_requires_label() {
		let form = NodeForm {
			label: "   ".into(),
			..NodeForm::default()
		};
		assert_eq!(form.validate(), Err(FormError::EmptyLabel));
	}

	#[test]
	fn node_form_normalizes_color() {
		let form = NodeForm {
			label: " 吞咽疼痛 ".into(),
			node_type: NodeType::Symptom,
			color: ColorInput::Rgb {
				r: 0xfa,
				g: 0x8c,
				b: 0x16,
			},
		};
		let valid = form.validate().unwrap();
		assert_eq!(valid.label, "吞咽疼痛");
		assert_eq!(valid.color, "#fa8c16");
	}

	#[test]
	fn changing_type_resets_color() {
		let mut form = NodeForm::default();
		form.color = "#123456".into();
		form.set_type(NodeType::Treatment);
		assert_eq!(form.color, ColorInput::from("#73d13d"));
	}

	#[test]
	fn link_form_blank_means_default() {
		assert_eq!(LinkForm { label: " ".into() }.label(), None);
		assert_eq!(LinkForm { label: "导致".into() }.label(), Some("导致"));
	}

	#[test]
	fn edge_form_rejects_blank() {
		assert_eq!(EdgeForm::default().validate(), Err(FormError::EmptyLabel));
	}
}
