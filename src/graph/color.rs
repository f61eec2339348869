//! Color values arrive from several widgets in several shapes; everything is
//! folded into lowercase `#rrggbb` before it is stored on a node.

use serde::Deserialize;

use crate::error::FormError;

/// A color as delivered by a form or by embedded JSON.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColorInput {
	/// Any textual form accepted by [`normalize`].
	Text(String),
	/// Channel triple, as color pickers report it.
	Rgb { r: u8, g: u8, b: u8 },
}

impl ColorInput {
	/// Canonical `#rrggbb` form.
	pub fn to_hex(&self) -> Result<String, FormError> {
		match self {
			Self::Text(s) => normalize(s),
			Self::Rgb { r, g, b } => Ok(hex(*r, *g, *b)),
		}
	}
}

impl From<&str> for ColorInput {
	fn from(s: &str) -> Self {
		Self::Text(s.to_string())
	}
}

impl From<String> for ColorInput {
	fn from(s: String) -> Self {
		Self::Text(s)
	}
}

fn hex(r: u8, g: u8, b: u8) -> String {
	format!("#{r:02x}{g:02x}{b:02x}")
}

/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` (alpha dropped) and `rgb(r, g, b)`.
pub fn normalize(input: &str) -> Result<String, FormError> {
	let s = input.trim();
	let invalid = || FormError::InvalidColor(input.to_string());

	if let Some(digits) = s.strip_prefix('#') {
		if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
			return Err(invalid());
		}
		let digits = digits.to_ascii_lowercase();
		return match digits.len() {
			3 => Ok(digits.chars().fold(String::from("#"), |mut out, c| {
				out.push(c);
				out.push(c);
				out
			})),
			6 => Ok(format!("#{digits}")),
			8 => Ok(format!("#{}", &digits[..6])),
			_ => Err(invalid()),
		};
	}

	let lower = s.to_ascii_lowercase();
	let inner = lower
		.strip_prefix("rgb(")
		.and_then(|rest| rest.strip_suffix(')'))
		.ok_or_else(invalid)?;
	let channels = inner
		.split(',')
		.map(|c| c.trim().parse::<u8>().map_err(|_| invalid()))
		.collect::<Result<Vec<_>, _>>()?;
	match channels.as_slice() {
		[r, g, b] => Ok(hex(*r, *g, *b)),
		_ => Err(invalid()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_hex_forms() {
		assert_eq!(normalize("#FA8C16").unwrap(), "#fa8c16");
		assert_eq!(normalize(" #abc ").unwrap(), "#aabbcc");
		assert_eq!(normalize("#ff4d4fcc").unwrap(), "#ff4d4f");
	}

	#[test]
	fn accepts_rgb_function() {
		assert_eq!(normalize("rgb(255, 77, 79)").unwrap(), "#ff4d4f");
		assert_eq!(normalize("RGB(0,0,0)").unwrap(), "#000000");
	}

	#[test]
	fn rejects_garbage() {
		for bad in ["", "red", "#12", "#gggggg", "rgb(1,2)", "rgb(300,0,0)"] {
			assert_eq!(normalize(bad), Err(FormError::InvalidColor(bad.into())), "{bad}");
		}
	}

	#[test]
	fn picker_object_and_text_agree() {
		let text: ColorInput = serde_json::from_str(r##""#4096ff""##).unwrap();
		let object: ColorInput = serde_json::from_str(r#"{"r":64,"g":150,"b":255}"#).unwrap();
		assert_eq!(text.to_hex(), object.to_hex());
	}
}
