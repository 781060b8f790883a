use reqwest::StatusCode;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when talking to a bridge
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The HTTP exchange itself failed (connection, TLS, reading the body).
	#[error("transport error: {0}")]
	Transport(#[from] reqwest::Error),

	/// The bridge answered, but rejected the request.
	#[error("bridge rejected request with status {status}{}", fmt_api_errors(.errors))]
	Bridge {
		status: StatusCode,
		errors: Vec<ApiError>,
	},

	/// A client-side constraint was violated. No request has been sent.
	#[error("invalid argument: {0}")]
	Validation(String),

	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("configuration error: {0}")]
	Config(#[from] config::ConfigError),
}

impl Error {
	pub fn validation<S: Into<String>>(msg: S) -> Self {
		Error::Validation(msg.into())
	}

	/// True if the bridge was reached and refused the request.
	///
	/// Bulk operations can use this to tell a rejected light apart from an
	/// unreachable bridge.
	pub fn is_bridge(&self) -> bool {
		matches!(self, Error::Bridge { .. })
	}

	pub fn is_validation(&self) -> bool {
		matches!(self, Error::Validation(_))
	}
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
/// One entry of the bridge's error envelope
pub struct ApiError {
	#[serde(rename = "type")]
	pub kind: u16,
	#[serde(default)]
	pub address: String,
	#[serde(default)]
	pub description: String,
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "error {} at {}: {}", self.kind, self.address, self.description)
	}
}

/// Extracts the errors a bridge reports inside an otherwise successful
/// response, e.g. `[{"error": {"type": 3, "address": "/lights/9", ...}}]`.
///
/// Every entry with an `error` key counts; one that does not have the usual
/// shape is kept with type 0 and its raw text as description. Bodies that are
/// not a JSON array yield no errors.
pub(crate) fn parse_api_errors(body: &str) -> Vec<ApiError> {
	let entries = match serde_json::from_str::<Vec<serde_json::Value>>(body) {
		Ok(entries) => entries,
		Err(_) => return Vec::new(),
	};
	entries
		.into_iter()
		.filter_map(|mut entry| entry.get_mut("error").map(serde_json::Value::take))
		.map(|error| {
			serde_json::from_value::<ApiError>(error.clone()).unwrap_or_else(|_| ApiError {
				kind: 0,
				address: error
					.get("address")
					.and_then(|a| a.as_str())
					.unwrap_or_default()
					.to_string(),
				description: error.to_string(),
			})
		})
		.collect()
}

fn fmt_api_errors(errors: &[ApiError]) -> String {
	errors.iter().map(|e| format!("; {}", e)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_error_envelope() {
		let body = r#"[
			{"success": {"/lights/1/state/on": true}},
			{"error": {"type": 201, "address": "/lights/1/state/bri", "description": "parameter, bri, is not modifiable. Device is set to off."}}
		]"#;
		let errors = parse_api_errors(body);
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].kind, 201);
		assert_eq!(errors[0].address, "/lights/1/state/bri");
	}

	#[test]
	fn test_malformed_error_entry_still_counts() {
		let body = r#"[{"error": {"type": "link", "address": "/groups/2"}}, {"error": "bridge busy"}]"#;
		let errors = parse_api_errors(body);
		assert_eq!(errors.len(), 2);
		assert_eq!(errors[0].kind, 0);
		assert_eq!(errors[0].address, "/groups/2");
		assert_eq!(errors[1].kind, 0);
		assert_eq!(errors[1].description, r#""bridge busy""#);
	}

	#[test]
	fn test_success_only_has_no_errors() {
		let body = r#"[{"success": {"/lights/1/state/on": true}}]"#;
		assert!(parse_api_errors(body).is_empty());
	}

	#[test]
	fn test_non_array_body_has_no_errors() {
		assert!(parse_api_errors(r#"{"1": {"name": "Hallway"}}"#).is_empty());
		assert!(parse_api_errors("not json").is_empty());
	}

	#[test]
	fn test_bridge_error_display() {
		let err = Error::Bridge {
			status: StatusCode::OK,
			errors: vec![ApiError {
				kind: 3,
				address: "/lights/9".into(),
				description: "resource, /lights/9, not available".into(),
			}],
		};
		assert!(err.is_bridge());
		assert_eq!(
			err.to_string(),
			"bridge rejected request with status 200 OK; error 3 at /lights/9: resource, /lights/9, not available"
		);
	}
}
