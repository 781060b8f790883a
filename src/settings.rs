use crate::Result;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
/// Where the bridge lives and how to talk to it
pub struct BridgeConfig {
	/// API root including the username, e.g. `https://192.168.1.2/api/<username>`
	pub base_url: String,
	/// Skip TLS certificate verification.
	///
	/// Bridges serve self-signed certificates, so HTTPS access to one usually
	/// needs this. It is off unless asked for.
	#[serde(default)]
	pub accept_invalid_certs: bool,
}

impl BridgeConfig {
	pub fn new<S: Into<String>>(base_url: S) -> Self {
		BridgeConfig {
			base_url: base_url.into(),
			accept_invalid_certs: false,
		}
	}

	/// Config for the API of `host`, authenticated as `username`
	pub fn for_bridge(host: &str, username: &str) -> Self {
		Self::new(format!("https://{}/api/{}", host, username))
	}

	pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
		self.accept_invalid_certs = accept;
		self
	}

	/// Reads the config from the file at `path` (if it exists), with `HUE_*`
	/// environment variables taking precedence.
	pub fn load(path: &str) -> Result<Self> {
		let config: BridgeConfig = config::Config::builder()
			.add_source(config::File::with_name(path).required(false))
			.add_source(config::Environment::with_prefix("HUE"))
			.build()?
			.try_deserialize()?;
		Ok(config)
	}

	/// `base_url` joined with a relative resource path
	pub fn url(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.base_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Mutex;

	#[test]
	fn test_for_bridge() {
		let config = BridgeConfig::for_bridge("192.168.1.2", "newdeveloper");
		assert_eq!(config.base_url, "https://192.168.1.2/api/newdeveloper");
		assert!(!config.accept_invalid_certs);
		assert!(config.accept_invalid_certs(true).accept_invalid_certs);
	}

	#[test]
	fn test_url_joins_single_separator() {
		let config = BridgeConfig::new("http://bridge/api/user/");
		assert_eq!(config.url("lights/1/state"), "http://bridge/api/user/lights/1/state");
		assert_eq!(config.url("/groups"), "http://bridge/api/user/groups");
	}

	#[test]
	fn test_deserialize_defaults_cert_check_on() {
		let config: BridgeConfig =
			serde_json::from_str(r#"{"base_url": "http://bridge/api/user"}"#).unwrap();
		assert_eq!(config, BridgeConfig::new("http://bridge/api/user"));
	}

	// The environment is process-wide, so tests touching HUE_* take turns.
	static ENV_LOCK: Mutex<()> = Mutex::new(());

	fn clear_env() {
		std::env::remove_var("HUE_BASE_URL");
		std::env::remove_var("HUE_ACCEPT_INVALID_CERTS");
	}

	#[test]
	fn test_load_missing_file_without_env_fails() {
		let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
		clear_env();
		let result = BridgeConfig::load("definitely-not-a-config-file");
		assert!(matches!(result, Err(crate::Error::Config(_))));
	}

	#[test]
	fn test_load_file_then_env() {
		let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
		clear_env();
		let path = std::env::temp_dir().join(format!("hue-rest-{}.toml", std::process::id()));
		std::fs::write(&path, "base_url = \"http://file/api/u\"\n").unwrap();
		let path = path.to_str().unwrap().to_string();

		let from_file = BridgeConfig::load(&path).unwrap();
		assert_eq!(from_file, BridgeConfig::new("http://file/api/u"));

		std::env::set_var("HUE_BASE_URL", "http://env/api/u");
		std::env::set_var("HUE_ACCEPT_INVALID_CERTS", "true");
		let from_env = BridgeConfig::load(&path);
		clear_env();
		std::fs::remove_file(&path).ok();

		assert_eq!(
			from_env.unwrap(),
			BridgeConfig::new("http://env/api/u").accept_invalid_certs(true)
		);
	}
}
