use std::collections::BTreeMap;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;

use crate::error::parse_api_errors;
use crate::groups::{Group, GroupControl, NewGroup};
use crate::lights::{Light, LightControl};
use crate::state::Controllable;
use crate::{BridgeConfig, Error, Result};

/// A connection to one Hue bridge.
///
/// Every operation is a blocking HTTP round trip; the bridge holds all state.
#[derive(Debug, Clone)]
pub struct Bridge {
	config: BridgeConfig,
	client: Client,
}

impl Bridge {
	pub fn new(config: BridgeConfig) -> Result<Bridge> {
		if config.accept_invalid_certs {
			warn!("TLS certificate verification disabled for {}", config.base_url);
		}
		let client = Client::builder()
			.danger_accept_invalid_certs(config.accept_invalid_certs)
			.build()?;
		Ok(Bridge { config, client })
	}

	pub fn base_url(&self) -> &str {
		&self.config.base_url
	}

	/// Sends one request to `{base_url}/{path}` and returns the body as is.
	///
	/// A non-2xx status, or a body carrying the bridge's error envelope, is
	/// turned into `Error::Bridge`.
	pub fn request(&self, method: Method, path: &str, body: Option<String>) -> Result<String> {
		let url = self.config.url(path);
		debug!("{} {} {}", method, url, body.as_deref().unwrap_or(""));

		let mut request = self
			.client
			.request(method, &url)
			.header(CONTENT_TYPE, "application/json");
		if let Some(body) = body {
			request = request.body(body);
		}
		let response = request.send()?;
		let status = response.status();
		let text = response.text()?;

		let errors = parse_api_errors(&text);
		if !status.is_success() || !errors.is_empty() {
			debug!("{} answered {}: {}", url, status, text);
			return Err(Error::Bridge { status, errors });
		}
		Ok(text)
	}

	pub(crate) fn get(&self, path: &str) -> Result<String> {
		self.request(Method::GET, path, None)
	}

	pub(crate) fn send_json<T: serde::Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		body: &T,
	) -> Result<String> {
		self.request(method, path, Some(serde_json::to_string(body)?))
	}

	pub fn light(&self, id: u32) -> LightControl<'_> {
		LightControl::new(self, id)
	}

	pub fn group(&self, id: u32) -> GroupControl<'_> {
		GroupControl::new(self, id)
	}

	/// Group 0, which the bridge keeps with every light it knows
	pub fn all_lights(&self) -> GroupControl<'_> {
		self.group(0)
	}

	/// Raw listing of all lights
	pub fn lights(&self) -> Result<String> {
		self.get("lights")
	}

	pub fn light_map(&self) -> Result<BTreeMap<String, Light>> {
		Ok(serde_json::from_str(&self.lights()?)?)
	}

	/// Ids of all lights, ascending
	pub fn light_ids(&self) -> Result<Vec<u32>> {
		let listing: BTreeMap<String, serde_json::Value> = serde_json::from_str(&self.lights()?)?;
		let mut ids = Vec::with_capacity(listing.len());
		for key in listing.keys() {
			let id = key
				.parse()
				.map_err(|_| Error::validation(format!("light id {:?} is not numeric", key)))?;
			ids.push(id);
		}
		ids.sort_unstable();
		Ok(ids)
	}

	/// Raw listing of all groups
	pub fn groups(&self) -> Result<String> {
		self.get("groups")
	}

	pub fn group_map(&self) -> Result<BTreeMap<String, Group>> {
		Ok(serde_json::from_str(&self.groups()?)?)
	}

	/// Creates a group; the bridge assigns the next free id.
	pub fn create_group(&self, group: &NewGroup) -> Result<String> {
		group.validate()?;
		self.send_json(Method::POST, "groups", group)
	}

	/// Runs `action` on every light in `ids`, one after another.
	///
	/// A failing light does not stop the rest.
	pub fn for_each_light<F>(&self, ids: &[u32], mut action: F) -> BulkReport
	where
		F: FnMut(&LightControl<'_>) -> Result<String>,
	{
		let mut outcomes = Vec::with_capacity(ids.len());
		for &id in ids {
			let result = action(&self.light(id));
			if let Err(e) = &result {
				warn!("light {}: {}", id, e);
			}
			outcomes.push((id, result));
		}
		BulkReport { outcomes }
	}

	pub fn turn_all_on(&self) -> Result<BulkReport> {
		let ids = self.light_ids()?;
		Ok(self.for_each_light(&ids, |light| light.on()))
	}

	pub fn turn_all_off(&self) -> Result<BulkReport> {
		let ids = self.light_ids()?;
		Ok(self.for_each_light(&ids, |light| light.off()))
	}
}

/// Per-light outcome of a bulk operation, in the order the requests went out
#[derive(Debug)]
pub struct BulkReport {
	outcomes: Vec<(u32, Result<String>)>,
}

impl BulkReport {
	pub fn outcomes(&self) -> &[(u32, Result<String>)] {
		&self.outcomes
	}

	pub fn succeeded(&self) -> Vec<u32> {
		self.outcomes
			.iter()
			.filter(|(_, r)| r.is_ok())
			.map(|(id, _)| *id)
			.collect()
	}

	pub fn failed(&self) -> Vec<(u32, &Error)> {
		self.outcomes
			.iter()
			.filter_map(|(id, r)| r.as_ref().err().map(|e| (*id, e)))
			.collect()
	}

	pub fn is_success(&self) -> bool {
		self.outcomes.iter().all(|(_, r)| r.is_ok())
	}

	pub fn into_outcomes(self) -> Vec<(u32, Result<String>)> {
		self.outcomes
	}
}
