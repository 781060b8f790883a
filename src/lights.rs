use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use crate::state::{Controllable, StatePatch};
use crate::{Bridge, Error, Result};

/// Longest name the bridge stores for a light
pub const MAX_NAME_LEN: usize = 32;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
/// Attributes of a light
pub struct Light {
	pub uniqueid: String,
	#[serde(rename = "type")]
	pub light_type: String,
	pub name: String,
	pub modelid: String,
	pub manufacturername: String,
	pub productid: String,
	pub state: LightState,
	pub swversion: String,
	pub swconfigid: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
/// Current state of a light
pub struct LightState {
	pub on: bool,
	/// Brightness
	pub bri: u8,
	pub hue: Option<u16>,
	pub sat: Option<u8>,
	pub xy: Option<[f64; 2]>,
	/// Color tone
	pub ct: Option<u16>,
	/// Alert mode
	pub alert: String,
	pub effect: Option<String>,
	pub colormode: Option<String>,
	pub mode: Option<String>,
	pub reachable: bool,
}

/// Operations on one light
#[derive(Debug, Clone, Copy)]
pub struct LightControl<'a> {
	bridge: &'a Bridge,
	id: u32,
}

impl<'a> LightControl<'a> {
	pub(crate) fn new(bridge: &'a Bridge, id: u32) -> Self {
		LightControl { bridge, id }
	}

	pub fn id(&self) -> u32 {
		self.id
	}

	/// Attributes and state, as sent by the bridge
	pub fn get(&self) -> Result<String> {
		self.bridge.get(&format!("lights/{}", self.id))
	}

	pub fn info(&self) -> Result<Light> {
		Ok(serde_json::from_str(&self.get()?)?)
	}

	/// Updates the light's attributes (not its state)
	pub fn put<T: Serialize + ?Sized>(&self, attributes: &T) -> Result<String> {
		self.bridge
			.send_json(Method::PUT, &format!("lights/{}", self.id), attributes)
	}

	/// Renames the light. Names must be 1 to 32 characters; longer ones are
	/// refused rather than cut.
	pub fn rename(&self, name: &str) -> Result<String> {
		let len = name.chars().count();
		if len == 0 || len > MAX_NAME_LEN {
			return Err(Error::validation(format!(
				"light name must be 1 to {} characters, got {}",
				MAX_NAME_LEN, len
			)));
		}
		self.put(&serde_json::json!({ "name": name }))
	}

	/// Fades brightness from `start` to `end` over `duration`.
	///
	/// Sets `start` right away, then hands `end` to the bridge together with
	/// the transition time, so the fade itself runs on the bridge.
	pub fn brightness_linear_inc(&self, duration: Duration, start: u8, end: u8) -> Result<()> {
		if start >= end {
			return Err(Error::validation(format!(
				"start brightness {} must be smaller than end brightness {}",
				start, end
			)));
		}
		let deciseconds = duration.as_millis() / 100;
		if deciseconds > u128::from(u16::MAX) {
			return Err(Error::validation(format!(
				"transition of {:?} is too long",
				duration
			)));
		}
		self.put_state(&StatePatch::new().bri(start))?;
		self.put_state(&StatePatch::new().bri(end).transitiontime(deciseconds as u16))?;
		Ok(())
	}

	/// Fades from the dimmest to the brightest level
	pub fn brightness_ramp(&self, duration: Duration) -> Result<()> {
		self.brightness_linear_inc(duration, 0, 254)
	}

	/// Removes the light from the bridge
	pub fn delete(&self) -> Result<String> {
		self.bridge
			.request(Method::DELETE, &format!("lights/{}", self.id), None)
	}
}

impl<'a> Controllable for LightControl<'a> {
	fn put_state(&self, patch: &StatePatch) -> Result<String> {
		self.bridge
			.send_json(Method::PUT, &format!("lights/{}/state", self.id), patch)
	}
}
