use reqwest::Method;

use crate::state::{Controllable, StatePatch};
use crate::{Bridge, Error, Result};

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
/// A named set of lights as stored on the bridge
pub struct Group {
	pub name: String,
	/// Ids of the member lights
	pub lights: Vec<String>,
	#[serde(rename = "type")]
	pub group_type: String,
	/// Room class, e.g. "Living room"
	pub class: Option<String>,
	/// Last state sent to the whole group
	pub action: GroupAction,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct GroupAction {
	pub on: bool,
	pub bri: Option<u8>,
	pub hue: Option<u16>,
	pub sat: Option<u8>,
	pub xy: Option<[f64; 2]>,
	pub ct: Option<u16>,
	pub alert: Option<String>,
	pub effect: Option<String>,
	pub colormode: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
/// Body for creating a group
pub struct NewGroup {
	pub lights: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// "LightGroup" when absent, "Room" for rooms
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub group_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub class: Option<String>,
}

impl NewGroup {
	pub fn new<I: IntoIterator<Item = u32>>(lights: I) -> Self {
		NewGroup {
			lights: lights.into_iter().map(|id| id.to_string()).collect(),
			..Default::default()
		}
	}

	pub fn name<S: Into<String>>(mut self, name: S) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Makes this a room of the given class
	pub fn room<S: Into<String>>(mut self, class: S) -> Self {
		self.group_type = Some("Room".into());
		self.class = Some(class.into());
		self
	}

	pub(crate) fn validate(&self) -> Result<()> {
		if self.lights.is_empty() && self.group_type.as_deref() != Some("Room") {
			return Err(Error::validation("a group needs at least one light"));
		}
		Ok(())
	}
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
/// Changes to a group's name, members or class
pub struct GroupUpdate {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub lights: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub class: Option<String>,
}

impl GroupUpdate {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn name<S: Into<String>>(mut self, name: S) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn lights<I: IntoIterator<Item = u32>>(mut self, lights: I) -> Self {
		self.lights = Some(lights.into_iter().map(|id| id.to_string()).collect());
		self
	}

	pub fn class<S: Into<String>>(mut self, class: S) -> Self {
		self.class = Some(class.into());
		self
	}
}

/// Operations on one group.
///
/// Group 0 always exists and contains every light the bridge knows. Groups
/// created by users are numbered from 1.
#[derive(Debug, Clone, Copy)]
pub struct GroupControl<'a> {
	bridge: &'a Bridge,
	id: u32,
}

impl<'a> GroupControl<'a> {
	pub(crate) fn new(bridge: &'a Bridge, id: u32) -> Self {
		GroupControl { bridge, id }
	}

	pub fn id(&self) -> u32 {
		self.id
	}

	pub fn get(&self) -> Result<String> {
		self.bridge.get(&format!("groups/{}", self.id))
	}

	pub fn info(&self) -> Result<Group> {
		Ok(serde_json::from_str(&self.get()?)?)
	}

	pub fn put(&self, update: &GroupUpdate) -> Result<String> {
		self.bridge
			.send_json(Method::PUT, &format!("groups/{}", self.id), update)
	}

	/// Recalls a scene on the group
	pub fn scene(&self, scene: &str) -> Result<String> {
		self.put_state(&StatePatch::new().scene(scene))
	}

	pub fn delete(&self) -> Result<String> {
		self.bridge
			.request(Method::DELETE, &format!("groups/{}", self.id), None)
	}
}

impl<'a> Controllable for GroupControl<'a> {
	fn put_state(&self, patch: &StatePatch) -> Result<String> {
		self.bridge
			.send_json(Method::PUT, &format!("groups/{}/action", self.id), patch)
	}
}
