use crate::color::rgb_to_xy;
use crate::Result;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Temporary breathe effect
pub enum Alert {
	None,
	/// One breathe cycle
	Select,
	/// Breathe cycles for 15 seconds or until `Alert::None` is sent
	LSelect,
}

impl Default for Alert {
	fn default() -> Self {
		Alert::None
	}
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Dynamic effect
pub enum Effect {
	None,
	/// Cycles through all hues at the current brightness and saturation
	ColorLoop,
}

impl Default for Effect {
	fn default() -> Self {
		Effect::None
	}
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
/// Partial update of a light's or group's state.
///
/// Only the attributes that were set end up in the request body.
pub struct StatePatch {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub on: Option<bool>,
	/// Brightness, 1 (dimmest, not off) to 254
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bri: Option<u8>,
	/// Wrapping hue, 0 and 65535 are red, 25500 green, 46920 blue
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hue: Option<u16>,
	/// Saturation, 0 (white) to 254 (most colored)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sat: Option<u8>,
	/// CIE xy coordinates, each in 0..=1
	#[serde(skip_serializing_if = "Option::is_none")]
	pub xy: Option<[f64; 2]>,
	/// Color temperature in mired
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ct: Option<u16>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub alert: Option<Alert>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub effect: Option<Effect>,
	/// Transition duration in multiples of 100ms
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transitiontime: Option<u16>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bri_inc: Option<i16>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sat_inc: Option<i16>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hue_inc: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ct_inc: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub xy_inc: Option<[f64; 2]>,
	/// Scene to recall, only meaningful for groups
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scene: Option<String>,
}

impl StatePatch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn on(mut self, on: bool) -> Self {
		self.on = Some(on);
		self
	}

	pub fn bri(mut self, bri: u8) -> Self {
		self.bri = Some(bri);
		self
	}

	pub fn hue(mut self, hue: u16) -> Self {
		self.hue = Some(hue);
		self
	}

	pub fn sat(mut self, sat: u8) -> Self {
		self.sat = Some(sat);
		self
	}

	pub fn xy(mut self, x: f64, y: f64) -> Self {
		self.xy = Some([x, y]);
		self
	}

	pub fn ct(mut self, ct: u16) -> Self {
		self.ct = Some(ct);
		self
	}

	pub fn alert(mut self, alert: Alert) -> Self {
		self.alert = Some(alert);
		self
	}

	pub fn effect(mut self, effect: Effect) -> Self {
		self.effect = Some(effect);
		self
	}

	pub fn transitiontime(mut self, deciseconds: u16) -> Self {
		self.transitiontime = Some(deciseconds);
		self
	}

	pub fn bri_inc(mut self, inc: i16) -> Self {
		self.bri_inc = Some(inc);
		self
	}

	pub fn sat_inc(mut self, inc: i16) -> Self {
		self.sat_inc = Some(inc);
		self
	}

	pub fn hue_inc(mut self, inc: i32) -> Self {
		self.hue_inc = Some(inc);
		self
	}

	pub fn ct_inc(mut self, inc: i32) -> Self {
		self.ct_inc = Some(inc);
		self
	}

	pub fn xy_inc(mut self, x: f64, y: f64) -> Self {
		self.xy_inc = Some([x, y]);
		self
	}

	pub fn scene<S: Into<String>>(mut self, scene: S) -> Self {
		self.scene = Some(scene.into());
		self
	}

	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

/// Something whose state can be patched: a single light or a group.
///
/// Every setter sends exactly one request containing only its own attribute
/// and returns the bridge's raw answer.
pub trait Controllable {
	fn put_state(&self, patch: &StatePatch) -> Result<String>;

	fn on(&self) -> Result<String> {
		self.put_state(&StatePatch::new().on(true))
	}

	fn off(&self) -> Result<String> {
		self.put_state(&StatePatch::new().on(false))
	}

	fn bri(&self, bri: u8) -> Result<String> {
		self.put_state(&StatePatch::new().bri(bri))
	}

	fn hue(&self, hue: u16) -> Result<String> {
		self.put_state(&StatePatch::new().hue(hue))
	}

	fn sat(&self, sat: u8) -> Result<String> {
		self.put_state(&StatePatch::new().sat(sat))
	}

	fn xy(&self, x: f64, y: f64) -> Result<String> {
		self.put_state(&StatePatch::new().xy(x, y))
	}

	/// Sets the color from sRGB, converted to xy on the client
	fn rgb(&self, red: u8, green: u8, blue: u8) -> Result<String> {
		let [x, y] = rgb_to_xy(red, green, blue);
		self.xy(x, y)
	}

	fn ct(&self, mired: u16) -> Result<String> {
		self.put_state(&StatePatch::new().ct(mired))
	}

	fn alert(&self, alert: Alert) -> Result<String> {
		self.put_state(&StatePatch::new().alert(alert))
	}

	fn effect(&self, effect: Effect) -> Result<String> {
		self.put_state(&StatePatch::new().effect(effect))
	}

	/// Starts or stops the color loop
	fn colorloop(&self, enabled: bool) -> Result<String> {
		self.effect(if enabled { Effect::ColorLoop } else { Effect::None })
	}

	fn transitiontime(&self, deciseconds: u16) -> Result<String> {
		self.put_state(&StatePatch::new().transitiontime(deciseconds))
	}

	/// Ignored by the bridge if `bri` is part of the same patch. 0 stops a
	/// running transition.
	fn bri_inc(&self, inc: i16) -> Result<String> {
		self.put_state(&StatePatch::new().bri_inc(inc))
	}

	fn sat_inc(&self, inc: i16) -> Result<String> {
		self.put_state(&StatePatch::new().sat_inc(inc))
	}

	/// The resulting hue wraps around at 0 and 65535.
	fn hue_inc(&self, inc: i32) -> Result<String> {
		self.put_state(&StatePatch::new().hue_inc(inc))
	}

	fn ct_inc(&self, inc: i32) -> Result<String> {
		self.put_state(&StatePatch::new().ct_inc(inc))
	}

	/// Stops at the gamut boundary. Each increment is at most 0.5.
	fn xy_inc(&self, x: f64, y: f64) -> Result<String> {
		self.put_state(&StatePatch::new().xy_inc(x, y))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::cell::RefCell;

	#[derive(Default)]
	struct Recorder {
		sent: RefCell<Vec<serde_json::Value>>,
	}

	impl Controllable for Recorder {
		fn put_state(&self, patch: &StatePatch) -> Result<String> {
			self.sent.borrow_mut().push(serde_json::to_value(patch)?);
			Ok("[]".into())
		}
	}

	#[test]
	fn test_empty_patch() {
		let patch = StatePatch::new();
		assert!(patch.is_empty());
		assert_eq!(serde_json::to_value(&patch).unwrap(), json!({}));
	}

	#[test]
	fn test_only_set_fields_serialized() {
		let patch = StatePatch::new().bri(100);
		assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"bri":100}"#);

		let patch = StatePatch::new().bri(254).transitiontime(50);
		assert_eq!(
			serde_json::to_value(&patch).unwrap(),
			json!({"bri": 254, "transitiontime": 50})
		);
	}

	#[test]
	fn test_enum_wire_names() {
		let patch = StatePatch::new().alert(Alert::LSelect).effect(Effect::ColorLoop);
		assert_eq!(
			serde_json::to_value(&patch).unwrap(),
			json!({"alert": "lselect", "effect": "colorloop"})
		);
	}

	#[test]
	fn test_increments_and_scene() {
		let patch = StatePatch::new()
			.hue_inc(-2)
			.xy_inc(0.1, -0.05)
			.scene("AB34EF5");
		assert_eq!(
			serde_json::to_value(&patch).unwrap(),
			json!({"hue_inc": -2, "xy_inc": [0.1, -0.05], "scene": "AB34EF5"})
		);
	}

	#[test]
	fn test_setters_send_single_key() {
		let target = Recorder::default();
		target.on().unwrap();
		target.on().unwrap();
		target.off().unwrap();
		target.ct(153).unwrap();
		target.colorloop(false).unwrap();
		target.rgb(255, 255, 255).unwrap();
		assert_eq!(
			*target.sent.borrow(),
			vec![
				json!({"on": true}),
				json!({"on": true}),
				json!({"on": false}),
				json!({"ct": 153}),
				json!({"effect": "none"}),
				json!({"xy": [0.313, 0.329]}),
			]
		);
	}
}
