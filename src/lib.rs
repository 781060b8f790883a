//! Blocking client for the local REST API of a Hue bridge.
//!
//! ```no_run
//! use hue_rest::{Bridge, BridgeConfig, Controllable};
//!
//! # fn main() -> hue_rest::Result<()> {
//! let config = BridgeConfig::for_bridge("192.168.1.2", "my-username").accept_invalid_certs(true);
//! let bridge = Bridge::new(config)?;
//! bridge.light(1).rgb(255, 128, 0)?;
//! bridge.group(0).off()?;
//! # Ok(())
//! # }
//! ```
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;
extern crate config;
extern crate reqwest;
extern crate serde;
extern crate serde_json;
extern crate thiserror;

pub mod error;
pub use error::{ApiError, Error, Result};
pub mod settings;
pub use settings::BridgeConfig;
pub mod bridge;
pub use bridge::{Bridge, BulkReport};
pub mod color;
pub use color::rgb_to_xy;
pub mod state;
pub use state::{Alert, Controllable, Effect, StatePatch};
pub mod lights;
pub use lights::{Light, LightControl, LightState};
pub mod groups;
pub use groups::{Group, GroupAction, GroupControl, GroupUpdate, NewGroup};
