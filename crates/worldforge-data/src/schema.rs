//! Serde structs for replace plan files.
//!
//! A plan is an ordered list of remap and convert requests. Plans are
//! deserialized from RON, JSON or TOML and then resolved into engine
//! requests by the loader.

use serde::Deserialize;

/// Top level of a plan file.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanData {
    #[serde(default)]
    pub requests: Vec<RequestData>,
}

/// One request in a plan file.
#[derive(Debug, Clone, Deserialize)]
pub enum RequestData {
    Remap {
        from: i32,
        to: i32,
        selection: Vec<RectData>,
    },
    Convert {
        source: String,
        target: String,
        /// Only convert components whose dominant value equals this.
        #[serde(default)]
        filter: Option<i32>,
        selection: Vec<RectData>,
    },
}

/// A selection rectangle. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RectData {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}
