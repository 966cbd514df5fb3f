//! Replace plan loading for the region editor.
//!
//! A replace plan is a file of batch requests (remaps and conversions) that
//! can be replayed against a region, e.g. to apply the same retexturing to
//! many maps. Plans are written in RON, TOML or JSON; the format is picked
//! from the file extension.

pub mod loader;
pub mod schema;

pub use loader::{Format, PlanLoadError, ReplacePlan, load_plan, parse_plan};
