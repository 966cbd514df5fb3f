//! Bulk terrain replace tooling for the region editor.
//!
//! Two batch operations run over a rectangular multi-selection:
//!
//! 1. **Remap** ([`remap::apply_remap`]) -- rewrite a static ID wherever it
//!    appears in a component's static-ID fields.
//! 2. **Convert** ([`convert::apply_convert`]) -- replace every component of
//!    one variant with a component of another, built from the old
//!    component's dominant value by a [`template::ConstructionTemplate`].
//!
//! Every batch ends the same way: each mutated tile recomputes its derived
//! terrain once, then the [`hooks::RenderSurface`] is invalidated once.
//!
//! ```rust,ignore
//! let request = form.convert_request(&selection)?;
//! let report = apply_convert(&mut region, &request, &mut screen)?;
//! for skip in &report.skips {
//!     eprintln!("{}: {}", skip.tile, skip.error);
//! }
//! ```

pub mod convert;
pub mod form;
pub mod hooks;
pub mod queue;
pub mod remap;
pub mod report;
pub mod request;
pub mod template;

pub use convert::apply_convert;
pub use form::{FieldParseError, ReplaceForm};
pub use hooks::{InvalidationCounter, RenderSurface};
pub use queue::{BatchOutcome, ReplaceQueue};
pub use remap::apply_remap;
pub use report::{BatchReport, ReplaceError, Skip};
pub use request::{ConvertRequest, RemapRequest, ReplaceRequest, VariantRef};
pub use template::ConstructionTemplate;
