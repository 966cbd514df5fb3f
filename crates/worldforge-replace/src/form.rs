//! The replace window's input fields, turned into immutable requests.
//!
//! The window collects two ID text fields for a remap, and two type pickers
//! plus a static filter text field for a conversion. Parsing happens here,
//! once, so the engine only ever sees valid integers and resolved (or
//! explicitly unresolved) variant names.

use crate::request::{ConvertRequest, RemapRequest, VariantRef};
use worldforge_core::id::StaticId;
use worldforge_core::selection::Selection;

/// Filter text that means "no filter".
const NO_FILTER: i32 = -1;

/// Errors from reading the form's fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldParseError {
    #[error("{field} is not a whole number: '{text}'")]
    NotAnInteger { field: &'static str, text: String },
    #[error("no component type chosen for {field}")]
    NothingChosen { field: &'static str },
}

/// Snapshot of the replace window's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceForm {
    /// "Static ID to find".
    pub id_from: String,
    /// "Static ID to replace with".
    pub id_to: String,
    /// "Type of component to find", one of [`VariantKind::choices`].
    ///
    /// [`VariantKind::choices`]: worldforge_core::component::VariantKind::choices
    pub component_from: Option<String>,
    /// "Static ID filter of component to replace". Blank means no filter.
    pub static_filter: String,
    /// "Type of component to replace with".
    pub component_to: Option<String>,
}

impl ReplaceForm {
    /// Build a remap request. Both ID fields must parse.
    pub fn remap_request(&self, selection: &Selection) -> Result<RemapRequest, FieldParseError> {
        Ok(RemapRequest {
            from: parse_static_id("static ID to find", &self.id_from)?,
            to: parse_static_id("static ID to replace with", &self.id_to)?,
            selection: selection.clone(),
        })
    }

    /// Build a conversion request. Both pickers must be chosen; the filter
    /// never fails to parse.
    pub fn convert_request(&self, selection: &Selection) -> Result<ConvertRequest, FieldParseError> {
        let source = self
            .component_from
            .as_deref()
            .ok_or(FieldParseError::NothingChosen {
                field: "type of component to find",
            })?;
        let target = self
            .component_to
            .as_deref()
            .ok_or(FieldParseError::NothingChosen {
                field: "type of component to replace with",
            })?;
        Ok(ConvertRequest {
            source: VariantRef::from(source),
            target: VariantRef::from(target),
            static_filter: parse_static_filter(&self.static_filter),
            selection: selection.clone(),
        })
    }
}

/// Parse a static ID typed into a text field.
pub fn parse_static_id(field: &'static str, text: &str) -> Result<StaticId, FieldParseError> {
    text.trim()
        .parse::<i32>()
        .map(StaticId)
        .map_err(|_| FieldParseError::NotAnInteger {
            field,
            text: text.to_string(),
        })
}

/// Parse the static filter field. Blank, unparseable and `-1` all mean
/// "no filter".
pub fn parse_static_filter(text: &str) -> Option<StaticId> {
    match text.trim().parse::<i32>() {
        Ok(NO_FILTER) | Err(_) => None,
        Ok(value) => Some(StaticId(value)),
    }
}
