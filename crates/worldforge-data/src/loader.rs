//! Reads plan files and resolves them into replace requests.

use crate::schema::{PlanData, RectData, RequestData};
use std::path::{Path, PathBuf};
use tracing::debug;
use worldforge_core::component::VariantKind;
use worldforge_core::id::StaticId;
use worldforge_core::selection::{Rectangle, Selection};
use worldforge_replace::{ConvertRequest, RemapRequest, ReplaceQueue, ReplaceRequest, VariantRef};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A conversion names a source type that does not exist.
    #[error("request {index} in {file}: unknown source component type '{name}'")]
    UnresolvedSource {
        file: PathBuf,
        index: usize,
        name: String,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported plan file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    /// Detect the format of a file based on its extension.
    pub fn detect(path: &Path) -> Result<Format, PlanLoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Ok(Format::Ron),
            Some("toml") => Ok(Format::Toml),
            Some("json") => Ok(Format::Json),
            _ => Err(PlanLoadError::UnsupportedFormat {
                file: path.to_path_buf(),
            }),
        }
    }
}

// ===========================================================================
// Plan
// ===========================================================================

/// A resolved, ordered list of requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacePlan {
    pub requests: Vec<ReplaceRequest>,
}

impl ReplacePlan {
    /// Queue every request for execution, retaining up to `max_history`
    /// executed entries.
    pub fn into_queue(self, max_history: usize) -> ReplaceQueue {
        let mut queue = ReplaceQueue::with_max_history(max_history);
        queue.push_batch(self.requests);
        queue
    }
}

// ===========================================================================
// Loading
// ===========================================================================

/// Read a plan file, picking the format from its extension.
pub fn load_plan(path: &Path) -> Result<ReplacePlan, PlanLoadError> {
    let format = Format::detect(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_plan(&content, format, path)
}

/// Parse plan text. `origin` only labels errors.
pub fn parse_plan(content: &str, format: Format, origin: &Path) -> Result<ReplacePlan, PlanLoadError> {
    let parse_error = |detail: String| PlanLoadError::Parse {
        file: origin.to_path_buf(),
        detail,
    };
    let data: PlanData = match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
    };

    let requests = data
        .requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| resolve_request(index, request, origin))
        .collect::<Result<Vec<_>, PlanLoadError>>()?;

    debug!(file = %origin.display(), requests = requests.len(), "replace plan loaded");
    Ok(ReplacePlan { requests })
}

/// Resolve one request. Unknown sources are an error; unknown targets are
/// kept by name so the engine reports them per component.
fn resolve_request(
    index: usize,
    request: RequestData,
    origin: &Path,
) -> Result<ReplaceRequest, PlanLoadError> {
    match request {
        RequestData::Remap {
            from,
            to,
            selection,
        } => Ok(ReplaceRequest::Remap(RemapRequest {
            from: StaticId(from),
            to: StaticId(to),
            selection: resolve_selection(&selection),
        })),
        RequestData::Convert {
            source,
            target,
            filter,
            selection,
        } => {
            let source_kind =
                VariantKind::resolve(&source).ok_or_else(|| PlanLoadError::UnresolvedSource {
                    file: origin.to_path_buf(),
                    index,
                    name: source.clone(),
                })?;
            Ok(ReplaceRequest::Convert(ConvertRequest {
                source: VariantRef::Kind(source_kind),
                target: VariantRef::from(target.as_str()),
                static_filter: filter.map(StaticId),
                selection: resolve_selection(&selection),
            }))
        }
    }
}

fn resolve_selection(rects: &[RectData]) -> Selection {
    rects
        .iter()
        .map(|r| Rectangle::new(r.x, r.y, r.width, r.height))
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
