//! Immutable batch requests built once at the editor boundary.

use crate::convert::apply_convert;
use crate::hooks::RenderSurface;
use crate::remap::apply_remap;
use crate::report::{BatchReport, ReplaceError};
use serde::{Deserialize, Serialize};
use worldforge_core::component::VariantKind;
use worldforge_core::id::StaticId;
use worldforge_core::region::Region;
use worldforge_core::selection::Selection;

/// A variant as the caller named it: already resolved to a tag, or a raw
/// type name that is resolved when the batch starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantRef {
    Kind(VariantKind),
    Name(String),
}

impl VariantRef {
    /// Resolve to a variant tag.
    pub fn resolve(&self) -> Result<VariantKind, ReplaceError> {
        match self {
            VariantRef::Kind(kind) => Ok(*kind),
            VariantRef::Name(name) => {
                VariantKind::resolve(name).ok_or_else(|| ReplaceError::UnresolvableVariant {
                    name: name.clone(),
                })
            }
        }
    }
}

impl From<VariantKind> for VariantRef {
    fn from(kind: VariantKind) -> Self {
        VariantRef::Kind(kind)
    }
}

impl From<&str> for VariantRef {
    fn from(name: &str) -> Self {
        match VariantKind::resolve(name) {
            Some(kind) => VariantRef::Kind(kind),
            None => VariantRef::Name(name.to_string()),
        }
    }
}

/// Rewrite every static-ID field equal to `from` to `to` under `selection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapRequest {
    pub from: StaticId,
    pub to: StaticId,
    pub selection: Selection,
}

/// Replace every `source` component under `selection` with a newly built
/// `target` component.
///
/// With a `static_filter`, only source components whose dominant value
/// equals the filter are converted. Variants without a dominant value ignore
/// the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub source: VariantRef,
    pub target: VariantRef,
    pub static_filter: Option<StaticId>,
    pub selection: Selection,
}

/// Either kind of batch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplaceRequest {
    Remap(RemapRequest),
    Convert(ConvertRequest),
}

impl ReplaceRequest {
    pub fn selection(&self) -> &Selection {
        match self {
            ReplaceRequest::Remap(r) => &r.selection,
            ReplaceRequest::Convert(r) => &r.selection,
        }
    }

    /// Run this request as one batch.
    pub fn execute<S: RenderSurface + ?Sized>(
        &self,
        region: &mut Region,
        surface: &mut S,
    ) -> Result<BatchReport, ReplaceError> {
        match self {
            ReplaceRequest::Remap(request) => Ok(apply_remap(region, request, surface)),
            ReplaceRequest::Convert(request) => apply_convert(region, request, surface),
        }
    }
}

impl From<RemapRequest> for ReplaceRequest {
    fn from(request: RemapRequest) -> Self {
        ReplaceRequest::Remap(request)
    }
}

impl From<ConvertRequest> for ReplaceRequest {
    fn from(request: ConvertRequest) -> Self {
        ReplaceRequest::Convert(request)
    }
}
