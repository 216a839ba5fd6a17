//! Rendering utilities for CI surfaces (Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod text;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use text::markup_to_plain;
pub use model::{
    RenderableData, RenderableExportedCounts, RenderableFinding, RenderableReport,
    RenderableSeverity, RenderableVerdictStatus,
};
