//! # Ziner Core
//!
//! The project document model for Ziner: pages built from layout templates,
//! image slots and floating text elements with z-ordering, a media pool, and
//! a versioned JSON codec for the backend interchange format.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 zine-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Document Store   │  Layout Catalog         │
//! │  - Pages/slots    │  - Template registry    │
//! │  - Media pool     │  - Validation           │
//! │  - Z-ordering     │  - Category/ratio query │
//! ├─────────────────────────────────────────────┤
//! │  Codec            │  Primitives             │
//! │  - Export v1      │  - Percent rects        │
//! │  - Lenient import │  - mm/px/in, binding    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! All document mutations are synchronous methods on [`ZineDocument`]; async
//! collaborators (uploads, persistence) apply their results through the same
//! mutators when they complete.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod asset;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod page;
pub mod style;
pub mod template;

pub use asset::{MediaAsset, NewMediaAsset};
pub use catalog::{builtin_templates, CategoryInfo, LayoutCatalog};
pub use codec::{
    export_json, export_project_data, import_from_json, import_from_value, ImportOptions,
    ProjectData, PROJECT_DATA_VERSION,
};
pub use config::{BindingType, ConfigInput, PageBinding, ProjectConfig, BINDING_GUTTER_MM};
pub use document::{ProjectMeta, ProjectMetaPatch, Theme, UiPrefs, ZineDocument};
pub use error::{TemplateValidationError, ZineError, ZineResult};
pub use geometry::{Rect, ScaledDimensions, Unit};
pub use page::{
    FitMode, NewTextElement, Page, Slot, SlotKind, TextElement, TextElementUpdate,
    MAX_SLOT_INNER_MARGIN_PX,
};
pub use style::{PresetStyle, TextAlign, TextPreset, TextStyle, TextStylePatch};
pub use template::{
    AspectRatioRange, LayoutCategory, LayoutTemplate, SlotSpec, TextElementSpec, ALL_CATEGORIES,
};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
