//! Configuration projection and synchronization engine
//!
//! A single source-of-truth tree of declarative documents under `.ai/` is
//! projected into the configuration layouts of downstream AI tools:
//!
//! - **document**: frontmatter parsing with local recovery
//! - **convert**: per-target format converters (manifest, mirror, settings)
//! - **registry**: static table of target descriptors
//! - **mirror**: recursive tree mirroring with per-target filters
//! - **render**: placeholder template rendering for generated outputs
//! - **sync**: the orchestrating engine and its reports
//!
//! # Architecture
//!
//! `aisync-core` sits between the filesystem layer and the CLI:
//!
//! ```text
//!      aisync-cli
//!          |
//!     aisync-core
//!          |
//!      aisync-fs
//! ```

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod mirror;
pub mod registry;
pub mod render;
pub mod sync;

pub use config::CoreConfig;
pub use convert::{ConversionResult, Converter, FieldMap, SettingsBuilder};
pub use document::Document;
pub use error::{Error, Result};
pub use mirror::MirrorStats;
pub use registry::{ExtensionFilter, SourceTree, TargetDescriptor, TargetRegistry};
pub use render::{OutputConfig, RenderContext, RenderedOutput, render_template};
pub use sync::{SyncEngine, SyncIssue, SyncReport, TargetSelection};
