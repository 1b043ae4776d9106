//! ade Core — the scaffold & validation engine.
//!
//! This crate holds all the non-trivial logic of ade: the schema-validated
//! registry model, token substitution, the scaffold generator and the
//! structure validator. Everything that touches the outside world goes
//! through the ports in [`ports`]; the `ade-adapters` crate provides the
//! production implementations.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             ade-cli (binary)            │
//! │    argument parsing, output, config     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     ScaffoldEngine / StructureValidator │
//! │       (this crate — pure orchestration) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//! ┌──────────────────▼──────────────────────┐
//! │   Ports: Filesystem, TemplateSource,    │
//! │              VcsInitializer             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//! ┌──────────────────▼──────────────────────┐
//! │      ade-adapters (infrastructure)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The [`Registry`](registry::Registry) is loaded once per invocation and
//! passed by reference into every engine call — no process-wide singleton.

pub mod error;
pub mod ports;
pub mod registry;
pub mod render;
pub mod scaffold;
pub mod validate;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::error::{EngineError, EngineResult, RegistryError, ScaffoldError};
    pub use crate::ports::{Filesystem, TemplateSource, VcsInitializer};
    pub use crate::registry::{FileContent, FrameworkSpec, Registry, TEMPLATE_REF_MARKER};
    pub use crate::render::TokenContext;
    pub use crate::scaffold::{ScaffoldEngine, ScaffoldRequest, ScaffoldResult};
    pub use crate::validate::{StructureValidator, ValidateOptions, ValidationReport};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
