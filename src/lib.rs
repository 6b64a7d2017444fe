//! appicon-renderer: brand icon catalogs from one declarative spec
//!
//! This crate renders an [`IconSpec`] (wordmark lines, monogram, background
//! and geometric motifs) into every bitmap a platform icon set needs, and
//! writes the matching asset catalog manifest.
//!
//! Small sizes draw the compact monogram; larger ones stack the full
//! wordmark, falling back to the monogram when it does not fit.
//!
//! # Example
//!
//! ```
//! use appicon_renderer::{BuiltinOnly, IconSpec, LayoutResolver, Renderer, Variant};
//!
//! let spec = IconSpec::brand_text();
//! let resolver = LayoutResolver::new(&BuiltinOnly);
//!
//! let small = resolver.resolve(&spec, 40);
//! assert_eq!(small.variant, Variant::Monogram);
//!
//! let large = resolver.resolve(&spec, 120);
//! assert_eq!(large.variant, Variant::Lockup);
//! assert_eq!(large.runs.len(), 3);
//!
//! let canvas = Renderer::new().render(&large).unwrap();
//! assert_eq!(canvas.size(), 120);
//! ```
//!
//! # Batch Generation
//!
//! [`IconGenerator`] runs a whole [`SizeSet`] through layout, rendering and
//! export. Each size succeeds or fails on its own; see [`BatchReport`].
//!
//! ```no_run
//! use appicon_renderer::{Exporter, IconGenerator, IconSpec, SizeSet, SystemFonts};
//!
//! let spec = IconSpec::solar_epc();
//! let fonts = SystemFonts::new();
//! let report = IconGenerator::new(&spec, &fonts)
//!     .generate(&SizeSet::ios_app_icon(), &Exporter::new("AppIcon.appiconset"))
//!     .unwrap();
//!
//! for failure in report.failures() {
//!     eprintln!("{}: {}", failure.target, failure.error);
//! }
//! ```

mod canvas;
mod color;
mod error;
mod export;
mod font;
mod generator;
mod geometry;
mod icon_spec;
mod layer;
mod layout;
mod manifest;
mod size_set;

#[cfg(feature = "cli")]
pub mod logging;

pub use canvas::Canvas;
pub use color::Color;
pub use error::{Error, Result, WriteError};
pub use export::Exporter;
pub use font::{
    BuiltinOnly, FontError, FontProvider, FontRequest, LoadedFace, ResolvedFont, SystemFonts,
    TextMetrics, Weight, resolve_font,
};
pub use generator::{
    BatchReport, Failure, IconGenerator, ManifestOutcome, RequestOutcome, RequestStatus,
};
pub use geometry::{Point, RectPx};
pub use icon_spec::{
    Background, BoltMotif, DiscMotif, DotMotif, GridMotif, IconSpec, Motif, RaysMotif, RingMotif,
    Role, Shadow, TextLine, Typography,
};
pub use layer::{Layer, RenderContext, Renderer, gradient_row, layers};
pub use layout::{
    Ink, LayoutOverflow, LayoutPlan, LayoutResolver, Primitive, TextRun, Variant,
};
pub use manifest::{Manifest, ManifestImage, ManifestInfo};
pub use size_set::{Idiom, RenderRequest, Scale, SizeSet, Slot, XCODE_MANIFEST};
