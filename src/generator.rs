//! Batch icon generation.
//!
//! [`IconGenerator`] drives the whole pipeline for one [`SizeSet`]: every
//! request is laid out, rendered and written on its own, and a failure in
//! one request is recorded without stopping the rest. The manifest is
//! written last, from the files that actually made it to disk.
//!
//! # Example
//!
//! ```no_run
//! use appicon_renderer::{BuiltinOnly, Exporter, IconGenerator, IconSpec, SizeSet};
//!
//! let spec = IconSpec::brand_text();
//! let generator = IconGenerator::new(&spec, &BuiltinOnly);
//! let report = generator
//!     .generate(&SizeSet::ios_app_icon(), &Exporter::new("AppIcon.appiconset"))
//!     .unwrap();
//! assert!(report.is_success());
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::export::Exporter;
use crate::font::{FontError, FontProvider, ResolvedFont};
use crate::icon_spec::IconSpec;
use crate::layer::Renderer;
use crate::layout::{LayoutPlan, LayoutResolver, Variant};
use crate::manifest::Manifest;
use crate::size_set::{RenderRequest, SizeSet};

// ============================================================================
// Outcomes
// ============================================================================

/// What happened to one request.
#[derive(Debug)]
pub enum RequestStatus {
    /// Rendered and written to the given path.
    Written(PathBuf),
    /// Shares its filename with an earlier request that was already written.
    Reused,
    Failed(Error),
}

/// Result of one request, with the layout decisions that produced it.
#[derive(Debug)]
pub struct RequestOutcome {
    pub request: RenderRequest,
    /// Variant drawn, if layout ran.
    pub variant: Option<Variant>,
    /// Problems layout recovered from on the way to this bitmap: a lockup
    /// that did not fit, then each distinct font fallback cause.
    pub recovered: Vec<Error>,
    pub status: RequestStatus,
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self.status, RequestStatus::Failed(_))
    }

    /// True if any text used the built-in font.
    pub fn used_fallback_font(&self) -> bool {
        self.recovered
            .iter()
            .any(|e| matches!(e, Error::FontResolution(_)))
    }

    /// True if a lockup was requested but did not fit.
    pub fn overflowed(&self) -> bool {
        self.recovered
            .iter()
            .any(|e| matches!(e, Error::LayoutOverflow { .. }))
    }
}

fn recovered(plan: &LayoutPlan) -> Vec<Error> {
    let mut causes: Vec<FontError> = Vec::new();
    for run in &plan.runs {
        if let ResolvedFont::Fallback { cause } = &run.font {
            if !causes.contains(cause) {
                causes.push(cause.clone());
            }
        }
    }
    plan.overflow
        .map(Error::from)
        .into_iter()
        .chain(causes.into_iter().map(Error::from))
        .collect()
}

/// Result of writing the manifest.
#[derive(Debug)]
pub struct ManifestOutcome {
    pub filename: String,
    pub result: Result<PathBuf>,
}

/// A failed target and the reason.
#[derive(Debug)]
pub struct Failure<'a> {
    /// Bitmap or manifest filename.
    pub target: &'a str,
    pub error: &'a Error,
}

/// Aggregate result of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RequestOutcome>,
    pub manifest: Option<ManifestOutcome>,
}

impl BatchReport {
    /// True only if every request and the manifest succeeded.
    pub fn is_success(&self) -> bool {
        self.failures().is_empty()
    }

    /// Every failed request followed by the manifest, if it failed.
    pub fn failures(&self) -> Vec<Failure<'_>> {
        let requests = self.outcomes.iter().filter_map(|o| match &o.status {
            RequestStatus::Failed(error) => Some(Failure {
                target: &o.request.filename,
                error,
            }),
            _ => None,
        });
        let manifest = self.manifest.iter().filter_map(|m| match &m.result {
            Err(error) => Some(Failure {
                target: &m.filename,
                error,
            }),
            Ok(_) => None,
        });
        requests.chain(manifest).collect()
    }

    /// Filenames written during this batch.
    pub fn emitted_files(&self) -> BTreeSet<String> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, RequestStatus::Written(_)))
            .map(|o| o.request.filename.clone())
            .collect()
    }
}

// ============================================================================
// IconGenerator
// ============================================================================

/// Renders an [`IconSpec`] at every size of a [`SizeSet`].
pub struct IconGenerator<'a, P: ?Sized> {
    spec: &'a IconSpec,
    resolver: LayoutResolver<'a, P>,
    renderer: Renderer,
}

impl<'a, P: FontProvider + ?Sized> IconGenerator<'a, P> {
    pub fn new(spec: &'a IconSpec, fonts: &'a P) -> Self {
        Self {
            spec,
            resolver: LayoutResolver::new(fonts),
            renderer: Renderer::new(),
        }
    }

    /// Lays out and renders a single size.
    pub fn render(&self, size: u32) -> Result<(LayoutPlan, Canvas)> {
        let plan = self.resolver.resolve(self.spec, size);
        let canvas = self.renderer.render(&plan)?;
        Ok((plan, canvas))
    }

    /// Runs the batch. Only an invalid size set fails the call as a whole;
    /// everything else is recorded in the report.
    pub fn generate(&self, sizes: &SizeSet, exporter: &Exporter) -> Result<BatchReport> {
        sizes.validate()?;

        let requests = sizes.requests();
        let total = requests.len();
        let mut emitted: BTreeSet<String> = BTreeSet::new();
        let mut report = BatchReport::default();

        for (index, request) in requests.into_iter().enumerate() {
            let outcome = if emitted.contains(&request.filename) {
                RequestOutcome {
                    request,
                    variant: None,
                    recovered: Vec::new(),
                    status: RequestStatus::Reused,
                }
            } else {
                self.process(request, exporter)
            };

            log_outcome(index + 1, total, &outcome);
            if matches!(outcome.status, RequestStatus::Written(_)) {
                emitted.insert(outcome.request.filename.clone());
            }
            report.outcomes.push(outcome);
        }

        if let Some(filename) = &sizes.manifest {
            let manifest = Manifest::for_emitted(&sizes.slots, &emitted);
            let result = exporter.write_manifest(filename, &manifest);
            match &result {
                Ok(path) => log::info!(
                    "wrote {} with {} entries",
                    path.display(),
                    manifest.images.len()
                ),
                Err(err) => log::warn!("{err}"),
            }
            report.manifest = Some(ManifestOutcome {
                filename: filename.clone(),
                result,
            });
        }

        Ok(report)
    }

    fn process(&self, request: RenderRequest, exporter: &Exporter) -> RequestOutcome {
        let plan = self.resolver.resolve(self.spec, request.pixel_size);
        let status = match self
            .renderer
            .render(&plan)
            .and_then(|canvas| exporter.write_image(&request.filename, &canvas))
        {
            Ok(path) => RequestStatus::Written(path),
            Err(err) => RequestStatus::Failed(err),
        };

        RequestOutcome {
            variant: Some(plan.variant),
            recovered: recovered(&plan),
            request,
            status,
        }
    }
}

fn log_outcome(index: usize, total: usize, outcome: &RequestOutcome) {
    let request = &outcome.request;
    let slot = format!(
        "{0}x{0} {1}@{2}",
        request.logical_size, request.idiom, request.scale
    );
    match &outcome.status {
        RequestStatus::Written(_) => {
            let variant = outcome.variant.map_or_else(String::new, |v| format!(", {v}"));
            log::info!(
                "[{index}/{total}] {} {}px ({slot}{variant})",
                request.filename,
                request.pixel_size
            )
        }
        RequestStatus::Reused => {
            log::info!("[{index}/{total}] {} reused ({slot})", request.filename)
        }
        RequestStatus::Failed(err) => {
            log::warn!("[{index}/{total}] {} failed: {err}", request.filename)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use resvg::usvg::fontdb;

    use crate::font::{BuiltinOnly, FontRequest, LoadedFace, SystemFonts};
    use crate::geometry::centered;
    use crate::color::Color;
    use crate::icon_spec::{Role, TextLine, Typography};

    /// Regular files ending in `.png`; directories with that suffix are skipped.
    fn png_files(dir: &std::path::Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap())
            .filter(|entry| entry.file_type().unwrap().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".png"))
            .collect()
    }

    #[test]
    fn full_batch_writes_every_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let spec = IconSpec::brand_text();
        let generator = IconGenerator::new(&spec, &BuiltinOnly);
        let report = generator
            .generate(&SizeSet::ios_app_icon(), &Exporter::new(dir.path()))
            .unwrap();

        assert!(report.is_success(), "{:?}", report.failures());
        assert_eq!(report.outcomes.len(), 18);
        let written = report
            .outcomes
            .iter()
            .filter(|o| matches!(o.status, RequestStatus::Written(_)))
            .count();
        assert_eq!(written, 13);
        assert_eq!(png_files(dir.path()), report.emitted_files());

        let icon_1024 = image::open(dir.path().join("icon-1024.png")).unwrap();
        assert_eq!((icon_1024.width(), icon_1024.height()), (1024, 1024));
    }

    #[test]
    fn manifest_matches_emitted_files() {
        let dir = tempfile::tempdir().unwrap();
        let spec = IconSpec::solar_epc();
        let report = IconGenerator::new(&spec, &BuiltinOnly)
            .generate(&SizeSet::ios_app_icon(), &Exporter::new(dir.path()))
            .unwrap();
        assert!(report.is_success());

        let json = fs::read_to_string(dir.path().join("Contents.json")).unwrap();
        let manifest = Manifest::from_json(&json).unwrap();
        let referenced: BTreeSet<String> =
            manifest.filenames().into_iter().map(str::to_string).collect();
        assert_eq!(referenced, png_files(dir.path()));
        assert_eq!(manifest.images.len(), 18);
    }

    #[test]
    fn write_failure_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("icon-40.png")).unwrap();

        let spec = IconSpec::brand_text();
        let report = IconGenerator::new(&spec, &BuiltinOnly)
            .generate(&SizeSet::ios_app_icon(), &Exporter::new(dir.path()))
            .unwrap();

        assert!(!report.is_success());
        let failures = report.failures();
        // Three slots share icon-40.png and each one retries the write.
        assert_eq!(failures.len(), 3);
        assert!(failures.iter().all(|f| f.target == "icon-40.png"));
        assert!(matches!(failures[0].error, Error::Write { .. }));

        let emitted = report.emitted_files();
        assert_eq!(emitted.len(), 12);
        assert!(!emitted.contains("icon-40.png"));
        assert!(dir.path().join("icon-40.png").is_dir());
        assert_eq!(png_files(dir.path()), emitted);

        let json = fs::read_to_string(dir.path().join("Contents.json")).unwrap();
        let manifest = Manifest::from_json(&json).unwrap();
        assert!(!manifest.filenames().contains("icon-40.png"));
        assert_eq!(manifest.images.len(), 15);
    }

    #[test]
    fn manifest_failure_fails_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Contents.json")).unwrap();

        let spec = IconSpec::pro_monogram();
        let report = IconGenerator::new(&spec, &BuiltinOnly)
            .generate(&SizeSet::ios_legacy(), &Exporter::new(dir.path()))
            .unwrap();
        assert!(report.outcomes.iter().all(RequestOutcome::is_success));
        assert!(!report.is_success());
        assert_eq!(report.failures()[0].target, "Contents.json");
    }

    #[test]
    fn no_manifest_when_not_required() {
        let dir = tempfile::tempdir().unwrap();
        let spec = IconSpec::sun_badge();
        let report = IconGenerator::new(&spec, &BuiltinOnly)
            .generate(&SizeSet::ios_legacy().without_manifest(), &Exporter::new(dir.path()))
            .unwrap();
        assert!(report.is_success());
        assert!(report.manifest.is_none());
        assert!(!dir.path().join("Contents.json").exists());
        assert_eq!(png_files(dir.path()).len(), 10);
    }

    #[test]
    fn invalid_size_set_is_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let spec = IconSpec::brand_text();
        let err = IconGenerator::new(&spec, &BuiltinOnly)
            .generate(&SizeSet::new("empty"), &Exporter::new(dir.path()))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSizeSet(_)));
    }

    #[test]
    fn recovered_problems_are_recorded_per_request() {
        let dir = tempfile::tempdir().unwrap();
        let spec = IconSpec::brand_text().with_line(TextLine::new(
            "Enerji Verimliligi Sertifikasi",
            Role::Caption,
            Color::BLACK,
        ));
        let report = IconGenerator::new(&spec, &BuiltinOnly)
            .generate(&SizeSet::ios_app_icon(), &Exporter::new(dir.path()))
            .unwrap();
        assert!(report.is_success());

        let large = report
            .outcomes
            .iter()
            .find(|o| o.request.pixel_size == 1024)
            .unwrap();
        assert_eq!(large.variant, Some(Variant::Monogram));
        assert!(large.overflowed());
        assert!(large.used_fallback_font());
        assert!(matches!(
            large.recovered[0],
            Error::LayoutOverflow { size: 1024, .. }
        ));
        assert_eq!(large.recovered.len(), 2);

        let reused = report
            .outcomes
            .iter()
            .find(|o| matches!(o.status, RequestStatus::Reused))
            .unwrap();
        assert!(reused.recovered.is_empty());
    }

    /// Fails font loading for one canvas size and serves `inner` otherwise.
    struct FailingFor<P> {
        canvas_px: u32,
        inner: P,
    }

    impl<P: FontProvider> FontProvider for FailingFor<P> {
        fn load(&self, request: &FontRequest<'_>) -> std::result::Result<LoadedFace, FontError> {
            if request.canvas_px == self.canvas_px {
                return Err(FontError::Unreadable {
                    family: "injected".to_string(),
                });
            }
            self.inner.load(request)
        }
    }

    fn bundled_fonts() -> SystemFonts {
        let mut db = fontdb::Database::new();
        db.load_font_data(include_bytes!("../testdata/DejaVuSansMono-Bold.ttf").to_vec());
        SystemFonts::from_database(db)
    }

    #[test]
    fn font_failure_for_one_size_keeps_batch_green() {
        let dir = tempfile::tempdir().unwrap();
        let spec = IconSpec::brand_text().with_typography(Typography {
            families: vec!["DejaVu Sans Mono".to_string()],
            ..Typography::default()
        });
        let fonts = FailingFor {
            canvas_px: 120,
            inner: bundled_fonts(),
        };
        let generator = IconGenerator::new(&spec, &fonts);

        let report = generator
            .generate(&SizeSet::ios_app_icon(), &Exporter::new(dir.path()))
            .unwrap();
        assert!(report.is_success());
        for outcome in &report.outcomes {
            if matches!(outcome.status, RequestStatus::Reused) {
                continue;
            }
            let failed_size = outcome.request.pixel_size == 120;
            assert_eq!(outcome.used_fallback_font(), failed_size, "{}px", outcome.request.pixel_size);
        }

        let (plan, canvas) = generator.render(120).unwrap();
        assert_eq!(canvas.size(), 120);
        assert_eq!(plan.variant, Variant::Lockup);
        for run in &plan.runs {
            assert!(matches!(
                &run.font,
                ResolvedFont::Fallback {
                    cause: FontError::Unreadable { .. }
                }
            ));
            assert_eq!(run.bounds.x, centered(120, run.bounds.width));
        }

        for size in [80, 180] {
            let (plan, _) = generator.render(size).unwrap();
            assert!(!plan.runs.is_empty());
            for run in &plan.runs {
                assert_eq!(run.font.family(), "DejaVu Sans Mono");
                assert!(!run.font.is_fallback());
            }
        }
    }
}
