//! Batch generation over a [`MetadataProvider`].
//!
//! Each annotated type is described and emitted independently; one type
//! failing never affects the others. Both steps go through a
//! [`DescriptorCache`], so repeated runs over unchanged shapes do no work.

use std::convert::Infallible;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, error, info, trace};

use crate::{
    cache::{CacheError, DescriptorCache, Fingerprint},
    cancel::CancellationToken,
    classify::{Classifier, Described, Diagnostic},
    config::RedactionConfig,
    emit::{EmittedSource, SourceEmitter},
    metadata::{MetadataProvider, RawType},
    render::RenderError,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("generation cancelled")]
    Cancelled,
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<CacheError<RenderError>> for PipelineError {
    fn from(err: CacheError<RenderError>) -> Self {
        match err {
            CacheError::Cancelled => Self::Cancelled,
            CacheError::Build(err) => Self::Render(err),
        }
    }
}

impl From<CacheError<Infallible>> for PipelineError {
    fn from(err: CacheError<Infallible>) -> Self {
        match err {
            CacheError::Cancelled => Self::Cancelled,
            CacheError::Build(never) => match never {},
        }
    }
}

/// Generation result for one annotated type.
#[derive(Debug)]
pub struct TypeOutcome {
    pub qualified_name: String,
    pub diagnostics: Vec<Diagnostic>,
    pub result: Result<EmittedSource, PipelineError>,
}

impl TypeOutcome {
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct Pipeline {
    classifier: Classifier,
    config: RedactionConfig,
    descriptors: DescriptorCache<Option<Described>>,
    sources: DescriptorCache<EmittedSource>,
}

impl Pipeline {
    pub fn new(config: RedactionConfig) -> Self {
        Self {
            classifier: Classifier::default(),
            config,
            descriptors: DescriptorCache::new(),
            sources: DescriptorCache::new(),
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub const fn config(&self) -> &RedactionConfig {
        &self.config
    }

    pub const fn descriptor_cache(&self) -> &DescriptorCache<Option<Described>> {
        &self.descriptors
    }

    pub const fn source_cache(&self) -> &DescriptorCache<EmittedSource> {
        &self.sources
    }

    /// Describes `raw`, or returns `None` if it is not annotated.
    pub fn describe(
        &self,
        raw: &RawType,
        cancel: &CancellationToken,
    ) -> Result<Option<Described>, PipelineError> {
        let key = Fingerprint::of(raw, &self.config);
        let described = self.descriptors.get_or_build(&key, cancel, || {
            Ok::<_, Infallible>(self.classifier.describe(raw))
        })?;
        Ok(described)
    }

    /// Emits the `Display` source for `raw`, or returns `None` if it is not
    /// annotated.
    pub fn emit(
        &self,
        raw: &RawType,
        cancel: &CancellationToken,
    ) -> Result<Option<EmittedSource>, PipelineError> {
        let Some(described) = self.describe(raw, cancel)? else {
            return Ok(None);
        };
        self.emit_described(raw, &described, cancel).map(Some)
    }

    fn emit_described(
        &self,
        raw: &RawType,
        described: &Described,
        cancel: &CancellationToken,
    ) -> Result<EmittedSource, PipelineError> {
        let key = Fingerprint::of(raw, &self.config);
        let source = self.sources.get_or_build(&key, cancel, || {
            SourceEmitter.emit_source(&described.descriptor, &self.config)
        })?;
        Ok(source)
    }

    /// Generates every annotated type `provider` exposes.
    ///
    /// Unannotated types are skipped silently. Outcomes come back in
    /// provider order.
    pub fn run<P: MetadataProvider + ?Sized>(
        &self,
        provider: &P,
        cancel: &CancellationToken,
    ) -> Vec<TypeOutcome> {
        let annotated: Vec<RawType> = provider
            .raw_types()
            .into_iter()
            .filter(|raw| raw.options.is_some())
            .collect();
        debug!(types = annotated.len(), "generating annotated types");

        // Collect keeps provider order.
        let outcomes: Vec<TypeOutcome> = annotated
            .par_iter()
            .filter_map(|raw| self.generate(raw, cancel))
            .collect();

        let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
        info!(
            generated = outcomes.len() - failed,
            failed, "bracketed generation finished"
        );
        outcomes
    }

    fn generate(&self, raw: &RawType, cancel: &CancellationToken) -> Option<TypeOutcome> {
        trace!(type_name = %raw.qualified_name, "generating type");
        let described = match self.describe(raw, cancel) {
            Ok(described) => described?,
            Err(err) => return Some(failed(raw, Vec::new(), err)),
        };
        let outcome = match self.emit_described(raw, &described, cancel) {
            Ok(source) => TypeOutcome {
                qualified_name: raw.qualified_name.clone(),
                diagnostics: described.diagnostics,
                result: Ok(source),
            },
            Err(err) => failed(raw, described.diagnostics, err),
        };
        Some(outcome)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}

fn failed(raw: &RawType, diagnostics: Vec<Diagnostic>, err: PipelineError) -> TypeOutcome {
    error!(type_name = %raw.qualified_name, "{err}");
    TypeOutcome {
        qualified_name: raw.qualified_name.clone(),
        diagnostics,
        result: Err(err),
    }
}
