//! Panel dispatch: render every combination and mark the default visible.

use ifig_model::{
    CanonicalKey, Combination, FigureError, Panel, ParameterDomain, RenderOutput, Result,
};
use tracing::{debug, info};

use crate::enumerate::enumerate;
use crate::key::{default_key, encode_combination};

/// Boxed error for the render boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The external render collaborator: plotting logic lives behind this
/// trait. Must be total over every combination the enumerator produces and
/// deterministic for identical inputs, since dispatch does not memoize
/// beyond one build.
pub trait PanelRenderer {
    fn render(&mut self, combination: &Combination) -> std::result::Result<RenderOutput, BoxError>;
}

impl<F> PanelRenderer for F
where
    F: FnMut(&Combination) -> std::result::Result<RenderOutput, BoxError>,
{
    fn render(&mut self, combination: &Combination) -> std::result::Result<RenderOutput, BoxError> {
        self(combination)
    }
}

/// Options for dispatch.
#[derive(Default)]
pub struct DispatchOptions<'a> {
    /// Optional lossy recompression applied uniformly to every panel's
    /// artifact bytes after rendering. Never alters the key.
    #[allow(clippy::type_complexity)]
    pub postprocess:
        Option<&'a (dyn Fn(Vec<u8>) -> std::result::Result<Vec<u8>, BoxError> + Send + Sync)>,
}

/// The dispatched batch: panels in enumeration order plus the key of the
/// all-defaults combination.
#[derive(Debug)]
pub struct DispatchOutput {
    pub panels: Vec<Panel>,
    pub default_key: CanonicalKey,
}

/// Renders every enumerated combination through `renderer`.
///
/// Panels come back in enumeration order; downstream document assembly
/// relies on that for byte-for-byte reproducible output. Exactly one panel
/// (the all-defaults combination) is marked visible. Every render runs
/// unconditionally; no sampling, no pruning, no retries. A render failure
/// aborts the whole batch, since a document with missing panels is worse
/// than an explicit failure.
pub fn dispatch(
    domains: &[&dyn ParameterDomain],
    renderer: &mut dyn PanelRenderer,
) -> Result<DispatchOutput> {
    dispatch_with(domains, renderer, &DispatchOptions::default())
}

/// `dispatch` with explicit options.
pub fn dispatch_with(
    domains: &[&dyn ParameterDomain],
    renderer: &mut dyn PanelRenderer,
    options: &DispatchOptions<'_>,
) -> Result<DispatchOutput> {
    let combinations = enumerate(domains)?;
    let default_key = default_key(domains)?;
    info!(
        combinations = combinations.len(),
        default_key = %default_key,
        "dispatching panel renders"
    );

    let mut panels = Vec::with_capacity(combinations.len());
    for combination in &combinations {
        let key = encode_combination(combination);
        debug!(key = %key, "rendering panel");
        let output = renderer
            .render(combination)
            .map_err(|source| FigureError::RenderFailed {
                key: key.to_string(),
                message: source.to_string(),
            })?;
        let mut artifact = output.artifact;
        if let Some(filter) = options.postprocess {
            artifact = filter(artifact).map_err(|source| FigureError::PostProcessFailed {
                key: key.to_string(),
                message: source.to_string(),
            })?;
        }
        panels.push(Panel {
            key,
            artifact,
            caption: output.caption,
            visible: false,
        });
    }

    // Unreachable with a consistent encoder/enumerator pairing; hitting it
    // signals a logic defect, so it is fatal and never retried.
    let default_index = panels
        .iter()
        .position(|panel| panel.key == default_key)
        .ok_or_else(|| FigureError::NoMatchingDefaultPanel {
            default_key: default_key.to_string(),
        })?;
    panels[default_index].visible = true;

    info!(panels = panels.len(), "dispatch complete");
    Ok(DispatchOutput {
        panels,
        default_key,
    })
}
