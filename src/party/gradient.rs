use super::colors::Color;
use super::config::{duration_value, AnimationKind, PartyConfig};
use super::ramp::generate_ramp;
use crate::svg::{Document, DocumentError, NodeId, Selection, Selector};

/// The id shared by every caller targeting the same root SVG
pub const GRADIENT_ID: &str = "party";

/// Handles to the elements that make up the party gradient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientHandles {
    pub gradient: NodeId,
    pub stops: Selection,
    /// Empty when the gradient is driven by frames
    pub animates: Selection,
}

/// Make sure `root` holds a `defs > linearGradient#party`, creating it only if no `defs > #party`
/// exists anywhere below `root`. The first `<defs>` below `root` is reused when present.
pub fn ensure_gradient(
    document: &mut Document,
    root: NodeId,
    config: &PartyConfig,
) -> Result<GradientHandles, DocumentError> {
    let scope = Selection::from(root);
    let existing = scope.select(document, &Selector::parse(&format!("defs > #{GRADIENT_ID}"))?).node();
    if let Some(gradient) = existing {
        tracing::debug!("reusing existing #{GRADIENT_ID} gradient");
        return Ok(gradient_handles(document, gradient));
    }

    let defs = match scope.select(document, &Selector::parse("defs")?).node() {
        Some(defs) => defs,
        None => document.append_element(root, "defs")?,
    };
    let gradient = document.append_element(defs, "linearGradient")?;
    document.set_attr(gradient, "id", GRADIENT_ID)?;
    tracing::debug!(stops = config.gradient.len(), animation = %config.animation, "created #{GRADIENT_ID} gradient");
    build_stops(document, gradient, config)
}

/// Replace the stops of an existing gradient so they follow `config`.
///
/// The old stops are detached; handles other callers hold to them no longer affect the output.
pub fn rebuild_stops(
    document: &mut Document,
    gradient: NodeId,
    config: &PartyConfig,
) -> Result<GradientHandles, DocumentError> {
    document.remove_children(gradient)?;
    build_stops(document, gradient, config)
}

/// Rewrite the cycle duration of every `<animate>`
pub fn set_duration(document: &mut Document, animates: &Selection, speed_millis: u64) -> Result<(), DocumentError> {
    animates.attr(document, "dur", &duration_value(speed_millis))?;
    Ok(())
}

/// The stops and animates currently attached to `gradient`
pub fn gradient_handles(document: &Document, gradient: NodeId) -> GradientHandles {
    let is = |node: NodeId, tag: &str| document.tag_name(node) == Some(tag);
    let stops: Vec<NodeId> = document.children(gradient).iter().copied().filter(|c| is(*c, "stop")).collect();
    let animates: Vec<NodeId> =
        stops.iter().flat_map(|stop| document.children(*stop)).copied().filter(|c| is(*c, "animate")).collect();
    GradientHandles { gradient, stops: stops.into(), animates: animates.into() }
}

fn build_stops(
    document: &mut Document,
    gradient: NodeId,
    config: &PartyConfig,
) -> Result<GradientHandles, DocumentError> {
    let colors = &config.gradient;
    let stops = Selection::from(vec![gradient; colors.len()]).append(document, "stop")?;
    stops
        .attr_with(document, "offset", |index, total| format!("{}%", stop_offset(index, total)))?
        .attr_with(document, "style", |index, _| stop_style(&colors[index]))?;

    let animates = match config.animation {
        AnimationKind::Declarative => {
            let animates = stops.append(document, "animate")?;
            animates
                .attr(document, "attributeName", "stop-color")?
                .attr_with(document, "values", |index, _| generate_ramp(index, colors))?
                .attr(document, "dur", &config.duration_attribute())?
                .attr(document, "repeatCount", "indefinite")?;
            animates
        }
        AnimationKind::Frames => Selection::empty(),
    };
    Ok(GradientHandles { gradient, stops, animates })
}

pub(crate) fn stop_style(color: &Color) -> String {
    format!("stop-color: {color}")
}

// Evenly spaced from 0 to 100
fn stop_offset(index: usize, total: usize) -> f64 {
    if total <= 1 {
        return 0.0;
    }
    index as f64 / (total - 1) as f64 * 100.0
}
