mod colors;
mod config;
mod frames;
mod gradient;
mod ramp;
mod root;

pub use colors::{party_parrot_ramp, Color, InvalidColor, PARTY_PARROT_COLORS};
pub use config::{AnimationKind, ConfigError, PaintMode, PartyConfig, DEFAULT_SPEED_MILLIS};
pub use frames::{FrameAnimator, Pollable, PollableState, FRAME_INTERVAL_MILLIS};
pub use gradient::{ensure_gradient, gradient_handles, rebuild_stops, set_duration, GradientHandles, GRADIENT_ID};
pub use ramp::generate_ramp;
pub use root::{find_root_svg, find_root_svg_of};

use crate::svg::{Document, DocumentError, NodeId, Selection};

/// Errors that can occur when setting up a party
#[derive(thiserror::Error, Debug)]
pub enum PartyError {
    #[error("please supply a selection")]
    MissingSelection,

    #[error("selection holds nodes that are not elements of this document")]
    ForeignSelection,

    #[error("selection is not inside an <svg> element")]
    RootSvgNotFound,

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The party effect bound to one root SVG.
///
/// Construction makes sure the shared `#party` gradient exists; [`Party::apply`] then points any
/// number of shapes at it.
#[derive(Debug, Clone)]
pub struct Party {
    root: NodeId,
    config: PartyConfig,
    handles: GradientHandles,
}

impl Party {
    /// Set up the party for the root SVG containing `selection`
    pub fn new(document: &mut Document, selection: &Selection, config: PartyConfig) -> Result<Self, PartyError> {
        if selection.is_empty() {
            return Err(PartyError::MissingSelection);
        }
        if !selection.belongs_to(document) {
            return Err(PartyError::ForeignSelection);
        }
        config.validate()?;
        let root = find_root_svg_of(document, selection).ok_or(PartyError::RootSvgNotFound)?;
        let handles = ensure_gradient(document, root, &config)?;
        Ok(Self { root, config, handles })
    }

    /// [`Party::new`] with the default configuration
    pub fn with_defaults(document: &mut Document, selection: &Selection) -> Result<Self, PartyError> {
        Self::new(document, selection, PartyConfig::default())
    }

    /// Point every element in `selection` at the gradient using the configured mode
    pub fn apply(&self, document: &mut Document, selection: &Selection) -> Result<(), PartyError> {
        self.apply_with_mode(document, selection, self.config.mode)
    }

    /// Like [`Party::apply`], overriding the paint mode. Nothing is written if the selection
    /// holds nodes from another document.
    pub fn apply_with_mode(
        &self,
        document: &mut Document,
        selection: &Selection,
        mode: PaintMode,
    ) -> Result<(), PartyError> {
        if !selection.belongs_to(document) {
            return Err(PartyError::ForeignSelection);
        }
        selection.attr(document, mode.attribute(), &format!("url(#{GRADIENT_ID})"))?;
        Ok(())
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn mode(&self) -> PaintMode {
        self.config.mode
    }

    pub fn stops(&self) -> &Selection {
        &self.handles.stops
    }

    /// Replace the stops tracked by this party, e.g. after editing the gradient by hand
    pub fn set_stops(&mut self, stops: Selection) -> &mut Self {
        self.handles.stops = stops;
        self
    }

    pub fn animates(&self) -> &Selection {
        &self.handles.animates
    }

    pub fn gradient(&self) -> &[Color] {
        &self.config.gradient
    }

    /// Use a new color list, rebuilding the shared gradient's stops
    pub fn set_gradient(&mut self, document: &mut Document, colors: Vec<Color>) -> Result<&mut Self, PartyError> {
        let config = PartyConfig { gradient: colors, ..self.config.clone() };
        config.validate()?;
        tracing::debug!(colors = config.gradient.len(), "rebuilding #{GRADIENT_ID} stops");
        self.handles = rebuild_stops(document, self.handles.gradient, &config)?;
        self.config = config;
        Ok(self)
    }

    /// The duration of one color cycle, in milliseconds
    pub fn speed(&self) -> u64 {
        self.config.speed
    }

    /// Change the cycle duration of the shared gradient.
    ///
    /// The `<animate>` elements are looked up again from the gradient, so this also reaches stops
    /// rebuilt by another [`Party`] on the same root. Stops that were rebuilt away stay detached in
    /// the document's arena and are never written to.
    pub fn set_speed(&mut self, document: &mut Document, speed_millis: u64) -> Result<&mut Self, PartyError> {
        if speed_millis == 0 {
            return Err(ConfigError::Invalid("speed must be greater than zero".to_string()).into());
        }
        self.handles.animates = gradient_handles(document, self.handles.gradient).animates;
        set_duration(document, &self.handles.animates, speed_millis)?;
        self.config.speed = speed_millis;
        Ok(self)
    }

    /// A per-frame driver for the current stops, for gradients without `<animate>` elements
    pub fn animator(&self) -> FrameAnimator {
        if self.config.animation == AnimationKind::Declarative {
            tracing::warn!("frame animator requested for a declaratively animated gradient");
        }
        FrameAnimator::new(self.handles.stops.clone(), self.config.gradient.clone(), self.config.speed)
    }
}
