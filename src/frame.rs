//! Render frame
//!
//! Snapshot of what to draw after a tick, bottom to top: the settled base
//! screen, the outgoing screen of a transition, the overlay sheet, and the
//! nav bar.

use app_motion::{Offset, SheetPhase, TransitionKind};
use app_navigation::{Route, ScreenHandle, Tab};

/// One positioned screen
#[derive(Clone)]
pub struct Layer {
    /// Route the screen renders
    pub route: Route,
    /// Render identity; differs from the route key for concurrent clones
    pub render_key: String,
    /// The screen instance
    pub screen: ScreenHandle,
    /// Translation applied to the whole layer
    pub offset: Offset,
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("route", &self.route.to_string())
            .field("render_key", &self.render_key)
            .field("screen", &self.screen.name())
            .field("offset", &self.offset)
            .finish()
    }
}

/// Screen leaving during a transition, drawn above the base
#[derive(Debug, Clone)]
pub struct OutgoingLayer {
    /// Slide axis
    pub kind: TransitionKind,
    /// Transition progress, 0 to 1
    pub progress: f32,
    /// The screen
    pub layer: Layer,
}

/// The overlay sheet and its backdrop
#[derive(Debug, Clone)]
pub struct SheetLayer {
    /// Sheet phase
    pub phase: SheetPhase,
    /// Dimming behind the sheet
    pub backdrop_opacity: f32,
    /// Sheet content; `offset.y` is the sheet's downward translation
    pub layer: Layer,
}

/// Bottom nav bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavBar {
    /// Highlighted tab
    pub active: Tab,
    /// Downward translation
    pub offset_y: f32,
    /// Opacity
    pub opacity: f32,
    /// Whether the bar is hidden or heading there
    pub hidden: bool,
}

/// Everything to draw this frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Settled screen, mounted beneath everything else
    pub base: Layer,
    /// Transition outgoing screen, if a transition is running
    pub outgoing: Option<OutgoingLayer>,
    /// Overlay sheet, if visible
    pub sheet: Option<SheetLayer>,
    /// Nav bar
    pub nav_bar: NavBar,
}

impl Frame {
    /// Layers bottom to top
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        std::iter::once(&self.base)
            .chain(self.outgoing.as_ref().map(|o| &o.layer))
            .chain(self.sheet.as_ref().map(|s| &s.layer))
    }

    /// No transition running and the sheet closed or open
    pub fn is_settled(&self) -> bool {
        self.outgoing.is_none()
            && self
                .sheet
                .as_ref()
                .map_or(true, |s| s.phase == SheetPhase::Open)
    }
}
