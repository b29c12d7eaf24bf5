use std::collections::HashMap;

use log::debug;

use super::geometry::{fit_scaled, Size, ViewerStyle};
use super::{CardId, PreviewConfig, PreviewTarget};

/// The page-side operations the live preview manager needs. The browser
/// implementation lives in `preview::dom`; tests use an in-memory host.
pub trait LiveHost {
    type Viewer;

    fn read_target(&self, card: CardId) -> Option<PreviewTarget>;

    /// Creates the embedded viewer inside the card's live slot. `None` when
    /// the card has nowhere to mount it.
    fn mount_viewer(&mut self, card: CardId, target: &PreviewTarget, token: MountToken) -> Option<Self::Viewer>;

    /// Detaches the viewer from the page and drops everything tied to it.
    fn unmount_viewer(&mut self, card: CardId, viewer: Self::Viewer);

    fn container_size(&self, card: CardId) -> Size;

    fn style_viewer(&mut self, viewer: &Self::Viewer, style: &ViewerStyle);

    fn set_live(&mut self, card: CardId, live: bool);

    /// Calls `retry_fit(card, token)` back on the next animation frame.
    fn schedule_fit_retry(&mut self, card: CardId, token: MountToken);
}

/// Identifies one mount of a viewer. Callbacks carrying the token of an
/// earlier mount are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotPhase {
    Loading,
    Fitting { attempts: u32 },
    Live,
    /// Loaded but not shown: demoted by another card, or never got a size.
    Idle,
}

struct LiveSlot<V> {
    viewer: V,
    token: MountToken,
    phase: SlotPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitAttempt {
    Live,
    Retrying,
    GaveUp,
    Ignored,
}

pub struct LivePreviewManager<H: LiveHost> {
    host: H,
    config: PreviewConfig,
    slots: HashMap<CardId, LiveSlot<H::Viewer>>,
    live: Option<CardId>,
    next_token: u64,
}

impl<H: LiveHost> LivePreviewManager<H> {
    pub fn new(host: H, config: PreviewConfig) -> Self {
        Self {
            host,
            config,
            slots: HashMap::new(),
            live: None,
            next_token: 0,
        }
    }

    pub fn live_card(&self) -> Option<CardId> {
        self.live
    }

    #[cfg(test)]
    pub(crate) fn is_mounted(&self, card: CardId) -> bool {
        self.slots.contains_key(&card)
    }

    /// Mounts a viewer for `card`. Returns whether a new viewer was mounted.
    pub fn start(&mut self, card: CardId) -> bool {
        if self.slots.contains_key(&card) {
            return false;
        }
        let Some(target) = self.host.read_target(card) else {
            debug!("card {:?} has no preview url, skipping", card);
            return false;
        };

        if let Some(live) = self.live.filter(|live| *live != card) {
            self.stop(live);
        }

        self.next_token += 1;
        let token = MountToken(self.next_token);
        let Some(viewer) = self.host.mount_viewer(card, &target, token) else {
            debug!("card {:?} has no live slot, skipping", card);
            return false;
        };

        debug!("mounted live preview of {} in card {:?}", target.url(), card);
        self.slots.insert(
            card,
            LiveSlot {
                viewer,
                token,
                phase: SlotPhase::Loading,
            },
        );
        true
    }

    /// Unmounts the viewer of `card`, if any.
    pub fn stop(&mut self, card: CardId) -> bool {
        let Some(slot) = self.slots.remove(&card) else {
            return false;
        };
        if self.live == Some(card) {
            self.live = None;
        }
        self.host.set_live(card, false);
        self.host.unmount_viewer(card, slot.viewer);
        true
    }

    /// The viewer finished loading its page.
    pub fn viewer_loaded(&mut self, card: CardId, token: MountToken) -> FitAttempt {
        match self.slots.get_mut(&card) {
            Some(slot) if slot.token == token && slot.phase == SlotPhase::Loading => {
                slot.phase = SlotPhase::Fitting { attempts: 0 };
            }
            _ => return FitAttempt::Ignored,
        }
        self.attempt_fit(card)
    }

    pub fn retry_fit(&mut self, card: CardId, token: MountToken) -> FitAttempt {
        match self.slots.get(&card) {
            Some(slot) if slot.token == token && matches!(slot.phase, SlotPhase::Fitting { .. }) => {}
            _ => return FitAttempt::Ignored,
        }
        self.attempt_fit(card)
    }

    pub fn handle_resize(&mut self) {
        let resolution = self.config.virtual_resolution;
        for (card, slot) in &self.slots {
            if let Some(fit) = fit_scaled(self.host.container_size(*card), resolution) {
                self.host.style_viewer(&slot.viewer, &ViewerStyle::Scaled(fit));
            }
        }
    }

    fn attempt_fit(&mut self, card: CardId) -> FitAttempt {
        let fit = fit_scaled(self.host.container_size(card), self.config.virtual_resolution);
        let Some(slot) = self.slots.get_mut(&card) else {
            return FitAttempt::Ignored;
        };
        let SlotPhase::Fitting { attempts } = slot.phase else {
            return FitAttempt::Ignored;
        };

        match fit {
            Some(fit) => {
                self.host.style_viewer(&slot.viewer, &ViewerStyle::Scaled(fit));
                self.promote(card);
                FitAttempt::Live
            }
            None => {
                let attempts = attempts + 1;
                if attempts < self.config.max_fit_attempts {
                    slot.phase = SlotPhase::Fitting { attempts };
                    self.host.schedule_fit_retry(card, slot.token);
                    FitAttempt::Retrying
                } else {
                    slot.phase = SlotPhase::Idle;
                    debug!("card {:?} never got a size, leaving preview hidden", card);
                    FitAttempt::GaveUp
                }
            }
        }
    }

    /// Makes `card` the only live card.
    fn promote(&mut self, card: CardId) {
        if let Some(previous) = self.live.replace(card).filter(|previous| *previous != card) {
            if let Some(slot) = self.slots.get_mut(&previous) {
                slot.phase = SlotPhase::Idle;
            }
            self.host.set_live(previous, false);
        }
        if let Some(slot) = self.slots.get_mut(&card) {
            slot.phase = SlotPhase::Live;
        }
        self.host.set_live(card, true);
        debug_assert!(
            self.slots.values().filter(|slot| slot.phase == SlotPhase::Live).count() <= 1,
            "more than one live preview"
        );
    }

    #[cfg(test)]
    pub(crate) fn host(&self) -> &H {
        &self.host
    }
}
