use log::debug;

use super::geometry::{fit_stretched, ViewerStyle};
use super::PreviewTarget;

/// The overlay operations the lightbox controller drives.
pub trait ModalView {
    /// Something that can take keyboard focus back after the overlay closes.
    type Focus;

    /// Sets title and viewer source, unhides the overlay and exposes it to
    /// assistive technology.
    fn show(&mut self, target: &PreviewTarget);

    /// Starts the opening transition.
    fn activate(&mut self);

    /// Starts the closing transition and hides the overlay from assistive
    /// technology. The overlay stays in the layout until `hide`.
    fn deactivate(&mut self);

    /// Takes the overlay out of the layout and blanks the viewer.
    fn hide(&mut self);

    fn apply_fit(&mut self, style: &ViewerStyle);

    fn focused_element(&self) -> Option<Self::Focus>;

    fn focus_close_control(&mut self);

    fn restore_focus(&mut self, focus: Self::Focus);

    fn prefers_reduced_motion(&self) -> bool;

    /// Calls `frame_ready(token)` back on the next animation frame.
    fn schedule_open_frame(&mut self, token: OpenToken);

    /// Calls `close_trigger(token)` back when the closing transition ends and
    /// again from a fallback timer. Both may fire.
    fn arm_close_triggers(&mut self, token: CloseToken);

    fn disarm_close_triggers(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Nothing to close.
    Ignored,
    /// Waiting for the transition or the fallback timer.
    Pending(CloseToken),
    /// Reduced motion: cleanup already ran.
    Completed,
}

pub struct ModalController<V: ModalView> {
    view: V,
    phase: ModalPhase,
    target: Option<PreviewTarget>,
    last_focused: Option<V::Focus>,
    // Bumped on every open and close so callbacks from an earlier cycle
    // never match.
    cycle: u64,
}

impl<V: ModalView> ModalController<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            phase: ModalPhase::Closed,
            target: None,
            last_focused: None,
            cycle: 0,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    #[cfg(test)]
    pub(crate) fn target(&self) -> Option<&PreviewTarget> {
        self.target.as_ref()
    }

    pub fn open(&mut self, target: PreviewTarget) -> bool {
        if self.phase != ModalPhase::Closed {
            debug!("lightbox is {:?}, ignoring open of {}", self.phase, target.url());
            return false;
        }
        if target.url().is_empty() {
            return false;
        }

        self.view.show(&target);
        self.last_focused = self.view.focused_element();
        self.phase = ModalPhase::Opening;
        self.cycle += 1;
        self.view.schedule_open_frame(OpenToken(self.cycle));
        self.view.focus_close_control();

        debug!("opening lightbox for {}", target.url());
        self.target = Some(target);
        true
    }

    pub fn frame_ready(&mut self, token: OpenToken) -> bool {
        if self.phase != ModalPhase::Opening || token != OpenToken(self.cycle) {
            return false;
        }
        self.view.activate();
        self.view.apply_fit(&fit_stretched());
        self.phase = ModalPhase::Open;
        true
    }

    pub fn close(&mut self) -> CloseOutcome {
        if !matches!(self.phase, ModalPhase::Open | ModalPhase::Opening) {
            return CloseOutcome::Ignored;
        }

        self.view.deactivate();
        self.phase = ModalPhase::Closing;
        self.cycle += 1;

        if self.view.prefers_reduced_motion() {
            self.finish_close();
            return CloseOutcome::Completed;
        }

        let token = CloseToken(self.cycle);
        self.view.arm_close_triggers(token);
        CloseOutcome::Pending(token)
    }

    /// Transition end or fallback timer. Only the first call for the current
    /// close runs the cleanup.
    pub fn close_trigger(&mut self, token: CloseToken) -> bool {
        if self.phase != ModalPhase::Closing || token != CloseToken(self.cycle) {
            return false;
        }
        self.finish_close();
        true
    }

    pub fn on_keydown(&mut self, key: &str) -> CloseOutcome {
        match key {
            "Escape" | "Esc" => self.close(),
            _ => CloseOutcome::Ignored,
        }
    }

    pub fn handle_resize(&mut self) {
        if self.phase == ModalPhase::Open {
            self.view.apply_fit(&fit_stretched());
        }
    }

    /// Closes at once, skipping the transition. Used when the page tears the
    /// lightbox down.
    pub fn dismiss(&mut self) -> bool {
        if self.phase == ModalPhase::Closed {
            return false;
        }
        if self.phase != ModalPhase::Closing {
            self.view.deactivate();
        }
        self.cycle += 1;
        self.finish_close();
        true
    }

    fn finish_close(&mut self) {
        self.view.disarm_close_triggers();
        self.view.hide();
        if let Some(focus) = self.last_focused.take() {
            self.view.restore_focus(focus);
        }
        self.target = None;
        self.phase = ModalPhase::Closed;
        debug!("lightbox closed");
    }

    #[cfg(test)]
    pub(crate) fn view(&self) -> &V {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Focus {
        Card,
        CloseControl,
    }

    #[derive(Default)]
    struct FakeOverlay {
        visible: bool,
        active: bool,
        aria_hidden: bool,
        title: Option<String>,
        src: Option<String>,
        focused: Option<Focus>,
        fits: Vec<ViewerStyle>,
        reduced_motion: bool,
        open_frames: Vec<OpenToken>,
        armed: Vec<CloseToken>,
        disarmed: usize,
        focus_captures: Cell<usize>,
        restored: Vec<Focus>,
    }

    impl ModalView for FakeOverlay {
        type Focus = Focus;

        fn show(&mut self, target: &PreviewTarget) {
            self.visible = true;
            self.aria_hidden = false;
            self.title = Some(target.title().to_string());
            self.src = Some(target.url().to_string());
        }

        fn activate(&mut self) {
            self.active = true;
        }

        fn deactivate(&mut self) {
            self.active = false;
            self.aria_hidden = true;
        }

        fn hide(&mut self) {
            self.visible = false;
            self.src = Some("about:blank".to_string());
        }

        fn apply_fit(&mut self, style: &ViewerStyle) {
            self.fits.push(*style);
        }

        fn focused_element(&self) -> Option<Focus> {
            self.focus_captures.set(self.focus_captures.get() + 1);
            self.focused
        }

        fn focus_close_control(&mut self) {
            self.focused = Some(Focus::CloseControl);
        }

        fn restore_focus(&mut self, focus: Focus) {
            self.focused = Some(focus);
            self.restored.push(focus);
        }

        fn prefers_reduced_motion(&self) -> bool {
            self.reduced_motion
        }

        fn schedule_open_frame(&mut self, token: OpenToken) {
            self.open_frames.push(token);
        }

        fn arm_close_triggers(&mut self, token: CloseToken) {
            self.armed.push(token);
        }

        fn disarm_close_triggers(&mut self) {
            self.disarmed += 1;
        }
    }

    impl FakeOverlay {
        fn focused_on_card() -> Self {
            FakeOverlay {
                focused: Some(Focus::Card),
                ..Default::default()
            }
        }
    }

    fn demo() -> PreviewTarget {
        PreviewTarget::from_attributes(Some("https://example.com/demo".into()), Some("Demo".into()))
            .expect("url present")
    }

    fn opened(view: FakeOverlay) -> ModalController<FakeOverlay> {
        let mut modal = ModalController::new(view);
        assert!(modal.open(demo()));
        let token = *modal.view().open_frames.last().expect("frame scheduled");
        assert!(modal.frame_ready(token));
        modal
    }

    #[test]
    fn open_shows_overlay_and_moves_focus() {
        let mut modal = ModalController::new(FakeOverlay::focused_on_card());

        assert!(modal.open(demo()));
        assert_eq!(modal.phase(), ModalPhase::Opening);

        let view = modal.view();
        assert!(view.visible);
        assert!(!view.aria_hidden);
        assert_eq!(view.title.as_deref(), Some("Demo"));
        assert_eq!(view.src.as_deref(), Some("https://example.com/demo"));
        assert_eq!(view.focused, Some(Focus::CloseControl));
        assert_eq!(modal.last_focused, Some(Focus::Card));
        assert!(!view.active);

        let token = view.open_frames[0];
        assert!(modal.frame_ready(token));
        assert_eq!(modal.phase(), ModalPhase::Open);
        assert!(modal.view().active);
        assert_eq!(modal.view().fits, vec![ViewerStyle::Stretched]);
    }

    #[test]
    fn second_open_is_rejected() {
        let mut modal = opened(FakeOverlay::focused_on_card());
        let other = PreviewTarget::from_attributes(Some("https://example.com/other".into()), None)
            .expect("url present");

        assert!(!modal.open(other));
        assert_eq!(modal.phase(), ModalPhase::Open);
        assert_eq!(modal.target().map(PreviewTarget::url), Some("https://example.com/demo"));
        assert_eq!(modal.view().focus_captures.get(), 1);
        assert_eq!(modal.last_focused, Some(Focus::Card));
    }

    #[test]
    fn close_cleans_up_once_when_both_triggers_fire() {
        let mut modal = opened(FakeOverlay::focused_on_card());

        let CloseOutcome::Pending(token) = modal.close() else {
            panic!("expected a pending close");
        };
        assert_eq!(modal.phase(), ModalPhase::Closing);
        assert!(modal.view().aria_hidden);
        assert!(modal.view().visible);

        assert!(modal.close_trigger(token));
        assert!(!modal.close_trigger(token));

        let view = modal.view();
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(!view.visible);
        assert_eq!(view.src.as_deref(), Some("about:blank"));
        assert_eq!(view.restored, vec![Focus::Card]);
        assert_eq!(view.disarmed, 1);
        assert_eq!(modal.last_focused, None);
    }

    #[test]
    fn reduced_motion_closes_synchronously() {
        let mut modal = opened(FakeOverlay {
            reduced_motion: true,
            ..FakeOverlay::focused_on_card()
        });

        assert_eq!(modal.close(), CloseOutcome::Completed);
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(modal.view().armed.is_empty());
        assert_eq!(modal.view().restored, vec![Focus::Card]);
    }

    #[test]
    fn escape_only_closes_an_open_lightbox() {
        let mut modal = ModalController::new(FakeOverlay::focused_on_card());
        assert_eq!(modal.on_keydown("Escape"), CloseOutcome::Ignored);
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(modal.view().restored.is_empty());

        let mut modal = opened(FakeOverlay::focused_on_card());
        assert_eq!(modal.on_keydown("Enter"), CloseOutcome::Ignored);
        let CloseOutcome::Pending(token) = modal.on_keydown("Escape") else {
            panic!("expected a pending close");
        };
        assert_eq!(modal.phase(), ModalPhase::Closing);
        assert_eq!(modal.on_keydown("Escape"), CloseOutcome::Ignored);
        assert!(modal.close_trigger(token));
        assert_eq!(modal.phase(), ModalPhase::Closed);

        let mut modal = opened(FakeOverlay::focused_on_card());
        assert!(matches!(modal.on_keydown("Esc"), CloseOutcome::Pending(_)));
        assert_eq!(modal.phase(), ModalPhase::Closing);
    }

    #[test]
    fn dismiss_tears_down_without_waiting_for_the_transition() {
        let mut modal = ModalController::new(FakeOverlay::focused_on_card());
        assert!(!modal.dismiss());
        assert_eq!(modal.view().disarmed, 0);

        let mut modal = opened(FakeOverlay::focused_on_card());
        assert!(modal.dismiss());
        let view = modal.view();
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(!view.visible);
        assert!(!view.active);
        assert!(view.aria_hidden);
        assert!(view.armed.is_empty());
        assert_eq!(view.restored, vec![Focus::Card]);

        let mut modal = opened(FakeOverlay::focused_on_card());
        let CloseOutcome::Pending(token) = modal.close() else {
            panic!("expected a pending close");
        };
        assert!(modal.dismiss());
        assert!(!modal.close_trigger(token));
        assert_eq!(modal.view().restored, vec![Focus::Card]);
        assert_eq!(modal.phase(), ModalPhase::Closed);
    }

    #[test]
    fn close_during_opening_drops_the_pending_frame() {
        let mut modal = ModalController::new(FakeOverlay::focused_on_card());
        modal.open(demo());
        let frame = modal.view().open_frames[0];

        let CloseOutcome::Pending(token) = modal.close() else {
            panic!("expected a pending close");
        };
        assert!(!modal.frame_ready(frame));
        assert!(!modal.view().active);
        assert!(modal.close_trigger(token));
        assert!(!modal.frame_ready(frame));
        assert_eq!(modal.phase(), ModalPhase::Closed);
    }

    #[test]
    fn stale_close_trigger_does_not_close_a_reopened_lightbox() {
        let mut modal = opened(FakeOverlay::focused_on_card());
        let CloseOutcome::Pending(first) = modal.close() else {
            panic!("expected a pending close");
        };
        assert!(modal.close_trigger(first));

        assert!(modal.open(demo()));
        assert!(!modal.close_trigger(first));
        assert_eq!(modal.phase(), ModalPhase::Opening);
        assert_eq!(modal.view().focus_captures.get(), 2);
    }

    #[test]
    fn resize_refits_only_while_open() {
        let mut modal = ModalController::new(FakeOverlay::focused_on_card());
        modal.handle_resize();
        assert!(modal.view().fits.is_empty());

        modal.open(demo());
        modal.handle_resize();
        assert!(modal.view().fits.is_empty());

        let token = modal.view().open_frames[0];
        modal.frame_ready(token);
        modal.handle_resize();
        assert_eq!(modal.view().fits.len(), 2);
    }
}
