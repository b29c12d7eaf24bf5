//! Browser side of the portfolio previews: DOM hosts for the live preview
//! manager and the lightbox controller, and the entry point that wires them
//! to the cards rendered on the page.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlIFrameElement, KeyboardEvent, MediaQueryList};

use super::geometry::{Size, ViewerStyle};
use super::live::{LiveHost, LivePreviewManager, MountToken};
use super::modal::{CloseToken, ModalController, ModalPhase, ModalView, OpenToken};
use super::{CardId, PreviewConfig, PreviewTarget};
use crate::browser;

const CARD_SELECTOR: &str = "[data-portfolio-preview]";
const LIVE_SLOT_SELECTOR: &str = "[data-portfolio-live]";
const OVERLAY_SELECTOR: &str = "[data-portfolio-overlay]";
const FRAME_SELECTOR: &str = "[data-portfolio-frame]";
const MODAL_TITLE_SELECTOR: &str = "[data-portfolio-modal-title]";
const CLOSE_SELECTOR: &str = "[data-portfolio-close]";

type SharedLive = Rc<RefCell<LivePreviewManager<DomPreviewCards>>>;
type SharedLightbox = Rc<RefCell<ModalController<DomLightbox>>>;

fn warn_on_err(context: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!("{}: {:?}", context, err);
    }
}

fn apply_style(element: &HtmlElement, style: &ViewerStyle) {
    let css = element.style();
    for (property, value) in style.declarations() {
        warn_on_err(property, css.set_property(property, &value));
    }
}

fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_one<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector).ok().flatten()?.dyn_into::<T>().ok()
}

pub fn read_card_target(card: &Element) -> Option<PreviewTarget> {
    PreviewTarget::from_attributes(
        card.get_attribute("data-portfolio-preview"),
        card.get_attribute("data-portfolio-title"),
    )
}

pub struct DomViewer {
    iframe: HtmlIFrameElement,
    _on_load: EventListener,
}

pub struct DomPreviewCards {
    document: Document,
    cards: Vec<Element>,
    manager: Weak<RefCell<LivePreviewManager<DomPreviewCards>>>,
    retries: HashMap<CardId, AnimationFrame>,
}

impl DomPreviewCards {
    fn live_slot(&self, card: CardId) -> Option<Element> {
        self.cards.get(card.0)?.query_selector(LIVE_SLOT_SELECTOR).ok().flatten()
    }
}

impl LiveHost for DomPreviewCards {
    type Viewer = DomViewer;

    fn read_target(&self, card: CardId) -> Option<PreviewTarget> {
        read_card_target(self.cards.get(card.0)?)
    }

    fn mount_viewer(&mut self, card: CardId, target: &PreviewTarget, token: MountToken) -> Option<DomViewer> {
        let slot = self.live_slot(card)?;
        let iframe = self
            .document
            .create_element("iframe")
            .ok()?
            .dyn_into::<HtmlIFrameElement>()
            .ok()?;

        iframe.set_title(target.title());
        warn_on_err("aria-hidden", iframe.set_attribute("aria-hidden", "true"));
        warn_on_err("loading", iframe.set_attribute("loading", "lazy"));
        iframe.set_tab_index(-1);
        iframe.set_src(target.url());

        let manager = self.manager.clone();
        let on_load = EventListener::once(&iframe, "load", move |_| {
            let Some(manager) = manager.upgrade() else {
                return;
            };
            let Ok(mut manager) = manager.try_borrow_mut() else {
                warn!("live preview {:?} loaded while its manager was busy", card);
                return;
            };
            let outcome = manager.viewer_loaded(card, token);
            debug!("live preview {:?} loaded: {:?}", card, outcome);
        });

        if let Err(err) = slot.append_child(&iframe) {
            warn!("could not mount live preview {:?}: {:?}", card, err);
            return None;
        }
        Some(DomViewer {
            iframe,
            _on_load: on_load,
        })
    }

    fn unmount_viewer(&mut self, card: CardId, viewer: DomViewer) {
        self.retries.remove(&card);
        viewer.iframe.remove();
    }

    fn container_size(&self, card: CardId) -> Size {
        self.live_slot(card)
            .map(|slot| Size::new(slot.client_width() as f64, slot.client_height() as f64))
            .unwrap_or(Size::new(0.0, 0.0))
    }

    fn style_viewer(&mut self, viewer: &DomViewer, style: &ViewerStyle) {
        apply_style(&viewer.iframe, style);
    }

    fn set_live(&mut self, card: CardId, live: bool) {
        if let Some(element) = self.cards.get(card.0) {
            if let Err(err) = element.class_list().toggle_with_force("is-live", live) {
                warn!("is-live on card {:?}: {:?}", card, err);
            }
        }
    }

    fn schedule_fit_retry(&mut self, card: CardId, token: MountToken) {
        let manager = self.manager.clone();
        let frame = request_animation_frame(move |_| {
            if let Some(manager) = manager.upgrade() {
                manager.borrow_mut().retry_fit(card, token);
            }
        });
        self.retries.insert(card, frame);
    }
}

/// The lightbox markup, resolved once.
struct LightboxParts {
    overlay: HtmlElement,
    frame: HtmlIFrameElement,
    title: Option<Element>,
    close_control: Option<HtmlElement>,
}

impl LightboxParts {
    fn query(document: &Document) -> Option<Self> {
        let overlay = document
            .query_selector(OVERLAY_SELECTOR)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let frame = query_one::<HtmlIFrameElement>(&overlay, FRAME_SELECTOR)?;
        Some(Self {
            title: query_one::<Element>(&overlay, MODAL_TITLE_SELECTOR),
            close_control: query_one::<HtmlElement>(&overlay, CLOSE_SELECTOR),
            overlay,
            frame,
        })
    }
}

pub struct DomLightbox {
    document: Document,
    parts: LightboxParts,
    reduced_motion: Option<MediaQueryList>,
    config: PreviewConfig,
    controller: Weak<RefCell<ModalController<DomLightbox>>>,
    open_frame: Option<AnimationFrame>,
    close_timer: Option<Timeout>,
    transition_end: Option<EventListener>,
}

impl DomLightbox {
    fn set_body_flag(&self, open: bool) {
        if let Some(body) = self.document.body() {
            if let Err(err) = body.class_list().toggle_with_force("preview-open", open) {
                warn!("preview-open on body: {:?}", err);
            }
        }
    }
}

impl ModalView for DomLightbox {
    type Focus = HtmlElement;

    fn show(&mut self, target: &PreviewTarget) {
        if let Some(title) = &self.parts.title {
            title.set_text_content(Some(target.title()));
        }
        self.parts.frame.set_title(target.title());
        self.parts.frame.set_src(target.url());
        self.parts.overlay.set_hidden(false);
        warn_on_err("aria-hidden", self.parts.overlay.set_attribute("aria-hidden", "false"));
        self.set_body_flag(true);
    }

    fn activate(&mut self) {
        warn_on_err("is-active", self.parts.overlay.class_list().add_1("is-active"));
    }

    fn deactivate(&mut self) {
        self.open_frame = None;
        warn_on_err("is-active", self.parts.overlay.class_list().remove_1("is-active"));
        warn_on_err("aria-hidden", self.parts.overlay.set_attribute("aria-hidden", "true"));
        self.set_body_flag(false);
    }

    fn hide(&mut self) {
        self.parts.overlay.set_hidden(true);
        self.parts.frame.set_src("about:blank");
    }

    fn apply_fit(&mut self, style: &ViewerStyle) {
        apply_style(&self.parts.frame, style);
    }

    fn focused_element(&self) -> Option<HtmlElement> {
        self.document.active_element()?.dyn_into::<HtmlElement>().ok()
    }

    fn focus_close_control(&mut self) {
        if let Some(close) = &self.parts.close_control {
            warn_on_err("focus close control", close.focus());
        }
    }

    fn restore_focus(&mut self, focus: HtmlElement) {
        warn_on_err("restore focus", focus.focus());
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.as_ref().map(MediaQueryList::matches).unwrap_or(false)
    }

    fn schedule_open_frame(&mut self, token: OpenToken) {
        let controller = self.controller.clone();
        self.open_frame = Some(request_animation_frame(move |_| {
            if let Some(controller) = controller.upgrade() {
                controller.borrow_mut().frame_ready(token);
            }
        }));
    }

    fn arm_close_triggers(&mut self, token: CloseToken) {
        let overlay: EventTarget = self.parts.overlay.clone().into();
        let controller = self.controller.clone();
        self.transition_end = Some(EventListener::new(&self.parts.overlay, "transitionend", move |event| {
            // Transitions of the overlay's children bubble up here too.
            if event.target().as_ref() != Some(&overlay) {
                return;
            }
            if let Some(controller) = controller.upgrade() {
                controller.borrow_mut().close_trigger(token);
            }
        }));

        let controller = self.controller.clone();
        self.close_timer = Some(Timeout::new(self.config.close_fallback_ms, move || {
            if let Some(controller) = controller.upgrade() {
                controller.borrow_mut().close_trigger(token);
            }
        }));
    }

    fn disarm_close_triggers(&mut self) {
        self.transition_end = None;
        self.close_timer = None;
    }
}

/// Live previews and lightbox bound to the current page. Dropping it
/// unmounts every live viewer and detaches every listener.
pub struct PortfolioPreviews {
    live: SharedLive,
    lightbox: Option<SharedLightbox>,
    card_count: usize,
    _listeners: Vec<EventListener>,
}

impl PortfolioPreviews {
    pub fn lightbox_phase(&self) -> Option<ModalPhase> {
        self.lightbox.as_ref().map(|lightbox| lightbox.borrow().phase())
    }

    pub fn live_card(&self) -> Option<CardId> {
        self.live.borrow().live_card()
    }
}

impl Drop for PortfolioPreviews {
    fn drop(&mut self) {
        if let Some(lightbox) = &self.lightbox {
            lightbox.borrow_mut().dismiss();
        }
        let mut live = self.live.borrow_mut();
        for index in 0..self.card_count {
            live.stop(CardId(index));
        }
    }
}

/// Discovers the portfolio cards in `document`, eagerly starts their live
/// previews and binds the lightbox. Returns `None` when the page has no cards.
pub fn init_portfolio_previews(document: &Document, config: PreviewConfig) -> Option<PortfolioPreviews> {
    let cards = query_all(document, CARD_SELECTOR);
    if cards.is_empty() {
        return None;
    }
    let window = web_sys::window()?;

    let live: SharedLive = Rc::new_cyclic(|manager| {
        let host = DomPreviewCards {
            document: document.clone(),
            cards: cards.clone(),
            manager: manager.clone(),
            retries: HashMap::new(),
        };
        RefCell::new(LivePreviewManager::new(host, config))
    });

    let parts = LightboxParts::query(document);
    if parts.is_none() {
        warn!("portfolio overlay markup not found, cards will not open");
    }
    let overlay = parts.as_ref().map(|parts| parts.overlay.clone());
    let close_control = parts.as_ref().and_then(|parts| parts.close_control.clone());
    let lightbox: Option<SharedLightbox> = parts.map(|parts| {
        Rc::new_cyclic(|controller| {
            let view = DomLightbox {
                document: document.clone(),
                parts,
                reduced_motion: browser::reduced_motion_query(),
                config,
                controller: controller.clone(),
                open_frame: None,
                close_timer: None,
                transition_end: None,
            };
            RefCell::new(ModalController::new(view))
        })
    });

    let mut listeners = Vec::new();

    for (index, card) in cards.iter().enumerate() {
        live.borrow_mut().start(CardId(index));

        if let Some(lightbox) = &lightbox {
            let lightbox = Rc::clone(lightbox);
            let element = card.clone();
            listeners.push(EventListener::new(card, "click", move |_| {
                if let Some(target) = read_card_target(&element) {
                    lightbox.borrow_mut().open(target);
                }
            }));
        }
    }

    {
        let live = Rc::clone(&live);
        let lightbox = lightbox.clone();
        listeners.push(EventListener::new(&window, "resize", move |_| {
            live.borrow_mut().handle_resize();
            if let Some(lightbox) = &lightbox {
                lightbox.borrow_mut().handle_resize();
            }
        }));
    }

    if let (Some(lightbox), Some(overlay)) = (&lightbox, overlay) {
        let on_escape = Rc::clone(lightbox);
        listeners.push(EventListener::new(document, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                on_escape.borrow_mut().on_keydown(&event.key());
            }
        }));

        let on_backdrop = Rc::clone(lightbox);
        let backdrop: EventTarget = overlay.clone().into();
        listeners.push(EventListener::new(&overlay, "click", move |event| {
            if event.target().as_ref() == Some(&backdrop) {
                on_backdrop.borrow_mut().close();
            }
        }));

        if let Some(close_control) = close_control {
            let on_close = Rc::clone(lightbox);
            listeners.push(EventListener::new(&close_control, "click", move |_| {
                on_close.borrow_mut().close();
            }));
        }
    }

    info!("portfolio previews bound to {} cards", cards.len());
    Some(PortfolioPreviews {
        live,
        lightbox,
        card_count: cards.len(),
        _listeners: listeners,
    })
}
