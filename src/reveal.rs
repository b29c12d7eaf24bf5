use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

const REVEAL_SELECTOR: &str = "[data-reveal]";
const VISIBLE_CLASS: &str = "is-visible";
const REVEAL_THRESHOLD: f64 = 0.15;

/// Watches `[data-reveal]` sections. Disconnects on drop.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn reveal(element: &Element) {
    if let Err(err) = element.class_list().add_1(VISIBLE_CLASS) {
        warn!("could not reveal element: {:?}", err);
    }
}

fn observer_supported() -> bool {
    web_sys::window()
        .and_then(|window| Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).ok())
        .unwrap_or(false)
}

fn reveal_targets(document: &Document) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(REVEAL_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Reveals each section the first time 15% of it scrolls into view. With
/// reduced motion, or without `IntersectionObserver`, everything is revealed
/// at once and `None` is returned.
pub fn observe_reveals(document: &Document, reduced_motion: bool) -> Option<RevealObserver> {
    let elements = reveal_targets(document);
    if elements.is_empty() {
        return None;
    }
    if reduced_motion || !observer_supported() {
        debug!("revealing {} sections immediately", elements.len());
        elements.iter().for_each(reveal);
        return None;
    }

    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                let target = entry.target();
                reveal(&target);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => observer,
        Err(err) => {
            warn!("IntersectionObserver rejected: {:?}", err);
            elements.iter().for_each(reveal);
            return None;
        }
    };

    for element in &elements {
        observer.observe(element);
    }
    Some(RevealObserver {
        observer,
        _callback: callback,
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn reduced_motion_reveals_every_section_at_once() {
        let document = crate::browser::document().expect("document");
        let root = document.create_element("div").expect("create root");
        root.set_inner_html(
            r#"
            <section data-reveal>Services</section>
            <section data-reveal>Réalisations</section>
            <section>Pied de page</section>
            "#,
        );
        document.body().expect("body").append_child(&root).expect("append root");

        assert!(observe_reveals(&document, true).is_none());

        let sections = root.query_selector_all("section").expect("query");
        let visible: Vec<bool> = (0..sections.length())
            .filter_map(|index| sections.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|section| section.class_list().contains(VISIBLE_CLASS))
            .collect();
        assert_eq!(visible, vec![true, true, false]);
        root.remove();
    }
}
