use log::{error, info, Level};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod browser;
mod config;
mod content;
mod error;
mod lead;
mod preview;
mod reveal;
mod roi;
mod settings;
mod starfield;
mod components {
    pub mod audit_form;
    pub mod portfolio;
    pub mod roi_calculator;
    pub mod starfall;
}
mod pages {
    pub mod home;
}

use pages::home::Home;
use settings::SiteCopy;

#[function_component]
fn App() -> Html {
    let site_copy = use_state(SiteCopy::default);

    {
        let site_copy = site_copy.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match settings::fetch_global_settings().await {
                        Ok(global) => {
                            let copy = SiteCopy::default().patched(&global);
                            if let (Some(title), Some(document)) = (&copy.page_title, browser::document()) {
                                document.set_title(title);
                            }
                            site_copy.set(copy);
                        }
                        // The page keeps the copy it shipped with.
                        Err(err) => error!("could not load global settings: {}", err),
                    }
                });
                || ()
            },
            (),
        );
    }

    html! {
        <Home copy={(*site_copy).clone()} />
    }
}

fn main() {
    console_error_panic_hook::set_once();

    if let Err(err) = console_log::init_with_level(Level::Info) {
        web_sys::console::error_1(&format!("error initializing log: {}", err).into());
    }

    info!("Starting mxl-site");
    yew::Renderer::<App>::new().render();
}
