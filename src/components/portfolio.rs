use log::debug;
use yew::prelude::*;

use crate::browser;
use crate::content::{Project, PROJECTS};
use crate::preview::dom::init_portfolio_previews;
use crate::preview::PreviewConfig;

fn project_card(project: &Project) -> Html {
    html! {
        <article
            class="portfolio-card"
            key={project.url}
            data-portfolio-preview={project.url}
            data-portfolio-title={project.title}
        >
            <div class="portfolio-screen">
                <div class="portfolio-placeholder" aria-hidden="true">
                    <span>{project.title}</span>
                </div>
                <div class="portfolio-live" data-portfolio-live=""></div>
            </div>
            <div class="portfolio-body">
                <h3>{project.title}</h3>
                <p>{project.summary}</p>
                <ul class="portfolio-tags">
                    { for project.tags.iter().map(|tag| html! { <li>{*tag}</li> }) }
                </ul>
            </div>
        </article>
    }
}

#[function_component(Portfolio)]
pub fn portfolio() -> Html {
    // Cards and overlay are static markup; the previews are bound once they
    // are in the document.
    use_effect_with_deps(
        move |_| {
            let previews = browser::document()
                .and_then(|document| init_portfolio_previews(&document, PreviewConfig::default()));
            if previews.is_none() {
                debug!("no portfolio previews on this page");
            }
            move || {
                if let Some(previews) = &previews {
                    debug!(
                        "unbinding portfolio previews (live card {:?}, lightbox {:?})",
                        previews.live_card(),
                        previews.lightbox_phase()
                    );
                }
                drop(previews)
            }
        },
        (),
    );

    html! {
        <>
            <section class="portfolio" id="realisations" data-reveal="">
                <div class="section-heading">
                    <h2>{"Réalisations"}</h2>
                    <p>{"Chaque aperçu est le site en ligne. Cliquez pour l'ouvrir en grand."}</p>
                </div>
                <div class="portfolio-grid">
                    { for PROJECTS.iter().map(project_card) }
                </div>
            </section>

            // Outside the revealed section: its transform would re-anchor the
            // fixed overlay.
            <div
                class="portfolio-overlay"
                data-portfolio-overlay=""
                role="dialog"
                aria-modal="true"
                aria-labelledby="portfolio-modal-title"
                aria-hidden="true"
                hidden=true
            >
                <div class="portfolio-modal">
                    <header class="portfolio-modal-header">
                        <h3 id="portfolio-modal-title" data-portfolio-modal-title=""></h3>
                        <button type="button" class="portfolio-close" data-portfolio-close="" aria-label="Fermer l'aperçu">
                            {"×"}
                        </button>
                    </header>
                    <div class="portfolio-viewport">
                        <iframe data-portfolio-frame="" title="Aperçu du projet" src="about:blank"></iframe>
                    </div>
                </div>
            </div>
        </>
    }
}
