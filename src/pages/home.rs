use yew::prelude::*;

use crate::browser;
use crate::components::audit_form::AuditForm;
use crate::components::portfolio::Portfolio;
use crate::components::roi_calculator::RoiCalculator;
use crate::components::starfall::Starfall;
use crate::content::SERVICES;
use crate::reveal::observe_reveals;
use crate::settings::SiteCopy;

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub copy: SiteCopy,
}

#[function_component(Home)]
pub fn home(props: &HomeProps) -> Html {
    use_effect_with_deps(
        move |_| {
            let observer = browser::document()
                .and_then(|document| observe_reveals(&document, browser::prefers_reduced_motion()));
            move || drop(observer)
        },
        (),
    );

    let copy = &props.copy;

    html! {
        <>
            <Starfall />
            <header class="site-header">
                <a class="brand" href="#">{"MXL Digital"}</a>
                <nav>
                    <a href="#services">{"Services"}</a>
                    <a href="#roi">{"ROI"}</a>
                    <a href="#realisations">{"Réalisations"}</a>
                    <a class="btn-secondary" href={copy.cta_link.clone()}>{copy.cta_label.clone()}</a>
                </nav>
            </header>
            <main>
                <section class="hero">
                    <h1>{"Automatisez ce qui vous ralentit."}</h1>
                    <p class="hero-subtitle">
                        {"Workflows, sites et agents IA pour les PME qui veulent vendre plus sans embaucher."}
                    </p>
                    <div class="hero-actions">
                        <a class="btn-primary" href="#audit">{"Demander mon audit"}</a>
                        <a class="btn-secondary" href="#realisations">{"Voir nos réalisations"}</a>
                    </div>
                </section>

                <section class="services" id="services" data-reveal="">
                    <div class="section-heading">
                        <h2>{"Ce que nous automatisons"}</h2>
                    </div>
                    <div class="services-grid">
                        { for SERVICES.iter().map(|service| html! {
                            <article class="service-card" key={service.title}>
                                <h3>{service.title}</h3>
                                <p>{service.summary}</p>
                            </article>
                        }) }
                    </div>
                </section>

                <RoiCalculator />
                <Portfolio />
                <AuditForm />
            </main>
            <footer class="site-footer">
                <p class="footer-text">{copy.footer_text.clone()}</p>
            </footer>
        </>
    }
}
