use log::{error, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use crate::lead::{self, SubmitStatus};

#[function_component(AuditForm)]
pub fn audit_form() -> Html {
    let form_ref = use_node_ref();
    let status = use_state(|| SubmitStatus::Idle);

    let onsubmit = {
        let form_ref = form_ref.clone();
        let status = status.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if status.is_sending() {
                return;
            }
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                warn!("audit form is not mounted");
                return;
            };

            status.set(SubmitStatus::Sending);
            let fields = lead::collect_fields(&form);
            let status = status.clone();

            spawn_local(async move {
                let result = match fields {
                    Ok(fields) => lead::submit_audit_request(&fields).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(()) => {
                        form.reset();
                        status.set(SubmitStatus::Sent);
                    }
                    Err(err) => {
                        error!("audit request failed: {}", err);
                        status.set(SubmitStatus::Failed);
                    }
                }
            });
        })
    };

    let sending = status.is_sending();

    html! {
        <section class="audit" id="audit" data-reveal="">
            <div class="section-heading">
                <h2>{"Votre audit d'automatisation offert"}</h2>
                <p>{"Décrivez votre activité : nous identifions les tâches à automatiser en priorité et vous envoyons un plan d'action sous 48 h."}</p>
            </div>
            <form id="audit-form" class="audit-form" ref={form_ref} {onsubmit}>
                <label>
                    {"Nom"}
                    <input type="text" name="nom" autocomplete="name" required=true />
                </label>
                <label>
                    {"Email professionnel"}
                    <input type="email" name="email" autocomplete="email" required=true />
                </label>
                <label>
                    {"Entreprise"}
                    <input type="text" name="entreprise" autocomplete="organization" />
                </label>
                <label>
                    {"Site web"}
                    <input type="url" name="site" placeholder="https://" />
                </label>
                <label class="full">
                    {"Quelles tâches vous prennent le plus de temps ?"}
                    <textarea name="besoin" rows="4" />
                </label>
                <button type="submit" class="btn-primary" disabled={sending}>
                    {status.button_label()}
                </button>
                <p id="audit-status" class={status.class().unwrap_or("status")} role="status" aria-live="polite">
                    {status.message()}
                </p>
            </form>
        </section>
    }
}
