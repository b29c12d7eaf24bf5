use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::roi::{format_eur, RoiDraft, RoiField};

#[function_component(RoiCalculator)]
pub fn roi_calculator() -> Html {
    let draft = use_state(RoiDraft::default);
    let estimate = draft.inputs().estimate();

    let field_input = |field: RoiField| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.set(field, input.value());
            draft.set(next);
        })
    };

    html! {
        <section class="roi" id="roi" data-reveal="">
            <div class="section-heading">
                <h2>{"Combien l'automatisation peut vous rapporter ?"}</h2>
                <p>{"Une estimation rapide à partir de vos chiffres. Rien n'est envoyé."}</p>
            </div>
            <div class="roi-grid">
                <form id="roi-form" class="roi-form" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                    { for RoiField::ALL.into_iter().map(|field| html! {
                        <label key={field.name()}>
                            {field.label()}
                            <input
                                type="number"
                                min="0"
                                step="any"
                                inputmode="decimal"
                                name={field.name()}
                                value={draft.get(field).to_string()}
                                oninput={field_input(field)}
                            />
                        </label>
                    }) }
                </form>
                <dl class="roi-results" aria-live="polite">
                    <div>
                        <dt>{"Gain de temps mensuel"}</dt>
                        <dd data-output="monthly-savings">{format_eur(estimate.monthly_savings)}</dd>
                    </div>
                    <div>
                        <dt>{"Revenu issu des leads"}</dt>
                        <dd data-output="lead-revenue">{format_eur(estimate.lead_revenue)}</dd>
                    </div>
                    <div>
                        <dt>{"Impact total"}</dt>
                        <dd data-output="total-impact">{format_eur(estimate.total_impact)}</dd>
                    </div>
                    <div>
                        <dt>{"ROI"}</dt>
                        <dd data-output="roi">{estimate.roi_label()}</dd>
                    </div>
                    <div>
                        <dt>{"Retour sur investissement"}</dt>
                        <dd data-output="payback">{estimate.payback_label()}</dd>
                    </div>
                </dl>
            </div>
        </section>
    }
}
