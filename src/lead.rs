use std::collections::BTreeMap;

use gloo_net::http::Request;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{self, Array};
use web_sys::{FormData, HtmlFormElement};

use crate::config;
use crate::error::SiteError;

pub const SUBMIT_LABEL: &str = "Recevoir mon audit gratuit";
pub const SENDING_LABEL: &str = "Envoi en cours...";

/// Flat name/value view of a submitted form. A repeated name keeps its last
/// value.
pub type LeadFields = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Sending,
    Sent,
    Failed,
}

impl SubmitStatus {
    pub fn is_sending(self) -> bool {
        self == SubmitStatus::Sending
    }

    pub fn button_label(self) -> &'static str {
        if self.is_sending() {
            SENDING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Classes of the status line, `None` while there is nothing to show.
    pub fn class(self) -> Option<&'static str> {
        match self {
            SubmitStatus::Idle => None,
            SubmitStatus::Sending => Some("status loading is-visible"),
            SubmitStatus::Sent => Some("status success is-visible"),
            SubmitStatus::Failed => Some("status error is-visible"),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SubmitStatus::Idle => "",
            SubmitStatus::Sending => "Envoi de votre demande d'audit...",
            SubmitStatus::Sent => "Votre demande a été envoyée. Vous recevrez votre audit par email.",
            SubmitStatus::Failed => "Une erreur est survenue. Veuillez réessayer ou nous contacter.",
        }
    }
}

/// Reads every named control of `form`. File inputs are skipped.
pub fn collect_fields(form: &HtmlFormElement) -> Result<LeadFields, SiteError> {
    let data = FormData::new_with_form(form)?;
    let entries = js_sys::try_iter(&data)?
        .ok_or_else(|| SiteError::Dom("FormData is not iterable".to_string()))?;

    let mut fields = LeadFields::new();
    for entry in entries {
        let entry: Array = entry?.dyn_into()?;
        if let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
            fields.insert(name, value);
        }
    }
    Ok(fields)
}

pub async fn submit_audit_request(fields: &LeadFields) -> Result<(), SiteError> {
    let response = Request::post(config::get_audit_webhook_url())
        .json(fields)?
        .send()
        .await?;

    if !response.ok() {
        return Err(SiteError::Status(response.status()));
    }
    info!("audit request accepted for {} fields", fields.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_sending_disables_and_relabels_the_button() {
        assert_eq!(SubmitStatus::Sending.button_label(), SENDING_LABEL);
        for status in [SubmitStatus::Idle, SubmitStatus::Sent, SubmitStatus::Failed] {
            assert!(!status.is_sending());
            assert_eq!(status.button_label(), SUBMIT_LABEL);
        }
    }

    #[test]
    fn each_outcome_has_its_own_status_line() {
        assert_eq!(SubmitStatus::Idle.class(), None);
        assert_eq!(SubmitStatus::Sending.class(), Some("status loading is-visible"));
        assert_eq!(SubmitStatus::Sent.class(), Some("status success is-visible"));
        assert_eq!(SubmitStatus::Failed.class(), Some("status error is-visible"));
        assert!(SubmitStatus::Sent.message().contains("audit par email"));
    }

    #[test]
    fn fields_serialize_to_a_flat_object() {
        let mut fields = LeadFields::new();
        fields.insert("email".into(), "contact@example.com".into());
        fields.insert("nom".into(), "Camille".into());

        let body = serde_json::to_value(&fields).expect("serializable");
        assert_eq!(body, serde_json::json!({ "email": "contact@example.com", "nom": "Camille" }));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn repeated_names_keep_the_last_value_and_files_are_skipped() {
        let document = crate::browser::document().expect("document");
        let form = document
            .create_element("form")
            .expect("create form")
            .dyn_into::<HtmlFormElement>()
            .expect("form element");
        form.set_inner_html(
            r#"
            <input name="email" value="contact@example.com">
            <input name="tag" value="premier">
            <input name="tag" value="dernier">
            <input type="file" name="doc">
            <input value="sans nom">
            "#,
        );

        let fields = collect_fields(&form).expect("form data readable");

        assert_eq!(fields.get("tag").map(String::as_str), Some("dernier"));
        assert_eq!(fields.get("email").map(String::as_str), Some("contact@example.com"));
        assert!(!fields.contains_key("doc"));
        assert_eq!(fields.len(), 2);
    }
}
