use gloo_net::http::Request;
use log::info;
use serde::Deserialize;

use crate::config;
use crate::content;
use crate::error::SiteError;

/// `global_settings` singleton as stored in Directus. Every field may be
/// left empty by the editors.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GlobalSettings {
    #[serde(default)]
    pub primary_cta_label: Option<String>,
    #[serde(default)]
    pub primary_cta_link: Option<String>,
    #[serde(default)]
    pub footer_text: Option<String>,
    #[serde(default)]
    pub default_seo_title: Option<String>,
}

#[derive(Deserialize)]
struct ItemsResponse {
    #[serde(default)]
    data: Option<GlobalSettings>,
}

/// Editable strings of the page, with the copy shipped in the markup as
/// defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteCopy {
    pub cta_label: String,
    pub cta_link: String,
    pub footer_text: String,
    pub page_title: Option<String>,
}

impl Default for SiteCopy {
    fn default() -> Self {
        Self {
            cta_label: content::AUDIT_CTA_LABEL.to_string(),
            cta_link: content::AUDIT_CTA_LINK.to_string(),
            footer_text: content::FOOTER_TEXT.to_string(),
            page_title: None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

impl SiteCopy {
    pub fn patched(mut self, settings: &GlobalSettings) -> Self {
        // Label and link only change together.
        if let (Some(label), Some(link)) = (
            non_empty(&settings.primary_cta_label),
            non_empty(&settings.primary_cta_link),
        ) {
            self.cta_label = label.to_string();
            self.cta_link = link.to_string();
        }
        if let Some(footer) = non_empty(&settings.footer_text) {
            self.footer_text = footer.to_string();
        }
        if let Some(title) = non_empty(&settings.default_seo_title) {
            self.page_title = Some(title.to_string());
        }
        self
    }
}

fn decode(body: &str) -> Result<GlobalSettings, serde_json::Error> {
    serde_json::from_str::<ItemsResponse>(body).map(|response| response.data.unwrap_or_default())
}

pub async fn fetch_global_settings() -> Result<GlobalSettings, SiteError> {
    let response = Request::get(config::get_settings_url()).send().await?;
    if !response.ok() {
        return Err(SiteError::Status(response.status()));
    }
    let body = response.text().await?;
    let settings = decode(&body).map_err(|err| SiteError::Decode(err.to_string()))?;
    info!("loaded global settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_directus_singleton() {
        let body = r#"{"data":{"id":1,"primary_cta_label":"Réserver un appel","primary_cta_link":"/contact","footer_text":"© MXL Digital","default_seo_title":"MXL Digital | Automatisation","date_updated":null}}"#;

        let settings = decode(body).expect("valid body");
        assert_eq!(settings.primary_cta_label.as_deref(), Some("Réserver un appel"));
        assert_eq!(settings.primary_cta_link.as_deref(), Some("/contact"));
        assert_eq!(settings.footer_text.as_deref(), Some("© MXL Digital"));
        assert_eq!(settings.default_seo_title.as_deref(), Some("MXL Digital | Automatisation"));
    }

    #[test]
    fn missing_or_null_data_decodes_to_defaults() {
        assert_eq!(decode(r#"{"data":null}"#).expect("valid body"), GlobalSettings::default());
        assert_eq!(decode(r#"{}"#).expect("valid body"), GlobalSettings::default());
        assert_eq!(
            decode(r#"{"data":{"footer_text":"Pied"}}"#).expect("valid body").footer_text.as_deref(),
            Some("Pied")
        );
        assert!(decode("<html>").is_err());
    }

    #[test]
    fn cta_changes_only_with_label_and_link() {
        let label_only = GlobalSettings {
            primary_cta_label: Some("Parlons-en".into()),
            ..Default::default()
        };
        assert_eq!(SiteCopy::default().patched(&label_only), SiteCopy::default());

        let both = GlobalSettings {
            primary_cta_label: Some("Parlons-en".into()),
            primary_cta_link: Some("https://cal.com/mxl".into()),
            ..Default::default()
        };
        let copy = SiteCopy::default().patched(&both);
        assert_eq!(copy.cta_label, "Parlons-en");
        assert_eq!(copy.cta_link, "https://cal.com/mxl");
        assert_eq!(copy.footer_text, content::FOOTER_TEXT);
    }

    #[test]
    fn footer_and_title_ignore_blank_values() {
        let settings = GlobalSettings {
            footer_text: Some("  ".into()),
            default_seo_title: Some("MXL Digital".into()),
            ..Default::default()
        };
        let copy = SiteCopy::default().patched(&settings);

        assert_eq!(copy.footer_text, content::FOOTER_TEXT);
        assert_eq!(copy.page_title.as_deref(), Some("MXL Digital"));
    }
}
