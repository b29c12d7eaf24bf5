#[cfg(debug_assertions)]
pub fn get_settings_url() -> &'static str {
    match option_env!("MXL_SETTINGS_URL") {
        Some(url) => url,
        None => "http://localhost:8055/items/global_settings", // Local Directus
    }
}

#[cfg(not(debug_assertions))]
pub fn get_settings_url() -> &'static str {
    match option_env!("MXL_SETTINGS_URL") {
        Some(url) => url,
        None => "https://directus.mxl.digital/items/global_settings",
    }
}

#[cfg(debug_assertions)]
pub fn get_audit_webhook_url() -> &'static str {
    match option_env!("MXL_AUDIT_WEBHOOK_URL") {
        Some(url) => url,
        // n8n test webhook, only listens while the workflow editor is open
        None => "http://localhost:5678/webhook-test/d76973ee-23dc-45fc-ac98-8b95d207ade3",
    }
}

#[cfg(not(debug_assertions))]
pub fn get_audit_webhook_url() -> &'static str {
    match option_env!("MXL_AUDIT_WEBHOOK_URL") {
        Some(url) => url,
        None => "https://n8n.mxl.digital/webhook/d76973ee-23dc-45fc-ac98-8b95d207ade3",
    }
}
