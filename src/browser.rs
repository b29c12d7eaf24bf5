use web_sys::{Document, MediaQueryList};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Kept around by callers that need to re-check the preference later, since
/// users can toggle it while the page is open.
pub fn reduced_motion_query() -> Option<MediaQueryList> {
    web_sys::window()?.match_media(REDUCED_MOTION_QUERY).ok().flatten()
}

pub fn prefers_reduced_motion() -> bool {
    reduced_motion_query().map(|query| query.matches()).unwrap_or(false)
}
