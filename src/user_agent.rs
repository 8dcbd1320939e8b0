//! User-Agent string sent with every image request.

/// Project URL for User-Agent identification (RFC 9308 good citizenship).
const PROJECT_UA_URL: &str = "https://github.com/fierce/imgfetch";

/// Default User-Agent for image requests (identifies the tool and its version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("imgfetch/{version} (+{PROJECT_UA_URL})")
}
