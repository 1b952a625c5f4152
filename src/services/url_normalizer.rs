use regex::Regex;
use std::sync::LazyLock;

const DRIVE_HOST: &str = "drive.google.com";

static DRIVE_FILE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").expect("valid drive file regex"));

/// Rewrites a Google Drive "file view" link into a direct-fetch link
///
/// Anything that is not a Drive file link (including empty strings and links
/// already in direct-fetch form) is returned unchanged, so the function is
/// idempotent.
pub fn normalize(url: &str) -> String {
    if url.is_empty() || !url.contains(DRIVE_HOST) {
        return url.to_string();
    }

    match DRIVE_FILE_ID.captures(url) {
        Some(caps) => {
            let direct = format!("https://{DRIVE_HOST}/uc?export=view&id={}", &caps[1]);
            tracing::debug!(from = %url, to = %direct, "Rewrote Drive share link");
            direct
        }
        None => {
            if !url.contains("/uc?") {
                tracing::warn!(url = %url, "Drive link without a file id");
            }
            url.to_string()
        }
    }
}
