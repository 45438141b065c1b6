//! Cache key derivation from request identity.

use md5::{Digest, Md5};

/// Compute the cache fingerprint for a request.
///
/// The fingerprint is the lowercase hex MD5 digest of the request URL
/// concatenated with its form parameters rendered as `name=value` pairs
/// joined by commas, in request order. A request without form parameters
/// hashes the URL alone.
///
/// Identical URL and parameter sequence always produce the same
/// fingerprint, across processes and restarts.
pub fn fingerprint(url: &str, form_params: &[(String, String)]) -> String {
    let mut hasher = Md5::new();
    hasher.update(url.as_bytes());
    hasher.update(param_string(form_params).as_bytes());
    hex::encode(hasher.finalize())
}

/// Render form parameters as `name=value` joined by `,` in request order.
///
/// An empty parameter list renders as the empty string.
fn param_string(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}
