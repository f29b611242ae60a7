//! URL helpers shared by the relay client and the server.

/// Join `base_url` and `endpoint` with exactly one slash between them.
///
/// ```
/// use parley::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://127.0.0.1:3000/", "/api/chat"),
///     "http://127.0.0.1:3000/api/chat"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    format!("{base}/{endpoint}")
}
