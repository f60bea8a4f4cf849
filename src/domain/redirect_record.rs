//! Redirect record for asynchronous log appends.

/// An in-memory redirect notification passed from the HTTP handler to the
/// background worker via a bounded channel.
///
/// Carries the raw request context only; user-agent classification and the
/// store append happen in the worker, off the response path. Cloneable for
/// sending across async boundaries.
#[derive(Debug, Clone)]
pub struct RedirectRecord {
    /// The identifier the client followed (short code or custom alias).
    pub identifier: String,
    pub client_ip: String,
    pub user_agent: String,
}

impl RedirectRecord {
    pub fn new(
        identifier: String,
        client_ip: String,
        user_agent: Option<&str>,
    ) -> Self {
        Self {
            identifier,
            client_ip,
            user_agent: user_agent.unwrap_or_default().to_string(),
        }
    }
}
