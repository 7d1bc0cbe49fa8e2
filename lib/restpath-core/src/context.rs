//! Request-scoped metadata propagated as headers.

use std::collections::HashMap;

use uuid::Uuid;

/// Header carrying the transaction id.
pub const TXID_HEADER: &str = "X-TxID";

/// Transaction id and custom headers sent with every request of a logical
/// operation.
///
/// Build one per logical request and hand it to the client; it is read-only
/// afterwards. Without a transaction id each request gets a fresh one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    txid: Option<String>,
    headers: Vec<(String, String)>,
}

impl RequestContext {
    /// Empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transaction id.
    #[must_use]
    pub fn with_txid(mut self, txid: impl Into<String>) -> Self {
        self.txid = Some(txid.into());
        self
    }

    /// Add a custom header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Transaction id, if one was set.
    #[must_use]
    pub fn txid(&self) -> Option<&str> {
        self.txid.as_deref()
    }

    /// Custom headers, in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Headers for one request: `X-TxID` first, then the custom headers,
    /// which win on a case-insensitive name collision.
    #[must_use]
    pub fn to_headers(&self) -> HashMap<String, String> {
        let txid = self
            .txid
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut headers = HashMap::with_capacity(self.headers.len() + 1);
        headers.insert(TXID_HEADER.to_string(), txid);
        for (name, value) in &self.headers {
            // Header names are case-insensitive
            headers.retain(|existing: &String, _| !existing.eq_ignore_ascii_case(name));
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txid_is_propagated() {
        let headers = RequestContext::new().with_txid("tx-42").to_headers();
        assert_eq!(headers.get(TXID_HEADER).map(String::as_str), Some("tx-42"));
    }

    #[test]
    fn txid_is_created_when_absent() {
        let context = RequestContext::new();
        let first = context.to_headers();
        let second = context.to_headers();

        let first = first.get(TXID_HEADER).expect("txid");
        let second = second.get(TXID_HEADER).expect("txid");
        assert!(Uuid::parse_str(first).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn custom_headers_win() {
        let headers = RequestContext::new()
            .with_txid("tx-1")
            .with_header("X-Tenant", "acme")
            .with_header(TXID_HEADER, "override")
            .to_headers();

        assert_eq!(headers.get("X-Tenant").map(String::as_str), Some("acme"));
        assert_eq!(headers.get(TXID_HEADER).map(String::as_str), Some("override"));
    }

    #[test]
    fn custom_headers_win_whatever_the_case() {
        let headers = RequestContext::new()
            .with_txid("tx-1")
            .with_header("x-txid", "lower")
            .with_header("X-Tenant", "acme")
            .with_header("x-tenant", "globex")
            .to_headers();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("x-txid").map(String::as_str), Some("lower"));
        assert_eq!(headers.get("x-tenant").map(String::as_str), Some("globex"));
        assert!(!headers.contains_key(TXID_HEADER));
    }
}
