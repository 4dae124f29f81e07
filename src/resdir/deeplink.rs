use crate::model::EntityId;

/// A request decoded from the page's addressable state (its query
/// string): an optional entity to locate and highlight after the first
/// fetch, and a boolean gating an administrative surface that is not part
/// of this engine.
///
/// The request is parsed once and handed to the supervisor at
/// construction, so the engine stays testable without any navigation
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLinkRequest {
    pub target: Option<EntityId>,
    pub admin: bool,
}

impl DeepLinkRequest {
    /// Parses a query string of the form `org=<id>&admin=true`. A leading
    /// `?` is tolerated, values are percent-decoded, `+` decodes to a
    /// space, unknown parameters are ignored, and malformed escapes fall
    /// back to the raw text.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut request = Self::default();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(key);
            let value = decode(value);
            match key.as_str() {
                "org" => {
                    if !value.is_empty() {
                        request.target = Some(value);
                    }
                }
                "admin" => {
                    request.admin = matches!(value.as_str(), "true" | "1");
                }
                _ => {}
            }
        }

        request
    }
}

fn decode(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => plus_decoded,
    }
}
