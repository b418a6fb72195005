use serde::{Deserialize, Serialize};

/// Where the payer's browser goes next
///
/// The caller turns this into an HTTP redirect or serves the markup as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedirectDirective {
    /// HTTP redirect to the gateway's payment page
    Url { target: String },

    /// Page that auto-submits a gateway-issued form
    HtmlForm { markup: String },
}

impl RedirectDirective {
    pub fn url(target: impl Into<String>) -> Self {
        RedirectDirective::Url {
            target: target.into(),
        }
    }

    /// Wrap a gateway form in a page that posts it on load
    pub fn auto_submit_form(form: &str) -> Self {
        let markup = format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n{}\n<script>\n(function () {{\n  var form = document.forms[0];\n  if (form) {{ form.submit(); }}\n}})();\n</script>\n</body>\n</html>\n",
            form
        );
        RedirectDirective::HtmlForm { markup }
    }

    pub fn target_url(&self) -> Option<&str> {
        match self {
            RedirectDirective::Url { target } => Some(target),
            RedirectDirective::HtmlForm { .. } => None,
        }
    }
}
