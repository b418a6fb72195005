//! Minimal SOAP 1.1 support: document/literal request envelopes and a flat
//! field extractor for responses.

use std::collections::HashMap;

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Build a request envelope; parameters keep their order
pub fn envelope(operation: &str, namespace: &str, params: &[(&str, String)]) -> String {
    let mut body = String::new();
    for (name, value) in params {
        body.push_str(&format!("<{name}>{}</{name}>", escape(value.as_str())));
    }

    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>",
            "<soap:Envelope xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
            "xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" xmlns:soap=\"{env}\">",
            "<soap:Body><{op} xmlns=\"{ns}\">{body}</{op}></soap:Body></soap:Envelope>"
        ),
        env = SOAP_ENV_NS,
        op = operation,
        ns = namespace,
        body = body
    )
}

/// `SOAPAction` header value for an operation
pub fn action(namespace: &str, operation: &str) -> String {
    format!("\"{}{}\"", namespace, operation)
}

/// Collect the text of every element by local name
///
/// Namespaces are ignored. Text of repeated elements is concatenated;
/// elements with only child elements map to an empty string.
pub fn parse_fields(xml: &str) -> Result<HashMap<String, String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut fields: HashMap<String, String> = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                fields.entry(name.clone()).or_default();
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                fields.entry(name).or_default();
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(text) => {
                if let Some(name) = stack.last() {
                    let value = text.unescape()?;
                    fields.entry(name.clone()).or_default().push_str(&value);
                }
            }
            Event::CData(data) => {
                if let Some(name) = stack.last() {
                    let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    fields.entry(name.clone()).or_default().push_str(&value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(fields)
}

/// Non-empty field value
pub fn field<'a>(fields: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Whether a fault code blames the server (`soap:Server`, SOAP 1.2 `Receiver`)
///
/// Server faults may clear on retry; client faults will not.
pub fn is_server_fault(code: &str) -> bool {
    let local = code.rsplit(':').next().unwrap_or(code).trim();
    let class = local.split('.').next().unwrap_or(local);
    class.eq_ignore_ascii_case("Server") || class.eq_ignore_ascii_case("Receiver")
}
