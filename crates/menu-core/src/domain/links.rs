//! URL helpers for custom item links

use menu_shared::UrlParameters;
use url::form_urlencoded;

use super::options::parameter_string;

/// Merge `parameters` into the query string of `url`.
///
/// Existing pairs keep their position; a parameter with the same name replaces
/// the existing value, new parameters are appended. `null` values are skipped.
/// A `#fragment` stays at the end.
pub fn append_query(url: &str, parameters: &UrlParameters) -> String {
    if parameters.values().all(|value| value.is_null()) {
        return url.to_string();
    }

    let (without_fragment, fragment) = match url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (url, None),
    };
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, query),
        None => (without_fragment, ""),
    };

    let mut pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    for (name, value) in parameters {
        let Some(value) = parameter_string(value) else {
            continue;
        };
        match pairs.iter_mut().find(|(existing, _)| existing == name) {
            Some(pair) => pair.1 = value,
            None => pairs.push((name.clone(), value)),
        }
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish();

    let mut merged = String::with_capacity(url.len() + query.len() + 1);
    merged.push_str(path);
    if !query.is_empty() {
        merged.push('?');
        merged.push_str(&query);
    }
    if let Some(fragment) = fragment {
        merged.push('#');
        merged.push_str(fragment);
    }
    merged
}

/// Escape text for safe inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> UrlParameters {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_append_to_bare_url() {
        let url = append_query("https://example.com/docs", &params(json!({"lang": "en"})));
        assert_eq!(url, "https://example.com/docs?lang=en");
    }

    #[test]
    fn test_existing_pair_is_replaced_in_place() {
        let url = append_query("/search?q=rust&page=1#top", &params(json!({"page": 2, "sort": "asc"})));
        assert_eq!(url, "/search?q=rust&page=2&sort=asc#top");
    }

    #[test]
    fn test_null_parameters_leave_url_untouched() {
        let url = append_query("/search?q=a+b", &params(json!({"page": null})));
        assert_eq!(url, "/search?q=a+b");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & \"Jerry\" <3"), "Tom &amp; &quot;Jerry&quot; &lt;3");
    }
}
