//! Decoding for the HTML entities found in catalog descriptions.
//!
//! Catalog documents ship descriptions HTML-escaped. Only the entities that
//! actually occur in the data are decoded; anything else passes through
//! untouched.

/// Entities observed in the catalog documents, longest spelling first where a
/// prefix could otherwise shadow a longer entity.
const ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&apos;", "'"),
    ("&#x27;", "'"),
    ("&#x2F;", "/"),
    ("&#39;", "'"),
    ("&#47;", "/"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", " "),
    ("&quot;", "\""),
];

/// Decode the known HTML entities in `text`.
///
/// Single pass: replacements are never re-scanned, so `&amp;amp;` decodes to
/// the literal `&amp;`.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(rest.get(..pos).unwrap_or_default());
        let tail = rest.get(pos..).unwrap_or_default();

        if let Some((name, replacement)) = ENTITIES.iter().find(|(name, _)| tail.starts_with(name))
        {
            out.push_str(replacement);
            rest = tail.get(name.len()..).unwrap_or_default();
        } else {
            out.push('&');
            rest = tail.get(1..).unwrap_or_default();
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_catalog_description() {
        assert_eq!(
            decode_entities("T-Shirt &amp; Co&#x27;s &quot;Classic&quot;"),
            "T-Shirt & Co's \"Classic\""
        );
    }

    #[test]
    fn test_decodes_each_known_entity() {
        assert_eq!(decode_entities("&amp;"), "&");
        assert_eq!(decode_entities("&apos;"), "'");
        assert_eq!(decode_entities("&#x27;"), "'");
        assert_eq!(decode_entities("&#x2F;"), "/");
        assert_eq!(decode_entities("&#39;"), "'");
        assert_eq!(decode_entities("&#47;"), "/");
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_entities("a&nbsp;b"), "a b");
        assert_eq!(decode_entities("&quot;"), "\"");
    }

    #[test]
    fn test_unknown_entities_pass_through() {
        assert_eq!(decode_entities("&copy; 2018"), "&copy; 2018");
        assert_eq!(decode_entities("AT&T"), "AT&T");
    }

    #[test]
    fn test_no_double_decoding() {
        assert_eq!(decode_entities("&amp;amp;"), "&amp;");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_empty_and_plain_strings() {
        assert_eq!(decode_entities(""), "");
        assert_eq!(decode_entities("plain cotton tee"), "plain cotton tee");
    }

    #[test]
    fn test_trailing_ampersand() {
        assert_eq!(decode_entities("Tom &"), "Tom &");
    }
}
