use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use scout_logging::scout_warn;

/// Results page text together with the encoding it was read as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub text: String,
    pub encoding: &'static str,
}

/// Decodes a results page: BOM first, then the Content-Type charset, then detection.
///
/// Malformed sequences become U+FFFD; the extractor only needs the structure.
pub fn decode_markup(bytes: &[u8], content_type: Option<&str>) -> Markup {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_label)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| detect(bytes));

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        scout_warn!("results page has malformed {} sequences", used.name());
    }
    Markup {
        text: text.into_owned(),
        encoding: used.name(),
    }
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn detect(bytes: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}
