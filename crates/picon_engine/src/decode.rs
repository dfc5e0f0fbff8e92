use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use picon_logging::picon_debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode listing-page bytes into UTF-8 using: BOM -> Content-Type charset -> chardetng.
///
/// Never fails; undecodable bytes are replaced so extraction can carry on.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    let encoding = detect_encoding(bytes, content_type);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        picon_debug!("page bytes are not valid {}; replaced bad sequences", used.name());
    }
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}

fn detect_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    if let Some(enc) = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return enc;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim_matches([' ', '"', '\''].as_ref()).to_string())
        })
        .next()
}
