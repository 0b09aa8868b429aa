//! Pure string operations over spreadsheet URLs. Malformed input degrades to
//! `None`; nothing here touches the network.

use {once_cell::sync::Lazy, regex::Regex};

static SPREADSHEET_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("regex"));

/// Extracts the spreadsheet identifier from the `/d/<id>` path segment of a
/// spreadsheet URL.
pub fn spreadsheet_id(url: &str) -> Option<String> {
    SPREADSHEET_ID_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Returns the first value of the named query parameter, percent-decoded, or
/// `None` when the parameter or the query section is absent.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, after) = url.split_once('?')?;
    let query = after.split('#').next().unwrap_or(after);
    for pair in query.split('&') {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };
        if key == name {
            return Some(percent_decode(value));
        }
    }
    None
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi * 16 + lo);
                        i += 3;
                    }
                    // Stray '%' passes through untouched.
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}
