//! TXT record value sanitizing.
//!
//! PowerDNS hands TXT content back exactly as it stores it: quoted, with
//! embedded quotes escaped. Values read from the API are routinely sent back
//! in the next update, so [`sanitize_txt`] must leave its own output alone
//! while still escaping anything it has not seen before.

const QUOTE: u8 = b'"';
const BACKSLASH: u8 = b'\\';

/// Wraps `input` in double quotes and escapes every embedded double quote
/// that isn't already escaped by an odd run of backslashes.
///
/// The result can be fed back in and comes out unchanged. Only `"` and the
/// backslashes directly in front of one are looked at; every other byte,
/// including non-ASCII, is copied as is.
pub fn sanitize_txt_bytes(input: &[u8]) -> Vec<u8> {
    let quoted = input.len() >= 2 && input[0] == QUOTE && input[input.len() - 1] == QUOTE;
    let contents = if quoted { &input[1..input.len() - 1] } else { input };

    let mut body = Vec::with_capacity(contents.len() + 8);
    let mut escaped = 0usize;
    let mut pos = 0;

    while pos < contents.len() {
        let Some(offset) = contents[pos..].iter().position(|&b| b == QUOTE) else {
            body.extend_from_slice(&contents[pos..]);
            break;
        };
        let at = pos + offset;
        body.extend_from_slice(&contents[pos..at]);

        // \" is escaped, \\" is not, \\\" is again
        if preceding_backslashes(contents, at) % 2 == 0 {
            body.push(BACKSLASH);
            escaped += 1;
        }
        body.push(QUOTE);
        pos = at + 1;
    }

    // Something like `"foo" and other stuff "bar"` should keep both quoted
    // spans as content rather than end up as `"foo\" and other stuff \"bar"`.
    let rewrap = quoted && escaped > 0 && escaped % 2 == 0;

    let mut out = Vec::with_capacity(body.len() + 6);
    out.push(QUOTE);
    if rewrap {
        out.extend_from_slice(&[BACKSLASH, QUOTE]);
        out.extend_from_slice(&body);
        out.extend_from_slice(&[BACKSLASH, QUOTE]);
    } else {
        out.extend_from_slice(&body);
    }
    out.push(QUOTE);
    out
}

/// String flavour of [`sanitize_txt_bytes`].
pub fn sanitize_txt(s: &str) -> String {
    // Only ASCII bytes are ever inserted, so valid UTF-8 stays valid.
    String::from_utf8_lossy(&sanitize_txt_bytes(s.as_bytes())).into_owned()
}

fn preceding_backslashes(contents: &[u8], at: usize) -> usize {
    contents[..at]
        .iter()
        .rev()
        .take_while(|&&b| b == BACKSLASH)
        .count()
}
