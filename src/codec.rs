//! Helpers for encoding/decoding the flash cookie payload format.
//!
//! A payload is a run of records, each `MARKER key SEPARATOR value MARKER`, with nothing
//! between records. The whole run is percent-encoded to make it a valid cookie value.
//!
//! Keys must not contain [`SEPARATOR`] and values must not contain [`MARKER`]. This is not
//! checked: a value containing the marker ends its record early, and whatever follows it
//! up to the next marker is dropped or read as part of the next key. Colons, unicode and
//! anything else are fine inside values.
//!
//! Note: the format has no version byte. It is an implementation detail and may evolve;
//! flash cookies only live for one redirect.

use std::borrow::Cow;

use crate::{FlashData, FlashPayload};

/// Starts and ends every record.
pub const MARKER: char = '\0';

/// Splits a record's key from its value.
pub const SEPARATOR: char = ':';

/// Encode a payload into a cookie value. The empty payload encodes to `""`.
pub fn encode(payload: &FlashPayload) -> String {
    let mut raw = String::new();
    for (key, value) in payload {
        raw.push(MARKER);
        raw.push_str(key);
        raw.push(SEPARATOR);
        raw.push_str(&value.to_string());
        raw.push(MARKER);
    }

    urlencoding::encode(&raw).into_owned()
}

/// Decode a percent-encoded cookie value, as produced by [`encode`], into the data it
/// carries.
///
/// This never fails: empty, foreign or malformed input yields an empty [`FlashData`]. A
/// single malformed `%` escape anywhere rejects the whole value.
pub fn decode(value: &str) -> FlashData {
    if value.is_empty() {
        return FlashData::default();
    }

    if has_malformed_escape(value) {
        tracing::debug!("flash cookie has a malformed percent escape");
        return FlashData::default();
    }

    let value: Cow<'_, str> = if value.contains('+') {
        value.replace('+', " ").into()
    } else {
        value.into()
    };

    match urlencoding::decode(&value) {
        Ok(raw) => decode_unescaped(&raw),
        Err(err) => {
            tracing::debug!(err = %err, "flash cookie is not valid utf-8 once unescaped");
            FlashData::default()
        }
    }
}

/// Decode a value whose percent-encoding was already removed, e.g. by a cookie jar.
///
/// Records are matched leftmost and without overlap; later duplicate keys overwrite earlier
/// ones. A key runs from a marker to the next separator, markers included.
pub fn decode_unescaped(raw: &str) -> FlashData {
    let mut data = FlashData::default();
    let mut rest = raw;

    while let Some(marker) = rest.find(MARKER) {
        let record = &rest[marker + MARKER.len_utf8()..];
        let Some(separator) = record.find(SEPARATOR) else {
            break;
        };
        let (key, value) = (&record[..separator], &record[separator + SEPARATOR.len_utf8()..]);
        let Some(end) = value.find(MARKER) else {
            break;
        };

        data.insert(key, &value[..end]);
        rest = &value[end + MARKER.len_utf8()..];
    }

    data
}

fn has_malformed_escape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'%')
        .any(|(i, _)| {
            !matches!(
                bytes.get(i + 1..i + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
        })
}
