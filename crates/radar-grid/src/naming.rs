//! Source-filename conventions and derived output names.
//!
//! Source mosaics follow a fixed-width convention: a 6-character product
//! prefix followed by a compact timestamp, e.g. `nexrad2018-0101T090000.png`.
//! Everything that slices file names goes through the named helpers here.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::{QuickplotError, QuickplotResult};

/// Length of the product prefix on source file names.
pub const SOURCE_PREFIX_LEN: usize = 6;

/// Trailing seconds digits dropped when deriving a plot title from a stem.
const TITLE_TRIM_LEN: usize = 3;

/// Timestamp layout embedded in source stems after the product prefix.
pub const STEM_TIME_FORMAT: &str = "%Y-%m%dT%H%M%S";

/// Plot title for a frame: the stem with the product prefix and the
/// seconds digits removed. Stems outside the convention are used whole.
pub fn frame_title(stem: &str) -> &str {
    stem.get(SOURCE_PREFIX_LEN..stem.len().saturating_sub(TITLE_TRIM_LEN))
        .filter(|s| !s.is_empty())
        .unwrap_or(stem)
}

/// Map-mode output name: the projection name replaces the product prefix.
pub fn map_output_name(projection: &str, source_name: &str) -> String {
    let suffix = source_name.get(SOURCE_PREFIX_LEN..).unwrap_or(source_name);
    format!("{projection}{suffix}")
}

/// Keogram output name, embedding the cut axis, its value as given on the
/// command line, and the first and last source stems.
pub fn keogram_output_name(
    axis: &str,
    value_label: &str,
    first_stem: &str,
    last_stem: &str,
) -> String {
    format!("keo-{axis}{value_label}-{first_stem}-{last_stem}.png")
}

/// Parse the timestamp carried after the product prefix of a source stem.
pub fn parse_stem_timestamp(stem: &str) -> QuickplotResult<DateTime<Utc>> {
    let ts = stem
        .get(SOURCE_PREFIX_LEN..)
        .ok_or_else(|| QuickplotError::BadStemTimestamp(stem.to_string()))?;

    let naive = NaiveDateTime::parse_from_str(ts, STEM_TIME_FORMAT)
        .map_err(|_| QuickplotError::BadStemTimestamp(stem.to_string()))?;

    Ok(Utc.from_utc_datetime(&naive))
}

/// Shell-style file name matching supporting `*` (any run) and `?` (any
/// single byte). Used by the batch driver's input resolution.
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    fn matches(n: &[u8], p: &[u8]) -> bool {
        match p.first() {
            None => n.is_empty(),
            Some(b'*') => matches(n, &p[1..]) || (!n.is_empty() && matches(&n[1..], p)),
            Some(b'?') => !n.is_empty() && matches(&n[1..], &p[1..]),
            Some(&c) => n.first() == Some(&c) && matches(&n[1..], &p[1..]),
        }
    }

    matches(name.as_bytes(), pattern.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_frame_title_trims_prefix_and_seconds() {
        assert_eq!(frame_title("nexrad2018-0101T090000"), "2018-0101T090");
    }

    #[test]
    fn test_frame_title_short_stem_used_whole() {
        assert_eq!(frame_title("short"), "short");
        assert_eq!(frame_title(""), "");
    }

    #[test]
    fn test_map_output_name_replaces_prefix() {
        // the suffix always starts at the 7th character of the source name
        assert_eq!(
            map_output_name("lambert", "nexrad2018-0101T090000.png"),
            "lambert2018-0101T090000.png"
        );
        assert_eq!(
            map_output_name("lambert", "map2018-0101T090000.ext"),
            "lambert8-0101T090000.ext"
        );
    }

    #[test]
    fn test_map_output_name_short_source() {
        assert_eq!(map_output_name("lambert", "x.png"), "lambertx.png");
    }

    #[test]
    fn test_keogram_output_name_order() {
        let name = keogram_output_name(
            "lat",
            "40.0",
            "map2018-0101T090000",
            "map2018-0101T091000",
        );
        assert_eq!(
            name,
            "keo-lat40.0-map2018-0101T090000-map2018-0101T091000.png"
        );
    }

    #[test]
    fn test_parse_stem_timestamp() {
        let t = parse_stem_timestamp("nexrad2018-0101T090500").unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.to_rfc3339(), "2018-01-01T09:05:00+00:00");
    }

    #[test]
    fn test_parse_stem_timestamp_rejects_garbage() {
        assert!(parse_stem_timestamp("bad").is_err());
        assert!(parse_stem_timestamp("nexradnotatime").is_err());
    }

    #[test]
    fn test_matches_pattern() {
        assert!(matches_pattern("map2018-0101T090000.png", "map*"));
        assert!(matches_pattern("map2018-0101T090000.png", "*.png"));
        assert!(matches_pattern("map2018-0101T090000.png", "map*T09?000*"));
        assert!(!matches_pattern("keo2018.png", "map*"));
        assert!(!matches_pattern("map.gif", "*.png"));
        assert!(matches_pattern("", "*"));
        assert!(!matches_pattern("", "?"));
    }
}
