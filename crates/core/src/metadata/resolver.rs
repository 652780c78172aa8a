//! Fallback-chain resolution from a tag mapping to track metadata.

use crate::prober::TagMap;

use super::types::TrackMetadata;

/// Candidate keys per field, tried in order. Vorbis-style uppercase spellings
/// first, then the TitleCase and lowercase variants seen in ID3-sourced tags.
const ARTIST_KEYS: &[&str] = &["ARTIST", "Artist", "artist"];
const ALBUM_KEYS: &[&str] = &["ALBUM", "Album", "album"];
const TITLE_KEYS: &[&str] = &["TITLE", "Title", "title"];
const YEAR_KEYS: &[&str] = &["DATE", "Date", "date", "YEAR", "Year", "year"];
const TRACK_KEYS: &[&str] = &[
    "TRACKNUMBER",
    "Tracknumber",
    "tracknumber",
    "TRACK",
    "Track",
    "track",
];
const DISC_KEYS: &[&str] = &[
    "DISCNUMBER",
    "Discnumber",
    "discnumber",
    "DISC",
    "Disc",
    "disc",
];

const DEFAULT_ARTIST: &str = "Unknown Artist";
const DEFAULT_ALBUM: &str = "Unknown Album";
const DEFAULT_TITLE: &str = "Unknown Title";
const DEFAULT_YEAR: &str = "0000";
const DEFAULT_NUMBER: &str = "1";

/// Resolves a tag mapping into track metadata.
///
/// Each field is resolved independently: the first non-empty value along its
/// key chain wins, otherwise the fixed default applies.
pub fn resolve(tags: &TagMap) -> TrackMetadata {
    TrackMetadata {
        artist: text_field(tags, ARTIST_KEYS, DEFAULT_ARTIST),
        album: text_field(tags, ALBUM_KEYS, DEFAULT_ALBUM),
        title: text_field(tags, TITLE_KEYS, DEFAULT_TITLE),
        year: text_field(tags, YEAR_KEYS, DEFAULT_YEAR),
        track: number_field(tags, TRACK_KEYS),
        disc: number_field(tags, DISC_KEYS),
    }
}

fn text_field(tags: &TagMap, keys: &[&str], default: &str) -> String {
    tags.first_non_empty(keys)
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| default.to_string())
}

fn number_field(tags: &TagMap, keys: &[&str]) -> String {
    normalize_number(tags.first_non_empty(keys).unwrap_or(DEFAULT_NUMBER))
}

/// Normalizes a raw track/disc value.
///
/// Keeps only the numerator of an `N/total` form, forces anything that is not
/// a nonnegative integer to "1", and zero-pads single digits to width 2.
/// Values of two or more digits are left as tagged.
fn normalize_number(raw: &str) -> String {
    let numerator = raw.split('/').next().unwrap_or("").trim();
    let value = if !numerator.is_empty() && numerator.chars().all(|c| c.is_ascii_digit()) {
        numerator
    } else {
        DEFAULT_NUMBER
    };
    if value.len() == 1 {
        format!("0{}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_tags_yield_defaults() {
        let metadata = resolve(&TagMap::new());
        assert_eq!(metadata.artist, "Unknown Artist");
        assert_eq!(metadata.album, "Unknown Album");
        assert_eq!(metadata.title, "Unknown Title");
        assert_eq!(metadata.year, "0000");
        assert_eq!(metadata.track, "01");
        assert_eq!(metadata.disc, "01");
    }

    #[test]
    fn test_uppercase_tags_resolve() {
        let metadata = resolve(&tags(&[
            ("ARTIST", "Foo"),
            ("ALBUM", "Bar"),
            ("TITLE", "Song"),
            ("DATE", "2020"),
            ("TRACKNUMBER", "1/10"),
        ]));
        assert_eq!(metadata.artist, "Foo");
        assert_eq!(metadata.album, "Bar");
        assert_eq!(metadata.title, "Song");
        assert_eq!(metadata.year, "2020");
        assert_eq!(metadata.track, "01");
        assert_eq!(metadata.disc, "01");
    }

    #[test]
    fn test_case_variants_are_tried_in_order() {
        let metadata = resolve(&tags(&[("artist", "lower"), ("Artist", "title")]));
        assert_eq!(metadata.artist, "title");

        let metadata = resolve(&tags(&[("title", "only lower")]));
        assert_eq!(metadata.title, "only lower");
    }

    #[test]
    fn test_year_falls_back_to_year_keys() {
        let metadata = resolve(&tags(&[("YEAR", "1973")]));
        assert_eq!(metadata.year, "1973");
    }

    #[test]
    fn test_blank_value_falls_through_to_default() {
        let metadata = resolve(&tags(&[("ARTIST", "  ")]));
        assert_eq!(metadata.artist, "Unknown Artist");
    }

    #[test]
    fn test_track_keeps_numerator_of_fraction() {
        assert_eq!(normalize_number("3/12"), "03");
        assert_eq!(normalize_number("11/12"), "11");
    }

    #[test]
    fn test_track_non_numeric_forced_to_one() {
        assert_eq!(normalize_number("A"), "01");
        assert_eq!(normalize_number("-2"), "01");
        assert_eq!(normalize_number(""), "01");
        assert_eq!(normalize_number("3.5"), "01");
    }

    #[test]
    fn test_track_zero_padding() {
        assert_eq!(normalize_number("7"), "07");
        assert_eq!(normalize_number("0"), "00");
        assert_eq!(normalize_number("10"), "10");
        assert_eq!(normalize_number("007"), "007");
        assert_eq!(normalize_number("112"), "112");
    }

    #[test]
    fn test_track_from_plain_track_key() {
        let metadata = resolve(&tags(&[("track", "5")]));
        assert_eq!(metadata.track, "05");
    }

    #[test]
    fn test_disc_resolution() {
        let metadata = resolve(&tags(&[("DISCNUMBER", "2/2")]));
        assert_eq!(metadata.disc, "02");
    }

    #[test]
    fn test_values_are_trimmed() {
        let metadata = resolve(&tags(&[("TITLE", "  Song  "), ("TRACKNUMBER", " 4 ")]));
        assert_eq!(metadata.title, "Song");
        assert_eq!(metadata.track, "04");
    }
}
