use serde::Deserialize;
use thiserror::Error;

/// A latitude/longitude pair in degrees.
///
/// Values outside the conventional [-90, 90] / [-180, 180] ranges are
/// accepted; they rotate just as well, only the result may look odd.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct GeoCoord {
    pub latitude: f32,
    pub longitude: f32,
}

impl GeoCoord {
    pub fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<[f32; 2]> for GeoCoord {
    fn from([latitude, longitude]: [f32; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

/// One top-level element of a submitted coordinate payload, with its shape
/// resolved once at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateEntry {
    /// A single `[lat, lon]` pair, shown as an independent marker ray.
    Marker(GeoCoord),
    /// A `[[lat, lon], ...]` list, shown as one connected polyline.
    Polyline(Vec<GeoCoord>),
}

#[derive(Error, Debug)]
pub enum CoordinateParseError {
    #[error("submitted text is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("expected a list of [lat, lon] pairs or lists of such pairs: {0}")]
    Shape(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Polyline(Vec<[f32; 2]>),
    Marker([f32; 2]),
}

impl From<RawEntry> for CoordinateEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Marker(pair) => CoordinateEntry::Marker(pair.into()),
            RawEntry::Polyline(pairs) => {
                CoordinateEntry::Polyline(pairs.into_iter().map(GeoCoord::from).collect())
            }
        }
    }
}

/// Decodes a submitted text blob into coordinate entries.
///
/// The whole submission is rejected when the text is not JSON or when any
/// element is neither a `[lat, lon]` pair nor a list of such pairs; a partial
/// result is never produced.
pub fn parse_coordinates(text: &str) -> Result<Vec<CoordinateEntry>, CoordinateParseError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(CoordinateParseError::Json)?;
    let raw: Vec<RawEntry> = serde_json::from_value(value).map_err(CoordinateParseError::Shape)?;
    Ok(raw.into_iter().map(CoordinateEntry::from).collect())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn parse_flat_pairs_as_markers() {
        let entries = parse_coordinates("[[10, 20], [30, 40]]").unwrap();

        assert_eq!(
            entries,
            vec![
                CoordinateEntry::Marker(GeoCoord::new(10.0, 20.0)),
                CoordinateEntry::Marker(GeoCoord::new(30.0, 40.0)),
            ],
        );
    }

    #[test]
    fn parse_nested_pairs_as_polylines() {
        let entries =
            parse_coordinates("[[[10, 20], [11, 21]], [[30, 40], [31, 41]]]").unwrap();

        assert_eq!(
            entries,
            vec![
                CoordinateEntry::Polyline(vec![
                    GeoCoord::new(10.0, 20.0),
                    GeoCoord::new(11.0, 21.0),
                ]),
                CoordinateEntry::Polyline(vec![
                    GeoCoord::new(30.0, 40.0),
                    GeoCoord::new(31.0, 41.0),
                ]),
            ],
        );
    }

    #[test]
    fn shape_is_resolved_per_element() {
        let entries = parse_coordinates("[[10, 20], [[30, 40], [31, 41]]]").unwrap();

        assert_eq!(
            entries,
            vec![
                CoordinateEntry::Marker(GeoCoord::new(10.0, 20.0)),
                CoordinateEntry::Polyline(vec![
                    GeoCoord::new(30.0, 40.0),
                    GeoCoord::new(31.0, 41.0),
                ]),
            ],
        );
    }

    #[test]
    fn empty_payload_is_accepted() {
        assert_eq!(parse_coordinates("[]").unwrap(), vec![]);
    }

    #[test]
    fn out_of_range_degrees_are_accepted() {
        let entries = parse_coordinates("[[123.5, -361]]").unwrap();

        assert_eq!(
            entries,
            vec![CoordinateEntry::Marker(GeoCoord::new(123.5, -361.0))],
        );
    }

    #[test]
    fn malformed_text_is_a_json_error() {
        assert!(matches!(
            parse_coordinates("not json"),
            Err(CoordinateParseError::Json(_)),
        ));
    }

    #[rstest]
    #[case::bare_number("42")]
    #[case::non_numeric_pair(r#"[["a", "b"]]"#)]
    #[case::short_pair("[[10]]")]
    #[case::long_pair("[[10, 20, 30]]")]
    #[case::too_deep("[[[[10, 20]]]]")]
    fn malformed_shape_rejects_whole_submission(#[case] text: &str) {
        assert!(matches!(
            parse_coordinates(text),
            Err(CoordinateParseError::Shape(_)),
        ));
    }
}
