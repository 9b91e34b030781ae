//! Geo distance unit conversion.

use serde::{Deserialize, Serialize};

use crate::document::FieldValue;
use crate::response::Doc;

/// Field holding the distance computed by a geo query, in miles.
pub const DISTANCE_FIELD: &str = "geo_distance";

const KILOMETERS_PER_MILE: f64 = 1.609344;

/// Unit in which distances are exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoUnit {
    /// Miles (the unit the server reports).
    Miles,
    /// Kilometers.
    Kilometers,
}

impl GeoUnit {
    /// Divisor turning a distance in miles into this unit.
    pub fn ratio(&self) -> f64 {
        match self {
            GeoUnit::Miles => 1.0,
            GeoUnit::Kilometers => 1.0 / KILOMETERS_PER_MILE,
        }
    }
}

/// Convert the distance field of every document to `unit`.
///
/// Documents without a numeric distance are left alone.
pub fn convert_distances(docs: &mut [Doc], unit: GeoUnit) {
    let ratio = unit.ratio();
    if ratio == 1.0 {
        return;
    }

    for doc in docs {
        if let Some(distance) = doc.field(DISTANCE_FIELD).and_then(|v| v.as_float()) {
            doc.set_field(DISTANCE_FIELD, FieldValue::Float(distance / ratio));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_convert_to_kilometers() {
        let mut docs = vec![
            Doc::Document(Document::builder().add_float(DISTANCE_FIELD, 10.0).build()),
            Doc::Document(Document::builder().add_text("id", "no-distance").build()),
        ];

        convert_distances(&mut docs, GeoUnit::Kilometers);

        let km = docs[0].field(DISTANCE_FIELD).and_then(|v| v.as_float()).unwrap();
        assert!((km - 16.09344).abs() < 1e-9);
        assert!(docs[1].field(DISTANCE_FIELD).is_none());
    }

    #[test]
    fn test_miles_is_identity() {
        let mut docs = vec![Doc::Document(
            Document::builder().add_integer(DISTANCE_FIELD, 3).build(),
        )];

        convert_distances(&mut docs, GeoUnit::Miles);

        assert_eq!(docs[0].field(DISTANCE_FIELD), Some(FieldValue::Integer(3)));
    }
}
