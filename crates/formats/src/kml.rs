use roxmltree::Document;

use crate::placemark::Placemark;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KmlError {
    Malformed { detail: String },
}

impl std::fmt::Display for KmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KmlError::Malformed { detail } => write!(f, "malformed KML: {detail}"),
        }
    }
}

impl std::error::Error for KmlError {}

/// A parse-validated KML document.
///
/// `roxmltree` trees borrow the text they were parsed from, so the owned,
/// cacheable unit is the validated source. Placemark records are derived
/// fresh on every `placemarks()` call; a document that parsed once cannot
/// fail to parse again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmlDocument {
    source: String,
}

impl KmlDocument {
    pub fn parse(source: impl Into<String>) -> Result<Self, KmlError> {
        let source = source.into();
        Document::parse(&source).map_err(|e| KmlError::Malformed {
            detail: e.to_string(),
        })?;
        Ok(Self { source })
    }

    /// All `Placemark` nodes in document order, converted to records.
    pub fn placemarks(&self) -> Vec<Placemark> {
        let Ok(doc) = Document::parse(&self.source) else {
            return Vec::new();
        };
        doc.descendants()
            .filter(|n| n.tag_name().name() == "Placemark")
            .map(Placemark::from_node)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{KmlDocument, KmlError};

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>Library</name>
      <description><![CDATA[Main <b>library</b>.]]></description>
      <Point><coordinates>139.767306,35.681236,0</coordinates></Point>
    </Placemark>
    <Placemark>
      <name>Pond</name>
      <Point><coordinates>139.70,35.66</coordinates></Point>
    </Placemark>
  </Document>
</kml>"#;

    #[test]
    fn parses_and_lists_placemarks_in_document_order() {
        let doc = KmlDocument::parse(DOC).unwrap();
        let pms = doc.placemarks();
        assert_eq!(pms.len(), 2);
        assert_eq!(pms[0].name, "Library");
        assert_eq!(pms[1].name, "Pond");
    }

    #[test]
    fn derivation_is_repeatable() {
        let doc = KmlDocument::parse(DOC).unwrap();
        assert_eq!(doc.placemarks(), doc.placemarks());
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let err = KmlDocument::parse("<kml><Placemark></kml>").unwrap_err();
        assert!(matches!(err, KmlError::Malformed { .. }));
    }

    #[test]
    fn document_without_placemarks_yields_empty_list() {
        let doc = KmlDocument::parse("<kml><Document/></kml>").unwrap();
        assert!(doc.placemarks().is_empty());
    }
}
