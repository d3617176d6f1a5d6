//! Error types for parsing and conversion.

/// Failure to turn XML text into a `CheckstyleReport`.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("invalid Checkstyle XML, missing root element")]
    MissingRoot,

    #[error("invalid XML")]
    Xml {
        #[source]
        source: quick_xml::Error,
    },

    #[error("invalid XML: {reason}")]
    Malformed { reason: String },
}

impl From<quick_xml::Error> for ParseError {
    fn from(source: quick_xml::Error) -> Self {
        ParseError::Xml { source }
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ParseError::Xml {
            source: quick_xml::Error::from(err),
        }
    }
}

/// Failure of the full `xml -> SARIF JSON` conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to parse Checkstyle report")]
    Parse(#[from] ParseError),

    #[error("failed to serialize SARIF")]
    Serialize(#[from] serde_json::Error),
}
