//! Error types for the picture slider.
//!
//! Runtime navigation never fails; these only surface where options or slide
//! descriptors enter the engine.

/// Errors raised while ingesting configuration or slide data.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CarouselError {
    /// Options JSON did not match the schema.
    #[error("Invalid options JSON: {0}")]
    OptionsJson(#[source] serde_json::Error),

    /// Slide list JSON did not match the schema.
    #[error("Invalid slides JSON: {0}")]
    SlidesJson(#[source] serde_json::Error),

    /// An option parsed but carries an unusable value.
    #[error("Invalid option {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },
}

impl CarouselError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            field,
            reason: reason.into(),
        }
    }

    /// Category label used when reporting errors to hosts.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::OptionsJson(_) | Self::SlidesJson(_) => "serialization",
            Self::InvalidOption { .. } => "validation",
        }
    }
}

pub type Result<T> = std::result::Result<T, CarouselError>;
