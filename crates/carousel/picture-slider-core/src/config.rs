//! Carousel options: a fixed schema, its defaults, and explicit merge rules.

use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, Result};

/// Named animation speeds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedDuration {
    Short,
    Normal,
    Long,
}

impl NamedDuration {
    #[inline]
    pub fn millis(self) -> f32 {
        match self {
            NamedDuration::Short => 250.0,
            NamedDuration::Normal => 500.0,
            NamedDuration::Long => 1000.0,
        }
    }
}

/// Either a named speed (`"short"`) or a number of milliseconds (`200`).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationSpec {
    Named(NamedDuration),
    Millis(f32),
}

impl DurationSpec {
    #[inline]
    pub fn millis(self) -> f32 {
        match self {
            DurationSpec::Named(n) => n.millis(),
            DurationSpec::Millis(ms) => ms,
        }
    }

    fn validate(self, field: &'static str) -> Result<()> {
        match self {
            DurationSpec::Named(_) => Ok(()),
            DurationSpec::Millis(ms) if ms.is_finite() && ms >= 0.0 => Ok(()),
            DurationSpec::Millis(ms) => Err(CarouselError::invalid(
                field,
                format!("duration must be a non-negative number of milliseconds, got {ms}"),
            )),
        }
    }
}

impl Default for DurationSpec {
    fn default() -> Self {
        DurationSpec::Named(NamedDuration::Short)
    }
}

/// Appearance of a fading overlay panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    pub opacity: f32,
    pub duration: DurationSpec,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            opacity: 0.8,
            duration: DurationSpec::default(),
        }
    }
}

/// Caption text phase timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub duration: DurationSpec,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            duration: DurationSpec::Millis(200.0),
        }
    }
}

/// Resolved carousel configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselOptions {
    /// Size variant tag for the arrows; `None` omits the class modifier.
    pub arrows: Option<String>,
    /// Strip slide duration.
    pub duration: DurationSpec,
    /// Default centering for slides without an explicit override.
    pub center: bool,
    /// Hover-revealed control panel.
    pub controls: PanelOptions,
    /// Caption panel base opacity. Its duration is kept for hosts that style the panel.
    pub caption: PanelOptions,
    /// Caption collapse/expand phases.
    pub text: TextOptions,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            arrows: Some("medium".to_string()),
            duration: DurationSpec::default(),
            center: true,
            controls: PanelOptions::default(),
            caption: PanelOptions::default(),
            text: TextOptions::default(),
        }
    }
}

/// `arrows` accepts a size tag or a boolean.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArrowsSetting {
    Variant(String),
    Enabled(bool),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelPatch {
    pub opacity: Option<f32>,
    pub duration: Option<DurationSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPatch {
    pub duration: Option<DurationSpec>,
}

/// Caller-supplied overrides; every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsPatch {
    pub arrows: Option<ArrowsSetting>,
    pub duration: Option<DurationSpec>,
    pub center: Option<bool>,
    pub controls: Option<PanelPatch>,
    pub caption: Option<PanelPatch>,
    pub text: Option<TextPatch>,
}

impl PanelOptions {
    fn merge(&mut self, patch: PanelPatch) {
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
    }

    fn validate(&self, opacity_field: &'static str, duration_field: &'static str) -> Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(CarouselError::invalid(
                opacity_field,
                format!("opacity must be within [0, 1], got {}", self.opacity),
            ));
        }
        self.duration.validate(duration_field)
    }
}

impl CarouselOptions {
    /// Apply `patch` on top of `self`.
    ///
    /// Scalars replace. Nested groups merge field by field. `arrows: false`
    /// clears the tag and `arrows: true` restores the default tag when none is set.
    pub fn merged(mut self, patch: OptionsPatch) -> Self {
        match patch.arrows {
            Some(ArrowsSetting::Variant(tag)) => self.arrows = Some(tag),
            Some(ArrowsSetting::Enabled(false)) => self.arrows = None,
            Some(ArrowsSetting::Enabled(true)) => {
                if self.arrows.is_none() {
                    self.arrows = CarouselOptions::default().arrows;
                }
            }
            None => {}
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(center) = patch.center {
            self.center = center;
        }
        if let Some(controls) = patch.controls {
            self.controls.merge(controls);
        }
        if let Some(caption) = patch.caption {
            self.caption.merge(caption);
        }
        if let Some(text) = patch.text.and_then(|t| t.duration) {
            self.text.duration = text;
        }
        self
    }

    /// Parse an [`OptionsPatch`] and merge it onto the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let patch: OptionsPatch = serde_json::from_str(json).map_err(CarouselError::OptionsJson)?;
        let opts = CarouselOptions::default().merged(patch);
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        self.duration.validate("duration")?;
        self.controls.validate("controls.opacity", "controls.duration")?;
        self.caption.validate("caption.opacity", "caption.duration")?;
        self.text.duration.validate("text.duration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let o = CarouselOptions::default();
        assert_eq!(o.arrows.as_deref(), Some("medium"));
        assert_eq!(o.duration.millis(), 250.0);
        assert!(o.center);
        assert_eq!(o.controls.opacity, 0.8);
        assert_eq!(o.caption.duration.millis(), 250.0);
        assert_eq!(o.text.duration.millis(), 200.0);
    }

    #[test]
    fn nested_groups_merge_field_by_field() {
        let o = CarouselOptions::from_json(r#"{ "controls": { "opacity": 0.5 } }"#).unwrap();
        assert_eq!(o.controls.opacity, 0.5);
        assert_eq!(o.controls.duration, DurationSpec::Named(NamedDuration::Short));
        assert_eq!(o.caption, PanelOptions::default());
    }

    #[test]
    fn durations_accept_names_and_numbers() {
        let o = CarouselOptions::from_json(r#"{ "duration": "long", "text": { "duration": 75 } }"#)
            .unwrap();
        assert_eq!(o.duration.millis(), 1000.0);
        assert_eq!(o.text.duration.millis(), 75.0);
    }

    #[test]
    fn arrows_false_clears_tag() {
        let o = CarouselOptions::from_json(r#"{ "arrows": false }"#).unwrap();
        assert_eq!(o.arrows, None);
        let o = CarouselOptions::from_json(r#"{ "arrows": "large" }"#).unwrap();
        assert_eq!(o.arrows.as_deref(), Some("large"));
        let o = o.merged(OptionsPatch {
            arrows: Some(ArrowsSetting::Enabled(true)),
            ..Default::default()
        });
        assert_eq!(o.arrows.as_deref(), Some("large"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = CarouselOptions::from_json(r#"{ "caption": { "opacity": 1.5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            CarouselError::InvalidOption {
                field: "caption.opacity",
                ..
            }
        ));
        let err = CarouselOptions::from_json(r#"{ "duration": -5 }"#).unwrap_err();
        assert!(matches!(err, CarouselError::InvalidOption { field: "duration", .. }));
        let err = CarouselOptions::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CarouselError::OptionsJson(_)));
    }
}
