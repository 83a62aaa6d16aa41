/// Whitelisted transcription parameters forwarded to the speech API's
/// prepare call. Each field is independently defaulted from configuration
/// and overridable per request; blank values are treated as unset and
/// omitted from the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptionOptions {
    pub language: Option<String>,
    pub speaker_number: Option<String>,
    pub has_separate: Option<String>,
    pub hot_word: Option<String>,
    pub pd: Option<String>,
}

impl TranscriptionOptions {
    /// Sets a field by its wire name. Unknown keys are ignored; returns
    /// whether the key was recognized.
    pub fn apply(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "language" => &mut self.language,
            "speaker_number" => &mut self.speaker_number,
            "has_separate" => &mut self.has_separate,
            "hot_word" => &mut self.hot_word,
            "pd" => &mut self.pd,
            _ => return false,
        };
        let trimmed = value.trim();
        *slot = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        true
    }

    /// Per-field overlay: any field set on `self` wins, otherwise the
    /// default is used.
    pub fn merged_over(&self, defaults: &Self) -> Self {
        Self {
            language: self.language.clone().or_else(|| defaults.language.clone()),
            speaker_number: self
                .speaker_number
                .clone()
                .or_else(|| defaults.speaker_number.clone()),
            has_separate: self
                .has_separate
                .clone()
                .or_else(|| defaults.has_separate.clone()),
            hot_word: self.hot_word.clone().or_else(|| defaults.hot_word.clone()),
            pd: self.pd.clone().or_else(|| defaults.pd.clone()),
        }
    }

    /// Form entries for the set, non-blank fields only.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("language", &self.language),
            ("speaker_number", &self.speaker_number),
            ("has_separate", &self.has_separate),
            ("hot_word", &self.hot_word),
            ("pd", &self.pd),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }
}
