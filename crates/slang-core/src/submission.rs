//! User-submitted slang candidates.  Validated and logged, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_SUBMITTER: &str = "Anonymous";

pub const THANK_YOU: &str = "Thank you! Your slang submission has been received. \
We'll review it and add it to the dictionary soon.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("{} is required", .0.label())]
    Missing(SubmissionField),
}

/// Form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionField {
    Word,
    Language,
    Category,
    Meaning,
    ExampleNative,
    ExampleTranslation,
    AudioFile,
    Submitter,
    Email,
    Notes,
}

impl SubmissionField {
    pub const ALL: [SubmissionField; 10] = [
        Self::Word,
        Self::Language,
        Self::Category,
        Self::Meaning,
        Self::ExampleNative,
        Self::ExampleTranslation,
        Self::AudioFile,
        Self::Submitter,
        Self::Email,
        Self::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Word => "Slang word",
            Self::Language => "Language",
            Self::Category => "Category",
            Self::Meaning => "Meaning",
            Self::ExampleNative => "Example (native)",
            Self::ExampleTranslation => "Example (English)",
            Self::AudioFile => "Audio file",
            Self::Submitter => "Your name",
            Self::Email => "Email",
            Self::Notes => "Notes",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Self::Word | Self::Language | Self::Category | Self::Meaning
        )
    }
}

/// Raw form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub word: String,
    pub language: String,
    pub category: String,
    pub meaning: String,
    pub example_native: String,
    pub example_translation: String,
    pub audio_file: String,
    pub submitter: String,
    pub email: String,
    pub notes: String,
}

impl SubmissionDraft {
    pub fn field(&self, field: SubmissionField) -> &str {
        match field {
            SubmissionField::Word => &self.word,
            SubmissionField::Language => &self.language,
            SubmissionField::Category => &self.category,
            SubmissionField::Meaning => &self.meaning,
            SubmissionField::ExampleNative => &self.example_native,
            SubmissionField::ExampleTranslation => &self.example_translation,
            SubmissionField::AudioFile => &self.audio_file,
            SubmissionField::Submitter => &self.submitter,
            SubmissionField::Email => &self.email,
            SubmissionField::Notes => &self.notes,
        }
    }

    pub fn set_field(&mut self, field: SubmissionField, value: String) {
        let slot = match field {
            SubmissionField::Word => &mut self.word,
            SubmissionField::Language => &mut self.language,
            SubmissionField::Category => &mut self.category,
            SubmissionField::Meaning => &mut self.meaning,
            SubmissionField::ExampleNative => &mut self.example_native,
            SubmissionField::ExampleTranslation => &mut self.example_translation,
            SubmissionField::AudioFile => &mut self.audio_file,
            SubmissionField::Submitter => &mut self.submitter,
            SubmissionField::Email => &mut self.email,
            SubmissionField::Notes => &mut self.notes,
        };
        *slot = value;
    }

    pub fn validate(&self) -> Result<Submission, SubmissionError> {
        self.validate_at(Utc::now())
    }

    /// Trim every field and check the required ones, stamping `now`.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<Submission, SubmissionError> {
        if let Some(missing) = SubmissionField::ALL
            .into_iter()
            .find(|f| f.is_required() && self.field(*f).trim().is_empty())
        {
            return Err(SubmissionError::Missing(missing));
        }

        let text = |s: &str| s.trim().to_string();
        let submitter = match self.submitter.trim() {
            "" => DEFAULT_SUBMITTER.to_string(),
            name => name.to_string(),
        };
        let audio_file = Some(self.audio_file.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Submission {
            word: text(&self.word),
            language: text(&self.language),
            category: text(&self.category),
            meaning: text(&self.meaning),
            example_native: text(&self.example_native),
            example_translation: text(&self.example_translation),
            submitter,
            email: text(&self.email),
            notes: text(&self.notes),
            audio_file,
            submitted_at: now,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub word: String,
    pub language: String,
    pub category: String,
    pub meaning: String,
    pub example_native: String,
    pub example_translation: String,
    pub submitter: String,
    pub email: String,
    pub notes: String,
    pub audio_file: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Log the submission and return the notice to show the user.
pub fn record(submission: &Submission) -> &'static str {
    match serde_json::to_string(submission) {
        Ok(json) => info!("Slang submission: {}", json),
        Err(e) => info!("Slang submission: {:?} (not serializable: {})", submission, e),
    }
    THANK_YOU
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled() -> SubmissionDraft {
        SubmissionDraft {
            word: "  Shani ".into(),
            language: "Bemba".into(),
            category: "Greeting".into(),
            meaning: "What's up".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_trims_and_defaults_submitter() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let sub = filled().validate_at(now).unwrap();
        assert_eq!(sub.word, "Shani");
        assert_eq!(sub.submitter, "Anonymous");
        assert_eq!(sub.audio_file, None);
        assert_eq!(sub.submitted_at, now);
    }

    #[test]
    fn test_missing_required_field() {
        let mut draft = filled();
        draft.meaning = "   ".into();
        let err = draft.validate().unwrap_err();
        assert_eq!(err, SubmissionError::Missing(SubmissionField::Meaning));
        assert_eq!(err.to_string(), "Meaning is required");

        assert_eq!(
            SubmissionDraft::default().validate().unwrap_err(),
            SubmissionError::Missing(SubmissionField::Word)
        );
    }

    #[test]
    fn test_optional_fields_pass_through() {
        let mut draft = filled();
        draft.set_field(SubmissionField::Submitter, "Mwila".into());
        draft.set_field(SubmissionField::AudioFile, "shani.mp3".into());
        assert_eq!(draft.field(SubmissionField::Submitter), "Mwila");

        let sub = draft.validate().unwrap();
        assert_eq!(sub.submitter, "Mwila");
        assert_eq!(sub.audio_file.as_deref(), Some("shani.mp3"));
    }

    #[test]
    fn test_record_serializes_timestamp_as_rfc3339() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let sub = filled().validate_at(now).unwrap();
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["submitted_at"], "2024-03-01T12:00:00Z");
        assert!(record(&sub).starts_with("Thank you!"));
    }
}
