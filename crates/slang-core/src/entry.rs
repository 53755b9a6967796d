use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// One slang term.  Every field defaults when absent, null or not a string,
/// so incomplete records from the data source still load and render (empty
/// text).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub word: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub language: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub meaning: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub example_native: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub example_translation: String,
    /// Audio clip filename, resolved against the configured audio base.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub audio: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Identity of an entry: `(word, language, category)`.
///
/// Two entries with the same triple are the same slang as far as favorites
/// and lookups are concerned, even if their other fields differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId {
    pub word: String,
    pub language: String,
    pub category: String,
}

impl Entry {
    pub fn id(&self) -> EntryId {
        EntryId {
            word: self.word.clone(),
            language: self.language.clone(),
            category: self.category.clone(),
        }
    }

    /// Identity comparison without allocating an `EntryId`.
    pub fn same_identity(&self, other: &Entry) -> bool {
        self.word == other.word
            && self.language == other.language
            && self.category == other.category
    }

    pub fn has_id(&self, id: &EntryId) -> bool {
        self.word == id.word && self.language == id.language && self.category == id.category
    }

    /// The audio filename, if the entry references a non-blank one.
    pub fn audio_file(&self) -> Option<&str> {
        self.audio.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.word, self.language, self.category)
    }
}

fn sample(
    word: &str,
    language: &str,
    category: &str,
    meaning: &str,
    example_native: &str,
    example_translation: &str,
    audio: &str,
) -> Entry {
    Entry {
        word: word.to_string(),
        language: language.to_string(),
        category: category.to_string(),
        meaning: meaning.to_string(),
        example_native: example_native.to_string(),
        example_translation: example_translation.to_string(),
        audio: Some(audio.to_string()),
    }
}

/// Built-in sample set used when the data source can't be reached.
pub fn fallback_entries() -> Vec<Entry> {
    vec![
        sample(
            "Chililo",
            "Bemba",
            "Expression",
            "Funeral or mourning ceremony",
            "Ba mayo nabaya ku chililo.",
            "My mom has gone for a funeral.",
            "chililo.mp3",
        ),
        sample(
            "Ni zee",
            "Nyanja",
            "Expression",
            "Cool Talk",
            "Awe mudala, iyi yeve ni zee maningi che.",
            "No worries, bro its all good.",
            "ni zee.mp3",
        ),
        sample(
            "Mukwai",
            "Bemba",
            "Greeting",
            "Respectful greeting, meaning 'sir' or 'madam'",
            "Mukwai, mwaiseni?",
            "Sir/Madam, you are welcome?",
            "mukwai.mp3",
        ),
        sample(
            "Chibuku",
            "Nyanja",
            "Food",
            "Traditional beer made from maize",
            "Tikagule chibuku.",
            "Let's go buy traditional beer.",
            "chibuku.mp3",
        ),
        sample(
            "Boma",
            "Bemba",
            "Expression",
            "Government or authority",
            "Boma ni boma.",
            "Government is government.",
            "boma.mp3",
        ),
        sample(
            "Nsima",
            "Nyanja",
            "Food",
            "Zambian staple food made from maize meal",
            "Nikudya nsima na ndiyo.",
            "I'm eating nshima with relish.",
            "nshima.mp3",
        ),
        sample(
            "Balibe plan",
            "Nyanja",
            "Expression",
            "No direction, just messing around",
            "Abo balibe plan, bango zunguluka mu town che ai.",
            "Those guys have no direction, they are just moving around town .",
            "balibeplan.mp3",
        ),
        sample(
            "Paipa pano",
            "Nyanja",
            "Expression",
            "its getting serious",
            "paipa pano, muzimai akamba sitikudya lelo .",
            "Its getting serious here, mom has said we are not eating today.",
            "paipapano.mp3",
        ),
        sample(
            "Kaya",
            "Nyanja",
            "Expression",
            "i dont know/whatever",
            "Kaya, kapena ati nama.",
            "I dont know, maybe he lied to us.",
            "kaya.mp3",
        ),
        sample(
            "Kwati ni movie",
            "Nyanja",
            "Fun",
            "More like a movie",
            "Drama yapa facebook kwati ni movie.",
            "That facebook drama was like a movie.",
            "kwatinimovie.mp3",
        ),
    ]
}
