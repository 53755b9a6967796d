//! Data store — the full slang collection, loaded once at startup.

use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;
use tracing::{info, warn};

use crate::entry::{fallback_entries, Entry, EntryId};

/// Where entries are fetched from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Url(reqwest::Url),
    Path(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` strings become URLs; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            if let Ok(url) = reqwest::Url::parse(trimmed) {
                return Self::Url(url);
            }
        }
        Self::Path(PathBuf::from(trimmed))
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Whether the store holds real data or the built-in sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Source,
    Fallback,
}

pub struct DataStore {
    entries: Vec<Entry>,
    origin: DataOrigin,
}

impl DataStore {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            origin: DataOrigin::Source,
        }
    }

    pub fn fallback() -> Self {
        Self {
            entries: fallback_entries(),
            origin: DataOrigin::Fallback,
        }
    }

    /// Load from `source`, degrading to the sample set on any failure.
    pub async fn load(source: &DataSource, timeout: Duration) -> Self {
        info!("Loading slangs from {}...", source);
        match fetch_entries(source, timeout).await {
            Ok(entries) => {
                info!("Successfully loaded {} slangs", entries.len());
                Self::new(entries)
            }
            Err(e) => {
                warn!("Error loading slangs from {}: {:#}", source, e);
                info!("Using fallback data...");
                Self::fallback()
            }
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    /// First entry with this identity, with its index.
    pub fn find_by_id(&self, id: &EntryId) -> Option<(usize, &Entry)> {
        self.entries.iter().enumerate().find(|(_, e)| e.has_id(id))
    }

    /// Distinct non-empty languages, in first-seen order.
    pub fn languages(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|e| e.language.as_str()))
    }

    /// Distinct non-empty categories, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|e| e.category.as_str()))
    }

    pub fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        Some(rng.gen_range(0..self.entries.len()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !v.is_empty() && !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}

/// Fetch and parse the raw entry list.  No schema validation beyond "a JSON
/// array"; missing or malformed fields come through empty.
pub async fn fetch_entries(source: &DataSource, timeout: Duration) -> anyhow::Result<Vec<Entry>> {
    let body = match source {
        DataSource::Url(url) => {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            let response = client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                anyhow::bail!("HTTP error! status: {}", status);
            }
            response.text().await?
        }
        DataSource::Path(path) => {
            tokio::time::timeout(timeout, tokio::fs::read_to_string(path))
                .await
                .map_err(|_| anyhow::anyhow!("timed out reading {}", path.display()))??
        }
    };
    parse_entries(&body)
}

/// Parse a JSON array of entries.  Only a body that isn't an array fails;
/// an element that isn't an entry object becomes an empty entry.
pub fn parse_entries(body: &str) -> anyhow::Result<Vec<Entry>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(body)?;
    Ok(values
        .into_iter()
        .map(|value| match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("malformed entry kept as empty: {}", e);
                Entry::default()
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_source_parse() {
        assert!(matches!(
            DataSource::parse("https://example.org/data/slangs.json"),
            DataSource::Url(_)
        ));
        assert_eq!(
            DataSource::parse("data/slangs.json"),
            DataSource::Path(PathBuf::from("data/slangs.json"))
        );
    }

    #[test]
    fn test_find_by_id_first_match_wins() {
        let mut entries = fallback_entries();
        let mut dup = entries[0].clone();
        dup.meaning = "shadowed".into();
        entries.push(dup);
        let store = DataStore::new(entries);
        let (idx, found) = store.find_by_id(&store.entries()[10].id()).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(found.meaning, "Funeral or mourning ceremony");
    }

    #[test]
    fn test_distinct_choices_keep_first_seen_order() {
        let store = DataStore::fallback();
        assert_eq!(store.languages(), vec!["Bemba", "Nyanja"]);
        assert_eq!(
            store.categories(),
            vec!["Expression", "Greeting", "Food", "Fun"]
        );
    }

    #[test]
    fn test_random_index_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let store = DataStore::fallback();
        for _ in 0..50 {
            assert!(store.random_index(&mut rng).unwrap() < store.len());
        }
        assert_eq!(DataStore::new(Vec::new()).random_index(&mut rng), None);
    }

    #[test]
    fn test_parse_entries_passes_malformed_through() {
        let entries = parse_entries(r#"[{"word":"Kaya"},{"meaning":"no word"}]"#).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].word, "");
        assert!(parse_entries(r#"{"word":"not an array"}"#).is_err());
    }

    #[test]
    fn test_parse_entries_tolerates_null_and_wrong_types() {
        let entries = parse_entries(
            r#"[
                {"word":"Shani","language":"Bemba","category":"Greeting","meaning":"What's up"},
                {"word":"Bwanji","language":"Nyanja","category":"Greeting","meaning":null,
                 "example_native":42,"audio":false},
                "not an object"
            ]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].meaning, "What's up");
        assert_eq!(entries[1].word, "Bwanji");
        assert_eq!(entries[1].meaning, "");
        assert_eq!(entries[1].example_native, "");
        assert_eq!(entries[1].audio, None);
        assert_eq!(entries[2], Entry::default());
    }

    #[tokio::test]
    async fn test_load_keeps_source_with_null_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slangs.json");
        std::fs::write(
            &path,
            r#"[{"word":"Shani","language":"Bemba","category":"Greeting","meaning":"What's up"},
                {"word":"Bwanji","language":"Nyanja","category":"Greeting","meaning":null}]"#,
        )
        .unwrap();
        let store = DataStore::load(&DataSource::Path(path), Duration::from_secs(1)).await;
        assert_eq!(store.origin(), DataOrigin::Source);
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[1].word, "Bwanji");
    }

    #[tokio::test]
    async fn test_load_missing_file_falls_back() {
        let source = DataSource::Path(PathBuf::from("/nonexistent/zed/slangs.json"));
        let store = DataStore::load(&source, Duration::from_secs(1)).await;
        assert_eq!(store.origin(), DataOrigin::Fallback);
        assert_eq!(store.len(), 10);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slangs.json");
        std::fs::write(
            &path,
            r#"[{"word":"Shani","language":"Bemba","category":"Greeting","meaning":"What's up"}]"#,
        )
        .unwrap();
        let store = DataStore::load(&DataSource::Path(path), Duration::from_secs(1)).await;
        assert_eq!(store.origin(), DataOrigin::Source);
        assert_eq!(store.entries()[0].word, "Shani");
    }

    #[tokio::test]
    async fn test_load_unreachable_url_falls_back() {
        // Port 9 (discard) on localhost is closed on any sane test box.
        let source = DataSource::parse("http://127.0.0.1:9/slangs.json");
        let store = DataStore::load(&source, Duration::from_secs(2)).await;
        assert_eq!(store.origin(), DataOrigin::Fallback);
    }

    /// Serve one canned HTTP response on a loopback port.
    fn serve_once(response: &'static str) -> String {
        use std::io::{Read, Write};
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}/slangs.json", addr)
    }

    #[tokio::test]
    async fn test_error_status_falls_back() {
        let url = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let source = DataSource::parse(&url);
        let err = fetch_entries(&source, Duration::from_secs(2)).await.unwrap_err();
        assert!(err.to_string().contains("500"), "{}", err);

        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let store = DataStore::load(&DataSource::parse(&url), Duration::from_secs(2)).await;
        assert_eq!(store.origin(), DataOrigin::Fallback);
        assert_eq!(store.len(), 10);
    }

    #[tokio::test]
    async fn test_load_from_url() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 18\r\nConnection: close\r\n\r\n[{\"word\":\"Shani\"}]",
        );
        let store = DataStore::load(&DataSource::parse(&url), Duration::from_secs(2)).await;
        assert_eq!(store.origin(), DataOrigin::Source);
        assert_eq!(store.entries()[0].word, "Shani");
    }
}
