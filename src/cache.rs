use std::fs;
use std::path::{Path, PathBuf};

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use crate::config::config_directory;
use crate::domain::ticket::TicketInput;
use crate::error::{AppError, AppResult};

const CACHE_FILE_NAME: &str = "pending_submissions.json";
const CACHE_LIMIT: usize = 32;

#[derive(Default, Serialize, Deserialize)]
struct CacheFile {
    entries: Vec<CacheEntry>,
}

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    key: String,
    input: TicketInput,
}

/// Case submissions that could not reach the backend, kept so the customer
/// can send them again later.
pub struct PendingSubmissions {
    file_path: PathBuf,
    file: CacheFile,
}

impl PendingSubmissions {
    pub fn load() -> AppResult<Self> {
        let dir = config_directory()?;
        Self::load_from(&dir.join(CACHE_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let file = match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str::<CacheFile>(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid cache file: {err}")))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => CacheFile::default(),
            Err(err) => return Err(AppError::Io(err)),
        };

        Ok(Self {
            file_path: path.to_path_buf(),
            file,
        })
    }

    pub fn len(&self) -> usize {
        self.file.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.entries.is_empty()
    }

    /// Pending inputs, oldest first.
    pub fn entries(&self) -> Vec<(String, TicketInput)> {
        self.file
            .entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.input.clone()))
            .collect()
    }

    /// Stores `input`, replacing an identical earlier submission. Returns the
    /// entry key.
    pub fn insert(&mut self, input: &TicketInput) -> String {
        let key = Self::compute_key(input);
        self.file.entries.retain(|entry| entry.key != key);
        self.file.entries.push(CacheEntry {
            key: key.clone(),
            input: input.clone(),
        });

        if self.file.entries.len() > CACHE_LIMIT {
            let overflow = self.file.entries.len() - CACHE_LIMIT;
            self.file.entries.drain(0..overflow);
        }
        key
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.file.entries.len();
        self.file.entries.retain(|entry| entry.key != key);
        before != self.file.entries.len()
    }

    pub fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.file)
            .map_err(|err| AppError::Configuration(format!("failed to write cache: {err}")))?;
        fs::write(&self.file_path, data)?;
        Ok(())
    }

    pub fn compute_key(input: &TicketInput) -> String {
        let mut hasher = Hasher::new();
        let fields = [
            Some(input.title.as_str()),
            input.description.as_deref(),
            Some(input.category.as_str()),
            Some(input.priority.as_str()),
            input.customer_name.as_deref(),
            input.customer_email.as_deref(),
            input.customer_phone.as_deref(),
        ];
        for field in fields {
            hash_field(&mut hasher, field);
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Tags presence and prefixes the length so neighbouring fields can never
/// run into each other.
fn hash_field(hasher: &mut Hasher, value: Option<&str>) {
    match value {
        Some(value) => {
            hasher.update(&[1]);
            hasher.update(&(value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::{Category, Priority};

    fn input(title: &str) -> TicketInput {
        TicketInput {
            title: title.to_string(),
            description: Some("details".to_string()),
            category: Category::Compliance,
            priority: Priority::Medium,
            customer_name: Some("Kari".to_string()),
            customer_email: Some("kari@example.no".to_string()),
            customer_phone: None,
        }
    }

    #[test]
    fn identical_submissions_share_an_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = PendingSubmissions::load_from(&dir.path().join("p.json")).unwrap();
        let first = cache.insert(&input("Audit letter"));
        let second = cache.insert(&input("Audit letter"));
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        cache.insert(&input("Other letter"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn distinct_cases_never_share_an_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = PendingSubmissions::load_from(&dir.path().join("p.json")).unwrap();

        let mut shifted = input("Audit letter");
        shifted.description = Some("x".to_string());
        shifted.customer_email = Some("ya@b.no".to_string());
        let mut other = input("Audit letter");
        other.description = Some("xy".to_string());
        other.customer_email = Some("a@b.no".to_string());
        cache.insert(&shifted);
        cache.insert(&other);
        assert_eq!(cache.len(), 2);

        let mut kari = input("Audit letter");
        kari.priority = Priority::Low;
        let mut per = input("Audit letter");
        per.customer_name = Some("Per".to_string());
        per.priority = Priority::Critical;
        cache.insert(&kari);
        cache.insert(&per);
        assert_eq!(cache.len(), 4);
        let names: Vec<Option<String>> = cache
            .entries()
            .into_iter()
            .map(|(_, input)| input.customer_name)
            .collect();
        assert!(names.contains(&Some("Kari".to_string())));
        assert!(names.contains(&Some("Per".to_string())));
    }

    #[test]
    fn persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("p.json");
        let mut cache = PendingSubmissions::load_from(&path).unwrap();
        let key = cache.insert(&input("Audit letter"));
        cache.save().unwrap();

        let mut reloaded = PendingSubmissions::load_from(&path).unwrap();
        assert_eq!(reloaded.entries()[0].1.title, "Audit letter");
        assert!(reloaded.remove(&key));
        assert!(reloaded.is_empty());
    }

    #[test]
    fn drops_oldest_beyond_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = PendingSubmissions::load_from(&dir.path().join("p.json")).unwrap();
        for n in 0..(CACHE_LIMIT + 3) {
            cache.insert(&input(&format!("case {n}")));
        }
        assert_eq!(cache.len(), CACHE_LIMIT);
        assert_eq!(cache.entries()[0].1.title, "case 3");
    }
}
