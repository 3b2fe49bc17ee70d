use crate::error::{RenderError, Section};
use crate::openapi::OpenApiDocument;
use dashmap::{DashMap, Entry, VacantEntry};
use std::fmt::{Display, Formatter};
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

static GLOBAL_CACHE: OnceLock<DocumentCollection<String>> = OnceLock::new();
pub fn global_document_cache() -> &'static DocumentCollection<String> {
    GLOBAL_CACHE.get_or_init(DocumentCollection::new)
}

/// Error types for cache operations
#[derive(Debug)]
pub enum CacheError {
    /// The document with the specified ID was not found in the cache
    DocumentNotFound,
    /// The document with the specified ID already exists in the cache
    DocumentAlreadyExists,
    /// The value could not be turned into a document.
    FailedToLoadDocument(RenderError),
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::DocumentNotFound => write!(f, "Document not found in cache"),
            CacheError::DocumentAlreadyExists => write!(f, "Document already exists in cache"),
            CacheError::FailedToLoadDocument(err) => {
                write!(f, "Failed to load document: {}", err)
            }
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::FailedToLoadDocument(err) => Some(err),
            _ => None,
        }
    }
}

/// Loaded documents shared between renders.
///
/// A document stays alive while an [`Arc`] handed out by [`DocumentCollection::get`]
/// is held, even after it was removed from the collection.
pub struct DocumentCollection<K> {
    cache: DashMap<K, Arc<OpenApiDocument>>,
}

impl<K> DocumentCollection<K>
where
    K: Hash + Eq,
{
    pub fn new() -> Self {
        DocumentCollection {
            cache: DashMap::new(),
        }
    }

    /// Converts any serializable value (typically a `serde_json::Value`
    /// parsed by the host) into a document and stores it under `id`.
    pub fn insert<V>(&self, id: K, document: V) -> Result<Arc<OpenApiDocument>, CacheError>
    where
        V: serde::Serialize,
    {
        match self.cache.entry(id) {
            Entry::Occupied(_) => Err(CacheError::DocumentAlreadyExists),
            Entry::Vacant(entry) => Self::load_document(entry, document),
        }
    }

    pub fn insert_document(
        &self,
        id: K,
        document: OpenApiDocument,
    ) -> Result<Arc<OpenApiDocument>, CacheError> {
        match self.cache.entry(id) {
            Entry::Occupied(_) => Err(CacheError::DocumentAlreadyExists),
            Entry::Vacant(entry) => {
                let document = Arc::new(document);
                entry.insert(document.clone());
                Ok(document)
            }
        }
    }

    fn load_document<V>(
        entry: VacantEntry<K, Arc<OpenApiDocument>>,
        document: V,
    ) -> Result<Arc<OpenApiDocument>, CacheError>
    where
        V: serde::Serialize,
    {
        let value = match serde_json::to_value(document) {
            Ok(val) => val,
            Err(e) => {
                return Err(CacheError::FailedToLoadDocument(
                    RenderError::unable_to_parse(e, Section::Other),
                ));
            }
        };
        match serde_json::from_value::<OpenApiDocument>(value) {
            Ok(document) => {
                let document = Arc::new(document);
                entry.insert(document.clone());
                Ok(document)
            }
            Err(e) => Err(CacheError::FailedToLoadDocument(
                RenderError::unable_to_parse(e, Section::Other),
            )),
        }
    }

    pub fn get(&self, id: &K) -> Result<Arc<OpenApiDocument>, CacheError> {
        match self.cache.get(id) {
            Some(document) => Ok(Arc::clone(document.value())),
            None => Err(CacheError::DocumentNotFound),
        }
    }

    pub fn remove(&self, id: &K) -> Result<(), CacheError> {
        if self.cache.remove(id).is_none() {
            return Err(CacheError::DocumentNotFound);
        }
        Ok(())
    }

    pub fn contains(&self, id: &K) -> bool {
        self.cache.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&self) {
        self.cache.clear();
        log::debug!("Cleared document cache");
    }
}

impl<K> Default for DocumentCollection<K>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}
