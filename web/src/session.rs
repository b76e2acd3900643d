use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use shared_types::{LoginResponse, Role};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::SessionError;

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const USER_ID_KEY: &str = "userId";
pub const USER_NAME_KEY: &str = "userName";

const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, ROLE_KEY, USER_ID_KEY, USER_NAME_KEY];

/// String key/value storage that outlives a page load (or a process run).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds plain strings, keep using it.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// JSON file backed store for native clients. Every write is flushed to disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        apply(&mut entries);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&*entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// The browser's `localStorage`.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

#[cfg(feature = "hydrate")]
mod browser {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = localStorage)]
        pub fn getItem(key: &str) -> Option<String>;

        #[wasm_bindgen(js_namespace = localStorage, catch)]
        pub fn setItem(key: &str, value: &str) -> Result<(), JsValue>;

        #[wasm_bindgen(js_namespace = localStorage, catch)]
        pub fn removeItem(key: &str) -> Result<(), JsValue>;
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        browser::getItem(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        browser::setItem(key, value).map_err(|e| SessionError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        browser::removeItem(key).map_err(|e| SessionError::Storage(format!("{:?}", e)))
    }
}

/// Snapshot of who is logged in.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Option<Role>,
    pub user_id: Option<Uuid>,
    pub user_name: Option<String>,
}

/// Handle to the persisted login state. Cheap to clone; all clones share
/// the same store. Login writes it, logout clears it, everything else reads.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .field("role", &self.role())
            .finish()
    }
}

impl SessionContext {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    #[cfg(feature = "hydrate")]
    pub fn from_config(_config: &ClientConfig) -> Result<Self, SessionError> {
        Ok(Self::new(BrowserStore))
    }

    /// The configured session file, or memory only when none is set.
    #[cfg(not(feature = "hydrate"))]
    pub fn from_config(config: &ClientConfig) -> Result<Self, SessionError> {
        match &config.session_file {
            Some(path) => Ok(Self::new(FileStore::open(path)?)),
            None => Ok(Self::in_memory()),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn role(&self) -> Option<Role> {
        self.store.get(ROLE_KEY).as_deref().and_then(Role::parse)
    }

    pub fn user_name(&self) -> Option<String> {
        self.store.get(USER_NAME_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn current(&self) -> Option<Session> {
        let token = self.token()?;
        Some(Session {
            token,
            role: self.role(),
            user_id: self
                .store
                .get(USER_ID_KEY)
                .and_then(|id| Uuid::parse_str(&id).ok()),
            user_name: self.user_name(),
        })
    }

    pub fn sign_in(&self, login: &LoginResponse) -> Result<(), SessionError> {
        self.store.set(TOKEN_KEY, &login.token)?;
        self.store.set(ROLE_KEY, &login.role)?;
        self.store.set(USER_NAME_KEY, &login.name)?;
        match login.id {
            Some(id) => self.store.set(USER_ID_KEY, &id.to_string())?,
            None => self.store.remove(USER_ID_KEY)?,
        }
        tracing::info!(role = %login.role, "session started");
        Ok(())
    }

    /// Removes every session key, even if an earlier removal fails.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.store.remove(key) {
                first_error.get_or_insert(e);
            }
        }
        tracing::info!("session cleared");
        first_error.map_or(Ok(()), Err)
    }
}
