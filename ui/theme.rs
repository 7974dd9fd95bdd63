use derive_more::{Display, Error, From};
use std::{
	collections::BTreeMap,
	path::{Path, PathBuf},
	sync::{Mutex, RwLock},
};
use traintrack_charts::{ChartColors, Theme};

/// The storage key the active theme is persisted under.
pub const THEME_STORAGE_KEY: &str = "ml-monitor-theme";

#[derive(Debug, Display, Error, From)]
pub enum ThemeError {
	#[display(fmt = "failed to access the theme storage: {}", _0)]
	Io(std::io::Error),
	#[display(fmt = "the theme storage is not valid json: {}", _0)]
	Json(serde_json::Error),
}

/// A string key value store that outlives the process.
pub trait ThemeStorage: Send + Sync {
	fn get(&self, key: &str) -> Result<Option<String>, ThemeError>;
	fn set(&self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// Stores values as a json object in a single file.
pub struct FileThemeStorage {
	path: PathBuf,
}

impl FileThemeStorage {
	pub fn new(path: impl Into<PathBuf>) -> FileThemeStorage {
		FileThemeStorage { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn read(&self) -> Result<BTreeMap<String, String>, ThemeError> {
		match std::fs::read(&self.path) {
			Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
			Err(error) => Err(error.into()),
		}
	}
}

impl ThemeStorage for FileThemeStorage {
	fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
		Ok(self.read()?.remove(key))
	}

	fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
		let mut values = match self.read() {
			Ok(values) => values,
			Err(ThemeError::Json(error)) => {
				tracing::warn!(path = %self.path.display(), %error, "replacing invalid theme storage");
				BTreeMap::new()
			}
			Err(error) => return Err(error),
		};
		values.insert(key.to_owned(), value.to_owned());
		if let Some(parent) = self.path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&self.path, serde_json::to_vec_pretty(&values)?)?;
		Ok(())
	}
}

#[derive(Default)]
pub struct MemoryThemeStorage {
	values: Mutex<BTreeMap<String, String>>,
}

impl ThemeStorage for MemoryThemeStorage {
	fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
		let values = self.values.lock().unwrap_or_else(|error| error.into_inner());
		Ok(values.get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
		let mut values = self.values.lock().unwrap_or_else(|error| error.into_inner());
		values.insert(key.to_owned(), value.to_owned());
		Ok(())
	}
}

/// The active theme, shared by every page and chart. It is read from storage once by [`ThemeStore::load`] and written back on every change.
pub struct ThemeStore {
	storage: Box<dyn ThemeStorage>,
	theme: RwLock<Theme>,
}

impl ThemeStore {
	/// Read the persisted theme. A missing or unreadable value falls back to the dark theme.
	pub fn load(storage: Box<dyn ThemeStorage>) -> ThemeStore {
		let theme = match storage.get(THEME_STORAGE_KEY) {
			Ok(Some(value)) => value.parse::<Theme>().unwrap_or_else(|error| {
				tracing::warn!(%error, "ignoring the persisted theme");
				Theme::default()
			}),
			Ok(None) => Theme::default(),
			Err(error) => {
				tracing::warn!(%error, "failed to read the persisted theme");
				Theme::default()
			}
		};
		ThemeStore {
			storage,
			theme: RwLock::new(theme),
		}
	}

	pub fn get(&self) -> Theme {
		*self.theme.read().unwrap_or_else(|error| error.into_inner())
	}

	/// Change the theme and persist it. The new theme stays active even if persisting it fails.
	pub fn set(&self, theme: Theme) -> Result<(), ThemeError> {
		let mut current = self.theme.write().unwrap_or_else(|error| error.into_inner());
		*current = theme;
		self.storage.set(THEME_STORAGE_KEY, theme.as_str())
	}

	pub fn toggle(&self) -> Result<Theme, ThemeError> {
		// The write guard is held while persisting so that the stored theme is always the active one.
		let mut current = self.theme.write().unwrap_or_else(|error| error.into_inner());
		let theme = current.toggled();
		*current = theme;
		self.storage.set(THEME_STORAGE_KEY, theme.as_str())?;
		Ok(theme)
	}

	pub fn chart_colors(&self) -> &'static ChartColors {
		self.get().chart_colors()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	struct BrokenStorage;

	impl ThemeStorage for BrokenStorage {
		fn get(&self, _key: &str) -> Result<Option<String>, ThemeError> {
			Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
		}
		fn set(&self, _key: &str, _value: &str) -> Result<(), ThemeError> {
			Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
		}
	}

	/// Records the last write. The first write is slow.
	#[derive(Default)]
	struct SlowStorage {
		writes: std::sync::atomic::AtomicUsize,
		persisted: std::sync::Arc<Mutex<Option<String>>>,
	}

	impl ThemeStorage for SlowStorage {
		fn get(&self, _key: &str) -> Result<Option<String>, ThemeError> {
			Ok(self.persisted.lock().unwrap().clone())
		}
		fn set(&self, _key: &str, value: &str) -> Result<(), ThemeError> {
			if self.writes.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
				std::thread::sleep(std::time::Duration::from_millis(200));
			}
			*self.persisted.lock().unwrap() = Some(value.to_owned());
			Ok(())
		}
	}

	#[test]
	fn test_concurrent_toggles_persist_the_active_theme() {
		let storage = SlowStorage::default();
		let persisted = storage.persisted.clone();
		let store = std::sync::Arc::new(ThemeStore::load(Box::new(storage)));
		let first = {
			let store = store.clone();
			std::thread::spawn(move || store.toggle().unwrap())
		};
		std::thread::sleep(std::time::Duration::from_millis(50));
		let second = {
			let store = store.clone();
			std::thread::spawn(move || store.toggle().unwrap())
		};
		assert_eq!(first.join().unwrap(), Theme::Light);
		assert_eq!(second.join().unwrap(), Theme::Dark);
		assert_eq!(store.get(), Theme::Dark);
		assert_eq!(
			persisted.lock().unwrap().clone(),
			Some(store.get().as_str().to_owned())
		);
	}

	#[test]
	fn test_defaults_to_dark() {
		let store = ThemeStore::load(Box::new(MemoryThemeStorage::default()));
		assert_eq!(store.get(), Theme::Dark);
		assert_eq!(store.chart_colors().text, "#999");
	}

	#[test]
	fn test_unreadable_storage_falls_back() {
		let store = ThemeStore::load(Box::new(BrokenStorage));
		assert_eq!(store.get(), Theme::Dark);
		assert!(store.toggle().is_err());
		assert_eq!(store.get(), Theme::Light);
	}

	#[test]
	fn test_toggle_persists_to_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("traintrack").join("theme.json");
		let store = ThemeStore::load(Box::new(FileThemeStorage::new(&path)));
		assert_eq!(store.toggle().unwrap(), Theme::Light);
		let contents = std::fs::read_to_string(&path).unwrap();
		let values: BTreeMap<String, String> = serde_json::from_str(&contents).unwrap();
		assert_eq!(values[THEME_STORAGE_KEY], "light");
		let reloaded = ThemeStore::load(Box::new(FileThemeStorage::new(&path)));
		assert_eq!(reloaded.get(), Theme::Light);
		assert_eq!(reloaded.chart_colors().tooltip_title, "#1a1a1a");
	}

	#[test]
	fn test_invalid_file_is_replaced_on_write() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("theme.json");
		std::fs::write(&path, "not json").unwrap();
		let storage = FileThemeStorage::new(&path);
		assert!(matches!(storage.get(THEME_STORAGE_KEY), Err(ThemeError::Json(_))));
		let store = ThemeStore::load(Box::new(storage));
		assert_eq!(store.get(), Theme::Dark);
		store.set(Theme::Light).unwrap();
		let storage = FileThemeStorage::new(&path);
		assert_eq!(
			storage.get(THEME_STORAGE_KEY).unwrap(),
			Some("light".to_owned())
		);
	}
}
