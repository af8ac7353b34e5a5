use std::path::PathBuf;
use std::sync::Arc;

use folio_core::{Catalog, FolioConfigSnapshot};
use folio_mail::{transport_from_config, MailRelay, MailSettings};
use folio_media::{FsMediaStore, MediaExistence, MediaResolver, MediaSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("production") {
            AppEnv::Production
        } else {
            AppEnv::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, AppEnv::Production)
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub env: AppEnv,
    pub media_root: PathBuf,
    pub resume_path: PathBuf,
    pub client_dir: PathBuf,
}

impl ServerSettings {
    pub fn from_config(config: &FolioConfigSnapshot) -> Self {
        let path = |key: &str, default: &str| {
            PathBuf::from(config.get_non_empty(key).unwrap_or(default))
        };

        Self {
            env: AppEnv::from_label(config.get("app.env").unwrap_or("development")),
            media_root: path("media.root", "public"),
            resume_path: path("resume.path", "public/files/resume/resume.pdf"),
            client_dir: path("client.dir", "public/client"),
        }
    }

    pub fn client_index(&self) -> PathBuf {
        self.client_dir.join("index.html")
    }
}

/// Everything a handler needs. Cheap to clone; nothing inside is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: Arc<FsMediaStore>,
    /// Existence checks used by the resolver and the gallery. Defaults to
    /// `store`.
    pub existence: Arc<dyn MediaExistence>,
    pub resolver: Arc<MediaResolver>,
    pub mail: Arc<MailRelay>,
    pub settings: Arc<ServerSettings>,
}

impl AppState {
    pub fn from_config(config: &FolioConfigSnapshot) -> anyhow::Result<Self> {
        let catalog = match config.get_non_empty("catalog.path") {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::builtin()?,
        };
        tracing::info!(projects = catalog.len(), "catalog loaded");

        let settings = ServerSettings::from_config(config);
        let store = Arc::new(FsMediaStore::new(&settings.media_root));
        let resolver = MediaResolver::new(MediaSettings::from_config(config));
        let mail = MailRelay::new(
            transport_from_config(config)?,
            MailSettings::from_config(config),
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            existence: store.clone(),
            store,
            resolver: Arc::new(resolver),
            mail: Arc::new(mail),
            settings: Arc::new(settings),
        })
    }

    pub fn with_existence(mut self, existence: Arc<dyn MediaExistence>) -> Self {
        self.existence = existence;
        self
    }

    pub fn with_mail(mut self, mail: MailRelay) -> Self {
        self.mail = Arc::new(mail);
        self
    }
}
