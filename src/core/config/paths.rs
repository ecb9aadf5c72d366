use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "faqbot";

/// Filesystem locations used by the service.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Where the public `config.yml` is looked up.
    pub project_root: PathBuf,
    /// Holds the database, `secrets.yaml` and `logs/`.
    pub user_data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub db_path: PathBuf,
    pub secrets_path: PathBuf,
}

impl AppPaths {
    /// Resolves the directories from `FAQBOT_ROOT` / `FAQBOT_DATA_DIR`, falling
    /// back to the project directory in debug builds and the platform data
    /// directory otherwise.
    pub fn new() -> Self {
        let project_root = env::var_os("FAQBOT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(default_project_root);
        let user_data_dir = env::var_os("FAQBOT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(&project_root));
        Self::from_dirs(project_root, user_data_dir)
    }

    /// Lays out the standard files below an explicit data directory.
    pub fn from_dirs(project_root: PathBuf, user_data_dir: PathBuf) -> Self {
        let log_dir = user_data_dir.join("logs");
        if let Err(err) = fs::create_dir_all(&log_dir) {
            // logging is not up yet
            eprintln!("Cannot create {}: {}", log_dir.display(), err);
        }

        AppPaths {
            db_path: user_data_dir.join("faqs.db"),
            secrets_path: user_data_dir.join("secrets.yaml"),
            project_root,
            user_data_dir,
            log_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn default_project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_dir.join("config.yml").is_file() {
        manifest_dir
    } else {
        env::current_dir().unwrap_or(manifest_dir)
    }
}

fn default_data_dir(project_root: &Path) -> PathBuf {
    if cfg!(debug_assertions) {
        return project_root.to_path_buf();
    }

    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    match env::consts::OS {
        "windows" => env::var_os("LOCALAPPDATA")
            .map(PathBuf::from)
            .unwrap_or(home)
            .join("FaqBot"),
        "macos" => home.join("Library/Application Support/FaqBot"),
        _ => env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".local/share"))
            .join(APP_DIR_NAME),
    }
}
