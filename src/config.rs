use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;

use crate::catalog::{Catalog, LegacyRef};
use crate::util::os_helper::expand_exe_dir;

pub const DEFAULT_SOURCE_DIR: &str = "./source/_posts";
pub const DEFAULT_CONTENT_DIR: &str = "./src/content/blog";
pub const DEFAULT_ASSETS_DIR: &str = "./src/assets/images/blog";
pub const DEFAULT_PUBLIC_PREFIX: &str = "~/assets/images/blog";
pub const DEFAULT_LOG_FILE: &str = "./migration.log";
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "svg"];

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Paths {
    /// Hexo `source/_posts` directory
    pub source_dir: PathBuf,
    /// Astro content collection the migrated posts are written to
    pub content_dir: PathBuf,
    /// Central image directory
    pub assets_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Assets {
    /// Prefix used in markdown to reference files of `assets_dir`
    pub public_prefix: String,
    pub image_extensions: Vec<String>,
}

impl Default for Assets {
    fn default() -> Self {
        Assets {
            public_prefix: DEFAULT_PUBLIC_PREFIX.to_string(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Assets {
    pub fn reference_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), file_name)
    }

    pub fn is_image(&self, file_name: &str) -> bool {
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        self.image_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    /// An empty location in the file disables the log file, console only
    pub location: Option<PathBuf>,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: LogLevel::Info,
            log_to_console: true,
            location: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Default, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub assets: Assets,
    pub log: Log,
    /// Replaces the built-in legacy catalog when present
    pub legacy_refs: Option<Vec<LegacyRef>>,
}

impl Config {
    pub fn catalog(&self) -> Catalog {
        match self.legacy_refs {
            Some(ref refs) => Catalog::new(refs.clone()),
            None => Catalog::builtin(&self.assets),
        }
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        source_dir: expand_exe_dir(cfg.paths.source_dir)?,
        content_dir: expand_exe_dir(cfg.paths.content_dir)?,
        assets_dir: expand_exe_dir(cfg.paths.assets_dir)?,
    };

    cfg.log.location = match cfg.log.location.take() {
        Some(location) if location.as_os_str().is_empty() => None,
        Some(location) => Some(expand_exe_dir(location)?),
        None => None,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
