use std::env;
use std::path::PathBuf;

use hexo_astro::config::{read_config, Config};
use hexo_astro::util::os_helper::exe_dir;

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    if let Ok(exe_dir) = exe_dir() {
        if exe_dir.join(CFG_FILE_NAME).exists() {
            return Some(exe_dir.join(CFG_FILE_NAME));
        }
    }

    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_dir = dirs::config_dir()?;
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

/// Reads the given configuration file, or the first one found in the usual
/// places. Without any file the built-in defaults are used.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let Some(config_path) = cfg_path.or_else(get_config_path) else {
        println!("No {} found, using default paths", CFG_FILE_NAME);
        return Ok(Config::default());
    };

    println!("Reading config from {}", config_path.display());
    read_config(&config_path).map_err(|e| e.to_string())
}
