use std::env;
use std::path::PathBuf;

use securesector::config::{read_config, Config};

use crate::CFG_FILE_NAME;

/// Searched in order: next to the binary, the working directory, then the
/// user configuration directory.
fn get_config_path() -> Option<PathBuf> {
    let exe_path = env::current_exe().unwrap();
    let exe_dir = exe_path.parent().unwrap().to_path_buf();
    let cur_dir = env::current_dir().unwrap();

    let mut candidates = vec![exe_dir, cur_dir];
    if let Some(cfg_dir) = dirs::config_dir() {
        candidates.push(cfg_dir);
    }

    candidates
        .into_iter()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = cfg_path.or_else(get_config_path);
    let config_path = match config_path {
        Some(path) => path,
        None => return Err("Could not find SecureSector configuration".to_string()),
    };

    println!("Current dir: {}", env::current_dir().unwrap().display());
    println!("Reading config from {}", config_path.display());
    let mut config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Some(ref mut log) = config.log {
        let location = log.location.get_or_insert_with(|| {
            dirs::cache_dir().unwrap().join("SecureSector").join("log").join("server.log")
        });
        println!("Log enabled. Files will be written in {}", location.display());
    } else {
        println!("Log disabled. Using stdout");
    }

    if let Some(ref mut metrics) = config.metrics {
        let location = metrics.location.get_or_insert_with(|| {
            dirs::cache_dir().unwrap().join("SecureSector").join("metrics").join("metrics.log")
        });
        println!("Metrics enabled. Files will be written in {}", location.display());

        let time_slot_secs = *metrics.time_slot_secs.get_or_insert(60);
        println!("Metrics time slot is {} seconds.", time_slot_secs);
    } else {
        println!("Metrics disabled.");
    }

    Ok(config)
}
