use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
}

#[derive(Clone)]
pub struct Config {
    pub store: StoreConfig,
}

pub fn get_config() -> Config {
    let store_path = env::var("CLOUDEATS_STORE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("cloudeats.json"));

    Config {
        store: StoreConfig { path: store_path },
    }
}
