use std::env;
use std::path::PathBuf;

pub const DATA_PATH_ENV: &str = "CAMPUS_QA_DATA";

pub struct AppConfig {
    pub knowledge_path: PathBuf,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            knowledge_path: PathBuf::from("university_data.json"),
            log_filter: "campus_qa=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads overrides from the process: the first CLI argument wins over
    /// `CAMPUS_QA_DATA`, which wins over the default path.
    pub fn from_env() -> Self {
        Self::resolve(env::args().nth(1), env::var(DATA_PATH_ENV).ok())
    }

    fn resolve(arg_path: Option<String>, env_path: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = arg_path.or(env_path).filter(|p| !p.trim().is_empty()) {
            config.knowledge_path = PathBuf::from(path);
        }
        config
    }
}
