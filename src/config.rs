use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub profile: String,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://webbooks.db?mode=rwc".to_string()
            } else {
                format!("sqlite://webbooks_{}.db?mode=rwc", profile)
            }
        });

        Self {
            database_url,
            profile,
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}
