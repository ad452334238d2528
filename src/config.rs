use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub web_port: u16,
    pub secret_key: String,
}

impl Config {
    /// Reads `DATABASE_URL`, `WEB_PORT` and `SECRET_KEY`, after loading `.env` if present.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let config = ::config::Config::builder()
            .set_default("database_url", "sqlite://posts.db")?
            .set_default("web_port", 5000)?
            .add_source(::config::Environment::default())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn web_addr(&self) -> String {
        format!("0.0.0.0:{}", self.web_port)
    }
}
