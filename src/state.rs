use std::sync::Arc;

use crate::config::AppConfig;
use crate::db;
use crate::password::CredentialHasher;
use crate::users::repo::{PgUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub hasher: Arc<CredentialHasher>,
}

impl AppState {
    /// Connects to PostgreSQL and applies pending migrations.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let hasher = Arc::new(CredentialHasher::new(&config.hash)?);
        let pool = db::connect(&config.database).await?;
        db::migrate(&pool).await?;

        let users = Arc::new(PgUserStore::new(pool)) as Arc<dyn UserStore>;
        Ok(Self::from_parts(users, hasher))
    }

    pub fn from_parts(users: Arc<dyn UserStore>, hasher: Arc<CredentialHasher>) -> Self {
        Self { users, hasher }
    }
}
