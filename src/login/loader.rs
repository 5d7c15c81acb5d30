use async_trait::async_trait;
use tracing::debug;

use crate::{db::Database, models::User};

/// Rehydrates a user from the identifier stored in the session.
#[async_trait]
pub trait UserLoader: Send + Sync {
    async fn load_user(&self, user_id: &str) -> anyhow::Result<Option<User>>;
}

/// Loads users by integer primary key.
#[derive(Clone)]
pub struct SqlUserLoader {
    db: Database,
}

impl SqlUserLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserLoader for SqlUserLoader {
    async fn load_user(&self, user_id: &str) -> anyhow::Result<Option<User>> {
        let Ok(id) = user_id.parse::<i64>() else {
            debug!(user_id, "session user id is not an integer");
            return Ok(None);
        };
        Ok(User::find_by_id(self.db.pool(), id).await?)
    }
}
