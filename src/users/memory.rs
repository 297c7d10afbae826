use std::sync::Mutex;

use async_trait::async_trait;

use crate::users::repo::UserStore;
use crate::users::repo_types::{NewUser, User, UserChanges};

/// In-process store for handler tests.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: Vec<User>,
    fail: bool,
}

impl MemoryUserStore {
    /// Every subsequent call returns an error, like a lost connection.
    pub fn fail_all(&self) {
        self.inner.lock().unwrap().fail = true;
    }

    fn guard(&self) -> anyhow::Result<std::sync::MutexGuard<'_, Inner>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail {
            anyhow::bail!("store unavailable");
        }
        Ok(inner)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new: &NewUser) -> anyhow::Result<User> {
        let mut inner = self.guard()?;
        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            name: new.name.clone(),
            email: new.email.clone(),
            password: new.password.clone(),
            date: new.date,
            company: new.company.clone(),
        };
        inner.rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.guard()?.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<User>> {
        Ok(self
            .guard()?
            .rows
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> anyhow::Result<i64> {
        Ok(self.guard()?.rows.len() as i64)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> anyhow::Result<u64> {
        let mut inner = self.guard()?;
        let Some(user) = inner.rows.iter_mut().find(|u| u.id == id) else {
            return Ok(0);
        };
        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        Ok(1)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let mut inner = self.guard()?;
        let before = inner.rows.len();
        inner.rows.retain(|u| u.id != id);
        Ok((before - inner.rows.len()) as u64)
    }
}
