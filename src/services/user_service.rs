use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    database::UserStore,
    models::{NewUser, User},
    utils::AppError,
};

/// Process-wide owner of the user store, shared with handlers via `web::Data`.
///
/// Each call takes the lock once, so a single operation is atomic. Nothing
/// spans two calls: a handler that reads and then writes can interleave with
/// other requests.
#[derive(Debug, Default)]
pub struct UserService {
    store: RwLock<UserStore>,
}

impl UserService {
    pub fn new() -> Self {
        Self { store: RwLock::new(UserStore::new()) }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, UserStore>, AppError> {
        self.store
            .read()
            .map_err(|e| AppError::Internal(format!("user store lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, UserStore>, AppError> {
        self.store
            .write()
            .map_err(|e| AppError::Internal(format!("user store lock poisoned: {}", e)))
    }

    pub fn count(&self) -> Result<usize, AppError> {
        Ok(self.read()?.len())
    }

    pub fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.read()?.list().to_vec())
    }

    pub fn search_users(&self, query: Option<&str>) -> Result<Vec<User>, AppError> {
        Ok(self.read()?.search(query))
    }

    pub fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.read()?.get_by_id(id).cloned()
    }

    pub fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = self.write()?.create(new_user);
        log::debug!("💾 Stored user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub fn update_user(&self, id: i64, changes: NewUser) -> Result<User, AppError> {
        self.write()?.update(id, changes)
    }

    pub fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write()?.delete(id))
    }
}

/// Two demo records for local development (`SEED_USERS=true`).
pub fn seed_demo_users(service: &UserService) -> Result<(), AppError> {
    let demo = [
        ("Ann Lee", "ann@example.com"),
        ("Bo Sato", "bo@example.com"),
    ];

    for (name, email) in demo {
        service.create_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
        })?;
    }

    log::info!("🌱 Seeded {} demo users", demo.len());
    Ok(())
}
