use crate::models::{NewUser, User};
use crate::utils::AppError;

/// In-memory user storage. Records live only as long as the process.
///
/// Every operation is a linear scan or an append over the backing `Vec`,
/// which also gives insertion order for free.
#[derive(Debug, Default, Clone)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// Case-sensitive substring match on `name` or `email`.
    /// An empty or absent query returns the full list.
    pub fn search(&self, query: Option<&str>) -> Vec<User> {
        match query {
            Some(q) if !q.is_empty() => self
                .users
                .iter()
                .filter(|u| u.name.contains(q) || u.email.contains(q))
                .cloned()
                .collect(),
            _ => self.users.clone(),
        }
    }

    pub fn get_by_id(&self, id: i64) -> Result<&User, AppError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
    }

    /// Appends a record with id `max + 1` (or 1 on an empty store).
    ///
    /// Deleting the current maximum and creating again hands out that same
    /// id a second time.
    pub fn create(&mut self, new_user: NewUser) -> User {
        let id = self.users.iter().map(|u| u.id).max().map_or(1, |max| max + 1);
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
        };
        self.users.push(user.clone());
        user
    }

    pub fn update(&mut self, id: i64, changes: NewUser) -> Result<User, AppError> {
        let existing = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;

        existing.name = changes.name;
        existing.email = changes.email;
        Ok(existing.clone())
    }

    /// Removes the record if present. Returns whether anything was removed;
    /// a missing id is not an error.
    pub fn delete(&mut self, id: i64) -> bool {
        match self.users.iter().position(|u| u.id == id) {
            Some(index) => {
                self.users.remove(index);
                true
            }
            None => false,
        }
    }
}
