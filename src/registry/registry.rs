//! RwLock-guarded user map

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::errors::{RegistryError, RegistryResult};
use super::user::{User, UserId};

/// What a `put` did to the slot at `user.id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// No record existed for the id
    Created,
    /// An existing record was overwritten
    Replaced,
}

/// In-memory user registry
///
/// # Thread Safety
///
/// The map is behind one `RwLock`. Lookups take the read side, mutations the
/// write side, and no reference into the map escapes a guard: callers always
/// receive owned clones. Operations are therefore linearizable.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<HashMap<UserId, User>>,
}

impl UserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with `users`.
    ///
    /// Later entries overwrite earlier ones with the same id.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map: HashMap<UserId, User> = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: RwLock::new(map),
        }
    }

    /// Insert or replace the record at `user.id`
    pub fn put(&self, user: User) -> RegistryResult<PutOutcome> {
        let mut users = self.users.write().map_err(poisoned)?;
        match users.insert(user.id, user) {
            Some(_) => Ok(PutOutcome::Replaced),
            None => Ok(PutOutcome::Created),
        }
    }

    /// Look up a record by id
    pub fn get(&self, id: UserId) -> RegistryResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(&id).cloned())
    }

    /// Remove and return the record at `id`
    pub fn delete(&self, id: UserId) -> RegistryResult<Option<User>> {
        let mut users = self.users.write().map_err(poisoned)?;
        Ok(users.remove(&id))
    }

    /// Take a consistent point-in-time copy of every record, ordered by id
    pub fn list(&self) -> RegistryResult<UserSnapshot> {
        let users = self.users.read().map_err(poisoned)?;
        let mut records: Vec<User> = users.values().cloned().collect();
        drop(users);

        records.sort_by_key(|u| u.id);
        Ok(UserSnapshot { records })
    }

    pub fn len(&self) -> RegistryResult<usize> {
        Ok(self.users.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> RegistryResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
impl UserRegistry {
    /// Poison the lock by panicking while holding the write guard
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.users.write();
            panic!("poisoning registry lock");
        }));
    }
}

fn poisoned<T>(_: PoisonError<T>) -> RegistryError {
    RegistryError::LockPoisoned
}

/// Snapshot of the registry returned by [`UserRegistry::list`]
///
/// Finite and restartable: `iter()` can be called any number of times and
/// always yields the same records in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSnapshot {
    records: Vec<User>,
}

impl UserSnapshot {
    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_vec(self) -> Vec<User> {
        self.records
    }
}

impl IntoIterator for UserSnapshot {
    type Item = User;
    type IntoIter = std::vec::IntoIter<User>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a UserSnapshot {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn user(id: UserId, name: &str) -> User {
        User::new(id, name, format!("{}@example.com", name.to_lowercase()))
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = UserRegistry::new();
        assert!(registry.is_empty().unwrap());
        assert_eq!(registry.len().unwrap(), 0);
    }

    #[test]
    fn test_put_then_get() {
        let registry = UserRegistry::new();
        let alice = user(1, "Alice");

        assert_eq!(registry.put(alice.clone()).unwrap(), PutOutcome::Created);
        assert_eq!(registry.get(1).unwrap(), Some(alice));
    }

    #[test]
    fn test_get_absent_id() {
        let registry = UserRegistry::new();
        registry.put(user(1, "Alice")).unwrap();

        assert_eq!(registry.get(2).unwrap(), None);
    }

    #[test]
    fn test_put_overwrites_whole_record() {
        let registry = UserRegistry::new();
        registry.put(User::new(1, "Alice", "alice@example.com")).unwrap();

        let outcome = registry.put(User::new(1, "Alicia", "alicia@example.org")).unwrap();
        assert_eq!(outcome, PutOutcome::Replaced);

        let stored = registry.get(1).unwrap().unwrap();
        assert_eq!(stored.name, "Alicia");
        assert_eq!(stored.email, "alicia@example.org");
        assert_eq!(registry.len().unwrap(), 1);
    }

    #[test]
    fn test_delete() {
        let registry = UserRegistry::new();
        registry.put(user(1, "Alice")).unwrap();

        assert_eq!(registry.delete(1).unwrap(), Some(user(1, "Alice")));
        assert_eq!(registry.delete(1).unwrap(), None);
        assert_eq!(registry.get(1).unwrap(), None);
    }

    #[test]
    fn test_list_is_ordered_and_restartable() {
        let registry = UserRegistry::with_users(vec![user(3, "Carol"), user(1, "Alice"), user(2, "Bob")]);

        let snapshot = registry.list().unwrap();
        let first: Vec<UserId> = snapshot.iter().map(|u| u.id).collect();
        let second: Vec<UserId> = (&snapshot).into_iter().map(|u| u.id).collect();

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_list_is_detached_from_later_writes() {
        let registry = UserRegistry::new();
        registry.put(user(1, "Alice")).unwrap();

        let snapshot = registry.list().unwrap();
        registry.put(user(2, "Bob")).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.list().unwrap().len(), 2);
    }

    #[test]
    fn test_with_users_last_wins() {
        let registry = UserRegistry::with_users(vec![user(1, "Alice"), user(1, "Bob")]);
        assert_eq!(registry.get(1).unwrap().unwrap().name, "Bob");
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let registry = Arc::new(UserRegistry::new());

        let reg = Arc::clone(&registry);
        let result = thread::spawn(move || {
            let _guard = reg.users.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(result.is_err());
        assert!(registry.users.is_poisoned());

        assert_eq!(registry.get(1), Err(RegistryError::LockPoisoned));
        assert_eq!(registry.put(user(1, "Alice")), Err(RegistryError::LockPoisoned));
        assert_eq!(registry.list(), Err(RegistryError::LockPoisoned));
    }

    #[test]
    fn test_poison_helper() {
        let registry = UserRegistry::new();
        registry.poison();
        assert_eq!(registry.len(), Err(RegistryError::LockPoisoned));
    }
}
