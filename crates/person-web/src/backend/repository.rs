use super::model::{Person, ID_MAX_CHARS, NAME_MAX_CHARS};
use crate::error::{StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Keyed storage for person records.
///
/// Every call is atomic on its own; callers composing several calls
/// (check-then-delete, read-modify-write) get no isolation across them.
pub trait PersonRepository: Send + Sync {
    fn exists(&self, id: &str) -> StoreResult<bool>;
    fn get(&self, id: &str) -> StoreResult<Option<Person>>;
    /// Iteration order is unspecified.
    fn get_all(&self) -> StoreResult<Vec<Person>>;
    /// Inserts, or fully overwrites the record with the same id.
    fn put(&self, person: Person) -> StoreResult<()>;
    /// Removes the record if present. Missing ids are a no-op.
    fn delete_by_id(&self, id: &str) -> StoreResult<()>;
}

#[derive(Default)]
pub struct InMemoryRepository {
    inner: Mutex<HashMap<String, Person>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&self, records: Vec<Person>) -> StoreResult<()> {
        for record in &records {
            check_constraints(record)?;
        }
        let mut map = self.map()?;
        map.clear();
        for record in records {
            map.insert(record.id.clone(), record);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> StoreResult<Vec<Person>> {
        Ok(self.map()?.values().cloned().collect())
    }

    fn map(&self) -> StoreResult<MutexGuard<'_, HashMap<String, Person>>> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl PersonRepository for InMemoryRepository {
    fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.map()?.contains_key(id))
    }

    fn get(&self, id: &str) -> StoreResult<Option<Person>> {
        Ok(self.map()?.get(id).cloned())
    }

    fn get_all(&self) -> StoreResult<Vec<Person>> {
        self.snapshot()
    }

    fn put(&self, person: Person) -> StoreResult<()> {
        check_constraints(&person)?;
        self.map()?.insert(person.id.clone(), person);
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        self.map()?.remove(id);
        Ok(())
    }
}

/// Column rules of the `person` table: id 1..=30 chars, name 1..=50 chars.
fn check_constraints(person: &Person) -> StoreResult<()> {
    check_length("id", &person.id, ID_MAX_CHARS)?;
    check_length("name", &person.name, NAME_MAX_CHARS)
}

fn check_length(field: &'static str, value: &str, max: usize) -> StoreResult<()> {
    let len = value.chars().count();
    if len == 0 {
        return Err(StoreError::Constraint {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    if len > max {
        return Err(StoreError::Constraint {
            field,
            reason: format!("{len} characters exceeds the limit of {max}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_is_upsert() {
        let repo = InMemoryRepository::new();
        repo.put(Person::new("a", "first", Some(1))).unwrap();
        repo.put(Person::new("a", "second", None)).unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 1);
        assert_eq!(repo.get("a").unwrap(), Some(Person::new("a", "second", None)));
    }

    #[test]
    fn test_get_missing_is_none() {
        let repo = InMemoryRepository::new();
        assert!(!repo.exists("nope").unwrap());
        assert_eq!(repo.get("nope").unwrap(), None);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let repo = InMemoryRepository::new();
        repo.put(Person::new("a", "x", None)).unwrap();

        repo.delete_by_id("b").unwrap();
        assert_eq!(repo.get_all().unwrap().len(), 1);

        repo.delete_by_id("a").unwrap();
        repo.delete_by_id("a").unwrap();
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_put_rejects_out_of_range_columns() {
        let repo = InMemoryRepository::new();

        let empty_id = repo.put(Person::new("", "x", None)).unwrap_err();
        assert!(matches!(empty_id, StoreError::Constraint { field: "id", .. }));

        let long_id = "i".repeat(ID_MAX_CHARS + 1);
        let err = repo.put(Person::new(long_id, "x", None)).unwrap_err();
        assert!(matches!(err, StoreError::Constraint { field: "id", .. }));

        let err = repo.put(Person::new("a", "", None)).unwrap_err();
        assert!(matches!(err, StoreError::Constraint { field: "name", .. }));

        let long_name = "n".repeat(NAME_MAX_CHARS + 1);
        let err = repo.put(Person::new("a", long_name, None)).unwrap_err();
        assert!(matches!(err, StoreError::Constraint { field: "name", .. }));

        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_put_accepts_inclusive_bounds() {
        let repo = InMemoryRepository::new();
        let max_id = "i".repeat(ID_MAX_CHARS);
        repo.put(Person::new(max_id.clone(), "n", None)).unwrap();
        repo.put(Person::new("j", "m".repeat(NAME_MAX_CHARS), Some(0)))
            .unwrap();

        assert_eq!(repo.get(&max_id).unwrap().unwrap().name, "n");
        assert_eq!(repo.get("j").unwrap().unwrap().name.len(), NAME_MAX_CHARS);
    }

    #[test]
    fn test_replace_all_rejects_bad_snapshot_without_touching_contents() {
        let repo = InMemoryRepository::new();
        repo.put(Person::new("keep", "K", Some(1))).unwrap();

        let err = repo
            .replace_all(vec![
                Person::new("a", "A", None),
                Person::new("b", "", None),
                Person::new("c", "C", None),
            ])
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint { field: "name", .. }));
        assert_eq!(
            repo.snapshot().unwrap(),
            vec![Person::new("keep", "K", Some(1))]
        );
    }

    #[test]
    fn test_limits_count_characters_not_bytes() {
        let repo = InMemoryRepository::new();
        // 50 Hangul syllables are 150 bytes in UTF-8.
        let name = "김".repeat(NAME_MAX_CHARS);
        repo.put(Person::new("kor", name.clone(), None)).unwrap();
        assert_eq!(repo.get("kor").unwrap().unwrap().name, name);
    }

    #[test]
    fn test_replace_all_and_snapshot() {
        let repo = InMemoryRepository::new();
        repo.put(Person::new("old", "x", None)).unwrap();

        repo.replace_all(vec![
            Person::new("a", "A", Some(1)),
            Person::new("b", "B", None),
        ])
        .unwrap();

        let mut ids: Vec<String> = repo.snapshot().unwrap().into_iter().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
