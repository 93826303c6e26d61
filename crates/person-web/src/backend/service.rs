//! Record service: maps between the form shape and the stored shape and
//! applies the existence checks in front of delete and update.

use super::model::{Person, PersonForm};
use super::repository::PersonRepository;
use crate::error::{ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Fixed record written by the `/test` page.
pub const TEST_PERSON_ID: &str = "abcde";
pub const TEST_PERSON_NAME: &str = "김길동";
pub const TEST_PERSON_AGE: i32 = 30;

#[derive(Clone)]
pub struct PersonService {
    repo: Arc<dyn PersonRepository>,
}

impl PersonService {
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self {
        Self { repo }
    }

    /// Writes the fixed test record, overwriting it if present.
    pub fn seed_test(&self) -> ServiceResult<()> {
        let person = Person::new(TEST_PERSON_ID, TEST_PERSON_NAME, Some(TEST_PERSON_AGE));
        self.repo.put(person)?;
        info!(id = TEST_PERSON_ID, "seeded test person");
        Ok(())
    }

    /// Saves the record. An existing record with the same id is overwritten.
    pub fn create(&self, form: PersonForm) -> ServiceResult<()> {
        let id = form.id.clone();
        self.repo.put(Person::from(form))?;
        info!(%id, "person saved");
        Ok(())
    }

    /// `None` when no record has this id.
    pub fn fetch(&self, id: &str) -> ServiceResult<Option<PersonForm>> {
        let found = self.repo.get(id)?;
        debug!(%id, found = found.is_some(), "person lookup");
        Ok(found.map(PersonForm::from))
    }

    /// Returns whether a record was actually deleted.
    pub fn remove(&self, id: &str) -> ServiceResult<bool> {
        if !self.repo.exists(id)? {
            debug!(%id, "delete skipped, no such person");
            return Ok(false);
        }
        self.repo.delete_by_id(id)?;
        info!(%id, "person deleted");
        Ok(true)
    }

    pub fn list_all(&self) -> ServiceResult<Vec<PersonForm>> {
        let persons = self.repo.get_all()?;
        Ok(persons.into_iter().map(PersonForm::from).collect())
    }

    /// Overwrites `name` and `age` of an existing record; `id` never changes.
    ///
    /// The submitted values are copied as-is, so an absent `age` clears a
    /// previously stored one.
    pub fn modify(&self, form: PersonForm) -> ServiceResult<()> {
        let mut person = self
            .repo
            .get(&form.id)?
            .ok_or_else(|| ServiceError::NotFound(form.id.clone()))?;
        person.name = form.name;
        person.age = form.age;
        let id = person.id.clone();
        self.repo.put(person)?;
        info!(%id, "person updated");
        Ok(())
    }
}
