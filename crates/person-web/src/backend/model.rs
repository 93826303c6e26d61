use serde::{Deserialize, Serialize};

/// Maximum length of `id`, in characters.
pub const ID_MAX_CHARS: usize = 30;
/// Maximum length of `name`, in characters.
pub const NAME_MAX_CHARS: usize = 50;

/// A stored person record. `id` is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub age: Option<i32>,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: Option<i32>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
        }
    }
}

/// Wire-facing shape, as submitted by and rendered into the HTML forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonForm {
    pub id: String,
    pub name: String,
    pub age: Option<i32>,
}

impl From<PersonForm> for Person {
    fn from(form: PersonForm) -> Self {
        Person {
            id: form.id,
            name: form.name,
            age: form.age,
        }
    }
}

impl From<Person> for PersonForm {
    fn from(person: Person) -> Self {
        PersonForm {
            id: person.id,
            name: person.name,
            age: person.age,
        }
    }
}
