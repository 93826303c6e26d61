//! Server-rendered HTML pages.

use crate::backend::model::PersonForm;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// Percent-encodes a value for use after `?id=`.
pub fn query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn age_text(age: Option<i32>) -> String {
    age.map(|a| a.to_string()).unwrap_or_default()
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n\
         <body>\n<h1>{}</h1>\n{}\n<p><a href=\"/\">Home</a></p>\n</body>\n</html>\n",
        encode_text(title),
        encode_text(title),
        body
    )
}

pub fn home() -> String {
    page(
        "Person records",
        "<ul>\n\
         <li><a href=\"/test\">Save test record</a></li>\n\
         <li><a href=\"/save\">Add a person</a></li>\n\
         <li><a href=\"/select\">Look up a person</a></li>\n\
         <li><a href=\"/delete\">Delete a person</a></li>\n\
         <li><a href=\"/selectAll\">All persons</a></li>\n\
         </ul>",
    )
}

fn person_fields(person: Option<&PersonForm>, id_readonly: bool) -> String {
    let (id, name, age) = match person {
        Some(p) => (
            encode_double_quoted_attribute(&p.id).into_owned(),
            encode_double_quoted_attribute(&p.name).into_owned(),
            age_text(p.age),
        ),
        None => (String::new(), String::new(), String::new()),
    };
    let readonly = if id_readonly { " readonly" } else { "" };
    format!(
        "<p>ID <input type=\"text\" name=\"id\" value=\"{id}\" maxlength=\"30\"{readonly}></p>\n\
         <p>Name <input type=\"text\" name=\"name\" value=\"{name}\" maxlength=\"50\"></p>\n\
         <p>Age <input type=\"number\" name=\"age\" value=\"{age}\"></p>"
    )
}

pub fn input_form() -> String {
    let body = format!(
        "<form method=\"post\" action=\"/save\">\n{}\n<p><input type=\"submit\" value=\"Save\"></p>\n</form>",
        person_fields(None, false)
    );
    page("Add a person", &body)
}

fn id_form(action: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <p>ID <input type=\"text\" name=\"id\"></p>\n\
         <p><input type=\"submit\" value=\"{submit}\"></p>\n</form>"
    )
}

pub fn select_form() -> String {
    page("Look up a person", &id_form("/select", "Look up"))
}

pub fn delete_form() -> String {
    page("Delete a person", &id_form("/delete", "Delete"))
}

fn no_such_person(id: &str) -> String {
    format!("<p class=\"missing\">No person with id '{}'.</p>", encode_text(id))
}

/// Shared by `POST /select`, `GET /view` and `GET /info/{id}`.
pub fn record(id: &str, person: Option<&PersonForm>) -> String {
    let body = match person {
        Some(p) => format!(
            "<table>\n<tr><th>ID</th><td>{}</td></tr>\n<tr><th>Name</th><td>{}</td></tr>\n\
             <tr><th>Age</th><td>{}</td></tr>\n</table>\n\
             <p><a href=\"/update?id={}\">Edit</a></p>",
            encode_text(&p.id),
            encode_text(&p.name),
            age_text(p.age),
            query_value(&p.id)
        ),
        None => no_such_person(id),
    };
    page("Person", &body)
}

/// The message line of the delete-result page.
pub fn delete_message(id: &str, deleted: bool) -> String {
    if deleted {
        format!("{id} has been deleted")
    } else {
        format!("{id} is not a valid id")
    }
}

pub fn delete_result(id: &str, deleted: bool) -> String {
    let body = format!("<p>{}</p>", encode_text(&delete_message(id, deleted)));
    page("Delete", &body)
}

/// List view. `deleted_id` is set by the delete-and-relist page.
pub fn list(persons: &[PersonForm], deleted_id: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(id) = deleted_id {
        let _ = writeln!(body, "<p>Requested deletion of '{}'.</p>", encode_text(id));
    }
    if persons.is_empty() {
        body.push_str("<p>No persons stored.</p>");
        return page("All persons", &body);
    }
    body.push_str("<table>\n<tr><th>ID</th><th>Name</th><th>Age</th><th></th></tr>\n");
    for p in persons {
        let q = query_value(&p.id);
        let _ = writeln!(
            body,
            "<tr><td><a href=\"/view?id={q}\">{}</a></td><td>{}</td><td>{}</td>\
             <td><a href=\"/update?id={q}\">Edit</a> <a href=\"/part_delete?id={q}\">Delete</a></td></tr>",
            encode_text(&p.id),
            encode_text(&p.name),
            age_text(p.age)
        );
    }
    body.push_str("</table>");
    page("All persons", &body)
}

/// Edit form pre-filled with the stored record.
pub fn update_form(id: &str, person: Option<&PersonForm>) -> String {
    let body = match person {
        Some(p) => format!(
            "<form method=\"post\" action=\"/update\">\n{}\n<p><input type=\"submit\" value=\"Update\"></p>\n</form>",
            person_fields(Some(p), true)
        ),
        None => no_such_person(id),
    };
    page("Edit person", &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    page(title, &format!("<p class=\"error\">{}</p>", encode_text(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kim() -> PersonForm {
        PersonForm {
            id: "abcde".to_string(),
            name: "Kim".to_string(),
            age: Some(30),
        }
    }

    #[test]
    fn test_text_content_is_escaped() {
        let html = error_page("Oops", "<b>\"x\" & 'y'</b>");
        assert!(html.contains("<p class=\"error\">&lt;b&gt;\"x\" &amp; 'y'&lt;/b&gt;</p>"));
    }

    #[test]
    fn test_attribute_values_escape_quotes() {
        let mut p = kim();
        p.name = "Kim \"K\" <3".to_string();
        let html = update_form("abcde", Some(&p));
        assert!(html.contains("name=\"name\" value=\"Kim &quot;K&quot; &lt;3\""));
    }

    #[test]
    fn test_query_value_encodes_reserved() {
        assert_eq!(query_value("a b&c"), "a+b%26c");
    }

    #[test]
    fn test_delete_messages() {
        assert_eq!(delete_message("abc", true), "abc has been deleted");
        assert_eq!(delete_message("abc", false), "abc is not a valid id");
    }

    #[test]
    fn test_record_page_variants() {
        let found = record("abcde", Some(&kim()));
        assert!(found.contains("<td>Kim</td>"));
        assert!(found.contains("/update?id=abcde"));

        let missing = record("<x>", None);
        assert!(missing.contains("No person with id '&lt;x&gt;'."));
    }

    #[test]
    fn test_update_form_prefills_and_locks_id() {
        let html = update_form("abcde", Some(&kim()));
        assert!(html.contains("name=\"id\" value=\"abcde\" maxlength=\"30\" readonly"));
        assert!(html.contains("name=\"age\" value=\"30\""));
    }

    #[test]
    fn test_list_escapes_names() {
        let mut p = kim();
        p.name = "<script>".to_string();
        let html = list(&[p], Some("gone"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Requested deletion of 'gone'."));
    }
}
