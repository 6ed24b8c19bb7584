//! Conclusions: names, facts and gender.

use super::common::{impl_linked, Attribution, SourceReference};
use super::Embed;
use crate::link::{Linked, Links};
use serde::{Deserialize, Serialize};

/// Type URIs for common name and fact types.
pub mod types {
    /// Birth fact
    pub const BIRTH: &str = "http://gedcomx.org/Birth";
    /// Death fact
    pub const DEATH: &str = "http://gedcomx.org/Death";
    /// Marriage fact
    pub const MARRIAGE: &str = "http://gedcomx.org/Marriage";
    /// Male gender
    pub const MALE: &str = "http://gedcomx.org/Male";
    /// Female gender
    pub const FEMALE: &str = "http://gedcomx.org/Female";
    /// Unknown gender
    pub const UNKNOWN: &str = "http://gedcomx.org/Unknown";
    /// Birth name
    pub const BIRTH_NAME: &str = "http://gedcomx.org/BirthName";
    /// Given name part
    pub const GIVEN: &str = "http://gedcomx.org/Given";
    /// Surname part
    pub const SURNAME: &str = "http://gedcomx.org/Surname";
    /// Couple relationship
    pub const COUPLE: &str = "http://gedcomx.org/Couple";
    /// Parent-child relationship
    pub const PARENT_CHILD: &str = "http://gedcomx.org/ParentChild";
}

/// A name of a person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name type URI
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub name_type: Option<String>,
    /// Renditions of the name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_forms: Vec<NameForm>,
    /// Whether this is the preferred name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred: Option<bool>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Name {
    /// Name with a single form carrying `text` as its full text.
    pub fn full_text(text: impl Into<String>) -> Self {
        Name {
            name_forms: vec![NameForm {
                full_text: Some(text.into()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Full text of the first name form.
    pub fn text(&self) -> Option<&str> {
        self.name_forms.first().and_then(|f| f.full_text.as_deref())
    }
}

/// One rendition of a name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameForm {
    /// Language of the rendition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// The whole name as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    /// Parts of the name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<NamePart>,
}

/// A typed piece of a name form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePart {
    /// Part type URI (given, surname, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub part_type: Option<String>,
    /// The text of the part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A date as recorded and in standard form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    /// As written in the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    /// Formal GEDCOM X date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formal: Option<String>,
}

/// A place as recorded, optionally linked to a place description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceReference {
    /// As written in the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    /// URI of the place description
    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    pub description_ref: Option<String>,
}

/// An event or characteristic of a person or relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Fact type URI
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub fact_type: Option<String>,
    /// When it happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    /// Where it happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<PlaceReference>,
    /// Value of a characteristic (occupation title, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether this is the primary fact of its type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    /// Sources of this fact
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Fact {
    /// Fact of `fact_type` with an original date and place.
    pub fn new(fact_type: impl Into<String>, date: Option<&str>, place: Option<&str>) -> Self {
        Fact {
            fact_type: Some(fact_type.into()),
            date: date.map(|d| Date {
                original: Some(d.to_string()),
                formal: None,
            }),
            place: place.map(|p| PlaceReference {
                original: Some(p.to_string()),
                description_ref: None,
            }),
            ..Default::default()
        }
    }
}

/// Gender of a person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gender {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Gender type URI
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub gender_type: Option<String>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Gender {
    /// Gender of `gender_type`.
    pub fn new(gender_type: impl Into<String>) -> Self {
        Gender {
            gender_type: Some(gender_type.into()),
            ..Default::default()
        }
    }
}

impl_linked!(Name, Fact, Gender);

impl Embed for Name {
    fn embed(&mut self, other: Self) {
        self.links.merge(&other.links);
    }
}

impl Embed for Fact {
    fn embed(&mut self, other: Self) {
        self.links.merge(&other.links);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_json_shape() {
        let fact = Fact::new(types::BIRTH, Some("3 Jan 1900"), None);
        let json = serde_json::to_value(&fact).unwrap();
        assert_eq!(json["type"], types::BIRTH);
        assert_eq!(json["date"]["original"], "3 Jan 1900");
        assert!(json.get("place").is_none());
        assert!(json.get("links").is_none());
    }

    #[test]
    fn test_name_text() {
        let name: Name = serde_json::from_str(
            r#"{"nameForms":[{"fullText":"John Smith","parts":[{"type":"http://gedcomx.org/Given","value":"John"}]}]}"#,
        )
        .unwrap();
        assert_eq!(name.text(), Some("John Smith"));
        assert_eq!(name.name_forms[0].parts[0].value.as_deref(), Some("John"));
    }
}
