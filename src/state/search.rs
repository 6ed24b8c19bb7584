//! Person search, duplicate matching and place search.
//!
//! Search endpoints are URI templates taking a single `q` variable made of
//! `name:value` terms:
//!
//! ```
//! use gedcomx_client::state::SearchQuery;
//!
//! let q = SearchQuery::new().given_name("John").surname("Smith").birth_place("St. Louis").build();
//! assert_eq!(q, r#"givenName:John surname:Smith birthLikePlace:"St. Louis""#);
//! ```

use super::kind::{PersonKind, PlaceDescriptionKind};
use super::option::StateTransitionOption;
use super::{
    PersonMatchResultsState, PersonSearchResultsState, PersonState, PlaceDescriptionState,
    PlaceSearchResultsState,
};
use crate::error::Result;
use crate::link::{rel, Links};
use crate::model::{Entry, Gedcomx, Person};
use crate::protocol::constants::media_types;
use http::Method;

/// Builder for the `q` parameter of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<(String, String)>,
}

impl SearchQuery {
    /// Empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary `name:value` term.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.terms.push((name.into(), value.into()));
        self
    }

    /// Full name.
    pub fn name(self, value: impl Into<String>) -> Self {
        self.param("name", value)
    }

    /// Given name.
    pub fn given_name(self, value: impl Into<String>) -> Self {
        self.param("givenName", value)
    }

    /// Surname.
    pub fn surname(self, value: impl Into<String>) -> Self {
        self.param("surname", value)
    }

    /// Gender.
    pub fn gender(self, value: impl Into<String>) -> Self {
        self.param("gender", value)
    }

    /// Birth or christening date.
    pub fn birth_date(self, value: impl Into<String>) -> Self {
        self.param("birthLikeDate", value)
    }

    /// Birth or christening place.
    pub fn birth_place(self, value: impl Into<String>) -> Self {
        self.param("birthLikePlace", value)
    }

    /// Death or burial date.
    pub fn death_date(self, value: impl Into<String>) -> Self {
        self.param("deathLikeDate", value)
    }

    /// Death or burial place.
    pub fn death_place(self, value: impl Into<String>) -> Self {
        self.param("deathLikePlace", value)
    }

    /// Marriage date.
    pub fn marriage_date(self, value: impl Into<String>) -> Self {
        self.param("marriageLikeDate", value)
    }

    /// Marriage place.
    pub fn marriage_place(self, value: impl Into<String>) -> Self {
        self.param("marriageLikePlace", value)
    }

    /// Father's full name.
    pub fn father_name(self, value: impl Into<String>) -> Self {
        self.param("fatherName", value)
    }

    /// Mother's full name.
    pub fn mother_name(self, value: impl Into<String>) -> Self {
        self.param("motherName", value)
    }

    /// Spouse's full name.
    pub fn spouse_name(self, value: impl Into<String>) -> Self {
        self.param("spouseName", value)
    }

    /// Whether no term has been added.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The query string; values with whitespace are quoted.
    pub fn build(&self) -> String {
        self.terms
            .iter()
            .map(|(name, value)| format!("{}:{}", name, quote(value)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote(value: &str) -> String {
    if value.chars().any(char::is_whitespace) || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

fn entry_links(entry: &Entry) -> Links {
    let mut links = entry.links.clone();
    if let Some(gedcomx) = entry.gedcomx() {
        if let Some(person) = gedcomx.persons.first() {
            links.merge(&person.links);
        }
        if let Some(place) = gedcomx.places.first() {
            links.merge(&place.links);
        }
    }
    links
}

impl PersonSearchResultsState {
    /// Read the person behind a search result.
    pub async fn read_person(&self, entry: &Entry, options: &[&dyn StateTransitionOption]) -> Result<Option<PersonState>> {
        self.follow_links::<PersonKind>(&entry_links(entry), &[rel::PERSON, rel::SELF], options)
            .await
    }
}

impl PersonMatchResultsState {
    /// Read the person behind a match.
    pub async fn read_person(&self, entry: &Entry, options: &[&dyn StateTransitionOption]) -> Result<Option<PersonState>> {
        self.follow_links::<PersonKind>(&entry_links(entry), &[rel::PERSON, rel::SELF], options)
            .await
    }

    /// Declare that `entry` is not a duplicate of the person.
    pub async fn add_non_match(
        &self,
        entry: &Entry,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonMatchResultsState> {
        let url = self.required_link(rel::NOT_A_MATCH, "add non-match")?;
        let id = entry.id.clone().unwrap_or_default();
        let document = Gedcomx {
            persons: vec![Person::with_id(id)],
            ..Default::default()
        };
        let request = self
            .create_request(Method::POST, url)?
            .accept(media_types::GEDCOMX_JSON)?
            .content_type(media_types::GEDCOMX_JSON)?
            .json(&document)?;
        self.invoke(request, options).await
    }
}

impl PlaceSearchResultsState {
    /// Read the place description behind a search result.
    pub async fn read_place_description(
        &self,
        entry: &Entry,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PlaceDescriptionState>> {
        let rels = [rel::DESCRIPTION, rel::PLACE_DESCRIPTION, rel::SELF];
        self.follow_links::<PlaceDescriptionKind>(&entry_links(entry), &rels, options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_quotes_whitespace() {
        let q = SearchQuery::new()
            .name("John Smith")
            .gender("Male")
            .death_date("1 Jan 1900")
            .build();
        assert_eq!(q, r#"name:"John Smith" gender:Male deathLikeDate:"1 Jan 1900""#);
    }

    #[test]
    fn test_build_escapes_quotes() {
        let q = SearchQuery::new().param("name", r#"John "Jack" Smith"#).build();
        assert_eq!(q, r#"name:"John \"Jack\" Smith""#);
    }

    #[test]
    fn test_empty_query() {
        let query = SearchQuery::new();
        assert!(query.is_empty());
        assert_eq!(query.build(), "");
    }

    #[test]
    fn test_entry_links_include_embedded_person() {
        let entry: Entry = serde_json::from_str(
            r#"{
                "id": "P1",
                "content": {"gedcomx": {"persons": [{"id": "P1",
                    "links": {"person": {"href": "https://example.com/persons/P1"}}}]}}
            }"#,
        )
        .unwrap();
        let links = entry_links(&entry);
        assert_eq!(
            links.get(rel::PERSON).unwrap().href.as_deref(),
            Some("https://example.com/persons/P1")
        );
    }
}
