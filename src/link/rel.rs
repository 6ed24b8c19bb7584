//! Well-known link relations.
//!
//! This vocabulary is the navigable surface of a GEDCOM X API: every
//! transition a state offers is keyed by one of these names. The values must
//! match the server's exactly.

/// The resource itself.
pub const SELF: &str = "self";
/// Next page of a paged resource.
pub const NEXT: &str = "next";
/// Previous page of a paged resource.
pub const PREVIOUS: &str = "previous";
/// Alternate name for the previous page.
pub const PREV: &str = "prev";
/// First page of a paged resource.
pub const FIRST: &str = "first";
/// Last page of a paged resource.
pub const LAST: &str = "last";

/// An agent (contributor, repository, ...).
pub const AGENT: &str = "agent";
/// Ancestry (pedigree) of a person.
pub const ANCESTRY: &str = "ancestry";
/// Artifacts (uploaded media) attached to a resource.
pub const ARTIFACTS: &str = "artifacts";
/// Relationships in which a person is the parent.
pub const CHILD_RELATIONSHIPS: &str = "child-relationships";
/// Children of a person, or of a place.
pub const CHILDREN: &str = "children";
/// The collection a resource belongs to.
pub const COLLECTION: &str = "collection";
/// A list of collections.
pub const COLLECTIONS: &str = "collections";
/// Sub-collections of a collection.
pub const SUBCOLLECTIONS: &str = "subcollections";
/// A single conclusion (name, fact, gender).
pub const CONCLUSION: &str = "conclusion";
/// All conclusions of a subject.
pub const CONCLUSIONS: &str = "conclusions";
/// Person record of the authenticated user.
pub const CURRENT_USER_PERSON: &str = "current-user-person";
/// Resources submitted by the authenticated user.
pub const CURRENT_USER_RESOURCES: &str = "current-user-resources";
/// Descendancy of a person.
pub const DESCENDANCY: &str = "descendancy";
/// A description (source or place).
pub const DESCRIPTION: &str = "description";
/// A single evidence reference.
pub const EVIDENCE_REFERENCE: &str = "evidence-reference";
/// Evidence references of a subject.
pub const EVIDENCE_REFERENCES: &str = "evidence-references";
/// Possible duplicates of a person.
pub const MATCHES: &str = "matches";
/// Persons declared as not matching.
pub const NOT_A_MATCH: &str = "non-matches";
/// A single media reference.
pub const MEDIA_REFERENCE: &str = "media-reference";
/// Media references of a subject.
pub const MEDIA_REFERENCES: &str = "media-references";
/// A single note.
pub const NOTE: &str = "note";
/// Notes of a subject.
pub const NOTES: &str = "notes";
/// Relationships in which a person is the child.
pub const PARENT_RELATIONSHIPS: &str = "parent-relationships";
/// Parents of a person.
pub const PARENTS: &str = "parents";
/// A person (href or `{pid}` template).
pub const PERSON: &str = "person";
/// First participant of a relationship.
pub const PERSON1: &str = "person1";
/// Second participant of a relationship.
pub const PERSON2: &str = "person2";
/// Person search endpoint (template).
pub const PERSON_SEARCH: &str = "person-search";
/// Person together with its immediate relationships.
pub const PERSON_WITH_RELATIONSHIPS: &str = "person-with-relationships";
/// Persons of a collection.
pub const PERSONS: &str = "persons";
/// A place.
pub const PLACE: &str = "place";
/// A place description (href or `{pid}` template).
pub const PLACE_DESCRIPTION: &str = "place-description";
/// Place search endpoint (template).
pub const PLACE_SEARCH: &str = "place-search";
/// Places of a collection.
pub const PLACES: &str = "places";
/// Profile of the authenticated user.
pub const PROFILE: &str = "profile";
/// A record.
pub const RECORD: &str = "record";
/// Records of a collection.
pub const RECORDS: &str = "records";
/// A relationship.
pub const RELATIONSHIP: &str = "relationship";
/// Relationships of a collection.
pub const RELATIONSHIPS: &str = "relationships";
/// A source description.
pub const SOURCE_DESCRIPTION: &str = "source-description";
/// Source descriptions of a collection.
pub const SOURCE_DESCRIPTIONS: &str = "source-descriptions";
/// A single source reference.
pub const SOURCE_REFERENCE: &str = "source-reference";
/// Source references of a subject.
pub const SOURCE_REFERENCES: &str = "source-references";
/// Query for the references attached to a source.
pub const SOURCE_REFERENCES_QUERY: &str = "source-references-query";
/// Couple relationships of a person.
pub const SPOUSE_RELATIONSHIPS: &str = "spouse-relationships";
/// Spouses of a person.
pub const SPOUSES: &str = "spouses";
/// A single discussion reference.
pub const DISCUSSION_REFERENCE: &str = "discussion-reference";
/// Discussion references of a person.
pub const DISCUSSION_REFERENCES: &str = "discussion-references";

/// Preferred couple relationship of a person for the current user.
pub const PREFERRED_SPOUSE_RELATIONSHIP: &str = "preferred-spouse-relationship";
/// Preferred parent relationship of a person for the current user.
pub const PREFERRED_PARENT_RELATIONSHIP: &str = "preferred-parent-relationship";
/// Father role of a child-and-parents relationship.
pub const FATHER_ROLE: &str = "father-role";
/// Mother role of a child-and-parents relationship.
pub const MOTHER_ROLE: &str = "mother-role";
/// Father of a child-and-parents relationship.
pub const FATHER: &str = "father";
/// Mother of a child-and-parents relationship.
pub const MOTHER: &str = "mother";
/// Child of a child-and-parents relationship.
pub const CHILD: &str = "child";

/// OAuth2 authorization endpoint.
pub const OAUTH2_AUTHORIZE: &str = "http://oauth.net/core/2.0/endpoint/authorize";
/// OAuth2 token endpoint.
pub const OAUTH2_TOKEN: &str = "http://oauth.net/core/2.0/endpoint/token";
