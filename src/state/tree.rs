//! Pedigree and descendancy views.
//!
//! Ancestry results number each person with an Ahnentafel ascendancy number:
//! the root is `1` and the parents of `n` are `2n` (father) and `2n + 1`
//! (mother). Descendancy results use d'Aboville numbers: the root is `1`, its
//! children `1.1`, `1.2`, ..., and the spouse of `1.2` is `1.2-S`.

use super::kind::PersonKind;
use super::option::StateTransitionOption;
use super::{AncestryResultsState, DescendancyResultsState, PersonState};
use crate::error::Result;
use crate::link::rel;
use crate::model::Person;
use std::collections::BTreeMap;

/// Persons of a pedigree keyed by ascendancy number.
#[derive(Debug, Clone, Default)]
pub struct AncestryTree {
    persons: BTreeMap<u32, Person>,
}

impl AncestryTree {
    /// Index `persons` by the ascendancy number of their display properties.
    ///
    /// Persons without a numeric ascendancy number are left out.
    pub fn new<'a>(persons: impl IntoIterator<Item = &'a Person>) -> Self {
        let persons = persons
            .into_iter()
            .filter_map(|p| {
                let number = p.display.as_ref()?.ascendancy_number.as_deref()?;
                Some((number.trim().parse().ok()?, p.clone()))
            })
            .collect();
        AncestryTree { persons }
    }

    /// The person the pedigree starts from.
    pub fn root(&self) -> Option<AncestryNode<'_>> {
        self.node(1)
    }

    /// The node with ascendancy `number`.
    pub fn node(&self, number: u32) -> Option<AncestryNode<'_>> {
        self.persons.contains_key(&number).then_some(AncestryNode { tree: self, number })
    }

    /// The person with ascendancy `number`.
    pub fn person(&self, number: u32) -> Option<&Person> {
        self.persons.get(&number)
    }

    /// Number of persons in the pedigree.
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    /// Whether the pedigree is empty.
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}

/// One position in an [`AncestryTree`].
#[derive(Debug, Clone, Copy)]
pub struct AncestryNode<'a> {
    tree: &'a AncestryTree,
    number: u32,
}

impl<'a> AncestryNode<'a> {
    /// Ascendancy number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The person at this position.
    pub fn person(&self) -> Option<&'a Person> {
        self.tree.person(self.number)
    }

    /// The father's node.
    pub fn father(&self) -> Option<AncestryNode<'a>> {
        self.number.checked_mul(2).and_then(|n| self.tree.node(n))
    }

    /// The mother's node.
    pub fn mother(&self) -> Option<AncestryNode<'a>> {
        self.number
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .and_then(|n| self.tree.node(n))
    }
}

/// One person of a descendancy together with a spouse and children.
#[derive(Debug, Clone, PartialEq)]
pub struct DescendancyNode {
    /// d'Aboville number
    pub number: String,
    /// The descendant
    pub person: Person,
    /// The descendant's spouse, if listed
    pub spouse: Option<Person>,
    /// Children in birth order
    pub children: Vec<DescendancyNode>,
}

/// Descendants of a person.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescendancyTree {
    root: Option<DescendancyNode>,
}

impl DescendancyTree {
    /// Arrange `persons` by the descendancy number of their display
    /// properties.
    pub fn new<'a>(persons: impl IntoIterator<Item = &'a Person>) -> Self {
        let by_number: BTreeMap<String, &Person> = persons
            .into_iter()
            .filter_map(|p| {
                let number = p.display.as_ref()?.descendancy_number.as_deref()?;
                Some((number.trim().to_string(), p))
            })
            .collect();
        DescendancyTree {
            root: build_node("1", &by_number),
        }
    }

    /// The person the descendancy starts from.
    pub fn root(&self) -> Option<&DescendancyNode> {
        self.root.as_ref()
    }
}

fn build_node(number: &str, by_number: &BTreeMap<String, &Person>) -> Option<DescendancyNode> {
    let person = (*by_number.get(number)?).clone();
    let spouse_key = format!("{}-S", number);
    let spouse = by_number
        .iter()
        .find(|(key, _)| key.starts_with(&spouse_key))
        .map(|(_, p)| (*p).clone());

    let prefix = format!("{}.", number);
    let mut child_numbers: Vec<(u32, &str)> = by_number
        .keys()
        .filter_map(|key| {
            let rest = key.strip_prefix(&prefix)?;
            let ordinal = rest.parse::<u32>().ok()?;
            Some((ordinal, key.as_str()))
        })
        .collect();
    child_numbers.sort_unstable();

    let children = child_numbers
        .into_iter()
        .filter_map(|(_, key)| build_node(key, by_number))
        .collect();

    Some(DescendancyNode {
        number: number.to_string(),
        person,
        spouse,
        children,
    })
}

impl AncestryResultsState {
    /// The pedigree as a tree.
    pub fn tree(&self) -> AncestryTree {
        AncestryTree::new(self.persons())
    }

    /// Read the person with ascendancy `number`.
    pub async fn read_person(
        &self,
        number: u32,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PersonState>> {
        let tree = self.tree();
        let Some(person) = tree.person(number) else {
            return Ok(None);
        };
        self.follow_links::<PersonKind>(&person.links, &[rel::PERSON, rel::SELF], options)
            .await
    }
}

impl DescendancyResultsState {
    /// The descendancy as a tree.
    pub fn tree(&self) -> DescendancyTree {
        DescendancyTree::new(self.persons())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DisplayProperties;

    fn numbered(id: &str, ascendancy: Option<&str>, descendancy: Option<&str>) -> Person {
        Person {
            display: Some(DisplayProperties {
                ascendancy_number: ascendancy.map(str::to_string),
                descendancy_number: descendancy.map(str::to_string),
                ..Default::default()
            }),
            ..Person::with_id(id)
        }
    }

    #[test]
    fn test_ancestry_navigation() {
        let persons = vec![
            numbered("ROOT", Some("1"), None),
            numbered("FATHER", Some("2"), None),
            numbered("MOTHER", Some("3"), None),
            numbered("PGF", Some("4"), None),
            numbered("UNNUMBERED", None, None),
        ];
        let tree = AncestryTree::new(&persons);
        assert_eq!(tree.len(), 4);

        let root = tree.root().unwrap();
        let father = root.father().unwrap();
        assert_eq!(father.person().unwrap().id.as_deref(), Some("FATHER"));
        assert_eq!(root.mother().unwrap().person().unwrap().id.as_deref(), Some("MOTHER"));
        assert_eq!(father.father().unwrap().number(), 4);
        assert!(father.mother().is_none());
        assert!(root.mother().unwrap().father().is_none());
    }

    #[test]
    fn test_descendancy_tree() {
        let persons = vec![
            numbered("ROOT", None, Some("1")),
            numbered("WIFE", None, Some("1-S")),
            numbered("SECOND", None, Some("1.2")),
            numbered("FIRST", None, Some("1.1")),
            numbered("GRANDCHILD", None, Some("1.1.1")),
            numbered("TENTH", None, Some("1.10")),
        ];
        let tree = DescendancyTree::new(&persons);
        let root = tree.root().unwrap();

        assert_eq!(root.spouse.as_ref().unwrap().id.as_deref(), Some("WIFE"));
        let ids: Vec<_> = root.children.iter().map(|c| c.person.id.as_deref().unwrap()).collect();
        assert_eq!(ids, ["FIRST", "SECOND", "TENTH"]);
        assert_eq!(root.children[0].children[0].number, "1.1.1");
        assert!(root.children[1].spouse.is_none());
    }

    #[test]
    fn test_empty_descendancy() {
        assert!(DescendancyTree::new(&[]).root().is_none());
    }
}
