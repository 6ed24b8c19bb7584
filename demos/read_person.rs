//! Read a person and walk the pedigree
//!
//! Authenticates against the FamilySearch sandbox, reads one person with its
//! embedded conclusions and prints four generations of ancestors.
//!
//! Run with: cargo run --example read_person -- <username> <password> <client-id> <person-id>

use anyhow::{bail, Context};
use gedcomx_client::client::{ClientConfig, Environment, GedcomxClient};
use gedcomx_client::state::{AncestryNode, QueryParameter};
use gedcomx_client::StateFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gedcomx_client=debug".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [username, password, client_id, person_id] = args.as_slice() else {
        bail!("usage: read_person <username> <password> <client-id> <person-id>");
    };

    println!("GEDCOM X Read Person Example");
    println!("============================\n");

    let client = GedcomxClient::with_config(ClientConfig {
        enable_logging: true,
        ..Default::default()
    });
    let factory = StateFactory::with_client(client);

    let tree = factory
        .new_family_tree_state(Environment::Sandbox)
        .await?
        .if_successful()?
        .authenticate_via_oauth2_password(username, password, client_id, None)
        .await?;
    println!("Authenticated against {}", tree.self_uri()?);

    let Some(person) = tree.read_person(person_id, &[]).await? else {
        bail!("the tree does not offer a person template");
    };
    let mut person = person.if_successful()?;
    person.load_conclusions(&[]).await?;

    let details = person.person().context("no person in response")?;
    println!("Person {}", details.id.as_deref().unwrap_or("?"));
    for name in &details.names {
        println!("  name: {}", name.text().unwrap_or("?"));
    }
    for fact in &details.facts {
        let date = fact.date.as_ref().and_then(|d| d.original.as_deref());
        println!("  fact: {} {}", fact.fact_type.as_deref().unwrap_or("?"), date.unwrap_or(""));
    }

    let generations = QueryParameter::generations(4);
    match person.read_ancestry(&[&generations]).await? {
        Some(ancestry) => {
            let ancestry = ancestry.if_successful()?;
            let tree = ancestry.tree();
            println!("\nPedigree ({} persons):", tree.len());
            if let Some(root) = tree.root() {
                print_node(root, 0);
            }
        }
        None => println!("\nNo ancestry available for this person"),
    }

    Ok(())
}

fn print_node(node: AncestryNode<'_>, depth: usize) {
    let name = node
        .person()
        .and_then(|p| p.preferred_name())
        .unwrap_or("(unknown)");
    println!("{}{}. {}", "  ".repeat(depth), node.number(), name);
    if let Some(father) = node.father() {
        print_node(father, depth + 1);
    }
    if let Some(mother) = node.mother() {
        print_node(mother, depth + 1);
    }
}
