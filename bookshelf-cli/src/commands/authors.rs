//! Author commands

use super::output::{print_json, with_spinner};
use anyhow::{Context, Result};
use bookshelf_core::{AuthorForm, BookshelfClient};

pub async fn list_authors(client: &BookshelfClient, json: bool) -> Result<()> {
    let authors = with_spinner("Fetching authors...", client.list_authors())
        .await
        .context("Failed to fetch authors")?;

    if json {
        return print_json(&authors);
    }

    if authors.is_empty() {
        println!("No authors yet. Register one with `bookshelf authors create`.");
    }
    for author in &authors {
        println!("{:>5}  {}", author.id, author.name);
    }
    Ok(())
}

pub async fn create_author(client: &BookshelfClient, name: &str) -> Result<()> {
    let author = with_spinner("Registering author...", client.create_author(&AuthorForm::new(name)))
        .await?;
    println!("Author '{}' registered with id {}", author.name, author.id);
    Ok(())
}

pub async fn update_author(client: &BookshelfClient, id: u64, name: &str) -> Result<()> {
    with_spinner("Updating author...", client.update_author(id, &AuthorForm::new(name))).await?;
    println!("Author {} renamed to '{}'", id, name);
    Ok(())
}

pub async fn delete_author(client: &BookshelfClient, id: u64) -> Result<()> {
    with_spinner("Deleting author...", client.delete_author(id)).await?;
    println!("Author {} deleted", id);
    Ok(())
}
