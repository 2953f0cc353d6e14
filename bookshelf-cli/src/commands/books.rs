//! Book commands

use super::output::{average, print_json, stars, with_spinner};
use anyhow::{Context, Result};
use bookshelf_core::{BookForm, BookQuery, BookshelfClient, Ordering};

pub async fn list_books(
    client: &BookshelfClient,
    search: Option<String>,
    ordering: Option<String>,
    page: Option<u32>,
    json: bool,
) -> Result<()> {
    let ordering = match ordering {
        Some(raw) => raw.parse::<Ordering>()?,
        None => Ordering::default(),
    };
    let query = BookQuery {
        search,
        ordering: Some(ordering),
        page,
    };

    let books = with_spinner("Fetching books...", client.list_books(&query))
        .await
        .context("Failed to fetch books")?;

    if json {
        return print_json(&books);
    }

    if books.results.is_empty() {
        println!("No books found");
        return Ok(());
    }

    println!(
        "{:>5}  {:<32}  {:<20}  {:>6}  {:>7}  {}",
        "ID", "Title", "Author", "Rating", "Reviews", "Published"
    );
    for book in &books.results {
        let published = book
            .published_date()
            .map(|d| d.to_string())
            .unwrap_or_default();
        println!(
            "{:>5}  {:<32}  {:<20}  {:>6}  {:>7}  {}",
            book.id,
            truncate(&book.title, 32),
            truncate(&book.author_name, 20),
            average(book.average_rating),
            book.review_count,
            published
        );
    }
    println!(
        "\nPage {} of {} ({} books)",
        query.page.unwrap_or(1),
        books.total_pages().max(1),
        books.count
    );

    Ok(())
}

pub async fn show_book(client: &BookshelfClient, id: u64, json: bool) -> Result<()> {
    let book = with_spinner("Fetching book...", client.get_book(id))
        .await
        .with_context(|| format!("Failed to fetch book {}", id))?;

    if json {
        return print_json(&book);
    }

    println!("Title:     {}", book.title);
    println!("Author:    {}", book.author.name);
    if let Some(date) = book.published_date() {
        println!("Published: {}", date);
    }
    match book.average_rating {
        Some(avg) => println!("Rating:    {}", stars(avg.round().clamp(0.0, 5.0) as u8)),
        None => println!("Rating:    -"),
    }
    println!("Reviews:   {}", book.review_count);

    if book.reviews.is_empty() {
        println!("\nNo reviews yet");
    }
    for review in &book.reviews {
        let when = review
            .created_at
            .map(|t| t.date_naive().to_string())
            .unwrap_or_default();
        println!(
            "\n#{} {} {} {}",
            review.review_id,
            review.user_name,
            stars(review.rating),
            when
        );
        println!("    {}", review.content);
    }

    Ok(())
}

pub async fn create_book(
    client: &BookshelfClient,
    title: &str,
    author: &str,
    published_at: Option<String>,
) -> Result<()> {
    let form = book_form(title, author, published_at);
    with_spinner("Creating book...", client.create_book(&form)).await?;
    println!("Book '{}' created", title);
    Ok(())
}

pub async fn update_book(
    client: &BookshelfClient,
    id: u64,
    title: &str,
    author: &str,
    published_at: Option<String>,
) -> Result<()> {
    let form = book_form(title, author, published_at);
    with_spinner("Updating book...", client.update_book(id, &form)).await?;
    println!("Book {} updated", id);
    Ok(())
}

pub async fn delete_book(client: &BookshelfClient, id: u64) -> Result<()> {
    with_spinner("Deleting book...", client.delete_book(id)).await?;
    println!("Book {} deleted", id);
    Ok(())
}

fn book_form(title: &str, author: &str, published_at: Option<String>) -> BookForm {
    let form = BookForm::new(title, author);
    match published_at {
        Some(date) => form.with_published_at(date),
        None => form,
    }
}

/// Shorten to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dune", 32), "Dune");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }

    #[test]
    fn test_book_form_carries_published_at() {
        let form = book_form("Dune", "4", Some("1965-08-01".to_string()));
        assert_eq!(form.published_at.as_deref(), Some("1965-08-01"));
        assert_eq!(book_form("Dune", "4", None).published_at, None);
    }
}
