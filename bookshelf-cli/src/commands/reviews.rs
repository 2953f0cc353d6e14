//! Review commands

use super::output::{print_json, stars, with_spinner};
use anyhow::{Context, Result};
use bookshelf_core::{BookshelfClient, Review, ReviewForm};

pub async fn list_reviews(client: &BookshelfClient, book_id: u64, json: bool) -> Result<()> {
    let reviews = with_spinner("Fetching reviews...", client.list_reviews(book_id))
        .await
        .with_context(|| format!("Failed to fetch reviews for book {}", book_id))?;

    if json {
        return print_json(&reviews);
    }

    if reviews.is_empty() {
        println!("No reviews yet");
    }
    for review in &reviews {
        print_review(review);
    }
    Ok(())
}

pub async fn show_review(client: &BookshelfClient, id: u64, json: bool) -> Result<()> {
    let review = with_spinner("Fetching review...", client.get_review(id))
        .await
        .with_context(|| format!("Failed to fetch review {}", id))?;

    if json {
        return print_json(&review);
    }
    print_review(&review);
    Ok(())
}

pub async fn add_review(
    client: &BookshelfClient,
    book_id: u64,
    content: &str,
    rating: Option<u8>,
) -> Result<()> {
    let form = ReviewForm::new(book_id, content, rating);
    with_spinner("Posting review...", client.create_review(&form)).await?;
    println!("Review posted for book {}", book_id);
    Ok(())
}

pub async fn edit_review(
    client: &BookshelfClient,
    id: u64,
    book_id: u64,
    content: &str,
    rating: Option<u8>,
) -> Result<()> {
    let form = ReviewForm::new(book_id, content, rating);
    with_spinner("Updating review...", client.update_review(id, &form)).await?;
    println!("Review {} updated", id);
    Ok(())
}

pub async fn delete_review(client: &BookshelfClient, id: u64) -> Result<()> {
    with_spinner("Deleting review...", client.delete_review(id)).await?;
    println!("Review {} deleted", id);
    Ok(())
}

fn print_review(review: &Review) {
    println!(
        "#{} {} {}",
        review.review_id,
        review.user_name,
        stars(review.rating)
    );
    println!("    {}", review.content);
}
