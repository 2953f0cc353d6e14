use super::BookshelfClient;
use crate::gateway::RequestDescriptor;
use crate::types::{Listing, Review, ReviewForm};
use crate::Result;
use serde_json::Value;

impl BookshelfClient {
    /// Reviews attached to a book
    pub async fn list_reviews(&self, book_id: u64) -> Result<Vec<Review>> {
        let descriptor = RequestDescriptor::get(format!("/api/books/{}/reviews/", book_id));
        let response = self.gateway.send(descriptor).await?;
        Ok(response.json::<Listing<Review>>()?.into_vec())
    }

    pub async fn get_review(&self, id: u64) -> Result<Review> {
        let descriptor = RequestDescriptor::get(format!("/api/reviews/{}/", id));
        Ok(self.gateway.send(descriptor).await?.json()?)
    }

    pub async fn create_review(&self, form: &ReviewForm) -> Result<Value> {
        let body = serde_json::to_value(form.body()?)?;
        let response = self
            .gateway
            .send(RequestDescriptor::post("/api/reviews/").json(body))
            .await?;
        Ok(response.payload.unwrap_or(Value::Null))
    }

    pub async fn update_review(&self, id: u64, form: &ReviewForm) -> Result<Value> {
        let body = serde_json::to_value(form.body()?)?;
        let descriptor = RequestDescriptor::put(format!("/api/reviews/{}/", id)).json(body);
        let response = self.gateway.send(descriptor).await?;
        Ok(response.payload.unwrap_or(Value::Null))
    }

    pub async fn delete_review(&self, id: u64) -> Result<Option<Value>> {
        let descriptor = RequestDescriptor::delete(format!("/api/reviews/{}/", id));
        Ok(self.gateway.send(descriptor).await?.payload)
    }
}
