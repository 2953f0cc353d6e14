use super::BookshelfClient;
use crate::gateway::RequestDescriptor;
use crate::types::{BookDetail, BookForm, BookQuery, BookSummary, Page};
use crate::Result;
use serde_json::Value;

impl BookshelfClient {
    /// One page of books matching the query
    pub async fn list_books(&self, query: &BookQuery) -> Result<Page<BookSummary>> {
        let descriptor = RequestDescriptor::get("/api/books/").query(query.to_pairs());
        Ok(self.gateway.send(descriptor).await?.json()?)
    }

    pub async fn get_book(&self, id: u64) -> Result<BookDetail> {
        let descriptor = RequestDescriptor::get(format!("/api/books/{}/", id));
        Ok(self.gateway.send(descriptor).await?.json()?)
    }

    /// Create a book, returning the backend's representation of it
    pub async fn create_book(&self, form: &BookForm) -> Result<Value> {
        form.validate()?;
        let descriptor = RequestDescriptor::post("/api/books/").json(serde_json::to_value(form)?);
        let response = self.gateway.send(descriptor).await?;
        tracing::info!(title = %form.title, "book created");
        Ok(response.payload.unwrap_or(Value::Null))
    }

    /// Replace a book's fields. Sent as multipart form data.
    pub async fn update_book(&self, id: u64, form: &BookForm) -> Result<Value> {
        form.validate()?;
        let descriptor =
            RequestDescriptor::put(format!("/api/books/{}/", id)).multipart(form.to_multipart());
        let response = self.gateway.send(descriptor).await?;
        Ok(response.payload.unwrap_or(Value::Null))
    }

    /// Delete a book. The backend may answer 204 or a JSON body; the body,
    /// if any, is returned.
    pub async fn delete_book(&self, id: u64) -> Result<Option<Value>> {
        let descriptor = RequestDescriptor::delete(format!("/api/books/{}/", id));
        let response = self.gateway.send(descriptor).await?;
        tracing::info!(id, "book deleted");
        Ok(response.payload)
    }
}
