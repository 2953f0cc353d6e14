use super::BookshelfClient;
use crate::gateway::RequestDescriptor;
use crate::types::{Author, AuthorForm, Listing};
use crate::Result;
use serde_json::Value;

impl BookshelfClient {
    pub async fn list_authors(&self) -> Result<Vec<Author>> {
        let response = self
            .gateway
            .send(RequestDescriptor::get("/api/authors/"))
            .await?;
        Ok(response.json::<Listing<Author>>()?.into_vec())
    }

    pub async fn create_author(&self, form: &AuthorForm) -> Result<Author> {
        form.validate()?;
        let descriptor =
            RequestDescriptor::post("/api/authors/").json(serde_json::to_value(form)?);
        Ok(self.gateway.send(descriptor).await?.json()?)
    }

    /// Rename an author. Sent as multipart form data.
    pub async fn update_author(&self, id: u64, form: &AuthorForm) -> Result<Value> {
        form.validate()?;
        let descriptor =
            RequestDescriptor::put(format!("/api/authors/{}/", id)).multipart(form.to_multipart());
        let response = self.gateway.send(descriptor).await?;
        Ok(response.payload.unwrap_or(Value::Null))
    }

    pub async fn delete_author(&self, id: u64) -> Result<Option<Value>> {
        let descriptor = RequestDescriptor::delete(format!("/api/authors/{}/", id));
        Ok(self.gateway.send(descriptor).await?.payload)
    }
}
