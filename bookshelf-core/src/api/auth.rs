use super::BookshelfClient;
use crate::error::GatewayError;
use crate::gateway::RequestDescriptor;
use crate::types::{Credentials, CurrentUser};
use crate::Result;
use reqwest::header::{HeaderValue, COOKIE};
use serde_json::Value;

impl BookshelfClient {
    /// Sign in. The backend sets the session cookie on success.
    pub async fn login(&self, credentials: &Credentials) -> Result<Value> {
        credentials.validate()?;
        let descriptor =
            RequestDescriptor::post("/api/login/").json(serde_json::to_value(credentials)?);
        let response = self.gateway.send(descriptor).await?;
        tracing::info!(username = %credentials.username, "signed in");
        Ok(response.payload.unwrap_or(Value::Null))
    }

    /// Sign out and drop every cookie held for the backend
    pub async fn logout(&self) -> Result<()> {
        self.gateway
            .send(RequestDescriptor::post("/api/logout/"))
            .await?;
        self.gateway.jar().clear();
        tracing::info!("signed out, cookies cleared");
        Ok(())
    }

    /// Identity behind this client's own cookies, `None` when anonymous
    pub async fn current_user(&self) -> Result<Option<CurrentUser>> {
        self.query_identity(RequestDescriptor::get("/api/me/"))
            .await
    }

    /// Identity behind a caller-supplied `Cookie` header, forwarded verbatim.
    /// Cookies set by the response are not kept.
    pub async fn current_user_for(&self, cookie_header: &str) -> Result<Option<CurrentUser>> {
        let value = HeaderValue::from_str(cookie_header).map_err(GatewayError::from)?;
        self.query_identity(RequestDescriptor::get("/api/me/").header(COOKIE, value))
            .await
    }

    async fn query_identity(&self, descriptor: RequestDescriptor) -> Result<Option<CurrentUser>> {
        match self.gateway.send(descriptor).await {
            Ok(response) => Ok(identity_from(response.payload)),
            Err(GatewayError::RequestRejected { status: 401 | 403, .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Anonymous sessions come back without an `id`
fn identity_from(payload: Option<Value>) -> Option<CurrentUser> {
    let payload = payload?;
    if payload.get("id").map_or(true, Value::is_null) {
        return None;
    }
    serde_json::from_value(payload).ok()
}
