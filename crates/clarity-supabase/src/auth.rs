use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    client::SupabaseClient,
    error::{Result, SupabaseError},
    storage::SessionStorage,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Session issued by GoTrue, stored as JSON under the client's storage key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: Value,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl SupabaseClient {
    /// Register a new account
    ///
    /// Returns `{user, session}`. `session` is null until the address is
    /// confirmed, unless the project auto-confirms, in which case it is
    /// also persisted.
    pub async fn sign_up(&self, credentials: &Credentials, storage: &dyn SessionStorage) -> Result<Value> {
        let url = self.endpoint("/auth/v1/signup")?;
        let builder = self.request(Method::POST, url, None).json(credentials);

        let body: Value = self
            .send(builder, "sign_up")
            .await?
            .json()
            .await
            .map_err(|e| SupabaseError::MalformedResponse(e.to_string()))?;

        if body.get("access_token").is_some() {
            let session: Session =
                serde_json::from_value(body).map_err(|e| SupabaseError::MalformedResponse(e.to_string()))?;
            self.save_session(&session, storage)?;

            tracing::info!("account created with immediate session");
            return Ok(json!({ "user": session.user.clone(), "session": session }));
        }

        tracing::info!("account created, awaiting confirmation");
        Ok(json!({ "user": body, "session": null }))
    }

    /// Exchange email and password for a session and persist it
    ///
    /// A 4xx from the provider, or a reply without a session (for example an
    /// unconfirmed address), is `InvalidCredentials`.
    pub async fn sign_in(&self, credentials: &Credentials, storage: &dyn SessionStorage) -> Result<Session> {
        let url = self.endpoint("/auth/v1/token?grant_type=password")?;
        let builder = self.request(Method::POST, url, None).json(credentials);

        let response = match self.send(builder, "sign_in").await {
            Ok(response) => response,
            Err(SupabaseError::ProviderApiError { status, message }) if (400..500).contains(&status) => {
                return Err(SupabaseError::InvalidCredentials(message));
            }
            Err(e) => return Err(e),
        };

        let body: Value = response
            .json()
            .await
            .map_err(|e| SupabaseError::MalformedResponse(e.to_string()))?;

        if body.get("access_token").and_then(Value::as_str).is_none() {
            return Err(SupabaseError::InvalidCredentials("no session returned".to_string()));
        }

        let session: Session =
            serde_json::from_value(body).map_err(|e| SupabaseError::MalformedResponse(e.to_string()))?;
        self.save_session(&session, storage)?;

        tracing::info!("signed in");
        Ok(session)
    }

    /// Revoke the stored session and forget it
    ///
    /// Without a stored session there is nothing to revoke. A token the
    /// provider already considers invalid counts as signed out.
    pub async fn sign_out(&self, storage: &dyn SessionStorage) -> Result<()> {
        let session = match self.stored_session(storage) {
            Ok(Some(session)) => session,
            Ok(None) => return Ok(()),
            Err(e) => {
                tracing::warn!("discarding unreadable session: {e}");
                storage.remove_item(self.storage_key());
                return Ok(());
            }
        };

        storage.remove_item(self.storage_key());

        let url = self.endpoint("/auth/v1/logout")?;
        let builder = self.request(Method::POST, url, Some(&session.access_token));

        match self.send(builder, "sign_out").await {
            Ok(_) | Err(SupabaseError::ProviderApiError { status: 401 | 403 | 404, .. }) => {
                tracing::info!("signed out");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Session currently held in `storage`, if any
    pub fn stored_session(&self, storage: &dyn SessionStorage) -> Result<Option<Session>> {
        storage
            .get_item(self.storage_key())
            .map(|raw| serde_json::from_str(&raw).map_err(|e| SupabaseError::Storage(e.to_string())))
            .transpose()
    }

    fn save_session(&self, session: &Session, storage: &dyn SessionStorage) -> Result<()> {
        let raw = serde_json::to_string(session).map_err(|e| SupabaseError::Storage(e.to_string()))?;
        storage.set_item(self.storage_key(), raw);
        Ok(())
    }
}
