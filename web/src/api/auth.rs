use shared_types::{CustomerRegistration, LoginRequest, LoginResponse};
use uuid::Uuid;

use super::ApiClient;
use crate::error::{ApiError, SessionError};

impl ApiClient {
    /// Logs in and stores the returned token, role and name in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post_json("/auth/login", &request).await?;
        self.session().sign_in(&response)?;
        Ok(response)
    }

    pub async fn register_customer(
        &self,
        registration: &CustomerRegistration,
    ) -> Result<Uuid, ApiError> {
        self.post_json("/customers", registration).await
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.session().clear()
    }
}
