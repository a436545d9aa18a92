//! Account registration and credential verification.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::JwtService;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// A freshly issued access token together with the authenticated user.
#[derive(Debug)]
pub struct AuthTokens {
    pub access_token: String,
    pub user: User,
}

/// Handles registration, login and token-subject resolution.
///
/// Passwords are stored as bcrypt hashes and never leave this service in
/// plain form. Login failures are indistinguishable between an unknown
/// email and a wrong password.
pub struct AuthService<U: UserRepository> {
    repository: Arc<U>,
    jwt: Arc<JwtService>,
}

impl<U: UserRepository> AuthService<U> {
    /// Creates a new service over a user repository and token signer.
    pub fn new(repository: Arc<U>, jwt: Arc<JwtService>) -> Self {
        Self { repository, jwt }
    }

    /// Registers a new account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already taken and
    /// [`AppError::Internal`] if hashing fails.
    pub async fn register(
        &self,
        email: String,
        password: String,
        name: Option<String>,
    ) -> Result<AuthTokens, AppError> {
        if self.repository.email_exists(&email).await? {
            return Err(AppError::conflict(
                "Email already exists",
                json!({ "email": email }),
            ));
        }

        let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST).map_err(|e| {
            tracing::error!(error = %e, "failed to hash password");
            AppError::internal("Failed to process credentials", json!({}))
        })?;

        let user = self
            .repository
            .create(NewUser {
                email,
                password_hash,
                name,
            })
            .await?;

        tracing::info!(user_id = %user.id, "registered new user");

        let access_token = self.jwt.sign(&user)?;
        Ok(AuthTokens { access_token, user })
    }

    /// Verifies credentials and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with the same message for an
    /// unknown email and a wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, AppError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            return Err(invalid_credentials());
        };

        let matches = bcrypt::verify(password, &user.password_hash).map_err(|e| {
            tracing::error!(error = %e, "failed to verify password hash");
            AppError::internal("Failed to process credentials", json!({}))
        })?;

        if !matches {
            return Err(invalid_credentials());
        }

        let access_token = self.jwt.sign(&user)?;
        Ok(AuthTokens { access_token, user })
    }

    /// Resolves a token subject to a live account, if one still exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database failure.
    pub async fn validate_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.repository.find_by_id(id).await
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn service(repo: MockUserRepository) -> AuthService<MockUserRepository> {
        AuthService::new(Arc::new(repo), Arc::new(JwtService::new("test-secret", 3600)))
    }

    fn stored_user(email: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_user_and_signs_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists()
            .with(eq("new@example.com"))
            .returning(|_| Ok(false));
        repo.expect_create().returning(|new_user| {
            assert!(bcrypt::verify("hunter22", &new_user.password_hash).unwrap());
            Ok(User {
                id: Uuid::new_v4(),
                email: new_user.email,
                password_hash: new_user.password_hash,
                name: new_user.name,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

        let service = service(repo);
        let tokens = service
            .register("new@example.com".to_string(), "hunter22".to_string(), None)
            .await
            .unwrap();

        assert_eq!(tokens.user.email, "new@example.com");
        assert_eq!(tokens.access_token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(true));
        repo.expect_create().times(0);

        let service = service(repo);
        let result = service
            .register("dup@example.com".to_string(), "pw".to_string(), None)
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_login_succeeds_with_correct_password() {
        let user = stored_user("user@example.com", "correct-horse");
        let user_id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("user@example.com"))
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repo);
        let tokens = service.login("user@example.com", "correct-horse").await.unwrap();

        assert_eq!(tokens.user.id, user_id);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let user = stored_user("user@example.com", "correct-horse");

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repo);
        let result = service.login("user@example.com", "battery-staple").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_login_unknown_email_matches_wrong_password_error() {
        let user = stored_user("user@example.com", "correct-horse");

        let mut known = MockUserRepository::new();
        known
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        let mut unknown = MockUserRepository::new();
        unknown.expect_find_by_email().returning(|_| Ok(None));

        let wrong_password = service(known)
            .login("user@example.com", "nope")
            .await
            .unwrap_err();
        let unknown_email = service(unknown)
            .login("ghost@example.com", "nope")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_validate_user_passes_through() {
        let user = stored_user("user@example.com", "pw");
        let user_id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repo);
        let found = service.validate_user(user_id).await.unwrap();

        assert_eq!(found.unwrap().id, user_id);
    }
}
