//! Login and registration. Stateless: every issued token is self-contained.

use std::sync::Arc;

use service_core::error::AppError;
use tracing::{info, instrument};
use validator::Validate;

use crate::dtos::auth::{LoginRequest, RegisterRequest, TokenResponse};
use crate::models::User;
use crate::services::jwt::JwtService;
use crate::store::UserStore;
use crate::utils::password::{hash_password, verify_password, Password};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtService) -> Self {
        Self { users, jwt }
    }

    /// The failure message is the same whether the username is unknown or the
    /// password mismatches; callers learn nothing about which usernames exist.
    #[instrument(skip(self, req))]
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse, AppError> {
        req.validate()?;

        let candidate = Password::new(req.password);
        let user = match self.users.get_by_username(&req.username).await? {
            Some(user) if verify_password(&candidate, user.password_hash()).is_ok() => user,
            _ => {
                return Err(AppError::Unauthorized(anyhow::anyhow!(
                    "Invalid username or password"
                )))
            }
        };

        let token = self.jwt.issue_token(&user)?;
        info!(user_id = %user.id(), "login succeeded");
        Ok(TokenResponse { token })
    }

    #[instrument(skip(self, req))]
    pub async fn register(&self, req: RegisterRequest) -> Result<(), AppError> {
        req.validate()?;

        if self.users.get_by_username(&req.username).await?.is_some() {
            return Err(AppError::Conflict(anyhow::anyhow!("Username already exists")));
        }

        let hash = hash_password(&Password::new(req.password))?;
        let user = User::new(req.username, hash)?;
        self.users.add(&user).await?;

        info!(user_id = %user.id(), "user registered");
        Ok(())
    }
}
