use serde::{Deserialize, Serialize};

use crate::entities::user::{self, UserRole};
use crate::error::{AppError, AppResult};
use crate::store::{NewUser, Store};
use crate::utils::jwt::create_token;
use crate::utils::password::{hash_password, verify_password};
use crate::Config;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub citizen: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: user::Model,
}

fn issue(config: &Config, user: user::Model) -> AppResult<AuthResponse> {
    let token = create_token(
        user.id,
        &user.email,
        user.role,
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )?;
    Ok(AuthResponse { token, user })
}

/// Creates an end-user account and signs it in.
pub async fn register(
    store: &dyn Store,
    config: &Config,
    req: RegisterRequest,
) -> AppResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();
    if req.full_name.trim().is_empty() || !email.contains('@') {
        return Err(AppError::Validation(
            "full_name and a valid email are required".to_string(),
        ));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let user = store
        .create_user(NewUser {
            full_name: req.full_name.trim().to_string(),
            email,
            password_hash: hash_password(&req.password)?,
            role: UserRole::User,
            phone_number: req.phone_number,
            citizen: req.citizen,
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");
    issue(config, user)
}

pub async fn login(store: &dyn Store, config: &Config, req: LoginRequest) -> AppResult<AuthResponse> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = store
        .find_user_by_email(&req.email.trim().to_lowercase())
        .await?
        .ok_or_else(invalid)?;
    if !verify_password(&req.password, &user.password_hash)? {
        return Err(invalid());
    }

    issue(config, user)
}

/// Creates the administrator account on first boot.
pub async fn ensure_admin(store: &dyn Store, config: &Config) -> AppResult<()> {
    let email = config.admin_email.trim().to_lowercase();
    if store.find_user_by_email(&email).await?.is_some() {
        return Ok(());
    }

    let admin = store
        .create_user(NewUser {
            full_name: "Administrator".to_string(),
            email,
            password_hash: hash_password(&config.admin_password)?,
            role: UserRole::Admin,
            phone_number: String::new(),
            citizen: String::new(),
        })
        .await?;

    tracing::info!(user_id = admin.id, "Administrator account seeded");
    Ok(())
}
