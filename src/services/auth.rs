// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AdminRepository,
    models::auth::{Admin, Claims},
};

#[derive(Clone)]
pub struct AuthService {
    admin_repo: AdminRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(admin_repo: AdminRepository, jwt_secret: String) -> Self {
        Self {
            admin_repo,
            jwt_secret,
        }
    }

    pub async fn register_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<String, AppError> {
        // Hashing bcrypt itu berat; jalankan di thread blocking agar
        // tidak menyandera event loop
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Task hashing gagal: {}", e))??;

        let new_admin = self
            .admin_repo
            .create_admin(email, name, &hashed_password)
            .await?;

        self.create_token(new_admin.id)
    }

    pub async fn login_admin(&self, email: &str, password: &str) -> Result<String, AppError> {
        let admin = self
            .admin_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = admin.password_hash.clone();

        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Task verifikasi password gagal: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(admin.id)
    }

    // Token kedaluwarsa atau tidak bisa diparse diperlakukan sama:
    // tidak terautentikasi, bukan panic.
    pub async fn validate_token(&self, token: &str) -> Result<Admin, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.admin_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::AdminNotFound)
    }

    fn create_token(&self, admin_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: admin_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
