//! Authentication service: register/login flows delegating to `playmart_core::auth`.

use playmart_core::auth::service::AuthService;
use playmart_core::models::auth::Registration;

use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

/// Reject malformed registration input before it reaches the store.
pub fn validate_registration(body: &RegisterRequest) -> AppResult<()> {
    for (field, value) in [
        ("account", &body.account),
        ("username", &body.username),
        ("email", &body.email),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} is required")));
        }
    }
    // Login tries the account before the email, so an account shaped like
    // an email could shadow another user's email login.
    if body.account.contains('@') {
        return Err(AppError::Validation("account must not contain '@'".into()));
    }
    if !body.email.contains('@') {
        return Err(AppError::Validation("email is not valid".into()));
    }
    if body.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if body.password != body.confirm_password {
        return Err(AppError::Validation("Passwords do not match".into()));
    }
    Ok(())
}

/// Register a new user account.
pub async fn register(auth: &AuthService, body: RegisterRequest) -> AppResult<RegisterResponse> {
    validate_registration(&body)?;

    let user_id = auth
        .register(Registration {
            account: body.account.trim().to_string(),
            username: body.username.trim().to_string(),
            email: body.email.trim().to_string(),
            password: body.password,
            gender: body.gender,
            phone: body.phone,
            address: body.address,
            date_of_birth: body.date_of_birth,
            bio: body.bio,
        })
        .await?;

    Ok(RegisterResponse { user_id })
}

/// Authenticate with account-or-email + password.
pub async fn login(auth: &AuthService, body: LoginRequest) -> AppResult<TokenResponse> {
    let outcome = auth.login(body.account.trim(), &body.password).await?;
    Ok(TokenResponse {
        access_token: outcome.access_token,
        token_type: "Bearer".to_string(),
        expires_in: outcome.expires_in,
        user_id: outcome.user_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> RegisterRequest {
        RegisterRequest {
            account: "testuser".into(),
            username: "Test User".into(),
            email: "testuser@example.com".into(),
            password: "password123".into(),
            confirm_password: "password123".into(),
            gender: String::new(),
            phone: String::new(),
            address: String::new(),
            date_of_birth: None,
            bio: None,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(validate_registration(&body()).is_ok());
    }

    #[test]
    fn blank_account_is_rejected() {
        let req = RegisterRequest {
            account: "   ".into(),
            ..body()
        };
        assert!(matches!(
            validate_registration(&req),
            Err(AppError::Validation(m)) if m == "account is required"
        ));
    }

    #[test]
    fn account_shaped_like_email_is_rejected() {
        let req = RegisterRequest {
            account: "someone@example.com".into(),
            ..body()
        };
        assert!(matches!(
            validate_registration(&req),
            Err(AppError::Validation(m)) if m == "account must not contain '@'"
        ));
    }

    #[test]
    fn short_password_is_rejected() {
        let req = RegisterRequest {
            password: "short".into(),
            confirm_password: "short".into(),
            ..body()
        };
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let req = RegisterRequest {
            confirm_password: "password124".into(),
            ..body()
        };
        assert!(matches!(
            validate_registration(&req),
            Err(AppError::Validation(m)) if m == "Passwords do not match"
        ));
    }

    #[test]
    fn email_without_at_is_rejected() {
        let req = RegisterRequest {
            email: "testuser.example.com".into(),
            ..body()
        };
        assert!(validate_registration(&req).is_err());
    }
}
