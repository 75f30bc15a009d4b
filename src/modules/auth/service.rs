use serde::Deserialize;
use validator::Validate;

use super::repository::{self, Session};
use crate::modules::user::{self, repository::Role};
use crate::modules::view::ViewEvent;
use crate::types::Context;

#[derive(Deserialize, Validate)]
pub struct SignUpPayload {
    #[validate(length(min = 1, code = "MISSING_USERNAME", message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, code = "MISSING_PASSWORD", message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, code = "MISSING_CONFIRM", message = "Password confirmation is required"))]
    pub confirm: String,
    pub role: Role,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SignUpError {
    MissingFields,
    PasswordMismatch,
    UsernameTaken,
    UnexpectedError,
}

pub fn sign_up(ctx: &mut Context, payload: SignUpPayload) -> Result<Session, SignUpError> {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate sign up payload: {errors}");
        SignUpError::MissingFields
    })?;

    if payload.password != payload.confirm {
        return Err(SignUpError::PasswordMismatch);
    }

    match user::repository::find_by_username(ctx.store.as_ref(), &payload.username)
        .map_err(|_| SignUpError::UnexpectedError)?
    {
        Some(_) => return Err(SignUpError::UsernameTaken),
        None => (),
    };

    let user = user::repository::create(
        ctx.store.as_mut(),
        user::repository::CreateUserPayload {
            username: payload.username,
            password: payload.password,
            role: payload.role,
        },
    )
    .map_err(|_| SignUpError::UnexpectedError)?;

    // Registration signs the new user in immediately.
    let session =
        repository::set(ctx.store.as_mut(), &user).map_err(|_| SignUpError::UnexpectedError)?;
    ctx.views
        .publish(&ViewEvent::SessionChanged(Some(session.clone())));

    Ok(session)
}

#[derive(Deserialize)]
pub struct SignInPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SignInError {
    InvalidCredentials,
    UnexpectedError,
}

pub fn sign_in(ctx: &mut Context, payload: SignInPayload) -> Result<Session, SignInError> {
    let user = user::repository::find_by_credentials(
        ctx.store.as_ref(),
        &payload.username,
        &payload.password,
    )
    .map_err(|_| SignInError::UnexpectedError)?
    .ok_or(SignInError::InvalidCredentials)?;

    let session =
        repository::set(ctx.store.as_mut(), &user).map_err(|_| SignInError::UnexpectedError)?;
    ctx.views
        .publish(&ViewEvent::SessionChanged(Some(session.clone())));

    Ok(session)
}

#[derive(Debug, PartialEq, Eq)]
pub enum SignOutError {
    UnexpectedError,
}

pub fn sign_out(ctx: &mut Context) -> Result<(), SignOutError> {
    repository::clear(ctx.store.as_mut()).map_err(|_| SignOutError::UnexpectedError)?;
    ctx.views.publish(&ViewEvent::SessionChanged(None));
    Ok(())
}
