use cloudeats::modules::auth::repository as session_repository;
use cloudeats::modules::auth::service::{
    sign_in, sign_out, sign_up, SignInError, SignInPayload, SignUpError, SignUpPayload,
};
use cloudeats::modules::user::repository::{self as user_repository, Role};
use cloudeats::types::Context;

fn sign_up_payload(username: &str) -> SignUpPayload {
    SignUpPayload {
        username: String::from(username),
        password: String::from("hunter2"),
        confirm: String::from("hunter2"),
        role: Role::Customer,
    }
}

#[test]
fn registration_creates_the_user_and_signs_in() {
    let mut ctx = Context::in_memory();

    let session = sign_up(&mut ctx, sign_up_payload("ada")).unwrap();
    assert_eq!(session.username, "ada");
    assert_eq!(session.role, Role::Customer);

    let users = user_repository::list(ctx.store.as_ref()).unwrap();
    assert_eq!(users.len(), 1);
    assert!(session_repository::current(ctx.store.as_ref()).is_some());
}

#[test]
fn duplicate_username_leaves_the_user_list_unchanged() {
    let mut ctx = Context::in_memory();
    sign_up(&mut ctx, sign_up_payload("ada")).unwrap();

    let result = sign_up(&mut ctx, sign_up_payload("ada"));
    assert_eq!(result.unwrap_err(), SignUpError::UsernameTaken);
    assert_eq!(user_repository::list(ctx.store.as_ref()).unwrap().len(), 1);
}

#[test]
fn registration_requires_every_field() {
    let mut ctx = Context::in_memory();
    let mut payload = sign_up_payload("ada");
    payload.password = String::new();
    assert_eq!(
        sign_up(&mut ctx, payload).unwrap_err(),
        SignUpError::MissingFields
    );
}

#[test]
fn mismatched_confirmation_is_rejected() {
    let mut ctx = Context::in_memory();
    let mut payload = sign_up_payload("ada");
    payload.confirm = String::from("other");
    assert_eq!(
        sign_up(&mut ctx, payload).unwrap_err(),
        SignUpError::PasswordMismatch
    );
}

#[test]
fn sign_in_needs_an_exact_credential_match() {
    let mut ctx = Context::in_memory();
    sign_up(&mut ctx, sign_up_payload("ada")).unwrap();
    sign_out(&mut ctx).unwrap();

    let result = sign_in(
        &mut ctx,
        SignInPayload {
            username: String::from("ada"),
            password: String::from("wrong"),
        },
    );
    assert_eq!(result.unwrap_err(), SignInError::InvalidCredentials);
    assert!(session_repository::current(ctx.store.as_ref()).is_none());

    let session = sign_in(
        &mut ctx,
        SignInPayload {
            username: String::from("ada"),
            password: String::from("hunter2"),
        },
    )
    .unwrap();
    assert_eq!(session.username, "ada");
}

#[test]
fn sign_out_clears_the_session() {
    let mut ctx = Context::in_memory();
    sign_up(&mut ctx, sign_up_payload("ada")).unwrap();
    sign_out(&mut ctx).unwrap();
    assert!(session_repository::current(ctx.store.as_ref()).is_none());
}

#[test]
fn malformed_session_data_reads_as_signed_out() {
    let mut ctx = Context::in_memory();
    ctx.store
        .set(session_repository::STORE_KEY, "{ not json")
        .unwrap();
    assert!(session_repository::current(ctx.store.as_ref()).is_none());
}
