use crate::modules::auth::gate;
use crate::modules::auth::service::{self, SignUpError, SignUpPayload};
use crate::modules::user::repository::Role;
use crate::types::Context;

pub fn run(ctx: &mut Context, username: String, password: String, confirm: String, role: Role) {
    let payload = SignUpPayload {
        username: username.trim().to_string(),
        password,
        confirm,
        role,
    };
    match service::sign_up(ctx, payload) {
        Ok(session) => {
            println!(
                "Welcome, {}! Registered as {}.",
                session.username,
                session.role.to_string()
            );
            let landing = gate::landing_page(session.role);
            println!("Opening {}.", landing.target());
            super::render_page(ctx, landing, Some(&session));
        }
        Err(SignUpError::MissingFields) => println!("Fill all fields."),
        Err(SignUpError::PasswordMismatch) => println!("Passwords do not match."),
        Err(SignUpError::UsernameTaken) => println!("Username taken."),
        Err(SignUpError::UnexpectedError) => println!("Something went wrong. Try again."),
    }
}

pub fn render() {
    println!("CloudEats registration");
    println!("  cloudeats register <username> <password> <confirm> <customer|restaurant|courier|admin>");
}
