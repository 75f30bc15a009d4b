use crate::modules::auth::gate;
use crate::modules::auth::service::{self, SignInError, SignInPayload};
use crate::types::Context;

pub fn run(ctx: &mut Context, username: String, password: String) {
    let payload = SignInPayload {
        username: username.trim().to_string(),
        password,
    };
    match service::sign_in(ctx, payload) {
        Ok(session) => {
            println!(
                "Signed in as {} ({}).",
                session.username,
                session.role.to_string()
            );
            let landing = gate::landing_page(session.role);
            println!("Opening {}.", landing.target());
            super::render_page(ctx, landing, Some(&session));
        }
        Err(SignInError::InvalidCredentials) => println!("Invalid username or password."),
        Err(SignInError::UnexpectedError) => println!("Something went wrong. Try again."),
    }
}

/// The login page itself: in a terminal it can only explain how to sign in.
pub fn render(_ctx: &mut Context) {
    println!("CloudEats login");
    println!("  cloudeats login <username> <password>");
    println!("  cloudeats register <username> <password> <confirm> <role>");
}
