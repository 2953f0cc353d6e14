//! Sign-in commands

use super::output::with_spinner;
use anyhow::Result;
use bookshelf_core::{BookshelfClient, Credentials};

pub async fn login(client: &BookshelfClient, username: &str, password: &str) -> Result<()> {
    let credentials = Credentials::new(username, password);
    with_spinner("Signing in...", client.login(&credentials)).await?;
    println!("Signed in as {}", username);
    Ok(())
}

pub async fn logout(client: &BookshelfClient) -> Result<()> {
    with_spinner("Signing out...", client.logout()).await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(client: &BookshelfClient) -> Result<()> {
    match client.current_user().await? {
        Some(user) => {
            let name = user.username.unwrap_or_else(|| format!("user {}", user.id));
            if user.is_admin {
                println!("Signed in as {} (administrator)", name);
            } else {
                println!("Signed in as {}", name);
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}
