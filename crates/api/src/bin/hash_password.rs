//! Print a bcrypt hash for `ADMIN_PASSWORD_HASH`.
//!
//! Usage: `hash-password <password>`, or set `ADMIN_PASSWORD` and run with
//! no arguments.

use anyhow::{bail, Context};
use codetimes_api::auth::password::{hash_password, BCRYPT_COST};

fn main() -> anyhow::Result<()> {
    let password = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => std::env::var("ADMIN_PASSWORD")
            .context("pass the password as an argument or set ADMIN_PASSWORD")?,
    };
    if password.is_empty() {
        bail!("password must not be empty");
    }

    let hash = hash_password(&password, BCRYPT_COST).context("failed to hash password")?;
    println!("{hash}");
    Ok(())
}
