//! Interactive authorization bootstrap.

use meetinvite_google::{
    Authorizer, CredentialBundle, GoogleConfig, StdinPrompt, TokenStorage,
};

use crate::error::CliResult;

/// Runs the one-time OAuth authorization and stores the token.
///
/// This is how an operator mints the stored token before starting the
/// non-interactive HTTP or daily surfaces with an OAuth client config.
pub async fn run(config: GoogleConfig, force: bool) -> CliResult<()> {
    let bundle = config.source.resolve()?;

    match bundle {
        CredentialBundle::ServiceAccount(key) => {
            println!(
                "Credentials resolve to the service account {}; \
                 no interactive authorization is needed.",
                key.client_email
            );
            Ok(())
        }
        CredentialBundle::OAuth(_) => {
            let storage = TokenStorage::new(&config.token_path);
            if storage.exists() {
                if !force {
                    println!("A token is already stored at {:?}.", storage.path());
                    println!("Use --force to re-authorize.");
                    return Ok(());
                }
                storage.clear()?;
            }

            let authorizer = Authorizer::new(&config.token_path, config.timeout);
            authorizer.authorize(&bundle, Some(&StdinPrompt)).await?;

            println!("Token stored at {:?}.", config.token_path);
            Ok(())
        }
    }
}
