use snafu::ResultExt;

use crate::cli::util::build_service;
use crate::config::CommentaryConfig;
use crate::error::commentary_error::ProviderSnafu;
use crate::error::Result;
use crate::provider::AuthStatus;

/// Run `goban-commentary check`.
pub fn run(config: CommentaryConfig) -> Result<()> {
    let service = build_service(&config);
    let provider = service.provider();

    println!("provider: {} ({})", provider.name(), provider.model());
    println!("enabled:  {}", config.enabled);

    let Some(api_key) = config.api_key.as_deref() else {
        println!("api key:  missing (export {})", config.provider.api_key_env);
        std::process::exit(1);
    };

    match provider.check_auth(api_key).context(ProviderSnafu)? {
        AuthStatus::Valid => println!("api key:  valid"),
        AuthStatus::Invalid(reason) => {
            println!("api key:  invalid ({reason})");
            std::process::exit(1);
        }
    }

    Ok(())
}
