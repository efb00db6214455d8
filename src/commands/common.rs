//! Helpers shared by every command: building the client and printing results.

use serde::Serialize;

use crate::{
    cli::ClientArgs,
    core::config::{timeout_from_secs, SwcConfigBuilder, BASE_URL_ENV_VAR},
    swc::bulk::BulkFileFormat,
    Result, SwcClient, SwcConfig, SwcError,
};

/// Settings from the environment, overridden by whatever was passed on the command line.
pub fn build_config(args: &ClientArgs, format: Option<BulkFileFormat>) -> Result<SwcConfig> {
    if args.base_url.is_none() && std::env::var_os(BASE_URL_ENV_VAR).is_none() {
        return Err(SwcError::config(format!(
            "base URL not provided; pass --base-url or set {BASE_URL_ENV_VAR}"
        )));
    }

    let mut builder = SwcConfigBuilder::from_env()?;
    if let Some(url) = &args.base_url {
        builder = builder.base_url(url.as_str());
    }
    if args.no_backoff {
        builder = builder.backoff(false);
    }
    if let Some(retries) = args.max_retries {
        builder = builder.max_retries(retries);
    }
    if let Some(secs) = args.timeout {
        builder = builder.timeout(timeout_from_secs(secs)?);
    }
    if let Some(format) = format {
        builder = builder.bulk_file_format(format.to_string());
    }

    builder.build()
}

pub fn build_client(args: &ClientArgs, format: Option<BulkFileFormat>) -> Result<SwcClient> {
    SwcClient::new(build_config(args, format)?)
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
