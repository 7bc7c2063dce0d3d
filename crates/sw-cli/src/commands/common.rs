//! Helpers shared across subcommands.

use crate::cli::GlobalArgs;
use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use sw_core::{ConnectionConfig, ProjectConfig};
use sw_db::ConnectTarget;

/// Load and validate the project config named by the global args.
pub fn load_config(global: &GlobalArgs) -> Result<ProjectConfig> {
    Ok(ProjectConfig::load(Path::new(&global.config))?)
}

/// Build the connect target, resolving the password from the
/// environment variable the config names. Fails before any network
/// traffic when the secret is unset.
pub fn connect_target(connection: &ConnectionConfig) -> Result<ConnectTarget> {
    let password = connection.password()?;
    Ok(ConnectTarget {
        host: connection.host.clone(),
        port: connection.port,
        database: connection.database.clone(),
        user: connection.user.clone(),
        password,
        connect_timeout: Duration::from_secs(connection.connect_timeout_secs),
    })
}

/// Print the rendered report and terminate with its exit code.
pub fn finish(text: String, code: i32) -> Result<()> {
    print!("{text}");
    if code != 0 {
        std::process::exit(1);
    }
    Ok(())
}
