//! Full pipeline: apply the changeset, then verify the resulting
//! catalog state over a fresh connection.

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common;
use crate::render;
use anyhow::Result;
use sw_core::Changeset;
use sw_db::{PgCatalog, PgSession};

pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let config = common::load_config(global)?;

    // Resolve everything fallible-by-configuration before touching the
    // network: battery name, changeset content, credentials.
    let battery = config.battery(&args.battery)?;
    let changeset = Changeset::load(&args.changeset)?;
    println!(
        "Loaded changeset {} ({} bytes)",
        changeset.path().display(),
        changeset.byte_len()
    );
    let target = common::connect_target(&config.connection)?;

    println!("Connecting to {target}");
    let pool = sw_db::connect(&target).await?;
    let mut session = PgSession::open(pool).await?;
    let result = sw_db::execute(&mut session, &changeset, args.mode.into()).await;

    if !result.succeeded() {
        // Execution failures are fatal to the invocation; verification
        // never runs against a half-applied changeset.
        let (text, code) = render::render(Some(&result), None);
        return common::finish(text, code);
    }

    // Commit-then-disconnect-then-reconnect: the executor's pool is
    // closed, so this fresh read path can only observe committed
    // state.
    println!("Reconnecting for verification");
    let catalog = PgCatalog::new(sw_db::connect(&target).await?);
    let outcome = sw_verify::verify(&catalog, &battery).await;
    catalog.close().await;
    let report = outcome?;

    let (text, code) = render::render(Some(&result), Some((&args.battery, &report)));
    common::finish(text, code)
}
