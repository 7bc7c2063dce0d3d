//! Run an invariant battery against the remote catalog.

use crate::cli::{GlobalArgs, VerifyArgs};
use crate::commands::common;
use crate::render;
use anyhow::Result;
use sw_db::PgCatalog;

pub async fn execute(args: &VerifyArgs, global: &GlobalArgs) -> Result<()> {
    let config = common::load_config(global)?;
    let battery = config.battery(&args.battery)?;

    let target = common::connect_target(&config.connection)?;
    println!("Connecting to {target}");
    let catalog = PgCatalog::new(sw_db::connect(&target).await?);

    let outcome = sw_verify::verify(&catalog, &battery).await;
    catalog.close().await;
    let report = outcome?;

    let (text, code) = render::render(None, Some((&args.battery, &report)));
    common::finish(text, code)
}
