//! Apply one changeset to the remote database.

use crate::cli::{ApplyArgs, GlobalArgs};
use crate::commands::common;
use crate::render;
use anyhow::Result;
use sw_core::Changeset;
use sw_db::PgSession;

pub async fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let config = common::load_config(global)?;

    // Load before connecting: an unreadable changeset must abort the
    // invocation with zero connection attempts.
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

    let (text, code) = render::render(Some(&result), None);
    common::finish(text, code)
}
