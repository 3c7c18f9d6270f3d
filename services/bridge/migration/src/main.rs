use sea_orm_migration::prelude::*;

use ircgate_bridge_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
