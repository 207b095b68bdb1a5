use tally_core::Purchase;

use crate::app_config::AppConfig;
use crate::args::PurchaseCommand;
use crate::commands::collection;

pub async fn purchase_cmd(config: &AppConfig, subcommand: PurchaseCommand) -> anyhow::Result<()> {
    match subcommand {
        PurchaseCommand::List(args) => collection::list_cmd::<Purchase>(config, args).await,
        PurchaseCommand::Create(fields) => {
            collection::create_cmd::<Purchase>(config, fields.into_draft()).await
        }
        PurchaseCommand::Update(args) => {
            collection::update_cmd::<Purchase>(config, &args.id, args.fields.into_draft()).await
        }
        PurchaseCommand::Delete(args) => collection::delete_cmd::<Purchase>(config, args).await,
    }
}
