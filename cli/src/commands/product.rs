use tally_core::Product;

use crate::app_config::AppConfig;
use crate::args::ProductCommand;
use crate::commands::collection;

pub async fn product_cmd(config: &AppConfig, subcommand: ProductCommand) -> anyhow::Result<()> {
    match subcommand {
        ProductCommand::List(args) => collection::list_cmd::<Product>(config, args).await,
        ProductCommand::Create(fields) => {
            collection::create_cmd::<Product>(config, fields.into_draft()).await
        }
        ProductCommand::Update(args) => {
            collection::update_cmd::<Product>(config, &args.id, args.fields.into_draft()).await
        }
        ProductCommand::Delete(args) => collection::delete_cmd::<Product>(config, args).await,
    }
}
