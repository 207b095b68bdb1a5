use tally_core::Supplier;

use crate::app_config::AppConfig;
use crate::args::SupplierCommand;
use crate::commands::collection;

pub async fn supplier_cmd(config: &AppConfig, subcommand: SupplierCommand) -> anyhow::Result<()> {
    match subcommand {
        SupplierCommand::List(args) => collection::list_cmd::<Supplier>(config, args).await,
        SupplierCommand::Create(fields) => {
            collection::create_cmd::<Supplier>(config, fields.into_draft()).await
        }
        SupplierCommand::Update(args) => {
            collection::update_cmd::<Supplier>(config, &args.id, args.fields.into_draft()).await
        }
        SupplierCommand::Delete(args) => collection::delete_cmd::<Supplier>(config, args).await,
    }
}
