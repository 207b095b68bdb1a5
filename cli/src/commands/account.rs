use tally_core::Account;

use crate::app_config::AppConfig;
use crate::args::AccountCommand;
use crate::commands::collection;

pub async fn account_cmd(config: &AppConfig, subcommand: AccountCommand) -> anyhow::Result<()> {
    match subcommand {
        AccountCommand::List(args) => collection::list_cmd::<Account>(config, args).await,
        AccountCommand::Create(fields) => {
            collection::create_cmd::<Account>(config, fields.into_draft()).await
        }
        AccountCommand::Update(args) => {
            collection::update_cmd::<Account>(config, &args.id, args.fields.into_draft()).await
        }
        AccountCommand::Delete(args) => collection::delete_cmd::<Account>(config, args).await,
    }
}
