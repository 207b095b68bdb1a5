use tally_core::Company;

use crate::app_config::AppConfig;
use crate::args::CompanyCommand;
use crate::commands::collection;

pub async fn company_cmd(config: &AppConfig, subcommand: CompanyCommand) -> anyhow::Result<()> {
    match subcommand {
        CompanyCommand::List(args) => collection::list_cmd::<Company>(config, args).await,
        CompanyCommand::Create(fields) => {
            collection::create_cmd::<Company>(config, fields.into_draft()).await
        }
        CompanyCommand::Update(args) => {
            collection::update_cmd::<Company>(config, &args.id, args.fields.into_draft()).await
        }
        CompanyCommand::Delete(args) => collection::delete_cmd::<Company>(config, args).await,
    }
}
