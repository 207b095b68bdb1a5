use tally_core::Establishment;

use crate::app_config::AppConfig;
use crate::args::EstablishmentCommand;
use crate::commands::collection;

pub async fn establishment_cmd(
    config: &AppConfig,
    subcommand: EstablishmentCommand,
) -> anyhow::Result<()> {
    match subcommand {
        EstablishmentCommand::List(args) => {
            collection::list_cmd::<Establishment>(config, args).await
        }
        EstablishmentCommand::Create(fields) => {
            collection::create_cmd::<Establishment>(config, fields.into_draft()).await
        }
        EstablishmentCommand::Update(args) => {
            collection::update_cmd::<Establishment>(config, &args.id, args.fields.into_draft())
                .await
        }
        EstablishmentCommand::Delete(args) => {
            collection::delete_cmd::<Establishment>(config, args).await
        }
    }
}
