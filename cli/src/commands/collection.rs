use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use serde::Serialize;

use tally_core::persist::{load_snapshot, save_snapshot, snapshot_path};
use tally_core::{
    Action, CollectionStore, Controller, EntityForm, FilterSet, FormMode, Resource,
};

use crate::app_config::AppConfig;
use crate::args::{DeleteArgs, ListArgs};
use crate::formatters::{print_collection, TableRow};
use crate::service::RestCollection;

fn controller_for<E: Resource>(
    config: &AppConfig,
) -> (CollectionStore<E>, Controller<E, RestCollection<E>>) {
    let store = CollectionStore::<E>::collection();
    let controller = Controller::new(store.clone(), RestCollection::new(&config.server_url));
    (store, controller)
}

/// Load and print one page. `--cached` replays the last snapshot without
/// touching the network; a successful live load refreshes it.
pub async fn list_cmd<E>(config: &AppConfig, args: ListArgs) -> anyhow::Result<()>
where
    E: Resource + TableRow + Serialize,
{
    let cache_path = snapshot_path(&config.cache_dir, E::ENDPOINT);

    if args.cached {
        let snapshot = load_snapshot::<E>(&cache_path)
            .with_context(|| format!("no usable cached page at {}", cache_path.display()))?;
        return print_collection(&snapshot.into_state(), &args.output);
    }

    let (store, controller) = controller_for::<E>(config);

    store.dispatch(Action::SetRowsPerPage(
        args.per_page.unwrap_or(config.per_page),
    ));
    let mut filters = FilterSet::new();
    if let Some(term) = &args.term {
        filters.set_text("search", term);
    }
    for (key, value) in &args.filter {
        filters.set_text(key, value);
    }
    if !filters.is_empty() {
        store.dispatch(Action::SetFilters(filters));
    }
    // after SetFilters: it resets the page to 1
    store.dispatch(Action::SetPage(args.page));

    controller.sync().await;

    let state = store.state();
    if let Some(error) = &state.error {
        bail!("{}", error);
    }

    if let Err(e) = save_snapshot(&cache_path, &state) {
        eprintln!("warning: failed to write cache: {}", e);
    }

    print_collection(&state, &args.output)
}

/// Submit a draft through the form path so server-side 422s come back as
/// per-field messages.
pub async fn create_cmd<E>(config: &AppConfig, draft: E::Draft) -> anyhow::Result<()>
where
    E: Resource,
{
    let (_store, controller) = controller_for::<E>(config);

    let mut form = EntityForm::<E>::create();
    form.switch(FormMode::Create, draft);

    match form.submit(&controller).await {
        Some(entity) => {
            println!("{} created ({})", capitalized(E::NAME), entity.id());
            Ok(())
        }
        None => bail_with_form_errors(&form),
    }
}

pub async fn update_cmd<E>(config: &AppConfig, id: &str, draft: E::Draft) -> anyhow::Result<()>
where
    E: Resource,
{
    let (_store, controller) = controller_for::<E>(config);

    let mut form = EntityForm::<E>::edit(id, draft);

    match form.submit(&controller).await {
        Some(entity) => {
            println!("{} updated ({})", capitalized(E::NAME), entity.id());
            Ok(())
        }
        None => bail_with_form_errors(&form),
    }
}

pub async fn delete_cmd<E>(config: &AppConfig, args: DeleteArgs) -> anyhow::Result<()>
where
    E: Resource,
{
    if !args.yes && !confirm(&format!("Delete {} {}? [y/N] ", E::NAME, args.id))? {
        println!("Aborted");
        return Ok(());
    }

    let (_store, controller) = controller_for::<E>(config);
    controller.delete(&args.id).await?;

    println!("{} deleted ({})", capitalized(E::NAME), args.id);
    Ok(())
}

fn bail_with_form_errors<E: Resource>(form: &EntityForm<E>) -> anyhow::Result<()> {
    let mut rendered = String::new();
    if let Some(alert) = form.alert() {
        rendered.push_str(alert);
    } else {
        rendered.push_str("validation failed");
    }
    for (field, messages) in form.errors() {
        if let Some(first) = messages.first() {
            rendered.push_str(&format!("\n  {}: {}", field, first));
        }
    }
    bail!("{}", rendered)
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
