//! Command definitions and per-kind dispatch.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context};
use biblioteca_app::console::{ConsoleError, ListView, View};
use biblioteca_app::{load_stats, Book, Dvd, Magazine};
use biblioteca_http::{ApiClient, CatalogService, ResourceService};
use biblioteca_kernel::{current_year, CatalogEntity, CatalogKind, EntityId, FormError};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "biblioteca", version, about = "Library catalog console")]
pub struct Cli {
    /// Backend base URL, overriding configuration.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Totals per kind plus availability.
    Dashboard,
    /// List every entity of a kind, optionally filtered locally.
    List {
        kind: CatalogKind,
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Show one entity.
    Show { kind: CatalogKind, id: EntityId },
    /// Backend full-text search.
    Search { kind: CatalogKind, query: String },
    /// Backend filter by field, e.g. `filter dvds duration 90..120`.
    Filter {
        kind: CatalogKind,
        field: String,
        value: String,
    },
    /// Only entities marked available.
    Available { kind: CatalogKind },
    /// Create an entity from `--set field=value` pairs.
    Create {
        kind: CatalogKind,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
    /// Update an entity; unset fields keep their current values.
    Update {
        kind: CatalogKind,
        id: EntityId,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
    /// Delete an entity after confirmation.
    Delete {
        kind: CatalogKind,
        id: EntityId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Print the form fields and rules for a kind.
    Fields { kind: CatalogKind },
}

impl Command {
    fn kind(&self) -> Option<CatalogKind> {
        match self {
            Command::Dashboard => None,
            Command::List { kind, .. }
            | Command::Show { kind, .. }
            | Command::Search { kind, .. }
            | Command::Filter { kind, .. }
            | Command::Available { kind }
            | Command::Create { kind, .. }
            | Command::Update { kind, .. }
            | Command::Delete { kind, .. }
            | Command::Fields { kind } => Some(*kind),
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.to_string()))
        .filter(|(field, _)| !field.is_empty())
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))
}

pub async fn run(command: Command, client: ApiClient) -> anyhow::Result<()> {
    match command.kind() {
        None => dashboard(client).await,
        Some(CatalogKind::Books) => dispatch::<Book>(command, client).await,
        Some(CatalogKind::Magazines) => dispatch::<Magazine>(command, client).await,
        Some(CatalogKind::Dvds) => dispatch::<Dvd>(command, client).await,
    }
}

async fn dashboard(client: ApiClient) -> anyhow::Result<()> {
    let stats = load_stats(
        &ResourceService::<Book>::new(client.clone()),
        &ResourceService::<Magazine>::new(client.clone()),
        &ResourceService::<Dvd>::new(client),
    )
    .await;
    println!("{}", stats);
    Ok(())
}

async fn dispatch<E: CatalogEntity>(command: Command, client: ApiClient) -> anyhow::Result<()> {
    let service = ResourceService::<E>::new(client);

    match command {
        Command::Dashboard => bail!("the dashboard is not tied to one kind"),
        Command::List { query, .. } => {
            let mut view = ListView::new(service);
            view.load()
                .await
                .with_context(|| format!("failed to load {}", E::KIND))?;
            if let Some(query) = query {
                view.set_query(query);
            }
            print_view(view.render());
        }
        Command::Show { id, .. } => {
            let entity = service
                .get(id)
                .await
                .with_context(|| format!("failed to fetch {} #{}", E::KIND.singular(), id))?;
            print!("{}", entity.card());
        }
        Command::Search { query, .. } => {
            let found = service.search(&query).await?;
            print_entities(&found);
        }
        Command::Filter { field, value, .. } => {
            let found = service.filter(&field, &value).await?;
            print_entities(&found);
        }
        Command::Available { .. } => {
            let found = service.available().await?;
            print_entities(&found);
        }
        Command::Fields { .. } => print_fields::<E>(),
        Command::Create { set, .. } => {
            let mut view = ListView::new(service);
            view.open_create(current_year());
            save(&mut view, &set).await?;
        }
        Command::Update { id, set, .. } => {
            let existing = service
                .get(id)
                .await
                .with_context(|| format!("failed to fetch {} #{}", E::KIND.singular(), id))?;
            let mut view = ListView::new(service);
            view.open_edit(&existing, current_year())?;
            save(&mut view, &set).await?;
        }
        Command::Delete { id, yes, .. } => {
            if !yes && !confirm(&format!("Delete {} #{}?", E::KIND.singular(), id))? {
                println!("Deletion cancelled");
                return Ok(());
            }
            let existing = service
                .get(id)
                .await
                .with_context(|| format!("failed to fetch {} #{}", E::KIND.singular(), id))?;
            let mut view = ListView::new(service);
            view.request_delete(existing);
            let outcome = view.confirm_delete().await;
            if let Some(notice) = view.last_notice() {
                println!("{}", notice);
            }
            outcome?;
        }
    }
    Ok(())
}

async fn save<E, S>(
    view: &mut ListView<E, S>,
    assignments: &[(String, String)],
) -> anyhow::Result<()>
where
    E: CatalogEntity,
    S: CatalogService<E>,
{
    for (field, value) in assignments {
        view.form_mut().set(field, value.as_str())?;
    }

    match view.submit_form(current_year()).await {
        Ok(saved) => {
            if let Some(notice) = view.last_notice() {
                println!("{}", notice);
            }
            print!("{}", saved.card());
            Ok(())
        }
        Err(ConsoleError::Form(FormError::Invalid(errors))) => {
            for error in errors.iter() {
                eprintln!("  {}: {}", error.field, error.message);
            }
            bail!("the {} was not saved", E::KIND.singular())
        }
        Err(ConsoleError::Form(err)) => Err(err.into()),
        Err(ConsoleError::Api(_)) => {
            let message = view
                .form()
                .submit_error()
                .unwrap_or("request failed")
                .to_string();
            Err(anyhow!(message))
        }
    }
}

fn print_view(view: View) {
    match view {
        View::Loading { placeholders } => {
            for _ in 0..placeholders {
                println!("...");
            }
        }
        View::Empty(message) => println!("{}", message),
        View::Cards(cards) => {
            for card in cards {
                println!("{}", card);
            }
        }
    }
}

fn print_entities<E: CatalogEntity>(entities: &[E]) {
    if entities.is_empty() {
        println!("No {} match the search", E::KIND);
        return;
    }
    for entity in entities {
        println!("{}", entity.card());
    }
}

fn print_fields<E: CatalogEntity>() {
    for field in E::schema().fields() {
        println!(
            "{:<20} {:<18} {}",
            field.key,
            field.name,
            field.rules().join(", ")
        );
    }
    let filters: Vec<&str> = E::filters().iter().map(|filter| filter.name).collect();
    if !filters.is_empty() {
        println!("\nfilters: {}", filters.join(", "));
    }
}

/// Ask on stdout, read one line from stdin. Anything but yes is a no.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{} [y/N] ", prompt)?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
