use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use stockroom_api::{
    client::{ApiClient, InventoryStore, StatusBadge},
    entities::{request::RequestStatus, user::Profile},
    models::{Credentials, NewRequest, NewRequestLine, Request, StockItem, StockItemInput},
};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let api = ApiClient::new(&cli.base_url).context("invalid --base-url")?;
    let mut store = InventoryStore::new(api);
    let credentials = cli.session.credentials();

    let user = match cli.command {
        Commands::Signup => store.signup(credentials).await.context("signup failed")?,
        _ => store.login(credentials).await.context("login failed")?,
    };

    match cli.command {
        Commands::Signup | Commands::Login => {
            if cli.json {
                print_json(&user)?;
            } else {
                let screens: Vec<String> = store
                    .visible_screens()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!("Signed in as {} ({})", user.email, user.profile);
                println!("Screens: {}", screens.join(", "));
            }
        }
        Commands::Stock(command) => handle_stock_command(&mut store, command, cli.json).await?,
        Commands::Requests(command) => {
            handle_requests_command(&mut store, command, cli.json).await?
        }
        Commands::Dashboard => {
            let summary = store.dashboard().await.context("failed to load dashboard")?;
            if cli.json {
                print_json(&summary)?;
            } else {
                println!(
                    "Items: {} ({} critical) • Requests: {} ({} pending)",
                    summary.total_items,
                    summary.critical_items,
                    summary.total_requests,
                    summary.pending_requests
                );
                for level in &summary.stock_levels {
                    println!(
                        "  {:<15} {:>5} / min {:<5}{}",
                        level.name,
                        level.quantity,
                        level.minimum,
                        if level.critical { " CRITICAL" } else { "" }
                    );
                }
            }
        }
    }

    Ok(())
}

async fn handle_stock_command(
    store: &mut InventoryStore,
    command: StockCommands,
    json: bool,
) -> Result<()> {
    match command {
        StockCommands::List(args) => {
            let items: Vec<&StockItem> = match &args.search {
                Some(term) => store.search_stock(term),
                None if args.critical => store.critical_items(),
                None => store.stock().iter().collect(),
            };
            // --search combined with --critical narrows the search hits
            let items: Vec<&StockItem> = items
                .into_iter()
                .filter(|item| !args.critical || item.critical)
                .collect();

            if json {
                print_json(&items)?;
            } else if items.is_empty() {
                println!("No stock items found");
            } else {
                items.into_iter().for_each(render_stock_item);
            }
        }
        StockCommands::Save(args) => {
            let saved = store
                .save_stock_item(args.into())
                .await
                .context("failed to save stock item")?;
            if json {
                print_json(&saved)?;
            } else {
                println!("Saved:");
                render_stock_item(&saved);
            }
        }
        StockCommands::Delete(args) => {
            let deleted = store
                .delete_stock_item(&args.id)
                .await
                .context("failed to delete stock item")?;
            if json {
                print_json(&deleted)?;
            } else {
                println!("Deleted stock item {}", deleted.id);
            }
        }
    }
    Ok(())
}

async fn handle_requests_command(
    store: &mut InventoryStore,
    command: RequestsCommands,
    json: bool,
) -> Result<()> {
    match command {
        RequestsCommands::List => render_requests(store.requests().iter().collect(), json)?,
        RequestsCommands::Mine => render_requests(store.my_requests(), json)?,
        RequestsCommands::Create(args) => {
            let created = store
                .create_request(NewRequest {
                    requester_name: args.requester,
                    items: args.items,
                })
                .await
                .context("failed to create request")?;
            if json {
                print_json(&created)?;
            } else {
                println!("Created:");
                render_request(&created);
            }
        }
        RequestsCommands::Status(args) => {
            let updated = store
                .update_status(args.id, args.status.into())
                .await
                .context("failed to update request status")?;
            if json {
                print_json(&updated)?;
            } else {
                render_request(&updated);
            }
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "stockroom", about = "Stockroom CLI for stock and supply requests", version)]
struct Cli {
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL, help = "API base URL")]
    base_url: String,
    #[command(flatten)]
    session: SessionArgs,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[arg(long, global = true, action = ArgAction::SetTrue, help = "Log HTTP calls to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SessionArgs {
    #[arg(long, help = "Email address for the account")]
    email: String,
    #[arg(long, help = "Password for the account")]
    password: String,
    #[arg(long, value_enum, default_value = "requester")]
    profile: ProfileArg,
}

impl SessionArgs {
    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
            profile: self.profile.into(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Register the account given by --email/--password/--profile
    Signup,
    /// Check credentials and list the screens this profile sees
    Login,
    #[command(subcommand)]
    Stock(StockCommands),
    #[command(subcommand)]
    Requests(RequestsCommands),
    Dashboard,
}

#[derive(Subcommand)]
enum StockCommands {
    List(StockListArgs),
    Save(StockSaveArgs),
    Delete(StockDeleteArgs),
}

#[derive(Args)]
struct StockListArgs {
    #[arg(long, action = ArgAction::SetTrue, help = "Only items at or below their minimum")]
    critical: bool,
    #[arg(long, help = "Case-insensitive description filter")]
    search: Option<String>,
}

#[derive(Args)]
struct StockSaveArgs {
    #[arg(long, help = "Item id; generated by the server when omitted")]
    id: Option<String>,
    #[arg(long)]
    description: String,
    #[arg(long, default_value = "Unidade")]
    unit: String,
    #[arg(long)]
    current: i32,
    #[arg(long)]
    minimum: i32,
    #[arg(long, default_value = "")]
    location: String,
}

impl From<StockSaveArgs> for StockItemInput {
    fn from(args: StockSaveArgs) -> Self {
        StockItemInput {
            id: args.id,
            description: args.description,
            unit_of_measure: args.unit,
            current_quantity: args.current,
            minimum_quantity: args.minimum,
            location: args.location,
        }
    }
}

#[derive(Args)]
struct StockDeleteArgs {
    id: String,
}

#[derive(Subcommand)]
enum RequestsCommands {
    List,
    /// Requests submitted by the logged-in user
    Mine,
    Create(RequestCreateArgs),
    Status(RequestStatusArgs),
}

#[derive(Args)]
struct RequestCreateArgs {
    #[arg(long, help = "Requester name; defaults to the logged-in email")]
    requester: Option<String>,
    #[arg(
        long = "item",
        value_parser = parse_line,
        help = "Line as ITEM_ID=QUANTITY; repeat for more lines"
    )]
    items: Vec<NewRequestLine>,
}

#[derive(Args)]
struct RequestStatusArgs {
    id: i32,
    #[arg(value_enum)]
    status: StatusArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    Requester,
    WarehouseStaff,
    Supervisor,
}

impl From<ProfileArg> for Profile {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Requester => Profile::Requester,
            ProfileArg::WarehouseStaff => Profile::WarehouseStaff,
            ProfileArg::Supervisor => Profile::Supervisor,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Approved,
    Rejected,
    Completed,
}

impl From<StatusArg> for RequestStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Approved => RequestStatus::Approved,
            StatusArg::Rejected => RequestStatus::Rejected,
            StatusArg::Completed => RequestStatus::Completed,
        }
    }
}

fn parse_line(raw: &str) -> std::result::Result<NewRequestLine, String> {
    let (item_id, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ITEM_ID=QUANTITY, got '{}'", raw))?;
    let requested_quantity = quantity
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid quantity '{}': {}", quantity, e))?;
    Ok(NewRequestLine {
        item_id: item_id.trim().to_string(),
        description: None,
        requested_quantity,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_stock_item(item: &StockItem) {
    println!(
        "- [{}] {} • {} {} (min {}) • {}{}",
        item.id,
        item.description,
        item.current_quantity,
        item.unit_of_measure,
        item.minimum_quantity,
        if item.location.is_empty() { "-" } else { item.location.as_str() },
        if item.critical { " • CRITICAL" } else { "" }
    );
}

fn render_request(request: &Request) {
    let badge = StatusBadge::from(request.status);
    let lines: Vec<String> = request
        .items
        .iter()
        .map(|line| format!("{}x {}", line.requested_quantity, line.description))
        .collect();
    println!(
        "- #{} • {} • {} [{}] • {}",
        request.id,
        request.created_at.format("%Y-%m-%d %H:%M"),
        badge.label,
        badge.tone,
        request.requester_name
    );
    println!("    {}", lines.join(", "));
}

fn render_requests(requests: Vec<&Request>, json: bool) -> Result<()> {
    if json {
        return print_json(&requests);
    }
    if requests.is_empty() {
        println!("No requests found");
    }
    requests.into_iter().for_each(render_request);
    Ok(())
}
