use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use kassen::api::ApiError;
use kassen::cli_style::{self, get_styles, TableBuilder};
use kassen::config::{AppConfig, AppKind, CliConfig, FileConfig};
use kassen::mitsmk::models::{Artwork, CollectionDetails};
use kassen::mitsmk::{MitSmk, SmkRoute};
use kassen::session::SessionEvent;
use kassen::shell::{self, parse_path, with_spinner, CommandExecutionResult, ShellApp};

#[derive(Parser, Debug)]
#[command(styles = get_styles(), name = "mitsmk", about = "Kunst fra Statens Museum for Kunst")]
struct CliArgs {
    /// Path to a TOML config file; its [mitsmk] section overrides flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Base URL of the MitSMK API.
    #[clap(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds. No timeout unless set.
    #[clap(long)]
    pub timeout_sec: Option<u64>,

    /// File holding the session token.
    #[clap(long, value_parser = parse_path)]
    pub storage: Option<PathBuf>,

    /// Run a single shell command and exit.
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Parser)]
#[command(styles = get_styles(), name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Navigates to a route, e.g. `open /artwork/KMS1`.
    Open { path: String },

    /// Searches artworks, first page.
    Search { query: String },

    /// Fetches the next page of the current search.
    More,

    /// Shows one artwork by object number.
    Artwork { object_number: String },

    /// Creates an account. Log in afterwards.
    Register {
        username: String,
        email: String,
        password: String,
    },

    Login { username: String, password: String },

    /// Forgets the session on this machine.
    Logout,

    Whoami,

    /// Lists your collections.
    Collections,

    /// Shows one collection with its artworks.
    Collection { id: Uuid },

    CreateCollection {
        name: String,
        #[clap(long)]
        description: Option<String>,
    },

    UpdateCollection {
        id: Uuid,
        name: String,
        #[clap(long)]
        description: Option<String>,
    },

    DeleteCollection { id: Uuid },

    /// Adds an artwork (by its id) to a collection.
    AddArtwork {
        collection_id: Uuid,
        artwork_id: Uuid,
        #[clap(long)]
        note: Option<String>,
    },

    RemoveArtwork { collection_id: Uuid, artwork_id: Uuid },

    /// Shows the API and session file in use.
    Where,

    /// Close this program.
    Exit,
}

struct SmkShell {
    app: MitSmk,
    config: AppConfig,
    events: broadcast::Receiver<SessionEvent>,
    location: String,
}

impl SmkShell {
    fn failure(&self, store_error: Option<String>, err: ApiError) -> CommandExecutionResult {
        debug!("Command failed: {:?}", err);
        CommandExecutionResult::Error(store_error.unwrap_or_else(|| err.to_string()))
    }

    async fn open(&mut self, path: &str) -> CommandExecutionResult {
        let authenticated = self.app.auth.is_authenticated();
        if let Some(target) = self.app.router.resolve(path) {
            self.app.router.guard(&target, authenticated);
        }
        let Some(route) = self.app.resolve(path) else {
            cli_style::print_not_found(&format!("Siden {}", path));
            return CommandExecutionResult::Ok;
        };
        self.location = route.path();

        match route {
            SmkRoute::Home => {
                self.print_search_results();
                CommandExecutionResult::Ok
            }
            SmkRoute::ArtworkDetail { object_number } => self.show_artwork(&object_number).await,
            SmkRoute::Login => {
                cli_style::print_section_header("Log ind");
                cli_style::print_list_item("login <brugernavn> <adgangskode>", 0);
                cli_style::print_section_footer();
                CommandExecutionResult::Ok
            }
            SmkRoute::Register => {
                cli_style::print_section_header("Opret bruger");
                cli_style::print_list_item("register <brugernavn> <email> <adgangskode>", 0);
                cli_style::print_section_footer();
                CommandExecutionResult::Ok
            }
            SmkRoute::Collections => self.list_collections().await,
            SmkRoute::CollectionDetail { id } => self.show_collection(id).await,
        }
    }

    fn print_search_results(&self) {
        let state = self.app.artworks.state().snapshot();
        let title = if state.search_query.is_empty() {
            "MitSMK".to_string()
        } else {
            format!("Søgning: {}", state.search_query)
        };
        cli_style::print_section_header(&title);
        if state.search_results.is_empty() {
            cli_style::print_empty_list("Søg efter kunstværker med `search <tekst>`");
        } else {
            cli_style::print_key_value(
                "Viser",
                &cli_style::count_of(state.search_results.len(), state.total_results),
            );
            print_artwork_table(&state.search_results);
            if state.has_more() {
                cli_style::print_empty_list("Skriv `more` for flere resultater");
            }
        }
        cli_style::print_section_footer();
    }

    async fn show_artwork(&mut self, object_number: &str) -> CommandExecutionResult {
        self.location = SmkRoute::ArtworkDetail {
            object_number: object_number.to_string(),
        }
        .path();
        let request = self.app.artworks.get_artwork(object_number);
        let result = with_spinner("Henter kunstværk", request).await;
        match result {
            Ok(artwork) => {
                print_artwork(&artwork);
                CommandExecutionResult::Ok
            }
            Err(err) if err.is_not_found() => {
                cli_style::print_not_found("Kunstværket");
                CommandExecutionResult::Ok
            }
            Err(err) => self.failure(self.app.artworks.state().error(), err),
        }
    }

    async fn list_collections(&mut self) -> CommandExecutionResult {
        self.location = SmkRoute::Collections.path();
        let request = self.app.collections.fetch_collections();
        let result = with_spinner("Henter samlinger", request).await;
        match result {
            Ok(collections) => {
                cli_style::print_section_header("Mine samlinger");
                if collections.is_empty() {
                    cli_style::print_empty_list("Ingen samlinger endnu");
                } else {
                    let mut table = TableBuilder::new(&["id", "navn", "beskrivelse"]);
                    for c in &collections {
                        table.add_row(vec![
                            c.id.to_string(),
                            c.name.clone(),
                            cli_style::truncate(c.description.as_deref().unwrap_or(""), 40),
                        ]);
                    }
                    table.print();
                }
                cli_style::print_section_footer();
                CommandExecutionResult::Ok
            }
            Err(err) => self.failure(self.app.collections.state().error(), err),
        }
    }

    async fn show_collection(&mut self, id: Uuid) -> CommandExecutionResult {
        self.location = SmkRoute::CollectionDetail { id }.path();
        let request = self.app.collections.fetch_collection_details(id);
        match with_spinner("Henter samling", request).await {
            Ok(details) => {
                print_collection(&details);
                CommandExecutionResult::Ok
            }
            Err(err) if err.is_not_found() => {
                self.app.collections.clear_current_collection();
                cli_style::print_not_found("Samlingen");
                CommandExecutionResult::Ok
            }
            Err(err) => self.failure(self.app.collections.state().error(), err),
        }
    }

    /// True when the backend rejected the token since the last call.
    fn drain_session_events(&mut self) -> bool {
        let mut unauthorized = false;
        loop {
            match self.events.try_recv() {
                Ok(SessionEvent::Unauthorized) => unauthorized = true,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!("Missed {} session events", skipped);
                    unauthorized = true;
                }
                Err(_) => break,
            }
        }
        unauthorized
    }

    async fn search(&mut self, query: &str, more: bool) -> CommandExecutionResult {
        let result = if more {
            with_spinner("Henter flere", self.app.artworks.load_more()).await
        } else {
            with_spinner("Søger", self.app.artworks.search_artworks(query, 0)).await
        };
        match result {
            Ok(Some(_)) => {
                self.location = SmkRoute::Home.path();
                self.print_search_results();
                CommandExecutionResult::Ok
            }
            Ok(None) => {
                cli_style::print_warning("Intet at søge efter");
                CommandExecutionResult::Ok
            }
            Err(err) => self.failure(self.app.artworks.state().error(), err),
        }
    }
}

#[async_trait]
impl ShellApp for SmkShell {
    type Cli = InnerCli;

    fn name(&self) -> &'static str {
        "mitsmk"
    }

    fn location(&self) -> String {
        self.location.clone()
    }

    async fn execute(&mut self, cli: InnerCli) -> CommandExecutionResult {
        match cli.command {
            InnerCommand::Open { path } => self.open(&path).await,
            InnerCommand::Search { query } => self.search(&query, false).await,
            InnerCommand::More => self.search("", true).await,
            InnerCommand::Artwork { object_number } => self.show_artwork(&object_number).await,
            InnerCommand::Register {
                username,
                email,
                password,
            } => match self.app.auth.register(&username, &email, &password).await {
                Ok(user) => {
                    cli_style::print_success(&format!(
                        "Bruger {} oprettet, log ind for at fortsætte",
                        user.username
                    ));
                    self.location = SmkRoute::Login.path();
                    CommandExecutionResult::Ok
                }
                Err(err) => self.failure(self.app.auth.state().error(), err),
            },
            InnerCommand::Login { username, password } => {
                match self.app.auth.login(&username, &password).await {
                    Ok(response) => {
                        info!("Logged in as {}", response.user.username);
                        let username = &response.user.username;
                        cli_style::print_success(&format!("Logget ind som {}", username));
                        self.location = SmkRoute::Home.path();
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.auth.state().error(), err),
                }
            }
            InnerCommand::Logout => {
                self.app.auth.logout();
                cli_style::print_success("Logget ud");
                self.location = SmkRoute::Home.path();
                CommandExecutionResult::Ok
            }
            InnerCommand::Whoami => {
                match self.app.auth.state().read(|s| s.user.clone()) {
                    Some(user) => {
                        cli_style::print_key_value("Bruger", &user.username);
                        cli_style::print_key_value("Email", &user.email);
                        cli_style::print_key_value("Oprettet", &user.created_at.to_rfc3339());
                    }
                    None => cli_style::print_warning("Ikke logget ind"),
                }
                CommandExecutionResult::Ok
            }
            InnerCommand::Collections => self.list_collections().await,
            InnerCommand::Collection { id } => self.show_collection(id).await,
            InnerCommand::CreateCollection { name, description } => {
                let request = self
                    .app
                    .collections
                    .create_collection(&name, description.as_deref());
                match request.await {
                    Ok(created) => {
                        cli_style::print_success(&format!(
                            "Samling {} oprettet ({})",
                            created.name, created.id
                        ));
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.collections.state().error(), err),
                }
            }
            InnerCommand::UpdateCollection {
                id,
                name,
                description,
            } => {
                let request = self
                    .app
                    .collections
                    .update_collection(id, &name, description.as_deref());
                match request.await {
                    Ok(updated) => {
                        cli_style::print_success(&format!("Samling {} opdateret", updated.name));
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.collections.state().error(), err),
                }
            }
            InnerCommand::DeleteCollection { id } => {
                match self.app.collections.delete_collection(id).await {
                    Ok(()) => {
                        cli_style::print_success("Samling slettet");
                        if self.location == (SmkRoute::CollectionDetail { id }).path() {
                            self.location = SmkRoute::Collections.path();
                        }
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.collections.state().error(), err),
                }
            }
            InnerCommand::AddArtwork {
                collection_id,
                artwork_id,
                note,
            } => {
                let request = self.app.collections.add_artwork_to_collection(
                    collection_id,
                    artwork_id,
                    note.as_deref(),
                );
                match request.await {
                    Ok(item) => {
                        let title = item.artwork.title.as_deref().unwrap_or("Uden titel");
                        cli_style::print_success(&format!("{} tilføjet til samlingen", title));
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.collections.state().error(), err),
                }
            }
            InnerCommand::RemoveArtwork {
                collection_id,
                artwork_id,
            } => {
                let request = self
                    .app
                    .collections
                    .remove_artwork_from_collection(collection_id, artwork_id);
                match request.await {
                    Ok(()) => {
                        cli_style::print_success("Kunstværk fjernet fra samlingen");
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.collections.state().error(), err),
                }
            }
            InnerCommand::Where => {
                cli_style::print_key_value("API", &self.config.base_url);
                let session = self.config.storage_path.display().to_string();
                cli_style::print_key_value("Session", &session);
                CommandExecutionResult::Ok
            }
            InnerCommand::Exit => CommandExecutionResult::Exit,
        }
    }

    /// A rejected token ends the session: log out and land on the login view.
    async fn after_command(&mut self) {
        if self.drain_session_events() {
            self.app.auth.logout();
            cli_style::print_warning("Sessionen er udløbet, log ind igen");
            let _ = self.open(&SmkRoute::Login.path()).await;
        }
    }
}

fn print_artwork_table(artworks: &[Artwork]) {
    let mut table = TableBuilder::new(&["objektnr.", "titel", "år", "kunstner"]);
    for a in artworks {
        table.add_row(vec![
            a.object_number.clone(),
            cli_style::truncate(a.title.as_deref().unwrap_or("Uden titel"), 40),
            a.year.clone().unwrap_or_default(),
            cli_style::truncate(a.artist_name.as_deref().unwrap_or(""), 30),
        ]);
    }
    table.print();
}

fn print_artwork(artwork: &Artwork) {
    cli_style::print_section_header(artwork.title.as_deref().unwrap_or("Uden titel"));
    cli_style::print_key_value("Id", &artwork.id.to_string());
    cli_style::print_key_value("Objektnummer", &artwork.object_number);
    cli_style::print_optional("Kunstner", artwork.artist_name.as_deref());
    cli_style::print_optional("År", artwork.year.as_deref());
    if let Some(names) = artwork.object_names.as_ref().filter(|n| !n.is_empty()) {
        cli_style::print_key_value("Type", &names.join(", "));
    }
    cli_style::print_key_value(
        "Fri af ophavsret",
        if artwork.public_domain { "ja" } else { "nej" },
    );
    cli_style::print_optional("Billede", artwork.image_thumbnail.as_deref());
    cli_style::print_section_footer();
}

fn print_collection(details: &CollectionDetails) {
    cli_style::print_section_header(&details.collection.name);
    cli_style::print_optional("Beskrivelse", details.collection.description.as_deref());
    if details.artworks.is_empty() {
        cli_style::print_empty_list("Ingen kunstværker i samlingen");
    }
    for item in &details.artworks {
        let artwork = &item.artwork;
        cli_style::print_list_item(
            &format!(
                "{}  {}",
                artwork.object_number,
                artwork.title.as_deref().unwrap_or("Uden titel")
            ),
            0,
        );
        if let Some(note) = item.note.as_deref() {
            cli_style::print_list_item(note, 2);
        }
    }
    cli_style::print_section_footer();
}

#[tokio::main]
async fn main() -> Result<()> {
    shell::init_logging();
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        base_url: cli_args.base_url.clone(),
        timeout_sec: cli_args.timeout_sec,
        storage_path: cli_args.storage.clone(),
    };
    let config = AppConfig::resolve(&cli_config, file_config, AppKind::MitSmk)
        .context("Failed to resolve configuration")?;
    let client = config.build_client()?;
    let events = client.subscribe();

    let app = MitSmk::new(client);
    if app.auth.check_auth().await {
        debug!("Restored session from {:?}", config.storage_path);
    }

    let mut shell = SmkShell {
        app,
        config,
        events,
        location: SmkRoute::Home.path(),
    };
    // check_auth already logged out if the stored token was rejected.
    shell.drain_session_events();

    if !cli_args.command.is_empty() {
        return shell::run_once(&mut shell, &cli_args.command).await;
    }

    let user = shell
        .app
        .auth
        .state()
        .read(|s| s.user.as_ref().map(|u| u.username.clone()))
        .unwrap_or_else(|| "ikke logget ind".to_string());
    let welcome = [
        ("API", shell.config.base_url.clone()),
        ("Bruger", user),
    ];
    shell::run_interactive(&mut shell, &welcome).await
}
