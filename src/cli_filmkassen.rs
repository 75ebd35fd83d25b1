use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use kassen::api::ApiError;
use kassen::cli_style::{self, get_styles, TableBuilder};
use kassen::config::{AppConfig, AppKind, CliConfig, FileConfig};
use kassen::filmkassen::messages::LOGOUT_FAILED;
use kassen::filmkassen::models::{CollectionDetail, CollectionUpdate, Movie, MovieSummary};
use kassen::filmkassen::{FilmRoute, Filmkassen};
use kassen::shell::{self, parse_path, with_spinner, CommandExecutionResult, ShellApp};

#[derive(Parser, Debug)]
#[command(styles = get_styles(), name = "filmkassen", about = "Danske film og dine filmkasser")]
struct CliArgs {
    /// Path to a TOML config file; its [filmkassen] section overrides flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Base URL of the Filmkassen API.
    #[clap(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds, 0 disables it.
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
    /// Navigates to a route, e.g. `open /movie/12`.
    Open { path: String },

    /// Searches films by title, optionally narrowed by director.
    Search {
        title: String,
        #[clap(long)]
        director: Option<String>,
    },

    /// Shows one film.
    Movie { id: i64 },

    /// Searches directors by name.
    Directors { name: String },

    /// Shows a director and their films.
    Director { id: i64 },

    /// Creates an account. Log in afterwards.
    Register {
        username: String,
        email: String,
        password: String,
    },

    Login { username: String, password: String },

    Logout,

    /// Shows the logged in user.
    Whoami,

    /// Lists your filmkasser.
    Collections,

    /// Shows one filmkasse with its films.
    Collection { id: i64 },

    CreateCollection {
        name: String,
        #[clap(long)]
        description: Option<String>,
    },

    UpdateCollection {
        id: i64,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        description: Option<String>,
    },

    DeleteCollection { id: i64 },

    /// Adds a film to a filmkasse.
    AddMovie {
        collection_id: i64,
        movie_id: i64,
        #[clap(long)]
        note: Option<String>,
    },

    RemoveMovie { collection_id: i64, movie_id: i64 },

    /// Replaces the note on a film in a filmkasse. Omit the note to clear it.
    Note {
        collection_id: i64,
        movie_id: i64,
        note: Option<String>,
    },

    /// Shows the API and session file in use.
    Where,

    /// Close this program.
    Exit,
}

struct FilmShell {
    app: Filmkassen,
    config: AppConfig,
    location: String,
}

impl FilmShell {
    fn failure(&self, store_error: Option<String>, err: ApiError) -> CommandExecutionResult {
        debug!("Command failed: {:?}", err);
        CommandExecutionResult::Error(store_error.unwrap_or_else(|| err.to_string()))
    }

    async fn open(&mut self, path: &str) -> CommandExecutionResult {
        let logged_in = self.app.user.is_logged_in();
        if let Some(target) = self.app.router.resolve(path) {
            self.app.router.guard(&target, logged_in);
        }
        let Some(route) = self.app.resolve(path) else {
            cli_style::print_not_found(&format!("Siden {}", path));
            return CommandExecutionResult::Ok;
        };
        self.location = route.path();

        match route {
            FilmRoute::Home => {
                let results = self.app.movies.state().read(|s| s.search_results.clone());
                cli_style::print_section_header("Filmkassen");
                if results.is_empty() {
                    cli_style::print_empty_list("Søg efter film med `search <titel>`");
                } else {
                    print_movie_table(&results);
                }
                cli_style::print_section_footer();
                CommandExecutionResult::Ok
            }
            FilmRoute::MovieDetail { id } => self.show_movie(id).await,
            FilmRoute::Director { id } => self.show_director(id).await,
            FilmRoute::Login => {
                cli_style::print_section_header("Log ind");
                cli_style::print_list_item("login <brugernavn> <adgangskode>", 0);
                cli_style::print_section_footer();
                CommandExecutionResult::Ok
            }
            FilmRoute::Register => {
                cli_style::print_section_header("Opret bruger");
                cli_style::print_list_item("register <brugernavn> <email> <adgangskode>", 0);
                cli_style::print_section_footer();
                CommandExecutionResult::Ok
            }
            FilmRoute::Collections => self.list_collections().await,
        }
    }

    async fn show_movie(&mut self, id: i64) -> CommandExecutionResult {
        self.location = FilmRoute::MovieDetail { id }.path();
        let result = with_spinner("Henter film", self.app.movies.get_movie_details(id)).await;
        match result {
            Ok(movie) => {
                print_movie(&movie);
                CommandExecutionResult::Ok
            }
            Err(err) if err.is_not_found() => {
                cli_style::print_not_found("Filmen");
                CommandExecutionResult::Ok
            }
            Err(err) => self.failure(self.app.movies.state().error(), err),
        }
    }

    async fn show_director(&mut self, id: i64) -> CommandExecutionResult {
        self.location = FilmRoute::Director { id }.path();
        let request = self.app.movies.get_director_movies(id);
        let result = with_spinner("Henter instruktør", request).await;
        match result {
            Ok(found) => {
                cli_style::print_section_header(&found.director.name);
                cli_style::print_optional("DFI", found.director.dfi_id.as_deref());
                if let Some(bio) = found.director.bio.as_deref() {
                    cli_style::print_paragraph(bio);
                }
                if found.movies.is_empty() {
                    cli_style::print_empty_list("Ingen film");
                } else {
                    print_movie_table(&found.movies);
                }
                cli_style::print_section_footer();
                CommandExecutionResult::Ok
            }
            Err(err) if err.is_not_found() => {
                cli_style::print_not_found("Instruktøren");
                CommandExecutionResult::Ok
            }
            Err(err) => self.failure(self.app.movies.state().error(), err),
        }
    }

    async fn list_collections(&mut self) -> CommandExecutionResult {
        self.location = FilmRoute::Collections.path();
        let request = self.app.collections.fetch_collections();
        let result = with_spinner("Henter filmkasser", request).await;
        match result {
            Ok(collections) => {
                cli_style::print_section_header("Mine filmkasser");
                if collections.is_empty() {
                    cli_style::print_empty_list("Ingen filmkasser endnu");
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
}

#[async_trait]
impl ShellApp for FilmShell {
    type Cli = InnerCli;

    fn name(&self) -> &'static str {
        "filmkassen"
    }

    fn location(&self) -> String {
        self.location.clone()
    }

    async fn execute(&mut self, cli: InnerCli) -> CommandExecutionResult {
        match cli.command {
            InnerCommand::Open { path } => self.open(&path).await,
            InnerCommand::Search { title, director } => {
                let request = self.app.movies.search_movies(&title, director.as_deref());
                match with_spinner("Søger", request).await {
                    Ok(response) => {
                        self.location = FilmRoute::Home.path();
                        cli_style::print_section_header("Søgeresultater");
                        cli_style::print_key_value(
                            "Fundet",
                            &cli_style::count_of(response.movies.len(), response.total),
                        );
                        print_movie_table(&response.movies);
                        cli_style::print_section_footer();
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.movies.state().error(), err),
                }
            }
            InnerCommand::Movie { id } => self.show_movie(id).await,
            InnerCommand::Directors { name } => {
                match with_spinner("Søger", self.app.movies.search_directors(&name)).await {
                    Ok(directors) => {
                        cli_style::print_section_header("Instruktører");
                        if directors.is_empty() {
                            cli_style::print_empty_list("Ingen instruktører fundet");
                        }
                        for d in &directors {
                            cli_style::print_list_item(&format!("{}  {}", d.id, d.name), 0);
                        }
                        cli_style::print_section_footer();
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.movies.state().error(), err),
                }
            }
            InnerCommand::Director { id } => self.show_director(id).await,
            InnerCommand::Register {
                username,
                email,
                password,
            } => match self.app.user.register(&username, &email, &password).await {
                Ok(response) => {
                    cli_style::print_success(&format!(
                        "Bruger {} oprettet, log ind for at fortsætte",
                        response.user.username
                    ));
                    self.location = FilmRoute::Login.path();
                    CommandExecutionResult::Ok
                }
                Err(err) => self.failure(self.app.user.state().error(), err),
            },
            InnerCommand::Login { username, password } => {
                match self.app.user.login(&username, &password).await {
                    Ok(response) => {
                        info!("Logged in as {}", response.user.username);
                        let username = &response.user.username;
                        cli_style::print_success(&format!("Logget ind som {}", username));
                        self.location = FilmRoute::Home.path();
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.user.state().error(), err),
                }
            }
            InnerCommand::Logout => match self.app.user.logout().await {
                Ok(()) => {
                    cli_style::print_success("Logget ud");
                    self.location = FilmRoute::Home.path();
                    CommandExecutionResult::Ok
                }
                Err(err) => self.failure(Some(LOGOUT_FAILED.to_string()), err),
            },
            InnerCommand::Whoami => {
                match self.app.user.state().read(|s| s.user.clone()) {
                    Some(user) => {
                        cli_style::print_key_value("Bruger", &user.username);
                        cli_style::print_optional("Email", Some(user.email.as_str()));
                    }
                    None => cli_style::print_warning("Ikke logget ind"),
                }
                CommandExecutionResult::Ok
            }
            InnerCommand::Collections => self.list_collections().await,
            InnerCommand::Collection { id } => {
                let request = self.app.collections.get_collection_details(id);
                match with_spinner("Henter filmkasse", request).await {
                    Ok(detail) => {
                        print_collection(&detail);
                        CommandExecutionResult::Ok
                    }
                    Err(err) if err.is_not_found() => {
                        self.app.collections.clear_current_collection();
                        cli_style::print_not_found("Filmkassen");
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.collections.state().error(), err),
                }
            }
            InnerCommand::CreateCollection { name, description } => {
                let request = self
                    .app
                    .collections
                    .create_collection(&name, description.as_deref());
                match request.await {
                    Ok(created) => {
                        cli_style::print_success(&format!(
                            "Filmkasse {} oprettet ({})",
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
                let update = CollectionUpdate {
                    name: name.as_deref(),
                    description: description.as_deref(),
                };
                match self.app.collections.update_collection(id, &update).await {
                    Ok(updated) => {
                        cli_style::print_success(&format!("Filmkasse {} opdateret", updated.name));
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.collections.state().error(), err),
                }
            }
            InnerCommand::DeleteCollection { id } => {
                match self.app.collections.delete_collection(id).await {
                    Ok(()) => {
                        cli_style::print_success("Filmkasse slettet");
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.collections.state().error(), err),
                }
            }
            InnerCommand::AddMovie {
                collection_id,
                movie_id,
                note,
            } => {
                let request = self
                    .app
                    .collections
                    .add_movie_to_collection(collection_id, movie_id, note.as_deref());
                match request.await {
                    Ok(entry) => {
                        cli_style::print_success(&format!(
                            "{} tilføjet til filmkassen",
                            entry.movie.title
                        ));
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.collections.state().error(), err),
                }
            }
            InnerCommand::RemoveMovie {
                collection_id,
                movie_id,
            } => {
                let request = self
                    .app
                    .collections
                    .remove_movie_from_collection(collection_id, movie_id);
                match request.await {
                    Ok(()) => {
                        cli_style::print_success("Film fjernet fra filmkassen");
                        CommandExecutionResult::Ok
                    }
                    Err(err) => self.failure(self.app.collections.state().error(), err),
                }
            }
            InnerCommand::Note {
                collection_id,
                movie_id,
                note,
            } => {
                let request = self
                    .app
                    .collections
                    .update_movie_note(collection_id, movie_id, note.as_deref());
                match request.await {
                    Ok(_) => {
                        cli_style::print_success("Note gemt");
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
}

fn print_movie_table(movies: &[MovieSummary]) {
    let mut table = TableBuilder::new(&["id", "titel", "år", "instruktør"]);
    for m in movies {
        table.add_row(vec![
            m.id.to_string(),
            cli_style::truncate(&m.title, 40),
            m.year.map(|y| y.to_string()).unwrap_or_default(),
            m.director.clone().unwrap_or_default(),
        ]);
    }
    if table.is_empty() {
        cli_style::print_empty_list("Ingen film fundet");
    } else {
        table.print();
    }
}

fn print_movie(movie: &Movie) {
    let summary = &movie.summary;
    cli_style::print_section_header(&summary.title);
    cli_style::print_optional("År", summary.year.map(|y| y.to_string()).as_deref());
    cli_style::print_optional("Instruktør", summary.director.as_deref());
    if let Some(cast) = movie.cast.as_ref().filter(|c| !c.is_empty()) {
        cli_style::print_key_value("Medvirkende", &cast.join(", "));
    }
    cli_style::print_optional("Filmstriben", movie.videotek_url.as_deref());
    if let Some(description) = movie.description.as_deref() {
        println!();
        cli_style::print_paragraph(description);
    }
    cli_style::print_section_footer();
}

fn print_collection(detail: &CollectionDetail) {
    cli_style::print_section_header(&detail.collection.name);
    cli_style::print_optional("Beskrivelse", detail.collection.description.as_deref());
    if detail.movies.is_empty() {
        cli_style::print_empty_list("Ingen film i filmkassen");
    }
    for entry in &detail.movies {
        cli_style::print_list_item(&format!("{}  {}", entry.movie.id, entry.movie.title), 0);
        if let Some(note) = entry.note.as_deref() {
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
    let config = AppConfig::resolve(&cli_config, file_config, AppKind::Filmkassen)
        .context("Failed to resolve configuration")?;
    let client = config.build_client()?;

    let app = Filmkassen::new(client);
    if app.user.verify_token() {
        debug!("Restored session from {:?}", config.storage_path);
    }

    let mut shell = FilmShell {
        app,
        location: FilmRoute::Home.path(),
        config,
    };

    if !cli_args.command.is_empty() {
        return shell::run_once(&mut shell, &cli_args.command).await;
    }

    let user = shell
        .app
        .user
        .state()
        .read(|s| s.user.as_ref().map(|u| u.username.clone()))
        .unwrap_or_else(|| "ikke logget ind".to_string());
    let welcome = [
        ("API", shell.config.base_url.clone()),
        ("Bruger", user),
    ];
    shell::run_interactive(&mut shell, &welcome).await
}
