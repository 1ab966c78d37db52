// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! devdeck CLI - compose HTTP requests and keep bookmarked previews

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use devdeck::{
    BodyType, DevdeckConfig, FieldRow, FileStore, HttpClient, HttpMethod, Library, NormalizedResponse,
    Previewer, RequestBody, RequestComposer, RequestDescription, SUPPORTED_METHODS,
};

#[derive(Parser)]
#[command(name = "devdeck", version, about = "HTTP request composer and link previewer")]
struct Cli {
    /// Directory for saved requests and bookmarks
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Request timeout in seconds (none by default)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a request and print the normalized response
    Send(SendArgs),
    /// Re-send a saved request by name or id
    Run {
        name: String,
    },
    /// List saved requests
    Requests,
    /// Fetch a page and print its preview as JSON
    Preview {
        url: String,
        /// Keep the image as a URL instead of a data URL
        #[arg(long)]
        no_inline: bool,
    },
    /// Manage bookmarks
    #[command(subcommand)]
    Bookmark(BookmarkCommand),
    /// List supported methods and body types
    Methods,
}

#[derive(Args)]
struct SendArgs {
    /// HTTP method
    method: HttpMethod,
    /// Target URL (https:// is assumed when no scheme is given)
    url: String,
    /// Header as "Name: value"
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,
    /// Query param as key=value
    #[arg(short = 'q', long = "param")]
    params: Vec<String>,
    /// JSON body
    #[arg(long, group = "body")]
    json: Option<String>,
    /// Raw body
    #[arg(long, group = "body")]
    raw: Option<String>,
    /// Multipart field as key=value
    #[arg(long = "form", group = "body")]
    form: Vec<String>,
    /// Url-encoded field as key=value
    #[arg(long = "urlencoded", group = "body")]
    urlencoded: Vec<String>,
    /// Save the request (and its response) under this name
    #[arg(long)]
    save: Option<String>,
}

#[derive(Subcommand)]
enum BookmarkCommand {
    /// Bookmark a URL with its preview
    Add {
        url: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        no_inline: bool,
    },
    /// List bookmarks
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Remove a bookmark by id
    Remove { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("devdeck=info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = DevdeckConfig::default();
    if let Some(dir) = cli.store {
        config = config.store_dir(dir);
    }
    if let Some(secs) = cli.timeout {
        config = config.timeout(Duration::from_secs(secs));
    }

    match cli.command {
        Command::Send(args) => send(&config, args).await,
        Command::Run { name } => run_saved(&config, &name).await,
        Command::Requests => list_requests(&config),
        Command::Preview { url, no_inline } => preview(config.inline_images(!no_inline), &url).await,
        Command::Bookmark(cmd) => bookmark(&config, cmd).await,
        Command::Methods => {
            let methods: Vec<_> = SUPPORTED_METHODS.iter().map(|m| m.as_str()).collect();
            let bodies: Vec<_> = BodyType::ALL.iter().map(|b| b.as_str()).collect();
            println!("Methods:    {}", methods.join(", "));
            println!("Body types: {}", bodies.join(", "));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_library(config: &DevdeckConfig) -> anyhow::Result<Library<FileStore>> {
    let store = FileStore::open(&config.store_dir)
        .with_context(|| format!("opening store at {}", config.store_dir.display()))?;
    Ok(Library::new(store))
}

fn split_pair(raw: &str, sep: char, what: &str) -> anyhow::Result<FieldRow> {
    let Some((key, value)) = raw.split_once(sep) else {
        bail!("Invalid {} '{}': expected key{}value", what, raw, sep);
    };
    Ok(FieldRow::new(key.trim(), value.trim()))
}

fn rows(raw: &[String], sep: char, what: &str) -> anyhow::Result<Vec<FieldRow>> {
    raw.iter().map(|r| split_pair(r, sep, what)).collect()
}

fn describe(args: &SendArgs) -> anyhow::Result<RequestDescription> {
    let body = if let Some(ref json) = args.json {
        RequestBody::Json(json.clone())
    } else if let Some(ref raw) = args.raw {
        RequestBody::Raw(raw.clone())
    } else if !args.form.is_empty() {
        RequestBody::FormData(rows(&args.form, '=', "form field")?)
    } else if !args.urlencoded.is_empty() {
        RequestBody::UrlEncoded(rows(&args.urlencoded, '=', "form field")?)
    } else {
        RequestBody::None
    };

    Ok(RequestDescription {
        method: args.method,
        url: args.url.clone(),
        params: rows(&args.params, '=', "param")?,
        headers: rows(&args.headers, ':', "header")?,
        body,
    })
}

fn print_response(response: &NormalizedResponse) -> ExitCode {
    println!(
        "HTTP {} {} ({}ms)",
        response.status, response.status_text, response.response_time_ms
    );
    for (name, value) in &response.headers {
        println!("{}: {}", name, value);
    }
    println!();
    println!("{}", response.body);

    if response.is_network_error() {
        ExitCode::from(2)
    } else if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

async fn send(config: &DevdeckConfig, args: SendArgs) -> anyhow::Result<ExitCode> {
    let request = describe(&args)?;
    let composer = RequestComposer::new(HttpClient::with_config(config.client.clone())?);
    let response = composer.submit_request(&request).await;

    if let Some(name) = args.save {
        let library = open_library(config)?;
        let mut saved = library.saved_requests()?;
        saved.save(name.as_str(), request, Some(response.clone()));
        library.save_saved_requests(&saved)?;
        eprintln!("Saved request '{}'", name);
    }

    Ok(print_response(&response))
}

async fn run_saved(config: &DevdeckConfig, name: &str) -> anyhow::Result<ExitCode> {
    let library = open_library(config)?;
    let mut saved = library.saved_requests()?;
    let Some(entry) = saved.find(name) else {
        bail!("No saved request named '{}'", name);
    };
    let request = entry.request.clone();

    let composer = RequestComposer::new(HttpClient::with_config(config.client.clone())?);
    let response = composer.submit_request(&request).await;

    saved.record_response(name, response.clone());
    library.save_saved_requests(&saved)?;

    Ok(print_response(&response))
}

fn list_requests(config: &DevdeckConfig) -> anyhow::Result<ExitCode> {
    let saved = open_library(config)?.saved_requests()?;
    if saved.is_empty() {
        println!("No saved requests");
    }
    for entry in saved.iter() {
        let last = entry
            .response
            .as_ref()
            .map(|r| format!("{} {}", r.status, r.status_text))
            .unwrap_or_else(|| "never sent".to_string());
        println!(
            "{:<20} {:<7} {} [{}]",
            entry.name, entry.request.method.as_str(), entry.request.url, last
        );
    }
    Ok(ExitCode::SUCCESS)
}

async fn preview(config: DevdeckConfig, url: &str) -> anyhow::Result<ExitCode> {
    let previewer = Previewer::with_config(HttpClient::with_config(config.client)?, config.preview);
    let metadata = previewer.fetch_preview(url).await?;
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(ExitCode::SUCCESS)
}

async fn bookmark(config: &DevdeckConfig, cmd: BookmarkCommand) -> anyhow::Result<ExitCode> {
    let library = open_library(config)?;
    let mut bookmarks = library.bookmarks()?;

    match cmd {
        BookmarkCommand::Add {
            url,
            category,
            no_inline,
        } => {
            let config = config.clone().inline_images(!no_inline);
            let previewer =
                Previewer::with_config(HttpClient::with_config(config.client)?, config.preview);
            let bookmark = previewer
                .add_bookmark_from_url(&url, category.as_deref())
                .await
                .context("Failed to fetch website information")?;

            println!("Added \"{}\" ({})", bookmark.title(), bookmark.id);
            bookmarks.add(bookmark);
            library.save_bookmarks(&bookmarks)?;
        }
        BookmarkCommand::List { category, search } => {
            let hits = bookmarks.filter(category.as_deref(), &search);
            if hits.is_empty() {
                println!("No bookmarks");
            }
            for b in hits {
                let category = b.category.as_deref().unwrap_or("-");
                println!("{}  [{}] {} - {}", b.id, category, b.title(), b.site_name());
                println!("    {}", b.url);
                if !b.description().is_empty() {
                    println!("    {}", b.description());
                }
            }
            let categories = bookmarks.categories();
            if !categories.is_empty() {
                println!("\nCategories: {}", categories.join(", "));
            }
        }
        BookmarkCommand::Remove { id } => {
            let Some(removed) = bookmarks.remove(&id) else {
                bail!("No bookmark with id '{}'", id);
            };
            library.save_bookmarks(&bookmarks)?;
            println!("Removed \"{}\"", removed.title());
        }
    }

    Ok(ExitCode::SUCCESS)
}
