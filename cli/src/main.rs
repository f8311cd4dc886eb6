use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("cannot read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("server returned {status}: {message}")]
    ServerError { status: String, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "hallplan-cli", about = "Hallplan floorplan server CLI")]
struct Cli {
    #[arg(long, env = "HALLPLAN_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Spaces(SpacesCommand),
    Hallways(HallwaysCommand),
    /// Shortest route between two spaces.
    Route {
        from_space_id: i64,
        to_space_id: i64,
    },
    /// Hallway traffic between two periods (zero-based indices).
    Congestion {
        from_period_index: i64,
        to_period_index: i64,
    },
    Schedule(ScheduleCommand),
    Floorplan(FloorplanCommand),
}

#[derive(Args, Debug)]
struct SpacesCommand {
    #[command(subcommand)]
    command: SpacesSubcommand,
}

#[derive(Subcommand, Debug)]
enum SpacesSubcommand {
    List,
    Add {
        name: String,
        #[arg(long = "type", default_value = "Classroom")]
        kind: String,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
    },
    Delete {
        space_id: i64,
    },
}

#[derive(Args, Debug)]
struct HallwaysCommand {
    #[command(subcommand)]
    command: HallwaysSubcommand,
}

#[derive(Subcommand, Debug)]
enum HallwaysSubcommand {
    List,
    Add {
        name: String,
        #[arg(long)]
        x1: f64,
        #[arg(long)]
        y1: f64,
        #[arg(long)]
        x2: f64,
        #[arg(long)]
        y2: f64,
    },
    Delete {
        hallway_id: i64,
    },
}

#[derive(Args, Debug)]
struct ScheduleCommand {
    #[command(subcommand)]
    command: ScheduleSubcommand,
}

#[derive(Subcommand, Debug)]
enum ScheduleSubcommand {
    Upload { file: PathBuf },
    Info,
}

#[derive(Args, Debug)]
struct FloorplanCommand {
    #[command(subcommand)]
    command: FloorplanSubcommand,
}

#[derive(Subcommand, Debug)]
enum FloorplanSubcommand {
    Upload { file: PathBuf },
    Show,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url, client: reqwest::Client::new() };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Spaces(spaces) => run_spaces(&ctx, spaces).await,
        Command::Hallways(hallways) => run_hallways(&ctx, hallways).await,
        Command::Route { from_space_id, to_space_id } => {
            let body = json!({ "from_space_id": from_space_id, "to_space_id": to_space_id });
            let json = api_request(&ctx, reqwest::Method::POST, "/route", Some(body)).await?;
            print_json(&json)
        }
        Command::Congestion { from_period_index, to_period_index } => {
            let body = json!({ "from_period_index": from_period_index, "to_period_index": to_period_index });
            let json = api_request(&ctx, reqwest::Method::POST, "/congestion", Some(body)).await?;
            print_json(&json)
        }
        Command::Schedule(schedule) => run_schedule(&ctx, schedule).await,
        Command::Floorplan(floorplan) => run_floorplan(&ctx, floorplan).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let response = cli.client.get(endpoint(&cli.base_url, "/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError {
            status: format!("HTTP {}", status.as_u16()),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

async fn run_spaces(cli: &CliContext, spaces: SpacesCommand) -> Result<(), CliError> {
    let json = match spaces.command {
        SpacesSubcommand::List => api_request(cli, reqwest::Method::GET, "/spaces", None).await?,
        SpacesSubcommand::Add { name, kind, x, y } => {
            let body = json!({ "name": name, "type": kind, "x": x, "y": y });
            api_request(cli, reqwest::Method::POST, "/spaces", Some(body)).await?
        }
        SpacesSubcommand::Delete { space_id } => {
            let path = format!("/spaces/{space_id}");
            api_request(cli, reqwest::Method::DELETE, &path, None).await?
        }
    };
    print_json(&json)
}

async fn run_hallways(cli: &CliContext, hallways: HallwaysCommand) -> Result<(), CliError> {
    let json = match hallways.command {
        HallwaysSubcommand::List => api_request(cli, reqwest::Method::GET, "/hallways", None).await?,
        HallwaysSubcommand::Add { name, x1, y1, x2, y2 } => {
            let body = json!({ "name": name, "x1": x1, "y1": y1, "x2": x2, "y2": y2 });
            api_request(cli, reqwest::Method::POST, "/hallways", Some(body)).await?
        }
        HallwaysSubcommand::Delete { hallway_id } => {
            let path = format!("/hallways/{hallway_id}");
            api_request(cli, reqwest::Method::DELETE, &path, None).await?
        }
    };
    print_json(&json)
}

async fn run_schedule(cli: &CliContext, schedule: ScheduleCommand) -> Result<(), CliError> {
    let json = match schedule.command {
        ScheduleSubcommand::Upload { file } => upload_file(cli, "/upload_schedule", "schedule", &file).await?,
        ScheduleSubcommand::Info => api_request(cli, reqwest::Method::GET, "/schedule_info", None).await?,
    };
    print_json(&json)
}

async fn run_floorplan(cli: &CliContext, floorplan: FloorplanCommand) -> Result<(), CliError> {
    let json = match floorplan.command {
        FloorplanSubcommand::Upload { file } => upload_file(cli, "/upload_floorplan", "floorplan", &file).await?,
        FloorplanSubcommand::Show => api_request(cli, reqwest::Method::GET, "/floorplan", None).await?,
    };
    print_json(&json)
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let request = cli.client.request(method, endpoint(&cli.base_url, path));
    let request = if let Some(json) = body { request.json(&json) } else { request };
    read_response(request.send().await?).await
}

async fn upload_file(cli: &CliContext, path: &str, field: &'static str, file: &Path) -> Result<Value, CliError> {
    let bytes = tokio::fs::read(file)
        .await
        .map_err(|source| CliError::ReadFile { path: file.to_path_buf(), source })?;
    let part = Part::bytes(bytes).file_name(upload_name(file));
    let form = Form::new().part(field, part);

    let response = cli.client.post(endpoint(&cli.base_url, path)).multipart(form).send().await?;
    read_response(response).await
}

async fn read_response(response: reqwest::Response) -> Result<Value, CliError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<Value>().await?);
    }

    // Error bodies are best effort; a non-JSON body still reports the status.
    let value = response.json::<Value>().await.unwrap_or(Value::Null);
    Err(CliError::ServerError {
        status: format!("HTTP {}", status.as_u16()),
        message: error_message(&value),
    })
}

/// The server's `message` field, or the raw body when there is none.
fn error_message(value: &Value) -> String {
    value.get("message").and_then(Value::as_str).map_or_else(|| value.to_string(), str::to_owned)
}

/// File name sent with a multipart upload.
fn upload_name(file: &Path) -> String {
    file.file_name().map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
