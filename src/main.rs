use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use games_catalog::api::ApiClient;
use games_catalog::config::Config;
use games_catalog::dto::ImageFile;
use games_catalog::view::CatalogView;

const HELP: &str = "\
Commands:
  name <text>         set the game name
  description <text>  set the description
  videos <text>       replace video URLs (separate with commas)
  video <url>         append one video URL line
  image <path>        select an image file
  clear-image         remove the selected image
  submit              add the game
  check               check the backend connection
  reload              fetch the game list again
  show                redraw the screen
  help                show this help
  quit                exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize structured logging
    init_tracing(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_url = %config.api_url,
        "Starting games catalog"
    );

    let client = ApiClient::new(config.clone());
    let mut view = CatalogView::new(client, config);

    view.load().await;
    println!("{}\n\n{HELP}", view.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        // Redraw once the connection banner expires so it disappears on its own.
        let line = if let Some(deadline) = view.banner_expires_at() {
            tokio::select! {
                line = lines.next_line() => line?,
                () = tokio::time::sleep_until(deadline) => {
                    println!("{}", view.render());
                    continue;
                }
            }
        } else {
            lines.next_line().await?
        };
        let Some(line) = line else {
            break;
        };

        let (command, arg) = parse_command(&line);

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{HELP}");
                continue;
            }
            "name" => view.draft_mut().set_name(arg),
            "description" => view.draft_mut().set_description(arg),
            "videos" => view.draft_mut().set_video_urls(arg),
            "video" => {
                let current = view.draft().video_urls();
                let joined = if current.is_empty() {
                    arg.to_string()
                } else {
                    format!("{current}\n{arg}")
                };
                view.draft_mut().set_video_urls(joined);
            }
            "image" => match ImageFile::from_path(Path::new(arg.trim())).await {
                Ok(image) => view.draft_mut().select_image(Some(image)),
                Err(err) => {
                    println!("! {err}");
                    continue;
                }
            },
            "clear-image" => view.draft_mut().select_image(None),
            "submit" => {
                if let Err(err) = view.submit().await {
                    println!("! {}", err.alert());
                }
            }
            "check" => {
                view.check_connection().await;
            }
            "reload" => view.load().await,
            "show" => {}
            other => {
                println!("! Unknown command: {other} (try `help`)");
                continue;
            }
        }

        println!("{}", view.render());
    }

    tracing::info!("Exiting games catalog");
    Ok(())
}

/// Split an input line into its command word and the remaining argument.
fn parse_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    line.split_once(char::is_whitespace)
        .map_or((line, ""), |(command, arg)| (command, arg.trim_start()))
}

/// Initialize the `tracing` subscriber with an environment-based filter.
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("games_catalog={log_level},reqwest=warn").into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
