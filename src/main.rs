use anyhow::Result;
use clap::Parser;
use clipgrabber::{
    custom_end, custom_start, ensure_txt_extension, init_tracing_once, ClipError, Credential, CredentialFile, DateError,
    FilterSpec, GameId, GameMatch, GrabberOptions, BroadcasterId, Session, SortPolicy, TimeExpression, TimeWindow,
    UrlSink, NAMED_TIMEFRAMES,
};
use colored::Colorize;
use inquire::{Confirm, Password, PasswordDisplayMode, Select, Text};
use std::path::PathBuf;
use std::time::Duration;
use time::{OffsetDateTime, UtcOffset};

/// Collect Twitch clip URLs for a channel into a text file.
#[derive(Parser, Debug)]
#[command(name = "clipgrabber", version, about)]
struct Cli {
    /// JSON file with `client_id` and `client_secret`.
    #[arg(long, default_value = "credentials.json")]
    credentials: PathBuf,

    #[arg(long, env = "CLIPGRABBER_CLIENT_ID", hide_env_values = true)]
    client_id: Option<String>,

    #[arg(long, env = "CLIPGRABBER_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Do not show the spinner while fetching.
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    // Must be read before the HTTP client spawns its worker thread.
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let cli = Cli::parse();
    init_tracing_once();

    let mut opts = GrabberOptions::default()
        .with_credentials_path(&cli.credentials)
        .with_progress(!cli.no_progress);
    if let Some(secs) = cli.timeout {
        opts = opts.with_timeout(Duration::from_secs(secs));
    }

    println!("\n{}", format!("Welcome to clipgrabber! (v{})", env!("CARGO_PKG_VERSION")).bold().truecolor(0, 0, 128));
    let session = authenticate(opts, &cli)?;

    loop {
        let broadcaster_id = ask_broadcaster(&session)?;
        let window = ask_timeframe(offset)?;
        let game = ask_game(&session)?;
        let creator = Text::new("Filter by clip creator (leave blank to skip)").prompt()?;
        let title = Text::new("Filter by text in title (leave blank to skip)").prompt()?;
        let filter = FilterSpec::new().game(game).creator(creator).title_contains(title);

        let sort = Select::new("How would you like to sort the clips in the file?", SortPolicy::ALL.to_vec())
            .with_starting_cursor(2)
            .prompt()?;
        let sink = ask_output(&session)?;

        match session.request(broadcaster_id, window).filter(filter).sort(sort).run(sink) {
            Ok(summary) if summary.written == 0 => {
                println!("{}\n", "No clips were found with the specified filters.".bold().red());
            }
            Ok(summary) => {
                let noun = if summary.written == 1 { "clip was" } else { "clips were" };
                println!(
                    "{}\n",
                    format!("All done! {} {} retrieved and sent to {}", summary.written, noun, summary.path.display())
                        .bold()
                        .green()
                );
            }
            Err(e) => eprintln!("{}\n", format!("Clip retrieval failed: {e}").red()),
        }

        if !Confirm::new("Would you like to retrieve more clips?").with_default(false).prompt()? {
            break;
        }
    }

    println!("{}", "Thank you for using clipgrabber!".bold().truecolor(0, 0, 128));
    Ok(())
}

fn authenticate(opts: GrabberOptions, cli: &Cli) -> Result<Session> {
    let mut pending = match (&cli.client_id, &cli.client_secret) {
        (Some(id), Some(secret)) => Some(Credential::new(id.as_str(), secret.as_str())),
        _ => match Credential::load(&opts.credentials_path) {
            CredentialFile::Loaded(c) => {
                println!("Loading from {}", opts.credentials_path.display());
                Some(c)
            }
            CredentialFile::Missing => None,
            CredentialFile::Malformed(reason) => {
                eprintln!(
                    "{}\n",
                    format!(
                        "{} could not be read. Please make sure it is formatted correctly. ({reason})",
                        opts.credentials_path.display()
                    )
                    .bold()
                    .red()
                );
                None
            }
        },
    };

    loop {
        let credential = match pending.take() {
            Some(c) => c,
            None => {
                let id = Text::new("Enter your Twitch application Client ID").prompt()?;
                let secret = Password::new("Enter your Twitch application Client Secret (hidden for privacy)")
                    .with_display_mode(PasswordDisplayMode::Hidden)
                    .without_confirmation()
                    .prompt()?;
                Credential::new(id, secret)
            }
        };
        match Session::connect(opts.clone(), &credential) {
            Ok(session) => {
                println!("{}\n", "Authentication successful!".bold().green());
                return Ok(session);
            }
            Err(ClipError::AuthenticationFailed) => {
                eprintln!("{}\n", "Your Twitch credentials are invalid. Please try again.".bold().red());
            }
            Err(e) => eprintln!("{}\n", format!("Could not reach Twitch: {e}").bold().red()),
        }
    }
}

fn ask_broadcaster(session: &Session) -> Result<BroadcasterId> {
    loop {
        let name = Text::new("Enter the name of the channel you would like to retrieve clips of").prompt()?;
        match session.broadcaster(&name) {
            Ok(id) => return Ok(id),
            Err(ClipError::BroadcasterNotFound(_)) => eprintln!("{}", "Twitch channel not found. Please try again.".red()),
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }
}

fn now_in(offset: UtcOffset) -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(offset)
}

fn ask_timeframe(offset: UtcOffset) -> Result<TimeWindow> {
    let help = format!("{}, or a date such as 2023, 2023-06, 2023-06-15", NAMED_TIMEFRAMES.join(", "));
    loop {
        let input = Text::new("What timeframe would you like to retrieve clips from?")
            .with_help_message(&help)
            .prompt()?;
        let now = now_in(offset);
        match input.parse::<TimeExpression>() {
            Ok(TimeExpression::CustomRange) => return ask_custom_range(now),
            Ok(expr) => match expr.resolve(now) {
                Ok(window) => return Ok(window),
                Err(e) => eprintln!("{}", format!("Invalid timeframe. {e}").red()),
            },
            Err(_) => eprintln!("{}", format!("Invalid response. Valid options: {help}.").red()),
        }
    }
}

fn ask_custom_range(now: OffsetDateTime) -> Result<TimeWindow> {
    let start = loop {
        let input = Text::new("Enter the starting date (YYYY-MM-DD)").prompt()?;
        match custom_start(&input, now) {
            Ok(start) => break start,
            Err(DateError::FutureDate) => eprintln!("{}", "Invalid date. Date cannot be in the future.".red()),
            Err(_) => eprintln!("{}", "Invalid date. Please ensure it is formatted correctly.".red()),
        }
    };
    let end = loop {
        let input = Text::new("Enter the ending date (YYYY-MM-DD)").prompt()?;
        match custom_end(&input, start) {
            Ok(end) => break end,
            Err(DateError::EndBeforeStart) => {
                eprintln!("{}", "Invalid date. End date cannot be earlier than start date.".red())
            }
            Err(_) => eprintln!("{}", "Invalid date. Please ensure it is formatted correctly.".red()),
        }
    };
    Ok(TimeWindow::new(start, end)?)
}

fn ask_game(session: &Session) -> Result<Option<GameId>> {
    loop {
        let name = Text::new("Filter by game (leave blank to skip)").prompt()?;
        if name.trim().is_empty() {
            return Ok(None);
        }
        match session.game(&name) {
            Ok(found) => {
                let accepted = match &found {
                    GameMatch::Exact(_) => true,
                    GameMatch::NeedsConfirmation { name, .. } => {
                        Confirm::new(&format!("Is {} the correct game?", name.bold()))
                            .with_default(true)
                            .prompt()?
                    }
                };
                match found.confirm(accepted) {
                    Some(id) => return Ok(Some(id)),
                    None => eprintln!(
                        "{}\n",
                        "Sorry about that. Make sure the game name is exactly how it's spelled on Twitch.".red()
                    ),
                }
            }
            Err(ClipError::GameNotFound(_)) => {
                eprintln!("{}", "Game not found. Please enter the exact title of the game.".red())
            }
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }
}

fn ask_output(session: &Session) -> Result<UrlSink> {
    let default = session.options().default_output.clone();
    loop {
        let name = Text::new("What would you like to name the file?").with_default(&default).prompt()?;
        let path = ensure_txt_extension(&name, &default);
        match UrlSink::create(&path) {
            Ok(sink) => return Ok(sink),
            Err(e) => {
                tracing::debug!(error=%e, "output file rejected");
                eprintln!("{}\n", "Could not open/write to file. Please try again.".red());
            }
        }
    }
}
