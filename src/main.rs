//! Guardian 360 CLI
//!
//! Usage:
//!   guardian --text "stop running" --audience child   # Single resolution
//!   guardian --text "we disagree on bedtime" --advise # Relationship advice
//!   guardian --quote                                  # One quote
//!   guardian --interactive                            # Interactive session
//!   guardian --serve                                  # HTTP API server
//!   guardian --text "..." --json                      # JSON output

use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guardian360::config::GuardianConfig;
use guardian360::core::{
    render, run_server, AdvisoryMatcher, AppState, QuoteFetcher, Resolver, ResolverConfig,
    ScriptSheet,
};
use guardian360::core::scripts::principles;
use guardian360::types::{
    AudienceCategory, FamilyProfile, GraceLevel, SessionEvent, SessionState,
};
use guardian360::{GuardianError, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "guardian",
    version = VERSION,
    about = "Project Guardian 360 - say the firm thing with grace",
    long_about = "Guardian 360 turns what you are about to say into a three-step escalation:\n\n  \
                  1. Gentle redirect\n  \
                  2. Firm boundary\n  \
                  3. Consequence\n\n\
                  Crisis language (hurt, kill, suicide, abuse, hit, ...) always returns a\n\
                  safety message instead.\n\n\
                  Modes:\n  \
                  --text         Single resolution (add --advise for relationship topics)\n  \
                  --quote        Fetch one inspirational quote\n  \
                  --interactive  Interactive session with history\n  \
                  --serve        HTTP API server mode"
)]
struct Args {
    /// Text to resolve (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Audience: child or teen
    #[arg(short, long, default_value = "child")]
    audience: AudienceCategory,

    /// Treat --text as a relationship / co-parenting question
    #[arg(long)]
    advise: bool,

    /// Fetch one inspirational quote
    #[arg(short, long)]
    quote: bool,

    /// Interactive mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Your role (e.g. Mom/Dad)
    #[arg(long, default_value = "Parent")]
    role: String,

    /// Partner / co-parent name
    #[arg(long, default_value = "Partner")]
    partner: String,

    /// Child's emotional state: calm, tired, stressed, meltdown
    #[arg(long, default_value = "calm")]
    grace: GraceLevel,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match GuardianConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    init_tracing(&config, args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let outcome = if args.serve {
        run_serve(&args, &config).await
    } else if args.quote {
        run_quote(&args, &config).await
    } else if args.interactive {
        run_interactive(&args, &config).await
    } else if let Some(ref text) = args.text {
        run_single(text, &args, &config)
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args, &config).await
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for --json
fn init_tracing(config: &GuardianConfig, verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time(),
        )
        .init();
}

fn build_resolver(config: &GuardianConfig) -> Result<Resolver, GuardianError> {
    Resolver::new(ResolverConfig::default(), config.resolver.match_mode)
}

fn profile_from(args: &Args) -> FamilyProfile {
    FamilyProfile::new(args.role.clone(), args.partner.clone())
}

/// Run single text evaluation
fn run_single(text: &str, args: &Args, config: &GuardianConfig) -> Result<(), GuardianError> {
    if text.trim().is_empty() {
        return Err(GuardianError::InvalidArgument("--text must not be empty".to_string()));
    }

    if let Some(alert) = guardian360::core::grace_alert(args.grace) {
        if !args.json {
            println!("{}", paint_alert(alert, args.no_color));
        }
    }

    if args.advise {
        let advisor = AdvisoryMatcher::with_mode(config.resolver.match_mode)?;
        let result = advisor.advise(text);
        if args.json {
            print_json(&result, true)?;
        } else if args.no_color {
            println!("{}", render::advice_parseable(&result));
        } else {
            println!("{}", render::advice_terminal(&result));
        }
    } else {
        let resolver = build_resolver(config)?;
        let result = resolver.resolve(text, args.audience);
        if args.json {
            print_json(&result, true)?;
        } else if args.no_color {
            println!("{}", render::resolution_parseable(&result));
        } else {
            println!("{}", render::resolution_terminal(&result));
        }
    }
    Ok(())
}

/// Fetch and print one quote
async fn run_quote(args: &Args, config: &GuardianConfig) -> Result<(), GuardianError> {
    let fetcher = QuoteFetcher::from_config(&config.quote)?;
    let outcome = fetcher.fetch_quote().await;
    if args.json {
        print_json(&outcome, true)?;
    } else if args.no_color {
        println!("{}", render::quote_parseable(&outcome));
    } else {
        println!("{}", render::quote_terminal(&outcome));
    }
    Ok(())
}

/// Run interactive mode
async fn run_interactive(args: &Args, config: &GuardianConfig) -> Result<(), GuardianError> {
    let resolver = build_resolver(config)?;
    let advisor = AdvisoryMatcher::with_mode(config.resolver.match_mode)?;
    let fetcher = QuoteFetcher::from_config(&config.quote)?;

    let mut audience = args.audience;
    let mut session = SessionState::new(profile_from(args))
        .reduce(SessionEvent::GraceChanged(args.grace));

    print_header(&session, args.no_color);
    let quote = fetcher.fetch_quote().await;
    println!("{}", render::quote_terminal(&quote));
    println!();
    println!("Type what you are about to say and press Enter.");
    println!("Commands: :child :teen :advise <text> :quote :sorry :scripts :grace <level>");
    println!("          :principles :history :clear   (quit to exit)");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(audience, args.no_color));
        stdout.flush()?;

        let line = match read_command(&mut stdin.lock())? {
            Some(line) => line,
            None => break,
        };
        let line = line.as_str();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Entries: {}", session.history_len());
            break;
        }
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.strip_prefix(':') {
            Some(cmd) => {
                let mut parts = cmd.splitn(2, char::is_whitespace);
                let name = parts.next().unwrap_or("").to_lowercase();
                (Some(name), parts.next().unwrap_or("").trim())
            }
            None => (None, line),
        };

        match command.as_deref() {
            None => {
                let result = resolver.resolve(rest, audience);
                if args.json {
                    print_json(&result, false)?;
                } else if args.no_color {
                    println!("{}", render::resolution_parseable(&result));
                } else {
                    println!("{}", render::resolution_terminal(&result));
                }
                session = session.reduce(SessionEvent::Resolved {
                    input: rest.to_string(),
                    audience,
                    result,
                });
            }
            Some("child") => audience = AudienceCategory::Child,
            Some("teen") => audience = AudienceCategory::Teen,
            Some("advise") => {
                if rest.is_empty() {
                    println!("Usage: :advise <question>");
                    continue;
                }
                let result = advisor.advise(rest);
                if args.json {
                    print_json(&result, false)?;
                } else if args.no_color {
                    println!("{}", render::advice_parseable(&result));
                } else {
                    println!("{}", render::advice_terminal(&result));
                }
                session = session.reduce(SessionEvent::Advised {
                    input: rest.to_string(),
                    result,
                });
            }
            Some("quote") => {
                let quote = fetcher.fetch_quote().await;
                println!("{}", render::quote_terminal(&quote));
            }
            Some("sorry") => {
                println!("Your Script: '{}'", guardian360::core::accountability_script());
            }
            Some("scripts") => {
                let sheet = ScriptSheet::new(&session.profile, session.grace);
                println!("{}", render::scripts_terminal(&sheet));
            }
            Some("grace") => match rest.parse::<GraceLevel>() {
                Ok(level) => {
                    session = session.reduce(SessionEvent::GraceChanged(level));
                    println!("Grace level: {}", level);
                    if let Some(alert) = guardian360::core::grace_alert(level) {
                        println!("{}", paint_alert(alert, args.no_color));
                    }
                }
                Err(e) => println!("{}", e),
            },
            Some("principles") => println!("{}", render::principles_terminal(principles())),
            Some("history") => print_history(&session),
            Some("clear") => {
                session = session.reduce(SessionEvent::Cleared);
                println!("History cleared.");
            }
            Some(other) => println!("Unknown command ':{}'", other),
        }
    }
    Ok(())
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: &GuardianConfig) -> Result<(), GuardianError> {
    let addr = args.addr.clone().unwrap_or_else(|| config.server.addr.clone());
    let state = Arc::new(AppState::from_config(config)?);

    println!("Guardian 360 API v{} on {}", VERSION, addr);
    println!("  POST /resolve              - Resolve a behavior");
    println!("  POST /advise               - Relationship advice");
    println!("  GET  /quote                - Inspirational quote");
    println!("  GET  /principles           - Knowledge base");
    println!("  POST /session/new          - Create session");
    println!("  GET  /session/:id          - Session snapshot");
    println!("  GET  /session/:id/scripts  - Scripts for the session");
    println!("  GET  /health               - Health check");

    run_server(&addr, state).await
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), GuardianError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn print_header(session: &SessionState, no_color: bool) {
    use colored::Colorize;

    let title = format!("Project Guardian 360 v{}", VERSION);
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("  {}", session.profile.caption());
        println!("========================================");
    } else {
        println!("{}", title.bold());
        println!("{}", session.profile.caption().dimmed());
    }
    if let Some(alert) = guardian360::core::grace_alert(session.grace) {
        println!("{}", paint_alert(alert, no_color));
    }
    println!();
}

fn paint_alert(alert: &str, no_color: bool) -> String {
    use colored::Colorize;

    if no_color {
        alert.to_string()
    } else {
        alert.red().bold().to_string()
    }
}

fn format_prompt(audience: AudienceCategory, no_color: bool) -> String {
    use colored::Colorize;

    let label = format!("[{}]", audience);
    if no_color {
        format!("{} > ", label)
    } else {
        format!("{} > ", label.cyan())
    }
}

fn print_history(session: &SessionState) {
    if session.history_len() == 0 {
        println!("No history yet.");
        return;
    }
    for entry in session.history() {
        let audience = entry
            .audience
            .map(|a| a.to_string())
            .unwrap_or_else(|| "Advice".to_string());
        println!(
            "{} [{}] {} -> {}",
            entry.timestamp.format("%H:%M:%S"),
            audience,
            entry.input,
            entry.reason.code()
        );
    }
    println!("Safety overrides: {}", session.safety_override_count());
}

/// Next trimmed input line, None at end of input. Read errors propagate.
fn read_command(reader: &mut impl BufRead) -> Result<Option<String>, GuardianError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
