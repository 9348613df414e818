use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use unity_core::dashboard::AgentCardSummary;
use unity_core::mock::{generate_history_window, BaseRates, HistoryWindow};
use unity_core::types::{DeploymentType, ProjectId};
use unity_core::{
    GenerationShowcase, PlaceholderAvatarGenerator, Platform, PlatformConfig,
    TemplatePersonaGenerator, TourBanner, WizardSession,
};

fn cli() -> Command {
    Command::new("unity")
        .version(unity_core::VERSION)
        .about("LiveOps UNITY platform console")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to a TOML platform config"),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Show the global nerve center")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Generate a mock performance history")
                .arg(
                    Arg::new("fcr")
                        .long("fcr")
                        .default_value("85")
                        .value_parser(value_parser!(f64))
                        .help("Base first-call resolution (%)"),
                )
                .arg(
                    Arg::new("escalation")
                        .long("escalation")
                        .default_value("10")
                        .value_parser(value_parser!(f64))
                        .help("Base escalation rate (%)"),
                )
                .arg(
                    Arg::new("aht")
                        .long("aht")
                        .default_value("180")
                        .value_parser(value_parser!(f64))
                        .help("Base average handle time (s)"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                ),
        )
        .subcommand(
            Command::new("create-agent")
                .about("Run the agent creation wizard with offline generators")
                .arg(Arg::new("name").long("name").required(true).help("Agent name"))
                .arg(
                    Arg::new("prompt")
                        .long("prompt")
                        .required(true)
                        .help("Personality and instructions"),
                )
                .arg(
                    Arg::new("external")
                        .long("external")
                        .action(ArgAction::SetTrue)
                        .help("External/hybrid deployment"),
                )
                .arg(
                    Arg::new("budget")
                        .long("budget")
                        .help("Monthly budget limit (USD)"),
                )
                .arg(
                    Arg::new("project")
                        .long("project")
                        .help("Owning project id (defaults to the first project)"),
                ),
        )
        .subcommand(
            Command::new("tour")
                .about("Play the landing tour banner and generation showcase")
                .arg(
                    Arg::new("millis")
                        .long("millis")
                        .default_value("3000")
                        .value_parser(value_parser!(u64))
                        .help("How long to play"),
                ),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<PlatformConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let config = PlatformConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            info!(path = %path.display(), "Using platform config");
            Ok(config)
        }
        None => Ok(PlatformConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let matches = cli().get_matches();
    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("dashboard", args)) => dashboard(args.get_flag("json")),
        Some(("history", args)) => history(&config, args),
        Some(("create-agent", args)) => create_agent(&config, args).await,
        Some(("tour", args)) => {
            let millis = args.get_one::<u64>("millis").copied().unwrap_or(3000);
            tour(&config, Duration::from_millis(millis)).await;
            Ok(())
        }
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}

fn dashboard(json: bool) -> Result<()> {
    let platform = Platform::seeded();
    let summary = platform.dashboard();
    let cards: Vec<AgentCardSummary> = platform.agents().iter().map(AgentCardSummary::from_agent).collect();

    if json {
        let report = serde_json::json!({
            "summary": summary,
            "projects": platform.projects(),
            "agents": cards,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", platform.header_title());
    println!("==================");
    println!("Total ROI:        ${:.0}", summary.total_roi);
    println!("Weighted FCR:     {:.1}%", summary.weighted_fcr);
    println!("Weighted Escal.:  {:.1}%", summary.weighted_escalation);
    println!("Interactions:     {}", summary.total_interactions);
    println!();
    println!("Projects:");
    for project in platform.projects() {
        println!(
            "  {:<22} {:?}  budget {:>3.0}%  fcr {:>3.0}%  roi ${:.0}",
            project.name, project.status, project.budget_usage, project.fcr, project.estimated_roi
        );
    }
    println!();
    println!("Agents:");
    for card in &cards {
        println!(
            "  {:<8} {:<18} health {:>5.1} ({:?})  workflows {:>5}  value ${:.0}  [{}]",
            card.name,
            card.use_case,
            card.health,
            card.band,
            card.workflows_completed,
            card.value_generated,
            card.deployment
        );
    }
    Ok(())
}

fn history(config: &PlatformConfig, args: &ArgMatches) -> Result<()> {
    let base = BaseRates::new(
        args.get_one::<f64>("fcr").copied().unwrap_or(85.0),
        args.get_one::<f64>("escalation").copied().unwrap_or(10.0),
        args.get_one::<f64>("aht").copied().unwrap_or(180.0),
    );
    let window = HistoryWindow::from_config(config);
    let today = chrono::Local::now().date_naive();
    let mut rng = match args.get_one::<u64>("seed") {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };

    let history = generate_history_window(&window, base, today, &mut rng);
    for entry in &history {
        let marker = entry.version_change.as_deref().unwrap_or("");
        println!(
            "{}  fcr {:>6.2}  esc {:>5.2}  aht {:>6.1}  {}",
            entry.date, entry.fcr, entry.escalation_rate, entry.aht, marker
        );
    }
    Ok(())
}

async fn create_agent(config: &PlatformConfig, args: &ArgMatches) -> Result<()> {
    let mut platform = Platform::seeded();
    if let Some(project) = args.get_one::<String>("project") {
        platform.select_project(&ProjectId::new(project.as_str()))?;
    }

    let mut session = WizardSession::new(
        config,
        Arc::new(TemplatePersonaGenerator),
        Arc::new(PlaceholderAvatarGenerator),
    );

    let wizard = session.wizard_mut();
    if args.get_flag("external") {
        wizard.set_deployment_type(DeploymentType::ExternalHybrid);
    }
    wizard.next()?;
    while wizard.step() != unity_core::WizardStep::Persona {
        wizard.next()?;
    }
    wizard.set_name(args.get_one::<String>("name").map_or("", String::as_str));
    wizard.set_prompt(args.get_one::<String>("prompt").map_or("", String::as_str));
    if let Some(budget) = args.get_one::<String>("budget") {
        wizard.set_monthly_budget(budget.as_str());
    }

    session.generate_persona()?;
    session.generate_avatar()?;
    session.settle().await;
    if let Some(message) = session.wizard().message() {
        bail!("{message}");
    }

    let wizard = session.wizard_mut();
    wizard.next()?;
    wizard.next()?;

    let draft = session.submit().map_err(|rejected| rejected.error)?;
    let id = platform.add_agent(draft)?;
    info!(agent = %id, "Created agent via wizard");
    let agent = platform
        .agent(&id)
        .context("created agent missing from platform")?;
    println!("{}", serde_json::to_string_pretty(agent)?);
    Ok(())
}

async fn tour(config: &PlatformConfig, duration: Duration) {
    let banner = TourBanner::start(&config.landing);
    let showcase = GenerationShowcase::start(&config.landing);
    let frame = Duration::from_millis(500);

    let mut elapsed = Duration::ZERO;
    while elapsed < duration {
        tokio::time::sleep(frame).await;
        elapsed += frame;
        let agent = showcase.active();
        println!(
            "[{:>5}ms] {} ({})  | {}",
            elapsed.as_millis(),
            agent.name,
            agent.role,
            banner.text()
        );
    }
}
