use std::{process::ExitCode, sync::Arc, time::Duration};

use anyhow::Context;
use app::{
    navigation::Navigator,
    render,
    screens::{Alert, create_officer::CreateOfficerScreen, shifts::ShiftsScreen},
};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use db::{
    DBService,
    models::officer::{Department, Rank},
};
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};
use services::services::{
    config::{Config, KEY_VAR, URL_VAR},
    officer_form::{BalanceKind, OfficerForm},
    officers::OfficerStore,
    shift_filter::ShiftFilter,
    shifts::ShiftStore,
};
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shiftdesk", version, about = "Police shift scheduling client")]
struct Cli {
    /// Database service URL (overrides SUPABASE_URL)
    #[arg(long, global = true)]
    url: Option<String>,
    /// Anonymous API key (overrides SUPABASE_ANON_KEY)
    #[arg(long, global = true)]
    key: Option<String>,
    /// Print views as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the shift list
    Shifts {
        #[arg(long, default_value_t = ShiftFilter::All)]
        filter: ShiftFilter,
    },
    /// List or create officers
    Officers {
        #[command(subcommand)]
        action: OfficersCommand,
    },
}

#[derive(Subcommand)]
enum OfficersCommand {
    List,
    Create(CreateArgs),
}

#[derive(Args)]
struct CreateArgs {
    /// Prompt for every field
    #[arg(long, short)]
    interactive: bool,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    badge: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    avatar: Option<String>,
    #[arg(long)]
    rank: Option<Rank>,
    #[arg(long)]
    department: Option<Department>,
    #[arg(long)]
    supervisor: bool,
    /// Vacation balance in hours
    #[arg(long)]
    vacation: Option<String>,
    /// Holiday balance in hours
    #[arg(long)]
    holiday: Option<String>,
    /// Sick balance in hours
    #[arg(long)]
    sick: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn connect(cli: &Cli) -> anyhow::Result<DBService> {
    let mut overrides = Vec::new();
    if let Some(url) = &cli.url {
        overrides.push((URL_VAR, url.clone()));
    }
    if let Some(key) = &cli.key {
        overrides.push((KEY_VAR, key.clone()));
    }
    let config = Config::from_env_with(&overrides)?;
    config
        .connect()
        .context("failed to build database client")
}

fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn show_alert(alert: &Alert) {
    if alert.is_error() {
        eprintln!("{}", render::alert(alert));
    } else {
        println!("{}", render::alert(alert));
    }
}

async fn run_shifts(db: DBService, filter: ShiftFilter, json: bool) -> anyhow::Result<ExitCode> {
    let store = Arc::new(ShiftStore::new(db));
    let mut screen = ShiftsScreen::new(store.clone());
    screen.set_filter(filter);

    let bar = spinner(app::screens::shifts::LOADING_MESSAGE);
    screen.mount().await;
    bar.finish_and_clear();

    let view = screen.render(Utc::now());
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render::shifts_view(&view));
    }

    Ok(if store.state().error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn run_officer_list(db: DBService, json: bool) -> anyhow::Result<ExitCode> {
    let store = OfficerStore::new(db);
    let bar = spinner("Loading officers...");
    store.fetch().await;
    bar.finish_and_clear();

    let state = store.state();
    if let Some(error) = state.error {
        show_alert(&Alert::error(error));
        return Ok(ExitCode::FAILURE);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state.items)?);
    } else {
        for officer in &state.items {
            println!("{}", render::officer_line(officer));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn form_from_args(args: &CreateArgs) -> OfficerForm {
    let mut form = OfficerForm {
        name: args.name.clone().unwrap_or_default(),
        badge: args.badge.clone().unwrap_or_default(),
        email: args.email.clone().unwrap_or_default(),
        phone: args.phone.clone().unwrap_or_default(),
        avatar: args.avatar.clone().unwrap_or_default(),
        rank: args.rank.unwrap_or_default(),
        department: args.department.unwrap_or_default(),
        is_supervisor: args.supervisor,
        ..OfficerForm::default()
    };
    for (kind, text) in [
        (BalanceKind::Vacation, &args.vacation),
        (BalanceKind::Holiday, &args.holiday),
        (BalanceKind::Sick, &args.sick),
    ] {
        if let Some(text) = text {
            form.set_balance_text(kind, text);
        }
    }
    form
}

fn prompt_text(prompt: &str, initial: &str) -> anyhow::Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

fn prompt_choice<T: Copy + PartialEq + std::fmt::Display>(
    prompt: &str,
    options: &[T],
    current: T,
) -> anyhow::Result<T> {
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let default = options.iter().position(|o| *o == current).unwrap_or(0);
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(options[index])
}

/// Walk through the form fields the way the create screen lays them out.
fn prompt_form(form: &mut OfficerForm) -> anyhow::Result<()> {
    form.name = prompt_text("Full Name *", &form.name)?;
    form.badge = prompt_text("Badge Number *", &form.badge)?;
    form.email = prompt_text("Email *", &form.email)?;
    form.phone = prompt_text("Phone", &form.phone)?;
    form.avatar = prompt_text("Avatar URL", &form.avatar)?;

    let ranks: Vec<Rank> = Rank::iter().collect();
    form.rank = prompt_choice("Rank", &ranks, form.rank)?;
    let departments: Vec<Department> = Department::iter().collect();
    form.department = prompt_choice("Department", &departments, form.department)?;

    let supervisor = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Supervisor?")
        .default(form.is_supervisor)
        .interact()?;
    if supervisor != form.is_supervisor {
        form.toggle_supervisor();
    }

    for (kind, label) in [
        (BalanceKind::Vacation, "Vacation Balance"),
        (BalanceKind::Holiday, "Holiday Balance"),
        (BalanceKind::Sick, "Sick Balance"),
    ] {
        let text = prompt_text(label, &form.balance(kind).to_string())?;
        form.set_balance_text(kind, &text);
    }
    Ok(())
}

async fn run_officer_create(
    db: DBService,
    args: CreateArgs,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let mut form = form_from_args(&args);
    if args.interactive {
        prompt_form(&mut form)?;
    }

    let store = Arc::new(OfficerStore::new(db));
    let mut navigator = Navigator::default();
    let screen = CreateOfficerScreen::with_form(store.clone(), form);
    navigator.push(screen.route());

    let bar = spinner(screen.submit_label());
    let (outcome, ()) = tokio::join!(screen.submit(), async {
        tokio::task::yield_now().await;
        bar.set_message(screen.submit_label());
    });
    bar.finish_and_clear();

    show_alert(&outcome.alert);
    if let Some(navigation) = outcome.navigation {
        navigator.apply(navigation);
    }

    if let Some(officer) = &outcome.created {
        if json {
            println!("{}", serde_json::to_string_pretty(officer)?);
        } else {
            println!("{}", render::officer_line(officer));
            println!("{} officers on record", store.state().items.len());
        }
    }

    tracing::debug!(route = navigator.current().path(), "returned to");
    Ok(if outcome.alert.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let db = connect(&cli)?;

    match cli.command {
        Command::Shifts { filter } => run_shifts(db, filter, cli.json).await,
        Command::Officers { action } => match action {
            OfficersCommand::List => run_officer_list(db, cli.json).await,
            OfficersCommand::Create(args) => run_officer_create(db, args, cli.json).await,
        },
    }
}
