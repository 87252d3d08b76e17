//! GLP-1 Monitoring Client demo CLI
//!
//! Drives the client core end to end against the configured backend (the
//! in-memory one unless a config file says otherwise).
//!
//! Usage:
//!   cargo run -p demo -- onboard
//!   cargo run -p demo -- onboard --fail-medication
//!   cargo run -p demo -- dashboard
//!   cargo run -p demo -- countdown --day sat --time 09:00 --watch 3
//!   cargo run -p demo -- classify
//!   cargo run -p demo -- --config client.toml dashboard

use std::{path::PathBuf, sync::Arc};

use chrono::{NaiveTime, Weekday};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use glp_backend::{build_backend, InMemoryBackend};
use glp_classify::{
    adherence_band, adherence_band_style, adherence_style, priority_style, risk_level, risk_style,
    severity_style, DisplayStyle,
};
use glp_config::{AppConfig, BackendKind, MedicationCatalog};
use glp_contracts::{
    clinical::{AdherenceState, AlertPriority, HeightUnit, SeverityLevel},
    error::{GlpError, GlpResult},
};
use glp_core::{
    clock::SystemClock,
    countdown::{format_countdown, next_dose_after, CountdownTicker},
    traits::{Backend, Clock, Operation},
    AppContext,
};
use glp_onboarding::{Enrollment, OnboardingWizard, StepOutcome};
use glp_views::{log_symptom, AlertInbox, DashboardScreen, NextDose, SymptomEntry};

// ── CLI definition ────────────────────────────────────────────────────────────

/// GLP-1 monitoring client demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "GLP-1 monitoring client demo",
    long_about = "Runs the onboarding wizard, dashboard, alert inbox, symptom log and\n\
                  dose countdown against the configured backend."
)]
struct Cli {
    /// Client configuration file (TOML). Defaults to the embedded config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the five onboarding steps with a scripted user.
    Onboard {
        /// Make the first create-medication call fail, then retry.
        /// Only honoured by the in-memory backend.
        #[arg(long)]
        fail_medication: bool,
    },
    /// Onboard, then load the dashboard, acknowledge an alert and log a symptom.
    Dashboard,
    /// Show the countdown to the next weekly injection.
    Countdown {
        /// Injection weekday, e.g. "sat" or "Saturday".
        #[arg(long, value_parser = parse_weekday)]
        day: Weekday,
        /// Injection time, HH:MM (UTC).
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
        /// Keep the countdown running for this many refreshes.
        #[arg(long)]
        watch: Option<u32>,
    },
    /// Print the clinical classification tables.
    Classify,
}

fn parse_weekday(s: &str) -> Result<Weekday, String> {
    s.parse::<Weekday>().map_err(|_| format!("'{}' is not a weekday", s))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("'{}' is not HH:MM: {}", s, e))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> GlpResult<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::builtin()?,
    };
    let catalog = config.load_catalog()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    match cli.command {
        Command::Onboard { fail_medication } => {
            let ctx = context(&config, clock, fail_medication)?;
            run_onboarding(&ctx, catalog, true).await?;
        }
        Command::Dashboard => {
            let ctx = context(&config, clock, false)?;
            let enrollment = run_onboarding(&ctx, catalog, false).await?;
            run_dashboard(&ctx, &config, &enrollment).await?;
        }
        Command::Countdown { day, time, watch } => {
            run_countdown(&config, clock, day, time, watch).await;
        }
        Command::Classify => print_tables(),
    }
    Ok(())
}

/// Build the application context, optionally arming a one-shot
/// create-medication failure on the in-memory backend.
fn context(config: &AppConfig, clock: Arc<dyn Clock>, fail_medication: bool) -> GlpResult<AppContext> {
    let backend: Arc<dyn Backend> = if fail_medication && config.backend.kind == BackendKind::Memory {
        let memory = InMemoryBackend::new(clock.clone())
            .with_latency(config.memory_latency())
            .with_sample_alerts(config.memory.sample_alerts);
        memory.fail_next(Operation::CreateMedication, "simulated outage");
        Arc::new(memory)
    } else {
        if fail_medication {
            println!("--fail-medication is ignored for the HTTP backend.");
        }
        build_backend(config, clock.clone())?
    };
    Ok(AppContext::new(backend, clock))
}

// ── Onboarding ────────────────────────────────────────────────────────────────

async fn run_onboarding(
    ctx: &AppContext,
    catalog: MedicationCatalog,
    verbose: bool,
) -> GlpResult<Enrollment> {
    let mut wizard = OnboardingWizard::new(catalog);
    let say = |line: String| {
        if verbose {
            println!("{}", line);
        }
    };

    say(format!("Submission id: {}", wizard.submission_id()));

    // Step 1, first without a name to show the gate.
    {
        let d = wizard.draft_mut();
        d.date_of_birth = "1980-06-15".to_string();
        d.email = "alex@example.com".to_string();
        d.phone = "555-0100".to_string();
    }
    if let StepOutcome::Blocked(report) = wizard.advance(ctx).await? {
        say(format!("  [step {}] blocked: {}", report.step, report.prompt()));
    }
    wizard.draft_mut().name = "Alex Rivera".to_string();
    print_outcome(&say, wizard.advance(ctx).await?);

    // Step 2
    {
        let d = wizard.draft_mut();
        d.height = Some(68.0);
        d.height_unit = HeightUnit::Inches;
        d.weight = Some(96.5);
        d.provider_name = "Dr. Osei".to_string();
    }
    print_outcome(&say, wizard.advance(ctx).await?);

    // Step 3
    wizard.select_medication("Mounjaro")?;
    say(format!("  dosage options: {}", wizard.dosage_options().join(", ")));
    wizard.select_dosage("5 mg")?;
    {
        let d = wizard.draft_mut();
        d.injection_day = Some(Weekday::Sat);
        d.injection_time = NaiveTime::from_hms_opt(9, 0, 0);
    }
    print_outcome(&say, wizard.advance(ctx).await?);

    // Step 4
    {
        let d = wizard.draft_mut();
        d.accepted_terms = true;
        d.accepted_privacy = true;
    }
    print_outcome(&say, wizard.advance(ctx).await?);

    // Step 5, retrying once if the submission fails.
    {
        let d = wizard.draft_mut();
        d.emergency_contact_name = "Sam Rivera".to_string();
        d.emergency_contact_phone = "555-0199".to_string();
    }
    for attempt in 1..=2 {
        match wizard.advance(ctx).await? {
            StepOutcome::Completed(enrollment) => {
                say(format!(
                    "  submitted on attempt {}: user {} ({}), {} {}",
                    attempt,
                    enrollment.user.name,
                    enrollment.user.id,
                    enrollment.medication.drug_name,
                    enrollment.medication.dosage
                ));
                say(String::new());
                return Ok(enrollment);
            }
            StepOutcome::SubmissionFailed { message, .. } => {
                say(format!("  [step {}] {} (draft kept for {})", wizard.step(), message, wizard.draft().name));
            }
            other => print_outcome(&say, other),
        }
    }

    Err(GlpError::StateMachineError {
        reason: "onboarding did not complete".to_string(),
    })
}

fn print_outcome(say: &impl Fn(String), outcome: StepOutcome) {
    match outcome {
        StepOutcome::Advanced { to } => say(format!("  -> step {}: {}", to, to.title())),
        StepOutcome::Blocked(report) => say(format!("  [step {}] blocked: {}", report.step, report.prompt())),
        StepOutcome::Completed(enrollment) => say(format!("  completed for {}", enrollment.user.id)),
        StepOutcome::SubmissionFailed { message, .. } => say(format!("  {}", message)),
    }
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

async fn run_dashboard(ctx: &AppContext, config: &AppConfig, enrollment: &Enrollment) -> GlpResult<()> {
    let mut screen = DashboardScreen::new();
    if let Some(view) = screen.refresh(ctx).await {
        println!("Dashboard for {}", view.user.name);
        if let Some(med) = &view.primary_medication {
            println!("  current medication: {} {}", med.drug_name, med.dosage);
        }
        if let Some((level, style)) = view.risk {
            println!("  risk: {:?} {}", level, style.label);
        }
        println!("  {} open alert(s)", view.alerts.len());
    }
    if let Some(message) = screen.error() {
        println!("  {}", message);
    }

    let next = NextDose::for_medication(&enrollment.medication, ctx.clock().now());
    println!("  next dose: {} ({})", next.label, next.due_at.format("%a %d %b %H:%M UTC"));
    info!(refresh_secs = config.countdown.refresh_secs, "countdown refresh period");

    let mut inbox = AlertInbox::load(ctx).await?;
    println!();
    println!("Alerts");
    for styled in inbox.alerts() {
        println!(
            "  {:<9} {:<22} {}",
            styled.style.label, styled.alert.alert_type, styled.alert.message
        );
    }
    if let Some(first) = inbox.alerts().first().map(|a| a.alert.id.clone()) {
        match inbox.acknowledge(ctx, &first).await {
            Ok(()) => println!("  acknowledged one alert, {} left", inbox.alerts().len()),
            Err(_) => println!("  {}", inbox.error().unwrap_or_default()),
        }
    }

    println!();
    let entry = SymptomEntry::new("nausea", SeverityLevel::Moderate).with_notes("mild, after lunch");
    match log_symptom(ctx, &entry).await {
        Ok(logged) => println!(
            "Logged {} at severity {} ({})",
            logged.symptom.symptom_type, logged.symptom.severity, logged.style.label
        ),
        Err(e) => println!("{}", e.user_message("log your symptom")),
    }
    println!();
    Ok(())
}

// ── Countdown ─────────────────────────────────────────────────────────────────

async fn run_countdown(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
    day: Weekday,
    time: NaiveTime,
    watch: Option<u32>,
) {
    let now = clock.now();
    let due = next_dose_after(day, time, now);
    println!("Next dose {}: {}", due.format("%a %d %b %H:%M UTC"), format_countdown(due, now));

    let Some(refreshes) = watch else {
        return;
    };
    let ticker = CountdownTicker::spawn(due, clock, config.countdown_refresh());
    let mut rx = ticker.subscribe();
    for _ in 0..refreshes {
        tokio::time::sleep(config.countdown_refresh()).await;
        if rx.has_changed().unwrap_or(false) {
            println!("  {}", *rx.borrow_and_update());
        } else {
            println!("  {} (unchanged)", ticker.label());
        }
    }
}

// ── Tables ────────────────────────────────────────────────────────────────────

fn print_row(name: &str, style: DisplayStyle) {
    let (bg, border, text) = style.colors();
    println!(
        "  {:<12} {:<10} bg {} border {} text {} icon {}",
        name, style.label, bg, border, text, style.icon
    );
}

fn print_tables() {
    println!("Symptom severity (score sent to backend)");
    for level in SeverityLevel::ALL {
        print_row(&format!("{} ({})", level, level.score()), severity_style(level));
    }
    println!("Adherence state");
    for state in AdherenceState::ALL {
        print_row(&format!("{:?}", state), adherence_style(state));
    }
    println!("Alert priority");
    for priority in AlertPriority::ALL {
        print_row(&format!("{:?}", priority), priority_style(priority));
    }
    println!("Risk score");
    for score in [10u8, 30, 60, 90] {
        print_row(&score.to_string(), risk_style(risk_level(score)));
    }
    println!("Adherence percent");
    for pct in [95.0, 80.0, 50.0] {
        print_row(&format!("{pct}%"), adherence_band_style(adherence_band(pct)));
    }
    println!();
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("GLP-1 Monitoring Client");
    println!("=======================");
    println!();
}
