use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use ironlog_core::csv_rollup::{cleanup_processed_logs, log_to_csv_and_archive};
use ironlog_core::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ironlog")]
#[command(about = "Weekly workout planner with progressive overload", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the user whose history is read and written
    #[arg(long, global = true)]
    user: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate or inspect the weekly plan
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Show today's workout with suggested weights
    Today {
        /// Weekday to show instead of today (e.g. monday)
        #[arg(long)]
        day: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Log a performed exercise, or a whole session from a JSON file
    Log {
        /// Exercise name as it appears in the plan
        #[arg(long, required_unless_present = "session")]
        exercise: Option<String>,

        /// JSON array of exercises to log together
        #[arg(
            long,
            conflicts_with_all = ["exercise", "sets", "reps", "weight", "set_detail", "missed"]
        )]
        session: Option<PathBuf>,

        /// Sets performed (defaults to the number of --set entries, or 1)
        #[arg(long)]
        sets: Option<u32>,

        /// Reps summary, e.g. "8" or "8-12"
        #[arg(long)]
        reps: Option<String>,

        /// Working weight in kg (ignored when --set is given)
        #[arg(long)]
        weight: Option<f64>,

        /// Per-set detail as WEIGHTxREPS, suffix ":missed" for a failed set
        #[arg(long = "set")]
        set_detail: Vec<String>,

        /// Mark the exercise as not completed (weight is held next time)
        #[arg(long)]
        missed: bool,

        /// Session date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Archive the workout log to CSV
    Rollup {
        /// Clean up processed log files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

#[derive(Subcommand)]
enum PlanAction {
    /// Generate a new plan (saved unless --preview)
    Generate {
        /// fat-loss, muscle-gain or strength
        #[arg(long)]
        goal: String,

        /// beginner, intermediate or advanced
        #[arg(long)]
        level: String,

        /// Training days per week (1-7); defaults to the --custom count
        #[arg(long)]
        days: Option<u8>,

        /// Minutes per session
        #[arg(long, default_value_t = 60)]
        minutes: u32,

        /// Custom day focus as KEY=FOCUS, e.g. "Day 1=Chest"
        #[arg(long)]
        custom: Vec<String>,

        /// Show the plan without saving it
        #[arg(long)]
        preview: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the stored plan
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Resolved file locations under the data directory
struct Paths {
    data_dir: PathBuf,
    log_dir: PathBuf,
    plan: PathBuf,
    log: PathBuf,
    csv: PathBuf,
}

impl Paths {
    fn new(data_dir: PathBuf) -> Self {
        let log_dir = data_dir.join("log");
        Self {
            plan: data_dir.join("plan.json"),
            log: log_dir.join("workout_log.jsonl"),
            csv: data_dir.join("workout_log.csv"),
            log_dir,
            data_dir,
        }
    }
}

fn main() {
    ironlog_core::logging::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_or_default(path)?,
        None => Config::load()?,
    };
    let paths = Paths::new(cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone()));
    let user = cli.user.unwrap_or_else(|| config.profile.user.clone());
    if user.trim().is_empty() {
        return Err(Error::Config("--user must not be empty".into()));
    }

    match cli.command {
        Commands::Plan {
            action:
                PlanAction::Generate {
                    goal,
                    level,
                    days,
                    minutes,
                    custom,
                    preview,
                    json,
                },
        } => cmd_plan_generate(&paths, &goal, &level, days, minutes, &custom, preview, json),
        Commands::Plan {
            action: PlanAction::Show { json },
        } => cmd_plan_show(&paths, json),
        Commands::Today { day, json } => cmd_today(&paths, &user, &config, day.as_deref(), json),
        Commands::Log {
            exercise,
            session,
            sets,
            reps,
            weight,
            set_detail,
            missed,
            date,
        } => {
            let submissions = match session {
                Some(path) => read_session_file(&path)?,
                None => vec![single_submission(
                    exercise.unwrap_or_default(),
                    sets,
                    reps,
                    weight,
                    &set_detail,
                    missed,
                )?],
            };
            cmd_log(&paths, &user, submissions, date.as_deref())
        }
        Commands::Rollup { cleanup } => cmd_rollup(&paths, cleanup),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_plan_generate(
    paths: &Paths,
    goal: &str,
    level: &str,
    days: Option<u8>,
    minutes: u32,
    custom: &[String],
    preview: bool,
    json: bool,
) -> Result<()> {
    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let custom_schedule = parse_custom_entries(custom)?;
    let days = match (days, &custom_schedule) {
        (Some(days), _) => days,
        (None, Some(schedule)) => u8::try_from(schedule.len()).unwrap_or(u8::MAX),
        (None, None) => {
            return Err(Error::InvalidRequest(
                "--days is required without --custom".into(),
            ))
        }
    };

    let mut request = PlanRequest::new(goal.parse()?, level.parse()?, days, minutes);
    request.custom_schedule = custom_schedule;
    request.validate()?;

    let plan = generate_with(catalog, &request);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_plan(&plan);
    }

    if preview {
        if !json {
            println!("\n[Preview - plan not saved]");
        }
        return Ok(());
    }

    StoredPlan::new(request, plan).save(&paths.plan)?;
    if !json {
        println!("\n✓ Plan saved!");
    }
    Ok(())
}

fn cmd_plan_show(paths: &Paths, json: bool) -> Result<()> {
    let stored = StoredPlan::load_required(&paths.plan)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stored)?);
    } else {
        display_plan(&stored.plan);
        println!(
            "\n  Created {} ({} goal, {} level, {} min sessions)",
            stored.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            stored.request.goal,
            stored.request.level,
            stored.request.session_minutes
        );
    }
    Ok(())
}

fn cmd_today(
    paths: &Paths,
    user: &str,
    config: &Config,
    day: Option<&str>,
    json: bool,
) -> Result<()> {
    let day = match day {
        Some(d) => d.parse::<Weekday>()?,
        None => Weekday::today(),
    };

    let stored = StoredPlan::load_required(&paths.plan)?;
    let policy = OverloadPolicy::from(&config.progression);

    // One snapshot for every exercise of this request
    let history = load_log_history(&paths.log, &paths.csv, user)?;
    let today = assemble_today(&stored.plan, day, &history, &policy);

    if json {
        println!("{}", serde_json::to_string_pretty(&today)?);
    } else {
        display_today(&today, &policy);
    }
    Ok(())
}

fn cmd_log(
    paths: &Paths,
    user: &str,
    submissions: Vec<LoggedExercise>,
    date: Option<&str>,
) -> Result<()> {
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|e| Error::Parse(format!("Invalid date '{}': {}", d, e)))?,
        None => Local::now().date_naive(),
    };

    // Validate every exercise before anything is written
    let logged_at = Utc::now();
    let entries = submissions
        .into_iter()
        .map(|submission| submission.into_entry(user, date, logged_at))
        .collect::<Result<Vec<_>>>()?;

    if entries.is_empty() {
        return Err(Error::InvalidLog("session contains no exercises".into()));
    }

    let mut sink = JsonlSink::new(&paths.log);
    sink.append_all(&entries)?;

    for entry in &entries {
        println!(
            "✓ Logged {}: {} sets @ {} kg{}",
            entry.exercise_name,
            entry.sets_performed,
            entry.weight_performed,
            if entry.completed { "" } else { " (not completed)" }
        );
    }
    Ok(())
}

/// Build one submission from the `log` flags
fn single_submission(
    exercise: String,
    sets: Option<u32>,
    reps: Option<String>,
    weight: Option<f64>,
    set_args: &[String],
    missed: bool,
) -> Result<LoggedExercise> {
    let set_detail = set_args
        .iter()
        .enumerate()
        .map(|(i, arg)| parse_set_arg(i as u32 + 1, arg))
        .collect::<Result<Vec<_>>>()?;

    let weight = match weight {
        Some(w) => validate_weight(w)?,
        None if set_detail.is_empty() => {
            return Err(Error::Other("Provide --weight or at least one --set".into()))
        }
        None => 0.0,
    };

    let reps = reps.unwrap_or_else(|| {
        if set_detail.is_empty() {
            "0".into()
        } else {
            set_detail
                .iter()
                .map(|s| s.reps.to_string())
                .collect::<Vec<_>>()
                .join("/")
        }
    });

    Ok(LoggedExercise {
        name: exercise,
        sets: sets.unwrap_or(set_detail.len().max(1) as u32),
        reps,
        weight,
        completed: !missed,
        set_detail,
    })
}

/// Read a session file: a JSON array of logged exercises
fn read_session_file(path: &Path) -> Result<Vec<LoggedExercise>> {
    let contents = std::fs::read_to_string(path)?;
    let submissions: Vec<LoggedExercise> = serde_json::from_str(&contents)?;
    tracing::debug!("Read {} exercises from {:?}", submissions.len(), path);
    Ok(submissions)
}

fn cmd_rollup(paths: &Paths, cleanup: bool) -> Result<()> {
    if !paths.log.exists() {
        println!("No workout log found - nothing to roll up.");
        return Ok(());
    }

    let count = log_to_csv_and_archive(&paths.log, &paths.csv)?;

    println!("✓ Rolled up {} log entries to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        let cleaned = cleanup_processed_logs(&paths.log_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed log files", cleaned);
        }
    }

    tracing::debug!("Data directory: {}", paths.data_dir.display());
    Ok(())
}

/// Parse repeated `--custom "Day 1=Chest"` values
fn parse_custom_entries(entries: &[String]) -> Result<Option<BTreeMap<String, String>>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let mut schedule = BTreeMap::new();
    for entry in entries {
        let (key, focus) = entry.split_once('=').ok_or_else(|| {
            Error::Parse(format!("Expected KEY=FOCUS for --custom, got '{}'", entry))
        })?;
        schedule.insert(key.trim().to_string(), focus.trim().to_string());
    }
    Ok(Some(schedule))
}

/// Parse `WEIGHTxREPS` with an optional `:missed` suffix
fn parse_set_arg(set_number: u32, arg: &str) -> Result<SetDetail> {
    let invalid = || Error::Parse(format!("Expected WEIGHTxREPS[:missed] for --set, got '{}'", arg));

    let (body, completed) = match arg.trim().split_once(':') {
        Some((body, flag)) if flag.eq_ignore_ascii_case("missed") => (body, false),
        Some(_) => return Err(invalid()),
        None => (arg.trim(), true),
    };

    let (weight, reps) = body
        .split_once(&['x', 'X'][..])
        .ok_or_else(invalid)?;

    let weight = weight.trim().parse().map_err(|_| invalid())?;

    Ok(SetDetail {
        set_number,
        weight: validate_weight(weight)?,
        reps: reps.trim().parse().map_err(|_| invalid())?,
        completed,
    })
}

fn display_plan(plan: &GeneratedPlan) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} PLAN", plan.split_type.to_string().to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", plan.description);

    for (day, schedule) in plan.schedule.iter() {
        println!();
        println!("  {}: {}", day, schedule.focus_label);
        if schedule.exercises.is_empty() {
            println!("    (no exercises)");
        }
        for ex in &schedule.exercises {
            println!("    → {} - {} x {}", ex.name, ex.target_sets, ex.target_reps);
        }
    }
}

fn display_today(today: &TodayWorkout, policy: &OverloadPolicy) {
    println!("\n╭─────────────────────────────────────────╮");
    match today.focus_label {
        Some(ref focus) if !today.is_rest_day => {
            println!("│  {}: {}", today.day.name().to_uppercase(), focus)
        }
        _ => println!("│  {}", today.day.name().to_uppercase()),
    }
    println!("╰─────────────────────────────────────────╯");
    println!();

    if today.is_rest_day {
        println!("  {}", today.message.as_deref().unwrap_or(today::REST_DAY_MESSAGE));
        println!();
        return;
    }

    for ex in &today.exercises {
        let note = match ex.basis {
            WeightBasis::Baseline => "starting weight".to_string(),
            WeightBasis::Increased => format!("+{} kg after a completed session", policy.increment),
            WeightBasis::Maintained => "hold: last session not completed".to_string(),
        };
        println!(
            "  → {}: {} x {} @ {} kg ({})",
            ex.template.name, ex.template.target_sets, ex.template.target_reps, ex.suggested_weight, note
        );
    }
    println!();
}
