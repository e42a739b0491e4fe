use chrono::Utc;
use clap::{Parser, Subcommand};
use gastro_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gastroguard")]
#[command(about = "Gastrointestinal symptom tracking and risk assessment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a symptom/meal entry
    Log {
        /// Pain level 0-10
        #[arg(long)]
        pain: u8,

        /// Stress level 0-10
        #[arg(long)]
        stress: u8,

        /// Symptom label (repeatable)
        #[arg(long = "symptom")]
        symptoms: Vec<String>,

        /// Trigger label (repeatable)
        #[arg(long = "trigger")]
        triggers: Vec<String>,

        /// Remedy label (repeatable)
        #[arg(long = "remedy")]
        remedies: Vec<String>,

        /// Free-text notes about the meal and context
        #[arg(long)]
        notes: Option<String>,

        /// Meal size (small, medium, large)
        #[arg(long)]
        meal_size: Option<String>,

        /// Hours since eating
        #[arg(long)]
        time_since_eating: Option<f64>,

        /// Sleep quality 0-10
        #[arg(long)]
        sleep_quality: Option<u8>,
    },

    /// Assess the risk of a hypothetical food choice against history
    Assess {
        /// Food or meal description
        food: String,

        /// Meal size (small, medium, large)
        #[arg(long, default_value = "medium")]
        meal_size: String,

        /// Time of day (breakfast, lunch, dinner, late-night)
        #[arg(long, default_value = "lunch")]
        time_of_day: String,
    },

    /// Project symptom severity over a time horizon
    Simulate {
        /// Starting severity 0-10
        #[arg(long)]
        severity: f64,

        /// Current stress level 0-10
        #[arg(long, default_value_t = 0.0)]
        stress: f64,

        /// Food irritation level 0-10
        #[arg(long, default_value_t = 0.0)]
        irritation: f64,

        /// Projection horizon in hours (defaults to config)
        #[arg(long)]
        hours: Option<f64>,
    },

    /// Get recommendations for how you feel right now
    Recommend {
        /// Current pain level 0-10
        #[arg(long, default_value_t = 0)]
        pain: u8,

        /// Current stress level 0-10
        #[arg(long, default_value_t = 0)]
        stress: u8,
    },

    /// Show today's entry summary
    Summary,

    /// List the selectable symptom, trigger, remedy and condition labels
    Labels,

    /// Show or update the health profile
    Profile {
        /// Set the profile name
        #[arg(long)]
        name: Option<String>,

        /// Add a diagnosed condition (repeatable)
        #[arg(long = "add-condition")]
        add_conditions: Vec<String>,

        /// Add a known trigger (repeatable)
        #[arg(long = "add-trigger")]
        add_triggers: Vec<String>,

        /// Add an allergy (repeatable)
        #[arg(long = "add-allergy")]
        add_allergies: Vec<String>,
    },

    /// Roll up journal entries to CSV
    Rollup {
        /// Clean up processed journal files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

/// Resolved file locations under the data directory
struct DataPaths {
    journal: PathBuf,
    csv: PathBuf,
    profile: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &PathBuf) -> Self {
        Self {
            journal: data_dir.join("journal").join("entries.jsonl"),
            csv: data_dir.join("entries.csv"),
            profile: data_dir.join("profile.json"),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    gastro_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);
    let paths = DataPaths::new(&data_dir);

    match cli.command {
        Commands::Log {
            pain,
            stress,
            symptoms,
            triggers,
            remedies,
            notes,
            meal_size,
            time_since_eating,
            sleep_quality,
        } => cmd_log(
            &paths,
            &config,
            pain,
            stress,
            symptoms,
            triggers,
            remedies,
            notes,
            meal_size,
            time_since_eating,
            sleep_quality,
        ),
        Commands::Assess {
            food,
            meal_size,
            time_of_day,
        } => cmd_assess(&paths, &config, &food, &meal_size, &time_of_day),
        Commands::Simulate {
            severity,
            stress,
            irritation,
            hours,
        } => cmd_simulate(&config, severity, stress, irritation, hours),
        Commands::Recommend { pain, stress } => cmd_recommend(&paths, pain, stress),
        Commands::Summary => cmd_summary(&paths, &config),
        Commands::Labels => cmd_labels(&config),
        Commands::Profile {
            name,
            add_conditions,
            add_triggers,
            add_allergies,
        } => cmd_profile(&paths, name, add_conditions, add_triggers, add_allergies),
        Commands::Rollup { cleanup } => cmd_rollup(&data_dir, &paths, cleanup),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_log(
    paths: &DataPaths,
    config: &Config,
    pain: u8,
    stress: u8,
    symptoms: Vec<String>,
    triggers: Vec<String>,
    remedies: Vec<String>,
    notes: Option<String>,
    meal_size: Option<String>,
    time_since_eating: Option<f64>,
    sleep_quality: Option<u8>,
) -> Result<()> {
    let catalog = catalog_with_custom_triggers(&config.catalog.custom_triggers);
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Catalog("Invalid catalog".into()));
    }

    // Free-form labels are accepted but flagged so typos surface early;
    // `gastroguard labels` lists the known set.
    warn_unknown_labels(&catalog, LabelKind::Symptom, &symptoms);
    warn_unknown_labels(&catalog, LabelKind::Trigger, &triggers);
    warn_unknown_labels(&catalog, LabelKind::Remedy, &remedies);

    // The entry producer owns the 0-10 clamp
    let pain = pain.min(10);
    let stress = stress.min(10);

    let meal_size = meal_size.as_deref().and_then(|s| {
        let parsed = parse_meal_size(s);
        if parsed.is_none() {
            eprintln!("Unknown meal size: {}. Leaving unset.", s);
        }
        parsed
    });

    let entry = LogEntry {
        id: uuid::Uuid::new_v4(),
        recorded_at: Utc::now(),
        pain_level: pain,
        stress_level: stress,
        symptoms,
        triggers,
        remedies,
        notes: notes.unwrap_or_default(),
        meal_size,
        time_since_eating,
        sleep_quality,
    };

    let mut sink = JsonlSink::new(&paths.journal);
    sink.append(&entry)?;
    tracing::info!("Logged entry {}", entry.id);

    println!("✓ Entry logged!");
    println!("  Pain:   {}/10 - {}", pain, pain_description(pain));
    println!("  Stress: {}/10", stress);

    Ok(())
}

fn cmd_assess(
    paths: &DataPaths,
    config: &Config,
    food: &str,
    meal_size: &str,
    time_of_day: &str,
) -> Result<()> {
    let food = food.trim();
    if food.is_empty() {
        eprintln!("Food description must not be empty.");
        return Err(Error::Other("empty food description".into()));
    }

    let meal_size = parse_meal_size(meal_size).unwrap_or_else(|| {
        eprintln!("Unknown meal size: {}. Using medium.", meal_size);
        MealSize::Medium
    });
    let time_of_day = parse_time_of_day(time_of_day).unwrap_or_else(|| {
        eprintln!("Unknown time of day: {}. Using lunch.", time_of_day);
        TimeOfDay::Lunch
    });

    let profile = UserProfile::load(&paths.profile)?;
    let history = load_recent_entries(&paths.journal, &paths.csv, config.history.window_days)?;

    let assessment = assess_food(food, meal_size, time_of_day, &history, &profile);
    display_assessment(food, &assessment);

    Ok(())
}

fn cmd_simulate(
    config: &Config,
    severity: f64,
    stress: f64,
    irritation: f64,
    hours: Option<f64>,
) -> Result<()> {
    let params = SimulationParameters {
        initial_severity: severity,
        stress_level: stress,
        food_irritation: irritation,
        horizon_hours: hours.unwrap_or(config.simulation.default_horizon_hours),
    };

    let result = project_with_step(&params, config.simulation.step_hours)?;
    display_projection(&result);

    Ok(())
}

fn cmd_recommend(paths: &DataPaths, pain: u8, stress: u8) -> Result<()> {
    let profile = UserProfile::load(&paths.profile)?;
    let recommendations = current_recommendations(pain.min(10), stress.min(10), &profile);

    println!("\nRecommendations:");
    for recommendation in &recommendations {
        println!("  • {}", recommendation);
    }
    println!();

    Ok(())
}

fn cmd_summary(paths: &DataPaths, config: &Config) -> Result<()> {
    let entries = load_recent_entries(&paths.journal, &paths.csv, config.history.window_days)?;
    let summary = history::summarize_day(&entries, Utc::now());

    println!("\nToday's Summary");
    println!("  Entries:      {}", summary.entry_count);
    println!("  Avg pain:     {}/10", summary.avg_pain);
    println!("  Avg stress:   {}/10", summary.avg_stress);
    println!("  Remedies used: {}", summary.remedies_used);

    let recent: Vec<_> = entries.iter().take(5).collect();
    if !recent.is_empty() {
        println!("\nRecent entries:");
        for entry in recent {
            println!(
                "  {}  pain {}/10  stress {}/10  {}",
                entry.recorded_at.format("%Y-%m-%d %H:%M"),
                entry.pain_level,
                entry.stress_level,
                entry.notes
            );
        }
    }
    println!();

    Ok(())
}

fn cmd_profile(
    paths: &DataPaths,
    name: Option<String>,
    add_conditions: Vec<String>,
    add_triggers: Vec<String>,
    add_allergies: Vec<String>,
) -> Result<()> {
    let has_updates = name.is_some()
        || !add_conditions.is_empty()
        || !add_triggers.is_empty()
        || !add_allergies.is_empty();

    let profile = if has_updates {
        let updated = UserProfile::update(&paths.profile, |profile| {
            if let Some(name) = name {
                profile.name = name;
            }
            for condition in add_conditions {
                if !profile
                    .conditions
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(&condition))
                {
                    profile.conditions.push(condition);
                }
            }
            for trigger in add_triggers {
                if !profile
                    .triggers
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(&trigger))
                {
                    profile.triggers.push(trigger);
                }
            }
            for allergy in add_allergies {
                if !profile
                    .allergies
                    .iter()
                    .any(|a| a.eq_ignore_ascii_case(&allergy))
                {
                    profile.allergies.push(allergy);
                }
            }
            Ok(())
        })?;
        println!("✓ Profile updated!");
        updated
    } else {
        UserProfile::load(&paths.profile)?
    };

    println!("\nProfile");
    println!(
        "  Name:       {}",
        if profile.name.is_empty() {
            "(not set)"
        } else {
            profile.name.as_str()
        }
    );
    println!("  Conditions: {}", join_or_none(&profile.conditions));
    println!("  Triggers:   {}", join_or_none(&profile.triggers));
    println!("  Allergies:  {}", join_or_none(&profile.allergies));
    println!();

    Ok(())
}

fn cmd_rollup(data_dir: &PathBuf, paths: &DataPaths, cleanup: bool) -> Result<()> {
    if !paths.journal.exists() {
        println!("No journal file found - nothing to roll up.");
        return Ok(());
    }

    let count = gastro_core::csv_rollup::journal_to_csv_and_archive(&paths.journal, &paths.csv)?;

    println!("✓ Rolled up {} entries to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        let journal_dir = data_dir.join("journal");
        let cleaned = gastro_core::csv_rollup::cleanup_processed_journals(&journal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed journal files", cleaned);
        }
    }

    Ok(())
}

fn warn_unknown_labels(catalog: &LabelCatalog, kind: LabelKind, supplied: &[String]) {
    let unknown = catalog.unknown_labels(kind, supplied);
    if unknown.is_empty() {
        return;
    }
    let noun = match kind {
        LabelKind::Symptom => "symptom",
        LabelKind::Trigger => "trigger",
        LabelKind::Remedy => "remedy",
        LabelKind::Condition => "condition",
    };
    eprintln!(
        "Warning: unknown {} label(s): {}. Run `gastroguard labels` to see the known set.",
        noun,
        unknown.join(", ")
    );
}

fn cmd_labels(config: &Config) -> Result<()> {
    let catalog = catalog_with_custom_triggers(&config.catalog.custom_triggers);

    let print_group = |name: &str, labels: &[String]| {
        println!("\n{}:", name);
        for label in labels {
            println!("  • {}", label);
        }
    };

    print_group("Symptoms", &catalog.symptoms);
    print_group("Triggers", &catalog.triggers);
    print_group("Remedies", &catalog.remedies);
    print_group("Conditions", &catalog.conditions);
    println!();

    Ok(())
}

fn display_assessment(food: &str, assessment: &RiskAssessment) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  RISK ASSESSMENT");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", food);
    println!(
        "  Risk: {}/10 ({})",
        assessment.risk_score, assessment.risk_level
    );
    println!();

    println!("  Predictions:");
    for prediction in &assessment.predictions {
        println!("    • {}", prediction);
    }

    println!();
    println!("  Recommendations:");
    for recommendation in &assessment.recommendations {
        println!("    → {}", recommendation);
    }

    println!();
}

fn display_projection(result: &SimulationResult) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  SEVERITY PROJECTION");
    println!("╰─────────────────────────────────────────╯");
    println!();

    for sample in &result.samples {
        let bar_len = (sample.severity * 2.0).round() as usize;
        println!(
            "  {:>5.1}h  {:4.2}  {}",
            sample.time_hours,
            sample.severity,
            "█".repeat(bar_len)
        );
    }

    println!();
    println!("  Final severity: {:.2}/10", result.final_severity);
    println!("  {}", result.message);
    println!();
}

fn join_or_none(labels: &[String]) -> String {
    if labels.is_empty() {
        "(none)".to_string()
    } else {
        labels.join(", ")
    }
}
