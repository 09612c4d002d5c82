use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dsa_sheet::{
    Attribute, CatalogLoader, CharacterRecord, CharacterStore, Settings, dice::MAX_MODIFIER,
    logging, parse_attributes, skill_check,
};
use std::path::PathBuf;

/// Manage a Das Schwarze Auge character sheet
#[derive(Parser)]
#[command(name = "dsa_sheet")]
#[command(about = "Skill catalog and character sheet for Das Schwarze Auge", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the character file and log (overrides settings)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Skill catalog to use instead of the bundled one (overrides settings)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List skill categories
    Categories,

    /// List the skills of one category
    Skills { category: String },

    /// Create the character from its eight attributes (MU KL IN CH FF GE KO KK)
    Create {
        #[arg(num_args = 8, value_names = ["MU", "KL", "IN", "CH", "FF", "GE", "KO", "KK"])]
        values: Vec<String>,

        /// Replace an existing character
        #[arg(long)]
        force: bool,
    },

    /// Show the stored character with skill scores
    Show,

    /// Roll a skill check for the stored character
    Check {
        skill: String,

        /// Difficulty; positive makes the check harder
        #[arg(
            long,
            default_value_t = 0,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i32).range(i64::from(-MAX_MODIFIER)..=i64::from(MAX_MODIFIER))
        )]
        modifier: i32,
    },

    /// Report whether a character is stored
    Exists,

    /// Delete the stored character
    Delete,

    /// Write the settings file, keeping --data-dir and --catalog if given
    Config {
        /// Log at debug level
        #[arg(long)]
        debug: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = Some(dir);
    }
    if let Some(path) = cli.catalog {
        settings.catalog_path = Some(path);
    }

    let data_dir = settings.data_dir()?;
    if let Err(e) = logging::init(&data_dir, settings.log_level()) {
        eprintln!("Logging disabled: {e}");
    }
    log::info!("dsa_sheet start: {}", chrono::Local::now());

    let catalog = settings.catalog();
    let store = settings.store()?;

    match cli.command {
        Command::Categories => {
            for category in catalog.skill_categories()? {
                println!("{category}");
            }
        }
        Command::Skills { category } => {
            let mut skills: Vec<_> = catalog.skills_of_category(&category)?.into_values().collect();
            skills.sort_by(|a, b| a.name().cmp(b.name()));
            for skill in skills {
                println!("{skill}");
            }
        }
        Command::Create { values, force } => {
            if store.exists() && !force {
                bail!(
                    "A character already exists at {} (use --force to replace it)",
                    store.path().display()
                );
            }
            let attributes = parse_attributes(values.as_slice())?;
            let record = CharacterRecord::builder()
                .attributes(&attributes)
                .skill_values(catalog.initialize_skill_value_map()?)
                .build()?;
            store.save(&record)?;
            println!("Character saved to {}", store.path().display());
        }
        Command::Show => show(&store, &catalog)?,
        Command::Check { skill, modifier } => {
            let record = load_existing(&store, &catalog)?;
            let (skill, _) = record
                .skill_values()
                .get_key_value(skill.as_str())
                .with_context(|| format!("No skill named '{skill}'"))?;
            let result = skill_check(&record, skill, modifier)?;
            println!(
                "{skill}: rolled {:?} -> {} ({} points left){}",
                result.rolls,
                if result.success { "success" } else { "failure" },
                result.remaining,
                if result.critical_success {
                    ", critical"
                } else if result.botch {
                    ", botch"
                } else {
                    ""
                }
            );
        }
        Command::Exists => println!("{}", store.exists()),
        Command::Delete => {
            store.delete()?;
            println!("Character deleted");
        }
        Command::Config { debug } => {
            settings.debug_mode = debug;
            settings.save()?;
            println!("Settings written");
        }
    }
    Ok(())
}

fn load_existing(store: &CharacterStore, catalog: &CatalogLoader) -> Result<CharacterRecord> {
    if !store.exists() {
        bail!("No character yet; create one with `dsa_sheet create`");
    }
    Ok(store.load(catalog)?)
}

fn show(store: &CharacterStore, catalog: &CatalogLoader) -> Result<()> {
    if !store.exists() {
        bail!("No character yet; create one with `dsa_sheet create`");
    }
    // A broken catalog still shows the attributes.
    let record = CharacterRecord::builder()
        .attributes(&store.load_attributes()?)
        .skill_values(catalog.initialize_skill_value_map().unwrap_or_default())
        .build()?;
    for attribute in Attribute::ALL {
        println!(
            "{:>2} {:<18} {}",
            attribute.as_ref().to_uppercase(),
            attribute.label(),
            record.attribute(attribute)
        );
    }

    let skill_catalog = match catalog.load_catalog() {
        Ok(skill_catalog) => skill_catalog,
        Err(e) => {
            println!("\nSkills unavailable: {e}");
            return Ok(());
        }
    };
    for category in skill_catalog.category_names() {
        println!("\n{category}");
        let Some(skills) = skill_catalog.category(category) else {
            continue;
        };
        let mut skills: Vec<_> = skills.values().collect();
        skills.sort_by(|a, b| a.name().cmp(b.name()));
        for skill in skills {
            let score = record
                .skill_score(skill)
                .map(|s| s.to_string())
                .unwrap_or_else(|e| e.to_string());
            println!(
                "  {:<28} {:<10} value {:>2}  score {}",
                skill.name(),
                skill.formula().to_string(),
                record.skill_value(skill.name()).unwrap_or(0),
                score
            );
        }
    }
    Ok(())
}
