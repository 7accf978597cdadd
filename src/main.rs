use babyjournal::application::{init::init, ConfigService, JournalSession};
use babyjournal::cli::{self, Cli, Commands};
use babyjournal::domain::{
    calculate_age, format_age, BabyProfile, DateReference, EntryFilter, EntryPatch, RawPhoto,
};
use babyjournal::error::{JournalError, Result};
use babyjournal::infrastructure::{BackendKind, FileSystemRepository, JournalRepository};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "babyjournal=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn resolve_date(input: &str) -> Result<NaiveDate> {
    Ok(DateReference::parse(input)?.resolve(today()))
}

fn open_session() -> Result<JournalSession> {
    let repo = FileSystemRepository::discover()?;
    let config = repo.load_config()?;
    let store = repo.open_store(&config)?;
    JournalSession::open(store)
}

fn raw_photos(paths: Vec<std::path::PathBuf>) -> Vec<RawPhoto> {
    paths.into_iter().map(RawPhoto::from_path).collect()
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("babyjournal - Photo journal for a child's milestones");
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Init { path, backend } => {
            let backend = BackendKind::from_str(&backend).map_err(JournalError::Config)?;
            init(&path, backend)?;
            println!("Initialized babyjournal at {}", path.display());
            println!("Backend: {}", backend);
            Ok(())
        }
        Commands::Profile { name, birth_date } => {
            let mut session = open_session()?;

            if name.is_none() && birth_date.is_none() {
                match session.profile() {
                    Some(profile) => {
                        println!("{}", cli::format_profile(profile));
                        if let Some(age) = session.current_age(today()) {
                            println!("Age today: {}", format_age(&age));
                        }
                    }
                    None => println!("No profile yet"),
                }
                return Ok(());
            }

            let current = session.profile().cloned();
            let name = name
                .or_else(|| current.as_ref().map(|p| p.name.clone()))
                .ok_or_else(|| JournalError::Validation("--name is required".to_string()))?;
            let birth_date = match birth_date {
                Some(input) => resolve_date(&input)?,
                None => current.map(|p| p.birth_date).ok_or_else(|| {
                    JournalError::Validation("--birth-date is required".to_string())
                })?,
            };

            let profile = BabyProfile::new(name, birth_date);
            session.save_profile(profile.clone())?;
            println!("Saved profile: {}", cli::format_profile(&profile));
            Ok(())
        }
        Commands::Add {
            date,
            notes,
            tags,
            photos,
        } => {
            let mut session = open_session()?;
            let mut patch = EntryPatch::create(resolve_date(&date)?).with_tags(tags);
            patch.notes = notes;

            let saved = session.save_entry(patch, raw_photos(photos))?;
            println!("Added entry {} ({})", saved.id, format_age(&saved.age_at_time));
            Ok(())
        }
        Commands::Edit {
            id,
            date,
            notes,
            tags,
            clear_tags,
            photos,
            drop_photos,
        } => {
            let mut session = open_session()?;
            let existing = session.find_entry(&id)?;

            let mut patch = EntryPatch::update(id.clone());
            patch.date = date.as_deref().map(resolve_date).transpose()?;
            patch.notes = notes;
            if clear_tags {
                patch.tags = Some(Vec::new());
            } else if !tags.is_empty() {
                patch.tags = Some(tags);
            }
            if !drop_photos.is_empty() {
                patch.photos = Some(
                    existing
                        .photos
                        .iter()
                        .filter(|p| !drop_photos.contains(&p.id))
                        .cloned()
                        .collect(),
                );
            }

            let saved = session.save_entry(patch, raw_photos(photos))?;
            println!("Updated entry {} ({})", saved.id, format_age(&saved.age_at_time));
            Ok(())
        }
        Commands::Delete { id } => {
            let mut session = open_session()?;
            session.delete_entry(&id)?;
            println!("Deleted entry {}", id);
            Ok(())
        }
        Commands::Show { id } => {
            let session = open_session()?;
            print!("{}", cli::format_entry_detail(session.find_entry(&id)?));
            Ok(())
        }
        Commands::List {
            search,
            tag,
            age_year,
        } => {
            let session = open_session()?;
            let filter = EntryFilter::new()
                .with_search(search.unwrap_or_default())
                .with_tag(tag)
                .with_age_year(age_year);

            let entries = session.filter_entries(&filter);
            let output = cli::format_entry_list(&entries);
            if entries.is_empty() {
                println!("{}", output);
            } else {
                print!("{}", output);
            }
            Ok(())
        }
        Commands::Facets => {
            let session = open_session()?;
            let catalog = session.catalog();
            print!(
                "{}",
                cli::format_facets(&catalog.distinct_tags(), &catalog.distinct_age_years())
            );
            Ok(())
        }
        Commands::Tags { add } => {
            let mut session = open_session()?;
            let tags = match add {
                Some(tag) => session.add_tag(&tag)?,
                None => session.tags()?,
            };
            let output = cli::format_tag_list(&tags);
            if tags.is_empty() {
                println!("{}", output);
            } else {
                print!("{}", output);
            }
            Ok(())
        }
        Commands::Age { date } => {
            let session = open_session()?;
            let profile = session.profile().ok_or(JournalError::ProfileMissing)?;
            let target = match date {
                Some(input) => resolve_date(&input)?,
                None => today(),
            };
            println!(
                "{} is {} old on {}",
                profile.name,
                format_age(&calculate_age(profile.birth_date, target)),
                target.format("%Y-%m-%d")
            );
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("backend = {}", config.backend);
                println!("owner = {}", config.owner);
                println!("sheet.client_id = {}", config.sheet.client_id);
                println!("sheet.api_key = {}", config.sheet.api_key);
                println!("sheet.account = {}", config.sheet.account);
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: babyjournal config [--list | <key> [<value>]]");
                println!("Valid keys: backend, owner, sheet.client_id, sheet.api_key, sheet.account");
                Ok(())
            }
        }
    }
}
