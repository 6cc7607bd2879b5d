use std::fmt;
use std::sync::Arc;

use pensum_core::{
    CatalogFile, CompletionState, CourseId, Curriculum, RemainingTerms, Statistics,
};
use services::{CourseStateService, ProgressObserver, StateChange};
use storage::repository::Storage;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingCourseId,
    MissingState,
    InvalidState { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingCourseId => write!(f, "expected a course id"),
            ArgsError::MissingState => {
                write!(f, "expected a state (not-taken, in-progress, approved)")
            }
            ArgsError::InvalidState { raw } => {
                write!(f, "invalid state value: {raw} (expected not-taken, in-progress, approved)")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    db_url: String,
    catalog_path: String,
    terms: RemainingTerms,
    positionals: Vec<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- show  [--db <sqlite_url>] [--catalog <path>] [--terms <n>]");
    eprintln!("  cargo run -p app -- set   <course-id> <state> [flags]");
    eprintln!("  cargo run -p app -- cycle <course-id> [flags]");
    eprintln!("  cargo run -p app -- reset <course-id> [flags]");
    eprintln!();
    eprintln!("States: not-taken | in-progress | approved");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://pensum.sqlite3");
    eprintln!("  --catalog pensum.json");
    eprintln!("  --terms 1");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PENSUM_DB_URL, PENSUM_CATALOG, PENSUM_TERMS");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Show,
    Set,
    Cycle,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "show" => Some(Self::Show),
            "set" => Some(Self::Set),
            "cycle" => Some(Self::Cycle),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("PENSUM_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://pensum.sqlite3".into(), normalize_sqlite_url);
        let mut catalog_path = std::env::var("PENSUM_CATALOG")
            .ok()
            .unwrap_or_else(|| "pensum.json".into());
        let mut terms = std::env::var("PENSUM_TERMS")
            .ok()
            .map_or_else(RemainingTerms::default, |value| {
                RemainingTerms::parse(&value)
            });
        let mut positionals = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--catalog" => {
                    catalog_path = require_value(args, "--catalog")?;
                }
                "--terms" => {
                    let value = require_value(args, "--terms")?;
                    terms = RemainingTerms::parse(&value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positionals.push(arg),
            }
        }

        Ok(Self {
            db_url,
            catalog_path,
            terms,
            positionals,
        })
    }

    fn course_id(&self) -> Result<CourseId, ArgsError> {
        self.positionals
            .first()
            .map(|raw| CourseId::new(raw.trim()))
            .ok_or(ArgsError::MissingCourseId)
    }

    fn state(&self) -> Result<CompletionState, ArgsError> {
        let raw = self.positionals.get(1).ok_or(ArgsError::MissingState)?;
        raw.parse()
            .map_err(|_| ArgsError::InvalidState { raw: raw.clone() })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

struct ConsolePresenter;

impl ProgressObserver for ConsolePresenter {
    fn state_changed(&self, course_id: &CourseId, state: CompletionState) {
        println!("{course_id} -> {state}");
    }

    fn statistics_changed(&self, statistics: &Statistics) {
        print_statistics(statistics);
    }
}

fn print_statistics(statistics: &Statistics) {
    println!("approved credits:    {}", statistics.approved_credits);
    println!("in-progress credits: {}", statistics.in_progress_credits);
    println!("pending credits:     {}", statistics.pending_credits);
    println!("progress:            {:.1}%", statistics.progress_percent);
    println!(
        "avg credits/term:    {:.1}",
        statistics.average_credits_per_term
    );
}

fn print_curriculum(service: &CourseStateService) {
    for level in service.catalog().levels() {
        println!("Level {level}");
        for course in service.catalog().courses_at_level(level) {
            let marker = if course.syllabus().is_some() {
                "  [syllabus]"
            } else {
                ""
            };
            println!(
                "  {:<12} {:<32} {:>2}cr  {}{}",
                course.id().as_str(),
                course.name(),
                course.credits(),
                service.state_of(course.id()),
                marker
            );
        }
    }
    println!();
    print_statistics(&service.statistics());
}

fn load_catalog(path: &str) -> Result<Curriculum, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read catalog file {path}: {err}"))?;
    let file: CatalogFile = serde_json::from_str(&raw)
        .map_err(|err| format!("cannot parse catalog file {path}: {err}"))?;
    Ok(file.validate()?)
}

fn report_unknown(change: &Option<StateChange>, course_id: &CourseId) {
    // The service tolerates stale ids silently; the shell still tells the user.
    if change.is_none() {
        eprintln!("course {course_id} is not in the catalog; nothing changed");
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: show the curriculum when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Show,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Show,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let curriculum = load_catalog(&parsed.catalog_path)?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;

    let catalog = Arc::new(curriculum.catalog);
    let mut service = CourseStateService::load(
        Arc::clone(&catalog),
        curriculum.total_career_credits,
        Arc::clone(&storage.progress),
    )
    .await?;
    service.set_remaining_terms(parsed.terms);

    match cmd {
        Command::Show => {
            print_curriculum(&service);
        }
        Command::Set => {
            let course_id = parsed.course_id()?;
            let state = parsed.state()?;
            service.subscribe(Arc::new(ConsolePresenter));
            let change = service.set_state(&course_id, state).await?;
            report_unknown(&change, &course_id);
        }
        Command::Cycle => {
            let course_id = parsed.course_id()?;
            service.subscribe(Arc::new(ConsolePresenter));
            let change = service.cycle(&course_id).await?;
            report_unknown(&change, &course_id);
        }
        Command::Reset => {
            let course_id = parsed.course_id()?;
            service.subscribe(Arc::new(ConsolePresenter));
            let change = service.reset(&course_id).await?;
            report_unknown(&change, &course_id);
        }
    }

    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
