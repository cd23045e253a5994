use std::fmt;
use std::io::{BufRead, Write as _};
use std::str::FromStr;

use mathblast_core::Clock;
use mathblast_core::model::{Mode, ProgressRecord, Question, Submission};
use services::GameLoopService;
use storage::repository::Storage;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMode { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMode { raw } => write!(f, "invalid --mode value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  mathblast play     [--db <sqlite_url>] [--mode <mode>]");
    eprintln!("  mathblast progress [--db <sqlite_url>]");
    eprintln!("  mathblast reset    [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Modes: counting, addition, subtraction, shapes, patterns");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:mathblast.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MATHBLAST_DB_URL, MATHBLAST_MODE");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Progress,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "progress" => Some(Self::Progress),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    mode: Option<Mode>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("MATHBLAST_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://mathblast.sqlite3".into(), normalize_sqlite_url);
        let mut mode = std::env::var("MATHBLAST_MODE")
            .ok()
            .and_then(|value| Mode::from_str(&value).ok());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--mode" => {
                    let value = require_value(args, "--mode")?;
                    let parsed = Mode::from_str(&value)
                        .map_err(|_| ArgsError::InvalidMode { raw: value.clone() })?;
                    mode = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, mode })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path = std::path::Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    // Joining an already-absolute path leaves it untouched.
    let absolute = std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf());
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .and_then(|p| p.split('?').next())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::File::create(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

fn category_emoji(category: mathblast_core::model::ItemCategory) -> &'static str {
    use mathblast_core::model::ItemCategory;
    match category {
        ItemCategory::Animals => "🐱",
        ItemCategory::Fruits => "🍎",
        ItemCategory::Shapes => "🔵",
    }
}

fn print_question(question: &Question) {
    println!();
    match question {
        Question::Counting(q) => {
            let strip = vec![category_emoji(q.category()); q.target_count() as usize];
            println!("  {}", strip.join(" "));
            println!("How many {} do you see?", q.category().as_str());
        }
        Question::Addition(q) => {
            println!("{} + {} = ?", q.operand_a(), q.operand_b());
        }
        Question::Subtraction(q) => {
            println!("{} - {} = ?", q.minuend(), q.subtrahend());
            println!("How many are left?");
        }
        Question::Shapes(q) => {
            use mathblast_core::model::ShapePromptStyle;
            match q.style() {
                ShapePromptStyle::Identify => {
                    println!("What shape is this?  {}", q.target().emoji());
                }
                ShapePromptStyle::Find => {
                    println!("Find the {}:", q.target().label());
                }
            }
        }
        Question::Patterns(q) => {
            println!("What comes next in the pattern?");
            println!("  {} ?", q.sequence().join(" "));
        }
    }
}

/// Display text and the submission each option stands for, in shuffled
/// question order.
fn option_rows(question: &Question) -> Vec<(String, Submission)> {
    match question {
        Question::Counting(q) => numeric_rows(q.options()),
        Question::Addition(q) => numeric_rows(q.options()),
        Question::Subtraction(q) => numeric_rows(q.options()),
        Question::Shapes(q) => q
            .options()
            .iter()
            .map(|shape| {
                (
                    format!("{} {}", shape.emoji(), shape.label()),
                    Submission::Label(shape.label().to_owned()),
                )
            })
            .collect(),
        Question::Patterns(q) => q
            .options()
            .iter()
            .map(|token| ((*token).to_owned(), Submission::Label((*token).to_owned())))
            .collect(),
    }
}

fn numeric_rows(options: &[u32]) -> Vec<(String, Submission)> {
    options
        .iter()
        .map(|n| (n.to_string(), Submission::Number(*n)))
        .collect()
}

fn print_progress(record: &ProgressRecord) {
    println!();
    println!("Progress");
    for mode in Mode::ALL {
        let stars = "⭐".repeat(record.stars_for(mode) as usize);
        println!(
            "  {} {:<12} best {:>3}  {}",
            mode.emoji(),
            mode.label(),
            record.best(mode),
            stars
        );
    }
    println!("  Total score: {}", record.total_score());
    println!("  Rewards:     {}", record.rewards());
    println!("  Last played: {}", record.last_played().to_rfc3339());
}

//
// ─── COMMANDS ──────────────────────────────────────────────────────────────────
//

fn prompt_line(prompt: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

async fn choose_mode(service: &GameLoopService) -> Result<Option<Mode>, Box<dyn std::error::Error>> {
    let record = service.progress().load().await;
    println!("Math Blast! 🚀");
    println!("Choose a game mode:");
    for (index, mode) in Mode::ALL.iter().enumerate() {
        let stars = "⭐".repeat(record.stars_for(*mode) as usize);
        println!("  {}) {} {}  {}", index + 1, mode.emoji(), mode.label(), stars);
    }

    loop {
        let Some(line) = prompt_line("> ")? else {
            return Ok(None);
        };
        if line == "q" {
            return Ok(None);
        }
        if let Ok(choice) = line.parse::<usize>() {
            if (1..=Mode::ALL.len()).contains(&choice) {
                return Ok(Some(Mode::ALL[choice - 1]));
            }
        }
        println!("Pick a number between 1 and {} (or q to quit).", Mode::ALL.len());
    }
}

async fn play(service: &GameLoopService, mode: Mode) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = service.start_session(mode);
    let mut rng = rand::rng();

    println!();
    println!("{} {}: answer with 1-4, q to stop.", mode.emoji(), mode.label());

    loop {
        let question = match session.current_question() {
            Some(question) => question.clone(),
            None => session.next_question(&mut rng)?.clone(),
        };

        print_question(&question);
        let rows = option_rows(&question);
        for (index, (text, _)) in rows.iter().enumerate() {
            println!("  {}) {}", index + 1, text);
        }

        let Some(line) = prompt_line("> ")? else {
            break;
        };
        if line == "q" {
            break;
        }
        let Some(choice) = line
            .parse::<usize>()
            .ok()
            .filter(|c| (1..=rows.len()).contains(c))
        else {
            println!("Pick a number between 1 and {} (or q to stop).", rows.len());
            continue;
        };

        let submission = rows[choice - 1].1.clone();
        let answer = service.answer_current(&mut session, &submission).await?;

        if answer.outcome.correct {
            println!("Correct! 🎉  Score: {}", answer.outcome.score);
            if let Some(tier) = answer.outcome.reward {
                println!("{}", tier.message());
            }
        } else {
            println!("Try again! 💪");
        }
    }

    print_progress(&service.progress().load().await);
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
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

    // Open + migrate SQLite at startup; core/services stay free of I/O glue.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    let service = GameLoopService::new(Clock::default(), storage.kv);

    match cmd {
        Command::Play => {
            let mode = match parsed.mode {
                Some(mode) => Some(mode),
                None => choose_mode(&service).await?,
            };
            if let Some(mode) = mode {
                play(&service, mode).await?;
            }
            Ok(())
        }
        Command::Progress => {
            print_progress(&service.progress().load().await);
            Ok(())
        }
        Command::Reset => {
            service.progress().reset().await;
            println!("Progress cleared.");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
