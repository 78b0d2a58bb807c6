use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lms_core::model::{CourseId, Exam, ExamId, Question, QuestionId, Role, User, UserId};
use services::{ApiConfig, Clock, ExamApi, HttpExamApi, InMemoryExamApi};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidId { flag: &'static str, raw: String },
    MissingCourse,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidId { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::MissingCourse => write!(f, "exams requires --course-id"),
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

fn parse_id<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidId { flag, raw })
}

struct DesktopApp {
    exam_api: Arc<dyn ExamApi>,
    user: Option<User>,
    launch_exam: Option<ExamId>,
}

impl UiApp for DesktopApp {
    fn exam_api(&self) -> Arc<dyn ExamApi> {
        Arc::clone(&self.exam_api)
    }

    fn clock(&self) -> Clock {
        Clock::system()
    }

    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }

    fn launch_exam(&self) -> Option<ExamId> {
        self.launch_exam
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Args {
    api: ApiConfig,
    roles: Vec<Role>,
    username: String,
    user_id: UserId,
    exam_id: Option<ExamId>,
    course_id: Option<CourseId>,
    demo: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            api: ApiConfig::new("http://localhost:8080/api"),
            roles: Vec::new(),
            username: "student".into(),
            user_id: UserId::new(1),
            exam_id: None,
            course_id: None,
            demo: false,
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--api <url>] [--token <token>] [--roles <list>]");
    eprintln!("                            [--user <name>] [--user-id <id>] [--exam-id <id>] [--demo]");
    eprintln!("  cargo run -p app -- exams --course-id <id> [--api <url>] [--token <token>] [--demo]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api http://localhost:8080/api");
    eprintln!("  --demo implies --roles ESTUDIANTE and a seeded in-memory exam service");
    eprintln!();
    eprintln!("Environment (a .env file is read when present):");
    eprintln!("  LMS_API_BASE_URL, LMS_API_TOKEN, LMS_USER_ROLES, LMS_USER_NAME, LMS_USER_ID,");
    eprintln!("  LMS_EXAM_ID, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Exams,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "exams" => Some(Self::Exams),
            _ => None,
        }
    }
}

impl Args {
    fn from_env() -> Self {
        let env = |key: &str| {
            std::env::var(key)
                .ok()
                .filter(|value| !value.trim().is_empty())
        };
        let defaults = Self::default();
        Self {
            api: ApiConfig::from_env(),
            roles: env("LMS_USER_ROLES")
                .map(|raw| Role::parse_list(&raw))
                .unwrap_or_default(),
            username: env("LMS_USER_NAME").unwrap_or(defaults.username),
            user_id: env("LMS_USER_ID")
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(defaults.user_id),
            exam_id: env("LMS_EXAM_ID").and_then(|raw| raw.parse().ok()),
            course_id: None,
            demo: false,
        }
    }

    fn apply_flags(mut self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(args, "--api")?;
                    self.api = ApiConfig {
                        base_url: value,
                        token: self.api.token,
                    };
                }
                "--token" => {
                    let value = require_value(args, "--token")?;
                    self.api = self.api.with_token(value);
                }
                "--roles" => {
                    let value = require_value(args, "--roles")?;
                    self.roles = Role::parse_list(&value);
                }
                "--user" => self.username = require_value(args, "--user")?,
                "--user-id" => {
                    let value = require_value(args, "--user-id")?;
                    self.user_id = UserId::new(parse_id(value, "--user-id")?);
                }
                "--exam-id" => {
                    let value = require_value(args, "--exam-id")?;
                    self.exam_id = Some(parse_id(value, "--exam-id")?);
                }
                "--course-id" => {
                    let value = require_value(args, "--course-id")?;
                    self.course_id = Some(parse_id(value, "--course-id")?);
                }
                "--demo" => self.demo = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        if self.demo && self.roles.is_empty() {
            self.roles = vec![Role::Student];
        }
        Ok(self)
    }

    /// Without roles there is no signed-in user and the UI shows the login page.
    fn user(&self) -> Option<User> {
        if self.roles.is_empty() {
            return None;
        }
        Some(User {
            id: self.user_id,
            username: self.username.clone(),
            email: None,
            roles: self.roles.clone(),
        })
    }
}

const DEMO_COURSE: CourseId = CourseId::new(1);
const DEMO_EXAM: ExamId = ExamId::new(1);

fn demo_exam() -> Result<Exam, Box<dyn std::error::Error>> {
    let question = |id: u64, text: &str, options: &[&str], correct: usize| {
        Question::new(
            QuestionId::new(id),
            text,
            options.iter().map(|option| (*option).to_string()).collect(),
        )
        .with_correct_option(correct)
    };
    let exam = Exam::new(
        DEMO_EXAM,
        "Rust fundamentals",
        "Ownership, borrowing and error handling basics.",
        DEMO_COURSE,
        vec![
            question(
                1,
                "What happens to a String when it is assigned to another variable?",
                &["It is copied", "It is moved", "It is borrowed"],
                1,
            ),
            question(
                2,
                "How many mutable references to a value may exist at once?",
                &["None", "One", "Any number"],
                1,
            ),
            question(
                3,
                "Which operator propagates an error from a function returning Result?",
                &["!", "?", "&"],
                1,
            ),
            question(
                4,
                "Which trait lets a type be duplicated implicitly?",
                &["Clone", "Copy", "Default"],
                1,
            ),
        ],
        5,
        60,
    )?;
    Ok(exam)
}

fn build_api(args: &Args) -> Result<Arc<dyn ExamApi>, Box<dyn std::error::Error>> {
    if args.demo {
        let api = InMemoryExamApi::new().with_student(args.user_id);
        api.insert_exam(demo_exam()?)?;
        tracing::info!(exam_id = %DEMO_EXAM, "demo mode: in-memory exam service seeded");
        return Ok(Arc::new(api));
    }
    tracing::info!(base_url = %args.api.base_url, "using exam service");
    Ok(Arc::new(HttpExamApi::new(args.api.clone())))
}

async fn list_exams(
    api: &dyn ExamApi,
    course_id: CourseId,
) -> Result<(), Box<dyn std::error::Error>> {
    let exams = api.list_course_exams(course_id).await?;
    let results = api.list_my_results(course_id).await?;
    if exams.is_empty() {
        println!("course {course_id}: no exams");
        return Ok(());
    }
    for exam in &exams {
        println!(
            "{:>6}  {}  ({} questions, {} min, pass {}%)",
            exam.id().value(),
            exam.title(),
            exam.question_count(),
            exam.time_limit_minutes(),
            exam.passing_score()
        );
        for result in results.iter().filter(|result| result.exam_id == exam.id()) {
            let status = if result.passed { "passed" } else { "failed" };
            println!(
                "        {}  {:.1}%  {status}",
                result.submitted_at.format("%Y-%m-%d %H:%M"),
                result.score
            );
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(log_fmt::layer().with_target(false))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Launching the UI is the default when no subcommand is given.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
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
    let parsed = Args::from_env().apply_flags(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let exam_api = build_api(&parsed)?;

    match cmd {
        Command::Ui => {
            let launch_exam = parsed.exam_id.or(parsed.demo.then_some(DEMO_EXAM));
            let app = DesktopApp {
                exam_api,
                user: parsed.user(),
                launch_exam,
            };

            let context = build_app_context(Arc::new(app));

            // Some dev setups default to an always-on-top window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("LMS Exams")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Exams => {
            let course_id = parsed
                .course_id
                .or(parsed.demo.then_some(DEMO_COURSE))
                .ok_or(ArgsError::MissingCourse)?;
            list_exams(exam_api.as_ref(), course_id).await
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(error = %err, "exiting");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
