use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};

use canvas_chat::assignments::{search_assignments, search_keywords, upcoming_assignments};
use canvas_chat::grades::submission_breakdown;
use canvas_chat::models::{Course, CourseId};
use canvas_chat::respond::{
    format_breakdown, format_grade_digest, format_search_results, format_upcoming_digest,
};
use canvas_chat::snapshot::{load_snapshot, SnapshotGrades};
use canvas_chat::{ChatBot, ChatConfig};

const DASHBOARD_UPCOMING: usize = 3;
const SEARCH_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "canvas-chat")]
#[command(about = "Answer questions about your Canvas courses, assignments and grades", long_about = None)]
struct Cli {
    /// Directory holding courses.json, assignments.json, grades.csv, ...
    #[arg(long, env = "CANVAS_CHAT_DATA", default_value = ".")]
    data_dir: PathBuf,
    #[arg(long, default_value_t = 60.0)]
    passing_threshold: f64,
    #[arg(long, default_value_t = 5)]
    list_limit: usize,
    /// Grade lookups allowed in flight at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Answer questions read from stdin, one per line
    Chat,
    /// Show upcoming assignments and current grades
    Dashboard,
    /// Search assignment names by keyword
    Search { keywords: Vec<String> },
    /// List a course's assignments with due dates and submission status
    Assignments {
        #[arg(long)]
        course: CourseId,
    },
    /// Show per-assignment scores for a course
    CourseGrades {
        #[arg(long)]
        course: CourseId,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    let snapshot = load_snapshot(&cli.data_dir).with_context(|| {
        format!(
            "failed to load Canvas snapshot from {}",
            cli.data_dir.display()
        )
    })?;
    let user = snapshot.user;

    let config = ChatConfig {
        passing_threshold: cli.passing_threshold,
        list_limit: cli.list_limit,
        grade_fetch_concurrency: cli.concurrency,
    };
    let bot = ChatBot::with_config(
        snapshot.grades,
        snapshot.courses,
        snapshot.assignments,
        config,
    );

    match cli.command {
        Commands::Ask { query } => {
            println!("{}", bot.process_query(&query.join(" ")));
        }
        Commands::Chat => chat(&bot)?,
        Commands::Dashboard => {
            if let Some(user) = &user {
                println!("Welcome back, {}", user.name);
                println!();
            }
            println!("Upcoming Assignments");
            println!("{}", "-".repeat(40));
            let upcoming = upcoming_assignments(bot.courses(), bot.assignments(), Utc::now());
            for line in format_upcoming_digest(&upcoming, DASHBOARD_UPCOMING) {
                println!("{line}");
            }
            println!();
            println!("Grades");
            println!("{}", "-".repeat(40));
            for line in format_grade_digest(&bot.grades().course_grades()) {
                println!("{line}");
            }
        }
        Commands::Search { keywords } => {
            let keywords = search_keywords(&keywords.join(" "));
            let hits = search_assignments(bot.courses(), bot.assignments(), &keywords, SEARCH_LIMIT);
            println!("{}", format_search_results(&hits));
        }
        Commands::Assignments { course } => {
            let course = find_course(&bot, course)?;
            println!("Assignments for {}", course.name);
            println!();
            let assignments = bot
                .assignments()
                .get(&course.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            if assignments.is_empty() {
                println!("No assignments found.");
            }
            for assignment in assignments {
                let status = if assignment.has_submitted_submissions {
                    "Submitted"
                } else {
                    "Not submitted"
                };
                println!("  * {}", assignment.name);
                println!(
                    "    Due: {}",
                    assignment.due_at.as_deref().unwrap_or("No due date")
                );
                println!("    Status: {status}");
                println!();
            }
        }
        Commands::CourseGrades { course } => {
            let course = find_course(&bot, course)?;
            let lines = submission_breakdown(bot.source(), course.id, bot.assignments());
            print!("{}", format_breakdown(&course.name, &lines));
        }
    }

    Ok(())
}

fn find_course(
    bot: &ChatBot<SnapshotGrades>,
    course_id: CourseId,
) -> anyhow::Result<&Course> {
    bot.courses()
        .iter()
        .find(|course| course.id == course_id)
        .with_context(|| format!("no course with id {course_id} in the snapshot"))
}

fn chat(bot: &ChatBot<SnapshotGrades>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("failed to read question")? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }
        writeln!(stdout, "{}", bot.process_query(query))?;
        writeln!(stdout)?;
    }

    Ok(())
}
