use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coursetrack::api::{ApiClient, CourseApi, TokenStore, auth};
use coursetrack::app::persistent_track;
use coursetrack::config::progress::ProgressStore;
use coursetrack::course::{Course, storage};
use coursetrack::track::{LearningTrack, lesson_icon, progress_bar};
use coursetrack::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "coursetrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a course file in the learning-track viewer
    View {
        /// Path to a course JSON file
        path: PathBuf,
    },
    /// Print module and course progress for a course file
    Progress {
        /// Path to a course JSON file
        path: PathBuf,
    },
    /// Record a lesson as completed without opening the viewer
    Complete {
        /// Path to a course JSON file
        path: PathBuf,
        /// Module containing the lesson
        module: String,
        /// Lesson to mark complete
        lesson: String,
        /// Also report the completion to the LMS backend
        #[arg(long)]
        sync: bool,
    },
    /// List courses available on the LMS backend
    Courses,
    /// Download a course from the LMS backend as a course file
    Fetch {
        /// Course identifier
        course_id: String,
        /// Output path (defaults to <course_id>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List a course's materials
    Materials {
        /// Course identifier
        course_id: String,
    },
    /// Store API tokens in the system keyring
    Token {
        /// Access token
        access: String,
        /// Refresh token
        refresh: Option<String>,
    },
    /// Remove stored API tokens
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursetrack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::View { path } => {
            let course = storage::load_course(&path)?;
            let track = open_track(&course)?;
            let mut app = App::new(config, course, track)?;
            app.run().await?;
        }
        Commands::Progress { path } => {
            let course = storage::load_course(&path)?;
            let store = ProgressStore::load()?;
            let track = LearningTrack::with_completions(&course, store.completions_for(&course.id));
            print_progress(&course, &track);
        }
        Commands::Complete { path, module, lesson, sync } => {
            let course = storage::load_course(&path)?;
            if course.find_lesson(&module, &lesson).is_none() {
                anyhow::bail!("Lesson {} not found in module {} of {}", lesson, module, course.id);
            }
            let mut track = open_track(&course)?;
            track.mark_complete(&module, &lesson);
            println!("Course progress: {}%", track.course_progress(&course));

            if sync {
                let client = ApiClient::new(&config, TokenStore)?;
                CourseApi::new(&client)
                    .update_course_progress(&course.id, &lesson, true, None)
                    .await
                    .context("Failed to report progress")?;
                println!("Reported to {}", config.api_base_url);
            }
        }
        Commands::Courses => {
            let client = ApiClient::new(&config, TokenStore)?;
            let courses = CourseApi::new(&client).get_courses().await?;
            if courses.is_empty() {
                println!("No courses");
            }
            for course in courses {
                let status = if course.is_active { "" } else { " (archived)" };
                println!("{}  {}{}", course.id, course.title, status);
            }
        }
        Commands::Fetch { course_id, output } => {
            let client = ApiClient::new(&config, TokenStore)?;
            let record = CourseApi::new(&client).get_course_by_id(&course_id).await?;
            let course = record.into_course();
            let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.json", course_id)));
            storage::save_course(&course, &output)?;
            println!(
                "Saved {} ({} modules, {} lessons) to {}",
                course.title,
                course.module_count(),
                course.lesson_count(),
                output.display()
            );
        }
        Commands::Materials { course_id } => {
            let client = ApiClient::new(&config, TokenStore)?;
            let materials = CourseApi::new(&client).get_course_materials(&course_id).await?;
            if materials.is_empty() {
                println!("No materials");
            }
            for material in materials {
                let lesson = material.into_lesson();
                let icon = lesson_icon(&lesson.lesson_type, false);
                println!("{:>3}. [{}] {}", lesson.order, icon.label(), lesson.title);
            }
        }
        Commands::Token { access, refresh } => {
            if auth::is_token_expired(&access) {
                tracing::warn!("Access token is already expired or not a JWT");
            }
            TokenStore.set_tokens(&access, refresh.as_deref())?;
            println!("Stored access token {}", auth::mask_token(&access));
        }
        Commands::Logout => {
            TokenStore.clear()?;
            println!("Tokens removed");
        }
    }

    Ok(())
}

/// Open a session seeded from, and saving to, the on-disk progress store
fn open_track(course: &Course) -> Result<LearningTrack> {
    let path = ProgressStore::progress_path()?;
    let store = ProgressStore::load_from(&path)?;
    Ok(persistent_track(course, Rc::new(RefCell::new(store)), path))
}

fn print_progress(course: &Course, track: &LearningTrack) {
    let stats = track.stats(course);
    println!("{}", course.title);
    println!("{} modules · {} lessons", stats.modules, stats.lessons);
    println!("Your progress {} {}%\n", progress_bar(stats.percent, 20), stats.percent);

    for (idx, module) in course.modules.iter().enumerate() {
        let percent = track.module_progress(module);
        println!("{}. {} {} {}%", idx + 1, module.title, progress_bar(percent, 10), percent);
        for lesson in &module.lessons {
            let icon = lesson_icon(&lesson.lesson_type, track.is_complete(&lesson.id));
            let duration = lesson.duration.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default();
            println!("   {} {}{}", icon.glyph(), lesson.title, duration);
        }
    }
}
