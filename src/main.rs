//! Studyplan CLI
//!
//! Command-line front end for the planner:
//! - Sign in and out
//! - Manage courses, assignments and schedules
//! - Show the dashboard
//! - Talk to the study assistant

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use studyplan::client::{ApiClient, Session, TokenStore};
use studyplan::config::{generate_default_config, Config};
use studyplan::models::{timestamp, NewUser, Priority};
use studyplan::render;
use studyplan::views::{
    AssignmentDraft, AssignmentListView, ChatPanel, CourseDraft, CourseListView, Dashboard,
    EntityListView, FormDraft, Managed, Notifications, ScheduleDraft, ScheduleListView,
};

#[derive(Parser)]
#[command(name = "studyplan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Academic planner: courses, assignments, schedules and a study assistant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend URL (overrides config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        /// Full name
        #[arg(long)]
        name: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in and store the access token
    Login {
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Summary of courses, pending work and upcoming events
    Dashboard,

    /// Manage courses
    Courses {
        #[command(subcommand)]
        action: CourseCommand,
    },

    /// Manage assignments
    Assignments {
        #[command(subcommand)]
        action: AssignmentCommand,
    },

    /// Manage schedule entries
    Schedules {
        #[command(subcommand)]
        action: ScheduleCommand,
    },

    /// Talk to the study assistant
    Chat {
        /// Send one message and exit (interactive otherwise)
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CourseCommand {
    List,
    Show { id: String },
    Add(CourseFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: CourseFields,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AssignmentCommand {
    List,
    Show { id: String },
    Add(AssignmentFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: AssignmentFields,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Flip completed / pending
    Toggle { id: String },
}

#[derive(Subcommand)]
enum ScheduleCommand {
    List,
    Show { id: String },
    Add(ScheduleFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: ScheduleFields,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

/// Fields left out keep their current (or default) value
#[derive(Args)]
struct CourseFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    code: Option<String>,
    #[arg(long)]
    instructor: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args)]
struct AssignmentFields {
    #[arg(long)]
    title: Option<String>,
    /// Course id (defaults to the first course)
    #[arg(long)]
    course: Option<String>,
    /// Due date, YYYY-MM-DDTHH:MM
    #[arg(long)]
    due: Option<String>,
    /// low, medium or high
    #[arg(long)]
    priority: Option<Priority>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args)]
struct ScheduleFields {
    #[arg(long)]
    title: Option<String>,
    /// Start, YYYY-MM-DDTHH:MM
    #[arg(long)]
    start: Option<String>,
    /// End, YYYY-MM-DDTHH:MM
    #[arg(long)]
    end: Option<String>,
    /// Course id; pass an empty string for none
    #[arg(long)]
    course: Option<String>,
    /// Day of week, e.g. Monday
    #[arg(long)]
    day: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl CourseFields {
    fn apply(self, draft: &mut CourseDraft) {
        set(&mut draft.course_name, self.name);
        set(&mut draft.course_code, self.code);
        set(&mut draft.instructor, self.instructor);
        set(&mut draft.description, self.description);
    }
}

impl AssignmentFields {
    fn apply(self, draft: &mut AssignmentDraft) {
        set(&mut draft.title, self.title);
        set(&mut draft.course_id, self.course);
        set(&mut draft.due_date, self.due);
        set(&mut draft.description, self.description);
        if let Some(priority) = self.priority {
            draft.priority = priority;
        }
    }
}

impl ScheduleFields {
    fn apply(self, draft: &mut ScheduleDraft) {
        set(&mut draft.title, self.title);
        set(&mut draft.start_time, self.start);
        set(&mut draft.end_time, self.end);
        set(&mut draft.course_id, self.course);
        set(&mut draft.day_of_week, self.day);
        set(&mut draft.location, self.location);
        set(&mut draft.description, self.description);
    }
}

fn set(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    studyplan::logging::init(&config.logging, &[]);

    let store = TokenStore::new(&config.session.token_file);
    let session = store.session().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable token file");
        Session::anonymous()
    });
    let client = ApiClient::from_config(&config.api, session)?;

    let ok = match cli.command {
        Commands::Register {
            email,
            name,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            let user = NewUser {
                email,
                full_name: name,
                password,
            };
            match client.auth().register(&user).await {
                Ok(profile) => {
                    println!("Registered {}", render::user(&profile));
                    println!("Sign in with: studyplan login {}", profile.email);
                    true
                }
                Err(e) => report(&e, "Registration failed"),
            }
        }

        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            match client.auth().login(&email, &password).await {
                Ok(token) => {
                    store
                        .save(&token.access_token)
                        .context("Failed to store access token")?;
                    let client = client.with_session(Session::bearer(token.access_token));
                    match client.auth().current_user().await {
                        Ok(profile) => println!("Logged in as {}", render::user(&profile)),
                        Err(_) => println!("Logged in"),
                    }
                    true
                }
                Err(e) => report(&e, "Login failed"),
            }
        }

        Commands::Logout => {
            store.clear().context("Failed to remove access token")?;
            println!("Logged out");
            true
        }

        Commands::Whoami => match client.auth().current_user().await {
            Ok(profile) => {
                println!("{}", render::user(&profile));
                true
            }
            Err(e) => report(&e, "Not logged in"),
        },

        Commands::Dashboard => {
            let mut dashboard = Dashboard::new();
            let ok = dashboard.load(&client).await;
            if let Some(snapshot) = dashboard.snapshot() {
                print!("{}", render::dashboard(snapshot, &timestamp::now()));
            }
            flush(dashboard.notifications_mut());
            ok
        }

        Commands::Courses { action } => match action {
            CourseCommand::List => list(&client, CourseListView::new(), render::course_list).await,
            CourseCommand::Show { id } => match client.courses().get_by_id(&id).await {
                Ok(course) => {
                    print!("{}", render::course_detail(&course));
                    true
                }
                Err(e) => report(&e, "Course not found"),
            },
            CourseCommand::Add(fields) => {
                add(&client, CourseListView::new(), |d| fields.apply(d)).await
            }
            CourseCommand::Edit { id, fields } => {
                edit(&client, CourseListView::new(), &id, |d| fields.apply(d)).await
            }
            CourseCommand::Delete { id, yes } => {
                delete(&client, CourseListView::new(), &id, yes).await
            }
        },

        Commands::Assignments { action } => match action {
            AssignmentCommand::List => {
                list(&client, AssignmentListView::new(), render::assignment_list).await
            }
            AssignmentCommand::Show { id } => match client.assignments().get_by_id(&id).await {
                Ok(assignment) => {
                    print!("{}", render::assignment_detail(&assignment));
                    true
                }
                Err(e) => report(&e, "Assignment not found"),
            },
            AssignmentCommand::Add(fields) => {
                add(&client, AssignmentListView::new(), |d| fields.apply(d)).await
            }
            AssignmentCommand::Edit { id, fields } => {
                edit(&client, AssignmentListView::new(), &id, |d| fields.apply(d)).await
            }
            AssignmentCommand::Delete { id, yes } => {
                delete(&client, AssignmentListView::new(), &id, yes).await
            }
            AssignmentCommand::Toggle { id } => {
                let mut view = AssignmentListView::new();
                let ok = view.toggle_complete(&client, &id).await;
                if let Some(assignment) = view.find(&id) {
                    println!(
                        "{}: {}",
                        assignment.title,
                        if assignment.completed { "completed" } else { "pending" }
                    );
                }
                flush(view.notifications_mut());
                ok
            }
        },

        Commands::Schedules { action } => match action {
            ScheduleCommand::List => {
                list(&client, ScheduleListView::new(), render::schedule_list).await
            }
            ScheduleCommand::Show { id } => match client.schedules().get_by_id(&id).await {
                Ok(schedule) => {
                    print!("{}", render::schedule_detail(&schedule));
                    true
                }
                Err(e) => report(&e, "Schedule not found"),
            },
            ScheduleCommand::Add(fields) => {
                add(&client, ScheduleListView::new(), |d| fields.apply(d)).await
            }
            ScheduleCommand::Edit { id, fields } => {
                edit(&client, ScheduleListView::new(), &id, |d| fields.apply(d)).await
            }
            ScheduleCommand::Delete { id, yes } => {
                delete(&client, ScheduleListView::new(), &id, yes).await
            }
        },

        Commands::Chat { message } => chat(&client, message).await?,

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn list<R: Managed>(
    client: &ApiClient,
    mut view: EntityListView<R>,
    show: fn(&EntityListView<R>) -> String,
) -> bool {
    let ok = view.load(client).await;
    if ok {
        print!("{}", show(&view));
    }
    flush(view.notifications_mut());
    ok
}

async fn add<R: Managed>(
    client: &ApiClient,
    mut view: EntityListView<R>,
    fill: impl FnOnce(&mut R::Draft),
) -> bool {
    if !view.load(client).await || !view.open_create() {
        flush(view.notifications_mut());
        return false;
    }

    submit(client, view, fill).await
}

async fn edit<R: Managed>(
    client: &ApiClient,
    mut view: EntityListView<R>,
    id: &str,
    fill: impl FnOnce(&mut R::Draft),
) -> bool {
    if !view.load(client).await || !view.open_edit(id) {
        flush(view.notifications_mut());
        return false;
    }

    submit(client, view, fill).await
}

async fn submit<R: Managed>(
    client: &ApiClient,
    mut view: EntityListView<R>,
    fill: impl FnOnce(&mut R::Draft),
) -> bool {
    if let Some(draft) = view.form_mut().draft_mut() {
        fill(draft);
    }
    for warning in draft_warnings(&view) {
        eprintln!("warning: {}", warning);
    }

    let ok = view.submit_form(client).await;
    flush(view.notifications_mut());
    ok
}

/// Non-blocking problems with the open draft, if any
fn draft_warnings<R: Managed>(view: &EntityListView<R>) -> Vec<String> {
    view.form().draft().map(|d| d.warnings()).unwrap_or_default()
}

async fn delete<R: Managed>(
    client: &ApiClient,
    mut view: EntityListView<R>,
    id: &str,
    yes: bool,
) -> bool {
    let ok = view
        .delete(client, id, &mut |question: &str| yes || confirm(question))
        .await;
    if !ok && view.notifications().is_empty() {
        println!("Cancelled");
    }
    flush(view.notifications_mut());
    ok
}

async fn chat(client: &ApiClient, message: Option<String>) -> anyhow::Result<bool> {
    let mut panel = ChatPanel::new();

    if let Some(message) = message {
        let ok = panel.send(client, &message).await;
        if let Some(reply) = panel.messages().last() {
            println!("{}", render::chat_message(reply));
        }
        flush(panel.notifications_mut());
        return Ok(ok);
    }

    for message in panel.messages() {
        println!("{}", render::chat_message(message));
    }
    print!("{}", render::suggestions(panel.suggestions()));
    println!("(type a message, a suggestion number, or 'exit')");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        match line.parse::<usize>() {
            Ok(n) if n >= 1 && panel.use_suggestion(n - 1) => {}
            _ => panel.set_input(line),
        }

        let before = panel.messages().len();
        panel.submit_input(client).await;
        for message in &panel.messages()[before..] {
            println!("{}", render::chat_message(message));
        }
        flush(panel.notifications_mut());
    }

    Ok(true)
}

/// Print and discard queued notifications
fn flush(notifications: &mut Notifications) {
    for toast in notifications.drain() {
        eprintln!("{}", render::toast(&toast));
    }
}

fn report(error: &studyplan::ClientError, fallback: &str) -> bool {
    eprintln!("{}", error.detail().unwrap_or(fallback));
    tracing::debug!(error = %error, "Command failed");
    false
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn confirm(question: &str) -> bool {
    match prompt(&format!("{} [y/N] ", question)) {
        Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_warnings_for_inverted_schedule() {
        let mut view = ScheduleListView::new();
        assert!(draft_warnings(&view).is_empty());

        assert!(view.open_create());
        if let Some(draft) = view.form_mut().draft_mut() {
            draft.start_time = "2030-04-01T15:00".to_string();
            draft.end_time = "2030-04-01T13:00".to_string();
        }
        assert_eq!(
            draft_warnings(&view),
            vec!["End time is before start time".to_string()]
        );
    }
}
