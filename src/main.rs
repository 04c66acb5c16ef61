use lang_portal::cli::{Args, PageArgs, Report};
use lang_portal::dashboard_service::DashboardService;
use lang_portal::database::Database;
use lang_portal::database_factory::DatabaseFactory;
use lang_portal::group_service::GroupService;
use lang_portal::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_SESSION_PAGE_SIZE, PageRequest};
use lang_portal::study_activity_service::StudyActivityService;
use lang_portal::word_service::WordService;
use log::info;
use serde_json::{Value, json};
use std::sync::Arc;

fn page_request(args: &PageArgs, default_page_size: i64) -> PageRequest {
    PageRequest::parse(
        args.page.as_deref(),
        args.page_size.as_deref(),
        default_page_size,
    )
}

fn render(db: Arc<Database>, report: Report) -> Result<Value, Box<dyn std::error::Error>> {
    let words = WordService::new(db.clone());
    let groups = GroupService::new(db.clone());
    let study = StudyActivityService::new(db.clone());
    let dashboard = DashboardService::new(db);

    let value = match report {
        Report::Dashboard => json!({
            "last_study_session": dashboard.get_last_study_session()?,
            "study_progress": dashboard.get_study_progress()?,
            "quick_stats": dashboard.get_quick_stats()?,
        }),
        Report::Words(page) => {
            serde_json::to_value(words.list_words(page_request(&page, DEFAULT_PAGE_SIZE))?)?
        }
        Report::Word { id } => serde_json::to_value(words.get_word_detail(id)?)?,
        Report::Groups(page) => {
            serde_json::to_value(groups.list_groups(page_request(&page, DEFAULT_PAGE_SIZE))?)?
        }
        Report::Group { id } => serde_json::to_value(groups.get_group(id)?)?,
        Report::GroupWords { id, page } => serde_json::to_value(
            groups.get_group_words(id, page_request(&page, DEFAULT_PAGE_SIZE))?,
        )?,
        Report::GroupSessions { id, page } => serde_json::to_value(
            groups.get_group_study_sessions(id, page_request(&page, DEFAULT_PAGE_SIZE))?,
        )?,
        Report::Activities => serde_json::to_value(study.list_study_activities()?)?,
        Report::ActivitySessions { id, page } => serde_json::to_value(
            study.get_study_activity_sessions(id, page_request(&page, DEFAULT_SESSION_PAGE_SIZE))?,
        )?,
        Report::Sessions(page) => serde_json::to_value(
            study.list_study_sessions(page_request(&page, DEFAULT_SESSION_PAGE_SIZE))?,
        )?,
        Report::Session { id } => serde_json::to_value(study.get_study_session(id)?)?,
        Report::SessionWords { id, page } => serde_json::to_value(
            study.get_study_session_words(id, page_request(&page, DEFAULT_PAGE_SIZE))?,
        )?,
    };
    Ok(value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse_args();
    let config = DatabaseFactory::config_from_args(&args)?;
    let db = Arc::new(DatabaseFactory::create(config)?);
    info!("Database ready, today is {}", db.today());

    let report = args.command.unwrap_or(Report::Dashboard);
    let value = render(db, report)?;
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}
