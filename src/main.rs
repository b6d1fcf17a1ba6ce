use chrono::{Datelike, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use dayslate::config::Config;
use dayslate::core::category::{CATEGORY_COLORS, CategoryStyle, Icon, TASK_COLORS};
use dayslate::core::color::Rgb;
use dayslate::core::draft::TaskDraft;
use dayslate::core::profile::Landing;
use dayslate::core::task::Task;
use dayslate::message::Message;
use dayslate::store::{FileStore, KeyValueStore};
use dayslate::view::{CalendarCell, CalendarCursor, RefreshTimer, SearchFilter, day_label};
use dayslate::{Planner, PlannerError};

/// Logs to the systemd user journal (`journalctl --user -t dayslate -f`):
/// dayslate at info/debug (per config), everything else at warn.
fn init_logging(config: &Config) {
    struct FilteredJournal {
        inner: systemd_journal_logger::JournalLog,
    }

    impl log::Log for FilteredJournal {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            if metadata.target().starts_with("dayslate") {
                let max = if dayslate::debug_logging() {
                    log::LevelFilter::Debug
                } else {
                    log::LevelFilter::Info
                };
                metadata.level() <= max
            } else {
                metadata.level() <= log::LevelFilter::Warn
            }
        }
        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                self.inner.log(record);
            }
        }
        fn flush(&self) {
            self.inner.flush();
        }
    }

    dayslate::set_debug_logging(config.debug_logging);

    let journal = match systemd_journal_logger::JournalLog::new() {
        Ok(j) => j.with_syslog_identifier("dayslate".to_string()),
        Err(e) => {
            eprintln!("journal unavailable, logging disabled: {e}");
            return;
        }
    };
    if log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).is_ok() {
        // Global max must be Debug so debug logs can pass through when toggled
        log::set_max_level(log::LevelFilter::Debug);
    }
}

/// The argument following `flag`, unless it is itself a flag.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
        .filter(|v| !v.starts_with("--"))
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[tokio::main]
async fn main() {
    let config = Config::load();
    init_logging(&config);

    if let Err(e) = config.ensure_dirs() {
        log::error!("Failed to create {}: {}", config.data_directory.display(), e);
    }
    let mut planner =
        Planner::open(config.store()).with_notification_window(config.notification_window());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let has = |flag: &str| args.iter().any(|a| a == flag);

    let result = if let Some(name) = flag_value(&args, "--name") {
        planner.update(Message::SetUserName(name.to_string()), now())
    } else if let Some(title) = flag_value(&args, "--add") {
        add_task(&mut planner, &args, title)
    } else if let Some(name) = flag_value(&args, "--add-category") {
        let icon = flag_value(&args, "--icon")
            .and_then(Icon::from_name)
            .unwrap_or_default();
        let color = flag_value(&args, "--color").unwrap_or_default().to_string();
        planner.update(
            Message::AddCategory {
                name: name.to_string(),
                icon,
                color,
            },
            now(),
        )
    } else if let Some(name) = flag_value(&args, "--remove-category") {
        planner.update(Message::RemoveCategory(name.to_string()), now())
    } else if has("--categories") {
        print_categories(&planner);
        Ok(())
    } else if has("--colors") {
        print_palettes();
        Ok(())
    } else if let Some(id) = flag_value(&args, "--done") {
        with_task(&mut planner, id, |date, id| Message::ToggleTask { date, id })
    } else if let Some(id) = flag_value(&args, "--delete") {
        with_task(&mut planner, id, |date, id| Message::DeleteTask { date, id })
    } else if has("--agenda") {
        let filter = SearchFilter::new(flag_value(&args, "--search").unwrap_or_default())
            .hide_completed(has("--hide-done"));
        print_agenda(&planner, &filter);
        Ok(())
    } else if has("--calendar") {
        print_calendar(&planner, flag_value(&args, "--month"));
        Ok(())
    } else if has("--notifications") {
        print_notifications(&planner);
        Ok(())
    } else if has("--watch") {
        watch(&mut planner, &config).await;
        Ok(())
    } else {
        print_today(&planner);
        Ok(())
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn add_task(
    planner: &mut Planner<FileStore>,
    args: &[String],
    title: &str,
) -> Result<(), PlannerError> {
    let today = dayslate::core::time::format_date(now().date());
    let date = flag_value(args, "--date").unwrap_or(&today);
    let hour = flag_value(args, "--at").unwrap_or_default();
    let mut draft = TaskDraft::new(title, date, hour);

    if let Some(name) = flag_value(args, "--category") {
        let category = planner
            .categories()
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .unwrap_or_else(|| {
                let style = CategoryStyle::default();
                dayslate::core::category::Category::new(name, style.icon, style.color)
            });
        draft = draft.with_category(category);
    }
    if let Some(color) = flag_value(args, "--color") {
        draft = draft.with_color(color);
    }
    planner.update(Message::AddTask(draft), now())
}

fn with_task<S, F>(planner: &mut Planner<S>, id: &str, make: F) -> Result<(), PlannerError>
where
    S: KeyValueStore + Clone,
    F: FnOnce(String, Uuid) -> Message,
{
    let found = Uuid::parse_str(id).ok().and_then(|id| {
        planner
            .groups()
            .iter()
            .find(|g| g.position(id).is_some())
            .map(|g| (g.date.clone(), id))
    });
    match found {
        Some((date, id)) => planner.update(make(date, id), now()),
        None => {
            eprintln!("no task with id {id}");
            Ok(())
        }
    }
}

fn print_task<S: KeyValueStore + Clone>(planner: &Planner<S>, task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    let style = planner.category_style(task);
    println!(
        "  [{mark}] {} {}  ({} {}) {}",
        task.hour, task.title, style.icon, task.category, task.id
    );
}

fn print_today<S: KeyValueStore + Clone>(planner: &Planner<S>) {
    if planner.landing() == Landing::Welcome {
        println!("Welcome! Set your name with --name <NAME> (up to 7 characters).\n");
    }
    let now = now();
    println!("{}", planner.header_title());
    let tasks = planner.today_tasks(now);
    if tasks.is_empty() {
        println!("  Nothing scheduled today.");
    }
    for task in &tasks {
        print_task(planner, task);
    }
    let due = planner.due_soon(now).len();
    if due > 0 {
        println!("\n{due} task(s) due within the hour");
    }
}

fn print_agenda<S: KeyValueStore + Clone>(planner: &Planner<S>, filter: &SearchFilter) {
    let now = now();
    let agenda = planner.agenda(now, filter);
    if !agenda.overdue.is_empty() {
        println!("Overdue ({})", agenda.overdue.len());
        for dated in &agenda.overdue {
            print!("  {}", dated.date);
            print_task(planner, &dated.task);
        }
        println!();
    }
    for group in &agenda.upcoming {
        println!("{} ({})", day_label(&group.date, now.date()), group.date);
        for task in &group.items {
            print_task(planner, task);
        }
    }
    if agenda.is_empty() {
        println!("No tasks.");
    }
}

fn print_calendar<S: KeyValueStore + Clone>(planner: &Planner<S>, month: Option<&str>) {
    let today = now().date();
    let start = month
        .and_then(|m| NaiveDate::parse_from_str(&format!("{m}-01"), "%Y-%m-%d").ok())
        .unwrap_or(today);
    let mut cursor = CalendarCursor::new(start);
    if start.month() != today.month() || start.year() != today.year() {
        cursor.selected_day = None;
    }
    let Some(grid) = planner.calendar(&cursor) else {
        return;
    };

    println!("{}", cursor.title());
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in grid.weeks() {
        let line: String = week
            .iter()
            .map(|cell| match cell {
                CalendarCell::Blank => "    ".to_string(),
                CalendarCell::Day(d) if d.tasks.is_empty() => format!("{:>3} ", d.day),
                CalendarCell::Day(d) => format!("{:>3}*", d.day),
            })
            .collect();
        println!("{}", line.trim_end());
    }
    for task in cursor.selected_tasks(planner.groups()) {
        print_task(planner, &task);
    }
}

fn print_categories<S: KeyValueStore + Clone>(planner: &Planner<S>) {
    for category in planner.categories() {
        println!("  {} {} {}", category.icon, category.name, category.color);
    }
}

/// Category and task color choices, each with the tint used behind badges.
fn print_palettes() {
    for (label, palette) in [
        ("Category colors", &CATEGORY_COLORS[..]),
        ("Task colors", &TASK_COLORS[..]),
    ] {
        println!("{label}");
        for hex in palette {
            if let Some(rgb) = Rgb::from_hex(hex) {
                println!("  {rgb}  {}", rgb.to_rgba(0.2));
            }
        }
    }
}

fn print_notifications<S: KeyValueStore + Clone>(planner: &Planner<S>) {
    let due = planner.due_later_today(now());
    if due.is_empty() {
        println!("No more tasks today.");
    }
    for dated in &due {
        print_task(planner, &dated.task);
    }
}

/// Re-read the store on every tick and report tasks entering the window.
async fn watch<S: KeyValueStore + Clone>(planner: &mut Planner<S>, config: &Config) {
    let mut timer = RefreshTimer::start(config.refresh_interval());
    loop {
        tokio::select! {
            alive = timer.tick() => {
                if !alive {
                    break;
                }
                planner.reload();
                let due = planner.due_soon(now());
                println!("[{}] {} task(s) due soon", now().format("%H:%M"), due.len());
                for dated in &due {
                    print_task(planner, &dated.task);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                timer.cancel();
                break;
            }
        }
    }
}
