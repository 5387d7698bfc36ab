use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use timetable::{
    Lesson, Schedule, ScheduleConfig, ScheduleQuery, SystemClock, When, load_config_from_json,
    logging, save_lessons_to_csv, save_lessons_to_json,
};

/// Interactive timetable lookup.
#[derive(Parser)]
#[command(name = "cli", version, about = "Look up lessons by day or week")]
struct Cli {
    /// JSON schedule config; the built-in term is used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn render_lessons_as_text_table(lessons: &[Lesson], with_date: bool) -> String {
    let mut headers = vec!["Time", "Subject", "Teacher", "Room"];
    if with_date {
        headers.insert(0, "Date");
    }
    let rows: Vec<Vec<String>> = lessons
        .iter()
        .map(|lesson| {
            let mut row = vec![
                lesson.time_span(),
                lesson.subject.clone(),
                lesson.teacher.clone(),
                lesson.room.clone(),
            ];
            if with_date {
                row.insert(0, lesson.date_key());
            }
            row
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let push_row = |out: &mut String, cells: &[&str]| {
        out.push('|');
        for (ci, cell) in cells.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            let pad = widths[ci].saturating_sub(cell.chars().count());
            out.push_str(&" ".repeat(pad));
            out.push_str(" |");
        }
        out.push('\n');
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &headers);
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_row(&mut out, &cells);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_lessons(title: &str, lessons: &[Lesson], with_date: bool) {
    println!("{title}");
    if lessons.is_empty() {
        println!("No lessons.");
    } else {
        print!("{}", render_lessons_as_text_table(lessons, with_date));
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  today                              Lessons for today\n  tomorrow                           Lessons for tomorrow\n  date <YYYY-MM-DD>                  Lessons on a date\n  week <n>                           Lessons in a labelled week\n  all                                Every lesson of the term\n  config show                        Show the schedule config summary\n  export <json|csv> <path>           Write every lesson to disk\n  quit|exit                          Exit"
    );
}

fn print_config(config: &ScheduleConfig) {
    let excluded = config
        .excluded_dates
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let offset = config
        .utc_offset()
        .map(|o| o.to_string())
        .unwrap_or_else(|| "local".to_string());
    println!("Term               : {}", config.term_name.as_deref().unwrap_or("-"));
    println!("Anchor Monday      : {}", config.anchor_monday);
    println!("Anchor week        : {}", config.anchor_week_number);
    println!("Weekly rules       : {}", config.rules.len());
    println!("Excluded dates     : {}", excluded);
    println!("UTC offset         : {}", offset);
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match cli.config.as_deref().map(load_config_from_json) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
        None => ScheduleConfig::default(),
    };
    let schedule = Schedule::new(config);
    let clock = SystemClock::for_config(schedule.config());
    let query = ScheduleQuery::new(&schedule, clock);

    println!("Timetable (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "today" | "tomorrow" => {
                let when = When::parse(cmd);
                let day = query.resolve(&when);
                print_lessons(&format!("Schedule {when} ({})", day.date), &day.lessons, false);
            }
            "date" => match parts.next() {
                Some(date) => {
                    let day = query.resolve(&When::Date(date.to_string()));
                    print_lessons(&format!("Schedule {date} ({})", day.date), &day.lessons, false);
                }
                None => println!("Usage: date <YYYY-MM-DD>"),
            },
            "week" => match parts.next().map(str::parse::<u32>) {
                Some(Ok(week)) => {
                    print_lessons(&format!("Week {week}"), schedule.lessons_in_week(week), true);
                }
                Some(Err(_)) => println!("Invalid week number"),
                None => println!("Usage: week <n>"),
            },
            "all" => print_lessons("All lessons", schedule.lessons(), true),
            "config" => match parts.next() {
                Some("show") => print_config(schedule.config()),
                _ => println!("Usage: config show"),
            },
            "export" => {
                let format = parts.next();
                let path = parts.next();
                let (Some(format), Some(path)) = (format, path) else {
                    println!("Usage: export <json|csv> <path>");
                    continue;
                };
                let result = match format {
                    "json" => save_lessons_to_json(schedule.lessons(), path),
                    "csv" => save_lessons_to_csv(schedule.lessons(), path),
                    _ => {
                        println!("Unknown export format '{format}' (expected json or csv)");
                        continue;
                    }
                };
                match result {
                    Ok(()) => println!("Exported {} lessons to {path}", schedule.len()),
                    Err(e) => println!("Export error: {e}"),
                }
            }
            _ => println!("Unknown command '{cmd}'. Type 'help' for commands."),
        }
    }
}
