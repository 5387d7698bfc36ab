use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::TimetableResult;
use crate::lesson::{Lesson, TIME_FORMAT};

#[derive(Serialize)]
struct LessonCsvRecord<'a> {
    date: String,
    start: String,
    end: String,
    subject: &'a str,
    teacher: &'a str,
    room: &'a str,
}

impl<'a> From<&'a Lesson> for LessonCsvRecord<'a> {
    fn from(lesson: &'a Lesson) -> Self {
        Self {
            date: lesson.date_key(),
            start: lesson.start.format(TIME_FORMAT).to_string(),
            end: lesson.end.format(TIME_FORMAT).to_string(),
            subject: &lesson.subject,
            teacher: &lesson.teacher,
            room: &lesson.room,
        }
    }
}

/// Writes a header row followed by one row per lesson.
pub fn write_lessons_csv<W: Write>(lessons: &[Lesson], writer: W) -> TimetableResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    if lessons.is_empty() {
        writer.write_record(["date", "start", "end", "subject", "teacher", "room"])?;
    }
    for lesson in lessons {
        writer.serialize(LessonCsvRecord::from(lesson))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_lessons_to_csv<P: AsRef<Path>>(lessons: &[Lesson], path: P) -> TimetableResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_lessons_csv(lessons, file)?;
    info!(path = %path.display(), lessons = lessons.len(), "exported lessons to csv");
    Ok(())
}

pub fn save_lessons_to_json<P: AsRef<Path>>(lessons: &[Lesson], path: P) -> TimetableResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, lessons)?;
    info!(path = %path.display(), lessons = lessons.len(), "exported lessons to json");
    Ok(())
}
