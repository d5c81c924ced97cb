use tracing::debug;

use super::{PageOutcome, PageService, load_failed};
use crate::models::classes::entities::ClassRecord;
use crate::models::schedule::entities::ScheduleEvent;
use crate::models::schedule::responses::ScheduleView;
use crate::models::students::entities::StudentRecord;
use crate::query::Freshness;
use crate::session::Session;

pub const CLASSES_PATH: &str = "/classes";
pub const STUDENTS_PATH: &str = "/students";

/// 日程页：班级按日期排入日历，同时给出排课弹窗的候选项
pub async fn schedule(service: &PageService, session: &Session) -> PageOutcome<ScheduleView> {
    let query = service.query();
    let (classes, students) = tokio::join!(
        query.fetch_as::<Vec<ClassRecord>>(session, CLASSES_PATH, Freshness::Standard),
        query.fetch_as::<Vec<StudentRecord>>(session, STUDENTS_PATH, Freshness::Standard),
    );

    let (classes, notification) = match classes {
        Ok(classes) => (classes, None),
        Err(err) => (Vec::new(), Some(load_failed("schedule", &err))),
    };
    let student_options = students.unwrap_or_default();

    let events: Vec<ScheduleEvent> = classes.iter().filter_map(ScheduleEvent::from_class).collect();
    if events.len() < classes.len() {
        debug!(
            "Skipped {} classes without a usable date",
            classes.len() - events.len()
        );
    }

    PageOutcome::Ready(ScheduleView {
        events,
        class_options: classes,
        student_options,
        notification,
    })
}
