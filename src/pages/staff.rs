use super::{PageOutcome, PageService, load_failed};
use crate::models::staff::entities::{Instructor, Teacher};
use crate::models::staff::responses::{InstructorsView, TeachersView};
use crate::query::Freshness;
use crate::session::Session;

pub const INSTRUCTORS_PATH: &str = "/instructors";
pub const TEACHERS_PATH: &str = "/teachers";

pub async fn instructors(service: &PageService, session: &Session) -> PageOutcome<InstructorsView> {
    let (instructors, notification) = match service
        .query()
        .fetch_as::<Vec<Instructor>>(session, INSTRUCTORS_PATH, Freshness::Standard)
        .await
    {
        Ok(list) => (list, None),
        Err(err) => (Vec::new(), Some(load_failed("instructors", &err))),
    };

    PageOutcome::Ready(InstructorsView {
        total: instructors.len(),
        instructors,
        notification,
    })
}

pub async fn teachers(service: &PageService, session: &Session) -> PageOutcome<TeachersView> {
    let (teachers, notification) = match service
        .query()
        .fetch_as::<Vec<Teacher>>(session, TEACHERS_PATH, Freshness::Standard)
        .await
    {
        Ok(list) => (list, None),
        Err(err) => (Vec::new(), Some(load_failed("teachers", &err))),
    };

    PageOutcome::Ready(TeachersView {
        total: teachers.len(),
        teachers,
        notification,
    })
}
