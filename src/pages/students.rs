use tracing::info;

use super::{PageOutcome, PageService, load_failed};
use crate::models::students::entities::StudentSummary;
use crate::models::students::responses::{StudentRow, StudentStats, StudentsView};
use crate::query::Freshness;
use crate::session::Session;
use crate::view_state::{PageKind, filter_by_search};

pub const STUDENTS_SUMMARY_PATH: &str = "/students/summary";

/// 学生页
///
/// 凭证被拒绝 (401/403) 时跳转到会话过期页；其它失败显示空列表和错误提示。
pub async fn students(service: &PageService, session: &Session) -> PageOutcome<StudentsView> {
    let (students, notification) = match service
        .query()
        .fetch_as::<Vec<StudentSummary>>(session, STUDENTS_SUMMARY_PATH, Freshness::Standard)
        .await
    {
        Ok(students) => (students, None),
        Err(err) if err.is_unauthorized() => {
            info!("Students summary rejected credential: {}", err);
            return PageOutcome::Redirect {
                location: service.session_config().session_expired_path.clone(),
            };
        }
        Err(err) => (Vec::new(), Some(load_failed("students", &err))),
    };

    let stats = StudentStats::from_students(&students);

    let (rows, state) = service
        .ui_state()
        .read(session, PageKind::Students, |state| {
            let rows: Vec<StudentRow> = filter_by_search(&students, &state.search)
                .into_iter()
                .map(|student| StudentRow {
                    selected: state.selected.contains(&student.id),
                    student,
                })
                .collect();
            (rows, state.snapshot())
        })
        .await;

    PageOutcome::Ready(StudentsView {
        students: rows,
        stats,
        state,
        notification,
    })
}
