use super::{PageOutcome, PageService, load_failed};
use crate::models::classes::entities::ClassSummary;
use crate::models::classes::responses::{ClassCard, ClassStats, ClassesView};
use crate::query::Freshness;
use crate::session::Session;
use crate::view_state::PageKind;

pub const CLASSES_SUMMARY_PATH: &str = "/classes/summary";

pub async fn classes(service: &PageService, session: &Session) -> PageOutcome<ClassesView> {
    let (classes, notification) = match service
        .query()
        .fetch_as::<Vec<ClassSummary>>(session, CLASSES_SUMMARY_PATH, Freshness::Standard)
        .await
    {
        Ok(classes) => (classes, None),
        Err(err) => (Vec::new(), Some(load_failed("classes", &err))),
    };

    // 统计基于完整列表
    let stats = ClassStats::from_classes(&classes);

    let (cards, state) = service
        .ui_state()
        .read(session, PageKind::Classes, |state| {
            let cards: Vec<ClassCard> = classes
                .into_iter()
                .map(|class| ClassCard {
                    expanded: state.expanded.contains(&class.id),
                    class,
                })
                .collect();
            (cards, state.snapshot())
        })
        .await;

    PageOutcome::Ready(ClassesView {
        classes: cards,
        stats,
        state,
        notification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApiClient;
    use crate::models::EntityId;
    use crate::pages::testing::{service, session};
    use crate::view_state::PageIntent;
    use serde_json::json;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_classes_view_marks_expanded_cards() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_get(
            CLASSES_SUMMARY_PATH,
            json!([
                { "id": 1, "title": "Algebra", "students": 12, "duration": 45, "status": "active" },
                { "id": 2, "title": "Physics", "students": 8, "duration": 60, "status": "inactive" },
            ]),
        );
        let service = service(&mock);
        let session = session();
        service
            .ui_state()
            .dispatch(
                &session,
                PageKind::Classes,
                PageIntent::ToggleExpanded {
                    id: EntityId::from(2),
                },
            )
            .await;

        let view = classes(&service, &session).await.ready().unwrap();
        assert_eq!(view.stats.total_classes, 2);
        assert_eq!(view.stats.total_students, 20);
        assert_eq!(view.stats.active_classes, 1);
        assert!(!view.classes[0].expanded);
        assert!(view.classes[1].expanded);
        assert_eq!(view.state.expanded, vec![EntityId::from(2)]);
    }

    #[actix_web::test]
    async fn test_classes_failure_falls_back_to_zero_stats() {
        let mock = Arc::new(MockApiClient::new());
        mock.fail_get(CLASSES_SUMMARY_PATH, 502);

        let view = classes(&service(&mock), &session()).await.ready().unwrap();
        assert!(view.classes.is_empty());
        assert_eq!(view.stats, ClassStats::default());
        assert!(view.notification.unwrap().is_error());
    }
}
