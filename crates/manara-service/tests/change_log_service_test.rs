//! Service-level tests for the change-log listing, revert, and purge.

use chrono::{Duration, Utc};
use uuid::Uuid;

use manara_core::error::ErrorKind;
use manara_core::types::pagination::PageRequest;
use manara_core::types::{ModelType, Period};
use manara_entity::change_log::{ChangeLogFilter, ChangeState};
use manara_service::{ChangeLogStore, RequestContext};
use manara_service::testing::{TestServices, sample_snapshot};

fn ctx() -> RequestContext {
    RequestContext::new(Uuid::new_v4(), Uuid::new_v4())
}

/// Seed a record, record one change to it, and return the logged entry id.
async fn changed_record(app: &TestServices, ctx: &RequestContext, model_type: ModelType, id: i64) -> Uuid {
    let old = sample_snapshot(model_type, id);
    let field = model_type.tracked_fields()[0];
    let new = old.clone().field(field, "edited");
    app.repo(model_type).seed(new.clone()).await.unwrap();
    app.undo
        .capture_update(ctx, model_type, Some(id), &old, &new)
        .await
        .unwrap()
        .log_id
        .expect("logged")
}

#[tokio::test]
async fn test_revert_restores_old_data() {
    let app = TestServices::new();
    let ctx = ctx();
    let log_id = changed_record(&app, &ctx, ModelType::Certificate, 5).await;

    let outcome = app.change_logs.revert(&ctx, log_id).await.unwrap();

    assert_eq!(outcome.entry_id, log_id);
    assert_eq!(outcome.redirect_url, "/admin/certificates/5/edit");
    assert_eq!(
        app.repo(ModelType::Certificate).record(Some(5)).await,
        Some(sample_snapshot(ModelType::Certificate, 5))
    );
    assert!(
        app.undo
            .get_undo_meta(&ctx, ModelType::Certificate, Some(5))
            .await
            .unwrap()
            .is_none()
    );

    let view = app.change_logs.get(log_id).await.unwrap();
    assert_eq!(view.status, ChangeState::Reverted);
    assert_eq!(view.reverted_by, ctx.user_id);
}

#[tokio::test]
async fn test_second_revert_conflicts_and_keeps_first_values() {
    let app = TestServices::new();
    let first = ctx();
    let log_id = changed_record(&app, &first, ModelType::Product, 7).await;
    app.change_logs.revert(&first, log_id).await.unwrap();
    let after_first = app.change_logs.get(log_id).await.unwrap();

    let err = app.change_logs.revert(&ctx(), log_id).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains("already reverted"));
    let after_second = app.change_logs.get(log_id).await.unwrap();
    assert_eq!(after_second.reverted_at, after_first.reverted_at);
    assert_eq!(after_second.reverted_by, first.user_id);
}

#[tokio::test]
async fn test_revert_claimed_elsewhere_leaves_record_untouched() {
    let app = TestServices::new();
    let ctx = ctx();
    let log_id = changed_record(&app, &ctx, ModelType::Career, 3).await;
    let edited = app.repo(ModelType::Career).record(Some(3)).await;
    let other = Some(Uuid::new_v4());
    assert!(app.log.mark_reverted(log_id, other).await.unwrap());

    let err = app.change_logs.revert(&ctx, log_id).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(app.repo(ModelType::Career).record(Some(3)).await, edited);
    assert_eq!(app.change_logs.get(log_id).await.unwrap().reverted_by, other);
}

#[tokio::test]
async fn test_failed_restore_releases_revert_mark() {
    let app = TestServices::new();
    let ctx = ctx();
    let log_id = changed_record(&app, &ctx, ModelType::Product, 9).await;
    app.repo(ModelType::Product).fail_writes(true);

    let err = app.change_logs.revert(&ctx, log_id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Database);
    let view = app.change_logs.get(log_id).await.unwrap();
    assert_eq!(view.status, ChangeState::Active);
    assert!(view.reverted_at.is_none());

    app.repo(ModelType::Product).fail_writes(false);
    app.change_logs.revert(&ctx, log_id).await.unwrap();
    assert_eq!(
        app.repo(ModelType::Product).record(Some(9)).await,
        Some(sample_snapshot(ModelType::Product, 9))
    );
}

#[tokio::test]
async fn test_revert_of_deleted_record_recreates_it() {
    let app = TestServices::new();
    let ctx = ctx();
    let media = sample_snapshot(ModelType::Media, 11);
    app.repo(ModelType::Media).seed(media.clone()).await.unwrap();
    app.mutations
        .delete(&ctx, ModelType::Media, Some(11))
        .await
        .unwrap();
    let log_id = app.log.entries().await[0].id;

    let outcome = app.change_logs.revert(&ctx, log_id).await.unwrap();

    assert_eq!(outcome.redirect_url, "/admin/media");
    assert_eq!(app.repo(ModelType::Media).record(Some(11)).await, Some(media));
}

#[tokio::test]
async fn test_revert_unknown_type_is_reported() {
    let app = TestServices::build(false, |r| r.without_handler(ModelType::SiteContent));
    let ctx = ctx();
    let log_id = changed_record(&app, &ctx, ModelType::SiteContent, 2).await;

    let err = app.change_logs.revert(&ctx, log_id).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::UnknownModelType);
    let view = app.change_logs.get(log_id).await.unwrap();
    assert_eq!(view.status, ChangeState::Active);
}

#[tokio::test]
async fn test_revert_missing_entry_is_not_found() {
    let app = TestServices::new();
    let err = app
        .change_logs
        .revert(&ctx(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_list_filters_and_orders_newest_first() {
    let app = TestServices::new();
    let alice = ctx();
    let bob = ctx();
    let p1 = changed_record(&app, &alice, ModelType::Product, 1).await;
    let c1 = changed_record(&app, &bob, ModelType::Career, 1).await;
    let p2 = changed_record(&app, &bob, ModelType::Product, 2).await;
    app.change_logs.revert(&bob, p2).await.unwrap();

    let all = app
        .change_logs
        .list(&ChangeLogFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    let ids: Vec<Uuid> = all.items.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![p2, c1, p1]);

    let products = ChangeLogFilter {
        model_type: Some(ModelType::Product),
        ..Default::default()
    };
    let page = app.change_logs.list(&products, &PageRequest::default()).await.unwrap();
    assert_eq!(page.total_items, 2);

    let by_bob_active = ChangeLogFilter {
        changed_by: bob.user_id,
        state: Some(ChangeState::Active),
        ..Default::default()
    };
    let page = app
        .change_logs
        .list(&by_bob_active, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, c1);

    let one_record = ChangeLogFilter {
        model_type: Some(ModelType::Product),
        model_id: Some(1),
        ..Default::default()
    };
    let page = app.change_logs.list(&one_record, &PageRequest::default()).await.unwrap();
    assert_eq!(page.items[0].id, p1);
    assert_eq!(page.items[0].changes.len(), 1);
}

#[tokio::test]
async fn test_list_period_and_pagination() {
    let app = TestServices::new();
    let ctx = ctx();
    let old = changed_record(&app, &ctx, ModelType::Product, 1).await;
    for id in 2..=4 {
        changed_record(&app, &ctx, ModelType::Product, id).await;
    }
    app.log.backdate(old, Utc::now() - Duration::days(10)).await;

    let week = ChangeLogFilter {
        period: Some(Period::Week),
        ..Default::default()
    };
    let page = app.change_logs.list(&week, &PageRequest::new(1, 2)).await.unwrap();
    assert_eq!(page.total_items, 3);
    assert_eq!(page.items.len(), 2);
    assert!(page.has_next);

    let month = ChangeLogFilter {
        period: Some(Period::Month),
        ..Default::default()
    };
    let page = app.change_logs.list(&month, &PageRequest::default()).await.unwrap();
    assert_eq!(page.total_items, 4);
}

#[tokio::test]
async fn test_delete_and_purge() {
    let app = TestServices::new();
    let ctx = ctx();
    let stale = changed_record(&app, &ctx, ModelType::Career, 1).await;
    let reverted = changed_record(&app, &ctx, ModelType::Career, 2).await;
    let fresh = changed_record(&app, &ctx, ModelType::Career, 3).await;
    app.change_logs.revert(&ctx, reverted).await.unwrap();
    app.log.backdate(stale, Utc::now() - Duration::days(400)).await;

    app.change_logs.delete(reverted).await.unwrap();
    assert_eq!(
        app.change_logs.delete(reverted).await.unwrap_err().kind,
        ErrorKind::NotFound
    );

    assert_eq!(app.change_logs.purge_older_than(365).await.unwrap(), 1);
    let remaining: Vec<Uuid> = app.log.entries().await.iter().map(|e| e.id).collect();
    assert_eq!(remaining, vec![fresh]);

    assert_eq!(
        app.change_logs.purge_older_than(0).await.unwrap_err().kind,
        ErrorKind::Validation
    );
}

#[tokio::test]
async fn test_get_delete_entry_has_no_changes() {
    let app = TestServices::new();
    let ctx = ctx();
    app.repo(ModelType::Application)
        .seed(sample_snapshot(ModelType::Application, 9))
        .await
        .unwrap();
    app.mutations
        .delete(&ctx, ModelType::Application, Some(9))
        .await
        .unwrap();
    let id = app.log.entries().await[0].id;

    let view = app.change_logs.get(id).await.unwrap();
    assert!(view.changes.is_empty());
    assert!(view.new_data.is_none());
    assert_eq!(view.field_count, ModelType::Application.tracked_fields().len());
    assert_eq!(view.model_label, "Job Application");
    assert_eq!(view.old_data, sample_snapshot(ModelType::Application, 9));
}
