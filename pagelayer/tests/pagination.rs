//! End-to-end pagination behavior against the in-memory source.

use bson::{Bson, DateTime, doc};
use chrono::{TimeZone, Utc};
use pagelayer::{
    memory::InMemorySource,
    prelude::*,
};

async fn seeded(count: i64) -> InMemorySource {
    let source = InMemorySource::new();
    source
        .insert(
            "events",
            (1..=count)
                .map(|id| Bson::Document(doc! { "_id": id, "kind": "login" }))
                .collect(),
        )
        .await
        .unwrap();

    source
}

fn ids(page: &Page<Bson>) -> Vec<i64> {
    page.items
        .iter()
        .map(|record| record.as_document().unwrap().get_i64("_id").unwrap())
        .collect()
}

#[tokio::test]
async fn cursor_first_page_serves_head_of_sequence() {
    let source = seeded(10).await;
    let paginator = Paginator::default();

    let request = PageRequest::from(CursorPage::new(3).unwrap());
    let page = paginator
        .paginate(&source, "events", None, &request, SortDirection::Asc)
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![1, 2, 3]);
    assert!(page.has_next());
    // A first page has nothing before it.
    assert!(!page.has_prev());
    assert!(page.total.is_none());
}

#[tokio::test]
async fn cursor_walk_covers_sequence_without_overlap() {
    let source = seeded(10).await;
    let paginator = Paginator::default();

    let mut seen = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let mut request = CursorPage::new(3).unwrap();
        if let Some(token) = after.take() {
            request = request.after(token).unwrap();
        }

        let page = paginator
            .paginate(
                &source,
                "events",
                None,
                &PageRequest::from(request),
                SortDirection::Asc,
            )
            .await
            .unwrap();
        seen.extend(ids(&page));

        match page.next_token {
            Some(token) => after = Some(token),
            None => break,
        }
    }

    assert_eq!(seen, (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn cursor_prev_token_returns_to_previous_page() {
    let source = seeded(10).await;
    let paginator = Paginator::default();

    let first = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(CursorPage::new(3).unwrap()),
            SortDirection::Asc,
        )
        .await
        .unwrap();

    let second = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(
                CursorPage::new(3)
                    .unwrap()
                    .after(first.next_token.clone().unwrap())
                    .unwrap(),
            ),
            SortDirection::Asc,
        )
        .await
        .unwrap();
    assert_eq!(ids(&second), vec![4, 5, 6]);
    assert!(second.has_prev());

    let back = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(
                CursorPage::new(3)
                    .unwrap()
                    .before(second.prev_token.unwrap())
                    .unwrap(),
            ),
            SortDirection::Asc,
        )
        .await
        .unwrap();

    // Backward pages render in canonical order.
    assert_eq!(ids(&back), vec![1, 2, 3]);
    // Nothing earlier than the head of the sequence.
    assert!(!back.has_prev());
    assert!(back.has_next());
}

#[tokio::test]
async fn cursor_paging_respects_descending_direction() {
    let source = seeded(10).await;
    let paginator = Paginator::default();

    let first = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(CursorPage::new(3).unwrap()),
            SortDirection::Desc,
        )
        .await
        .unwrap();
    assert_eq!(ids(&first), vec![10, 9, 8]);

    let second = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(
                CursorPage::new(3)
                    .unwrap()
                    .after(first.next_token.unwrap())
                    .unwrap(),
            ),
            SortDirection::Desc,
        )
        .await
        .unwrap();
    assert_eq!(ids(&second), vec![7, 6, 5]);
}

#[tokio::test]
async fn cursor_respects_base_filter() {
    let source = seeded(10).await;
    source
        .insert(
            "events",
            vec![Bson::Document(doc! { "_id": 11_i64, "kind": "logout" })],
        )
        .await
        .unwrap();
    let paginator = Paginator::default();

    let page = paginator
        .paginate(
            &source,
            "events",
            Some(Filter::eq("kind", "logout")),
            &PageRequest::from(CursorPage::new(5).unwrap()),
            SortDirection::Asc,
        )
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![11]);
    assert!(!page.has_next());
}

#[tokio::test]
async fn offset_pages_are_exact_windows() {
    let source = seeded(12).await;
    let paginator = Paginator::default();

    let page = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(OffsetPage::new(2, 5).unwrap()),
            SortDirection::Asc,
        )
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![6, 7, 8, 9, 10]);
    assert!(page.has_next());
    assert!(page.has_prev());

    // The next token reconstructs the third (last, partial) page.
    let third = OffsetPage::from_token(&page.next_token.unwrap(), 5).unwrap();
    assert_eq!(third.page_number(), 3);
    let page = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(third),
            SortDirection::Asc,
        )
        .await
        .unwrap();
    assert_eq!(ids(&page), vec![11, 12]);
    assert!(!page.has_next());
}

#[tokio::test]
async fn empty_collection_yields_empty_page() {
    let source = InMemorySource::new();
    let paginator = Paginator::default();

    let page = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(CursorPage::new(5).unwrap()),
            SortDirection::Asc,
        )
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert!(!page.has_next());
    assert!(!page.has_prev());
}

#[tokio::test]
async fn undersized_result_has_no_continuation() {
    let source = seeded(2).await;
    let paginator = Paginator::default();

    let page = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(CursorPage::new(5).unwrap()),
            SortDirection::Asc,
        )
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![1, 2]);
    assert!(!page.has_next());
}

#[tokio::test]
async fn tokens_from_another_strategy_are_rejected() {
    let source = seeded(10).await;
    let paginator = Paginator::default();

    let cursor_page = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(CursorPage::new(3).unwrap()),
            SortDirection::Asc,
        )
        .await
        .unwrap();
    let cursor_token = cursor_page.next_token.unwrap();

    // A cursor token cannot resume time pagination.
    let err = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(
                TimePage::new("_id", 3)
                    .unwrap()
                    .after(cursor_token.clone())
                    .unwrap(),
            ),
            SortDirection::Asc,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PaginationError::InvalidToken(_)));

    // Nor can it reconstruct an offset request.
    assert!(matches!(
        OffsetPage::from_token(&cursor_token, 3),
        Err(PaginationError::InvalidToken(_))
    ));
}

#[tokio::test]
async fn time_token_bound_to_its_sort_field() {
    let source = seeded(10).await;
    let paginator = Paginator::default();

    let page = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(TimePage::new("_id", 3).unwrap()),
            SortDirection::Asc,
        )
        .await
        .unwrap();

    let err = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(
                TimePage::new("kind", 3)
                    .unwrap()
                    .after(page.next_token.unwrap())
                    .unwrap(),
            ),
            SortDirection::Asc,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PaginationError::InvalidToken(_)));
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let source = seeded(3).await;
    let paginator = Paginator::default();

    let err = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(
                CursorPage::new(3).unwrap().after("not a token").unwrap(),
            ),
            SortDirection::Asc,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PaginationError::InvalidToken(_)));
}

#[tokio::test]
async fn total_is_present_only_when_requested() {
    let source = seeded(12).await;
    let paginator = Paginator::default();
    let request = PageRequest::from(CursorPage::new(3).unwrap());

    let plain = paginator
        .paginate(&source, "events", None, &request, SortDirection::Asc)
        .await
        .unwrap();
    assert!(plain.total.is_none());

    // The total covers the whole filtered set, independent of the window.
    let counted = paginator
        .paginate_with_total(&source, "events", None, &request, SortDirection::Asc)
        .await
        .unwrap();
    assert_eq!(counted.total, Some(12));
    assert_eq!(counted.items.len(), 3);
}

#[tokio::test]
async fn count_delegates_filter_to_source() {
    let source = seeded(12).await;
    let paginator = Paginator::default();

    assert_eq!(paginator.count(&source, "events", None).await.unwrap(), 12);
    assert_eq!(
        paginator
            .count(&source, "events", Some(Filter::lte("_id", 4_i64)))
            .await
            .unwrap(),
        4
    );
}

#[tokio::test]
async fn time_pagination_survives_duplicate_timestamps() {
    let source = InMemorySource::new();
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    // Three records per timestamp; only the compound tie breaker keeps
    // page boundaries from skipping or repeating records.
    let mut records = Vec::new();
    for id in 1..=9_i64 {
        let ts = DateTime::from_chrono(base + chrono::Duration::minutes((id - 1) / 3));
        records.push(Bson::Document(doc! { "_id": id, "created_at": ts }));
    }
    source.insert("events", records).await.unwrap();

    let paginator = Paginator::default();
    let mut seen = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let mut request = TimePage::new("created_at", 2).unwrap();
        if let Some(token) = after.take() {
            request = request.after(token).unwrap();
        }

        let page = paginator
            .paginate(
                &source,
                "events",
                None,
                &PageRequest::from(request),
                SortDirection::Asc,
            )
            .await
            .unwrap();
        seen.extend(ids(&page));

        match page.next_token {
            Some(token) => after = Some(token),
            None => break,
        }
    }

    assert_eq!(seen, (1..=9).collect::<Vec<_>>());
}

#[tokio::test]
async fn time_prev_token_returns_to_previous_page() {
    let source = InMemorySource::new();
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    source
        .insert(
            "events",
            (1..=6_i64)
                .map(|id| {
                    let ts = DateTime::from_chrono(base + chrono::Duration::minutes(id));
                    Bson::Document(doc! { "_id": id, "created_at": ts })
                })
                .collect(),
        )
        .await
        .unwrap();

    let paginator = Paginator::default();
    let first = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(TimePage::new("created_at", 2).unwrap()),
            SortDirection::Asc,
        )
        .await
        .unwrap();
    assert_eq!(ids(&first), vec![1, 2]);

    let second = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(
                TimePage::new("created_at", 2)
                    .unwrap()
                    .after(first.next_token.unwrap())
                    .unwrap(),
            ),
            SortDirection::Asc,
        )
        .await
        .unwrap();
    assert_eq!(ids(&second), vec![3, 4]);

    let back = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(
                TimePage::new("created_at", 2)
                    .unwrap()
                    .before(second.prev_token.unwrap())
                    .unwrap(),
            ),
            SortDirection::Asc,
        )
        .await
        .unwrap();
    assert_eq!(ids(&back), vec![1, 2]);
}

#[tokio::test]
async fn pages_decode_into_typed_records() {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Event {
        #[serde(rename = "_id")]
        id: i64,
        kind: String,
    }

    let source = seeded(3).await;
    let paginator = Paginator::default();

    let page = paginator
        .paginate(
            &source,
            "events",
            None,
            &PageRequest::from(CursorPage::new(2).unwrap()),
            SortDirection::Asc,
        )
        .await
        .unwrap();

    let typed = page.decode::<Event>().unwrap();
    assert_eq!(typed.items[0], Event { id: 1, kind: "login".to_string() });
    assert!(typed.has_next());
}
