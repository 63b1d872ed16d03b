use chrono::{DateTime, TimeZone, Utc};
use migtrack_core::{
    ActivityKind, CommentId, InMemoryTrackerRepository, NewComment, TaskId, TaskService,
    TaskServiceError,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
}

fn service() -> TaskService<InMemoryTrackerRepository> {
    TaskService::new(InMemoryTrackerRepository::seeded().unwrap())
}

fn say(author: &str, content: &str) -> NewComment {
    NewComment {
        author: author.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn posted_comment_joins_the_task_thread_list() {
    let mut service = service();
    let t2 = TaskId::new("t2");
    let comment = service
        .post_comment(&t2, say("Ana Martínez", "  ¿Falta el componente de cache?  "), now())
        .unwrap();
    assert_eq!(comment.content, "¿Falta el componente de cache?");
    assert_eq!(comment.created_at, now());

    let threads = service.comments(&t2).unwrap();
    let ids: Vec<&str> = threads.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", comment.id.as_str()]);
    assert!(service.comments(&TaskId::new("t4")).unwrap().is_empty());
}

#[test]
fn blank_comment_changes_nothing() {
    let mut service = service();
    let t2 = TaskId::new("t2");
    let err = service.post_comment(&t2, say("Ana", "   "), now()).unwrap_err();
    assert!(matches!(err, TaskServiceError::InvalidComment(_)));
    assert_eq!(service.comments(&t2).unwrap().len(), 1);
    assert_eq!(service.activity(None).unwrap().len(), 2);
}

#[test]
fn comment_on_unknown_task_is_rejected() {
    let mut service = service();
    let err = service
        .post_comment(&TaskId::new("t99"), say("Ana", "hola"), now())
        .unwrap_err();
    assert!(matches!(err, TaskServiceError::TaskNotFound(id) if id == TaskId::new("t99")));
}

#[test]
fn replies_append_to_the_top_level_thread() {
    let mut service = service();
    let thread = service
        .reply_to_comment(&CommentId::new("c1"), say("Luis", "De acuerdo"), now())
        .unwrap();
    assert_eq!(thread.id.as_str(), "c1");
    assert_eq!(thread.replies.len(), 2);
    assert_eq!(thread.replies[1].author, "Luis");
    assert!(thread.replies[1].replies.is_empty());

    let thread = service
        .reply_to_comment(&CommentId::new("c1-1"), say("Carlos Ruiz", "Gracias"), now())
        .unwrap();
    assert_eq!(thread.id.as_str(), "c1");
    assert_eq!(thread.replies.len(), 3);

    let err = service
        .reply_to_comment(&CommentId::new("nope"), say("Luis", "?"), now())
        .unwrap_err();
    assert!(matches!(err, TaskServiceError::CommentNotFound(_)));
}

#[test]
fn likes_accumulate_per_comment() {
    let mut service = service();
    let c1 = CommentId::new("c1");
    assert_eq!(service.like_comment(&c1).unwrap(), 4);
    assert_eq!(service.like_comment(&c1).unwrap(), 5);
    assert_eq!(service.like_comment(&CommentId::new("c1-1")).unwrap(), 2);

    let thread = &service.comments(&TaskId::new("t2")).unwrap()[0];
    assert_eq!(thread.likes, 5);
    assert_eq!(thread.replies[0].likes, 2);
}

#[test]
fn activity_feed_is_newest_first_and_filterable() {
    let mut service = service();
    let later = now() + chrono::Duration::hours(1);
    service
        .post_comment(&TaskId::new("t6"), say("Ana", "Listo para QA"), now())
        .unwrap();
    service
        .reply_to_comment(&CommentId::new("c1"), say("Luis", "Ok"), later)
        .unwrap();

    let feed = service.activity(None).unwrap();
    let kinds: Vec<(ActivityKind, &str)> = feed
        .iter()
        .map(|entry| (entry.kind, entry.task_id.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ActivityKind::Comment, "t2"),
            (ActivityKind::Comment, "t6"),
            (ActivityKind::Comment, "t2"),
            (ActivityKind::Blocker, "t3"),
        ]
    );

    let t6_only = service.activity(Some(&TaskId::new("t6"))).unwrap();
    assert_eq!(t6_only.len(), 1);
    assert_eq!(t6_only[0].actor, "Ana");
    assert_eq!(t6_only[0].action, "commented on");
}
