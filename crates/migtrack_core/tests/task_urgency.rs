use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use migtrack_core::{
    compute_urgency, compute_urgency_within, PhasePlan, Phase, Task, TaskId, TaskPriority,
    TaskStatus, UrgencyStatus,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
}

fn task(status: TaskStatus, planned_end: NaiveDate) -> Task {
    Task {
        id: TaskId::new("t-test"),
        title: "Revisión de seguridad".to_string(),
        description: String::new(),
        status,
        priority: TaskPriority::High,
        assigned_entity: "EPAM Neoris".to_string(),
        is_deliverable: true,
        is_blocker: false,
        planned_end_date: planned_end,
        responsible_person: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn blocked_status_wins_regardless_of_dates() {
    for planned in [date(2024, 1, 1), date(2025, 1, 16), date(2030, 1, 1)] {
        assert_eq!(
            compute_urgency(&task(TaskStatus::Blocked, planned), now()),
            UrgencyStatus::Blocked
        );
    }
}

#[test]
fn done_status_wins_regardless_of_dates() {
    assert_eq!(
        compute_urgency(&task(TaskStatus::Done, date(2024, 1, 1)), now()),
        UrgencyStatus::Done
    );
}

#[test]
fn open_tasks_follow_deadline_distance() {
    let cases = [
        (date(2025, 1, 10), UrgencyStatus::Overdue),
        (date(2025, 1, 15), UrgencyStatus::Overdue),
        (date(2025, 1, 16), UrgencyStatus::Risk),
        (date(2025, 1, 22), UrgencyStatus::Risk),
        (date(2025, 1, 23), UrgencyStatus::OnTrack),
        (date(2025, 2, 1), UrgencyStatus::OnTrack),
    ];
    for (planned, expected) in cases {
        for status in [TaskStatus::Pending, TaskStatus::InProgress] {
            assert_eq!(
                compute_urgency(&task(status, planned), now()),
                expected,
                "planned={planned} status={status}"
            );
        }
    }
}

#[test]
fn custom_risk_window_is_respected() {
    let value = task(TaskStatus::Pending, date(2025, 1, 25));
    assert_eq!(compute_urgency_within(&value, now(), 7), UrgencyStatus::OnTrack);
    assert_eq!(compute_urgency_within(&value, now(), 10), UrgencyStatus::Risk);
    assert_eq!(compute_urgency_within(&value, now(), 0), UrgencyStatus::OnTrack);
}

#[test]
fn urgency_is_a_pure_function_of_inputs() {
    let value = task(TaskStatus::InProgress, date(2025, 1, 20));
    let first = compute_urgency(&value, now());
    for _ in 0..5 {
        assert_eq!(compute_urgency(&value, now()), first);
    }
}

#[test]
fn phase_progress_counts_done_tasks() {
    let plan = PhasePlan::new(
        "p1",
        Phase::Discovery,
        vec![
            task(TaskStatus::Done, date(2025, 1, 10)),
            task(TaskStatus::InProgress, date(2025, 1, 20)),
            task(TaskStatus::Done, date(2025, 1, 12)),
        ],
    );
    let progress = plan.progress();
    assert_eq!((progress.done, progress.total, progress.percent), (2, 3, 67));
    assert_eq!(plan.order_index, 1);

    let empty = PhasePlan::new("p9", Phase::Production, Vec::new());
    assert_eq!(empty.progress().percent, 0);
}
