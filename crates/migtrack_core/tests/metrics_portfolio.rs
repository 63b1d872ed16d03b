use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use migtrack_core::metrics::{
    completed_project_count, compute_phase_distribution, projects_at_risk, upcoming_deadlines,
};
use migtrack_core::{
    blocker_sla_impact, compute_accountability, compute_averages, compute_sla_compliance,
    compute_task_rollup, derive_risk_distribution, predict_completion, reference_dataset, Phase,
    Project, ProjectId, RiskLevel, RiskThresholds,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
}

fn project(id: &str, health_score: u8, completion_rate: u8) -> Project {
    Project {
        id: ProjectId::new(id),
        name: format!("Project {id}"),
        description: String::new(),
        status: Phase::Development,
        completion_rate,
        total_tasks: 10,
        completed_tasks: 5,
        blocked_tasks: 0,
        target_end_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        start_date: None,
        health_score,
        project_manager: "Ana Martínez".to_string(),
        has_deliverables: false,
    }
}

#[test]
fn risk_distribution_two_one_one_split() {
    let projects = vec![
        project("a", 90, 0),
        project("b", 80, 0),
        project("c", 60, 0),
        project("d", 30, 0),
    ];
    let distribution = derive_risk_distribution(&projects, &RiskThresholds::default());

    assert_eq!(distribution.healthy, 2);
    assert_eq!(distribution.warning, 1);
    assert_eq!(distribution.critical, 1);
    assert_eq!(
        (
            distribution.healthy_pct,
            distribution.warning_pct,
            distribution.critical_pct
        ),
        (50, 25, 25)
    );
}

#[test]
fn risk_counts_always_sum_to_total() {
    for size in 1..=12u8 {
        let projects: Vec<Project> = (0..size)
            .map(|i| project(&i.to_string(), i.wrapping_mul(17) % 101, 0))
            .collect();
        let distribution = derive_risk_distribution(&projects, &RiskThresholds::default());
        assert_eq!(
            distribution.healthy + distribution.warning + distribution.critical,
            projects.len()
        );
        for level in RiskLevel::ALL {
            assert!(distribution.percentage(level) <= 100);
        }
    }
}

#[test]
fn averages_of_mixed_projects_and_bounds() {
    let projects = vec![project("a", 100, 100), project("b", 0, 0)];
    let averages = compute_averages(&projects);
    assert_eq!(averages.avg_completion, 50);
    assert_eq!(averages.avg_health_score, 50);

    let projects = vec![project("a", 100, 100), project("b", 100, 99)];
    let averages = compute_averages(&projects);
    assert!(averages.avg_completion <= 100);
    assert!(averages.avg_health_score <= 100);
}

#[test]
fn empty_project_set_yields_neutral_values() {
    let projects: Vec<Project> = Vec::new();

    let distribution = derive_risk_distribution(&projects, &RiskThresholds::default());
    assert_eq!(distribution.total, 0);
    assert_eq!(distribution.healthy_pct, 0);

    let averages = compute_averages(&projects);
    assert_eq!((averages.avg_completion, averages.avg_health_score), (0, 0));

    let rollup = compute_task_rollup(&projects);
    assert_eq!(rollup.total, 0);
    assert_eq!(rollup.completion_ratio, 0.0);
    assert!(!rollup.completion_ratio.is_nan());

    let sla = compute_sla_compliance(&projects, now(), 50);
    assert_eq!((sla.percentage, sla.on_time, sla.total), (0, 0, 0));

    let forecast = predict_completion(&projects, 3.5, now());
    assert_eq!(forecast.remaining_tasks, 0);
    assert_eq!(forecast.weeks, Some(0));
    assert_eq!(forecast.date, Some(now()));

    assert!(projects_at_risk(&projects, &RiskThresholds::default(), 5).is_empty());
    assert!(upcoming_deadlines(&projects, now(), 7, 5).is_empty());
    assert!(compute_accountability(&[]).is_empty());
    assert_eq!(completed_project_count(&projects), 0);
}

#[test]
fn forecast_seventy_tasks_at_three_and_a_half() {
    let mut value = project("a", 80, 30);
    value.total_tasks = 100;
    value.completed_tasks = 30;
    let forecast = predict_completion(&[value], 3.5, now());

    assert_eq!(forecast.remaining_tasks, 70);
    assert_eq!(forecast.weeks, Some(20));
    assert_eq!(forecast.date, Some(now() + Duration::days(140)));
}

#[test]
fn forecast_without_positive_velocity_has_no_date() {
    let projects = vec![project("a", 80, 30)];
    for velocity in [0.0, -2.0, f64::NAN] {
        let forecast = predict_completion(&projects, velocity, now());
        assert_eq!(forecast.remaining_tasks, 5);
        assert_eq!(forecast.weeks, None);
        assert_eq!(forecast.date, None);
    }
}

#[test]
fn sla_requires_future_deadline_and_half_completion() {
    let mut late = project("late", 80, 90);
    late.target_end_date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let behind = project("behind", 80, 49);
    let on_time = project("on-time", 80, 50);

    let sla = compute_sla_compliance(&[late, behind, on_time], now(), 50);
    assert_eq!(sla.on_time, 1);
    assert_eq!(sla.total, 3);
    assert_eq!(sla.percentage, 33);
}

#[test]
fn blocker_impact_ninety_six_hours() {
    let impact = blocker_sla_impact(96);
    assert_eq!((impact.days, impact.hours), (4, 0));
}

#[test]
fn at_risk_lists_critical_first_then_lowest_health() {
    let projects = vec![
        project("w-60", 60, 0),
        project("h-90", 90, 0),
        project("c-40", 40, 0),
        project("w-55", 55, 0),
        project("c-10", 10, 0),
    ];
    let ids: Vec<String> = projects_at_risk(&projects, &RiskThresholds::default(), 3)
        .into_iter()
        .map(|entry| entry.id.to_string())
        .collect();
    assert_eq!(ids, vec!["c-10", "c-40", "w-55"]);
}

#[test]
fn reference_portfolio_aggregates() {
    let dataset = reference_dataset().unwrap();
    let projects = &dataset.projects;
    let thresholds = RiskThresholds::default();

    let distribution = derive_risk_distribution(projects, &thresholds);
    assert_eq!(
        (distribution.healthy, distribution.warning, distribution.critical),
        (7, 2, 1)
    );
    assert_eq!(
        (
            distribution.healthy_pct,
            distribution.warning_pct,
            distribution.critical_pct
        ),
        (70, 20, 10)
    );

    let averages = compute_averages(projects);
    assert_eq!(averages.avg_completion, 54);
    assert_eq!(averages.avg_health_score, 74);

    let rollup = compute_task_rollup(projects);
    assert_eq!((rollup.completed, rollup.total, rollup.blocked), (209, 430, 12));

    let forecast = predict_completion(projects, 3.5, now());
    assert_eq!(forecast.remaining_tasks, 221);
    assert_eq!(forecast.weeks, Some(64));

    let sla = compute_sla_compliance(projects, now(), 50);
    assert_eq!((sla.on_time, sla.total, sla.percentage), (4, 10, 40));

    let phases = compute_phase_distribution(projects);
    let counts: Vec<usize> = phases.iter().map(|entry| entry.count).collect();
    assert_eq!(counts, vec![2, 2, 2, 1, 1, 1, 1]);
    assert_eq!(phases[0].phase, Phase::Discovery);
    assert_eq!(completed_project_count(projects), 1);

    let at_risk: Vec<String> = projects_at_risk(projects, &thresholds, 5)
        .into_iter()
        .map(|entry| entry.id.to_string())
        .collect();
    assert_eq!(at_risk, vec!["4", "9", "1"]);
}

#[test]
fn reference_upcoming_deadlines_skip_production() {
    let dataset = reference_dataset().unwrap();
    let deadlines = upcoming_deadlines(&dataset.projects, now(), 7, 5);

    let ids: Vec<String> = deadlines.iter().map(|d| d.id.to_string()).collect();
    assert_eq!(ids, vec!["7", "6", "5", "2", "1"]);

    assert_eq!(deadlines[0].days_until, 5);
    assert!(deadlines[0].is_urgent);
    assert!(!deadlines[0].is_overdue);
    assert_eq!(deadlines[1].days_until, 15);
    assert!(!deadlines[1].is_urgent);
}

#[test]
fn reference_accountability_rollup() {
    let dataset = reference_dataset().unwrap();
    let rollup = compute_accountability(&dataset.blockers);

    assert_eq!(rollup.len(), 2);
    let banco = &rollup[0];
    assert_eq!(banco.entity_name, "Banco Pichincha");
    assert_eq!(banco.blocker_count, 2);
    assert_eq!(banco.projects_affected, 2);
    assert_eq!(banco.total_hours_blocked, 120);
    assert_eq!(banco.avg_response_hours, 60);
    assert_eq!(banco.impact_days, 5);

    let epam = &rollup[1];
    assert_eq!(epam.entity_name, "EPAM Neoris");
    assert_eq!(epam.total_hours_blocked, 96);
    assert_eq!(epam.impact_days, 4);
}
