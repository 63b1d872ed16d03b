use chrono::NaiveDate;
use migtrack_core::{
    Phase, Project, ProjectId, ProjectValidationError, RiskLevel, RiskThresholds, Task,
    TaskStatus, UrgencyStatus,
};

fn project() -> Project {
    Project {
        id: ProjectId::new("6"),
        name: "Sistema de Reportes".to_string(),
        description: String::new(),
        status: Phase::Uat,
        completion_rate: 88,
        total_tasks: 35,
        completed_tasks: 31,
        blocked_tasks: 1,
        target_end_date: NaiveDate::from_ymd_opt(2025, 1, 30).unwrap(),
        start_date: None,
        health_score: 70,
        project_manager: "Diego Torres".to_string(),
        has_deliverables: false,
    }
}

#[test]
fn project_serialization_uses_wire_names() {
    let json = serde_json::to_value(project()).unwrap();
    assert_eq!(json["id"], "6");
    assert_eq!(json["status"], "UAT");
    assert_eq!(json["target_end_date"], "2025-01-30");
    assert_eq!(json["start_date"], serde_json::Value::Null);

    let decoded: Project = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, project());
}

#[test]
fn deserialize_accepts_legacy_app_name_key() {
    let value = serde_json::json!({
        "id": "7",
        "app_name": "Portal Empleados",
        "status": "Pre-Production",
        "completion_rate": 95,
        "blocked_tasks": 0,
        "total_tasks": 28,
        "completed_tasks": 27,
        "project_manager": "Patricia Vargas",
        "target_end_date": "2025-01-20",
        "health_score": 95
    });
    let decoded: Project = serde_json::from_value(value).unwrap();
    assert_eq!(decoded.name, "Portal Empleados");
    assert_eq!(decoded.status, Phase::PreProduction);
    assert!(!decoded.has_deliverables);
}

#[test]
fn deserialize_rejects_completed_above_total() {
    let mut json = serde_json::to_value(project()).unwrap();
    json["completed_tasks"] = serde_json::json!(40);

    let err = serde_json::from_value::<Project>(json).unwrap_err();
    assert!(
        err.to_string()
            .contains("completed_tasks (40) must be <= total_tasks (35)"),
        "unexpected error: {err}"
    );
}

#[test]
fn validate_rejects_blocked_above_open_tasks() {
    let mut value = project();
    value.blocked_tasks = 5;
    assert_eq!(
        value.validate(),
        Err(ProjectValidationError::BlockedExceedsOpen {
            blocked: 5,
            open: 4
        })
    );
}

#[test]
fn validate_rejects_scores_above_hundred() {
    let mut value = project();
    value.health_score = 101;
    assert_eq!(
        value.validate(),
        Err(ProjectValidationError::HealthScoreOutOfRange(101))
    );

    let mut value = project();
    value.completion_rate = 120;
    assert_eq!(
        value.validate(),
        Err(ProjectValidationError::CompletionRateOutOfRange(120))
    );
}

#[test]
fn risk_level_is_derived_from_health_score() {
    let mut value = project();
    let thresholds = RiskThresholds::default();
    assert_eq!(value.risk_level(&thresholds), RiskLevel::Healthy);

    value.health_score = 69;
    assert_eq!(value.risk_level(&thresholds), RiskLevel::Warning);

    let strict = RiskThresholds {
        healthy_min: 90,
        warning_min: 80,
    };
    assert_eq!(value.risk_level(&strict), RiskLevel::Critical);
}

#[test]
fn task_wire_names_match_board_vocabulary() {
    let value = serde_json::json!({
        "id": "t2",
        "title": "Definición de estrategia de migración",
        "status": "In Progress",
        "assigned_entity": "Smart Arq",
        "is_deliverable": true,
        "is_blocker": true,
        "planned_end_date": "2025-01-20"
    });
    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.responsible_person, None);

    assert_eq!(
        serde_json::to_value(UrgencyStatus::OnTrack).unwrap(),
        "On Track"
    );
    assert_eq!(serde_json::to_value(RiskLevel::Critical).unwrap(), "CRITICAL");
}
