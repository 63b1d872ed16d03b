//! Plain-text renderers. One record per line, `key=value` pairs,
//! string values quoted.

use chrono::{DateTime, NaiveDate, Utc};
use migtrack_core::metrics::sla::EntityAccountability;
use migtrack_core::{
    ActivityEntry, BlockerImpact, BoardFilter, BoardTotals, Comment, DashboardSnapshot, Phase,
    ProjectBar, ProjectBoard, ProjectId, RiskLevel, RiskThresholds, TaskUrgency,
    TimelineWindow,
};
use serde::Serialize;
use std::fmt::Write;

/// One card on a rendered board column.
#[derive(Debug, Serialize)]
pub struct BoardCard {
    pub id: ProjectId,
    pub name: String,
    pub project_manager: String,
    pub risk_level: RiskLevel,
    pub risk_color: &'static str,
    pub health_score: u8,
    pub completion_rate: u8,
    pub target_end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct BoardColumn {
    pub phase: Phase,
    pub color: &'static str,
    pub icon: &'static str,
    pub projects: Vec<BoardCard>,
}

pub fn board_columns(
    board: &ProjectBoard,
    filter: &BoardFilter,
    thresholds: &RiskThresholds,
) -> Vec<BoardColumn> {
    board
        .filtered(filter)
        .into_iter()
        .map(|(phase, projects)| BoardColumn {
            phase,
            color: phase.color(),
            icon: phase.icon(),
            projects: projects
                .into_iter()
                .map(|project| {
                    let risk_level = project.risk_level(thresholds);
                    BoardCard {
                        id: project.id.clone(),
                        name: project.name.clone(),
                        project_manager: project.project_manager.clone(),
                        risk_level,
                        risk_color: risk_level.color(),
                        health_score: project.health_score,
                        completion_rate: project.completion_rate,
                        target_end_date: project.target_end_date,
                    }
                })
                .collect(),
        })
        .collect()
}

pub fn summary_lines(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    let risk = &snapshot.risk;
    let _ = writeln!(out, "generated_at={}", snapshot.generated_at.to_rfc3339());
    let _ = writeln!(out, "total_projects={}", snapshot.total_projects);
    let _ = writeln!(out, "completed_projects={}", snapshot.completed_projects);
    let _ = writeln!(out, "risk.healthy={} pct={}", risk.healthy, risk.healthy_pct);
    let _ = writeln!(out, "risk.warning={} pct={}", risk.warning, risk.warning_pct);
    let _ = writeln!(out, "risk.critical={} pct={}", risk.critical, risk.critical_pct);
    let _ = writeln!(
        out,
        "averages.completion={} averages.health_score={}",
        snapshot.averages.avg_completion, snapshot.averages.avg_health_score
    );
    let _ = writeln!(
        out,
        "tasks.completed={} tasks.total={} tasks.blocked={}",
        snapshot.tasks.completed, snapshot.tasks.total, snapshot.tasks.blocked
    );
    for phase in &snapshot.phases {
        let _ = writeln!(out, "phase=\"{}\" count={}", phase.phase, phase.count);
    }
    let _ = writeln!(
        out,
        "velocity.value={} velocity.previous={} velocity.change={}",
        snapshot.velocity.value,
        snapshot.velocity.previous,
        optional(snapshot.velocity.percent_change.map(|change| format!("{change:.1}")))
    );
    let _ = writeln!(
        out,
        "forecast.remaining={} forecast.weeks={} forecast.date={}",
        snapshot.forecast.remaining_tasks,
        optional(snapshot.forecast.weeks),
        optional(snapshot.forecast.date.map(date_only))
    );
    let _ = writeln!(
        out,
        "sla.percentage={} sla.on_time={} sla.total={}",
        snapshot.sla.percentage, snapshot.sla.on_time, snapshot.sla.total
    );
    for bottleneck in &snapshot.bottlenecks {
        let _ = writeln!(
            out,
            "bottleneck phase=\"{}\" count={} avg_days={}",
            bottleneck.phase, bottleneck.count, bottleneck.avg_days
        );
    }
    for project in &snapshot.at_risk {
        let _ = writeln!(
            out,
            "at_risk id={} name=\"{}\" risk={} health={}",
            project.id, project.name, project.risk_level, project.health_score
        );
    }
    for deadline in &snapshot.upcoming_deadlines {
        let _ = writeln!(
            out,
            "deadline id={} name=\"{}\" date={} days={} urgent={} overdue={}",
            deadline.id,
            deadline.name,
            deadline.target_end_date,
            deadline.days_until,
            deadline.is_urgent,
            deadline.is_overdue
        );
    }
    finish(out)
}

pub fn task_lines(rows: &[TaskUrgency]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "task={} title=\"{}\" entity=\"{}\" status=\"{}\" urgency=\"{}\" color={}",
            row.task_id, row.title, row.assigned_entity, row.status, row.urgency, row.urgency_color
        );
    }
    finish(out)
}

pub fn blocker_lines(impacts: &[BlockerImpact], accountability: &[EntityAccountability]) -> String {
    let mut out = String::new();
    for impact in impacts {
        let _ = writeln!(
            out,
            "blocker={} task=\"{}\" entity=\"{}\" person=\"{}\" hours={} impact={}d{}h level={} estimate={} past_estimate={}",
            impact.blocker_id,
            impact.task_title,
            impact.entity_name,
            impact.responsible_person,
            impact.hours_blocked,
            impact.impact.days,
            impact.impact.hours,
            impact.impact_level,
            optional(impact.estimated_resolution),
            impact.past_estimate
        );
    }
    for entity in accountability {
        let _ = writeln!(
            out,
            "entity=\"{}\" blockers={} projects={} hours={} avg_hours={} impact_days={}",
            entity.entity_name,
            entity.blocker_count,
            entity.projects_affected,
            entity.total_hours_blocked,
            entity.avg_response_hours,
            entity.impact_days
        );
    }
    finish(out)
}

pub fn board_lines(totals: &BoardTotals, columns: &[BoardColumn]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "totals total={} critical={} completed={}",
        totals.total, totals.critical, totals.completed
    );
    for column in columns {
        let _ = writeln!(
            out,
            "[{} {}] {} color={} icon={}",
            column.phase.position(),
            column.phase,
            column.projects.len(),
            column.color,
            column.icon
        );
        for card in &column.projects {
            let _ = writeln!(
                out,
                "  id={} name=\"{}\" manager=\"{}\" risk={} risk_color={} health={} completion={} target={}",
                card.id,
                card.name,
                card.project_manager,
                card.risk_level,
                card.risk_color,
                card.health_score,
                card.completion_rate,
                card.target_end_date
            );
        }
    }
    finish(out)
}

pub fn timeline_lines(window: &TimelineWindow, bars: &[ProjectBar]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "window start={} end={}", window.start, window.end);
    for bar in bars {
        let _ = writeln!(
            out,
            "id={} name=\"{}\" phase=\"{}\" start={} end={} left={:.1} width={:.1} risk={} color={} completion={}",
            bar.project_id,
            bar.name,
            bar.status,
            bar.start,
            bar.end,
            bar.position.left_pct,
            bar.position.width_pct,
            bar.risk_level,
            bar.color,
            bar.completion_rate
        );
    }
    finish(out)
}

/// Threads with indented replies, then the activity feed.
pub fn comment_lines(threads: &[Comment], feed: &[ActivityEntry]) -> String {
    let mut out = String::new();
    for thread in threads {
        let _ = writeln!(
            out,
            "comment={} author=\"{}\" likes={} replies={} at={} content=\"{}\"",
            thread.id,
            thread.author,
            thread.likes,
            thread.replies.len(),
            thread.created_at.to_rfc3339(),
            thread.content
        );
        for reply in &thread.replies {
            let _ = writeln!(
                out,
                "  reply={} author=\"{}\" likes={} at={} content=\"{}\"",
                reply.id,
                reply.author,
                reply.likes,
                reply.created_at.to_rfc3339(),
                reply.content
            );
        }
    }
    for entry in feed {
        let _ = writeln!(
            out,
            "activity kind={} actor=\"{}\" action=\"{}\" task={} details={} at={}",
            entry.kind,
            entry.actor,
            entry.action,
            entry.task_id,
            optional(entry.details.as_deref()),
            entry.at.to_rfc3339()
        );
    }
    finish(out)
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |value| value.to_string())
}

fn date_only(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

fn finish(mut out: String) -> String {
    if out.ends_with('\n') {
        out.pop();
    }
    out
}
