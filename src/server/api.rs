//! JSON payload builders for the HTTP surface. Rendering is the client's
//! problem; these expose engine state and action outcomes only.

use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::engine::{
    skill_library, training_actions, LogKind, Notification, RaidOutcome, TrainingOutcome,
};
use crate::session::Session;

/// Player-facing log entries returned per request; mirrors the bounded feed.
const LOG_PAGE: usize = 40;

pub fn health_payload() -> Result<String, serde_json::Error> {
    let body = json!({
        "status": "ok",
        "service": "shadowgym",
        "time": Utc::now().to_rfc3339(),
    });
    serde_json::to_string_pretty(&body)
}

#[derive(Debug, Serialize)]
struct StatView {
    key: &'static str,
    label: &'static str,
    value: u32,
    soft_cap: u32,
    effective_cap: u32,
}

#[derive(Debug, Serialize)]
struct SkillView {
    id: &'static str,
    name: &'static str,
    desc: &'static str,
    tier: &'static str,
    unlocked: bool,
}

pub fn state_payload(session: &Session) -> Result<String, serde_json::Error> {
    let state = &session.engine.state;
    let stats: Vec<StatView> = state
        .stats
        .iter()
        .map(|(key, stat)| StatView {
            key: key.as_str(),
            label: stat.label,
            value: stat.value,
            soft_cap: stat.soft_cap,
            effective_cap: state.effective_cap(*key),
        })
        .collect();
    let skills: Vec<SkillView> = skill_library()
        .iter()
        .map(|skill| SkillView {
            id: skill.id,
            name: skill.name,
            desc: skill.desc,
            tier: skill.tier,
            unlocked: state.has_skill(skill.id),
        })
        .collect();
    let actions: Vec<serde_json::Value> = training_actions()
        .iter()
        .map(|action| {
            json!({
                "key": action.key,
                "name": action.name,
                "energy_cost": action.energy_cost,
                "available": state.energy >= action.energy_cost,
            })
        })
        .collect();

    let body = json!({
        "player_id": session.player_id,
        "level": state.level,
        "xp": state.xp,
        "xp_to_level": state.xp_to_level,
        "energy": state.energy,
        "energy_max": state.energy_max,
        "bonus_stacks": state.bonus_stacks,
        "power": state.total_power(),
        "stats": stats,
        "skills": skills,
        "targets": state.targets,
        "actions": actions,
        "sync_enabled": session.sync_enabled(),
    });
    serde_json::to_string_pretty(&body)
}

pub fn logs_payload(session: &Session, kind: Option<&str>) -> Result<String, serde_json::Error> {
    let filter = kind.and_then(parse_log_kind);
    let page: Vec<_> = session
        .engine
        .state
        .logs
        .iter()
        .filter(|entry| filter.map(|kind| entry.kind == kind).unwrap_or(true))
        .rev()
        .take(LOG_PAGE)
        .map(|entry| {
            json!({
                "kind": entry.kind.as_str(),
                "message": entry.message,
                "timestamp": entry.timestamp.to_rfc3339(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&json!({ "logs": page }))
}

fn parse_log_kind(raw: &str) -> Option<LogKind> {
    match raw {
        "status" => Some(LogKind::Status),
        "alert" => Some(LogKind::Alert),
        "loot" => Some(LogKind::Loot),
        _ => None,
    }
}

fn notification_views(notifications: &[Notification]) -> Vec<serde_json::Value> {
    notifications
        .iter()
        .map(|notification| {
            json!({
                "title": notification.title,
                "body": notification.body,
                "actions": notification.actions,
            })
        })
        .collect()
}

fn action_response(
    session: &mut Session,
    outcome: &'static str,
) -> Result<String, serde_json::Error> {
    let notifications = session.engine.drain_notifications();
    let state = &session.engine.state;
    let body = json!({
        "outcome": outcome,
        "level": state.level,
        "xp": state.xp,
        "xp_to_level": state.xp_to_level,
        "energy": state.energy,
        "energy_max": state.energy_max,
        "power": state.total_power(),
        "notifications": notification_views(&notifications),
    });
    serde_json::to_string_pretty(&body)
}

/// Perform one training action. Unknown keys are accepted and ignored, the
/// same permissive no-op the engine applies everywhere.
pub fn train_payload(session: &mut Session, key: &str) -> Result<String, serde_json::Error> {
    let outcome = match session.engine.execute_training(key) {
        TrainingOutcome::Performed => "performed",
        TrainingOutcome::InsufficientEnergy => "insufficient_energy",
        TrainingOutcome::UnknownAction => "unknown_action",
    };
    action_response(session, outcome)
}

pub fn raid_payload(session: &mut Session) -> Result<String, serde_json::Error> {
    let outcome = match session.engine.execute_raid() {
        RaidOutcome::Victory { .. } => "victory",
        RaidOutcome::Backlash { .. } => "backlash",
        RaidOutcome::InsufficientEnergy => "insufficient_energy",
    };
    action_response(session, outcome)
}

pub fn recalibrate_payload(session: &mut Session) -> Result<String, serde_json::Error> {
    session.engine.recalibrate_targets();
    action_response(session, "recalibrated")
}
