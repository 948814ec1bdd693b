//! Session snapshot DTOs and migrations.
//!
//! The snapshot is the JSON image of the whole session: camelCase keys, the
//! tick instant as epoch milliseconds, and a flat `version` key stamped by the
//! migrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use version_migrate::{FromDomain, IntoDomain, MigrationError, Migrator, Versioned};

use meetcost_core::cost;
use meetcost_core::error::{MeetcostError, Result};
use meetcost_core::participant::Participant;
use meetcost_core::session::Session;
use meetcost_core::topic::{Topic, TopicStatus};

/// Entity name the snapshot path is registered under.
pub const SNAPSHOT_ENTITY: &str = "session_snapshot";

/// Version assumed for snapshots written before versioning.
const LEGACY_VERSION: &str = "1.0.0";

/// Key used by the first release for the version stamp.
const LEGACY_VERSION_KEY: &str = "schemaVersion";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub annual_salary: f64,
    #[serde(default)]
    pub rate_per_second: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicStatusDto {
    Pending,
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDto {
    pub id: String,
    pub title: String,
    pub status: TopicStatusDto,
    #[serde(default)]
    pub accumulated_cost: f64,
    #[serde(default)]
    pub duration_seconds: f64,
}

/// Session snapshot V1.0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshotV1_0_0 {
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
    #[serde(default)]
    pub topics: Vec<TopicDto>,
    #[serde(default)]
    pub active_topic_id: Option<String>,
    #[serde(default)]
    pub total_meeting_cost: f64,
    #[serde(default)]
    pub is_meeting_ended: bool,
    /// Epoch milliseconds
    #[serde(default)]
    pub last_tick: Option<i64>,
}

/// Type alias for the latest snapshot version.
pub type SessionSnapshot = SessionSnapshotV1_0_0;

// ============================================================================
// Domain conversions
// ============================================================================

impl From<&Participant> for ParticipantDto {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            title: p.title.clone(),
            annual_salary: p.annual_salary,
            rate_per_second: p.rate_per_second,
        }
    }
}

impl From<ParticipantDto> for Participant {
    fn from(dto: ParticipantDto) -> Self {
        // The stored rate is informational; it is always rederived.
        Participant {
            rate_per_second: cost::rate_per_second(dto.annual_salary),
            id: dto.id,
            name: dto.name,
            title: dto.title,
            annual_salary: dto.annual_salary,
        }
    }
}

impl From<TopicStatus> for TopicStatusDto {
    fn from(status: TopicStatus) -> Self {
        match status {
            TopicStatus::Pending => Self::Pending,
            TopicStatus::Active => Self::Active,
            TopicStatus::Paused => Self::Paused,
            TopicStatus::Completed => Self::Completed,
        }
    }
}

impl From<TopicStatusDto> for TopicStatus {
    fn from(status: TopicStatusDto) -> Self {
        match status {
            TopicStatusDto::Pending => Self::Pending,
            TopicStatusDto::Active => Self::Active,
            TopicStatusDto::Paused => Self::Paused,
            TopicStatusDto::Completed => Self::Completed,
        }
    }
}

impl From<&Topic> for TopicDto {
    fn from(t: &Topic) -> Self {
        Self {
            id: t.id.clone(),
            title: t.title.clone(),
            status: t.status.into(),
            accumulated_cost: t.accumulated_cost,
            duration_seconds: t.duration_seconds,
        }
    }
}

impl From<TopicDto> for Topic {
    fn from(dto: TopicDto) -> Self {
        Topic {
            id: dto.id,
            title: dto.title,
            status: dto.status.into(),
            accumulated_cost: dto.accumulated_cost,
            duration_seconds: dto.duration_seconds,
        }
    }
}

/// Converts the V1.0.0 snapshot into the domain session.
impl IntoDomain<Session> for SessionSnapshotV1_0_0 {
    fn into_domain(self) -> Session {
        Session {
            participants: self.participants.into_iter().map(Participant::from).collect(),
            topics: self.topics.into_iter().map(Topic::from).collect(),
            active_topic_id: self.active_topic_id,
            total_meeting_cost: self.total_meeting_cost,
            is_meeting_ended: self.is_meeting_ended,
            last_tick: self.last_tick.and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}

/// Converts the domain session into the latest snapshot for persistence.
impl FromDomain<Session> for SessionSnapshotV1_0_0 {
    fn from_domain(session: Session) -> Self {
        Self {
            participants: session.participants.iter().map(ParticipantDto::from).collect(),
            topics: session.topics.iter().map(TopicDto::from).collect(),
            active_topic_id: session.active_topic_id,
            total_meeting_cost: session.total_meeting_cost,
            is_meeting_ended: session.is_meeting_ended,
            last_tick: session.last_tick.map(|t| t.timestamp_millis()),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates the migrator for session snapshots.
///
/// # Migration Path
///
/// - unversioned → V1.0.0: stamped on load, the layout is unchanged
/// - V1.0.0 → Session: converts DTO to domain model
pub fn create_session_snapshot_migrator() -> Result<Migrator> {
    let mut migrator = Migrator::builder().build();

    let snapshot_path = Migrator::define(SNAPSHOT_ENTITY)
        .from::<SessionSnapshotV1_0_0>()
        .into_with_save::<Session>();

    migrator.register(snapshot_path).map_err(|e| {
        MeetcostError::internal(format!("Failed to register snapshot migration path: {}", e))
    })?;

    Ok(migrator)
}

fn migration_error(err: MigrationError) -> MeetcostError {
    MeetcostError::Serialization {
        format: "migration".to_string(),
        message: err.to_string(),
    }
}

/// Gives an unversioned snapshot the version its layout corresponds to.
///
/// Snapshots from before the migrator carry either no version at all or the
/// old `schemaVersion` key; both are moved onto the flat `version` key.
fn stamp_legacy_version(value: &mut Value) {
    let Some(object) = value.as_object_mut() else {
        return;
    };
    if object.contains_key("version") {
        return;
    }
    let version = match object.remove(LEGACY_VERSION_KEY) {
        Some(Value::String(version)) => version,
        _ => LEGACY_VERSION.to_string(),
    };
    tracing::debug!(%version, "stamping unversioned snapshot");
    object.insert("version".to_string(), Value::String(version));
}

/// Migrates a parsed snapshot document into a session.
///
/// Unknown versions and malformed bodies are both reported as serialization
/// errors; callers decide whether to fall back.
pub fn decode_snapshot_value(mut value: Value) -> Result<Session> {
    stamp_legacy_version(&mut value);
    create_session_snapshot_migrator()?
        .load_flat_from(SNAPSHOT_ENTITY, value)
        .map_err(migration_error)
}

/// Parses snapshot text into a session.
pub fn decode_snapshot(json: &str) -> Result<Session> {
    let value: Value = serde_json::from_str(json)?;
    decode_snapshot_value(value)
}

/// Serializes a session as the latest snapshot version.
pub fn encode_snapshot(session: &Session) -> Result<String> {
    create_session_snapshot_migrator()?
        .save_domain_flat(SNAPSHOT_ENTITY, session)
        .map_err(migration_error)
}
