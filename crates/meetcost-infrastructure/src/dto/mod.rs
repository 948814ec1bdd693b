//! Data Transfer Objects for persistence.
//!
//! The snapshot layout is owned here, not by the domain model, so the domain
//! types can evolve without breaking snapshots already on disk.

pub mod session;

pub use session::{
    ParticipantDto, SNAPSHOT_ENTITY, SessionSnapshot, SessionSnapshotV1_0_0, TopicDto,
    TopicStatusDto, create_session_snapshot_migrator, decode_snapshot, decode_snapshot_value,
    encode_snapshot,
};
