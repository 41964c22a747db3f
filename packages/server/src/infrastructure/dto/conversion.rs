//! Conversion logic from domain snapshots to DTOs.

use hiroba_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{MemberInfo, RoomSnapshot};

use super::http::{ParticipantDetailDto, RoomDetailDto, RoomSummaryDto};

impl From<RoomSnapshot> for RoomSummaryDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            id: snapshot.name.into_string(),
            participants: snapshot
                .members
                .into_iter()
                .map(|member| member.nickname.into_string())
                .collect(),
            created_at: timestamp_to_jst_rfc3339(snapshot.created_at.value()),
        }
    }
}

impl From<RoomSnapshot> for RoomDetailDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            id: snapshot.name.into_string(),
            participants: snapshot
                .members
                .into_iter()
                .map(ParticipantDetailDto::from)
                .collect(),
            created_at: timestamp_to_jst_rfc3339(snapshot.created_at.value()),
        }
    }
}

impl From<MemberInfo> for ParticipantDetailDto {
    fn from(member: MemberInfo) -> Self {
        Self {
            nickname: member.nickname.into_string(),
            connected_at: timestamp_to_jst_rfc3339(member.connected_at.value()),
        }
    }
}
