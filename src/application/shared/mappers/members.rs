use super::{id_or_generate, text_or};
use crate::application::ports::records::MemberRecord;
use crate::domain::entities::Member;
use crate::domain::value_objects::MemberStatus;

pub const DEFAULT_MEMBER_NAME: &str = "Member";
pub const UNKNOWN_EMAIL: &str = "n/a";

pub fn normalize_member_status(role: Option<&str>) -> MemberStatus {
    MemberStatus::from_role_text(role)
}

pub fn map_member(member: &MemberRecord) -> Member {
    let name = member
        .user_name
        .clone()
        .or_else(|| member.name.clone())
        .unwrap_or_else(|| DEFAULT_MEMBER_NAME.to_string());
    let status = normalize_member_status(member.role.as_deref().or(member.status.as_deref()));

    Member {
        id: id_or_generate(member.record_id()),
        name,
        email: text_or(member.email.as_ref(), UNKNOWN_EMAIL),
        phone_number: member.phone_number.clone(),
        monthly_contribution: 0.0,
        status,
        avatar: member.media.clone().filter(|url| !url.is_empty()),
        role_label: member.role.clone(),
    }
}
