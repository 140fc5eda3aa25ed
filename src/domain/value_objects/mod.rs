pub mod entity_id;
pub mod file_descriptor;
pub mod media_kind;
pub mod member_status;
pub mod viewer_role;

pub use entity_id::{generate_local_id, is_local_id};
pub use file_descriptor::FileDescriptor;
pub use media_kind::MediaKind;
pub use member_status::MemberStatus;
pub use viewer_role::ViewerRole;
