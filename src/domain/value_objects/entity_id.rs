use uuid::Uuid;

const LOCAL_ID_PREFIX: &str = "local-";

/// サーバーが ID を返さなかった場合にクライアント側で振る ID
pub fn generate_local_id() -> String {
    format!("{LOCAL_ID_PREFIX}{}", Uuid::new_v4().simple())
}

pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}
