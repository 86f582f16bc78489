use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub owner_id: Uuid,
    pub title: String,
}
