#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupItemDto {
    pub id: i64,
    pub title: String,
}
