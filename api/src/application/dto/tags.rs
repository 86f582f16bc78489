#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagItemDto {
    pub id: i64,
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRefDto {
    pub id: i64,
    pub name: String,
}
