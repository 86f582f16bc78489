use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::group_repository::GroupRepository;
use crate::domain::groups::group::Group;
use crate::infrastructure::db::PgPool;

pub struct SqlxGroupRepository {
    pub pool: PgPool,
}

impl SqlxGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn group_from_row(r: &PgRow) -> Group {
    Group {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        title: r.get("title"),
    }
}

#[async_trait]
impl GroupRepository for SqlxGroupRepository {
    async fn list_for_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Group>> {
        let rows = sqlx::query(
            r#"SELECT id, owner_id, title FROM groups
               WHERE owner_id = $1
               ORDER BY title ASC, id ASC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(group_from_row).collect())
    }

    async fn find_owned(&self, owner_id: Uuid, ids: &[i64]) -> anyhow::Result<Vec<Group>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            r#"SELECT id, owner_id, title FROM groups
               WHERE owner_id = $1 AND id = ANY($2)
               ORDER BY id ASC"#,
        )
        .bind(owner_id)
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(group_from_row).collect())
    }

    async fn create_for_owner(&self, owner_id: Uuid, title: &str) -> anyhow::Result<Group> {
        let row = sqlx::query(
            r#"INSERT INTO groups (owner_id, title) VALUES ($1, $2)
               RETURNING id, owner_id, title"#,
        )
        .bind(owner_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;
        Ok(group_from_row(&row))
    }
}
