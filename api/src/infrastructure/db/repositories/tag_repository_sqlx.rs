use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::tag_repository::TagRepository;
use crate::domain::tags::tag::{Tag, TagUsage};
use crate::infrastructure::db::PgPool;

pub struct SqlxTagRepository {
    pub pool: PgPool,
}

impl SqlxTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn tag_from_row(r: &PgRow) -> Tag {
    Tag {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        name: r.get("name"),
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn list_with_counts(&self, owner_id: Uuid) -> anyhow::Result<Vec<TagUsage>> {
        let rows = sqlx::query(
            r#"SELECT t.id, t.owner_id, t.name, COUNT(l.id)::BIGINT AS count
               FROM tags t
               LEFT JOIN link_tags lt ON lt.tag_id = t.id
               LEFT JOIN links l ON l.id = lt.link_id AND l.owner_id = $1
               WHERE t.owner_id = $1
               GROUP BY t.id, t.owner_id, t.name
               ORDER BY t.name ASC, t.id ASC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| TagUsage {
                tag: tag_from_row(r),
                count: r.get("count"),
            })
            .collect())
    }

    async fn find_owned(&self, owner_id: Uuid, ids: &[i64]) -> anyhow::Result<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            r#"SELECT id, owner_id, name FROM tags
               WHERE owner_id = $1 AND id = ANY($2)
               ORDER BY id ASC"#,
        )
        .bind(owner_id)
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(tag_from_row).collect())
    }

    async fn create_or_get(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Tag> {
        // The no-op update makes RETURNING yield the existing row on conflict
        let row = sqlx::query(
            r#"INSERT INTO tags (owner_id, name) VALUES ($1, $2)
               ON CONFLICT (owner_id, name) DO UPDATE SET name = EXCLUDED.name
               RETURNING id, owner_id, name"#,
        )
        .bind(owner_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(tag_from_row(&row))
    }
}
