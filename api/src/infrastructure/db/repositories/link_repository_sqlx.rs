use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};
use uuid::Uuid;

use crate::application::ports::link_repository::{LinkPage, LinkRepository};
use crate::domain::groups::group::Group;
use crate::domain::links::filter::{LinkFilter, PageRequest};
use crate::domain::links::link::{Link, LinkWrite};
use crate::domain::tags::tag::Tag;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::link_filter_sql;

pub struct SqlxLinkRepository {
    pub pool: PgPool,
}

impl SqlxLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn link_from_row(r: &PgRow) -> Link {
    Link {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        title: r.get("title"),
        url: r.get("url"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

// Tags are re-scoped to the owner on insert; ids of other users never land
// in link_tags even if a caller skipped resolution.
async fn replace_link_tags(
    conn: &mut PgConnection,
    link_id: i64,
    owner_id: Uuid,
    tag_ids: &[i64],
) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM link_tags WHERE link_id = $1")
        .bind(link_id)
        .execute(&mut *conn)
        .await?;
    if !tag_ids.is_empty() {
        sqlx::query(
            r#"INSERT INTO link_tags (link_id, tag_id)
               SELECT $1, t.id FROM tags t
               WHERE t.id = ANY($2) AND t.owner_id = $3
               ON CONFLICT DO NOTHING"#,
        )
        .bind(link_id)
        .bind(tag_ids)
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn replace_link_groups(
    conn: &mut PgConnection,
    link_id: i64,
    group_ids: &[i64],
) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM link_groups WHERE link_id = $1")
        .bind(link_id)
        .execute(&mut *conn)
        .await?;
    if !group_ids.is_empty() {
        sqlx::query(
            r#"INSERT INTO link_groups (link_id, group_id)
               SELECT $1, UNNEST($2::BIGINT[])
               ON CONFLICT DO NOTHING"#,
        )
        .bind(link_id)
        .bind(group_ids)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn lock_owned(conn: &mut PgConnection, id: i64, owner_id: Uuid) -> anyhow::Result<bool> {
    let row = sqlx::query("SELECT id FROM links WHERE id = $1 AND owner_id = $2 FOR UPDATE")
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

#[async_trait]
impl LinkRepository for SqlxLinkRepository {
    async fn list_filtered(&self, filter: &LinkFilter) -> anyhow::Result<Vec<Link>> {
        let mut qb = link_filter_sql::select_links(filter);
        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(link_from_row).collect())
    }

    async fn page_filtered(
        &self,
        filter: &LinkFilter,
        page: PageRequest,
    ) -> anyhow::Result<LinkPage> {
        let mut count_qb = link_filter_sql::count_links(filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        let items = if page.offset() >= total {
            Vec::new()
        } else {
            let mut qb = link_filter_sql::select_links_page(filter, page);
            let rows = qb.build().fetch_all(&self.pool).await?;
            rows.iter().map(link_from_row).collect()
        };
        Ok(LinkPage { items, total })
    }

    async fn get_for_owner(&self, id: i64, owner_id: Uuid) -> anyhow::Result<Option<Link>> {
        let row = sqlx::query(
            r#"SELECT id, owner_id, title, url, created_at, updated_at
               FROM links WHERE id = $1 AND owner_id = $2"#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(link_from_row))
    }

    async fn tags_for_link(&self, link_id: i64, owner_id: Uuid) -> anyhow::Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"SELECT t.id, t.owner_id, t.name
               FROM link_tags lt
               JOIN tags t ON t.id = lt.tag_id
               JOIN links l ON l.id = lt.link_id AND l.owner_id = $2
               WHERE lt.link_id = $1
               ORDER BY t.name ASC, t.id ASC"#,
        )
        .bind(link_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| Tag {
                id: r.get("id"),
                owner_id: r.get("owner_id"),
                name: r.get("name"),
            })
            .collect())
    }

    async fn groups_for_link(&self, link_id: i64, owner_id: Uuid) -> anyhow::Result<Vec<Group>> {
        let rows = sqlx::query(
            r#"SELECT g.id, g.owner_id, g.title
               FROM link_groups lg
               JOIN groups g ON g.id = lg.group_id
               JOIN links l ON l.id = lg.link_id AND l.owner_id = $2
               WHERE lg.link_id = $1
               ORDER BY g.title ASC, g.id ASC"#,
        )
        .bind(link_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| Group {
                id: r.get("id"),
                owner_id: r.get("owner_id"),
                title: r.get("title"),
            })
            .collect())
    }

    async fn create_for_owner(&self, owner_id: Uuid, write: &LinkWrite) -> anyhow::Result<Link> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"INSERT INTO links (owner_id, title, url)
               VALUES ($1, $2, $3)
               RETURNING id, owner_id, title, url, created_at, updated_at"#,
        )
        .bind(owner_id)
        .bind(&write.title)
        .bind(&write.url)
        .fetch_one(&mut *tx)
        .await?;
        let link = link_from_row(&row);
        replace_link_groups(&mut tx, link.id, &write.group_ids).await?;
        replace_link_tags(&mut tx, link.id, owner_id, &write.tag_ids).await?;
        tx.commit().await?;
        Ok(link)
    }

    async fn update_for_owner(
        &self,
        id: i64,
        owner_id: Uuid,
        write: &LinkWrite,
    ) -> anyhow::Result<Option<Link>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"UPDATE links SET
                    title = $1,
                    url = $2,
                    updated_at = now()
               WHERE id = $3 AND owner_id = $4
               RETURNING id, owner_id, title, url, created_at, updated_at"#,
        )
        .bind(&write.title)
        .bind(&write.url)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let link = link_from_row(&row);
        replace_link_groups(&mut tx, link.id, &write.group_ids).await?;
        replace_link_tags(&mut tx, link.id, owner_id, &write.tag_ids).await?;
        tx.commit().await?;
        Ok(Some(link))
    }

    async fn delete_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM links WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn replace_tags(&self, id: i64, owner_id: Uuid, tag_ids: &[i64]) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        if !lock_owned(&mut tx, id, owner_id).await? {
            return Ok(false);
        }
        replace_link_tags(&mut tx, id, owner_id, tag_ids).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn replace_groups(
        &self,
        id: i64,
        owner_id: Uuid,
        group_ids: &[i64],
    ) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        if !lock_owned(&mut tx, id, owner_id).await? {
            return Ok(false);
        }
        replace_link_groups(&mut tx, id, group_ids).await?;
        tx.commit().await?;
        Ok(true)
    }
}
