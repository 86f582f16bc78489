use sqlx::{Postgres, QueryBuilder};

use crate::domain::links::filter::{LinkFilter, PageRequest, TagConstraint};

pub const LINK_COLUMNS: &str = "l.id, l.owner_id, l.title, l.url, l.created_at, l.updated_at";

/// WHERE clause shared by the list, page and count statements. Expects the
/// links table aliased as `l`.
pub fn push_conditions(qb: &mut QueryBuilder<'static, Postgres>, filter: &LinkFilter) {
    qb.push(" WHERE l.owner_id = ").push_bind(filter.owner_id);

    match &filter.tags {
        TagConstraint::Any => {}
        TagConstraint::Untagged => {
            qb.push(" AND NOT EXISTS (SELECT 1 FROM link_tags lt WHERE lt.link_id = l.id)");
        }
        TagConstraint::AnyOf(ids) => {
            qb.push(" AND EXISTS (SELECT 1 FROM link_tags lt WHERE lt.link_id = l.id AND lt.tag_id = ANY(")
                .push_bind(ids.clone())
                .push("))");
        }
    }

    if filter.ungrouped_only {
        qb.push(" AND NOT EXISTS (SELECT 1 FROM link_groups lg WHERE lg.link_id = l.id)");
    }

    if let Some(pattern) = filter.search_pattern() {
        qb.push(" AND (l.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR l.url ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub fn select_links(filter: &LinkFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {LINK_COLUMNS} FROM links l"));
    push_conditions(&mut qb, filter);
    qb.push(" ORDER BY l.created_at DESC, l.id DESC");
    qb
}

pub fn select_links_page(filter: &LinkFilter, page: PageRequest) -> QueryBuilder<'static, Postgres> {
    let mut qb = select_links(filter);
    qb.push(" LIMIT ")
        .push_bind(page.per_page)
        .push(" OFFSET ")
        .push_bind(page.offset());
    qb
}

pub fn count_links(filter: &LinkFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*)::BIGINT FROM links l");
    push_conditions(&mut qb, filter);
    qb
}
