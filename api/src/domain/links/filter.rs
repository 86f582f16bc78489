use uuid::Uuid;

pub const LINKS_PER_PAGE: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagConstraint {
    Any,
    Untagged,
    /// Links carrying at least one of these tags.
    AnyOf(Vec<i64>),
}

/// Owner-scoped predicate over the link collection. Storage adapters render
/// it into their own query language; ordering is always newest first with
/// ties broken by id descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFilter {
    pub owner_id: Uuid,
    pub search: Option<String>,
    pub tags: TagConstraint,
    pub ungrouped_only: bool,
}

impl LinkFilter {
    pub fn for_owner(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            search: None,
            tags: TagConstraint::Any,
            ungrouped_only: false,
        }
    }

    /// Filter used by the link index: untagged-only wins over a tag selection.
    pub fn for_links(
        owner_id: Uuid,
        search: Option<&str>,
        tag_ids: &[i64],
        untagged_only: bool,
    ) -> Self {
        let filter = Self::for_owner(owner_id).search(search);
        if untagged_only {
            filter.untagged_only(true)
        } else {
            filter.tagged_with_any(tag_ids)
        }
    }

    /// Filter used by the inbox. Both flags default to true, which yields
    /// links that have neither tags nor groups.
    pub fn for_inbox(
        owner_id: Uuid,
        search: Option<&str>,
        show_untagged: Option<bool>,
        show_ungrouped: Option<bool>,
    ) -> Self {
        Self::for_owner(owner_id)
            .search(search)
            .untagged_only(show_untagged.unwrap_or(true))
            .ungrouped_only(show_ungrouped.unwrap_or(true))
    }

    pub fn search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }

    pub fn tagged_with_any(mut self, tag_ids: &[i64]) -> Self {
        if self.tags == TagConstraint::Untagged {
            return self;
        }
        let mut ids = tag_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        self.tags = if ids.is_empty() {
            TagConstraint::Any
        } else {
            TagConstraint::AnyOf(ids)
        };
        self
    }

    pub fn untagged_only(mut self, yes: bool) -> Self {
        if yes {
            self.tags = TagConstraint::Untagged;
        }
        self
    }

    pub fn ungrouped_only(mut self, yes: bool) -> Self {
        self.ungrouped_only = yes;
        self
    }

    /// `ILIKE` pattern for the search string with wildcards escaped, so the
    /// input is matched as a literal substring.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: LINKS_PER_PAGE,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn last_page(&self, total: i64) -> i64 {
        if total <= 0 {
            1
        } else {
            (total + self.per_page - 1) / self.per_page
        }
    }
}
