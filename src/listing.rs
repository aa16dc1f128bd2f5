//! Paged workflow and execution listings.
//!
//! The server returns one page for `(q, page, page_size)`; a second,
//! client-side pass narrows that page by instance prefix and free text.
//! Totals and page counts are computed over that post-filter page.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::model::{Execution, PublicInstance, Workflow, WorkflowId};
use crate::remote::PageQuery;

/// Shown in place of an empty listing.
pub const EMPTY_HINT: &str =
    "You currently do not have access to any workflows. Please wait for the superadmin to grant access.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum PageSize {
    Ten,
    #[default]
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Twenty, PageSize::Fifty];

    pub fn get(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }

    pub fn from_u32(n: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.get() == n)
    }

    pub fn next(self) -> Self {
        match self {
            PageSize::Ten => PageSize::Twenty,
            PageSize::Twenty => PageSize::Fifty,
            PageSize::Fifty => PageSize::Ten,
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::from_u32)
            .ok_or_else(|| format!("invalid page size: {} (expected 10|20|50)", s.trim()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InstanceFilter {
    #[default]
    All,
    Prefix(String),
}

impl InstanceFilter {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => InstanceFilter::All,
            p => InstanceFilter::Prefix(p.to_string()),
        }
    }

    pub fn matches(&self, id: &WorkflowId) -> bool {
        match self {
            InstanceFilter::All => true,
            InstanceFilter::Prefix(p) => id.instance_prefix() == p,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            InstanceFilter::All => "all",
            InstanceFilter::Prefix(p) => p,
        }
    }
}

/// Listing controls. Any change other than moving between pages resets to page 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    query: String,
    page: u32,
    size: PageSize,
    instance: InstanceFilter,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            size: PageSize::default(),
            instance: InstanceFilter::All,
        }
    }
}

impl PageRequest {
    pub fn new(query: &str, page: u32, size: PageSize, instance: InstanceFilter) -> Self {
        Self {
            query: query.to_string(),
            page: page.max(1),
            size,
            instance,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn instance(&self) -> &InstanceFilter {
        &self.instance
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
    }

    pub fn set_size(&mut self, size: PageSize) {
        self.size = size;
        self.page = 1;
    }

    pub fn set_instance(&mut self, instance: InstanceFilter) {
        self.instance = instance;
        self.page = 1;
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn to_query(&self) -> PageQuery {
        PageQuery {
            q: self.query.clone(),
            page: self.page,
            page_size: self.size.get(),
        }
    }
}

/// Rows that can be narrowed by the client-side pass.
pub trait Listed {
    fn listing_id(&self) -> &WorkflowId;
    /// Lowercased text the free-text filter searches.
    fn haystacks(&self) -> Vec<String>;
}

impl Listed for Workflow {
    fn listing_id(&self) -> &WorkflowId {
        &self.id
    }

    fn haystacks(&self) -> Vec<String> {
        vec![self.name().to_lowercase(), self.id.as_str().to_lowercase()]
    }
}

impl Listed for Execution {
    fn listing_id(&self) -> &WorkflowId {
        &self.id
    }

    fn haystacks(&self) -> Vec<String> {
        vec![
            self.id.as_str().to_lowercase(),
            self.workflow_id
                .as_ref()
                .map(|w| w.as_str().to_lowercase())
                .unwrap_or_default(),
            self.display_status().to_lowercase(),
        ]
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub rows: Vec<&'a T>,
    pub total: usize,
    pub total_pages: u32,
    pub current: u32,
    /// 1-based row number of the first displayed row.
    pub first_row: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {}  Page {} of {}",
            self.total, self.current, self.total_pages
        )
    }
}

pub fn paginate<'a, T: Listed>(items: &'a [T], req: &PageRequest) -> Page<'a, T> {
    let q = req.query.trim().to_lowercase();
    let filtered: Vec<&T> = items
        .iter()
        .filter(|it| req.instance.matches(it.listing_id()))
        .filter(|it| q.is_empty() || it.haystacks().iter().any(|h| h.contains(&q)))
        .collect();

    let size = req.size.get() as usize;
    let total = filtered.len();
    let total_pages = total.div_ceil(size).max(1) as u32;
    let current = req.page.min(total_pages);
    let start = (current as usize - 1) * size;
    let rows = filtered.into_iter().skip(start).take(size).collect();
    Page {
        rows,
        total,
        total_pages,
        current,
        first_row: start + 1,
    }
}

/// Distinct prefixes in the loaded page, labelled from the public instance list.
pub fn instance_options<T: Listed>(items: &[T], known: &[PublicInstance]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for it in items {
        let p = it.listing_id().instance_prefix();
        if seen.insert(p.to_string()) {
            out.push((p.to_string(), instance_label(p, known).to_string()));
        }
    }
    out
}

pub fn instance_label<'a>(prefix: &'a str, known: &'a [PublicInstance]) -> &'a str {
    known
        .iter()
        .find(|i| i.prefix == prefix)
        .map_or(prefix, PublicInstance::display_name)
}

/// Executions per workflow id; rows without a workflow id are skipped.
pub fn execution_counts(executions: &[Execution]) -> BTreeMap<WorkflowId, usize> {
    let mut counts = BTreeMap::new();
    for ex in executions {
        if let Some(wf) = ex.workflow_id.as_ref().filter(|w| !w.as_str().is_empty()) {
            *counts.entry(wf.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
