//! Offset/limit computation with next/prev page markers

use serde::Serialize;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 100;

/// Fully-resolved pagination for one read.
///
/// Invariants: `page >= 1`, `limit >= 1`, `offset = (page - 1) * limit`
/// (saturating), `next_page` present iff `offset + limit < total`, `prev_page`
/// present iff `offset > 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationPlan {
    pub page: u64,
    pub limit: u64,
    pub offset: u64,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

/// Next/prev markers as serialized into list envelopes.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PageMarkers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<u64>,
}

impl PaginationPlan {
    /// Compute the plan from raw `page`/`limit` parameters and a total count.
    ///
    /// Never errors: absent or unparseable values fall back to the defaults
    /// (page 1, limit 100), and non-positive values clamp to 1 so the offset
    /// can never go negative.
    pub fn plan(page: Option<&str>, limit: Option<&str>, total: u64) -> Self {
        let page = parse_clamped(page, DEFAULT_PAGE);
        let limit = parse_clamped(limit, DEFAULT_LIMIT);
        // Saturating: absurd page/limit values yield an empty window past the
        // end of the collection instead of overflowing
        let offset = (page - 1).saturating_mul(limit);

        let next_page = (offset.saturating_add(limit) < total).then(|| page.saturating_add(1));
        let prev_page = (offset > 0).then(|| page - 1);

        Self {
            page,
            limit,
            offset,
            next_page,
            prev_page,
        }
    }

    pub fn markers(&self) -> PageMarkers {
        PageMarkers {
            next_page: self.next_page,
            prev_page: self.prev_page,
        }
    }
}

fn parse_clamped(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|n| n.max(1) as u64)
        .unwrap_or(default)
}
