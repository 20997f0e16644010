use crate::client::{Endpoint, Transport};
use crate::domain::models::{Candidate, FindResponse};
use crate::error::{MalpediaError, Result};
use tracing::debug;

pub fn resolve_family(transport: &dyn Transport, query: &str) -> Result<String> {
    resolve(transport, Endpoint::FindFamily(query.to_string()), query)
}

pub fn resolve_actor(transport: &dyn Transport, query: &str) -> Result<String> {
    resolve(transport, Endpoint::FindActor(query.to_string()), query)
}

fn resolve(transport: &dyn Transport, endpoint: Endpoint, query: &str) -> Result<String> {
    let body = transport.get(&endpoint)?;
    let found: FindResponse = serde_json::from_slice(&body)?;
    pick_candidate(query, found.into_candidates())
}

/// First candidate naming the query exactly (case-insensitive, aliases
/// included), otherwise the first candidate.
pub fn pick_candidate(query: &str, candidates: Vec<Candidate>) -> Result<String> {
    if candidates.len() > 1 {
        debug!(
            "{} candidates for '{}': {}",
            candidates.len(),
            query,
            candidates
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let exact = candidates.iter().position(|c| names_query(c, query));
    let idx = match exact {
        Some(i) => i,
        None if !candidates.is_empty() => 0,
        None => return Err(MalpediaError::not_found(format!("no match for '{query}'"))),
    };
    let mut candidates = candidates;
    let chosen = candidates.swap_remove(idx);
    debug!("resolved '{}' to '{}'", query, chosen.name);
    Ok(chosen.name)
}

fn names_query(c: &Candidate, query: &str) -> bool {
    let q = query.trim();
    c.name.eq_ignore_ascii_case(q)
        || c.common_name
            .as_deref()
            .map(|n| n.eq_ignore_ascii_case(q))
            .unwrap_or(false)
        || c.alt_names.iter().any(|n| n.eq_ignore_ascii_case(q))
        || c.synonyms.iter().any(|n| n.eq_ignore_ascii_case(q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeTransport;

    #[test]
    fn wrapped_candidates_resolve() {
        let t = FakeTransport::new().route(
            "/find/family/revil",
            r#"{"candidates":[{"name":"win.sodinokibi"}]}"#,
        );
        assert_eq!(resolve_family(&t, "revil").unwrap(), "win.sodinokibi");
        assert_eq!(t.requests.borrow().as_slice(), ["/find/family/revil"]);
    }

    #[test]
    fn bare_list_resolves_actor() {
        let t = FakeTransport::new().route(
            "/find/actor/apt28",
            r#"[{"name":"sofacy","common_name":"Sofacy","synonyms":["APT28","Fancy Bear"]}]"#,
        );
        assert_eq!(resolve_actor(&t, "apt28").unwrap(), "sofacy");
    }

    #[test]
    fn exact_alias_match_beats_order() {
        let t = FakeTransport::new().route(
            "/find/family/ursnif",
            r#"[{"name":"win.gozi","alt_names":["CRM"]},{"name":"win.snifula","alt_names":["Ursnif"]}]"#,
        );
        assert_eq!(resolve_family(&t, "ursnif").unwrap(), "win.snifula");
    }

    #[test]
    fn first_candidate_without_exact_match() {
        let t = FakeTransport::new().route(
            "/find/family/stux",
            r#"[{"name":"win.stuxnet"},{"name":"win.stuxnet_loader"}]"#,
        );
        assert_eq!(resolve_family(&t, "stux").unwrap(), "win.stuxnet");
    }

    #[test]
    fn empty_result_is_not_found() {
        let t = FakeTransport::new().route("/find/family/nothing", "[]");
        let err = resolve_family(&t, "nothing").unwrap_err();
        assert!(matches!(err, MalpediaError::NotFound(_)));
    }

    #[test]
    fn garbage_is_decode_error() {
        let t = FakeTransport::new().route("/find/family/x", "<html>");
        let err = resolve_family(&t, "x").unwrap_err();
        assert!(matches!(err, MalpediaError::Decode(_)));
    }
}
