use chatload_types::{ScheduledReq, ScheduledVisit, SimReq, Visit, Workload};

/// Builds a single-request visit from a literal turn, starting at `start_offset`.
pub fn literal_visit(start_offset: f64, req_id: &str, content: &str) -> ScheduledVisit {
    ScheduledVisit {
        start_offset,
        visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal(req_id, content) }]),
    }
}

/// Builds a multi-turn visit where `reqs` is `(offset, id, content-or-dep)`;
/// pass `None` for content to make that turn depend on `dep_id` instead.
pub fn chained_visit(start_offset: f64, reqs: &[(f64, &str, Option<&str>, Option<&str>)]) -> ScheduledVisit {
    let reqs = reqs
        .iter()
        .map(|&(offset, id, content, dep_id)| {
            let req = match (content, dep_id) {
                (Some(content), None) => SimReq::literal(id, content),
                (None, Some(dep_id)) => SimReq::dependent(id, dep_id),
                _ => panic!("exactly one of content/dep_id must be set for request {id}"),
            };
            ScheduledReq { scheduled_offset: offset, req }
        })
        .collect();
    ScheduledVisit { start_offset, visit: Visit::new(reqs) }
}

/// A workload of `count` single-request visits evenly spaced `spacing`
/// seconds apart, each a literal turn with the same content.
pub fn evenly_spaced_workload(count: usize, spacing: f64, content: &str) -> Workload {
    let visits = (0..count)
        .map(|i| literal_visit(i as f64 * spacing, &format!("r{i}"), content))
        .collect();
    Workload::new(visits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evenly_spaced_workload_has_sorted_offsets() {
        let workload = evenly_spaced_workload(3, 2.0, "hi");
        assert_eq!(workload.len(), 3);
        assert!(workload.validate().is_ok());
        assert_eq!(workload.visits[2].start_offset, 4.0);
    }

    #[test]
    fn chained_visit_resolves_dependent_turns() {
        let visit = chained_visit(0.0, &[(0.0, "a", Some("hi"), None), (1.0, "b", None, Some("a"))]);
        assert!(visit.visit.validate().is_ok());
    }
}
