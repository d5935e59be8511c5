use crate::models::{
    Catalog, Guard, GuardCompletion, Highlight, MasteryStatus, ProgressRecord, ProgressSummary,
    StatusCounts,
};

/// Share of the guard's techniques marked mastered, as a rounded percentage.
/// Guards without techniques report 0.
pub fn guard_completion(guard: &Guard, record: &ProgressRecord) -> u32 {
    let mut total = 0u32;
    let mut mastered = 0u32;
    for (_, technique) in guard.techniques() {
        total += 1;
        if record.status(&guard.technique_id(technique)) == MasteryStatus::Mastered {
            mastered += 1;
        }
    }

    if total == 0 {
        return 0;
    }
    (f64::from(mastered) / f64::from(total) * 100.0).round() as u32
}

/// Counts every stored entry, including ids with no catalog counterpart.
pub fn global_status_counts(record: &ProgressRecord) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for status in record.techniques.values() {
        match status {
            MasteryStatus::Learning => counts.learning += 1,
            MasteryStatus::Average => counts.average += 1,
            MasteryStatus::Mastered => counts.mastered += 1,
            MasteryStatus::Bad | MasteryStatus::None => {}
        }
    }
    counts
}

/// Techniques currently marked learning, walked in catalog order.
pub fn learning_highlights(catalog: &Catalog, record: &ProgressRecord) -> Vec<Highlight> {
    catalog
        .guards
        .iter()
        .flat_map(|guard| {
            guard
                .techniques()
                .filter(move |(_, technique)| {
                    record.status(&guard.technique_id(technique)) == MasteryStatus::Learning
                })
                .map(move |(category, technique)| Highlight {
                    technique: technique.clone(),
                    category,
                    guard_name: guard.name.clone(),
                    guard_id: guard.id,
                })
        })
        .collect()
}

pub fn build_summary(catalog: &Catalog, record: &ProgressRecord) -> ProgressSummary {
    let guards = catalog
        .guards
        .iter()
        .map(|guard| GuardCompletion {
            guard_id: guard.id,
            guard_name: guard.name.clone(),
            completion: guard_completion(guard, record),
        })
        .collect();

    ProgressSummary {
        last_visit: record.last_visit.clone(),
        counts: global_status_counts(record),
        guards,
        highlights: learning_highlights(catalog, record),
    }
}
