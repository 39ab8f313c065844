use std::path::{Component, Path};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub removed: Vec<String>,
    /// `(location, reason)` for every location that could not be removed.
    pub failures: Vec<(String, String)>,
}

impl RemovalReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// One line describing every failure, for a combined warning.
    #[must_use]
    pub fn failure_summary(&self) -> String {
        self.failures
            .iter()
            .map(|(loc, reason)| format!("{loc} ({reason})"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn stays_inside(location: &str) -> bool {
    let path = Path::new(location);
    !location.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Deletes each recorded location under `namespace_dir`. Keeps going after
/// a failure so one missing path does not strand the rest.
#[must_use]
pub fn remove_locations(namespace_dir: &Path, locations: &[String]) -> RemovalReport {
    let mut report = RemovalReport::default();

    for location in locations {
        if !stays_inside(location) {
            report.failures.push((
                location.clone(),
                "outside the project namespace".to_string(),
            ));
            continue;
        }

        let path = namespace_dir.join(location);
        if std::fs::symlink_metadata(&path).is_err() {
            report
                .failures
                .push((location.clone(), "already missing".to_string()));
            continue;
        }

        match fs_extra::remove_items(&[&path]) {
            Ok(()) => report.removed.push(location.clone()),
            Err(e) => report.failures.push((location.clone(), e.to_string())),
        }
    }

    report
}
