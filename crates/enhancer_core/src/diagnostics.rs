//! Page load timing reported to the console.

/// Milestones of the page load, relative to navigation start.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadTiming {
    pub dom_content_loaded_ms: f64,
    pub load_ms: f64,
}

/// One entry of the resource timing buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTiming {
    pub name: String,
    pub duration_ms: f64,
}

/// Resources slower than `threshold_ms`, slowest first.
pub fn slow_resources(entries: &[ResourceTiming], threshold_ms: f64) -> Vec<&ResourceTiming> {
    let mut slow: Vec<_> = entries
        .iter()
        .filter(|entry| entry.duration_ms > threshold_ms)
        .collect();
    slow.sort_by(|a, b| b.duration_ms.total_cmp(&a.duration_ms));
    slow
}

/// Logs the load timing and warns about slow resources.
pub fn report(timing: &LoadTiming, resources: &[ResourceTiming], threshold_ms: f64) {
    tracing::info!(
        dom_content_loaded_ms = timing.dom_content_loaded_ms.round(),
        load_ms = timing.load_ms.round(),
        resources = resources.len(),
        "Page loaded"
    );
    for resource in slow_resources(resources, threshold_ms) {
        tracing::warn!(
            name = %resource.name,
            duration_ms = resource.duration_ms.round(),
            "Slow resource"
        );
    }
}
