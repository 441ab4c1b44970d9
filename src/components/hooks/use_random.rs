use std::sync::atomic::{AtomicUsize, Ordering};

const PREFIX: &str = "fishki"; // Must NOT contain "/" or "-"

static COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Unique DOM id for one mounted `element`, e.g. `dialog_fishki_3`.
pub fn use_random_id_for(element: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{element}_{PREFIX}_{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_per_call() {
        let a = use_random_id_for("dialog");
        let b = use_random_id_for("dialog");
        assert_ne!(a, b);
        assert!(a.starts_with("dialog_fishki_"));
    }
}
