/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate, and returns its value.
/// Logs at debug level unless a level is given.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Calculate the number of tiles in a hexagonal disk with the given radius.
/// Radius 0 means 1 tile, 1 is 7 tiles, 2 is 19, etc.
pub fn disk_len(radius: u16) -> usize {
    // Ring k holds 6k tiles, so the disk is 1 + 6(1 + 2 + ... + r)
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_len() {
        assert_eq!(disk_len(0), 1);
        assert_eq!(disk_len(1), 7);
        assert_eq!(disk_len(2), 19);
        assert_eq!(disk_len(3), 37);
        assert_eq!(disk_len(5), 91);
    }

    #[test]
    fn test_timed() {
        let value = crate::timed!("Adding", 2 + 2);
        assert_eq!(value, 4);
    }
}
